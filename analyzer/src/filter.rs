//! Date-based filtering for listed objects.
//!
//! An object matches when its last-modified time, converted to UTC, falls on
//! the requested calendar day. The comparison is done on the `MM-DD-YYYY`
//! rendering of both dates.

use bucketstat_shared::utils::time::{format_filter_date, parse_filter_date, utc_date_key};
use bucketstat_shared::{AnalysisError, ObjectRecord};
use chrono::NaiveDate;

/// Keeps objects last modified on one UTC calendar day.
///
/// # Example
///
/// ```
/// use bucketstat_analyzer::filter::DateFilter;
///
/// let filter = DateFilter::parse(Some("04-29-2025")).unwrap();
/// assert_eq!(filter.target(), Some("04-29-2025"));
///
/// // No date: everything passes
/// assert!(DateFilter::parse(None).unwrap().target().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    /// Target day rendered `MM-DD-YYYY`
    target: Option<String>,
}

impl DateFilter {
    /// A filter that lets every object through.
    pub fn any() -> Self {
        Self::default()
    }

    /// A filter for one calendar day.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            target: Some(format_filter_date(date)),
        }
    }

    /// Build from the optional `--date` argument.
    ///
    /// A malformed date is an error for the whole run, not for a single object.
    pub fn parse(arg: Option<&str>) -> Result<Self, AnalysisError> {
        match arg {
            Some(s) => Ok(Self::on(parse_filter_date(s)?)),
            None => Ok(Self::any()),
        }
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Check whether an object was last modified on the target day.
    ///
    /// Objects without a modification time never match a date.
    pub fn matches(&self, object: &ObjectRecord) -> bool {
        let Some(target) = &self.target else {
            return true;
        };
        match &object.updated_at {
            Some(updated) => utc_date_key(updated) == *target,
            None => false,
        }
    }
}
