//! Time-related utilities

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::error::AnalysisError;

/// Format used by `--date` and by the date filter comparison.
pub const FILTER_DATE_FORMAT: &str = "%m-%d-%Y";

/// Human-readable timestamp used in verbose listings and exports.
pub const DISPLAY_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";

/// Timestamp embedded in export file names.
pub const EXPORT_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Parse a `MM-DD-YYYY` date argument.
///
/// The shape is checked before chrono sees the string so that unpadded
/// values such as `4-29-2025` are rejected rather than silently accepted.
pub fn parse_filter_date(s: &str) -> Result<NaiveDate, AnalysisError> {
    let invalid = |reason: &str| AnalysisError::InvalidDate {
        input: s.to_string(),
        reason: reason.to_string(),
    };

    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return Err(invalid("wrong length"));
    }
    for (i, b) in bytes.iter().enumerate() {
        let ok = match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(invalid("wrong shape"));
        }
    }

    NaiveDate::parse_from_str(s, FILTER_DATE_FORMAT).map_err(|e| invalid(&e.to_string()))
}

/// Render a calendar date as `MM-DD-YYYY`.
pub fn format_filter_date(date: NaiveDate) -> String {
    date.format(FILTER_DATE_FORMAT).to_string()
}

/// UTC calendar date of a timestamp, rendered `MM-DD-YYYY`.
pub fn utc_date_key<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    format_filter_date(ts.with_timezone(&Utc).date_naive())
}

/// Render a timestamp for display, or `"Unknown"` when absent.
pub fn display_timestamp(ts: Option<&DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format(DISPLAY_FORMAT).to_string(),
        None => "Unknown".to_string(),
    }
}

/// Parse an RFC 3339 timestamp as returned by the storage API.
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Stamp for export file names, e.g. `20250429_141503`.
pub fn export_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(EXPORT_STAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_parse_filter_date() {
        let d = parse_filter_date("04-29-2025").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 4, 29).unwrap());
        assert_eq!(format_filter_date(d), "04-29-2025");
    }

    #[test]
    fn test_parse_filter_date_rejects_bad_shapes() {
        for bad in ["2025-04-29", "4-29-2025", "04/29/2025", "04-29-25", "", "ab-cd-efgh"] {
            assert!(parse_filter_date(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_parse_filter_date_rejects_impossible_dates() {
        assert!(parse_filter_date("02-30-2025").is_err());
        assert!(parse_filter_date("13-01-2025").is_err());
    }

    #[test]
    fn test_utc_date_key_normalizes_offset() {
        // 23:30 at -05:00 is already the next day in UTC
        let ts = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 4, 28, 23, 30, 0)
            .unwrap();
        assert_eq!(utc_date_key(&ts), "04-29-2025");
    }

    #[test]
    fn test_display_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 4, 29, 14, 5, 9).unwrap();
        assert_eq!(display_timestamp(Some(&ts)), "Apr 29, 2025, 02:05:09 PM");
        assert_eq!(display_timestamp(None), "Unknown");
    }

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_rfc3339("2025-04-29T10:11:12.345Z").unwrap();
        assert_eq!(utc_date_key(&ts), "04-29-2025");
        assert!(parse_rfc3339("yesterday").is_none());
    }

    #[test]
    fn test_export_stamp() {
        let ts = Utc.with_ymd_and_hms(2025, 4, 29, 9, 3, 7).unwrap();
        assert_eq!(export_stamp(&ts), "20250429_090307");
    }
}
