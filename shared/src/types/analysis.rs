//! Result of one analysis run

use serde::{Deserialize, Serialize};

use super::object::ObjectRecord;
use crate::utils::format_size;

/// Records returned by a run plus the figures derived from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Records in backend listing order, already limited
    pub records: Vec<ObjectRecord>,

    /// Matching objects ignoring any limit, when it was computed
    pub total_file_count_for_date: Option<u64>,

    /// Sum of `size_bytes` over `records` only
    pub total_size_bytes: u64,

    /// Mention the date total even when every matching object was analyzed
    #[serde(default)]
    pub always_show_date_total: bool,
}

impl AnalysisResult {
    /// Build a result, accumulating the size total over `records`.
    pub fn new(records: Vec<ObjectRecord>, total_file_count_for_date: Option<u64>) -> Self {
        let total_size_bytes = records.iter().map(|r| r.size_bytes).sum();
        Self {
            records,
            total_file_count_for_date,
            total_size_bytes,
            always_show_date_total: false,
        }
    }

    /// Always print `(of M total for this date)` in the summary.
    pub fn with_date_total_shown(mut self) -> Self {
        self.always_show_date_total = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            files_analyzed: self.records.len() as u64,
            total_for_date: self.total_file_count_for_date,
            total_size_bytes: self.total_size_bytes,
            always_show_date_total: self.always_show_date_total,
        }
    }
}

/// Figures printed after a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub files_analyzed: u64,
    pub total_for_date: Option<u64>,
    pub total_size_bytes: u64,
    pub always_show_date_total: bool,
}

impl Summary {
    /// `Total files analyzed: 3 (of 25 total for this date)`
    ///
    /// The date total is only mentioned when it differs from the analyzed count,
    /// unless `always_show_date_total` is set.
    pub fn analyzed_line(&self) -> String {
        match self.total_for_date {
            Some(total) if self.always_show_date_total || total != self.files_analyzed => format!(
                "Total files analyzed: {} (of {} total for this date)",
                self.files_analyzed, total
            ),
            _ => format!("Total files analyzed: {}", self.files_analyzed),
        }
    }

    /// `Total size: 141.3 MB`
    pub fn size_line(&self) -> String {
        format!("Total size: {}", format_size(self.total_size_bytes as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_accumulates_size() {
        let result = AnalysisResult::new(
            vec![ObjectRecord::new("a", 1024), ObjectRecord::new("b", 512)],
            Some(10),
        );
        assert_eq!(result.total_size_bytes, 1536);
        assert_eq!(result.summary().files_analyzed, 2);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_analyzed_line_mentions_date_total_when_truncated() {
        let summary = Summary {
            files_analyzed: 3,
            total_for_date: Some(25),
            total_size_bytes: 0,
            always_show_date_total: false,
        };
        assert_eq!(
            summary.analyzed_line(),
            "Total files analyzed: 3 (of 25 total for this date)"
        );
    }

    #[test]
    fn test_analyzed_line_plain() {
        let full = Summary {
            files_analyzed: 4,
            total_for_date: Some(4),
            total_size_bytes: 0,
            always_show_date_total: false,
        };
        assert_eq!(full.analyzed_line(), "Total files analyzed: 4");

        let unknown = Summary {
            total_for_date: None,
            ..full
        };
        assert_eq!(unknown.analyzed_line(), "Total files analyzed: 4");
    }

    #[test]
    fn test_analyzed_line_forced_date_total() {
        let result = AnalysisResult::new(vec![ObjectRecord::new("a", 1); 4], Some(4));
        assert_eq!(result.summary().analyzed_line(), "Total files analyzed: 4");

        let shown = result.with_date_total_shown();
        assert_eq!(
            shown.summary().analyzed_line(),
            "Total files analyzed: 4 (of 4 total for this date)"
        );

        let unknown = AnalysisResult::new(Vec::new(), None).with_date_total_shown();
        assert_eq!(unknown.summary().analyzed_line(), "Total files analyzed: 0");
    }

    #[test]
    fn test_size_line() {
        let result = AnalysisResult::new(vec![ObjectRecord::new("a", 1536)], None);
        assert_eq!(result.summary().size_line(), "Total size: 1.5 KB");
    }
}
