//! Console rendering of analysis results

use bucketstat_shared::utils::format_size;
use bucketstat_shared::{AnalysisResult, ObjectRecord};

const NAME_WIDTH: usize = 50;
const SIZE_WIDTH: usize = 15;
const TYPE_WIDTH: usize = 20;
const TIME_WIDTH: usize = 25;
const CLASS_WIDTH: usize = 15;

/// Total width of a table line
pub const TABLE_WIDTH: usize = 150;

pub fn table_header() -> String {
    format!(
        "{:<NAME_WIDTH$} {:<SIZE_WIDTH$} {:<TYPE_WIDTH$} {:<TIME_WIDTH$} {:<CLASS_WIDTH$} {:<TIME_WIDTH$}",
        "Name", "Size", "Type", "Created", "Storage Class", "Last Modified"
    )
}

pub fn table_separator() -> String {
    "-".repeat(TABLE_WIDTH)
}

/// One verbose listing line for `record`.
pub fn table_row(record: &ObjectRecord) -> String {
    format!(
        "{:<NAME_WIDTH$} {:<SIZE_WIDTH$} {:<TYPE_WIDTH$} {:<TIME_WIDTH$} {:<CLASS_WIDTH$} {:<TIME_WIDTH$}",
        record.name,
        format_size(record.size_bytes as f64),
        record.content_type_display(),
        record.created_display(),
        record.storage_class,
        record.updated_display(),
    )
}

/// Header, separator and one row per record.
pub fn detail_lines(result: &AnalysisResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.records.len() + 2);
    lines.push(table_header());
    lines.push(table_separator());
    lines.extend(result.records.iter().map(table_row));
    lines
}

/// The two summary lines printed at the end of every run.
pub fn summary_lines(result: &AnalysisResult) -> [String; 2] {
    let summary = result.summary();
    [summary.analyzed_line(), summary.size_line()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_header_layout() {
        let header = table_header();
        assert!(header.starts_with("Name"));
        assert_eq!(header.find("Size"), Some(NAME_WIDTH + 1));
        assert!(header.trim_end().ends_with("Last Modified"));
    }

    #[test]
    fn test_row_contents() {
        let mut rec = ObjectRecord::new("billing/EA-Cost-Actual.csv", 148_163_789);
        rec.content_type = Some("text/csv".to_string());
        rec.created_at = Some(Utc.with_ymd_and_hms(2025, 4, 29, 9, 5, 0).unwrap());

        let row = table_row(&rec);
        assert!(row.starts_with("billing/EA-Cost-Actual.csv"));
        assert!(row.contains("141.3 MB"));
        assert!(row.contains("text/csv"));
        assert!(row.contains("Apr 29, 2025, 09:05:00 AM"));
        assert!(row.contains("Standard"));
        assert!(row.contains("Unknown"));
    }

    #[test]
    fn test_detail_and_summary_lines() {
        let result = AnalysisResult::new(
            vec![ObjectRecord::new("a", 1024), ObjectRecord::new("b", 1024)],
            Some(7),
        );
        let lines = detail_lines(&result);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].len(), TABLE_WIDTH);

        let [analyzed, size] = summary_lines(&result);
        assert_eq!(analyzed, "Total files analyzed: 2 (of 7 total for this date)");
        assert_eq!(size, "Total size: 2.0 KB");
    }
}
