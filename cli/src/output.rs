//! Output formatting utilities for CLI commands
//!
//! Everything except the spinner is written to a caller-supplied writer
//! (stdout in the binary).

use std::io::{self, Write};
use std::path::Path;

use bucketstat_analyzer::report;
use bucketstat_shared::AnalysisResult;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Print success message
pub fn success(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green(), msg)
}

/// Print error message
///
/// Goes to stdout with the rest of the report.
pub fn error(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "✗".red(), msg)
}

/// Print warning message
pub fn warning(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "⚠".yellow(), msg)
}

/// Print info message
pub fn info(out: &mut dyn Write, msg: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "ℹ".blue(), msg)
}

/// Spinner on stderr; hidden when stderr is not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb
}

/// Optional per-file table, then the summary.
pub fn print_report(out: &mut dyn Write, result: &AnalysisResult, verbose: bool) -> io::Result<()> {
    if verbose {
        writeln!(out, "\nFile Analysis:")?;
        for line in report::detail_lines(result) {
            writeln!(out, "{}", line)?;
        }
    }

    writeln!(out, "\nSummary:")?;
    for line in report::summary_lines(result) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

pub fn exported(out: &mut dyn Write, path: &Path) -> io::Result<()> {
    writeln!(out)?;
    success(out, &format!("Results exported to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketstat_shared::ObjectRecord;

    fn written(f: impl FnOnce(&mut dyn Write) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_status_lines() {
        assert!(written(|out| info(out, "Nothing to export")).ends_with("Nothing to export\n"));
        assert!(written(|out| error(out, "boom")).contains("✗"));
        assert!(written(|out| warning(out, "careful")).contains("careful"));
    }

    #[test]
    fn test_report_verbose_and_plain() {
        let result = AnalysisResult::new(vec![ObjectRecord::new("a.csv", 2048)], Some(3));

        let plain = written(|out| print_report(out, &result, false));
        assert!(!plain.contains("File Analysis:"));
        assert!(plain.contains("Total files analyzed: 1 (of 3 total for this date)"));
        assert!(plain.contains("Total size: 2.0 KB"));

        let verbose = written(|out| print_report(out, &result, true));
        assert!(verbose.contains("File Analysis:"));
        assert!(verbose.contains("a.csv"));
    }
}
