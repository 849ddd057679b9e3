//! Error type shared by every stage of an analysis run.

use thiserror::Error;

/// Why an analysis produced no result.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The `--date` argument is not `MM-DD-YYYY`
    #[error("Invalid date '{input}': expected MM-DD-YYYY ({reason})")]
    InvalidDate { input: String, reason: String },

    /// Listing failed at the storage backend (network, permission, not found)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Writing the CSV export failed
    #[error("Export failed: {0}")]
    Export(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// True when the failure came from the backend rather than from user input.
    pub fn is_backend(&self) -> bool {
        matches!(self, AnalysisError::Backend(_))
    }
}

impl From<std::io::Error> for AnalysisError {
    fn from(e: std::io::Error) -> Self {
        AnalysisError::Export(e.to_string())
    }
}
