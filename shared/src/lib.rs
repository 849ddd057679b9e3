//! Shared types and utilities for bucketstat
//!
//! This crate contains the object listing data model, the error type and the
//! formatting helpers used by both the analyzer library and the CLI.

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::AnalysisError;
pub use types::{analysis::*, object::*};
