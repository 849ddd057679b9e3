//! Bucket analysis library
//!
//! Lists a bucket through an [`store::ObjectStore`], filters by last-modified
//! date, aggregates counts and sizes, and exports results as CSV. The
//! [`mock`] module produces listings of the same shape without a backend.

pub mod config;
pub mod export;
pub mod filter;
pub mod mock;
pub mod pipeline;
pub mod report;
pub mod store;

pub use config::AnalyzerConfig;
pub use filter::DateFilter;
pub use pipeline::{analyze, count_matching, list_matching, AnalysisRequest, Progress};
