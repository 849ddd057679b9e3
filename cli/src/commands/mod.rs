//! Command implementations and the arguments they share

pub mod analyze;
pub mod mock;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bucketstat_analyzer::AnalyzerConfig;
use clap::Args;

/// Which bucket, and optionally which folder inside it
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Name of the bucket to analyze (a gs:// prefix is accepted)
    pub bucket: String,

    /// Folder within the bucket
    #[arg(long)]
    pub folder: Option<String>,
}

/// What to do with the result
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Export results to CSV
    #[arg(long)]
    pub export: bool,

    /// Show detailed file listing
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: ./bucketstat.toml if present)
    #[arg(long, env = "BUCKETSTAT_CONFIG")]
    pub config: Option<PathBuf>,
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    AnalyzerConfig::load(path).context("Failed to load configuration")
}

/// Only the export directory; listing settings are not consulted.
pub(crate) fn load_export_dir(path: Option<&Path>) -> Result<PathBuf> {
    AnalyzerConfig::load_export_dir(path).context("Failed to load configuration")
}
