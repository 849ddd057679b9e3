//! Mock command implementation

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bucketstat_analyzer::export::{export_csv, MOCK_EXPORT_STEM};
use bucketstat_analyzer::mock::{
    mock_analysis, MockRequest, DEFAULT_MOCK_DATE, DEFAULT_MOCK_LIMIT, MOCK_TOTAL_FOR_DATE,
};
use bucketstat_shared::utils::normalize_bucket_name;
use bucketstat_shared::utils::time::{format_filter_date, parse_filter_date};
use clap::Args;
use rand::Rng;

use super::{load_export_dir, OutputArgs, TargetArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct MockArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Number of synthetic files to generate
    #[arg(long, default_value_t = DEFAULT_MOCK_LIMIT)]
    pub limit: usize,

    /// Date of the synthetic files (format: MM-DD-YYYY)
    #[arg(long, default_value = DEFAULT_MOCK_DATE)]
    pub date: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: MockArgs) -> Result<()> {
    let date = parse_filter_date(&args.date).context("Failed to parse --date")?;
    let request = MockRequest {
        bucket: normalize_bucket_name(&args.target.bucket).to_string(),
        folder: args.target.folder,
        file_count: args.limit,
        date,
    };

    // No listing happens, so only the export directory is read from config
    let export_dir = if args.output.export {
        Some(load_export_dir(args.output.config.as_deref())?)
    } else {
        None
    };

    execute(
        &request,
        export_dir.as_deref(),
        args.output.verbose,
        &mut rand::rng(),
        &mut io::stdout(),
    )
}

fn execute<R: Rng + ?Sized>(
    request: &MockRequest,
    export_dir: Option<&Path>,
    verbose: bool,
    rng: &mut R,
    out: &mut dyn Write,
) -> Result<()> {
    let date = format_filter_date(request.date);

    writeln!(out, "\nMOCK ANALYSIS (No GCP credentials required)")?;
    writeln!(out, "Analyzing bucket: {}", request.bucket)?;
    if let Some(folder) = &request.folder {
        writeln!(out, "Folder: {}", folder)?;
    }
    writeln!(out, "Date filter: {}", date)?;
    writeln!(out, "Counting total files for the specified date...")?;
    writeln!(out, "Total files for {}: {}", date, MOCK_TOTAL_FOR_DATE)?;
    writeln!(out, "Limiting analysis to {} files", request.file_count)?;

    let result = mock_analysis(request, rng);
    output::print_report(out, &result, verbose)?;

    if let Some(dir) = export_dir {
        if result.is_empty() {
            output::warning(out, "Nothing to export")?;
        } else {
            let path = export_csv(&result, dir, MOCK_EXPORT_STEM, &request.bucket)
                .context("Failed to export results")?;
            output::exported(out, &path)?;
        }
    }

    Ok(())
}
