//! Analyze command implementation

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use bucketstat_analyzer::export::{export_csv, LIVE_EXPORT_STEM};
use bucketstat_analyzer::store::gcs::GcsStore;
use bucketstat_analyzer::store::ObjectStore;
use bucketstat_analyzer::{analyze, AnalysisRequest, DateFilter, Progress};
use bucketstat_shared::utils::{effective_prefix, normalize_bucket_name};
use clap::Args;
use indicatif::ProgressBar;
use tracing::debug;

use super::{load_config, OutputArgs, TargetArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Filter objects by prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Limit the number of files to analyze
    #[arg(long)]
    pub limit: Option<usize>,

    /// Filter by date (format: MM-DD-YYYY)
    #[arg(long)]
    pub date: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub async fn run(args: AnalyzeArgs) -> Result<()> {
    // A bad date stops the run before config is read or anything is listed
    let request = build_request(&args)?;

    let config = load_config(args.output.config.as_deref())?;
    debug!(
        "API endpoint {} (authenticated: {})",
        config.api_endpoint,
        config.access_token.is_some()
    );
    let store = GcsStore::new(&config).context("Failed to create storage client")?;

    let export_dir = args.output.export.then_some(config.export_dir.as_path());
    execute(
        &store,
        &request,
        export_dir,
        args.output.verbose,
        &mut io::stdout(),
    )
    .await
}

fn build_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    let date = DateFilter::parse(args.date.as_deref()).context("Failed to parse --date")?;
    Ok(AnalysisRequest {
        bucket: normalize_bucket_name(&args.target.bucket).to_string(),
        prefix: effective_prefix(args.target.folder.as_deref(), args.prefix.as_deref()),
        limit: args.limit,
        date,
    })
}

/// Run both passes against `store` and write the report to `out`.
///
/// Backend failures are reported on `out` and end the run successfully.
/// With `export_dir` set, a non-empty result is also written as CSV there.
async fn execute(
    store: &dyn ObjectStore,
    request: &AnalysisRequest,
    export_dir: Option<&Path>,
    verbose: bool,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "Analyzing bucket: {}", request.bucket)?;
    if let Some(prefix) = &request.prefix {
        writeln!(out, "Prefix filter: {}", prefix)?;
    }
    if let Some(date) = request.date.target() {
        writeln!(out, "Date filter: {}", date)?;
    }

    let spinner = output::spinner("Listing objects");
    let mut write_failure = None;
    let outcome = analyze(store, request, |progress| {
        if let Err(e) = progress_line(out, request, &spinner, progress) {
            write_failure.get_or_insert(e);
        }
    })
    .await;
    spinner.finish_and_clear();
    if let Some(e) = write_failure {
        return Err(e.into());
    }

    let result = match outcome {
        Ok(result) => result,
        Err(e) if e.is_backend() => {
            output::error(out, &format!("Error analyzing bucket: {}", e))?;
            return Ok(());
        }
        Err(e) => return Err(e).context("Analysis failed"),
    };

    if result.is_empty() {
        output::info(out, "No objects found matching the criteria.")?;
        return Ok(());
    }

    output::print_report(out, &result, verbose)?;

    if let Some(dir) = export_dir {
        match export_csv(&result, dir, LIVE_EXPORT_STEM, &request.bucket) {
            Ok(path) => output::exported(out, &path)?,
            Err(e) => output::error(out, &format!("Error analyzing bucket: {}", e))?,
        }
    }

    Ok(())
}

fn progress_line(
    out: &mut dyn Write,
    request: &AnalysisRequest,
    spinner: &ProgressBar,
    progress: Progress,
) -> io::Result<()> {
    match progress {
        Progress::Counting => {
            writeln!(out, "Counting total files for the specified date...")?;
            spinner.enable_steady_tick(Duration::from_millis(120));
        }
        Progress::Counted(total) => {
            spinner.finish_and_clear();
            writeln!(
                out,
                "Total files for {}: {}",
                request.date.target().unwrap_or("all dates"),
                total
            )?;
        }
        Progress::Listing { limit, explicit } => {
            if explicit {
                writeln!(out, "Limiting analysis to {} files", limit)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{OutputArgs, TargetArgs};
    use bucketstat_analyzer::store::memory::InMemoryStore;
    use bucketstat_shared::ObjectRecord;

    fn args(bucket: &str, date: Option<&str>) -> AnalyzeArgs {
        AnalyzeArgs {
            target: TargetArgs {
                bucket: bucket.to_string(),
                folder: None,
            },
            prefix: None,
            limit: None,
            date: date.map(str::to_string),
            output: OutputArgs {
                export: true,
                verbose: false,
                config: None,
            },
        }
    }

    fn store() -> InMemoryStore {
        InMemoryStore::new(2).with_bucket(
            "billing",
            vec![
                ObjectRecord::new("reports/a.csv", 1024),
                ObjectRecord::new("reports/b.csv", 1024),
                ObjectRecord::new("raw/c.json", 512),
            ],
        )
    }

    async fn execute_to_string(
        store: &InMemoryStore,
        request: &AnalysisRequest,
        export_dir: Option<&Path>,
    ) -> Result<String> {
        let mut buf = Vec::new();
        execute(store, request, export_dir, false, &mut buf).await?;
        Ok(String::from_utf8(buf)?)
    }

    #[tokio::test]
    async fn test_missing_bucket_is_reported_not_fatal() {
        let store = store();
        let request = build_request(&args("gs://nope", None)).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let printed = execute_to_string(&store, &request, Some(dir.path()))
            .await
            .unwrap();
        assert!(printed.starts_with("Analyzing bucket: nope\n"));
        assert!(printed.contains("Error analyzing bucket: Storage backend error: bucket not found: nope"));
        assert!(!printed.contains("Summary:"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_no_matches_skips_report_and_export() {
        let store = store();
        let mut request = build_request(&args("billing", None)).unwrap();
        request.prefix = Some("archive/".to_string());
        let dir = tempfile::tempdir().unwrap();

        let printed = execute_to_string(&store, &request, Some(dir.path()))
            .await
            .unwrap();
        assert!(printed.contains("Total files for all dates: 0"));
        assert!(printed.contains("No objects found matching the criteria."));
        assert!(!printed.contains("Summary:"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_limited_run_reports_and_exports() {
        let store = store();
        let mut request = build_request(&args("billing", None)).unwrap();
        request.prefix = Some("reports/".to_string());
        request.limit = Some(1);
        let dir = tempfile::tempdir().unwrap();

        let printed = execute_to_string(&store, &request, Some(dir.path()))
            .await
            .unwrap();
        assert!(printed.contains("Prefix filter: reports/"));
        assert!(printed.contains("Limiting analysis to 1 files"));
        assert!(printed.contains("Total files analyzed: 1 (of 2 total for this date)"));
        assert!(printed.contains("Total size: 1.0 KB"));
        assert!(printed.contains("Results exported to"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_date_fails_before_listing() {
        let store = store();
        let bad = args("billing", Some("2025-04-29"));

        assert!(build_request(&bad).is_err());
        let err = run(bad).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse --date"));
        assert_eq!(store.page_fetches(), 0);
    }
}
