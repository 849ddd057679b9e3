//! CLI for bucketstat
//!
//! Two commands share one report format:
//! - analyze: list a live bucket, filter by prefix and date, summarize
//! - mock: the same report built from synthetic listings, no credentials needed

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "bucketstat")]
#[command(about = "bucketstat - cloud storage bucket analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze objects in a Google Cloud Storage bucket
    Analyze(commands::analyze::AnalyzeArgs),

    /// Print a synthetic analysis (no credentials required)
    Mock(commands::mock::MockArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args).await,
        Commands::Mock(args) => commands::mock::run(args),
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
