//! CSV export of analysis results.
//!
//! One header row followed by one row per analyzed object, written to
//! `<stem>_<bucket>_<YYYYMMDD_HHMMSS>.csv` in the configured directory.

use std::io;
use std::path::{Path, PathBuf};

use bucketstat_shared::utils::time::export_stamp;
use bucketstat_shared::utils::{format_size, sanitize_bucket_name};
use bucketstat_shared::{AnalysisError, AnalysisResult, ObjectRecord};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::info;

/// File name stem for exports of live listings
pub const LIVE_EXPORT_STEM: &str = "gcs_analysis";

/// File name stem for exports of synthetic listings
pub const MOCK_EXPORT_STEM: &str = "mock_gcs_analysis";

/// Column names are part of the export format; keep them stable.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Size")]
    size: String,
    #[serde(rename = "Size_Bytes")]
    size_bytes: u64,
    #[serde(rename = "Type")]
    content_type: &'a str,
    #[serde(rename = "Created")]
    created: String,
    #[serde(rename = "Storage_Class")]
    storage_class: &'a str,
    #[serde(rename = "Last_Modified")]
    last_modified: String,
    #[serde(rename = "Public_Access")]
    public_access: &'a str,
    #[serde(rename = "Generation")]
    generation: &'a str,
    #[serde(rename = "Encryption")]
    encryption: &'a str,
}

impl<'a> From<&'a ObjectRecord> for ExportRow<'a> {
    fn from(r: &'a ObjectRecord) -> Self {
        Self {
            name: &r.name,
            size: format_size(r.size_bytes as f64),
            size_bytes: r.size_bytes,
            content_type: r.content_type_display(),
            created: r.created_display(),
            storage_class: &r.storage_class,
            last_modified: r.updated_display(),
            public_access: r.public_access_display(),
            generation: &r.generation,
            encryption: r.encryption_display(),
        }
    }
}

/// `gcs_analysis_my-bucket_20250429_141503.csv`
pub fn export_file_name<Tz: TimeZone>(stem: &str, bucket: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}_{}_{}.csv",
        stem,
        sanitize_bucket_name(bucket),
        export_stamp(now)
    )
}

/// Write the header and one row per record; returns the number of data rows.
pub fn write_csv<W: io::Write>(records: &[ObjectRecord], writer: W) -> Result<usize, AnalysisError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(ExportRow::from(record))
            .map_err(|e| AnalysisError::Export(e.to_string()))?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// Export `result` into `dir`, returning the path of the new file.
///
/// Empty results are not exported.
pub fn export_csv(
    result: &AnalysisResult,
    dir: &Path,
    stem: &str,
    bucket: &str,
) -> Result<PathBuf, AnalysisError> {
    if result.is_empty() {
        return Err(AnalysisError::Export("no records to export".to_string()));
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(stem, bucket, &Local::now()));
    let file = std::fs::File::create(&path)?;
    let rows = write_csv(&result.records, io::BufWriter::new(file))?;

    info!("Exported {} row(s) to {}", rows, path.display());
    Ok(path)
}
