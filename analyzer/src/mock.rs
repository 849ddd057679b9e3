//! Synthetic listings for demos without credentials
//!
//! Records are built from a fixed catalog of cost-report style files. Values
//! are random, so only the shape of a listing is stable across runs; the
//! first record is always `EA-Cost-Actual.csv` at exactly 141.3 MB.

use bucketstat_shared::{AnalysisResult, ObjectRecord, DEFAULT_STORAGE_CLASS};
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;
use tracing::debug;

/// Date used when `mock` runs without `--date`
pub const DEFAULT_MOCK_DATE: &str = "04-29-2025";

/// Files generated when `mock` runs without `--limit`
pub const DEFAULT_MOCK_LIMIT: usize = 10;

/// Date total reported by every mock run
pub const MOCK_TOTAL_FOR_DATE: u64 = 25;

const MIB: f64 = 1024.0 * 1024.0;

/// Working hours: 09:00:00 up to 17:59:59
const FIRST_SECOND: i64 = 9 * 3600;
const LAST_SECOND: i64 = 18 * 3600 - 1;

const GENERATION_RANGE: std::ops::RangeInclusive<u64> = 1_600_000_000_000_000..=1_700_000_000_000_000;

#[derive(Debug, Clone, Copy)]
enum SizeSpec {
    /// Exactly this many MiB
    Fixed(f64),
    /// Uniform between two MiB values
    Between(f64, f64),
}

#[derive(Debug, Clone, Copy)]
struct Template {
    stem: &'static str,
    content_type: &'static str,
    size: SizeSpec,
}

const fn template(stem: &'static str, content_type: &'static str, size: SizeSpec) -> Template {
    Template {
        stem,
        content_type,
        size,
    }
}

const CATALOG: [Template; 10] = [
    template("EA-Cost-Actual.csv", "text/csv", SizeSpec::Fixed(141.3)),
    template("billing-report", "text/csv", SizeSpec::Between(50.0, 200.0)),
    template("usage-stats", "application/json", SizeSpec::Between(10.0, 50.0)),
    template("resource-inventory", "text/csv", SizeSpec::Between(20.0, 100.0)),
    template("monthly-summary", "application/pdf", SizeSpec::Between(5.0, 15.0)),
    template("cloud-spend", "text/csv", SizeSpec::Between(80.0, 150.0)),
    template("cost-allocation", "text/csv", SizeSpec::Between(60.0, 120.0)),
    template("project-metrics", "application/json", SizeSpec::Between(30.0, 70.0)),
    template("optimization-report", "application/pdf", SizeSpec::Between(8.0, 25.0)),
    template("forecast-data", "text/csv", SizeSpec::Between(40.0, 90.0)),
];

/// Used for every file past the end of the catalog
const FALLBACK: Template = template("generic-data", "text/plain", SizeSpec::Between(10.0, 100.0));

/// Inputs of one synthetic run
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub bucket: String,
    pub folder: Option<String>,
    pub file_count: usize,
    pub date: NaiveDate,
}

/// File name for catalog entry `index`: the first keeps its stem, the rest
/// get `-<index>` before the extension.
fn file_name(stem: &str, index: usize) -> String {
    if index == 0 {
        return stem.to_string();
    }
    match stem.rsplit_once('.') {
        Some((base, ext)) => format!("{}-{}.{}", base, index, ext),
        None => format!("{}-{}", stem, index),
    }
}

fn size_bytes<R: Rng + ?Sized>(spec: SizeSpec, rng: &mut R) -> u64 {
    let mib = match spec {
        SizeSpec::Fixed(mib) => mib,
        SizeSpec::Between(lo, hi) => rng.random_range(lo..hi),
    };
    (mib * MIB).round() as u64
}

/// Build `file_count` records dated `date`.
pub fn generate_mock_files<R: Rng + ?Sized>(
    folder: Option<&str>,
    file_count: usize,
    date: NaiveDate,
    rng: &mut R,
) -> Vec<ObjectRecord> {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::default()));

    (0..file_count)
        .map(|i| {
            let t = CATALOG.get(i).copied().unwrap_or(FALLBACK);
            let name = file_name(t.stem, i);
            let name = match folder {
                Some(folder) => format!("{}/{}", folder, name),
                None => name,
            };
            let at = midnight + Duration::seconds(rng.random_range(FIRST_SECOND..=LAST_SECOND));

            ObjectRecord {
                name,
                size_bytes: size_bytes(t.size, rng),
                content_type: Some(t.content_type.to_string()),
                created_at: Some(at),
                updated_at: Some(at),
                storage_class: DEFAULT_STORAGE_CLASS.to_string(),
                generation: rng.random_range(GENERATION_RANGE).to_string(),
                encryption_key: None,
                public_access: false,
            }
        })
        .collect()
}

/// Produce a full synthetic analysis for `request`.
pub fn mock_analysis<R: Rng + ?Sized>(request: &MockRequest, rng: &mut R) -> AnalysisResult {
    let records = generate_mock_files(
        request.folder.as_deref(),
        request.file_count,
        request.date,
        rng,
    );
    debug!(
        "Generated {} synthetic object(s) for {}",
        records.len(),
        request.bucket
    );
    AnalysisResult::new(records, Some(MOCK_TOTAL_FOR_DATE)).with_date_total_shown()
}
