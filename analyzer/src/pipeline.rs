//! Live analysis pipeline
//!
//! Two passes over the same prefix-filtered listing: the first counts every
//! object matching the date filter, the second collects matching objects up
//! to a limit. Nothing from the first pass is reused by the second.

use std::ops::ControlFlow;

use bucketstat_shared::{AnalysisError, AnalysisResult, ObjectRecord};
use tracing::{debug, info};

use crate::filter::DateFilter;
use crate::store::ObjectStore;

/// What to analyze
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// Bucket name without any `gs://` scheme
    pub bucket: String,

    /// Server-side name prefix (folder and prefix already combined)
    pub prefix: Option<String>,

    /// Maximum objects to return; `None` or `Some(0)` means all matching objects
    pub limit: Option<usize>,

    pub date: DateFilter,
}

impl AnalysisRequest {
    /// The limit the caller asked for, with `0` treated as no limit.
    pub fn explicit_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }
}

/// Progress notifications emitted while [`analyze`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Full-count pass started
    Counting,
    /// Full-count pass finished
    Counted(u64),
    /// Listing pass started with this limit
    Listing { limit: usize, explicit: bool },
}

/// Walk every page of the listing, handing each object to `visit` until it breaks.
async fn walk(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: Option<&str>,
    mut visit: impl FnMut(ObjectRecord) -> ControlFlow<()>,
) -> Result<(), AnalysisError> {
    let mut page_token: Option<String> = None;
    let mut pages = 0u64;

    loop {
        let page = store
            .list_page(bucket, prefix, page_token.as_deref())
            .await?;
        pages += 1;

        for object in page.objects {
            if visit(object).is_break() {
                debug!("Stopped listing {} after {} page(s)", bucket, pages);
                return Ok(());
            }
        }

        page_token = page.next_page_token;
        if page_token.is_none() {
            debug!("Listed {} in {} page(s) via {}", bucket, pages, store.name());
            return Ok(());
        }
    }
}

/// Count every object under `prefix` that passes `filter`, ignoring any limit.
pub async fn count_matching(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: Option<&str>,
    filter: &DateFilter,
) -> Result<u64, AnalysisError> {
    let mut count = 0u64;
    walk(store, bucket, prefix, |object| {
        if filter.matches(&object) {
            count += 1;
        }
        ControlFlow::Continue(())
    })
    .await?;
    Ok(count)
}

/// Collect objects under `prefix` that pass `filter`, in listing order.
///
/// Stops as soon as `limit` objects have been collected; no further pages
/// are fetched after that. `None` collects everything.
pub async fn list_matching(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: Option<&str>,
    filter: &DateFilter,
    limit: Option<usize>,
) -> Result<Vec<ObjectRecord>, AnalysisError> {
    let mut out = Vec::new();
    if limit == Some(0) {
        return Ok(out);
    }

    walk(store, bucket, prefix, |object| {
        if filter.matches(&object) {
            out.push(object);
            if limit.is_some_and(|n| out.len() >= n) {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    })
    .await?;
    Ok(out)
}

/// Run both passes and build the result.
///
/// Without an explicit limit the full count becomes the limit, so the second
/// pass lists everything the first one counted.
pub async fn analyze(
    store: &dyn ObjectStore,
    request: &AnalysisRequest,
    mut on_progress: impl FnMut(Progress),
) -> Result<AnalysisResult, AnalysisError> {
    let prefix = request.prefix.as_deref();

    on_progress(Progress::Counting);
    let total = count_matching(store, &request.bucket, prefix, &request.date).await?;
    info!(
        "{} object(s) in {} match date {}",
        total,
        request.bucket,
        request.date.target().unwrap_or("(any)")
    );
    on_progress(Progress::Counted(total));

    let (limit, explicit) = match request.explicit_limit() {
        Some(n) => (n, true),
        None => (usize::try_from(total).unwrap_or(usize::MAX), false),
    };
    on_progress(Progress::Listing { limit, explicit });

    let records = list_matching(store, &request.bucket, prefix, &request.date, Some(limit)).await?;
    info!("Collected {} object(s) from {}", records.len(), request.bucket);

    Ok(AnalysisResult::new(records, Some(total)))
}
