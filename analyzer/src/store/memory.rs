//! In-memory object store

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bucketstat_shared::{AnalysisError, ObjectRecord};

use super::{ObjectPage, ObjectStore};

/// Serves fixed listings from memory, paginated like a real backend.
///
/// Counts page fetches so callers can check how much of a listing was read.
#[derive(Debug)]
pub struct InMemoryStore {
    page_size: usize,
    buckets: HashMap<String, Vec<ObjectRecord>>,
    page_fetches: AtomicUsize,
}

impl InMemoryStore {
    /// Create an empty store returning at most `page_size` objects per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            buckets: HashMap::new(),
            page_fetches: AtomicUsize::new(0),
        }
    }

    /// Add a bucket with its objects in listing order.
    pub fn with_bucket(mut self, bucket: impl Into<String>, objects: Vec<ObjectRecord>) -> Self {
        self.buckets.insert(bucket.into(), objects);
        self
    }

    /// Number of `list_page` calls served so far.
    pub fn page_fetches(&self) -> usize {
        self.page_fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ObjectStore for InMemoryStore {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<ObjectPage, AnalysisError> {
        self.page_fetches.fetch_add(1, Ordering::Relaxed);

        let objects = self
            .buckets
            .get(bucket)
            .ok_or_else(|| AnalysisError::Backend(format!("bucket not found: {}", bucket)))?;

        let start = match page_token {
            Some(t) => t
                .parse::<usize>()
                .map_err(|_| AnalysisError::Backend(format!("invalid page token: {}", t)))?,
            None => 0,
        };

        let matching: Vec<&ObjectRecord> = objects
            .iter()
            .filter(|o| prefix.map_or(true, |p| o.name.starts_with(p)))
            .collect();

        let end = start.saturating_add(self.page_size).min(matching.len());
        let page = matching
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|o| (*o).clone())
            .collect();

        Ok(ObjectPage {
            objects: page,
            next_page_token: (end < matching.len()).then(|| end.to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
