//! Object storage backends
//!
//! The pipeline never constructs a client itself: callers build one store per
//! run and pass it in, so tests can swap in [`memory::InMemoryStore`].

pub mod gcs;
pub mod memory;

use async_trait::async_trait;
use bucketstat_shared::{AnalysisError, ObjectRecord};

/// One page of a listing.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub objects: Vec<ObjectRecord>,

    /// Token for the following page; `None` on the last page
    pub next_page_token: Option<String>,
}

/// A backend that can list the objects of a bucket, optionally by name prefix.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one page of objects whose names start with `prefix`.
    ///
    /// `page_token` is `None` for the first page and afterwards the token
    /// returned by the previous call.
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<ObjectPage, AnalysisError>;

    /// Short label for logs.
    fn name(&self) -> &'static str {
        "object-store"
    }
}
