//! Google Cloud Storage JSON API backend
//!
//! Lists objects through `GET {endpoint}/b/{bucket}/o`, one page per call.
//! Authentication is a ready-made OAuth bearer token taken from the
//! configuration; without one, requests are sent anonymously, which works for
//! public buckets.

use async_trait::async_trait;
use bucketstat_shared::utils::time::parse_rfc3339;
use bucketstat_shared::{AnalysisError, ObjectRecord};
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ObjectPage, ObjectStore};
use crate::config::AnalyzerConfig;

/// Only the fields the listing uses are requested.
const LIST_FIELDS: &str =
    "items(name,size,contentType,timeCreated,updated,storageClass,generation,kmsKeyName),nextPageToken";

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    #[serde(default)]
    pub items: Vec<ObjectItem>,
    pub next_page_token: Option<String>,
}

/// Object metadata as returned by the API. Numbers arrive as strings.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ObjectItem {
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub time_created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub storage_class: Option<String>,
    #[serde(default)]
    pub generation: Option<String>,
    #[serde(default)]
    pub kms_key_name: Option<String>,
}

impl From<ObjectItem> for ObjectRecord {
    fn from(item: ObjectItem) -> Self {
        let size_bytes = match item.size.as_deref().map(str::parse::<u64>) {
            Some(Ok(n)) => n,
            Some(Err(e)) => {
                warn!("Object {} has unparseable size: {}", item.name, e);
                0
            }
            None => 0,
        };

        let timestamp = |field: &str, raw: Option<&str>| {
            raw.and_then(|s| {
                let parsed = parse_rfc3339(s);
                if parsed.is_none() {
                    warn!("Object {} has unparseable {} time: {}", item.name, field, s);
                }
                parsed
            })
        };
        let created_at = timestamp("creation", item.time_created.as_deref());
        let updated_at = timestamp("update", item.updated.as_deref());

        ObjectRecord {
            size_bytes,
            content_type: item.content_type.filter(|t| !t.is_empty()),
            created_at,
            updated_at,
            storage_class: ObjectRecord::normalize_storage_class(item.storage_class),
            generation: item.generation.unwrap_or_default(),
            encryption_key: item.kms_key_name.filter(|k| !k.is_empty()),
            public_access: false,
            name: item.name,
        }
    }
}

/// Lists objects over HTTPS with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct GcsStore {
    client: reqwest::Client,
    endpoint: Url,
    access_token: Option<String>,
    page_size: u32,
}

impl GcsStore {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AnalysisError> {
        let endpoint = Url::parse(&config.api_endpoint).map_err(|e| {
            AnalysisError::Config(format!("invalid api_endpoint {}: {}", config.api_endpoint, e))
        })?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("bucketstat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalysisError::Backend(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token.clone(),
            page_size: config.page_size,
        })
    }

    /// URL for one page of `bucket`'s listing.
    pub fn list_url(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<Url, AnalysisError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| AnalysisError::Config(format!("api_endpoint cannot be a base: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(["b", bucket, "o"]);
        {
            let mut qp = url.query_pairs_mut();
            qp.append_pair("maxResults", &self.page_size.to_string());
            qp.append_pair("fields", LIST_FIELDS);
            if let Some(p) = prefix.filter(|p| !p.is_empty()) {
                qp.append_pair("prefix", p);
            }
            if let Some(t) = page_token {
                qp.append_pair("pageToken", t);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<ObjectPage, AnalysisError> {
        let url = self.list_url(bucket, prefix, page_token)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let res = request
            .send()
            .await
            .map_err(|e| AnalysisError::Backend(format!("failed to call GCS list API: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(AnalysisError::Backend(format!(
                "GCS list failed ({}): {}",
                status,
                body.trim()
            )));
        }

        let body: ListResponse = res
            .json()
            .await
            .map_err(|e| AnalysisError::Backend(format!("invalid GCS response: {}", e)))?;

        debug!(
            "Fetched {} objects from gs://{} (more: {})",
            body.items.len(),
            bucket,
            body.next_page_token.is_some()
        );

        Ok(ObjectPage {
            objects: body.items.into_iter().map(ObjectRecord::from).collect(),
            next_page_token: body.next_page_token,
        })
    }

    fn name(&self) -> &'static str {
        "gcs"
    }
}
