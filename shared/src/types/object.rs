//! Object listing data structures
//!
//! One [`ObjectRecord`] per storage object, copied from the backend listing
//! with the display defaults applied in a single place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::time::display_timestamp;

/// Storage class shown when the backend reports none.
pub const DEFAULT_STORAGE_CLASS: &str = "Standard";

/// Encryption label shown when no customer-managed key is attached.
pub const DEFAULT_ENCRYPTION: &str = "Google-managed";

/// Placeholder for absent content types and timestamps.
pub const UNKNOWN: &str = "Unknown";

/// A single object in a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Full object name (slash-separated path)
    pub name: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// MIME type, if the backend knows it
    pub content_type: Option<String>,

    /// Creation time
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification time; the date filter looks at this one
    pub updated_at: Option<DateTime<Utc>>,

    /// Storage tier, never empty
    pub storage_class: String,

    /// Backend-assigned revision identifier
    pub generation: String,

    /// Customer-managed encryption key, if any
    pub encryption_key: Option<String>,

    /// Always false: access control is never queried
    pub public_access: bool,
}

impl ObjectRecord {
    /// Create a record with only a name and size; everything else takes its default.
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            content_type: None,
            created_at: None,
            updated_at: None,
            storage_class: DEFAULT_STORAGE_CLASS.to_string(),
            generation: String::new(),
            encryption_key: None,
            public_access: false,
        }
    }

    /// Apply the storage class default to a backend value.
    pub fn normalize_storage_class(raw: Option<String>) -> String {
        match raw {
            Some(class) if !class.trim().is_empty() => class,
            _ => DEFAULT_STORAGE_CLASS.to_string(),
        }
    }

    pub fn content_type_display(&self) -> &str {
        self.content_type.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn encryption_display(&self) -> &str {
        self.encryption_key.as_deref().unwrap_or(DEFAULT_ENCRYPTION)
    }

    pub fn public_access_display(&self) -> &'static str {
        if self.public_access {
            "Public"
        } else {
            "Not public"
        }
    }

    pub fn created_display(&self) -> String {
        display_timestamp(self.created_at.as_ref())
    }

    pub fn updated_display(&self) -> String {
        display_timestamp(self.updated_at.as_ref())
    }
}
