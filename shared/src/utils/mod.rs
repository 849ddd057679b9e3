//! Utility functions and helpers

pub mod time;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count for humans, e.g. `1.0 KB`, `141.3 MB`.
///
/// Scaling stops at PB: anything of 1024 PB or more is still reported in PB.
pub fn format_size(size_bytes: f64) -> String {
    let mut size = size_bytes;
    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} PB", size)
}

/// Strip a `scheme://` prefix such as `gs://` from a bucket argument.
pub fn normalize_bucket_name(arg: &str) -> &str {
    match arg.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() && !scheme.contains('/') => rest,
        _ => arg,
    }
}

/// Combine `--folder` and `--prefix` into the prefix sent to the backend.
pub fn effective_prefix(folder: Option<&str>, prefix: Option<&str>) -> Option<String> {
    match (folder, prefix) {
        (Some(folder), Some(prefix)) => Some(format!("{}/{}", folder, prefix)),
        (Some(folder), None) => Some(folder.to_string()),
        (None, prefix) => prefix.map(str::to_string),
    }
}

/// Bucket name as embedded in export file names (`/` becomes `-`).
pub fn sanitize_bucket_name(bucket: &str) -> String {
    bucket.replace('/', "-")
}
