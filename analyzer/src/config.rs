//! Analyzer configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `bucketstat.toml` (or the file given with `--config`), then `BUCKETSTAT_*`
//! environment variables.

use std::path::{Path, PathBuf};

use bucketstat_shared::AnalysisError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_ENDPOINT: &str = "https://storage.googleapis.com/storage/v1";

/// Largest page the listing API hands out.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Token variable honored when `BUCKETSTAT_ACCESS_TOKEN` is not set.
pub const FALLBACK_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Base URL of the storage JSON API
    pub api_endpoint: String,

    /// OAuth bearer token; anonymous requests when absent
    #[serde(default)]
    pub access_token: Option<String>,

    /// Objects requested per listing page
    pub page_size: u32,

    /// Directory CSV exports are written to
    pub export_dir: PathBuf,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            access_token: None,
            page_size: MAX_PAGE_SIZE,
            export_dir: PathBuf::from("."),
        }
    }
}

impl AnalyzerConfig {
    /// Load defaults, then the config file, then the environment.
    ///
    /// An explicit `path` must exist; the default `bucketstat.*` file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, AnalysisError> {
        let mut loaded: AnalyzerConfig = layered(path)?
            .try_deserialize()
            .map_err(config_error)?;

        if loaded.access_token.is_none() {
            loaded.access_token = fallback_token();
        }
        loaded.validate()?;
        Ok(loaded)
    }

    /// Resolve only `export_dir` from the same layers.
    ///
    /// Listing settings (endpoint, token, page size) are neither read nor validated.
    pub fn load_export_dir(path: Option<&Path>) -> Result<PathBuf, AnalysisError> {
        let dir: PathBuf = layered(path)?.get("export_dir").map_err(config_error)?;
        if dir.as_os_str().is_empty() {
            return Err(AnalysisError::Config("export_dir must not be empty".to_string()));
        }
        Ok(dir)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(AnalysisError::Config(format!(
                "page_size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, self.page_size
            )));
        }

        let endpoint = reqwest::Url::parse(&self.api_endpoint).map_err(|e| {
            AnalysisError::Config(format!("invalid api_endpoint {}: {}", self.api_endpoint, e))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(AnalysisError::Config(format!(
                "api_endpoint must be http(s): {}",
                self.api_endpoint
            )));
        }

        if self.export_dir.as_os_str().is_empty() {
            return Err(AnalysisError::Config("export_dir must not be empty".to_string()));
        }

        if matches!(&self.access_token, Some(t) if t.trim().is_empty()) {
            return Err(AnalysisError::Config("access_token is set but empty".to_string()));
        }

        Ok(())
    }
}

fn layered(path: Option<&Path>) -> Result<Config, AnalysisError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name("bucketstat").required(false),
    };

    Config::builder()
        .set_default("api_endpoint", DEFAULT_API_ENDPOINT)
        .and_then(|b| b.set_default("page_size", i64::from(MAX_PAGE_SIZE)))
        .and_then(|b| b.set_default("export_dir", "."))
        .map_err(config_error)?
        .add_source(file)
        .add_source(Environment::with_prefix("BUCKETSTAT").try_parsing(true))
        .build()
        .map_err(config_error)
}

/// A set-but-blank variable counts as unset.
fn fallback_token() -> Option<String> {
    std::env::var(FALLBACK_TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty())
}

fn config_error(e: config::ConfigError) -> AnalysisError {
    AnalysisError::Config(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Tests that read or set process environment run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[test]
    fn test_default_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_size, 1000);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AnalyzerConfig::default();
        config.page_size = 0;
        assert!(config.validate().is_err());

        config.page_size = 1001;
        assert!(config.validate().is_err());

        config.page_size = 10;
        config.api_endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.api_endpoint = DEFAULT_API_ENDPOINT.to_string();
        config.access_token = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "api_endpoint = \"http://127.0.0.1:4443/storage/v1\"\npage_size = 50\nexport_dir = \"out\""
        )
        .unwrap();

        let config = AnalyzerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api_endpoint, "http://127.0.0.1:4443/storage/v1");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.export_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_load_rejects_invalid_file_values() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 5000").unwrap();
        let err = AnalyzerConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let _env = env_lock();
        let err = AnalyzerConfig::load(Some(Path::new("/nonexistent/bucketstat.toml"))).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn test_blank_fallback_token_is_ignored() {
        let _env = env_lock();
        std::env::set_var(FALLBACK_TOKEN_ENV, "");
        let loaded = AnalyzerConfig::load(None);
        std::env::set_var(FALLBACK_TOKEN_ENV, "   ");
        let padded = AnalyzerConfig::load(None);
        std::env::remove_var(FALLBACK_TOKEN_ENV);

        assert!(loaded.unwrap().access_token.is_none());
        assert!(padded.unwrap().access_token.is_none());
    }

    #[test]
    fn test_fallback_token_is_used() {
        let _env = env_lock();
        std::env::set_var(FALLBACK_TOKEN_ENV, "ya29.token");
        let loaded = AnalyzerConfig::load(None);
        std::env::remove_var(FALLBACK_TOKEN_ENV);

        assert_eq!(loaded.unwrap().access_token.as_deref(), Some("ya29.token"));
    }

    #[test]
    fn test_export_dir_ignores_listing_settings() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "api_endpoint = \"ftp://nowhere\"\npage_size = 0\nexport_dir = \"reports\""
        )
        .unwrap();

        assert!(AnalyzerConfig::load(Some(file.path())).is_err());
        let dir = AnalyzerConfig::load_export_dir(Some(file.path())).unwrap();
        assert_eq!(dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_export_dir_defaults_to_current_dir() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "page_size = 10").unwrap();

        let dir = AnalyzerConfig::load_export_dir(Some(file.path())).unwrap();
        assert_eq!(dir, PathBuf::from("."));
    }
}
