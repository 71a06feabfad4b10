//! Run configuration for the archive downloader.
//!
//! There is no config file: the CLI sets the output folder and worker count,
//! everything else is fixed here and only overridable through the builder
//! methods on [`DownloaderConfig`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Index page listing the 2025 JFK release documents.
pub const DEFAULT_INDEX_URL: &str = "https://www.archives.gov/research/jfk/release-2025";

/// Substring a link's host must contain to be downloaded.
pub const DEFAULT_ALLOWED_DOMAIN: &str = "archives.gov";

/// Output folder, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "jfk_2025_release";

/// Default number of parallel download workers.
pub const DEFAULT_WORKERS: usize = 5;

/// Minimum allowed worker count.
pub const MIN_WORKERS: usize = 1;

/// Maximum allowed worker count.
pub const MAX_WORKERS: usize = 100;

/// Per-request timeout for page fetches and file downloads (30 seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised when a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Worker count outside the supported range.
    #[error("invalid worker count {value}: must be between {MIN_WORKERS} and {MAX_WORKERS}")]
    InvalidWorkerCount {
        /// The rejected value.
        value: usize,
    },

    /// Index URL is not an absolute http(s) URL.
    #[error("invalid index URL: {url}")]
    InvalidIndexUrl {
        /// The rejected URL string.
        url: String,
    },

    /// Allowed domain is empty, which would admit every host.
    #[error("allowed domain must not be empty")]
    EmptyAllowedDomain,
}

/// Settings for one downloader run.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Page the PDF links are extracted from.
    pub index_url: String,
    /// Host substring required for a link to be kept.
    pub allowed_domain: String,
    /// Root of the output tree.
    pub output_dir: PathBuf,
    /// Upper bound on simultaneous downloads.
    pub workers: usize,
    /// Timeout applied to every HTTP request.
    pub request_timeout: Duration,
    /// Draw a progress bar on stderr while downloading.
    pub show_progress: bool,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            allowed_domain: DEFAULT_ALLOWED_DOMAIN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: DEFAULT_WORKERS,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            show_progress: false,
        }
    }
}

impl DownloaderConfig {
    /// Overrides the index page URL.
    #[must_use]
    pub fn with_index_url(mut self, index_url: impl Into<String>) -> Self {
        self.index_url = index_url.into();
        self
    }

    /// Overrides the allowed-domain substring.
    #[must_use]
    pub fn with_allowed_domain(mut self, allowed_domain: impl Into<String>) -> Self {
        self.allowed_domain = allowed_domain.into();
        self
    }

    /// Overrides the output folder.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Overrides the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Enables or disables the progress bar.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the worker count is out of range, the
    /// index URL is not absolute http(s), or the allowed domain is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&self.workers) {
            return Err(ConfigError::InvalidWorkerCount {
                value: self.workers,
            });
        }

        let index_ok = Url::parse(&self.index_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
        if !index_ok {
            return Err(ConfigError::InvalidIndexUrl {
                url: self.index_url.clone(),
            });
        }

        if self.allowed_domain.trim().is_empty() {
            return Err(ConfigError::EmptyAllowedDomain);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = DownloaderConfig::default();
        assert_eq!(config.index_url, DEFAULT_INDEX_URL);
        assert_eq!(config.allowed_domain, "archives.gov");
        assert_eq!(config.output_dir, PathBuf::from("jfk_2025_release"));
        assert_eq!(config.workers, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.show_progress);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(DownloaderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_overrides_fields() {
        let config = DownloaderConfig::default()
            .with_index_url("http://127.0.0.1:8080/index.html")
            .with_allowed_domain("127.0.0.1")
            .with_output_dir("/tmp/out")
            .with_workers(12)
            .with_request_timeout(Duration::from_secs(2))
            .with_progress(true);

        assert_eq!(config.index_url, "http://127.0.0.1:8080/index.html");
        assert_eq!(config.allowed_domain, "127.0.0.1");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.workers, 12);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert!(config.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = DownloaderConfig::default()
            .with_workers(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { value: 0 }));
    }

    #[test]
    fn test_too_many_workers_rejected() {
        let err = DownloaderConfig::default()
            .with_workers(101)
            .validate()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("101"), "Expected value in: {msg}");
        assert!(msg.contains("between 1 and 100"), "Expected range in: {msg}");
    }

    #[test]
    fn test_relative_index_url_rejected() {
        let err = DownloaderConfig::default()
            .with_index_url("research/jfk/release-2025")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIndexUrl { .. }));
    }

    #[test]
    fn test_non_http_index_url_rejected() {
        let err = DownloaderConfig::default()
            .with_index_url("ftp://archives.gov/index")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidIndexUrl { .. }));
    }

    #[test]
    fn test_blank_allowed_domain_rejected() {
        let err = DownloaderConfig::default()
            .with_allowed_domain("  ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyAllowedDomain));
    }
}
