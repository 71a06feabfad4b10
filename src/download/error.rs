//! Error types for the download module.
//!
//! Every variant carries the URL or path it concerns so a single log line
//! is enough to identify the failing link.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a page or downloading a file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request did not complete within the fixed request timeout.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Any response status other than 200 OK.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while creating directories or writing the file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classifies a reqwest error, splitting timeouts from other transport failures.
    pub(crate) fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::timeout(url)
        } else {
            Self::network(url, source)
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path, which the source errors do not carry.
