//! Error types for the link extractor.
//!
//! These never leave [`LinkExtractor::extract`](super::LinkExtractor::extract);
//! they exist so the failure reason can be logged with full context.

use thiserror::Error;

use crate::download::DownloadError;

/// Errors that can occur while fetching a page for extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The page URL could not be parsed.
    #[error("invalid page URL: {url}")]
    InvalidPageUrl {
        /// The rejected URL string.
        url: String,
    },

    /// The page could not be fetched (transport error, timeout, non-200).
    #[error("failed to fetch page {url}: {source}")]
    Fetch {
        /// The page URL.
        url: String,
        /// The underlying fetch error.
        #[source]
        source: DownloadError,
    },
}

impl ExtractError {
    /// Creates an invalid page URL error.
    pub fn invalid_page_url(url: impl Into<String>) -> Self {
        Self::InvalidPageUrl { url: url.into() }
    }

    /// Creates a fetch error.
    pub fn fetch(url: impl Into<String>, source: DownloadError) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }
}
