//! PDF link extraction from a single index page.
//!
//! The extractor fetches the index page, collects every `<a href>` containing
//! `.pdf`, resolves it, and keeps the ones whose host contains the allowed
//! domain. When the page itself has no such links, each `<iframe src>` is
//! fetched and scanned the same way, with hrefs resolved against the iframe
//! URL.
//!
//! Extraction never fails: fetch errors are logged and contribute no links.
//!
//! # Example
//!
//! ```no_run
//! use archive_downloader::download::HttpClient;
//! use archive_downloader::extract::LinkExtractor;
//!
//! # async fn example() {
//! let extractor = LinkExtractor::new(HttpClient::new(), "archives.gov");
//! let links = extractor
//!     .extract("https://www.archives.gov/research/jfk/release-2025")
//!     .await;
//! for link in &links {
//!     println!("{}", link.url);
//! }
//! # }
//! ```

mod error;
mod links;

pub use error::ExtractError;
pub use links::{PDF_MARKER, host_is_allowed, resolve_href, scan_iframe_sources, scan_pdf_anchors};

use tracing::{info, instrument, warn};
use url::Url;

use crate::download::HttpClient;

/// An absolute URL believed to reference a PDF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLink {
    /// Resolved absolute URL.
    pub url: Url,
    /// Page (index or iframe) the link was found on.
    pub source_page: Url,
    /// Whether the host contains the allowed-domain substring.
    pub domain_allowed: bool,
}

impl PdfLink {
    /// Creates a link, computing `domain_allowed` from `allowed_domain`.
    #[must_use]
    pub fn new(url: Url, source_page: Url, allowed_domain: &str) -> Self {
        let domain_allowed = host_is_allowed(&url, allowed_domain);
        Self {
            url,
            source_page,
            domain_allowed,
        }
    }
}

/// Fetches an index page and extracts its PDF links.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    client: HttpClient,
    allowed_domain: String,
}

impl LinkExtractor {
    /// Creates an extractor that keeps links whose host contains `allowed_domain`.
    pub fn new(client: HttpClient, allowed_domain: impl Into<String>) -> Self {
        Self {
            client,
            allowed_domain: allowed_domain.into(),
        }
    }

    /// Returns the allowed-domain substring.
    #[must_use]
    pub fn allowed_domain(&self) -> &str {
        &self.allowed_domain
    }

    /// Extracts PDF links from `page_url`, falling back to its iframes.
    ///
    /// Returns links in document order, duplicates included. Any failure
    /// yields an empty (or, for iframes, partial) sequence.
    #[instrument(skip(self))]
    pub async fn extract(&self, page_url: &str) -> Vec<PdfLink> {
        let page = match Url::parse(page_url) {
            Ok(page) => page,
            Err(_) => {
                warn!(error = %ExtractError::invalid_page_url(page_url), "cannot extract links");
                return Vec::new();
            }
        };

        let Some(body) = self.fetch_page(&page).await else {
            return Vec::new();
        };

        let mut links = scan_pdf_anchors(&body, &page, &self.allowed_domain);
        info!(count = links.len(), "found PDF links");
        if !links.is_empty() {
            return links;
        }

        info!("no PDF links found directly, checking iframes");
        for iframe_url in scan_iframe_sources(&body, &page) {
            info!(iframe = %iframe_url, "checking iframe");
            let Some(iframe_body) = self.fetch_page(&iframe_url).await else {
                continue;
            };
            links.extend(scan_pdf_anchors(
                &iframe_body,
                &iframe_url,
                &self.allowed_domain,
            ));
            info!(count = links.len(), "found PDF links in iframe");
        }

        links
    }

    /// Fetches a page body, logging and swallowing any failure.
    async fn fetch_page(&self, url: &Url) -> Option<String> {
        info!(url = %url, "fetching page");
        match self.client.fetch_text(url.as_str()).await {
            Ok(body) => {
                info!(url = %url, bytes = body.len(), "page fetched");
                Some(body)
            }
            Err(e) => {
                warn!(error = %ExtractError::fetch(url.as_str(), e), "page fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_link_flags_off_domain_hosts() {
        let page = Url::parse("https://www.archives.gov/index").unwrap();
        let on = PdfLink::new(
            Url::parse("https://www.archives.gov/a.pdf").unwrap(),
            page.clone(),
            "archives.gov",
        );
        let off = PdfLink::new(
            Url::parse("https://mirror.example.org/a.pdf").unwrap(),
            page,
            "archives.gov",
        );
        assert!(on.domain_allowed);
        assert!(!off.domain_allowed);
    }

    #[tokio::test]
    async fn test_invalid_page_url_yields_no_links() {
        let extractor = LinkExtractor::new(HttpClient::new(), "archives.gov");
        assert!(extractor.extract("not a url").await.is_empty());
        assert_eq!(extractor.allowed_domain(), "archives.gov");
    }
}
