//! HTTP client wrapper shared by page fetches and file downloads.
//!
//! This module provides the `HttpClient` struct which applies the fixed
//! browser header set and connect/read timeouts to every request, and
//! streams file bodies to disk in fixed-size chunks.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::constants::DOWNLOAD_CHUNK_SIZE;
use super::error::DownloadError;
use crate::config::REQUEST_TIMEOUT_SECS;
use crate::headers;

/// HTTP client for index pages and PDF downloads.
///
/// Created once per run and cloned into every worker; clones share the
/// underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use archive_downloader::download::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let body = client.fetch_text("https://www.archives.gov/research/jfk/release-2025").await?;
/// println!("page is {} bytes", body.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default 30 second request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Creates a client with an explicit connect and read timeout.
    ///
    /// The timeout bounds connection setup and every wait for the next piece
    /// of the response. It is not a deadline for the whole transfer, so a
    /// large file that keeps arriving is never cut off.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// header set.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .gzip(true)
            .default_headers(headers::browser_headers())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches a page and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the request fails, times out, or the
    /// server answers with anything other than 200 OK.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.send_get(url).await?;
        response
            .text()
            .await
            .map_err(|e| DownloadError::from_reqwest(url, e))
    }

    /// Downloads `url` into `file_path`, returning the number of bytes written.
    ///
    /// The body is streamed and written in chunks of at most
    /// [`DOWNLOAD_CHUNK_SIZE`] bytes. The destination file is only created
    /// after a 200 response; if streaming fails afterwards the partial file
    /// is removed.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if the request fails, the status is not 200,
    /// or the file cannot be created or written.
    #[instrument(skip(self), fields(url = %url, path = %file_path.display()))]
    pub async fn download_to_path(&self, url: &str, file_path: &Path) -> Result<u64, DownloadError> {
        let response = self.send_get(url).await?;

        let mut file = File::create(file_path)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        let stream_result = stream_to_file(&mut file, response, url, file_path).await;
        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            drop(file);
            let _ = tokio::fs::remove_file(file_path).await;
        }

        stream_result
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::from_reqwest(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }

}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::from_reqwest(url, e))?;

        for piece in chunk.chunks(DOWNLOAD_CHUNK_SIZE) {
            writer
                .write_all(piece)
                .await
                .map_err(|e| DownloadError::io(file_path, e))?;
            bytes_written += piece.len() as u64;
        }
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}
