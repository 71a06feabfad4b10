//! Concurrent fetch-and-store of extracted PDF links.
//!
//! This module provides the HTTP client shared by the whole run, the
//! deterministic mapping from a link to its local path, and the bounded
//! worker pool that downloads every link exactly once per run.
//!
//! # Features
//!
//! - Streaming downloads written in fixed 8 KiB chunks
//! - `<output>/<NNNN>/<basename>` layout keyed on a four-digit path segment
//! - Skip logic for files already on disk or URLs already handled this run
//! - Exact outcome counters shared across workers
//!
//! # Example
//!
//! ```no_run
//! use archive_downloader::download::{DownloadPool, HttpClient};
//! use archive_downloader::extract::LinkExtractor;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let extractor = LinkExtractor::new(client.clone(), "archives.gov");
//! let links = extractor
//!     .extract("https://www.archives.gov/research/jfk/release-2025")
//!     .await;
//! let pool = DownloadPool::new(5, "jfk_2025_release")?;
//! let stats = pool.run(&client, &links).await?;
//! println!("downloaded {}, failed {}", stats.downloaded, stats.failed);
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod destination;
mod engine;
mod error;

pub use client::HttpClient;
pub use constants::DOWNLOAD_CHUNK_SIZE;
pub use destination::{FALLBACK_BASENAME, date_segment, destination_path, url_basename};
pub use engine::{
    DownloadOutcome, DownloadPool, DownloadStats, PoolError, RunContext, fetch_and_store,
};
pub use error::DownloadError;
