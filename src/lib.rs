//! Archive Downloader Library
//!
//! This library fetches a single archive index page, extracts every PDF link
//! it references, and downloads those documents concurrently into a
//! deterministic folder layout.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Run configuration and defaults
//! - [`extract`] - Index page fetching and PDF link extraction
//! - [`download`] - HTTP client, destination paths and the bounded download pool
//! - [`runner`] - Top-level orchestration of extraction followed by download
//!
//! Every failure is contained at the narrowest scope: a failed page fetch
//! yields no links, a failed file download increments the failure counter.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod extract;
mod headers;
pub mod runner;

// Re-export commonly used types
pub use config::{
    ConfigError, DEFAULT_ALLOWED_DOMAIN, DEFAULT_INDEX_URL, DEFAULT_OUTPUT_DIR, DEFAULT_WORKERS,
    DownloaderConfig,
};
pub use download::{
    DownloadError, DownloadOutcome, DownloadPool, DownloadStats, HttpClient, PoolError,
    RunContext, destination_path,
};
pub use extract::{ExtractError, LinkExtractor, PdfLink};
pub use runner::{Downloader, RunError, RunSummary};
