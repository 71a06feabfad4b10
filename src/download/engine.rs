//! Bounded worker pool that fetches and stores every extracted link.
//!
//! This module provides the `DownloadPool`, which fans links out to
//! concurrent Tokio tasks gated by a semaphore, and the `RunContext` those
//! tasks share for outcome counting and duplicate suppression.
//!
//! # Concurrency Model
//!
//! - Each link runs in its own Tokio task
//! - A semaphore permit is acquired before spawning, so at most `workers`
//!   downloads are in flight
//! - Permits are released automatically when a task finishes (RAII)
//! - The pool waits for every task before returning counts
//!
//! # Duplicate URLs
//!
//! The handled-URL record is checked before fetching and written only after
//! a successful download. Two workers that pick up the same URL at the same
//! time can both pass the check and both fetch it; the second write simply
//! replaces the first with identical content. This window is accepted.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashSet;
use indicatif::ProgressBar;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::HttpClient;
use super::destination::destination_path;
use super::error::DownloadError;
use crate::config::{MAX_WORKERS, MIN_WORKERS};
use crate::extract::PdfLink;

/// Error type for download pool operations.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// Invalid worker count provided.
    #[error("invalid worker count {value}: must be between {MIN_WORKERS} and {MAX_WORKERS}")]
    InvalidWorkerCount {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Terminal result of processing one link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A file was already present at the destination path; no request made.
    AlreadyExisted,
    /// The URL was already downloaded earlier in this run; no request made.
    AlreadyHandled,
    /// The file was fetched and written.
    Downloaded,
    /// The fetch or the write failed.
    Failed,
}

/// Final counts from a pool run.
///
/// `downloaded + failed + already_existed` equals the number of links given
/// to the pool. Links skipped because they were handled earlier in the run
/// are counted as `already_existed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    /// Files fetched and written during this run.
    pub downloaded: usize,
    /// Links whose fetch or write failed.
    pub failed: usize,
    /// Links skipped because the file existed or the URL was already handled.
    pub already_existed: usize,
}

impl DownloadStats {
    /// Returns the number of links that reached a terminal outcome.
    #[must_use]
    pub fn total(&self) -> usize {
        self.downloaded + self.failed + self.already_existed
    }
}

/// State shared by every worker of one run.
///
/// Counter updates are atomic so totals are exact under concurrency.
#[derive(Debug, Default)]
pub struct RunContext {
    downloaded: AtomicUsize,
    failed: AtomicUsize,
    already_existed: AtomicUsize,
    handled: DashSet<String>,
}

impl RunContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one outcome to the counters.
    pub fn record(&self, outcome: DownloadOutcome) {
        let counter = match outcome {
            DownloadOutcome::Downloaded => &self.downloaded,
            DownloadOutcome::Failed => &self.failed,
            DownloadOutcome::AlreadyExisted | DownloadOutcome::AlreadyHandled => {
                &self.already_existed
            }
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns true if `url` was downloaded earlier in this run.
    #[must_use]
    pub fn is_handled(&self, url: &str) -> bool {
        self.handled.contains(url)
    }

    /// Records `url` as downloaded in this run.
    pub fn mark_handled(&self, url: &str) {
        self.handled.insert(url.to_string());
    }

    /// Returns a snapshot of the counters.
    #[must_use]
    pub fn stats(&self) -> DownloadStats {
        DownloadStats {
            downloaded: self.downloaded.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            already_existed: self.already_existed.load(Ordering::SeqCst),
        }
    }
}

/// Bounded pool that downloads a link sequence into an output tree.
pub struct DownloadPool {
    semaphore: Arc<Semaphore>,
    workers: usize,
    output_dir: PathBuf,
    progress: ProgressBar,
}

impl std::fmt::Debug for DownloadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadPool")
            .field("workers", &self.workers)
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl DownloadPool {
    /// Creates a pool with `workers` concurrent download slots.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidWorkerCount`] if `workers` is outside
    /// 1-100.
    #[instrument(level = "debug", skip(output_dir))]
    pub fn new(workers: usize, output_dir: impl Into<PathBuf>) -> Result<Self, PoolError> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&workers) {
            return Err(PoolError::InvalidWorkerCount { value: workers });
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(workers)),
            workers,
            output_dir: output_dir.into(),
            progress: ProgressBar::hidden(),
        })
    }

    /// Ticks `progress` once per finished link.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Returns the configured worker count.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the root of the output tree.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Downloads every link and returns the aggregate counts.
    ///
    /// Individual failures never abort the run; they are logged and counted.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::SemaphoreClosed`] if the semaphore is closed.
    #[instrument(skip(self, client, links), fields(links = links.len(), workers = self.workers))]
    pub async fn run(
        &self,
        client: &HttpClient,
        links: &[PdfLink],
    ) -> Result<DownloadStats, PoolError> {
        let context = Arc::new(RunContext::new());
        let mut handles = Vec::with_capacity(links.len());

        info!(output_dir = %self.output_dir.display(), "starting downloads");

        for link in links {
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| PoolError::SemaphoreClosed)?;

            let client = client.clone();
            let context = Arc::clone(&context);
            let output_dir = self.output_dir.clone();
            let progress = self.progress.clone();
            let url = link.url.clone();

            handles.push(tokio::spawn(async move {
                let _permit = permit;
                let outcome = fetch_and_store(&client, &context, &output_dir, &url).await;
                context.record(outcome);
                progress.inc(1);
            }));
        }

        debug!(task_count = handles.len(), "waiting for downloads to complete");

        for handle in handles {
            if let Err(e) = handle.await {
                // A panicked task never recorded its outcome.
                warn!(error = %e, "download task panicked");
                context.record(DownloadOutcome::Failed);
            }
        }

        let stats = context.stats();
        info!(
            downloaded = stats.downloaded,
            failed = stats.failed,
            already_existed = stats.already_existed,
            "downloads complete"
        );
        Ok(stats)
    }
}

/// Processes one link: skip if present or handled, otherwise fetch and write.
///
/// The returned outcome is not recorded; callers pass it to
/// [`RunContext::record`].
pub async fn fetch_and_store(
    client: &HttpClient,
    context: &RunContext,
    output_dir: &Path,
    url: &Url,
) -> DownloadOutcome {
    let file_path = destination_path(output_dir, url);
    let filename = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(parent) = file_path.parent()
        && let Err(e) = tokio::fs::create_dir_all(parent).await
    {
        let error = DownloadError::io(parent, e);
        warn!(url = %url, error = %error, "failed to create destination folder");
        return DownloadOutcome::Failed;
    }

    if tokio::fs::try_exists(&file_path).await.unwrap_or(false) {
        info!(file = %filename, "skipping (already exists)");
        return DownloadOutcome::AlreadyExisted;
    }

    if context.is_handled(url.as_str()) {
        debug!(url = %url, "skipping (already handled this run)");
        return DownloadOutcome::AlreadyHandled;
    }

    match client.download_to_path(url.as_str(), &file_path).await {
        Ok(bytes) => {
            info!(file = %filename, bytes, "downloaded");
            context.mark_handled(url.as_str());
            DownloadOutcome::Downloaded
        }
        Err(e) => {
            warn!(file = %filename, error = %e, "download failed");
            DownloadOutcome::Failed
        }
    }
}
