//! Top-level orchestration: extract links, then download them.
//!
//! Extraction runs to completion before the pool starts; links are never
//! streamed into the pool as they are discovered.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::{ConfigError, DownloaderConfig};
use crate::download::{DownloadPool, DownloadStats, HttpClient, PoolError};
use crate::extract::LinkExtractor;

/// Errors that stop a run before any link is processed.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The output folder could not be created.
    #[error("cannot create output folder {path}: {source}")]
    CreateOutputDir {
        /// The output folder.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The download pool could not run.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// What a run found and did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of links extracted from the index page (duplicates included).
    pub links_found: usize,
    /// Download counts; all zero when no links were found.
    pub stats: DownloadStats,
}

/// Downloads every PDF linked from the configured index page.
#[derive(Debug, Clone)]
pub struct Downloader {
    config: DownloaderConfig,
    client: HttpClient,
}

impl Downloader {
    /// Validates `config` and builds the shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Config`] if the configuration is invalid.
    pub fn new(config: DownloaderConfig) -> Result<Self, RunError> {
        config.validate()?;
        let client = HttpClient::with_timeout(config.request_timeout);
        Ok(Self { config, client })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Runs extraction followed by the download pool.
    ///
    /// Page and file failures are absorbed into the summary; only setup
    /// problems (output folder, pool) are returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::CreateOutputDir`] if the output folder cannot be
    /// created, or [`RunError::Pool`] if the pool fails to schedule work.
    #[instrument(skip(self), fields(index_url = %self.config.index_url))]
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        let output_dir = &self.config.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|source| RunError::CreateOutputDir {
                path: output_dir.clone(),
                source,
            })?;

        let absolute = std::path::absolute(output_dir).unwrap_or_else(|_| output_dir.clone());
        info!(
            base_url = %self.config.index_url,
            output_dir = %absolute.display(),
            "starting archive PDF downloader"
        );

        let extractor = LinkExtractor::new(self.client.clone(), self.config.allowed_domain.as_str());
        let links = extractor.extract(&self.config.index_url).await;

        if links.is_empty() {
            warn!("no PDF links found; the page structure might have changed");
            return Ok(RunSummary::default());
        }

        info!(count = links.len(), "starting download of PDF files");

        let progress = self.progress_bar(links.len());
        let pool = DownloadPool::new(self.config.workers, output_dir.clone())?
            .with_progress(progress.clone());
        let stats = pool.run(&self.client, &links).await?;
        progress.finish_and_clear();

        Ok(RunSummary {
            links_found: links.len(),
            stats,
        })
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} PDFs ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = DownloaderConfig::default().with_workers(0);
        let err = Downloader::new(config).unwrap_err();
        assert!(matches!(
            err,
            RunError::Config(ConfigError::InvalidWorkerCount { value: 0 })
        ));
    }

    #[test]
    fn test_new_keeps_config() {
        let config = DownloaderConfig::default().with_workers(7);
        let downloader = Downloader::new(config).unwrap();
        assert_eq!(downloader.config().workers, 7);
    }

    #[test]
    fn test_summary_default_is_empty() {
        let summary = RunSummary::default();
        assert_eq!(summary.links_found, 0);
        assert_eq!(summary.stats.total(), 0);
    }
}
