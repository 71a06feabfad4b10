//! CLI entry point for the archive downloader.

use std::io::{self, IsTerminal};

use anyhow::Result;
use archive_downloader::{Downloader, DownloaderConfig};
use clap::Parser;
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // RUST_LOG overrides the default info level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = DownloaderConfig::default()
        .with_output_dir(args.folder)
        .with_workers(usize::from(args.workers))
        .with_progress(io::stderr().is_terminal());

    let downloader = Downloader::new(config)?;
    let summary = downloader.run().await?;

    if summary.links_found == 0 {
        println!("No PDF links found. The page structure might have changed.");
        return Ok(());
    }

    info!(
        links = summary.links_found,
        downloaded = summary.stats.downloaded,
        failed = summary.stats.failed,
        already_existed = summary.stats.already_existed,
        "run finished"
    );

    println!("\nDownload complete!");
    println!("Total PDF files downloaded: {}", summary.stats.downloaded);
    println!("Total failed downloads: {}", summary.stats.failed);

    Ok(())
}
