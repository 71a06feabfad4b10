//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use archive_downloader::{DEFAULT_OUTPUT_DIR, DEFAULT_WORKERS};

/// Download every PDF linked from the JFK Archives 2025 release index.
///
/// Files are saved as <folder>/<NNNN>/<name>.pdf when the document URL has a
/// four-digit date segment, and as <folder>/<name>.pdf otherwise. Files that
/// already exist are skipped.
#[derive(Parser, Debug)]
#[command(name = "archive-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// Folder to save downloaded files
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub folder: PathBuf,

    /// Number of parallel downloads (1-100; counts above 100 are rejected)
    #[arg(long, default_value_t = DEFAULT_WORKERS as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub workers: u8,
}
