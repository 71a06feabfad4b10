//! Deterministic mapping from a PDF link to its local path.
//!
//! Layout: `<output>/<NNNN>/<basename>` when the URL path has a segment of
//! exactly four digits (the release date, e.g. `0318`), else
//! `<output>/<basename>`. The mapping depends on nothing but the URL and the
//! output folder, so the same link always lands on the same file.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Matches a path segment made of exactly four ASCII digits.
#[allow(clippy::expect_used)]
static DATE_SEGMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}$").expect("date segment regex is valid") // Static pattern, safe to panic
});

/// Basename used when the URL path ends in `/`.
pub const FALLBACK_BASENAME: &str = "download.pdf";

/// Returns the first path segment consisting of exactly four digits.
#[must_use]
pub fn date_segment(url: &Url) -> Option<&str> {
    url.path_segments()?
        .find(|segment| DATE_SEGMENT_PATTERN.is_match(segment))
}

/// Returns the filesystem-safe last segment of the URL path.
///
/// The segment is kept as it appears in the URL (`memo%20final.pdf` stays
/// encoded). Query strings and fragments never contribute to the name.
#[must_use]
pub fn url_basename(url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty());

    let Some(last) = last else {
        return FALLBACK_BASENAME.to_string();
    };

    sanitize_filename(last)
}

/// Computes the destination path for `url` under `output_dir`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use archive_downloader::download::destination_path;
/// use url::Url;
///
/// let url = Url::parse("https://www.archives.gov/research/jfk/docs/0318/104-10009-10022.pdf").unwrap();
/// let path = destination_path(Path::new("out"), &url);
/// assert_eq!(path, Path::new("out/0318/104-10009-10022.pdf"));
/// ```
#[must_use]
pub fn destination_path(output_dir: &Path, url: &Url) -> PathBuf {
    let basename = url_basename(url);
    match date_segment(url) {
        Some(date) => output_dir.join(date).join(basename),
        None => output_dir.join(basename),
    }
}

/// Replaces characters that are invalid on common filesystems.
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }
    if sanitized.chars().all(|c| c == '.') {
        return sanitized.replace('.', "_");
    }
    sanitized
}
