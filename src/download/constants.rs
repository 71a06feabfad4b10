//! Constants for the download module (streaming).

/// Size of each write issued while streaming a response body to disk.
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;
