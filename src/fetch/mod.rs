//! Remote index loading.
//!
//! Fetches `APKINDEX.tar.gz` from a repository URL with a single blocking
//! request, gunzips it, and pulls the `APKINDEX` member out of the tar. One
//! load per run; no retries, no caching. The returned bytes go straight to
//! [`parser::apkindex::parse_bytes`](crate::parser::apkindex::parse_bytes).

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

/// File name of the compressed index archive inside a repository.
pub const INDEX_ARCHIVE: &str = "APKINDEX.tar.gz";

/// Name of the index member inside the archive.
pub const INDEX_MEMBER: &str = "APKINDEX";

/// Errors that can occur while loading a remote index.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request failed or returned a non-success status.
    #[error("Failed to fetch index: {0}")]
    Http(#[from] reqwest::Error),

    /// Decompression or tar parsing failed.
    #[error("Failed to unpack index archive: {0}")]
    Io(#[from] std::io::Error),

    /// The archive contains no `APKINDEX` member.
    #[error("Index archive has no APKINDEX member")]
    MissingIndex,
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Downloads and extracts the index of a repository.
///
/// Performs one blocking GET of `<repo>/APKINDEX.tar.gz` and returns the raw
/// bytes of the `APKINDEX` member.
pub fn fetch_remote_index(repo: &str) -> FetchResult<Vec<u8>> {
    let url = format!("{}/{}", repo.trim_end_matches('/'), INDEX_ARCHIVE);
    tracing::info!(%url, "fetching index archive");

    let response = reqwest::blocking::get(&url)?.error_for_status()?;
    let archive = response.bytes()?;
    extract_index(&archive)
}

/// Extracts the `APKINDEX` member from gzipped tar bytes.
pub fn extract_index(archive: &[u8]) -> FetchResult<Vec<u8>> {
    let decoder = GzDecoder::new(archive);
    let mut tar = tar::Archive::new(decoder);

    for entry in tar.entries()? {
        let mut entry = entry?;
        if entry.path()?.as_ref() == Path::new(INDEX_MEMBER) {
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            tracing::debug!(size = bytes.len(), "index member extracted");
            return Ok(bytes);
        }
    }

    Err(FetchError::MissingIndex)
}
