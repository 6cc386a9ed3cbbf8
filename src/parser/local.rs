//! Parser for the local test-index format.
//!
//! A simplified line-oriented format used for offline and test runs:
//! each line reads `name -> dep1 dep2 dep3`. Unlike APKINDEX dependency
//! tokens, the right-hand names are taken literally: no prefix or version
//! normalization and no self-dependency filtering.

use std::fs;
use std::path::Path;

use super::types::PackageIndex;

/// Errors that can occur while loading a local index file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to open or read the file from disk.
    #[error("Failed to read index file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a local index file from a file path.
///
/// The only failure mode is the underlying read; per-line problems are
/// skipped, never reported as errors.
pub fn parse_file(path: &Path) -> ParseResult<PackageIndex> {
    let content = fs::read_to_string(path)?;
    Ok(parse_str(&content))
}

/// Parses local-format text into a [`PackageIndex`].
///
/// Blank lines and lines starting with `#` are ignored. Lines that do not
/// contain exactly one `->` separator are skipped.
///
/// # Example
///
/// ```rust
/// use apkscope::parser::local;
///
/// let text = "app -> libfoo libbar\nlibfoo -> libbar\nlibbar ->\n";
/// let index = local::parse_str(text);
///
/// assert_eq!(index.len(), 3);
/// assert_eq!(index.neighbors("app"), ["libfoo".to_string(), "libbar".to_string()]);
/// assert!(index.neighbors("libbar").is_empty());
/// ```
pub fn parse_str(content: &str) -> PackageIndex {
    let mut index = PackageIndex::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.matches("->").count() != 1 {
            continue;
        }
        let Some((name, deps)) = line.split_once("->") else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let deps = deps.split_whitespace().map(str::to_string).collect();
        index.insert(name, deps);
    }

    index
}
