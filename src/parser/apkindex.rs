//! Parser for the APKINDEX record format.
//!
//! An APKINDEX is a stream of records separated by one or more blank lines.
//! Each record is a sequence of `KEY:value` lines; the `P` key names the
//! package and the `D` key lists its dependency tokens. Parsing is
//! best-effort: malformed lines and unnamed records are skipped, and invalid
//! UTF-8 is replaced rather than failing the whole parse.

use super::types::PackageIndex;

/// A record being accumulated while scanning the index.
///
/// Dependency tokens are kept raw until the record commits, because
/// self-dependency elimination needs the package name and `D` may precede
/// `P` in a damaged record.
#[derive(Debug, Default)]
struct RawRecord {
    name: Option<String>,
    dep_tokens: Vec<String>,
}

impl RawRecord {
    /// Commits the record into the index if it has a name.
    fn commit(self, index: &mut PackageIndex) {
        let Some(name) = self.name else {
            return;
        };
        let deps = self
            .dep_tokens
            .iter()
            .filter_map(|token| normalize_token(token, &name))
            .collect();
        index.insert(name, deps);
    }
}

/// Parses raw APKINDEX bytes into a [`PackageIndex`].
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD instead of
/// aborting the parse.
pub fn parse_bytes(bytes: &[u8]) -> PackageIndex {
    parse_str(&String::from_utf8_lossy(bytes))
}

/// Parses APKINDEX text into a [`PackageIndex`].
///
/// A record is committed when it terminates (blank line or end of input) and
/// has a `P` name; a `P` key encountered while a named record is open commits
/// the open record first. Records without a `D` key yield an empty dependency
/// list. Lines without a `:` separator are skipped.
///
/// # Example
///
/// ```rust
/// use apkscope::parser::apkindex;
///
/// let text = "P:busybox\nV:1.36.1-r0\nD:musl so:libc.musl-x86_64.so.1\n\nP:musl\n";
/// let index = apkindex::parse_str(text);
///
/// assert_eq!(index.len(), 2);
/// assert_eq!(
///     index.neighbors("busybox"),
///     ["musl".to_string(), "libc.musl-x86_64.so.1".to_string()]
/// );
/// assert!(index.neighbors("musl").is_empty());
/// ```
pub fn parse_str(text: &str) -> PackageIndex {
    let mut index = PackageIndex::new();
    let mut record = RawRecord::default();

    for line in text.lines() {
        if line.trim().is_empty() {
            std::mem::take(&mut record).commit(&mut index);
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            // Malformed line, keep scanning
            continue;
        };

        match key {
            "P" => {
                if record.name.is_some() {
                    std::mem::take(&mut record).commit(&mut index);
                }
                record.name = Some(value.trim().to_string());
            }
            "D" => record
                .dep_tokens
                .extend(value.split_whitespace().map(str::to_string)),
            // Other keys (version, checksum, ...) are not interpreted
            _ => {}
        }
    }
    record.commit(&mut index);

    tracing::debug!(packages = index.len(), edges = index.edge_count(), "APKINDEX parsed");
    index
}

/// Normalizes a raw dependency token to a bare package name.
///
/// Tokens may carry a library-name prefix (`so:libfoo.so.1`) and/or a version
/// constraint (`musl=1.2.4-r1`). The segment after the last `:` is kept, then
/// everything from the first `=` is stripped. Tokens that normalize to the
/// empty string or to the owning package's own name are discarded.
///
/// # Example
///
/// ```rust
/// use apkscope::parser::apkindex::normalize_token;
///
/// assert_eq!(normalize_token("so:libssl.so.3", "curl"), Some("libssl.so.3".to_string()));
/// assert_eq!(normalize_token("musl=1.2.4-r1", "curl"), Some("musl".to_string()));
/// assert_eq!(normalize_token("so:curl=8.5", "curl"), None);
/// ```
pub fn normalize_token(token: &str, owner: &str) -> Option<String> {
    let tail = match token.rfind(':') {
        Some(pos) => &token[pos + 1..],
        None => token,
    };
    let name = match tail.find('=') {
        Some(pos) => &tail[..pos],
        None => tail,
    };
    if name.is_empty() || name == owner {
        None
    } else {
        Some(name.to_string())
    }
}
