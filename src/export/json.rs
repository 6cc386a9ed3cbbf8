//! JSON exporter for traversal results.

use std::io::{self, Write};

use super::{ExportData, Exporter};

/// Exports traversal results as pretty-printed JSON.
///
/// # Example
///
/// ```rust
/// use apkscope::export::{ExportData, Exporter, JsonExporter};
/// use apkscope::graph::{traverse, TraversalConfig};
/// use apkscope::parser::local;
///
/// let index = local::parse_str("a -> b\n");
/// let result = traverse(&index, "a", &TraversalConfig::new(5));
/// let data = ExportData::new("a", "forward", 5, &result);
///
/// let mut buffer = Vec::new();
/// JsonExporter.export(&data, &mut buffer).unwrap();
/// assert!(String::from_utf8(buffer).unwrap().contains("\"package\": \"a\""));
/// ```
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, data)?;
        writer.write_all(b"\n")
    }
}
