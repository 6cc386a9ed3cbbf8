//! Export functionality for traversal results.
//!
//! Provides a machine-readable alternative to the ASCII tree: the traversal
//! graph and its deduplicated cycles serialized as JSON.

pub mod json;

pub use json::JsonExporter;

use std::collections::BTreeSet;
use std::io::{self, Write};

use serde::Serialize;

use crate::graph::{TraversalGraph, TraversalResult};

/// Data container for export operations.
///
/// Cycles are deduplicated and sorted here, matching what the text
/// presentation prints.
#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    /// The analyzed package.
    pub package: String,
    /// Traversal direction, "forward" or "reverse".
    pub direction: String,
    /// Depth bound the traversal ran with.
    pub max_depth: usize,
    /// The discovered subgraph.
    pub graph: TraversalGraph,
    /// Deduplicated cycle chains, each formatted as `a -> b -> a`.
    pub cycles: Vec<String>,
}

impl ExportData {
    /// Builds export data from a traversal result.
    pub fn new(package: &str, direction: &str, max_depth: usize, result: &TraversalResult) -> Self {
        let cycles: BTreeSet<String> = result.cycles.iter().map(|c| c.path()).collect();
        Self {
            package: package.to_string(),
            direction: direction.to_string(),
            max_depth,
            graph: result.graph.clone(),
            cycles: cycles.into_iter().collect(),
        }
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data to a string using the JSON exporter.
pub fn export_to_string(data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    JsonExporter.export(data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{traverse, TraversalConfig};
    use crate::parser::local;

    #[test]
    fn test_export_data_deduplicates_cycles() {
        let index = local::parse_str("a -> b c\nb -> a\nc -> a\n");
        let result = traverse(&index, "a", &TraversalConfig::new(5));
        let data = ExportData::new("a", "forward", 5, &result);

        assert_eq!(
            data.cycles,
            ["a -> b -> a".to_string(), "a -> c -> a".to_string()]
        );
    }

    #[test]
    fn test_export_data_carries_config() {
        let index = local::parse_str("a -> b\n");
        let result = traverse(&index, "a", &TraversalConfig::new(3));
        let data = ExportData::new("a", "reverse", 3, &result);

        assert_eq!(data.package, "a");
        assert_eq!(data.direction, "reverse");
        assert_eq!(data.max_depth, 3);
    }
}
