//! Shared types for index deserialization.
//!
//! This module defines the core data structure used to represent a parsed
//! repository index, shared between the APKINDEX and local test-file parsers.

use indexmap::IndexMap;
use serde::Serialize;

/// A parsed repository index: package name mapped to its direct dependencies.
///
/// Backed by an [`IndexMap`] so iteration order is the order in which packages
/// were first seen in the source, which keeps downstream output (reverse
/// index, traversal, rendering) deterministic for a given input. Duplicate
/// dependency entries are kept as-is if the source data contains them.
///
/// The index is built once per run and not mutated afterwards.
///
/// # Example
///
/// ```rust
/// use apkscope::parser::PackageIndex;
///
/// let mut index = PackageIndex::new();
/// index.insert("busybox", vec!["musl".to_string()]);
///
/// assert!(index.contains("busybox"));
/// assert_eq!(index.neighbors("busybox"), ["musl".to_string()]);
/// assert!(index.neighbors("musl").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageIndex {
    packages: IndexMap<String, Vec<String>>,
}

impl PackageIndex {
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new index with pre-allocated capacity.
    pub fn with_capacity(packages: usize) -> Self {
        Self {
            packages: IndexMap::with_capacity(packages),
        }
    }

    /// Inserts a package with its dependency list.
    ///
    /// Re-inserting an existing name replaces its dependency list but keeps
    /// the original position in iteration order.
    pub fn insert(&mut self, name: impl Into<String>, deps: Vec<String>) {
        self.packages.insert(name.into(), deps);
    }

    /// Looks up the dependency list of a package.
    ///
    /// Returns `None` for a package not present in the index. Callers that
    /// treat a missing package as "no dependencies" should use
    /// [`neighbors`](Self::neighbors) instead.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.packages.get(name).map(Vec::as_slice)
    }

    /// Returns the direct neighbors of a package, or an empty slice if the
    /// package is absent from the index.
    pub fn neighbors(&self, name: &str) -> &[String] {
        self.packages.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Checks if a package is present as a key in the index.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Returns the number of packages in the index.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Checks if the index has no packages.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Returns the total number of (package, dependency) edges.
    pub fn edge_count(&self) -> usize {
        self.packages.values().map(Vec::len).sum()
    }

    /// Iterates over (package, dependencies) pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.packages.iter()
    }

    /// Iterates over package names in first-seen order.
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }
}

impl From<IndexMap<String, Vec<String>>> for PackageIndex {
    fn from(packages: IndexMap<String, Vec<String>>) -> Self {
        Self { packages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index() {
        let index = PackageIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.edge_count(), 0);
        assert!(!index.contains("anything"));
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut index = PackageIndex::new();
        index.insert("a", vec!["b".to_string(), "c".to_string()]);

        assert!(index.contains("a"));
        assert_eq!(index.get("a"), Some(&["b".to_string(), "c".to_string()][..]));
        assert_eq!(index.get("b"), None);
    }

    #[test]
    fn test_neighbors_missing_is_empty() {
        let mut index = PackageIndex::new();
        index.insert("a", vec!["b".to_string()]);

        assert_eq!(index.neighbors("a"), ["b".to_string()]);
        assert!(index.neighbors("missing").is_empty());
    }

    #[test]
    fn test_iteration_order_is_first_seen() {
        let mut index = PackageIndex::new();
        index.insert("zlib", vec![]);
        index.insert("abc", vec![]);
        index.insert("musl", vec![]);

        let names: Vec<&str> = index.package_names().collect();
        assert_eq!(names, ["zlib", "abc", "musl"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut index = PackageIndex::new();
        index.insert("a", vec![]);
        index.insert("b", vec![]);
        index.insert("a", vec!["x".to_string()]);

        let names: Vec<&str> = index.package_names().collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(index.neighbors("a"), ["x".to_string()]);
    }

    #[test]
    fn test_edge_count_counts_duplicates() {
        let mut index = PackageIndex::new();
        index.insert("a", vec!["b".to_string(), "b".to_string()]);
        index.insert("b", vec!["c".to_string()]);

        assert_eq!(index.edge_count(), 3);
    }
}
