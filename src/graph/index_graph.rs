//! Whole-index dependency graph backed by petgraph.
//!
//! The traversal engine in [`traversal`](super::traversal) only looks at the
//! subgraph reachable from one start package. `IndexGraph` models the entire
//! index as a directed graph, which lets the CLI audit a repository for
//! dependency cycles without picking a start point.

use std::collections::{HashMap, HashSet};

use petgraph::algo::{is_cyclic_directed, tarjan_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::parser::PackageIndex;

/// A directed graph over every package in an index.
///
/// Nodes are package names; edges point from a package to its dependency.
/// Dependency names that have no record of their own (virtual `so:` provides
/// and similar) still get a node so edges to them are kept.
///
/// # Example
///
/// ```rust
/// use apkscope::graph::IndexGraph;
/// use apkscope::parser::local;
///
/// let index = local::parse_str("a -> b\nb -> a\nc -> a\n");
/// let graph = IndexGraph::from_index(&index);
///
/// assert_eq!(graph.node_count(), 3);
/// assert!(graph.has_cycles());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexGraph {
    graph: DiGraph<String, ()>,
    node_indices: HashMap<String, NodeIndex>,
}

impl IndexGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from a parsed index.
    pub fn from_index(index: &PackageIndex) -> Self {
        let mut graph = Self {
            graph: DiGraph::with_capacity(index.len(), index.edge_count()),
            node_indices: HashMap::with_capacity(index.len()),
        };
        for (package, deps) in index.iter() {
            let from = graph.add_package(package);
            for dep in deps {
                let to = graph.add_package(dep);
                graph.graph.add_edge(from, to, ());
            }
        }
        graph
    }

    /// Adds a package node, returning the existing index if already present.
    pub fn add_package(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    /// Returns the number of packages in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of dependency edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Checks if a package exists in the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Names of the packages `name` directly depends on (outgoing edges).
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge| self.graph.node_weight(edge.target()))
            .map(String::as_str)
            .collect()
    }

    /// Names of the packages that directly depend on `name` (incoming edges).
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(name) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .filter_map(|edge| self.graph.node_weight(edge.source()))
            .map(String::as_str)
            .collect()
    }

    /// Checks if the graph contains at least one cycle.
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Finds all dependency cycles via strongly connected components.
    ///
    /// Each cycle is a list of package names; a single-node component counts
    /// only if it has a self-loop.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();

        for scc in tarjan_scc(&self.graph) {
            if scc.len() > 1 {
                let cycle: Vec<String> = scc
                    .iter()
                    .filter_map(|&idx| self.graph.node_weight(idx))
                    .cloned()
                    .collect();
                cycles.push(cycle);
            } else if let Some(&idx) = scc.first() {
                if self.graph.contains_edge(idx, idx) {
                    if let Some(name) = self.graph.node_weight(idx) {
                        cycles.push(vec![name.clone()]);
                    }
                }
            }
        }

        cycles
    }

    /// Returns the set of package names that participate in any cycle.
    pub fn nodes_in_cycles(&self) -> HashSet<String> {
        self.detect_cycles().into_iter().flatten().collect()
    }
}
