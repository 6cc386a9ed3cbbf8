//! Bounded, cycle-safe depth-first traversal over a package index.
//!
//! The same engine serves forward traversal (over the dependency index) and
//! reverse traversal (over the dependents index built by
//! [`build_reverse_index`](super::build_reverse_index)); the only difference
//! is which mapping is passed in.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

use crate::parser::PackageIndex;

/// The subgraph discovered by one traversal run: node name mapped to its
/// filtered direct neighbors. Each key is written at most once, by the first
/// visit that reaches it.
pub type TraversalGraph = IndexMap<String, Vec<String>>;

/// Configuration for one traversal run.
///
/// # Example
///
/// ```rust
/// use apkscope::graph::TraversalConfig;
///
/// let config = TraversalConfig::new(3).with_filter("doc");
/// assert_eq!(config.max_depth, 3);
/// assert_eq!(config.filter, "doc");
/// ```
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    /// Maximum distance from the start node that still gets expanded.
    pub max_depth: usize,
    /// Exclusion substring; names containing it are dropped. Empty disables
    /// filtering. Callers are expected to discard filters shorter than two
    /// characters before building the config.
    pub filter: String,
}

impl TraversalConfig {
    /// Creates a config with the given depth bound and no filter.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            filter: String::new(),
        }
    }

    /// Sets the exclusion substring.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Checks whether a name is excluded by the filter.
    fn excludes(&self, name: &str) -> bool {
        !self.filter.is_empty() && name.contains(&self.filter)
    }
}

/// Evidence of one back-edge encounter: the chain of package names from the
/// first on-path occurrence of the repeated node back around to it.
///
/// Records are collected as encountered and not deduplicated here; the
/// presentation layer deduplicates them via set semantics, which is why the
/// type is `Eq + Hash + Ord`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleRecord {
    /// The chain of names; first and last entries are the repeated node.
    pub chain: Vec<String>,
}

impl CycleRecord {
    /// Returns the chain formatted as `a -> b -> a`.
    pub fn path(&self) -> String {
        self.chain.join(" -> ")
    }
}

impl fmt::Display for CycleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// The outcome of one traversal run.
#[derive(Debug, Clone, Default)]
pub struct TraversalResult {
    /// The discovered subgraph.
    pub graph: TraversalGraph,
    /// Back-edge encounters, in discovery order, not deduplicated.
    pub cycles: Vec<CycleRecord>,
}

/// Traverses `index` depth-first from `start`, bounded by the config.
///
/// At each node four guards apply, in this order:
///
/// 1. **Depth**: past `max_depth`, the branch stops silently.
/// 2. **Cycle**: a node already on the current ancestor chain produces a
///    [`CycleRecord`] and stops the branch.
/// 3. **Filter**: a node name containing the exclusion substring stops the
///    branch without any record.
/// 4. **Visited**: a node already expanded anywhere in this traversal is not
///    expanded again, so each distinct node costs one expansion no matter how
///    many paths reach it.
///
/// Surviving nodes record their neighbor list (with filtered names dropped)
/// in the output graph and recurse. The ancestor chain is pushed before and
/// popped after each recursion, so sibling branches never observe each
/// other's ancestry. A node missing from `index` simply has no neighbors.
///
/// # Example
///
/// ```rust
/// use apkscope::graph::{traverse, TraversalConfig};
/// use apkscope::parser::local;
///
/// let index = local::parse_str("a -> b\nb -> a\n");
/// let result = traverse(&index, "a", &TraversalConfig::new(5));
///
/// assert_eq!(result.graph["a"], ["b".to_string()]);
/// assert_eq!(result.cycles.len(), 1);
/// assert_eq!(result.cycles[0].path(), "a -> b -> a");
/// ```
pub fn traverse(index: &PackageIndex, start: &str, config: &TraversalConfig) -> TraversalResult {
    let mut walker = Walker {
        index,
        config,
        visited: HashSet::new(),
        path: Vec::new(),
        on_path: HashSet::new(),
        result: TraversalResult::default(),
    };
    walker.visit(start, 0);
    walker.result
}

/// Mutable traversal state threaded through the recursion.
///
/// `visited` and the output graph are global to the run; `path`/`on_path`
/// describe only the current root-to-node chain.
struct Walker<'a> {
    index: &'a PackageIndex,
    config: &'a TraversalConfig,
    visited: HashSet<String>,
    path: Vec<String>,
    on_path: HashSet<String>,
    result: TraversalResult,
}

impl Walker<'_> {
    fn visit(&mut self, name: &str, depth: usize) {
        if depth > self.config.max_depth {
            return;
        }
        if self.on_path.contains(name) {
            self.record_cycle(name);
            return;
        }
        if self.config.excludes(name) {
            return;
        }
        if self.visited.contains(name) {
            return;
        }

        let neighbors: Vec<String> = self
            .index
            .neighbors(name)
            .iter()
            .filter(|n| !self.config.excludes(n))
            .cloned()
            .collect();
        self.result.graph.insert(name.to_string(), neighbors.clone());
        self.visited.insert(name.to_string());

        self.path.push(name.to_string());
        self.on_path.insert(name.to_string());
        for neighbor in &neighbors {
            self.visit(neighbor, depth + 1);
        }
        self.path.pop();
        self.on_path.remove(name);
    }

    /// Records the chain from the first on-path occurrence of `name` back to
    /// `name` itself.
    fn record_cycle(&mut self, name: &str) {
        let from = self.path.iter().position(|p| p == name).unwrap_or(0);
        let mut chain: Vec<String> = self.path[from..].to_vec();
        chain.push(name.to_string());
        self.result.cycles.push(CycleRecord { chain });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::local;

    fn index(text: &str) -> PackageIndex {
        local::parse_str(text)
    }

    #[test]
    fn test_simple_chain() {
        let idx = index("a -> b\nb -> c\nc ->\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));

        assert_eq!(result.graph.len(), 3);
        assert_eq!(result.graph["a"], ["b".to_string()]);
        assert_eq!(result.graph["b"], ["c".to_string()]);
        assert!(result.graph["c"].is_empty());
        assert!(result.cycles.is_empty());
    }

    #[test]
    fn test_depth_bound() {
        let idx = index("a -> b\nb -> c\nc -> d\nd -> e\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(2));

        // Entries exist only for nodes within distance 2 of the start
        assert!(result.graph.contains_key("a"));
        assert!(result.graph.contains_key("b"));
        assert!(result.graph.contains_key("c"));
        assert!(!result.graph.contains_key("d"));
        assert!(!result.graph.contains_key("e"));
    }

    #[test]
    fn test_depth_one_records_direct_neighbors_only() {
        let idx = index("a -> b c\nb -> d\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(1));

        assert_eq!(result.graph["a"], ["b".to_string(), "c".to_string()]);
        // b is expanded at depth 1; its child d is cut by the depth guard
        assert_eq!(result.graph["b"], ["d".to_string()]);
        assert!(!result.graph.contains_key("d"));
    }

    #[test]
    fn test_two_node_cycle() {
        let idx = index("a -> b\nb -> a\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));

        assert_eq!(result.cycles.len(), 1);
        let cycle = &result.cycles[0];
        assert!(cycle.chain.contains(&"a".to_string()));
        assert!(cycle.chain.contains(&"b".to_string()));
        assert_eq!(cycle.path(), "a -> b -> a");
        // The graph still has exactly one entry for a
        assert_eq!(result.graph["a"], ["b".to_string()]);
    }

    #[test]
    fn test_self_loop_cycle() {
        // Local format keeps self-references, so a self-loop is reachable
        let idx = index("a -> a\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));

        assert_eq!(result.cycles.len(), 1);
        assert_eq!(result.cycles[0].path(), "a -> a");
    }

    #[test]
    fn test_cycle_not_leaked_to_sibling_branch() {
        // b is visited under the first branch; reaching it again via c must
        // hit the visited guard, not the cycle guard
        let idx = index("a -> b c\nb -> x\nc -> b\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));

        assert!(result.cycles.is_empty());
        assert_eq!(result.graph["c"], ["b".to_string()]);
    }

    #[test]
    fn test_diamond_visited_once() {
        let idx = index("a -> b c\nb -> d\nc -> d\nd -> e\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));

        // d reached via two paths but expanded once
        assert_eq!(result.graph.len(), 5);
        assert_eq!(result.graph["d"], ["e".to_string()]);
    }

    #[test]
    fn test_filter_excludes_keys_and_neighbors() {
        let idx = index("a -> b doc-b\nb -> doc-c d\nd ->\n");
        let config = TraversalConfig::new(5).with_filter("doc");
        let result = traverse(&idx, "a", &config);

        for (name, neighbors) in result.graph.iter() {
            assert!(!name.contains("doc"));
            assert!(neighbors.iter().all(|n| !n.contains("doc")));
        }
        assert_eq!(result.graph["a"], ["b".to_string()]);
        assert_eq!(result.graph["b"], ["d".to_string()]);
    }

    #[test]
    fn test_filtered_start_yields_empty_graph() {
        let idx = index("doc-a -> b\n");
        let config = TraversalConfig::new(5).with_filter("doc");
        let result = traverse(&idx, "doc-a", &config);

        assert!(result.graph.is_empty());
        assert!(result.cycles.is_empty());
    }

    #[test]
    fn test_empty_filter_disables_filtering() {
        let idx = index("a -> b\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));
        assert_eq!(result.graph.len(), 2);
    }

    #[test]
    fn test_missing_node_has_no_neighbors() {
        let idx = index("a -> ghost\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));

        assert_eq!(result.graph["a"], ["ghost".to_string()]);
        assert!(result.graph["ghost"].is_empty());
    }

    #[test]
    fn test_missing_start_is_not_an_error() {
        let idx = index("a -> b\n");
        let result = traverse(&idx, "unknown", &TraversalConfig::new(5));

        assert_eq!(result.graph.len(), 1);
        assert!(result.graph["unknown"].is_empty());
    }

    #[test]
    fn test_cycle_deeper_than_depth_bound_not_reported() {
        let idx = index("a -> b\nb -> c\nc -> a\n");
        // The back edge to a sits at depth 3, past the bound
        let result = traverse(&idx, "a", &TraversalConfig::new(2));
        assert!(result.cycles.is_empty());
    }

    #[test]
    fn test_cycle_records_kept_per_encounter() {
        // Two distinct paths close a cycle onto a: one back edge is found,
        // the other is swallowed by the visited guard on b's re-expansion
        let idx = index("a -> b c\nb -> a\nc -> a\n");
        let result = traverse(&idx, "a", &TraversalConfig::new(5));

        assert_eq!(result.cycles.len(), 2);
        let paths: Vec<String> = result.cycles.iter().map(CycleRecord::path).collect();
        assert!(paths.contains(&"a -> b -> a".to_string()));
        assert!(paths.contains(&"a -> c -> a".to_string()));
    }

    #[test]
    fn test_cycle_record_display() {
        let record = CycleRecord {
            chain: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(format!("{}", record), "a -> b -> a");
    }
}
