//! Graph module for dependency relationship modeling.
//!
//! Three pieces live here:
//!
//! - [`build_reverse_index`] inverts a forward index into a dependents index.
//! - [`traverse`] walks either index depth-first from a start package,
//!   bounded by depth and an exclusion filter, collecting cycles.
//! - [`IndexGraph`] models the whole index with petgraph for repository-wide
//!   cycle audits.
//!
//! # Example
//!
//! ```rust
//! use apkscope::graph::{build_reverse_index, traverse, TraversalConfig};
//! use apkscope::parser::local;
//!
//! let index = local::parse_str("app -> lib\nlib -> base\n");
//! let reverse = build_reverse_index(&index);
//!
//! let forward = traverse(&index, "app", &TraversalConfig::new(5));
//! assert_eq!(forward.graph.len(), 3);
//!
//! let backward = traverse(&reverse, "base", &TraversalConfig::new(5));
//! assert_eq!(backward.graph["base"], ["lib".to_string()]);
//! ```

mod index_graph;
mod reverse;
mod traversal;

pub use index_graph::IndexGraph;
pub use reverse::build_reverse_index;
pub use traversal::{traverse, CycleRecord, TraversalConfig, TraversalGraph, TraversalResult};
