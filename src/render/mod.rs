//! Rendering module for ApkScope.
//!
//! Converts the subgraph produced by a traversal into human-readable output.

mod tree;

pub use tree::TreeRenderer;
