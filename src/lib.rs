//! ApkScope - dependency graph visualizer for Alpine APK package repositories
//!
//! This crate parses a repository index (the APKINDEX record format, or a
//! simplified local test format), builds forward and reverse dependency
//! mappings, and walks them with a bounded, cycle-safe depth-first traversal
//! whose result renders as an annotated ASCII tree.

pub mod export;
pub mod fetch;
pub mod graph;
pub mod parser;
pub mod render;
