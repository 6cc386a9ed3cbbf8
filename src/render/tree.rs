//! ASCII tree rendering for traversal graphs.

use std::collections::HashSet;
use std::fmt::Write;

use crate::graph::TraversalGraph;

/// Renders a [`TraversalGraph`] as an ASCII tree.
///
/// The start node is printed bare on the first line; every other node gets a
/// branch connector (`├── ` or `└── ` for the last sibling) behind
/// continuation guides built from its ancestors (`│   ` while an ancestor has
/// siblings below it, four spaces otherwise). A node that already appeared in
/// the tree is printed once more as a leaf annotated "already shown above"
/// and never re-expanded, so diamond-shaped graphs stay bounded.
///
/// # Example
///
/// ```rust
/// use apkscope::graph::{traverse, TraversalConfig};
/// use apkscope::parser::local;
/// use apkscope::render::TreeRenderer;
///
/// let index = local::parse_str("a -> b c\nc -> b\n");
/// let result = traverse(&index, "a", &TraversalConfig::new(5));
/// let tree = TreeRenderer::new(5).render(&result.graph, "a");
///
/// assert_eq!(tree, "\
/// a
/// ├── b
/// └── c
///     └── b (already shown above)
/// ");
/// ```
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    max_depth: usize,
    empty_label: String,
}

impl TreeRenderer {
    /// Creates a renderer bounded by the same depth as the traversal.
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            empty_label: "none".to_string(),
        }
    }

    /// Sets the placeholder text shown when the start node has no neighbors,
    /// e.g. "no dependencies" or "no dependents".
    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }

    /// Renders the tree rooted at `start`.
    ///
    /// A start node with no recorded neighbors (or absent from the graph)
    /// renders a single placeholder branch instead of children.
    pub fn render(&self, graph: &TraversalGraph, start: &str) -> String {
        let mut out = String::new();
        out.push_str(start);
        out.push('\n');

        let children = graph.get(start).map(Vec::as_slice).unwrap_or(&[]);
        if children.is_empty() {
            let _ = writeln!(out, "└── ({})", self.empty_label);
            return out;
        }

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(start.to_string());
        self.render_children(graph, children, "", 1, &mut seen, &mut out);
        out
    }

    fn render_children(
        &self,
        graph: &TraversalGraph,
        children: &[String],
        prefix: &str,
        depth: usize,
        seen: &mut HashSet<String>,
        out: &mut String,
    ) {
        // Traversal already bounds the graph by depth; this re-check keeps
        // rendering bounded even on a hand-built graph
        if depth > self.max_depth {
            return;
        }

        let last = children.len() - 1;
        for (i, child) in children.iter().enumerate() {
            let connector = if i == last { "└── " } else { "├── " };

            if seen.contains(child) {
                let _ = writeln!(out, "{prefix}{connector}{child} (already shown above)");
                continue;
            }
            seen.insert(child.clone());
            let _ = writeln!(out, "{prefix}{connector}{child}");

            let grandchildren = graph.get(child).map(Vec::as_slice).unwrap_or(&[]);
            if !grandchildren.is_empty() {
                let guide = if i == last { "    " } else { "│   " };
                self.render_children(
                    graph,
                    grandchildren,
                    &format!("{prefix}{guide}"),
                    depth + 1,
                    seen,
                    out,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn graph(edges: &[(&str, &[&str])]) -> TraversalGraph {
        let mut g = IndexMap::new();
        for (name, deps) in edges {
            g.insert(
                name.to_string(),
                deps.iter().map(|d| d.to_string()).collect(),
            );
        }
        g
    }

    #[test]
    fn test_render_simple_tree() {
        let g = graph(&[("a", &["b", "c"]), ("b", &[]), ("c", &[])]);
        let tree = TreeRenderer::new(5).render(&g, "a");

        assert_eq!(tree, "a\n├── b\n└── c\n");
    }

    #[test]
    fn test_render_nested_tree_with_guides() {
        let g = graph(&[
            ("a", &["b", "c"]),
            ("b", &["d", "e"]),
            ("c", &["f"]),
            ("d", &[]),
            ("e", &[]),
            ("f", &[]),
        ]);
        let tree = TreeRenderer::new(5).render(&g, "a");

        assert_eq!(
            tree,
            "\
a
├── b
│   ├── d
│   └── e
└── c
    └── f
"
        );
    }

    #[test]
    fn test_repeated_node_annotated_not_expanded() {
        // Diamond: b appears under a, then again under c as an annotated leaf
        let g = graph(&[("a", &["b", "c"]), ("b", &[]), ("c", &["b"])]);
        let tree = TreeRenderer::new(5).render(&g, "a");

        assert_eq!(
            tree,
            "\
a
├── b
└── c
    └── b (already shown above)
"
        );
    }

    #[test]
    fn test_repeated_node_with_children_still_not_expanded() {
        let g = graph(&[("a", &["b", "c"]), ("b", &["x"]), ("c", &["b"]), ("x", &[])]);
        let tree = TreeRenderer::new(5).render(&g, "a");

        // The second b is a leaf even though the graph records neighbors for it
        assert!(tree.contains("└── b (already shown above)\n"));
        assert_eq!(tree.matches("x").count(), 1);
    }

    #[test]
    fn test_start_node_reference_annotated() {
        // Cycle back to the start: the render-time set is seeded with it
        let g = graph(&[("a", &["b"]), ("b", &["a"])]);
        let tree = TreeRenderer::new(5).render(&g, "a");

        assert_eq!(
            tree,
            "\
a
└── b
    └── a (already shown above)
"
        );
    }

    #[test]
    fn test_empty_start_renders_placeholder() {
        let g = graph(&[("a", &[])]);
        let tree = TreeRenderer::new(5)
            .with_empty_label("no dependencies")
            .render(&g, "a");

        assert_eq!(tree, "a\n└── (no dependencies)\n");
    }

    #[test]
    fn test_absent_start_renders_placeholder() {
        let g = graph(&[]);
        let tree = TreeRenderer::new(5)
            .with_empty_label("no dependents")
            .render(&g, "ghost");

        assert_eq!(tree, "ghost\n└── (no dependents)\n");
    }

    #[test]
    fn test_depth_bound_respected() {
        let g = graph(&[("a", &["b"]), ("b", &["c"]), ("c", &["d"]), ("d", &[])]);
        let tree = TreeRenderer::new(1).render(&g, "a");

        assert_eq!(tree, "a\n└── b\n");
    }
}
