//! Depth-first flattening honoring expansion state

use std::collections::HashSet;

use crate::node::TreeNode;

/// A node in the flattened, expansion-gated view of a hierarchy.
///
/// Borrowed from the hierarchy it was computed from; recompute it whenever
/// the hierarchy or the expansion set changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlattenedNode<'a> {
    /// The node itself.
    pub node: &'a TreeNode,
    /// Depth in tree (0 = root).
    pub depth: usize,
    /// Whether this node has children.
    pub has_children: bool,
    /// Whether this node's id is in the expanded set.
    pub is_expanded: bool,
}

impl<'a> FlattenedNode<'a> {
    /// Returns the node id.
    pub fn id(&self) -> &'a str {
        &self.node.id
    }
}

/// Flattens `nodes` in depth-first pre-order.
///
/// A node's children follow it immediately if and only if its id is in
/// `expanded` and it has at least one child. Collapsed subtrees contribute
/// only their root.
pub fn flatten<'a>(nodes: &'a [TreeNode], expanded: &HashSet<String>) -> Vec<FlattenedNode<'a>> {
    flatten_from(nodes, expanded, 0)
}

/// Flattens `nodes`, assigning `depth` to the first level.
pub fn flatten_from<'a>(
    nodes: &'a [TreeNode],
    expanded: &HashSet<String>,
    depth: usize,
) -> Vec<FlattenedNode<'a>> {
    let mut out = Vec::new();
    collect_visible(nodes, expanded, depth, &mut out);
    out
}

fn collect_visible<'a>(
    nodes: &'a [TreeNode],
    expanded: &HashSet<String>,
    depth: usize,
    out: &mut Vec<FlattenedNode<'a>>,
) {
    for node in nodes {
        let has_children = node.has_children();
        let is_expanded = expanded.contains(&node.id);

        out.push(FlattenedNode {
            node,
            depth,
            has_children,
            is_expanded,
        });

        if is_expanded && has_children {
            collect_visible(&node.children, expanded, depth + 1, out);
        }
    }
}
