//! Parent, ancestor and descendant queries

use std::collections::HashMap;

use crate::node::TreeNode;

/// Maps every non-root node id to its immediate parent's id.
pub fn build_parent_map(nodes: &[TreeNode]) -> HashMap<String, String> {
    let mut parents = HashMap::new();
    for node in nodes {
        record_parents(node, &mut parents);
    }
    parents
}

fn record_parents(node: &TreeNode, parents: &mut HashMap<String, String>) {
    for child in &node.children {
        parents.insert(child.id.clone(), node.id.clone());
        record_parents(child, parents);
    }
}

/// Returns the ancestors of `id`, nearest first.
///
/// Empty when `id` is a root or not present.
pub fn ancestor_ids(id: &str, nodes: &[TreeNode]) -> Vec<String> {
    let parents = build_parent_map(nodes);
    let mut ancestors = Vec::new();
    let mut current = id;

    while let Some(parent) = parents.get(current) {
        // A repeated id on the path would loop forever.
        if parent == id || ancestors.contains(parent) {
            break;
        }
        ancestors.push(parent.clone());
        current = parent.as_str();
    }

    ancestors
}

/// Returns every descendant id of `node` in pre-order, excluding `node`.
pub fn descendant_ids(node: &TreeNode) -> Vec<String> {
    let mut out = Vec::new();
    collect_ids(&node.children, &mut out);
    out
}

/// Returns every id in the hierarchy in pre-order.
pub fn all_node_ids(nodes: &[TreeNode]) -> Vec<String> {
    let mut out = Vec::new();
    collect_ids(nodes, &mut out);
    out
}

fn collect_ids(nodes: &[TreeNode], out: &mut Vec<String>) {
    for node in nodes {
        out.push(node.id.clone());
        collect_ids(&node.children, out);
    }
}
