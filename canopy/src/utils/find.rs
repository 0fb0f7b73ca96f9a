//! Node lookup by id

use std::collections::HashMap;

use crate::node::TreeNode;

/// Finds the first node with `id`, searching depth-first in document order.
pub fn find_by_id<'a>(id: &str, nodes: &'a [TreeNode]) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(id, &node.children) {
            return Some(found);
        }
    }
    None
}

/// Builds an id → node side index for repeated lookups.
///
/// When ids repeat, the first node in document order wins, matching
/// [`find_by_id`].
pub fn build_node_index(nodes: &[TreeNode]) -> HashMap<&str, &TreeNode> {
    let mut index = HashMap::new();
    index_nodes(nodes, &mut index);
    index
}

fn index_nodes<'a>(nodes: &'a [TreeNode], index: &mut HashMap<&'a str, &'a TreeNode>) {
    for node in nodes {
        index.entry(node.id.as_str()).or_insert(node);
        index_nodes(&node.children, index);
    }
}
