//! Hierarchy pruning and substring search

use crate::node::TreeNode;

/// Returns a pruned copy of `nodes` keeping matches and their ancestors.
///
/// A node survives if `predicate` accepts it or any descendant. Surviving
/// nodes carry only their surviving children, so a kept ancestor never
/// exposes non-matching siblings of the match.
pub fn filter_tree<F>(nodes: &[TreeNode], predicate: F) -> Vec<TreeNode>
where
    F: Fn(&TreeNode) -> bool,
{
    filter_nodes(nodes, &predicate)
}

fn filter_nodes<F>(nodes: &[TreeNode], predicate: &F) -> Vec<TreeNode>
where
    F: Fn(&TreeNode) -> bool,
{
    let mut filtered = Vec::new();

    for node in nodes {
        let children = filter_nodes(&node.children, predicate);
        if children.is_empty() && !predicate(node) {
            continue;
        }
        let mut kept = node.shallow();
        kept.children = children;
        filtered.push(kept);
    }

    filtered
}

/// Prunes `nodes` to those whose string attribute `key` contains `term`,
/// ignoring case, plus their ancestors.
///
/// Nodes where `key` is missing or not a string never match. An empty term
/// matches every node.
pub fn search_tree(nodes: &[TreeNode], term: &str, key: &str) -> Vec<TreeNode> {
    let needle = term.to_lowercase();
    filter_tree(nodes, |node| {
        node.get_str(key)
            .is_some_and(|value| value.to_lowercase().contains(&needle))
    })
}
