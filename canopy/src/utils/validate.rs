//! Structural validation

use std::collections::HashSet;

use crate::error::StructuralWarning;
use crate::node::TreeNode;

/// Returns `true` if some id reappears on its own ancestor path.
///
/// Reuse of an id across disjoint branches is not a cycle; see
/// [`find_duplicate_ids`] for that.
pub fn detect_cycle(nodes: &[TreeNode]) -> bool {
    find_cycle(nodes).is_some()
}

/// Returns the first id found on its own ancestor path, if any.
pub fn find_cycle(nodes: &[TreeNode]) -> Option<String> {
    let mut stack = HashSet::new();
    nodes.iter().find_map(|node| visit(node, &mut stack))
}

fn visit<'a>(node: &'a TreeNode, stack: &mut HashSet<&'a str>) -> Option<String> {
    if !stack.insert(node.id.as_str()) {
        return Some(node.id.clone());
    }
    let found = node.children.iter().find_map(|child| visit(child, stack));
    stack.remove(node.id.as_str());
    found
}

/// Returns ids used by more than one node, in order of first repetition.
pub fn find_duplicate_ids(nodes: &[TreeNode]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    collect_duplicates(nodes, &mut seen, &mut duplicates);
    duplicates
}

fn collect_duplicates<'a>(
    nodes: &'a [TreeNode],
    seen: &mut HashSet<&'a str>,
    duplicates: &mut Vec<String>,
) {
    for node in nodes {
        if !seen.insert(node.id.as_str()) && !duplicates.contains(&node.id) {
            duplicates.push(node.id.clone());
        }
        collect_duplicates(&node.children, seen, duplicates);
    }
}

/// Runs every structural check and returns the warnings found.
pub fn validate_structure(nodes: &[TreeNode]) -> Vec<StructuralWarning> {
    let mut warnings = Vec::new();
    if let Some(id) = find_cycle(nodes) {
        warnings.push(StructuralWarning::Cycle { id });
    }
    warnings.extend(
        find_duplicate_ids(nodes)
            .into_iter()
            .map(|id| StructuralWarning::DuplicateId { id }),
    );
    warnings
}
