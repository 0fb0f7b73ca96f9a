//! Selection cascade and tri-state propagation

use std::collections::HashMap;
use std::collections::HashSet;

use crate::node::TreeNode;
use crate::state::SelectionState;

/// Adds `node` and every descendant id to `selected`.
pub fn select_subtree(node: &TreeNode, selected: &mut HashSet<String>) {
    selected.insert(node.id.clone());
    for child in &node.children {
        select_subtree(child, selected);
    }
}

/// Removes `node` and every descendant id from `selected`.
pub fn deselect_subtree(node: &TreeNode, selected: &mut HashSet<String>) {
    selected.remove(&node.id);
    for child in &node.children {
        deselect_subtree(child, selected);
    }
}

/// Derives interior tri-states bottom-up and syncs `selected` with them.
///
/// Leaves keep the state already present in `states` (missing leaves become
/// [`SelectionState::Unselected`]). Each interior node is `Selected` when all
/// children are selected, `Partial` when some child is selected or partial,
/// and `Unselected` otherwise. Afterwards an interior id is in `selected`
/// exactly when its derived state is `Selected`.
pub fn propagate_selection_upward(
    nodes: &[TreeNode],
    selected: &mut HashSet<String>,
    states: &mut HashMap<String, SelectionState>,
) {
    for node in nodes {
        if node.is_leaf() {
            states
                .entry(node.id.clone())
                .or_insert(SelectionState::Unselected);
            continue;
        }

        propagate_selection_upward(&node.children, selected, states);

        let mut selected_children = 0;
        let mut partial_children = 0;
        for child in &node.children {
            match states.get(&child.id).copied().unwrap_or_default() {
                SelectionState::Selected => selected_children += 1,
                SelectionState::Partial => partial_children += 1,
                SelectionState::Unselected => {}
            }
        }

        let state = SelectionState::from_child_counts(
            node.children.len(),
            selected_children,
            partial_children,
        );
        states.insert(node.id.clone(), state);

        if state == SelectionState::Selected {
            selected.insert(node.id.clone());
        } else {
            selected.remove(&node.id);
        }
    }
}

/// Computes the full tri-state map for `nodes` from an explicit selection.
///
/// Every id in `selected` starts out `Selected`; interior nodes are then
/// re-derived from their children. `selected` is updated in place.
pub fn compute_selection_states(
    nodes: &[TreeNode],
    selected: &mut HashSet<String>,
) -> HashMap<String, SelectionState> {
    let mut states: HashMap<String, SelectionState> = selected
        .iter()
        .map(|id| (id.clone(), SelectionState::Selected))
        .collect();
    propagate_selection_upward(nodes, selected, &mut states);
    states
}
