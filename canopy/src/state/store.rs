//! Tree state store.

use std::collections::HashSet;

use crate::node::TreeNode;
use crate::utils;

use super::SelectionState;
use super::TreeState;

/// Owns one tree session's state and its consistent transitions.
///
/// The store is independent of any particular hierarchy: ids are opaque
/// strings and mutations never fail for unknown ids. Selection edits do not
/// recompute tri-states on their own; call
/// [`recompute_selection_states`](Self::recompute_selection_states) once
/// after a batch of edits before trusting [`selection_state`](Self::selection_state)
/// or [`selected_ids`](Self::selected_ids).
///
/// # Example
///
/// ```
/// use canopy::node::TreeNode;
/// use canopy::state::{SelectionState, TreeStateStore};
///
/// let roots = vec![TreeNode::new("a").child(TreeNode::new("b")).child(TreeNode::new("c"))];
/// let mut store = TreeStateStore::new();
///
/// store.select_node_with_descendants(&roots[0].children[0]);
/// store.recompute_selection_states(&roots);
///
/// assert_eq!(store.selection_state("a"), SelectionState::Partial);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeStateStore {
    state: TreeState,
}

impl TreeStateStore {
    /// Creates a store with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded from a snapshot.
    pub fn from_snapshot(snapshot: TreeState) -> Self {
        Self { state: snapshot }
    }

    // -------------------------------------------------------------------------
    // Expand/Collapse
    // -------------------------------------------------------------------------

    /// Marks a node expanded. Children keep their own expansion flags.
    pub fn expand_node(&mut self, id: &str) {
        if self.state.expanded.insert(id.to_string()) {
            log::debug!("[store] expanded {}", id);
        }
    }

    /// Marks a node collapsed. Descendants keep their own expansion flags.
    pub fn collapse_node(&mut self, id: &str) {
        if self.state.expanded.remove(id) {
            log::debug!("[store] collapsed {}", id);
        }
    }

    /// Replaces the expanded set with `ids`.
    pub fn expand_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.expanded = ids.into_iter().map(Into::into).collect();
        log::debug!("[store] expanded all ({} nodes)", self.state.expanded.len());
    }

    /// Clears the expanded set.
    pub fn collapse_all(&mut self) {
        self.state.expanded.clear();
        log::debug!("[store] collapsed all");
    }

    /// Toggles expansion and returns the resulting expanded flag.
    pub fn toggle_expansion(&mut self, id: &str) -> bool {
        if self.is_expanded(id) {
            self.collapse_node(id);
            false
        } else {
            self.expand_node(id);
            true
        }
    }

    /// Check if a node is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.expanded.contains(id)
    }

    /// Get all expanded ids, sorted.
    pub fn expanded_ids(&self) -> Vec<String> {
        sorted(&self.state.expanded)
    }

    /// Borrow the expanded set.
    pub fn expanded(&self) -> &HashSet<String> {
        &self.state.expanded
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Selects `node` and its whole subtree. Recompute afterwards.
    pub fn select_node_with_descendants(&mut self, node: &TreeNode) {
        utils::select_subtree(node, &mut self.state.selected);
        log::debug!("[store] selected subtree {}", node.id);
    }

    /// Deselects `node` and its whole subtree. Recompute afterwards.
    pub fn deselect_node_with_descendants(&mut self, node: &TreeNode) {
        utils::deselect_subtree(node, &mut self.state.selected);
        log::debug!("[store] deselected subtree {}", node.id);
    }

    /// Toggles `node`'s subtree based on its current membership.
    ///
    /// Returns `true` if the node is now selected. Recompute afterwards.
    pub fn toggle_selection(&mut self, node: &TreeNode) -> bool {
        if self.is_selected(&node.id) {
            self.deselect_node_with_descendants(node);
            false
        } else {
            self.select_node_with_descendants(node);
            true
        }
    }

    /// Adds ids to the selected set without cascading.
    pub fn select_nodes<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.selected.extend(ids.into_iter().map(Into::into));
    }

    /// Removes ids from the selected set without cascading.
    pub fn deselect_nodes<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            self.state.selected.remove(id.as_ref());
        }
    }

    /// Re-derives every node's tri-state over `roots` and syncs the selected
    /// set with it.
    pub fn recompute_selection_states(&mut self, roots: &[TreeNode]) {
        let states = utils::compute_selection_states(roots, &mut self.state.selected);
        log::debug!(
            "[store] recomputed selection: {} selected, {} states",
            self.state.selected.len(),
            states.len()
        );
        self.state.selection_states = states;
    }

    /// Clears the selected set and every derived state.
    pub fn clear_selection(&mut self) {
        self.state.selected.clear();
        self.state.selection_states.clear();
        log::debug!("[store] cleared selection");
    }

    /// Check if a node is in the selected set.
    pub fn is_selected(&self, id: &str) -> bool {
        self.state.selected.contains(id)
    }

    /// Get the derived tri-state of a node (unknown ids are unselected).
    pub fn selection_state(&self, id: &str) -> SelectionState {
        self.state
            .selection_states
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    /// Get all selected ids, sorted.
    pub fn selected_ids(&self) -> Vec<String> {
        sorted(&self.state.selected)
    }

    /// Borrow the selected set.
    pub fn selected(&self) -> &HashSet<String> {
        &self.state.selected
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Sets or clears a node's loading indicator.
    pub fn set_node_loading(&mut self, id: &str, is_loading: bool) {
        if is_loading {
            self.state.loading.insert(id.to_string());
        } else {
            self.state.loading.remove(id);
        }
    }

    /// Clears every loading indicator.
    pub fn clear_loading(&mut self) {
        self.state.loading.clear();
    }

    /// Check if a node shows a loading indicator.
    pub fn is_loading(&self, id: &str) -> bool {
        self.state.loading.contains(id)
    }

    /// Get all loading ids, sorted.
    pub fn loading_ids(&self) -> Vec<String> {
        sorted(&self.state.loading)
    }

    // -------------------------------------------------------------------------
    // Snapshots
    // -------------------------------------------------------------------------

    /// Returns a deep copy of the current state.
    pub fn snapshot(&self) -> TreeState {
        self.state.clone()
    }

    /// Replaces the current state with `snapshot`.
    pub fn restore_snapshot(&mut self, snapshot: TreeState) {
        self.state = snapshot;
        log::debug!("[store] restored snapshot");
    }

    /// Resets every set and map to empty.
    pub fn reset(&mut self) {
        self.state = TreeState::default();
    }
}

fn sorted(ids: &HashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = ids.iter().cloned().collect();
    out.sort();
    out
}
