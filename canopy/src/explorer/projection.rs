//! Display-ready projection rows

use crate::config::Selectability;
use crate::config::TreeConfig;
use crate::node::TreeNode;
use crate::state::SelectionState;
use crate::state::TreeStateStore;
use crate::utils::FlattenedNode;

/// One row of the explorer's projection.
///
/// Everything a presentation layer needs to draw the row: resolved label and
/// icon, indentation depth, expansion and loading flags, tri-state for the
/// checkbox, and whether the checkbox is enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedNode {
    /// Node id.
    pub id: String,
    /// Resolved label.
    pub label: String,
    /// Resolved icon name.
    pub icon: String,
    /// Resolved category tag.
    pub category: String,
    /// Depth in tree (0 = root).
    pub depth: usize,
    /// Whether the node has children in the projected hierarchy.
    pub has_children: bool,
    /// Whether the node is expanded.
    pub is_expanded: bool,
    /// Derived tri-state.
    pub selection_state: SelectionState,
    /// Whether a loading indicator is shown.
    pub is_loading: bool,
    /// Whether the node can be newly selected.
    pub selectability: Selectability,
    /// The node's attributes, without children.
    pub node: TreeNode,
}

impl ProjectedNode {
    pub(super) fn new(flat: &FlattenedNode<'_>, config: &TreeConfig, store: &TreeStateStore) -> Self {
        let node = flat.node;
        Self {
            id: node.id.clone(),
            label: config.label(node).to_string(),
            icon: config.icon(node),
            category: config.category(node),
            depth: flat.depth,
            has_children: flat.has_children,
            is_expanded: flat.is_expanded,
            selection_state: store.selection_state(&node.id),
            is_loading: store.is_loading(&node.id),
            selectability: config.selectability(node),
            node: node.shallow(),
        }
    }

    /// Checkbox value: `Some(true)` checked, `Some(false)` unchecked,
    /// `None` indeterminate.
    pub fn checkbox(&self) -> Option<bool> {
        self.selection_state.checkbox()
    }

    /// Indentation string, two spaces per level.
    pub fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}
