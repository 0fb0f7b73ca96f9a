//! Tree state snapshot value

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use super::SelectionState;

/// A deep copy of a tree session's state.
///
/// Obtained from [`TreeStateStore::snapshot`](super::TreeStateStore::snapshot)
/// and handed back through
/// [`TreeStateStore::restore_snapshot`](super::TreeStateStore::restore_snapshot)
/// for undo or to move state between explorers. The fields are read-only
/// from outside the crate so the selection invariant can only be changed
/// through the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeState {
    pub(crate) expanded: HashSet<String>,
    pub(crate) selected: HashSet<String>,
    pub(crate) loading: HashSet<String>,
    pub(crate) selection_states: HashMap<String, SelectionState>,
}

impl TreeState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of expanded nodes.
    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    /// Ids of selected nodes.
    pub fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Ids of nodes showing a loading indicator.
    pub fn loading(&self) -> &HashSet<String> {
        &self.loading
    }

    /// Derived tri-state per node id.
    pub fn selection_states(&self) -> &HashMap<String, SelectionState> {
        &self.selection_states
    }

    /// Serializes the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
