//! Tree session state.
//!
//! [`TreeStateStore`] owns the mutable expansion, selection and loading sets
//! for one tree session. [`TreeState`] is the plain value it snapshots to.

mod snapshot;
mod store;

pub use snapshot::*;
pub use store::*;

use serde::Deserialize;
use serde::Serialize;

/// Derived selection state for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    /// Neither the node nor any descendant is selected.
    #[default]
    Unselected,
    /// The node (and, for interior nodes, its whole subtree) is selected.
    Selected,
    /// Some but not all descendants are selected.
    Partial,
}

impl SelectionState {
    /// Applies the tri-state rule to an interior node's child tallies.
    pub fn from_child_counts(total: usize, selected: usize, partial: usize) -> Self {
        if total > 0 && selected == total {
            Self::Selected
        } else if selected > 0 || partial > 0 {
            Self::Partial
        } else {
            Self::Unselected
        }
    }

    /// Maps the state onto a checkbox: `Some(true)` checked, `Some(false)`
    /// unchecked, `None` indeterminate.
    pub fn checkbox(self) -> Option<bool> {
        match self {
            Self::Selected => Some(true),
            Self::Unselected => Some(false),
            Self::Partial => None,
        }
    }
}
