//! Explorer notifications.
//!
//! The explorer queues a [`TreeEvent`] for every user-visible change. The
//! host drains the queue with
//! [`TreeExplorer::drain_events`](super::TreeExplorer::drain_events) after
//! forwarding each user action, then re-renders if the explorer is dirty.

use crate::config::MenuAction;
use crate::node::TreeNode;

/// The selection after a change: sorted ids plus the nodes they resolve to.
///
/// Ids that are not present in the hierarchy are listed in `selected_ids`
/// but have no entry in `selected_nodes`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionChange {
    /// Selected ids, sorted.
    pub selected_ids: Vec<String>,
    /// Selected nodes, in the order of `selected_ids`.
    pub selected_nodes: Vec<TreeNode>,
}

/// A change emitted by the explorer.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    /// A node was expanded by user intent.
    Expanded {
        /// Id of the node.
        id: String,
        /// The node as bound at the time.
        node: TreeNode,
    },
    /// A node was collapsed by user intent.
    Collapsed {
        /// Id of the node.
        id: String,
        /// The node as bound at the time.
        node: TreeNode,
    },
    /// An expanded node had no children; the data provider may load them
    /// and supply an updated hierarchy.
    ChildrenRequested {
        /// Id of the node.
        id: String,
    },
    /// The selection changed.
    SelectionChanged(SelectionChange),
    /// A node's loading indicator timed out and was cleared.
    LoadingFinished {
        /// Id of the node.
        id: String,
    },
    /// A context menu action, forwarded with its resolved node.
    MenuAction {
        /// The action as issued.
        action: MenuAction,
        /// The node it refers to.
        node: TreeNode,
    },
    /// A node row was clicked.
    NodeClicked {
        /// The clicked node.
        node: TreeNode,
    },
    /// A node row was double-clicked.
    NodeDoubleClicked {
        /// The clicked node.
        node: TreeNode,
    },
}
