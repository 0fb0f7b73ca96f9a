//! Tree explorer controller.
//!
//! [`TreeExplorer`] binds a hierarchy and a [`TreeConfig`](crate::config::TreeConfig)
//! to a [`TreeStateStore`](crate::state::TreeStateStore), computes the
//! display projection and turns user intents into state changes and
//! [`TreeEvent`]s.
//!
//! # Example
//!
//! ```
//! use canopy::config::{LoadingBehavior, TreeConfig};
//! use canopy::explorer::{TreeEvent, TreeExplorer};
//! use canopy::node::TreeNode;
//!
//! let roots = vec![
//!     TreeNode::new("a")
//!         .child(TreeNode::new("b"))
//!         .child(TreeNode::new("c")),
//! ];
//! let config = TreeConfig::default().with_loading_behavior(LoadingBehavior::disabled());
//! let explorer = TreeExplorer::new(roots, config);
//!
//! let change = explorer.toggle_selection("a").unwrap();
//! assert_eq!(change.selected_ids, vec!["a", "b", "c"]);
//! assert!(matches!(
//!     explorer.drain_events().as_slice(),
//!     [TreeEvent::SelectionChanged(_)]
//! ));
//! ```

mod events;
mod loading;
mod projection;
mod state;

pub use events::*;
pub use projection::*;
pub use state::*;
