//! Hierarchical tree state engine
//!
//! Holds the expansion, tri-state selection and loading state of a tree of
//! generic nodes, and derives the flattened rows a presentation layer draws.
//!
//! - [`node`]: the node envelope and JSON loading
//! - [`config`]: attribute interpretation, selectability and menu settings
//! - [`state`]: the session state and its store
//! - [`utils`]: pure tree algorithms (flatten, find, filter, cascade)
//! - [`explorer`]: the controller tying it together

pub mod config;
pub mod error;
pub mod explorer;
pub mod node;
pub mod state;
pub mod utils;

pub use config::TreeConfig;
pub use explorer::TreeEvent;
pub use explorer::TreeExplorer;
pub use node::TreeNode;
pub use state::SelectionState;
pub use state::TreeStateStore;
