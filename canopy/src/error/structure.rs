//! Structural warnings raised while binding a hierarchy

/// Non-fatal problems found in a caller-supplied hierarchy.
///
/// The explorer keeps operating when these are reported; the projection may
/// be degraded but the store invariants still hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralWarning {
    /// An id appears again on its own ancestor path.
    #[error("Circular reference: node {id} is its own ancestor")]
    Cycle {
        /// The id that was revisited.
        id: String,
    },

    /// An id is used by more than one node.
    #[error("Duplicate node id: {id}")]
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}
