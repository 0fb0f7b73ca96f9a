//! Selection error types

/// Reasons a selection toggle left the state untouched.
///
/// Both variants are expected outcomes: the engine state is unchanged and no
/// selection event is emitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// The id is not present in the bound hierarchy (stale or unknown id).
    #[error("Node not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The node is not selectable under the current configuration.
    #[error("Node {id} cannot be selected: {reason}")]
    Rejected {
        /// The id of the rejected node.
        id: String,
        /// User-facing reason, suitable for a tooltip.
        reason: String,
    },
}

impl SelectionError {
    /// Creates a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a rejection with the reason to surface.
    pub fn rejected(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Returns the id this error refers to.
    pub fn id(&self) -> &str {
        match self {
            Self::NotFound { id } | Self::Rejected { id, .. } => id,
        }
    }

    /// Returns the disabled reason if this is a rejection.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason),
            Self::NotFound { .. } => None,
        }
    }
}
