//! Loading error types

/// Errors that can occur while parsing hierarchies or configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input was not valid JSON or did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value was neither a node object nor an array of nodes.
    #[error("Invalid hierarchy root: expected object or array, found {found}")]
    InvalidRoot {
        /// The JSON kind that was found instead.
        found: &'static str,
    },
}
