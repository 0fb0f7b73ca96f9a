//! Selectability rules

use std::sync::Arc;

use serde::Deserialize;

use crate::node::TreeNode;

/// Custom predicate deciding whether a deny-list entry applies to a node.
pub type NodeMatcher = Arc<dyn Fn(&TreeNode) -> bool + Send + Sync>;

/// A deny-list entry: nodes of `category` cannot be selected, for `reason`.
///
/// When a `matcher` is set it replaces the category comparison.
#[derive(Clone, Deserialize)]
pub struct DisabledType {
    /// Category value this entry disables.
    pub category: String,
    /// User-facing reason, surfaced as a tooltip or error.
    pub reason: String,
    /// Optional custom matcher.
    #[serde(skip)]
    pub matcher: Option<NodeMatcher>,
}

impl DisabledType {
    /// Creates an entry matching on category equality.
    pub fn new(category: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            reason: reason.into(),
            matcher: None,
        }
    }

    /// Replaces the category comparison with a custom matcher.
    pub fn with_matcher<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&TreeNode) -> bool + Send + Sync + 'static,
    {
        self.matcher = Some(Arc::new(matcher));
        self
    }

    /// Returns `true` if this entry applies to `node` with resolved `category`.
    pub fn matches(&self, node: &TreeNode, category: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher(node),
            None => self.category == category,
        }
    }
}

impl std::fmt::Debug for DisabledType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisabledType")
            .field("category", &self.category)
            .field("reason", &self.reason)
            .field("matcher", &self.matcher.is_some())
            .finish()
    }
}

/// Whether a node may be newly selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selectability {
    /// The node can be selected.
    Selectable,
    /// The node cannot be selected.
    Disabled {
        /// Why, for tooltips and rejection errors.
        reason: String,
    },
}

impl Selectability {
    /// Returns `true` for [`Selectability::Selectable`].
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Selectable)
    }

    /// Returns the disabled reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Selectable => None,
            Self::Disabled { reason } => Some(reason),
        }
    }
}
