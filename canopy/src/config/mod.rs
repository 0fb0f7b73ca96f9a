//! Tree configuration
//!
//! [`TreeConfig`] describes how generic node attributes are interpreted:
//! which attribute holds the label, how icons and categories are resolved,
//! which categories may be selected, and how expansion shows loading.

mod disabled;
mod icons;
mod loading;
mod menu;

pub use disabled::*;
pub use icons::*;
pub use loading::*;
pub use menu::*;

use std::sync::Arc;

use serde::Deserialize;

use crate::error::LoadError;
use crate::node::TreeNode;

/// Resolves a display string (icon, category) from a node.
pub type NodeResolver = Arc<dyn Fn(&TreeNode) -> String + Send + Sync>;

/// Attribute keys probed for a category when none is configured.
pub const CATEGORY_FALLBACK_KEYS: [&str; 3] = ["type", "nodeType", "kind"];

/// Configuration for interpreting a hierarchy.
///
/// Data fields deserialize from JSON; resolver and matcher closures are
/// attached with the builder methods.
///
/// # Example
///
/// ```
/// use canopy::config::{DisabledType, TreeConfig};
///
/// let config = TreeConfig::default()
///     .with_label_property("title")
///     .with_disabled_type(DisabledType::new("archive", "Archives are read-only"))
///     .with_preselected_nodes(["readme"]);
///
/// assert_eq!(config.label_property, "title");
/// ```
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Attribute holding the node label.
    ///
    /// Default: `"name"`
    pub label_property: String,

    /// Attribute holding the icon category.
    ///
    /// Default: `Some("type")`
    pub icon_property: Option<String>,

    /// Custom icon resolver; takes precedence over `icon_property`.
    #[serde(skip)]
    pub icon_resolver: Option<NodeResolver>,

    /// Attribute holding the selectability category.
    ///
    /// When unset, [`CATEGORY_FALLBACK_KEYS`] are probed in order.
    pub category_property: Option<String>,

    /// Custom category resolver; takes precedence over `category_property`.
    #[serde(skip)]
    pub category_resolver: Option<NodeResolver>,

    /// Allow-list of selectable categories. When present and non-empty it
    /// alone governs selectability.
    pub selectable_types: Option<Vec<String>>,

    /// Deny-list of categories with reasons. Consulted only without an
    /// allow-list; the first matching entry wins.
    pub disabled_types: Vec<DisabledType>,

    /// Ids to select when a session starts.
    pub preselected_nodes: Vec<String>,

    /// Whether checkboxes are rendered.
    ///
    /// Default: true
    pub show_checkboxes: bool,

    /// Whether the context menu is offered.
    ///
    /// Default: true
    pub show_context_menu: bool,

    /// Context menu entries.
    ///
    /// Default: rename, delete, properties
    pub context_menu_items: Vec<ContextMenuItem>,

    /// Loading indicator behavior on expand.
    pub loading_behavior: LoadingBehavior,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            label_property: "name".to_string(),
            icon_property: Some("type".to_string()),
            icon_resolver: None,
            category_property: None,
            category_resolver: None,
            selectable_types: None,
            disabled_types: Vec::new(),
            preselected_nodes: Vec::new(),
            show_checkboxes: true,
            show_context_menu: true,
            context_menu_items: default_context_menu(),
            loading_behavior: LoadingBehavior::default(),
        }
    }
}

impl TreeConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the data portion of a config from JSON.
    ///
    /// Missing keys take their default values.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    /// Sets the label attribute.
    pub fn with_label_property(mut self, key: impl Into<String>) -> Self {
        self.label_property = key.into();
        self
    }

    /// Sets the icon attribute.
    pub fn with_icon_property(mut self, key: impl Into<String>) -> Self {
        self.icon_property = Some(key.into());
        self
    }

    /// Sets a custom icon resolver.
    pub fn with_icon_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&TreeNode) -> String + Send + Sync + 'static,
    {
        self.icon_resolver = Some(Arc::new(resolver));
        self
    }

    /// Sets the category attribute.
    pub fn with_category_property(mut self, key: impl Into<String>) -> Self {
        self.category_property = Some(key.into());
        self
    }

    /// Sets a custom category resolver.
    pub fn with_category_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&TreeNode) -> String + Send + Sync + 'static,
    {
        self.category_resolver = Some(Arc::new(resolver));
        self
    }

    /// Sets the allow-list of selectable categories.
    pub fn with_selectable_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selectable_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the deny-list.
    pub fn with_disabled_types(mut self, types: Vec<DisabledType>) -> Self {
        self.disabled_types = types;
        self
    }

    /// Appends a deny-list entry.
    pub fn with_disabled_type(mut self, disabled: DisabledType) -> Self {
        self.disabled_types.push(disabled);
        self
    }

    /// Sets the ids selected at session start.
    pub fn with_preselected_nodes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preselected_nodes = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the loading behavior.
    pub fn with_loading_behavior(mut self, behavior: LoadingBehavior) -> Self {
        self.loading_behavior = behavior;
        self
    }

    /// Replaces the context menu entries.
    pub fn with_context_menu_items(mut self, items: Vec<ContextMenuItem>) -> Self {
        self.context_menu_items = items;
        self
    }

    /// Shows or hides checkboxes.
    pub fn with_show_checkboxes(mut self, show: bool) -> Self {
        self.show_checkboxes = show;
        self
    }

    /// Shows or hides the context menu.
    pub fn with_show_context_menu(mut self, show: bool) -> Self {
        self.show_context_menu = show;
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the node's label, falling back to its id.
    pub fn label<'a>(&self, node: &'a TreeNode) -> &'a str {
        node.get_str(&self.label_property)
            .filter(|label| !label.is_empty())
            .unwrap_or(node.id.as_str())
    }

    /// Returns the node's label attribute when it is a string.
    pub fn search_label<'a>(&self, node: &'a TreeNode) -> Option<&'a str> {
        node.get_str(&self.label_property)
    }

    /// Resolves the node's icon name.
    pub fn icon(&self, node: &TreeNode) -> String {
        if let Some(resolver) = &self.icon_resolver {
            return resolver(node);
        }
        if let Some(key) = &self.icon_property
            && let Some(value) = node.get_text(key)
            && !value.is_empty()
        {
            return default_icon(&value).to_string();
        }
        if node.has_children() {
            FOLDER_ICON.to_string()
        } else {
            FALLBACK_ICON.to_string()
        }
    }

    /// Resolves the node's category tag.
    pub fn category(&self, node: &TreeNode) -> String {
        if let Some(resolver) = &self.category_resolver {
            return resolver(node);
        }
        if let Some(key) = &self.category_property {
            if let Some(value) = node.get_text(key) {
                return value;
            }
        } else if let Some(value) = CATEGORY_FALLBACK_KEYS
            .iter()
            .find_map(|key| node.get_text(key))
        {
            return value;
        }
        if node.has_children() {
            "folder".to_string()
        } else {
            "file".to_string()
        }
    }

    /// Returns `true` when an allow-list is configured.
    pub fn has_allow_list(&self) -> bool {
        self.selectable_types
            .as_ref()
            .is_some_and(|types| !types.is_empty())
    }

    /// Returns `true` when both lists are configured; the deny-list is then
    /// ignored.
    pub fn has_conflicting_selectability(&self) -> bool {
        self.has_allow_list() && !self.disabled_types.is_empty()
    }

    /// Decides whether `node` may be newly selected.
    pub fn selectability(&self, node: &TreeNode) -> Selectability {
        let category = self.category(node);

        if let Some(types) = &self.selectable_types
            && !types.is_empty()
        {
            if types.iter().any(|t| *t == category) {
                return Selectability::Selectable;
            }
            let reason = self
                .first_disabled_match(node, &category)
                .map(|d| d.reason.clone())
                .unwrap_or_else(|| format!("{} items cannot be selected", category));
            return Selectability::Disabled { reason };
        }

        match self.first_disabled_match(node, &category) {
            Some(disabled) => Selectability::Disabled {
                reason: disabled.reason.clone(),
            },
            None => Selectability::Selectable,
        }
    }

    /// Returns `true` if `node` may be newly selected.
    pub fn is_selectable(&self, node: &TreeNode) -> bool {
        self.selectability(node).is_selectable()
    }

    fn first_disabled_match(&self, node: &TreeNode, category: &str) -> Option<&DisabledType> {
        self.disabled_types
            .iter()
            .find(|disabled| disabled.matches(node, category))
    }
}

impl std::fmt::Debug for TreeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeConfig")
            .field("label_property", &self.label_property)
            .field("icon_property", &self.icon_property)
            .field("icon_resolver", &self.icon_resolver.is_some())
            .field("category_property", &self.category_property)
            .field("category_resolver", &self.category_resolver.is_some())
            .field("selectable_types", &self.selectable_types)
            .field("disabled_types", &self.disabled_types)
            .field("preselected_nodes", &self.preselected_nodes)
            .field("show_checkboxes", &self.show_checkboxes)
            .field("show_context_menu", &self.show_context_menu)
            .field("context_menu_items", &self.context_menu_items)
            .field("loading_behavior", &self.loading_behavior)
            .finish()
    }
}
