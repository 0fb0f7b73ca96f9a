//! Context menu configuration

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// An entry in a node's context menu.
///
/// The engine never interprets `action`; it is forwarded with the resolved
/// node in [`TreeEvent::MenuAction`](crate::explorer::TreeEvent::MenuAction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMenuItem {
    /// Stable identifier of the entry.
    pub id: String,
    /// Action string forwarded verbatim.
    pub action: String,
    /// Display label.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Greyed out in the menu.
    #[serde(default)]
    pub disabled: bool,
    /// Rendered as a separator line.
    #[serde(default)]
    pub separator: bool,
}

impl ContextMenuItem {
    /// Creates an enabled menu entry.
    pub fn new(id: impl Into<String>, label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            action: action.into(),
            label: label.into(),
            icon: None,
            disabled: false,
            separator: false,
        }
    }

    /// Sets the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Marks the entry disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// The default rename/delete/properties menu.
pub fn default_context_menu() -> Vec<ContextMenuItem> {
    vec![
        ContextMenuItem::new("rename", "Rename", "rename").with_icon("edit"),
        ContextMenuItem::new("delete", "Delete", "delete").with_icon("delete"),
        ContextMenuItem::new("properties", "Properties", "properties").with_icon("info"),
    ]
}

/// A context menu action issued by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuAction {
    /// The node the menu was opened on.
    pub node_id: String,
    /// The action string of the chosen entry.
    pub action: String,
    /// Optional payload forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl MenuAction {
    /// Creates a menu action without payload.
    pub fn new(node_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            action: action.into(),
            data: None,
        }
    }

    /// Attaches a payload.
    pub fn with_data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}
