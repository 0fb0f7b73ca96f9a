//! Tree node envelope

use std::collections::HashMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

use crate::error::LoadError;

/// A node in a caller-supplied hierarchy.
///
/// Nodes carry a stable `id`, an ordered list of owned children and an
/// open attribute bag. Attributes such as the label or the type tag are read
/// through [`TreeConfig`](crate::config::TreeConfig) accessors rather than
/// fixed fields, so any JSON-shaped item can be displayed.
///
/// # Example
///
/// ```
/// use canopy::node::TreeNode;
///
/// let docs = TreeNode::new("docs")
///     .set("name", "Documents")
///     .set("type", "folder")
///     .child(TreeNode::new("report").set("name", "Report.pdf"));
///
/// assert_eq!(docs.get_str("name"), Some("Documents"));
/// assert!(!docs.is_leaf());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique identifier across the whole hierarchy.
    pub id: String,

    /// Ordered children. Empty for leaves; `null` in JSON reads as empty.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<TreeNode>,

    /// Additional named attributes (label, type tag, ...).
    #[serde(flatten)]
    pub attributes: HashMap<String, Value>,
}

impl TreeNode {
    /// Creates a leaf node with no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Sets an attribute and returns the node.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Appends a child and returns the node.
    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several children and returns the node.
    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if the node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the raw attribute value, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns the attribute as a string slice when it holds a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Returns the attribute rendered as text.
    ///
    /// Strings are returned verbatim; other non-null values use their JSON
    /// representation so numeric or boolean tags still compare predictably.
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Returns a copy of this node without its children.
    pub fn shallow(&self) -> TreeNode {
        TreeNode {
            id: self.id.clone(),
            children: Vec::new(),
            attributes: self.attributes.clone(),
        }
    }
}

/// Parses a hierarchy from JSON.
///
/// Accepts either a single node object or an array of root nodes.
pub fn roots_from_json_str(json: &str) -> Result<Vec<TreeNode>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        other => Err(LoadError::InvalidRoot {
            found: json_kind(&other),
        }),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TreeNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TreeNode>>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
