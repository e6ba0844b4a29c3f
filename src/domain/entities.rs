//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque domain payload carried by field nodes.
///
/// The engine never interprets it; a node with a payload is a "field",
/// a node without one is a pure grouping node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPayload {
    /// Machine key of the field, e.g. a column name
    pub key: String,
    /// Optional group tag from the source definition
    pub group: Option<String>,
}

/// Data stored for every node of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Globally unique identifier
    pub id: String,
    /// Display string
    pub label: String,
    pub payload: Option<FieldPayload>,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Tree node definition as supplied by the caller (e.g. parsed from TOML).
///
/// ```toml
/// [[nodes]]
/// id = "basic"
/// label = "Basic information"
///
///   [[nodes.children]]
///   id = "name"
///   label = "Name"
///   key = "name"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDef {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDef>,
}

impl NodeDef {
    /// Grouping node without payload.
    pub fn group(id: impl Into<String>, label: impl Into<String>, children: Vec<NodeDef>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            key: None,
            group: None,
            children,
        }
    }

    /// Field node carrying a payload keyed by `key`.
    pub fn field(id: impl Into<String>, label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            key: Some(key.into()),
            group: None,
            children: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Split into node data; a payload exists iff `key` is set.
    pub(crate) fn to_data(&self) -> NodeData {
        NodeData {
            id: self.id.clone(),
            label: self.label.clone(),
            payload: self.key.as_ref().map(|key| FieldPayload {
                key: key.clone(),
                group: self.group.clone(),
            }),
        }
    }
}

/// Top-level document of a tree definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeDefinition {
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

impl TreeDefinition {
    /// Parse a TOML tree definition.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Displayed checkbox state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckState {
    Checked,
    Indeterminate,
    Unchecked,
}

impl CheckState {
    /// Checkbox marker used in terminal rendering.
    pub fn marker(self) -> &'static str {
        match self {
            CheckState::Checked => "[x]",
            CheckState::Indeterminate => "[-]",
            CheckState::Unchecked => "[ ]",
        }
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckState::Checked => "checked",
            CheckState::Indeterminate => "indeterminate",
            CheckState::Unchecked => "unchecked",
        };
        write!(f, "{s}")
    }
}

/// A selected field, materialized in tree order when the selection is confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetail {
    pub id: String,
    pub label: String,
    pub payload: FieldPayload,
}
