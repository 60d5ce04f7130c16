use serde::{Deserialize, Serialize};

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

impl Priority {
    /// True for `Priority::None`; used to omit the field when serializing
    pub fn is_none(&self) -> bool {
        *self == Priority::None
    }
}

/// A single checklist item, forming a tree via ownership of its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    /// Opaque unique identifier, stable for the node's lifetime.
    /// Unique across the entire tree, never reused.
    pub id: String,
    /// User-visible label
    pub text: String,
    /// Completion state, independent per node (no cascading)
    #[serde(default)]
    pub completed: bool,
    /// Whether children are shown; preserved across unrelated edits
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    /// Absent in serialized form means `Priority::None`
    #[serde(default, skip_serializing_if = "Priority::is_none")]
    pub priority: Priority,
    /// Child items (recursive), insertion order significant
    #[serde(default)]
    pub children: Vec<TaskNode>,
}

fn default_expanded() -> bool {
    true
}

impl TaskNode {
    /// Create a new node with the given fields and creation defaults:
    /// not completed, expanded, no children.
    pub fn new(id: impl Into<String>, text: impl Into<String>, priority: Priority) -> Self {
        TaskNode {
            id: id.into(),
            text: text.into(),
            completed: false,
            expanded: true,
            priority,
            children: Vec::new(),
        }
    }
}

/// One row of a bounded preorder flattening (see `ops::preview_flatten`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub id: String,
    pub completed: bool,
    pub text: String,
    /// Nesting depth (0 = top-level)
    pub depth: usize,
}
