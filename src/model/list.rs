use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::node::TaskNode;

/// A named checklist: an ordered forest of top-level task nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    /// List identifier, unique within a store
    pub id: String,
    /// List title
    pub title: String,
    /// Display color (presentation only, opaque to the engine)
    pub color: String,
    /// Top-level task nodes, in display order
    #[serde(default)]
    pub items: Vec<TaskNode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskList {
    /// Create an empty list with both timestamps set to now
    pub fn new(id: impl Into<String>, title: impl Into<String>, color: impl Into<String>) -> Self {
        let now = Utc::now();
        TaskList {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
