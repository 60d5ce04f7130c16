//! Pure structural edits over a task forest.
//!
//! Every operation takes the forest by value and returns the new forest.
//! Ownership is exclusive, so callers holding the returned value observe
//! a fresh tree per edit; nothing here keeps state between calls.
//! A target id that is not present anywhere in the forest is a silent
//! no-op, never an error: a stale id (e.g. an edit racing a delete) is
//! reachable in normal operation.
//!
//! Ids are assumed unique across the whole forest; with duplicates the
//! preorder first match wins, but that situation is a caller bug.

use crate::model::node::{FlatEntry, Priority, TaskNode};

// ---------------------------------------------------------------------------
// Core operations
// ---------------------------------------------------------------------------

/// Apply `f` to the node with the given id, wherever it sits in the forest.
///
/// Preorder depth-first search; descent stops once the target is found.
/// `f` must not alter the node's `id` or `children`; use `add_child` /
/// `delete_node` for structural changes.
pub fn transform<F>(mut forest: Vec<TaskNode>, target_id: &str, f: F) -> Vec<TaskNode>
where
    F: FnOnce(&mut TaskNode),
{
    if let Some(node) = find_node_mut(&mut forest, target_id) {
        f(node);
    }
    forest
}

/// Remove the node with the given id (and its entire subtree) from any
/// depth of the forest. Children are discarded along with the node, not
/// promoted to the parent.
pub fn delete_node(forest: Vec<TaskNode>, target_id: &str) -> Vec<TaskNode> {
    forest
        .into_iter()
        .filter(|node| node.id != target_id)
        .map(|mut node| {
            node.children = delete_node(std::mem::take(&mut node.children), target_id);
            node
        })
        .collect()
}

/// Append `child` to the children of the node with id `parent_id`, and
/// expand that node so the new child is visible. If the parent is not
/// found the forest is returned unchanged and `child` is dropped.
///
/// `child.id` must be unique across the entire forest; the engine does
/// not generate or validate ids (the store uses UUIDs for this).
pub fn add_child(mut forest: Vec<TaskNode>, parent_id: &str, child: TaskNode) -> Vec<TaskNode> {
    if let Some(parent) = find_node_mut(&mut forest, parent_id) {
        parent.expanded = true;
        parent.children.push(child);
    }
    forest
}

// ---------------------------------------------------------------------------
// Single-field edits
// ---------------------------------------------------------------------------

/// Flip the completion state of one node. Parent/child completion is
/// independent; nothing cascades.
pub fn toggle_completed(forest: Vec<TaskNode>, target_id: &str) -> Vec<TaskNode> {
    transform(forest, target_id, |node| node.completed = !node.completed)
}

/// Replace a node's label.
pub fn rename(forest: Vec<TaskNode>, target_id: &str, text: impl Into<String>) -> Vec<TaskNode> {
    let text = text.into();
    transform(forest, target_id, |node| node.text = text)
}

/// Set a node's priority.
pub fn set_priority(forest: Vec<TaskNode>, target_id: &str, priority: Priority) -> Vec<TaskNode> {
    transform(forest, target_id, |node| node.priority = priority)
}

/// Expand or collapse a node.
pub fn set_expanded(forest: Vec<TaskNode>, target_id: &str, expanded: bool) -> Vec<TaskNode> {
    transform(forest, target_id, |node| node.expanded = expanded)
}

// ---------------------------------------------------------------------------
// Read-only traversals
// ---------------------------------------------------------------------------

/// Preorder flattening of at most `limit` nodes total, recording each
/// node's depth (0 = top-level). Traversal descends into a node's
/// children immediately after emitting it and stops scanning entirely
/// once `limit` entries have been collected, so a large tree is never
/// walked past the bound. Collapsed nodes are descended into; the
/// preview reflects the data, not the view state.
pub fn preview_flatten(forest: &[TaskNode], limit: usize) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    flatten_into(forest, 0, limit, &mut out);
    out
}

fn flatten_into(nodes: &[TaskNode], depth: usize, limit: usize, out: &mut Vec<FlatEntry>) {
    for node in nodes {
        if out.len() >= limit {
            return;
        }
        out.push(FlatEntry {
            id: node.id.clone(),
            completed: node.completed,
            text: node.text.clone(),
            depth,
        });
        flatten_into(&node.children, depth + 1, limit, out);
    }
}

/// Find a node by id anywhere in the forest (preorder, first match).
pub fn find_node<'a>(forest: &'a [TaskNode], target_id: &str) -> Option<&'a TaskNode> {
    for node in forest {
        if node.id == target_id {
            return Some(node);
        }
        if let Some(found) = find_node(&node.children, target_id) {
            return Some(found);
        }
    }
    None
}

fn find_node_mut<'a>(forest: &'a mut [TaskNode], target_id: &str) -> Option<&'a mut TaskNode> {
    for node in forest.iter_mut() {
        if node.id == target_id {
            return Some(node);
        }
        if let Some(found) = find_node_mut(&mut node.children, target_id) {
            return Some(found);
        }
    }
    None
}

/// Total node count across all depths.
pub fn node_count(forest: &[TaskNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + node_count(&node.children))
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
