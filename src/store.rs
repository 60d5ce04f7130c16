use chrono::Utc;
use indexmap::IndexMap;
use uuid::Uuid;

use crate::model::list::TaskList;
use crate::model::node::{FlatEntry, Priority, TaskNode};
use crate::ops;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("list not found: {0}")]
    ListNotFound(String),
}

/// In-memory collection of task lists. Each user action maps to exactly
/// one tree-editor call: the store takes the list's current forest,
/// applies the operation, commits the returned forest and bumps
/// `updated_at`.
///
/// Node ids inside a list are UUIDs generated here, so uniqueness across
/// the entire tree holds by construction. Addressing a node id that no
/// longer exists is a silent no-op (the commit still happens against the
/// unchanged forest, timestamps included); addressing a missing *list*
/// is an error. Actions on the same list must be applied in user-action
/// order; the store offers no cross-call serialization.
#[derive(Debug, Default)]
pub struct ListStore {
    lists: IndexMap<String, TaskList>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-loaded lists, keyed by list id.
    /// Insertion order is preserved.
    pub fn from_lists(lists: Vec<TaskList>) -> Self {
        ListStore {
            lists: lists.into_iter().map(|l| (l.id.clone(), l)).collect(),
        }
    }

    /// The lists in insertion order.
    pub fn lists(&self) -> impl Iterator<Item = &TaskList> {
        self.lists.values()
    }

    pub fn get(&self, list_id: &str) -> Option<&TaskList> {
        self.lists.get(list_id)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    // -----------------------------------------------------------------------
    // List CRUD
    // -----------------------------------------------------------------------

    /// Create an empty list and return its id.
    pub fn create_list(&mut self, title: impl Into<String>, color: impl Into<String>) -> String {
        let id = new_id();
        self.lists
            .insert(id.clone(), TaskList::new(id.clone(), title, color));
        id
    }

    /// Remove a list and everything in it.
    pub fn delete_list(&mut self, list_id: &str) -> Result<TaskList, StoreError> {
        self.lists
            .shift_remove(list_id)
            .ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))
    }

    pub fn rename_list(&mut self, list_id: &str, title: impl Into<String>) -> Result<(), StoreError> {
        let list = self.get_mut(list_id)?;
        list.title = title.into();
        list.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_list_color(
        &mut self,
        list_id: &str,
        color: impl Into<String>,
    ) -> Result<(), StoreError> {
        let list = self.get_mut(list_id)?;
        list.color = color.into();
        list.updated_at = Utc::now();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Per-node actions (one editor call each)
    // -----------------------------------------------------------------------

    /// Append a new top-level item and return its id.
    pub fn add_item(
        &mut self,
        list_id: &str,
        text: impl Into<String>,
        priority: Priority,
    ) -> Result<String, StoreError> {
        let id = new_id();
        let node = TaskNode::new(id.clone(), text, priority);
        self.commit(list_id, |mut items| {
            items.push(node);
            items
        })?;
        Ok(id)
    }

    /// Append a new child under `parent_id` and return its id. If the
    /// parent id is stale the list is left unchanged and the id returned
    /// refers to nothing.
    pub fn add_child_item(
        &mut self,
        list_id: &str,
        parent_id: &str,
        text: impl Into<String>,
        priority: Priority,
    ) -> Result<String, StoreError> {
        let id = new_id();
        let child = TaskNode::new(id.clone(), text, priority);
        self.commit(list_id, |items| ops::add_child(items, parent_id, child))?;
        Ok(id)
    }

    pub fn toggle_item(&mut self, list_id: &str, item_id: &str) -> Result<(), StoreError> {
        self.commit(list_id, |items| ops::toggle_completed(items, item_id))
    }

    pub fn rename_item(
        &mut self,
        list_id: &str,
        item_id: &str,
        text: impl Into<String>,
    ) -> Result<(), StoreError> {
        let text = text.into();
        self.commit(list_id, |items| ops::rename(items, item_id, text))
    }

    pub fn set_item_priority(
        &mut self,
        list_id: &str,
        item_id: &str,
        priority: Priority,
    ) -> Result<(), StoreError> {
        self.commit(list_id, |items| ops::set_priority(items, item_id, priority))
    }

    pub fn set_item_expanded(
        &mut self,
        list_id: &str,
        item_id: &str,
        expanded: bool,
    ) -> Result<(), StoreError> {
        self.commit(list_id, |items| ops::set_expanded(items, item_id, expanded))
    }

    pub fn delete_item(&mut self, list_id: &str, item_id: &str) -> Result<(), StoreError> {
        self.commit(list_id, |items| ops::delete_node(items, item_id))
    }

    /// Bounded preorder summary of a list, at most `limit` rows.
    pub fn preview(&self, list_id: &str, limit: usize) -> Result<Vec<FlatEntry>, StoreError> {
        let list = self
            .lists
            .get(list_id)
            .ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))?;
        Ok(ops::preview_flatten(&list.items, limit))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn get_mut(&mut self, list_id: &str) -> Result<&mut TaskList, StoreError> {
        self.lists
            .get_mut(list_id)
            .ok_or_else(|| StoreError::ListNotFound(list_id.to_string()))
    }

    /// Take a list's forest, run one editor operation, commit the result.
    fn commit<F>(&mut self, list_id: &str, op: F) -> Result<(), StoreError>
    where
        F: FnOnce(Vec<TaskNode>) -> Vec<TaskNode>,
    {
        let list = self.get_mut(list_id)?;
        let items = std::mem::take(&mut list.items);
        list.items = op(items);
        list.updated_at = Utc::now();
        Ok(())
    }
}

/// Collision-resistant random identifier for lists and nodes.
fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{find_node, node_count};

    fn store_with_list() -> (ListStore, String) {
        let mut store = ListStore::new();
        let list_id = store.create_list("Groceries", "green");
        (store, list_id)
    }

    #[test]
    fn create_and_delete_list() {
        let (mut store, list_id) = store_with_list();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&list_id).unwrap().title, "Groceries");

        let removed = store.delete_list(&list_id).unwrap();
        assert_eq!(removed.id, list_id);
        assert!(store.is_empty());
    }

    #[test]
    fn missing_list_is_an_error() {
        let mut store = ListStore::new();
        assert!(matches!(
            store.toggle_item("nope", "whatever"),
            Err(StoreError::ListNotFound(_))
        ));
    }

    #[test]
    fn add_item_appends_in_order() {
        let (mut store, list_id) = store_with_list();
        let first = store.add_item(&list_id, "Milk", Priority::None).unwrap();
        let second = store.add_item(&list_id, "Eggs", Priority::High).unwrap();
        assert_ne!(first, second);

        let items = &store.get(&list_id).unwrap().items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, first);
        assert_eq!(items[1].id, second);
        assert_eq!(items[1].priority, Priority::High);
        assert!(!items[0].completed);
        assert!(items[0].expanded);
    }

    #[test]
    fn add_child_item_nests_and_expands() {
        let (mut store, list_id) = store_with_list();
        let parent = store.add_item(&list_id, "Dinner", Priority::None).unwrap();
        store.set_item_expanded(&list_id, &parent, false).unwrap();

        let child = store
            .add_child_item(&list_id, &parent, "Buy pasta", Priority::Low)
            .unwrap();

        let list = store.get(&list_id).unwrap();
        let parent_node = find_node(&list.items, &parent).unwrap();
        assert!(parent_node.expanded);
        assert_eq!(parent_node.children.len(), 1);
        assert_eq!(parent_node.children[0].id, child);
    }

    #[test]
    fn stale_node_id_is_a_silent_noop() {
        let (mut store, list_id) = store_with_list();
        store.add_item(&list_id, "Milk", Priority::None).unwrap();

        store.toggle_item(&list_id, "stale-id").unwrap();
        store.delete_item(&list_id, "stale-id").unwrap();
        store.rename_item(&list_id, "stale-id", "x").unwrap();

        let list = store.get(&list_id).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].text, "Milk");
        assert!(!list.items[0].completed);
    }

    #[test]
    fn delete_item_removes_subtree() {
        let (mut store, list_id) = store_with_list();
        let parent = store.add_item(&list_id, "Parent", Priority::None).unwrap();
        store
            .add_child_item(&list_id, &parent, "Sub", Priority::None)
            .unwrap();

        assert_eq!(node_count(&store.get(&list_id).unwrap().items), 2);
        store.delete_item(&list_id, &parent).unwrap();
        assert_eq!(node_count(&store.get(&list_id).unwrap().items), 0);
    }

    #[test]
    fn commit_bumps_updated_at() {
        let (mut store, list_id) = store_with_list();
        let created = store.get(&list_id).unwrap().created_at;
        let before = store.get(&list_id).unwrap().updated_at;
        store.add_item(&list_id, "Milk", Priority::None).unwrap();
        let list = store.get(&list_id).unwrap();
        assert!(list.updated_at >= before);
        // created_at is set once and never touched again
        assert_eq!(list.created_at, created);
    }

    #[test]
    fn generated_ids_are_unique() {
        let (mut store, list_id) = store_with_list();
        let mut ids = std::collections::HashSet::new();
        for i in 0..50 {
            let id = store
                .add_item(&list_id, format!("item {}", i), Priority::None)
                .unwrap();
            assert!(ids.insert(id));
        }
    }

    #[test]
    fn preview_is_depth_first_and_bounded() {
        let (mut store, list_id) = store_with_list();
        let parent = store.add_item(&list_id, "Parent", Priority::None).unwrap();
        let child = store
            .add_child_item(&list_id, &parent, "Sub", Priority::None)
            .unwrap();
        store.add_item(&list_id, "Tail", Priority::None).unwrap();

        let rows = store.preview(&list_id, 2).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, parent);
        assert_eq!(rows[0].depth, 0);
        assert_eq!(rows[1].id, child);
        assert_eq!(rows[1].depth, 1);
    }

    #[test]
    fn from_lists_preserves_order() {
        let lists = vec![
            TaskList::new("one", "First", "red"),
            TaskList::new("two", "Second", "blue"),
        ];
        let store = ListStore::from_lists(lists);
        let titles: Vec<&str> = store.lists().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }
}
