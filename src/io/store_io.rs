use std::fs;
use std::path::{Path, PathBuf};

use crate::model::list::TaskList;
use crate::store::ListStore;

/// Error type for list-collection file io
#[derive(Debug, thiserror::Error)]
pub enum StoreIoError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize lists: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read a list collection from a JSON file (an array of lists).
pub fn load_lists(path: &Path) -> Result<Vec<TaskList>, StoreIoError> {
    let content = fs::read_to_string(path).map_err(|e| StoreIoError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| StoreIoError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a list collection to a JSON file, pretty-printed.
pub fn save_lists(path: &Path, lists: &[TaskList]) -> Result<(), StoreIoError> {
    let content = serde_json::to_string_pretty(lists)?;
    fs::write(path, content)?;
    Ok(())
}

impl ListStore {
    /// Load a store from a list-collection file.
    pub fn load(path: &Path) -> Result<Self, StoreIoError> {
        Ok(ListStore::from_lists(load_lists(path)?))
    }

    /// Save the store to a list-collection file.
    pub fn save(&self, path: &Path) -> Result<(), StoreIoError> {
        let lists: Vec<TaskList> = self.lists().cloned().collect();
        save_lists(path, &lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::node::Priority;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists.json");

        let mut store = ListStore::new();
        let list_id = store.create_list("Chores", "blue");
        let parent = store.add_item(&list_id, "Clean house", Priority::High).unwrap();
        store
            .add_child_item(&list_id, &parent, "Vacuum", Priority::None)
            .unwrap();
        store.save(&path).unwrap();

        let loaded = ListStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        let original = store.get(&list_id).unwrap();
        let reloaded = loaded.get(&list_id).unwrap();
        assert_eq!(reloaded, original);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = ListStore::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(StoreIoError::ReadError { .. })));
    }

    #[test]
    fn load_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let result = load_lists(&path);
        assert!(matches!(result, Err(StoreIoError::ParseError { .. })));
    }
}
