//! Persistence of the task list.
//!
//! The whole list is stored as one JSON document, `{"list": [...]}`, and is
//! rewritten in full after every change. The [`Store`] trait is the only thing
//! the TUI sees, so the file format can change without touching input handling.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::list::TaskList;

/// On-disk document wrapping the task list.
#[derive(Debug, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub list: TaskList,
}

/// Somewhere the task list can be loaded from and saved to.
pub trait Store {
    /// Load the saved list. A store with nothing saved yields an empty list.
    fn load(&self) -> Result<TaskList, StoreError>;

    /// Replace the saved list with `list`.
    fn save(&mut self, list: &TaskList) -> Result<(), StoreError>;
}

/// JSON file store at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling temp file used for the write-then-rename.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        let mut f = File::create(&tmp)?;
        f.write_all(data)?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

impl Store for JsonStore {
    /// A missing or unreadable file is the first-run state and loads as an
    /// empty list. A file that reads but does not parse, including one that
    /// is not valid UTF-8, is an error.
    fn load(&self) -> Result<TaskList, StoreError> {
        let buf = match fs::read(&self.path) {
            Ok(buf) => buf,
            Err(e) => {
                info!("No data at {} ({e}), starting with an empty list", self.path.display());
                return Ok(TaskList::new());
            }
        };
        let doc: Document = serde_json::from_slice(&buf).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        info!("Loaded {} tasks from {}", doc.list.len(), self.path.display());
        Ok(doc.list)
    }

    fn save(&mut self, list: &TaskList) -> Result<(), StoreError> {
        let doc = DocumentRef { list };
        let data = serde_json::to_string_pretty(&doc)?;
        self.write_atomic(data.as_bytes()).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved {} tasks to {}", list.len(), self.path.display());
        Ok(())
    }
}

/// Borrowing twin of [`Document`] so saving does not clone the list.
#[derive(Serialize)]
struct DocumentRef<'a> {
    list: &'a TaskList,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use tempfile::TempDir;

    fn sample() -> TaskList {
        vec![
            Task::new("write report"),
            Task { description: "call bank".into(), done: true },
            Task::new(""),
        ]
        .into()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("nope.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(dir.path().join("data.json"));
        let list = sample();
        store.save(&list).unwrap();
        assert_eq!(store.load().unwrap(), list);
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(dir.path().join("data.json"));
        store.save(&sample()).unwrap();
        let shorter: TaskList = vec![Task::new("only")].into();
        store.save(&shorter).unwrap();
        assert_eq!(store.load().unwrap(), shorter);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::new(dir.path().join("nested/deeper/data.json"));
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap().len(), 3);
    }

    #[test]
    fn test_document_field_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut store = JsonStore::new(&path);
        store.save(&vec![Task::new("a")].into()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "list": [{ "Desc": "a", "Done": false }] }));
    }

    #[test]
    fn test_reads_legacy_documents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let store = JsonStore::new(&path);

        fs::write(&path, r#"{"list":null}"#).unwrap();
        assert!(store.load().unwrap().is_empty());

        fs::write(&path, r#"{}"#).unwrap();
        assert!(store.load().unwrap().is_empty());

        fs::write(&path, r#"{"list":[{"Desc":"x","Done":true},{"Desc":"y","Done":false}]}"#)
            .unwrap();
        let list = store.load().unwrap();
        assert_eq!(list.get(0), Some(&Task { description: "x".into(), done: true }));
        assert_eq!(list.get(1), Some(&Task::new("y")));
    }

    #[test]
    fn test_any_key_casing_loads_and_survives_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"list":[{"DESC":"keep me","done":true},null]}"#).unwrap();

        let mut store = JsonStore::new(&path);
        let mut list = store.load().unwrap();
        assert_eq!(list.get(0), Some(&Task { description: "keep me".into(), done: true }));
        assert_eq!(list.get(1), Some(&Task::default()));

        list.insert(0, Task::new("new"));
        store.save(&list).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("keep me"));
    }

    #[test]
    fn test_malformed_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"list\": [").unwrap();
        let err = JsonStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn test_invalid_utf8_is_corrupt_and_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut bytes = br#"{"list":[{"Desc":"caf"#.to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(br#"","Done":false},{"Desc":"keep me","Done":true}]}"#);
        fs::write(&path, &bytes).unwrap();

        let store = JsonStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_wrong_shape_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"list":[{"Desc":5}]}"#).unwrap();
        assert!(matches!(JsonStore::new(&path).load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        // A regular file cannot be a parent directory.
        let mut store = JsonStore::new(blocker.join("data.json"));
        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
    }
}
