//! Ordered task collection and its relocation policy.
//!
//! Positions are the only task identity. Every index-taking method treats an
//! out-of-range index as a caller bug and panics; the TUI keeps its selection
//! in range so these panics are unreachable from user input.

use serde::{Deserialize, Deserializer, Serialize};

use crate::task::Task;

/// The in-memory task list, in render and persisted order.
///
/// Serializes as a bare JSON array; the document wrapper lives in
/// [`crate::db::Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl<'de> Deserialize<'de> for TaskList {
    /// Older data files store an empty list as `null`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tasks = Option::<Vec<Task>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(TaskList { tasks })
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        TaskList { tasks }
    }
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    fn check_index(&self, index: usize, op: &str) {
        assert!(
            index < self.tasks.len(),
            "{op}: index {index} out of range for list of length {}",
            self.tasks.len()
        );
    }

    /// Insert `task` at `index`, shifting later tasks down.
    ///
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, task: Task) {
        assert!(
            index <= self.tasks.len(),
            "insert: index {index} out of range for list of length {}",
            self.tasks.len()
        );
        self.tasks.insert(index, task);
    }

    /// Remove and return the task at `index`.
    pub fn remove(&mut self, index: usize) -> Task {
        self.check_index(index, "remove");
        self.tasks.remove(index)
    }

    /// Overwrite the description at `index`, keeping its done flag.
    pub fn replace(&mut self, index: usize, description: impl Into<String>) {
        self.check_index(index, "replace");
        self.tasks[index].description = description.into();
    }

    /// Flip the done flag at `index` and relocate the task.
    ///
    /// A task that becomes done moves to the end of the list; a task that
    /// becomes open moves to the front. Returns the task's new index.
    pub fn toggle_done(&mut self, index: usize) -> usize {
        self.check_index(index, "toggle_done");
        let mut task = self.tasks.remove(index);
        task.done = !task.done;
        if task.done {
            self.tasks.push(task);
            self.tasks.len() - 1
        } else {
            self.tasks.insert(0, task);
            0
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
