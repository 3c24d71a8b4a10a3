//! Task data structure.
//!
//! A task is a description plus a done flag. It has no id of its own: its
//! identity is its position in the [`TaskList`](crate::list::TaskList).

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A single todo item as stored in the data file.
///
/// The serialized field names (`Desc`, `Done`) are shared with existing data
/// files and must not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Task {
    #[serde(rename = "Desc")]
    pub description: String,
    #[serde(rename = "Done")]
    pub done: bool,
}

/// Reads keys the way existing data files were written: `Desc` and `Done`
/// match in any letter case, the last occurrence of a key wins, `null` or a
/// missing key leaves the default, and unknown keys are skipped.
impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TaskVisitor)
    }
}

struct TaskVisitor;

impl<'de> Visitor<'de> for TaskVisitor {
    type Value = Task;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a task object with Desc and Done")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Task, A::Error> {
        let mut task = Task::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("desc") {
                if let Some(description) = map.next_value::<Option<String>>()? {
                    task.description = description;
                }
            } else if key.eq_ignore_ascii_case("done") {
                if let Some(done) = map.next_value::<Option<bool>>()? {
                    task.done = done;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(task)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Task, E> {
        Ok(Task::default())
    }
}

impl Task {
    /// Create an open task with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Task {
            description: description.into(),
            done: false,
        }
    }

    /// Checkbox marker used by both the TUI and `togo list`.
    pub fn marker(&self) -> &'static str {
        if self.done {
            "[x]"
        } else {
            "[ ]"
        }
    }
}
