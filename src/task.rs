//! Task list data structure.
//!
//! A `TaskList` is the persisted, ordered sequence of task texts behind a
//! board. It performs no validation of its own; callers decide what is
//! worth storing.

use serde::{Deserialize, Serialize};

/// An ordered list of task strings stored as a named asset.
///
/// Duplicate texts are allowed and are distinct positional entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    /// Asset name, taken from the file name rather than the document.
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    tasks: Vec<String>,
}

impl TaskList {
    /// Create an empty task list with the given asset name.
    pub fn new(name: &str) -> Self {
        TaskList {
            name: name.to_string(),
            tasks: Vec::new(),
        }
    }

    /// Current task texts in insertion order.
    pub fn get_tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Append a single task to the end of the list.
    pub fn add_task(&mut self, text: &str) {
        self.tasks.push(text.to_string());
    }

    /// Replace the whole list with `texts`. This overwrites, it does not merge.
    pub fn add_tasks(&mut self, texts: Vec<String>) {
        self.tasks = texts;
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
