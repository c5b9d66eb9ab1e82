//! Task board logic, independent of any presentation.
//!
//! A `TaskBoard` binds at most one `TaskList` at a time and mirrors it as a
//! list of `TaskItem`s carrying per-session completion and search-highlight
//! flags. Completion is never written back item by item: saving progress
//! rewrites the list with only the incomplete tasks, so finished work is
//! dropped from the store.
//!
//! Every user-facing outcome lands in a single notification slot
//! (last write wins). Operations also return their condition so a caller
//! without a status line, like the CLI, can act on it.

use crate::assets::AssetStore;
use crate::error::BoardError;
use crate::task::TaskList;

const INITIAL_NOTIFICATION: &str = "Please load a task list to continue.";

/// One task as shown on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub text: String,
    pub completed: bool,
    pub highlighted: bool,
}

impl TaskItem {
    fn new(text: &str) -> Self {
        TaskItem {
            text: text.to_string(),
            completed: false,
            highlighted: false,
        }
    }
}

/// Observable state of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Unloaded,
    Loaded,
    /// Loaded with an active search query. Highlights only, membership is unchanged.
    Filtered,
}

/// Board session over a persistence collaborator.
#[derive(Debug)]
pub struct TaskBoard<S: AssetStore> {
    assets: S,
    current: Option<TaskList>,
    items: Vec<TaskItem>,
    query: String,
    notification: String,
}

impl<S: AssetStore> TaskBoard<S> {
    pub fn new(assets: S) -> Self {
        TaskBoard {
            assets,
            current: None,
            items: Vec::new(),
            query: String::new(),
            notification: INITIAL_NOTIFICATION.to_string(),
        }
    }

    pub fn items(&self) -> &[TaskItem] {
        &self.items
    }

    /// The bound task list, if any.
    pub fn current(&self) -> Option<&TaskList> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn notification(&self) -> &str {
        &self.notification
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn assets(&self) -> &S {
        &self.assets
    }

    pub fn state(&self) -> BoardState {
        match (&self.current, self.query.is_empty()) {
            (None, _) => BoardState::Unloaded,
            (Some(_), true) => BoardState::Loaded,
            (Some(_), false) => BoardState::Filtered,
        }
    }

    /// Replace the notification. Empty messages are ignored.
    pub fn notify(&mut self, msg: &str) {
        if !msg.is_empty() {
            self.notification = msg.to_string();
        }
    }

    /// Abort an operation: report `err` and hand it back.
    fn fail<T>(&mut self, err: BoardError) -> Result<T, BoardError> {
        self.notify(&err.to_string());
        Err(err)
    }

    /// Bind the task list called `selection` and rebuild the items from it.
    ///
    /// A failed load leaves the board unloaded.
    pub fn load(&mut self, selection: Option<&str>) -> Result<(), BoardError> {
        let Some(name) = selection else {
            self.unbind();
            return self.fail(BoardError::NoStoreSelected);
        };

        let list = match self.assets.load(name) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("failed to load task list '{name}': {e}");
                self.unbind();
                self.notify(&format!("Failed to load task list: {e}"));
                return Err(e.into());
            }
        };

        self.items = list.get_tasks().iter().map(|t| TaskItem::new(t)).collect();
        self.query.clear();
        log::info!("loaded task list '{}'", list.name);
        let msg = format!("{} successfully loaded ({}).", list.name, task_count(list.len()));
        self.current = Some(list);
        self.update_progress();
        self.notify(&msg);
        Ok(())
    }

    fn unbind(&mut self) {
        self.current = None;
        self.items.clear();
        self.query.clear();
    }

    /// Add a task to the board and to the bound list, then flush it.
    ///
    /// Returns `Ok(false)` for blank text, which is ignored without a
    /// notification. On `Ok(true)` the caller should clear its input.
    /// The board only changes once the flush succeeded.
    pub fn add_task(&mut self, text: &str) -> Result<bool, BoardError> {
        let Some(list) = self.current.as_ref() else {
            return self.fail(BoardError::NoStoreLoaded);
        };
        if text.trim().is_empty() {
            return Ok(false);
        }

        let mut updated = list.clone();
        updated.add_task(text);
        self.assets.mark_dirty(&updated);
        self.flush()?;

        self.current = Some(updated);
        self.items.push(TaskItem::new(text));

        log::debug!("added task {text:?}");
        self.update_progress();
        self.notify("Task added successfully.");
        Ok(true)
    }

    /// Flip the completion flag of the item at `index`.
    ///
    /// Returns the new flag, or `None` when the index is out of range.
    pub fn toggle_complete(&mut self, index: usize) -> Option<bool> {
        let item = self.items.get_mut(index)?;
        item.completed = !item.completed;
        let completed = item.completed;
        self.update_progress();
        Some(completed)
    }

    /// Fraction of completed items in `[0, 1]`. An empty board counts as done.
    pub fn compute_progress(&self) -> f64 {
        let total = self.items.len();
        if total == 0 {
            return 1.0;
        }
        let completed = self.items.iter().filter(|i| i.completed).count();
        completed as f64 / total as f64
    }

    /// Progress as a percentage rounded to one decimal place, e.g. `66.7%`.
    pub fn progress_label(&self) -> String {
        format_percent(self.compute_progress())
    }

    fn update_progress(&mut self) {
        if self.current.is_some() && !self.items.is_empty() {
            self.notify("Progress updated. Don't forget to save!");
        }
    }

    /// Rewrite the bound list with only the incomplete tasks and reload it.
    ///
    /// Completed tasks are dropped from the store. Returns how many were pruned.
    /// A failed flush leaves the bound list and the items untouched.
    pub fn save_progress(&mut self) -> Result<usize, BoardError> {
        let Some(list) = self.current.as_ref() else {
            return self.fail(BoardError::NoStoreLoaded);
        };

        let remaining: Vec<String> = self
            .items
            .iter()
            .filter(|i| !i.completed)
            .map(|i| i.text.clone())
            .collect();
        let pruned = self.items.len() - remaining.len();
        let mut pruned_list = list.clone();
        pruned_list.add_tasks(remaining);
        self.assets.mark_dirty(&pruned_list);
        self.flush()?;

        let name = pruned_list.name;
        self.load(Some(&name))?;
        log::info!("saved progress on '{name}', pruned {pruned} completed tasks");
        self.notify("Progress saved successfully.");
        Ok(pruned)
    }

    /// Highlight items whose text contains `query`, ignoring case.
    ///
    /// An empty query clears every highlight. Items are never hidden or
    /// reordered. Returns the number of highlighted items.
    pub fn search(&mut self, query: &str) -> usize {
        if self.current.is_none() {
            return 0;
        }
        self.query = query.to_string();

        let needle = query.to_uppercase();
        let mut matches = 0;
        for item in &mut self.items {
            item.highlighted = !needle.is_empty() && item.text.to_uppercase().contains(&needle);
            if item.highlighted {
                matches += 1;
            }
        }
        matches
    }

    fn flush(&mut self) -> Result<(), BoardError> {
        if let Err(e) = self.assets.flush() {
            log::error!("failed to save task list: {e}");
            self.notify(&format!("Failed to save task list: {e}"));
            return Err(e.into());
        }
        Ok(())
    }
}

fn task_count(n: usize) -> String {
    if n == 1 {
        "1 task".to_string()
    } else {
        format!("{n} tasks")
    }
}

/// Format a `[0, 1]` ratio as a percentage with at most one decimal place.
pub fn format_percent(ratio: f64) -> String {
    format!("{}%", (ratio * 1000.0).round() / 10.0)
}
