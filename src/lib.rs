//! # TL - Task List Board
//!
//! A small terminal tool for keeping named to-do lists and working through
//! them. A list is loaded into a board, tasks are ticked off during the
//! session, and "saving progress" writes back only the tasks that are still
//! open, so the stored list always holds the remaining work.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a list and fill it
//! tl new "Level Design"
//! tl add level_design "Block out arena" "Place spawn points"
//!
//! # Work through it interactively
//! tl ui level_design
//!
//! # Or from the shell: complete task 1 and prune it
//! tl done level_design 1
//! ```
//!
//! Lists are stored in `~/.task_list/` as `<name>_tasks.json`, or in the
//! directory given by `--dir` / `TASK_LIST_DIR`.
//!
//! ## Layout
//!
//! - [`task`]: the persisted `TaskList`
//! - [`board`]: board operations (load, add, toggle, progress, save, search)
//! - [`assets`]: persistence behind the `AssetStore` trait
//! - [`catalog`]: naming, creating and discovering list files
//! - [`cmd`] and [`tui`]: the command line and interactive front ends

pub mod assets;
pub mod board;
pub mod catalog;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
}
