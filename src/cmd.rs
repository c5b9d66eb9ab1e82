//! Command implementations for the CLI interface.
//!
//! Each subcommand drives a `TaskBoard` the same way the interactive window
//! does, then prints the board's notification. Failures are returned to
//! `main`, which reports them and exits non-zero.

use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::assets::{AssetStore, FileAssets};
use crate::board::{TaskBoard, TaskItem};
use crate::catalog::{
    create_task_list, discover_task_lists, most_recent_task_list, sanitize_list_name,
};
use crate::config::Config;
use crate::error::CliError;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new, empty task list.
    New {
        /// Display name of the list.
        name: String,
    },

    /// Show every task list in the data directory.
    Lists,

    /// Print the tasks of a list with its progress.
    Show {
        /// Task list name.
        list: String,
        /// Mark tasks containing this text (case-insensitive).
        #[arg(long)]
        search: Option<String>,
    },

    /// Add one or more tasks to a list.
    Add {
        /// Task list name.
        list: String,
        /// Task texts. Blank entries are ignored.
        #[arg(required = true)]
        tasks: Vec<String>,
    },

    /// Complete tasks by number and save progress, pruning them from the list.
    Done {
        /// Task list name.
        list: String,
        /// 1-based task numbers as printed by `show`.
        #[arg(required = true)]
        indexes: Vec<usize>,
    },

    /// Launch the interactive board.
    Ui {
        /// Task list to open. Defaults to the most recently modified one.
        list: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Map a list argument to an asset name.
///
/// A name shown by `tl lists` is used as is; anything else is sanitised the
/// way `tl new` names its files, so display names work too.
fn resolve_list_name(config: &Config, list: &str) -> Result<String, CliError> {
    let exact = discover_task_lists(&config.data_dir)?
        .into_iter()
        .any(|asset| asset.name == list);
    Ok(if exact {
        list.to_string()
    } else {
        sanitize_list_name(list)
    })
}

/// Open a board over the data directory and load `list` into it.
fn open_board(config: &Config, list: &str) -> Result<TaskBoard<FileAssets>, CliError> {
    let name = resolve_list_name(config, list)?;
    let mut board = TaskBoard::new(FileAssets::new(&config.data_dir));
    board.load(Some(&name))?;
    Ok(board)
}

/// Create a new task list asset.
pub fn cmd_new(config: &Config, name: &str) -> Result<(), CliError> {
    let asset = create_task_list(name, &config.data_dir)?;
    println!(
        "Created task list '{}' at {}",
        asset.name,
        asset.file_path.display()
    );
    Ok(())
}

/// Print all task lists with their size and last change.
pub fn cmd_lists(config: &Config) -> Result<(), CliError> {
    let assets = discover_task_lists(&config.data_dir)?;
    if assets.is_empty() {
        println!(
            "No task lists in {}. Create one with `tl new <name>`.",
            config.data_dir.display()
        );
        return Ok(());
    }

    let store = FileAssets::new(&config.data_dir);
    println!("{:<24} {:>6}  {}", "List", "Tasks", "Modified");
    for asset in assets {
        let count = match store.load(&asset.name) {
            Ok(list) => list.len().to_string(),
            Err(e) => {
                log::warn!("skipping count for {}: {e}", asset.name);
                "?".to_string()
            }
        };
        let modified = asset
            .modified()
            .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".into());
        println!("{:<24} {:>6}  {}", truncate(&asset.name, 24), count, modified);
    }
    Ok(())
}

/// Load a list and print its tasks.
pub fn cmd_show(config: &Config, list: &str, search: Option<String>) -> Result<(), CliError> {
    let mut board = open_board(config, list)?;
    if let Some(query) = search.as_deref() {
        let hits = board.search(query);
        println!("{hits} task(s) match '{query}'");
    }
    print_items(board.items());
    println!("Progress: {}", board.progress_label());
    Ok(())
}

/// Add tasks to a list, flushing after each one.
pub fn cmd_add(config: &Config, list: &str, tasks: Vec<String>) -> Result<(), CliError> {
    let mut board = open_board(config, list)?;
    let mut added = 0;
    for text in &tasks {
        if board.add_task(text)? {
            added += 1;
        } else {
            log::debug!("ignoring blank task");
        }
    }

    if added > 0 {
        println!("{}", board.notification());
    }
    println!("Added {added} task(s) to '{list}' ({} total)", board.items().len());
    Ok(())
}

/// Mark tasks complete by their printed number and save progress.
pub fn cmd_done(config: &Config, list: &str, indexes: Vec<usize>) -> Result<(), CliError> {
    let mut board = open_board(config, list)?;
    let len = board.items().len();

    // Each task is toggled once, however often its number is repeated.
    let indexes: BTreeSet<usize> = indexes.into_iter().collect();
    for &index in &indexes {
        if index == 0 || index > len {
            return Err(CliError::IndexOutOfRange { index, len });
        }
    }
    for &index in &indexes {
        board.toggle_complete(index - 1);
    }
    println!("Progress before saving: {}", board.progress_label());

    let pruned = board.save_progress()?;
    println!("{}", board.notification());
    println!("Removed {pruned} completed task(s), {} remaining", board.items().len());
    Ok(())
}

/// Launch the terminal user interface.
pub fn cmd_ui(config: &Config, list: Option<String>) -> Result<(), CliError> {
    let selection = match list {
        Some(list) => Some(resolve_list_name(config, &list)?),
        None => most_recent_task_list(&config.data_dir)?.map(|asset| asset.name),
    };
    run_tui(&config.data_dir, selection)?;
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Print board items as a numbered checklist. `*` marks search hits.
pub fn print_items(items: &[TaskItem]) {
    if items.is_empty() {
        println!("(no tasks)");
        return;
    }
    for (i, item) in items.iter().enumerate() {
        println!(
            "{:>3}. [{}]{} {}",
            i + 1,
            if item.completed { 'x' } else { ' ' },
            if item.highlighted { '*' } else { ' ' },
            item.text
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
