use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed task list board.
/// Lists are stored under ~/.task_list or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "tl", version, about = "Load a task list, tick tasks off, save progress")]
pub struct Cli {
    /// Directory holding the task list files.
    #[arg(long, global = true, env = "TASK_LIST_DIR")]
    pub dir: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
