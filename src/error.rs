//! Error types shared by the store, the board and the command layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading or writing task-list assets.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No asset with this name exists in the data directory.
    #[error("task list '{0}' not found")]
    NotFound(String),

    /// An asset with this name already exists.
    #[error("task list '{0}' already exists")]
    AlreadyExists(String),

    /// The name is empty once sanitised.
    #[error("invalid task list name '{0}'")]
    InvalidName(String),

    /// Underlying file system error.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The asset exists but is not a valid task list document.
    #[error("malformed task list {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Conditions reported by board operations.
///
/// None of these are fatal: the board aborts the requested operation and
/// writes the message into its notification slot before returning.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A load was requested with nothing selected.
    #[error("Failed to load task list.")]
    NoStoreSelected,

    /// An add or save was requested while no list is bound.
    #[error("No task list loaded. Please load a task list to continue.")]
    NoStoreLoaded,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while resolving runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures surfaced by the command line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("UI error: {0}")]
    Ui(#[from] io::Error),

    #[error("task {index} is out of range (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_messages() {
        assert_eq!(BoardError::NoStoreSelected.to_string(), "Failed to load task list.");
        assert!(BoardError::NoStoreLoaded.to_string().starts_with("No task list loaded"));
    }

    #[test]
    fn test_store_error_is_transparent_in_board_error() {
        let err: BoardError = StoreError::NotFound("chores".into()).into();
        assert_eq!(err.to_string(), "task list 'chores' not found");
    }

    #[test]
    fn test_cli_error_messages() {
        let err = CliError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "task 4 is out of range (list has 2 tasks)");

        let err: CliError = BoardError::NoStoreSelected.into();
        assert_eq!(err.to_string(), "Failed to load task list.");
    }
}
