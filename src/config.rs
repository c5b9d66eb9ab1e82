//! Runtime configuration.
//!
//! The only setting is where task lists live. It comes from `--dir`, then
//! `TASK_LIST_DIR` (both handled by clap), then `$HOME/.task_list`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Directory name used under `$HOME` when no directory is given.
pub const DEFAULT_DIR_NAME: &str = ".task_list";

/// Resolved configuration for one run of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory and make sure it exists.
    pub fn resolve(dir: Option<&Path>) -> Result<Self, ConfigError> {
        let data_dir = match dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir(std::env::var_os("HOME").map(PathBuf::from)),
        };

        fs::create_dir_all(&data_dir).map_err(|source| ConfigError::DataDir {
            path: data_dir.clone(),
            source,
        })?;
        log::debug!("using data directory {}", data_dir.display());

        Ok(Config { data_dir })
    }
}

fn default_data_dir(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_else(|| PathBuf::from(".")).join(DEFAULT_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_dir_is_created() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("lists");
        let config = Config::resolve(Some(&dir)).unwrap();
        assert_eq!(config.data_dir, dir);
        assert!(dir.is_dir());
    }

    #[test]
    fn test_default_data_dir() {
        assert_eq!(
            default_data_dir(Some(PathBuf::from("/home/ada"))),
            PathBuf::from("/home/ada/.task_list")
        );
        assert_eq!(default_data_dir(None), PathBuf::from("./.task_list"));
    }

    #[test]
    fn test_unusable_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain_file");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            Config::resolve(Some(&file.join("sub"))),
            Err(ConfigError::DataDir { .. })
        ));
    }
}
