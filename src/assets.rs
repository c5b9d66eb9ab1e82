//! Persistence of task lists.
//!
//! The board never touches the file system directly. It loads lists through
//! an `AssetStore`, flags a list dirty after mutating it, and asks for an
//! explicit flush. Nothing reaches disk without that flush.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog::asset_path;
use crate::error::StoreError;
use crate::task::TaskList;

/// Persistence collaborator for the board.
pub trait AssetStore {
    /// Load the task list called `name`.
    fn load(&self, name: &str) -> Result<TaskList, StoreError>;

    /// Record `list` as needing to be written on the next flush.
    fn mark_dirty(&mut self, list: &TaskList);

    /// Write every dirty list.
    fn flush(&mut self) -> Result<(), StoreError>;
}

/// Task lists stored as JSON files in a single directory.
#[derive(Debug)]
pub struct FileAssets {
    dir: PathBuf,
    dirty: BTreeMap<String, TaskList>,
}

impl FileAssets {
    pub fn new(dir: &Path) -> Self {
        FileAssets {
            dir: dir.to_path_buf(),
            dirty: BTreeMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of lists waiting for a flush.
    pub fn pending(&self) -> usize {
        self.dirty.len()
    }

    /// Write one list using an atomic write (temp file + rename).
    fn write_list(path: &Path, list: &TaskList) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(list).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        f.write_all(data.as_bytes()).map_err(|e| StoreError::io(&tmp, e))?;
        f.flush().map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
        Ok(())
    }
}

impl AssetStore for FileAssets {
    fn load(&self, name: &str) -> Result<TaskList, StoreError> {
        let path = asset_path(&self.dir, name);
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        let buf = fs::read_to_string(&path).map_err(|e| StoreError::io(&path, e))?;
        let mut list: TaskList =
            serde_json::from_str(&buf).map_err(|source| StoreError::Parse { path, source })?;
        list.name = name.to_string();
        Ok(list)
    }

    fn mark_dirty(&mut self, list: &TaskList) {
        self.dirty.insert(list.name.clone(), list.clone());
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        while let Some((name, list)) = self.dirty.pop_first() {
            let path = asset_path(&self.dir, &name);
            if let Err(e) = Self::write_list(&path, &list) {
                // Keep it pending so a later flush can retry.
                self.dirty.insert(name, list);
                return Err(e);
            }
            log::debug!("flushed {} ({} tasks)", path.display(), list.len());
        }
        Ok(())
    }
}
