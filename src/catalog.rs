//! Task list discovery and creation.
//!
//! Task lists live as individual JSON files in the data directory with the
//! naming convention `<list_name>_tasks.json`. This module maps between
//! display names, sanitised asset names and file paths.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::StoreError;
use crate::task::TaskList;

const FILE_SUFFIX: &str = "_tasks";

/// A task list asset on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListAsset {
    pub name: String,
    pub display_name: String,
    pub file_path: PathBuf,
}

impl TaskListAsset {
    /// Describe the asset for a display name inside `dir`. Nothing is created.
    pub fn new(display_name: &str, dir: &Path) -> Self {
        let name = sanitize_list_name(display_name);
        let file_path = asset_path(dir, &name);

        TaskListAsset {
            name,
            display_name: display_name.trim().to_string(),
            file_path,
        }
    }

    /// Recognise an existing task list file. Returns `None` for anything
    /// that does not follow the naming convention.
    pub fn from_file(file_path: PathBuf) -> Option<Self> {
        if file_path.extension()?.to_str()? != "json" {
            return None;
        }
        let stem = file_path.file_stem()?.to_str()?;
        let name = stem.strip_suffix(FILE_SUFFIX)?;
        if name.is_empty() {
            return None;
        }

        Some(TaskListAsset {
            name: name.to_string(),
            display_name: name.replace('_', " "),
            file_path,
        })
    }

    /// Last modification time of the backing file, if it can be read.
    pub fn modified(&self) -> Option<SystemTime> {
        fs::metadata(&self.file_path).and_then(|m| m.modified()).ok()
    }
}

/// File path of the asset called `name` inside `dir`.
pub fn asset_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}{FILE_SUFFIX}.json"))
}

/// Convert a display name into a safe asset name.
/// Lowercases and collapses every run of non-alphanumerics into one `_`.
pub fn sanitize_list_name(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Create a new, empty task list asset.
pub fn create_task_list(display_name: &str, dir: &Path) -> Result<TaskListAsset, StoreError> {
    let asset = TaskListAsset::new(display_name, dir);
    if asset.name.is_empty() {
        return Err(StoreError::InvalidName(display_name.to_string()));
    }
    if asset.file_path.exists() {
        return Err(StoreError::AlreadyExists(asset.name));
    }

    let data = serde_json::to_string_pretty(&TaskList::new(&asset.name)).map_err(|source| {
        StoreError::Parse {
            path: asset.file_path.clone(),
            source,
        }
    })?;
    fs::write(&asset.file_path, data).map_err(|e| StoreError::io(&asset.file_path, e))?;

    log::info!("created task list {}", asset.file_path.display());
    Ok(asset)
}

/// Discover all task lists in `dir`, sorted by display name.
pub fn discover_task_lists(dir: &Path) -> Result<Vec<TaskListAsset>, StoreError> {
    let mut assets = Vec::new();

    if !dir.exists() {
        return Ok(assets);
    }

    let entries = fs::read_dir(dir).map_err(|e| StoreError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| StoreError::io(dir, e))?.path();
        if path.is_file() {
            if let Some(asset) = TaskListAsset::from_file(path) {
                assets.push(asset);
            }
        }
    }

    assets.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(assets)
}

/// Find the most recently modified task list in `dir`.
pub fn most_recent_task_list(dir: &Path) -> Result<Option<TaskListAsset>, StoreError> {
    let assets = discover_task_lists(dir)?;

    let most_recent = assets
        .into_iter()
        .filter_map(|asset| asset.modified().map(|t| (asset, t)))
        .max_by_key(|(_, modified)| *modified);

    Ok(most_recent.map(|(asset, _)| asset))
}
