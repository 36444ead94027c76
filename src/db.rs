//! Storage for the category list.
//!
//! The whole model lives in one pretty-printed JSON array on disk. It is read
//! once at startup and written back in full on exit; there are no partial
//! writes. A data file that cannot be decoded is copied to the backup
//! directory before the next save overwrites it.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, info, warn};

use crate::task::Category;

/// Errors raised while reading or writing the data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode categories: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// In-memory model: the ordered list of categories.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub categories: Vec<Category>,
    /// Set when the file on disk could not be decoded at load time.
    backup_before_save: bool,
}

impl Database {
    /// Build a database around an existing category list.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Database {
            categories,
            backup_before_save: false,
        }
    }

    /// Empty database standing in for a data file that failed to load.
    ///
    /// The next `save` copies the unreadable file aside before replacing it.
    pub fn after_failed_load() -> Self {
        Database {
            categories: Vec::new(),
            backup_before_save: true,
        }
    }

    /// Load the category list from `path`. A missing file yields an empty database.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            info!("No data file at {}, starting empty", path.display());
            return Ok(Database::default());
        }
        let mut buf = String::new();
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let categories: Option<Vec<Category>> =
            serde_json::from_str(&buf).map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let db = Database::with_categories(categories.unwrap_or_default());
        info!(
            "Loaded {} categories ({} tasks) from {}",
            db.categories.len(),
            db.task_count(),
            path.display()
        );
        Ok(db)
    }

    /// Save the category list to `path` using an atomic write (temp file + rename).
    ///
    /// A symlinked data file is followed, so the link stays in place and its
    /// target receives the new contents.
    pub fn save(&mut self, path: &Path) -> Result<(), StoreError> {
        if self.backup_before_save && path.exists() {
            let backup = create_backup(path)?;
            warn!("Kept unreadable data file as {}", backup.display());
        }
        self.backup_before_save = false;

        let mut data = serde_json::to_string_pretty(&self.categories)?;
        data.push('\n');

        let target = resolve_target(path);
        let tmp = target.with_extension("json.tmp");
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut f = File::create(&tmp).map_err(write_err)?;
        f.write_all(data.as_bytes()).map_err(write_err)?;
        f.flush().map_err(write_err)?;
        fs::rename(&tmp, &target).map_err(write_err)?;

        info!(
            "Saved {} categories ({} tasks) to {}",
            self.categories.len(),
            self.task_count(),
            path.display()
        );
        Ok(())
    }

    /// Total number of tasks across all categories.
    pub fn task_count(&self) -> usize {
        self.categories.iter().map(|c| c.tasks.len()).sum()
    }

    /// Re-apply every category's sort mode to its stored task list.
    pub fn apply_sorts(&mut self) {
        for cat in self.categories.iter_mut() {
            cat.apply_sort();
        }
        debug!("Applied display sort to {} categories", self.categories.len());
    }
}

/// The file a save should replace: the symlink target when `path` is a link.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(target) => {
                debug!("Data file {} links to {}", path.display(), target.display());
                target
            }
            Err(_) => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Copy the data file into `backup/` next to it, named with a local timestamp.
pub fn create_backup(path: &Path) -> Result<PathBuf, StoreError> {
    let backup_err = |source| StoreError::Backup {
        path: path.to_path_buf(),
        source,
    };
    if !path.exists() {
        return Err(backup_err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "data file does not exist",
        )));
    }

    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent_dir.join("backup");
    fs::create_dir_all(&backup_dir).map_err(backup_err)?;

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("data.json");
    let backup_path = backup_dir.join(format!("{}_{}", timestamp, file_name));

    fs::copy(path, &backup_path).map_err(backup_err)?;
    info!("Backed up {} to {}", path.display(), backup_path.display());
    Ok(backup_path)
}
