//! FileEntry - A regular file inside a project folder

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents a file to be synced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name, used as-is under the destination project
    pub name: String,

    /// Full path of the file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Last modification time
    pub mtime: SystemTime,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, path: PathBuf, size: u64, mtime: SystemTime) -> Self {
        Self {
            name: name.into(),
            path,
            size,
            mtime,
        }
    }

    /// Destination path of this file inside `destination_dir`
    pub fn destination_in(&self, destination_dir: &Path) -> PathBuf {
        match self.path.file_name() {
            Some(raw) => destination_dir.join(raw),
            None => destination_dir.join(&self.name),
        }
    }
}
