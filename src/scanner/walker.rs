//! One-level directory listing for project roots and project folders

use crate::types::{FileEntry, FileOp, Project, SyncError};
use std::fs::{self, FileType, Metadata};
use std::path::Path;
use tracing::warn;

/// List the project folders directly under `root`, ordered by name.
///
/// Directories and symlinks to directories count; files at the root and
/// dangling links are ignored.
pub fn scan_projects(root: &Path) -> Result<Vec<Project>, SyncError> {
    let mut projects = Vec::new();

    for result in shallow_walker(root) {
        let entry = result.map_err(|e| walk_error(root, e))?;
        if entry.depth() == 0 {
            continue;
        }

        let is_dir = target_type(&entry).map(|ft| ft.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        projects.push(Project::new(name, entry.into_path()));
    }

    Ok(projects)
}

/// List the regular files directly inside a project folder, ordered by name.
///
/// Symlinks are followed. Nested directories and special files are skipped.
/// Hidden files are included.
///
/// # Errors
/// * The project folder itself cannot be read → `FileOperation`
/// * A single entry whose metadata cannot be read is logged and skipped
pub fn scan_files(project: &Project) -> Result<Vec<FileEntry>, SyncError> {
    let mut files = Vec::new();

    for result in shallow_walker(&project.path) {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) if e.depth() == Some(0) || e.depth().is_none() => {
                return Err(walk_error(&project.path, e));
            }
            Err(e) => {
                warn!(project = %project.name, "skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let metadata = match target_metadata(&entry) {
            Ok(m) => m,
            Err(e) => {
                warn!(
                    path = %entry.path().display(),
                    "failed to read metadata, file will be skipped: {}", e
                );
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let mtime = metadata
            .modified()
            .map_err(|e| SyncError::file_op(FileOp::Read, entry.path(), e))?;

        let name = entry.file_name().to_string_lossy().into_owned();
        files.push(FileEntry::new(name, entry.into_path(), metadata.len(), mtime));
    }

    Ok(files)
}

fn shallow_walker(root: &Path) -> ignore::Walk {
    ignore::WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
}

/// File type of the entry, or of its target when the entry is a symlink
fn target_type(entry: &ignore::DirEntry) -> Option<FileType> {
    if entry.path_is_symlink() {
        fs::metadata(entry.path()).ok().map(|m| m.file_type())
    } else {
        entry.file_type()
    }
}

fn target_metadata(entry: &ignore::DirEntry) -> Result<Metadata, ignore::Error> {
    if entry.path_is_symlink() {
        fs::metadata(entry.path()).map_err(ignore::Error::from)
    } else {
        entry.metadata()
    }
}

fn walk_error(root: &Path, error: ignore::Error) -> SyncError {
    let message = error.to_string();
    let io = error
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    SyncError::file_op(FileOp::Read, root, io)
}
