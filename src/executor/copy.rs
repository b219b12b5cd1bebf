//! Atomic file copy implementation

use crate::types::{FileOp, SyncError};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static PART_SEQ: AtomicU64 = AtomicU64::new(0);

/// Copy a file atomically using the write-then-rename strategy
///
/// 1. Write to a hidden `.<name>.<pid>-<seq>.part` sibling
/// 2. Flush and sync to disk
/// 3. Preserve metadata (permissions, mtime)
/// 4. Rename over the final destination, replacing any existing file
///
/// The `.part` file is removed if any step fails.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - `FileOperation` naming the failing path
///
/// # Example
/// ```no_run
/// use projsync::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.jpg"), Path::new("dest.jpg"))?;
/// # Ok::<(), projsync::types::SyncError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::file_op(FileOp::Copy, parent, e))?;
    }

    let part_path = part_path_for(dest);

    match write_part(src, &part_path) {
        Ok(total_bytes) => {
            // Atomic on POSIX systems (single syscall)
            fs::rename(&part_path, dest).map_err(|e| {
                let _ = fs::remove_file(&part_path);
                SyncError::file_op(FileOp::Copy, dest, e)
            })?;
            Ok(total_bytes)
        }
        Err(e) => {
            let _ = fs::remove_file(&part_path);
            Err(e)
        }
    }
}

/// Fresh temporary path for one write of `dest`.
///
/// Every call returns a different path, so concurrent copies never share a
/// `.part` file even when a source file is itself named like one.
pub fn part_path_for(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = PART_SEQ.fetch_add(1, Ordering::Relaxed);
    dest.with_file_name(format!(".{}.{}-{}.part", name, std::process::id(), seq))
}

fn write_part(src: &Path, part_path: &Path) -> Result<u64, SyncError> {
    let mut src_file = File::open(src).map_err(|e| SyncError::file_op(FileOp::Read, src, e))?;
    let mut part_file =
        File::create(part_path).map_err(|e| SyncError::file_op(FileOp::Copy, part_path, e))?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file
            .read(&mut buffer)
            .map_err(|e| SyncError::file_op(FileOp::Read, src, e))?;

        if bytes_read == 0 {
            break;
        }

        part_file
            .write_all(&buffer[..bytes_read])
            .map_err(|e| SyncError::file_op(FileOp::Copy, part_path, e))?;
        total_bytes += bytes_read as u64;
    }

    part_file
        .sync_all()
        .map_err(|e| SyncError::file_op(FileOp::Copy, part_path, e))?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    let src_metadata = fs::metadata(src).map_err(|e| SyncError::file_op(FileOp::Read, src, e))?;

    fs::set_permissions(part_path, src_metadata.permissions())
        .map_err(|e| SyncError::file_op(FileOp::Copy, part_path, e))?;

    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(part_path, mtime)
        .map_err(|e| SyncError::file_op(FileOp::SetMtime, part_path, e))?;

    Ok(total_bytes)
}
