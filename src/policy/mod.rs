//! Per-file sync decision: copy, skip, or overwrite

use crate::executor::{copy_file_atomic, SyncCounter};
use crate::hash::digest;
use crate::types::{FileEntry, FileOp, SyncError, SyncOutcome};
use filetime::FileTime;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Decides and performs the action for one source file.
///
/// Cheap to clone; every file task gets its own copy sharing the counter.
#[derive(Debug, Clone)]
pub struct FileSyncPolicy {
    counter: Arc<SyncCounter>,
    dry_run: bool,
}

impl FileSyncPolicy {
    pub fn new(counter: Arc<SyncCounter>) -> Self {
        Self {
            counter,
            dry_run: false,
        }
    }

    /// Decide outcomes without writing, deleting or touching timestamps
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn counter(&self) -> &Arc<SyncCounter> {
        &self.counter
    }

    /// Sync `source` into `destination_dir`.
    ///
    /// 1. Destination missing → copy, `Copied`
    /// 2. Same content → align mtime if it differs, `Skipped`
    /// 3. Different content → delete, copy, `Overwritten`
    ///
    /// Copies increment the shared counter; skips never do.
    pub fn sync(
        &self,
        source: &FileEntry,
        destination_dir: &Path,
    ) -> Result<SyncOutcome, SyncError> {
        let dest = source.destination_in(destination_dir);

        let dest_hash = match digest(&dest)? {
            Some(hash) => hash,
            None => {
                self.copy(&source.path, &dest)?;
                info!("copied: {} -> {}", source.path.display(), dest.display());
                return Ok(SyncOutcome::Copied);
            }
        };

        let source_hash = digest(&source.path)?.ok_or_else(|| {
            SyncError::file_op(
                FileOp::Read,
                &source.path,
                Error::new(ErrorKind::NotFound, "source file vanished"),
            )
        })?;

        if source_hash == dest_hash {
            debug!("skip: {} exists", dest.display());
            let reconciled = self.reconcile_mtime(source, &dest)?;
            return Ok(SyncOutcome::Skipped { reconciled });
        }

        if !self.dry_run {
            fs::remove_file(&dest).map_err(|e| SyncError::file_op(FileOp::Delete, &dest, e))?;
        }
        self.copy(&source.path, &dest)?;
        info!("overwritten: {} -> {}", source.path.display(), dest.display());

        Ok(SyncOutcome::Overwritten)
    }

    fn copy(&self, src: &Path, dest: &Path) -> Result<(), SyncError> {
        if !self.dry_run {
            copy_file_atomic(src, dest)?;
        }
        self.counter.increment();
        Ok(())
    }

    /// Set the destination mtime to the source's when they differ.
    fn reconcile_mtime(&self, source: &FileEntry, dest: &Path) -> Result<bool, SyncError> {
        let dest_metadata =
            fs::metadata(dest).map_err(|e| SyncError::file_op(FileOp::Read, dest, e))?;
        let source_mtime = FileTime::from_system_time(source.mtime);
        let dest_mtime = FileTime::from_last_modification_time(&dest_metadata);

        if source_mtime == dest_mtime {
            return Ok(false);
        }

        info!("{} mismatched last modified date, updating", dest.display());
        if !self.dry_run {
            filetime::set_file_mtime(dest, source_mtime)
                .map_err(|e| SyncError::file_op(FileOp::SetMtime, dest, e))?;
        }
        Ok(true)
    }
}
