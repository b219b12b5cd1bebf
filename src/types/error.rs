//! Error types for projsync

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// File-level operation that can fail inside a sync task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Read,
    Hash,
    Copy,
    Delete,
    SetMtime,
    Task,
}

impl FileOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOp::Read => "read",
            FileOp::Hash => "hash",
            FileOp::Copy => "copy",
            FileOp::Delete => "delete",
            FileOp::SetMtime => "set-mtime",
            FileOp::Task => "task",
        }
    }
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error types for projsync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required path input was empty or absent
    #[error("Missing input: please fill `{field}`")]
    MissingInput { field: &'static str },

    /// Project folder name does not yield a 4-character id
    #[error("Invalid source project id: found {id:?} in {name:?}")]
    InvalidIdentifier { name: String, id: String },

    /// A single file operation failed
    #[error("Failed to {op} {path}: {source}")]
    FileOperation {
        op: FileOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A worker task panicked or was aborted
    #[error("Sync task failed: {0}")]
    TaskFailed(String),

    /// The run finished but some files failed
    #[error("Sync completed with {failed} failed file(s) ({copied} copied)")]
    Incomplete { failed: usize, copied: usize },
}

impl SyncError {
    /// Wrap an IO error as a failed file operation on `path`
    pub fn file_op(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::FileOperation {
            op,
            path: path.into(),
            source,
        }
    }

    /// Errors that abort the run instead of being isolated to one file
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::Config(_)
                | SyncError::MissingInput { .. }
                | SyncError::InvalidIdentifier { .. }
        )
    }

    /// Errors scoped to a single file task
    pub fn is_file_failure(&self) -> bool {
        matches!(
            self,
            SyncError::FileOperation { .. } | SyncError::TaskFailed(_)
        )
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        match self {
            SyncError::Io(e) | SyncError::FileOperation { source: e, .. } => {
                e.kind() == std::io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }
}
