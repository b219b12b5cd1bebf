//! Core type definitions for projsync

mod action;
mod entry;
mod error;
mod project;

pub use action::SyncOutcome;
pub use entry::FileEntry;
pub use error::{FileOp, SyncError};
pub use project::{project_id, Project, ID_LEN};
