//! # projsync - Project Folder Synchronizer
//!
//! Matches project folders between a source and a destination root by a
//! 4-character id prefix, then copies new and changed files with a bounded
//! number of concurrent file operations. Files with identical content are
//! skipped and only get their modification time aligned.

// Module declarations
pub mod config;
pub mod scanner;
pub mod matcher;
pub mod executor;
pub mod hash;
pub mod policy;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{FileEntry, Project, SyncError, SyncOutcome};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
