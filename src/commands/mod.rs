//! Command implementations

pub mod copy;
pub mod report;

pub use copy::{run, sync_project, sync_projects, EventCallback, ProjectOutcome, SyncEvent};
pub use report::{failure_summary, FileFailure, SyncReport};
