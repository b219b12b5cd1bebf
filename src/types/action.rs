//! SyncOutcome - What the sync policy did with one file

use serde::Serialize;

/// Terminal result of syncing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Destination was missing, file copied
    Copied,

    /// Destination content differed, replaced
    Overwritten,

    /// Content identical; `reconciled` is true when the mtime was updated
    Skipped { reconciled: bool },
}

impl SyncOutcome {
    /// Whether bytes were transferred (counts toward the copy total)
    pub fn is_copy(&self) -> bool {
        matches!(self, SyncOutcome::Copied | SyncOutcome::Overwritten)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyncOutcome::Copied => "Copy",
            SyncOutcome::Overwritten => "Update",
            SyncOutcome::Skipped { reconciled: true } => "Touch",
            SyncOutcome::Skipped { reconciled: false } => "Skip",
        }
    }
}
