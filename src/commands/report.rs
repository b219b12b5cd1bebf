//! Run report and human-readable summaries

use crate::types::{SyncError, SyncOutcome};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A file (or project folder) that could not be synced
#[derive(Debug, Serialize)]
pub struct FileFailure {
    pub project: String,
    pub path: PathBuf,
    pub kind: &'static str,
    pub message: String,
    #[serde(skip)]
    pub error: SyncError,
}

impl FileFailure {
    pub fn new(project: &str, path: &Path, error: SyncError) -> Self {
        Self {
            project: project.to_string(),
            path: path.to_path_buf(),
            kind: error_kind_label(&error),
            message: error.to_string(),
            error,
        }
    }
}

/// Totals for one copy run
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub dry_run: bool,
    /// Source projects processed, in order
    pub projects: Vec<String>,
    /// Destination folders created during the run
    pub created_projects: Vec<String>,
    pub copied: usize,
    pub overwritten: usize,
    pub skipped: usize,
    /// Skipped files whose mtime was aligned with the source
    pub reconciled: usize,
    /// Final value of the run's copy counter
    pub files_copied: usize,
    pub failures: Vec<FileFailure>,
}

impl SyncReport {
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Copied => self.copied += 1,
            SyncOutcome::Overwritten => self.overwritten += 1,
            SyncOutcome::Skipped { reconciled } => {
                self.skipped += 1;
                if reconciled {
                    self.reconciled += 1;
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary printed at the end of a run
    pub fn summary_line(&self) -> String {
        if self.dry_run {
            format!("{} file(s) would be copied.", self.files_copied)
        } else {
            format!("{} file(s) copied.", self.files_copied)
        }
    }

    /// Error returned when the run finished with failures
    pub fn into_result(self) -> Result<SyncReport, SyncError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SyncError::Incomplete {
                failed: self.failures.len(),
                copied: self.files_copied,
            })
        }
    }
}

#[derive(Debug)]
pub(crate) struct ErrorRecord {
    kind: &'static str,
    path: Option<PathBuf>,
    message: String,
    suggestion: Option<String>,
}

impl ErrorRecord {
    pub(crate) fn new(path: Option<&Path>, error: &SyncError) -> Self {
        let (message, suggestion) = humanize_error(error);
        Self {
            kind: error_kind_label(error),
            path: path.map(PathBuf::from),
            message,
            suggestion,
        }
    }
}

fn humanize_io(op: Option<&str>, io: &std::io::Error) -> (String, Option<String>) {
    let action = op.map(|op| format!(" during {}", op)).unwrap_or_default();
    match io.kind() {
        ErrorKind::NotFound => (
            format!("File or directory was not found{}", action),
            Some("Verify the path still exists and retry.".to_string()),
        ),
        ErrorKind::PermissionDenied => (
            format!("Permission denied{}", action),
            Some("Check file permissions or run with a user that has access.".to_string()),
        ),
        ErrorKind::StorageFull => (
            "Not enough disk space to complete operation".to_string(),
            Some("Free disk space on destination and retry.".to_string()),
        ),
        ErrorKind::WriteZero | ErrorKind::UnexpectedEof => (
            format!("File transfer was interrupted before completion{}", action),
            Some("Retry the copy and check disk stability.".to_string()),
        ),
        _ => (
            format!("I/O operation failed{}: {}", action, io),
            Some(
                "Retry the copy. If this keeps happening, check disk health and permissions."
                    .to_string(),
            ),
        ),
    }
}

fn humanize_error(error: &SyncError) -> (String, Option<String>) {
    match error {
        SyncError::Io(io) => humanize_io(None, io),
        SyncError::FileOperation { op, source, .. } => humanize_io(Some(op.as_str()), source),
        SyncError::TaskFailed(msg) => (
            msg.clone(),
            Some("Retry the copy; other files were not affected.".to_string()),
        ),
        SyncError::InvalidIdentifier { .. } => (
            error.to_string(),
            Some("Project folder names must start with a 4-character id.".to_string()),
        ),
        SyncError::Config(msg) => (msg.clone(), None),
        SyncError::MissingInput { .. } | SyncError::Incomplete { .. } => (error.to_string(), None),
    }
}

fn error_kind_label(error: &SyncError) -> &'static str {
    match error {
        SyncError::Io(_) => "I/O error",
        SyncError::Config(_) => "Configuration error",
        SyncError::MissingInput { .. } => "Missing input",
        SyncError::InvalidIdentifier { .. } => "Invalid project id",
        SyncError::FileOperation { source, .. } if source.kind() == ErrorKind::PermissionDenied => {
            "Permission denied"
        }
        SyncError::FileOperation { source, .. } if source.kind() == ErrorKind::StorageFull => {
            "Disk full"
        }
        SyncError::FileOperation { .. } => "File operation failed",
        SyncError::TaskFailed(_) => "Task failed",
        SyncError::Incomplete { .. } => "Incomplete",
    }
}

pub(crate) fn format_error_summary(records: &[ErrorRecord]) -> String {
    let mut groups: BTreeMap<&'static str, Vec<&ErrorRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.kind).or_default().push(record);
    }

    let mut lines = Vec::new();
    lines.push("Error summary:".to_string());
    for (kind, items) in groups {
        lines.push(format!("  {} ({}):", kind, items.len()));
        for record in items.iter().take(3) {
            lines.push(format!("    - {}", record.message));
            if let Some(path) = &record.path {
                lines.push(format!("      Path: {}", path.display()));
            }
            if let Some(suggestion) = &record.suggestion {
                lines.push(format!("      Try: {}", suggestion));
            }
        }
        if items.len() > 3 {
            lines.push(format!("    - ... {} more", items.len() - 3));
        }
    }
    lines.join("\n")
}

/// Grouped error summary for every failure of a report
pub fn failure_summary(report: &SyncReport) -> String {
    let records: Vec<ErrorRecord> = report
        .failures
        .iter()
        .map(|f| ErrorRecord::new(Some(&f.path), &f.error))
        .collect();
    format_error_summary(&records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileOp;
    use std::io;

    fn denied(path: &str) -> SyncError {
        SyncError::file_op(
            FileOp::Copy,
            path,
            io::Error::new(ErrorKind::PermissionDenied, "denied"),
        )
    }

    #[test]
    fn test_record_counts_outcomes() {
        let mut report = SyncReport::default();
        report.record(SyncOutcome::Copied);
        report.record(SyncOutcome::Overwritten);
        report.record(SyncOutcome::Skipped { reconciled: true });
        report.record(SyncOutcome::Skipped { reconciled: false });

        assert_eq!(report.copied, 1);
        assert_eq!(report.overwritten, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.reconciled, 1);
    }

    #[test]
    fn test_summary_line() {
        let mut report = SyncReport {
            files_copied: 3,
            ..SyncReport::default()
        };
        assert_eq!(report.summary_line(), "3 file(s) copied.");

        report.dry_run = true;
        assert_eq!(report.summary_line(), "3 file(s) would be copied.");
    }

    #[test]
    fn test_into_result_fails_with_failures() {
        let mut report = SyncReport {
            files_copied: 2,
            ..SyncReport::default()
        };
        report
            .failures
            .push(FileFailure::new("0001", Path::new("a.jpg"), denied("a.jpg")));

        let err = report.into_result().unwrap_err();
        assert!(matches!(
            err,
            SyncError::Incomplete {
                failed: 1,
                copied: 2
            }
        ));
    }

    #[test]
    fn test_failure_serializes_without_error_object() {
        let failure = FileFailure::new("0001 a", Path::new("a.jpg"), denied("dst/a.jpg"));
        let json = serde_json::to_value(&failure).expect("serialize");

        assert_eq!(json["project"], "0001 a");
        assert_eq!(json["kind"], "Permission denied");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_format_error_summary_groups_by_kind() {
        let vanished = SyncError::file_op(
            FileOp::Read,
            "c.jpg",
            io::Error::new(ErrorKind::NotFound, "gone"),
        );
        let records = vec![
            ErrorRecord::new(Some(Path::new("a.jpg")), &denied("a.jpg")),
            ErrorRecord::new(Some(Path::new("b.jpg")), &denied("b.jpg")),
            ErrorRecord::new(Some(Path::new("c.jpg")), &vanished),
        ];

        let summary = format_error_summary(&records);
        assert!(summary.contains("Error summary:"));
        assert!(summary.contains("Permission denied (2):"));
        assert!(summary.contains("File operation failed (1):"));
        assert!(summary.contains("Path: a.jpg"));
        assert!(summary.contains("during copy"));
        assert!(summary.contains("Try: Verify the path still exists and retry."));
    }

    #[test]
    fn test_format_error_summary_truncates_long_groups() {
        let errors: Vec<SyncError> = (0..5).map(|i| denied(&format!("{}.jpg", i))).collect();
        let records: Vec<ErrorRecord> = errors.iter().map(|e| ErrorRecord::new(None, e)).collect();

        let summary = format_error_summary(&records);
        assert!(summary.contains("Permission denied (5):"));
        assert!(summary.contains("... 2 more"));
    }
}
