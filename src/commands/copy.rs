//! Copy command: sync every source project into its destination project

use super::report::{failure_summary, FileFailure, SyncReport};
use crate::executor::{BoundedExecutor, SyncCounter};
use crate::matcher::DestinationSet;
use crate::policy::FileSyncPolicy;
use crate::scanner::{scan_files, scan_projects};
use crate::types::{FileEntry, FileOp, SyncError, SyncOutcome};
use crate::ui::ProgressReporter;
use crate::Config;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Events emitted while a run progresses.
///
/// File events are emitted from worker threads as tasks finish.
#[derive(Debug)]
pub enum SyncEvent {
    ProjectStart {
        name: String,
        destination: PathBuf,
        created: bool,
        files: usize,
    },
    FileDone {
        path: PathBuf,
        outcome: SyncOutcome,
    },
    FileError {
        path: PathBuf,
        message: String,
    },
    ProjectDone {
        name: String,
        failed: usize,
    },
}

/// Optional callback used to receive run events.
pub type EventCallback = dyn Fn(&SyncEvent) + Send + Sync;

/// Result of syncing the files of one project
#[derive(Debug, Default)]
pub struct ProjectOutcome {
    pub outcomes: Vec<(PathBuf, SyncOutcome)>,
    pub failures: Vec<(PathBuf, SyncError)>,
}

/// Run the copy command: sync, print the summary, fail on any file failure.
pub fn run(config: Config) -> Result<SyncReport, SyncError> {
    let reporter = Arc::new(Mutex::new(if config.json {
        ProgressReporter::hidden()
    } else {
        ProgressReporter::new()
    }));

    let on_event: Arc<EventCallback> = {
        let reporter = Arc::clone(&reporter);
        Arc::new(move |event: &SyncEvent| {
            let Ok(mut progress) = reporter.lock() else {
                return;
            };
            match event {
                SyncEvent::ProjectStart {
                    name,
                    created,
                    files,
                    ..
                } => progress.start_project(name, *created, *files as u64),
                SyncEvent::FileDone { path, outcome } => progress.complete_file(*outcome, path),
                SyncEvent::FileError { path, message } => progress.file_error(path, message),
                SyncEvent::ProjectDone { .. } => {}
            }
        })
    };

    let report = sync_projects(&config, Some(on_event))?;
    if let Ok(progress) = reporter.lock() {
        progress.finish();
    }

    if config.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| SyncError::Io(std::io::Error::other(e)))?;
        println!("{}", json);
    } else {
        println!("{}", report.summary_line());
        if !report.is_success() {
            println!("{}", failure_summary(&report));
        }
    }

    report.into_result()
}

/// Sync all source projects, one project at a time.
///
/// Project ids are validated for every source project before the first file
/// is touched. File failures are collected in the report and never stop the
/// run; only fatal errors are returned as `Err`.
pub fn sync_projects(
    config: &Config,
    on_event: Option<Arc<EventCallback>>,
) -> Result<SyncReport, SyncError> {
    let sources = scan_projects(&config.source)?;
    for source in &sources {
        source.id()?;
    }

    if !config.dry_run {
        fs::create_dir_all(&config.destination)
            .map_err(|e| SyncError::file_op(FileOp::Copy, &config.destination, e))?;
    }
    let known = if config.destination.is_dir() {
        scan_projects(&config.destination)?
    } else {
        Vec::new()
    };
    let mut destinations = DestinationSet::new(&config.destination, known).dry_run(config.dry_run);

    let counter = Arc::new(SyncCounter::new());
    let policy = FileSyncPolicy::new(Arc::clone(&counter)).dry_run(config.dry_run);
    let executor = BoundedExecutor::new(config.max_concurrency)?;

    let mut report = SyncReport {
        dry_run: config.dry_run,
        ..SyncReport::default()
    };

    for source in &sources {
        let resolved = destinations.resolve(source)?;
        report.projects.push(source.name.clone());
        if resolved.created {
            report.created_projects.push(resolved.project.name.clone());
        }

        let files = match scan_files(source) {
            Ok(files) => files,
            Err(e) => {
                warn!(project = %source.name, "cannot list project files: {}", e);
                report
                    .failures
                    .push(FileFailure::new(&source.name, &source.path, e));
                continue;
            }
        };

        info!(
            project = %source.name,
            destination = %resolved.project.path.display(),
            files = files.len(),
            "syncing project"
        );
        emit(
            on_event.as_deref(),
            &SyncEvent::ProjectStart {
                name: source.name.clone(),
                destination: resolved.project.path.clone(),
                created: resolved.created,
                files: files.len(),
            },
        );

        let outcome = sync_project(
            &executor,
            &policy,
            files,
            &resolved.project.path,
            on_event.clone(),
        );

        emit(
            on_event.as_deref(),
            &SyncEvent::ProjectDone {
                name: source.name.clone(),
                failed: outcome.failures.len(),
            },
        );

        for (_, result) in outcome.outcomes {
            report.record(result);
        }
        for (path, error) in outcome.failures {
            warn!(project = %source.name, path = %path.display(), "file failed: {}", error);
            report
                .failures
                .push(FileFailure::new(&source.name, &path, error));
        }
    }

    report.files_copied = counter.read();
    Ok(report)
}

/// Sync the files of one project through the executor and wait for all.
pub fn sync_project(
    executor: &BoundedExecutor,
    policy: &FileSyncPolicy,
    files: Vec<FileEntry>,
    destination_dir: &Path,
    on_event: Option<Arc<EventCallback>>,
) -> ProjectOutcome {
    let paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();

    let tasks: Vec<_> = files
        .into_iter()
        .map(|file| {
            let policy = policy.clone();
            let destination_dir = destination_dir.to_path_buf();
            let on_event = on_event.clone();
            move || {
                let result = policy.sync(&file, &destination_dir);
                let event = match &result {
                    Ok(outcome) => SyncEvent::FileDone {
                        path: file.path.clone(),
                        outcome: *outcome,
                    },
                    Err(e) => SyncEvent::FileError {
                        path: file.path.clone(),
                        message: e.to_string(),
                    },
                };
                emit(on_event.as_deref(), &event);
                result
            }
        })
        .collect();

    let mut project = ProjectOutcome::default();
    for (path, result) in paths.into_iter().zip(executor.run_all(tasks)) {
        match result {
            Ok(outcome) => project.outcomes.push((path, outcome)),
            Err(error) => {
                if matches!(error, SyncError::TaskFailed(_)) {
                    emit(
                        on_event.as_deref(),
                        &SyncEvent::FileError {
                            path: path.clone(),
                            message: error.to_string(),
                        },
                    );
                }
                project.failures.push((path, error));
            }
        }
    }
    project
}

fn emit(on_event: Option<&EventCallback>, event: &SyncEvent) {
    if let Some(callback) = on_event {
        callback(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn entry(dir: &Path, name: &str, content: &[u8]) -> FileEntry {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        FileEntry::new(name, path, content.len() as u64, SystemTime::now())
    }

    #[test]
    fn test_sync_project_collects_outcomes_and_failures() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let good = entry(src.path(), "good.jpg", b"good");
        let missing = FileEntry::new(
            "missing.jpg",
            src.path().join("missing.jpg"),
            0,
            SystemTime::now(),
        );

        let counter = Arc::new(SyncCounter::new());
        let policy = FileSyncPolicy::new(Arc::clone(&counter));
        let executor = BoundedExecutor::new(2).unwrap();

        let outcome = sync_project(&executor, &policy, vec![missing, good], dst.path(), None);

        assert_eq!(outcome.outcomes.len(), 1);
        assert_eq!(outcome.outcomes[0].1, SyncOutcome::Copied);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].0, src.path().join("missing.jpg"));
        assert_eq!(counter.read(), 1);
        assert!(dst.path().join("good.jpg").exists());
    }

    #[test]
    fn test_sync_project_emits_file_events() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let files = vec![
            entry(src.path(), "a.jpg", b"a"),
            entry(src.path(), "b.jpg", b"b"),
        ];

        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_ref = Arc::clone(&seen);
        let callback: Arc<EventCallback> = Arc::new(move |event: &SyncEvent| {
            let label = match event {
                SyncEvent::FileDone { .. } => "done",
                SyncEvent::FileError { .. } => "error",
                _ => "other",
            };
            seen_ref.lock().expect("lock events").push(label.to_string());
        });

        let policy = FileSyncPolicy::new(Arc::new(SyncCounter::new()));
        let executor = BoundedExecutor::new(4).unwrap();
        sync_project(&executor, &policy, files, dst.path(), Some(callback));

        let snapshot = seen.lock().expect("lock events snapshot").clone();
        assert_eq!(snapshot, vec!["done", "done"]);
    }
}
