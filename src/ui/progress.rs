//! Progress reporting

use crate::types::SyncOutcome;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::time::Instant;

/// Progress reporter for a copy run: one bar, reset per project
pub struct ProgressReporter {
    bar: ProgressBar,
    started_at: Instant,
    copied: usize,
    skipped: usize,
    failed: usize,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::new(0))
    }

    /// Reporter that never draws (JSON output, tests)
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden()))
    }

    fn with_bar(bar: ProgressBar) -> Self {
        if let Ok(style) =
            ProgressStyle::with_template("{prefix} {bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            bar,
            started_at: Instant::now(),
            copied: 0,
            skipped: 0,
            failed: 0,
        }
    }

    /// Reset the bar for a new project.
    pub fn start_project(&self, name: &str, created: bool, total_files: u64) {
        if created {
            self.bar
                .println(format!("create project {} in destination path.", name));
        }
        self.bar.set_prefix(name.to_string());
        self.bar.set_length(total_files);
        self.bar.set_position(0);
        self.bar.set_message("Starting...".to_string());
    }

    /// Mark one file as done.
    pub fn complete_file(&mut self, outcome: SyncOutcome, path: &Path) {
        if outcome.is_copy() {
            self.copied += 1;
        } else {
            self.skipped += 1;
        }
        self.bar.inc(1);
        self.bar
            .set_message(format!("{} {}", outcome.label(), path.display()));
    }

    /// Surface a file error without stopping the bar.
    pub fn file_error(&mut self, path: &Path, err: &str) {
        self.failed += 1;
        self.bar.inc(1);
        self.bar
            .println(format!("ERROR {}: {}", path.display(), err));
    }

    /// Finalize the run.
    pub fn finish(&self) {
        self.bar.finish_with_message(format!(
            "{} copied, {} unchanged, {} failed in {:.1}s",
            self.copied,
            self.skipped,
            self.failed,
            self.started_at.elapsed().as_secs_f64()
        ));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
