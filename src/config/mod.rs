//! Configuration management

mod cli;

pub use cli::{prompt_terminal, Cli, Command, CopyArgs};

use crate::executor::DEFAULT_MAX_CONCURRENCY;
use crate::types::SyncError;
use std::path::PathBuf;

/// Settings for one copy run
#[derive(Debug, Clone)]
pub struct Config {
    /// Source root, one subdirectory per project
    pub source: PathBuf,

    /// Destination root, created if missing
    pub destination: PathBuf,

    /// Upper bound on concurrently running file operations
    pub max_concurrency: usize,

    /// Dry run (decide outcomes, don't write)
    pub dry_run: bool,

    /// Print the run report as JSON
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            dry_run: false,
            json: false,
        }
    }
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.source.as_os_str().is_empty() {
            return Err(SyncError::MissingInput { field: "from" });
        }
        if self.destination.as_os_str().is_empty() {
            return Err(SyncError::MissingInput { field: "to" });
        }

        if !self.source.is_dir() {
            return Err(SyncError::Config(format!(
                "Source path is not a directory: {:?}",
                self.source
            )));
        }

        if self.source == self.destination || same_existing_dir(&self.source, &self.destination) {
            return Err(SyncError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(SyncError::Config(
                "At least one concurrent job is required".to_string(),
            ));
        }

        Ok(())
    }
}

fn same_existing_dir(a: &std::path::Path, b: &std::path::Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
