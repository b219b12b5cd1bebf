//! Bounded-concurrency executor for file tasks.
//!
//! Each batch gets its own counting semaphore:
//! - a slot is acquired in submission order before a task is spawned
//! - the owned permit moves into the task and is released when it ends,
//!   whether it returned `Ok`, `Err` or panicked
//! - the batch call returns only once every task reached a terminal state

use crate::types::SyncError;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::Semaphore;

use std::sync::Arc;

/// Default number of file operations allowed in flight
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Runs blocking file tasks with at most `max_concurrency` active at once.
pub struct BoundedExecutor {
    runtime: Runtime,
    max_concurrency: usize,
}

impl BoundedExecutor {
    /// Create an executor; a limit of zero is raised to one.
    pub fn new(max_concurrency: usize) -> Result<Self, SyncError> {
        let max_concurrency = max_concurrency.max(1);
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(max_concurrency)
            .thread_name("projsync-worker")
            .enable_all()
            .build()
            .map_err(SyncError::Io)?;

        Ok(Self {
            runtime,
            max_concurrency,
        })
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Run every task and wait for all of them.
    ///
    /// Results are returned in submission order. A failing or panicking task
    /// only affects its own slot in the output.
    pub fn run_all<T, F>(&self, tasks: Vec<F>) -> Vec<Result<T, SyncError>>
    where
        F: FnOnce() -> Result<T, SyncError> + Send + 'static,
        T: Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));

        self.runtime.block_on(async move {
            let mut pending = Vec::with_capacity(tasks.len());
            for task in tasks {
                let slot = Arc::clone(&semaphore)
                    .acquire_owned()
                    .await
                    .map(|permit| {
                        tokio::task::spawn_blocking(move || {
                            let _permit = permit;
                            task()
                        })
                    })
                    .map_err(|e| SyncError::TaskFailed(format!("no concurrency slot: {}", e)));
                pending.push(slot);
            }

            let mut results = Vec::with_capacity(pending.len());
            for slot in pending {
                let result = match slot {
                    Ok(handle) => handle.await.unwrap_or_else(|e| Err(map_join_error(e))),
                    Err(e) => Err(e),
                };
                results.push(result);
            }
            results
        })
    }
}

fn map_join_error(error: tokio::task::JoinError) -> SyncError {
    if error.is_panic() {
        SyncError::TaskFailed("file task panicked".to_string())
    } else {
        SyncError::TaskFailed(format!("file task did not complete: {}", error))
    }
}
