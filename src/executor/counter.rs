//! Run-scoped count of completed copies

use std::sync::atomic::{AtomicUsize, Ordering};

/// Thread-safe counter of files copied or overwritten.
///
/// Shared by all file tasks of a run through an `Arc`.
#[derive(Debug, Default)]
pub struct SyncCounter {
    count: AtomicUsize,
}

impl SyncCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one and return the new total
    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn read(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}
