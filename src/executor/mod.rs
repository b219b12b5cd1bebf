//! Executor module for file operations

pub mod copy;
pub mod counter;
pub mod pool;

pub use copy::{copy_file_atomic, part_path_for};
pub use counter::SyncCounter;
pub use pool::{BoundedExecutor, DEFAULT_MAX_CONCURRENCY};
