//! Directory scanning logic

mod walker;

pub use walker::{scan_files, scan_projects};
