//! Content fingerprints for change detection

use crate::types::{FileOp, SyncError};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Read buffer size used while hashing
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Compute the Blake3 hash of a file
///
/// The file is streamed in 8 KiB chunks so peak memory does not depend on
/// file size.
///
/// # Example
/// ```no_run
/// use projsync::hash::compute_hash;
/// use std::path::Path;
///
/// let hash = compute_hash(Path::new("file.jpg"))?;
/// # Ok::<(), projsync::types::SyncError>(())
/// ```
pub fn compute_hash(file_path: &Path) -> Result<[u8; 32], SyncError> {
    let mut file =
        File::open(file_path).map_err(|e| SyncError::file_op(FileOp::Read, file_path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SyncError::file_op(FileOp::Hash, file_path, e)),
        };

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Lowercase hex digest of a file, or `None` if it does not exist.
pub fn digest(file_path: &Path) -> Result<Option<String>, SyncError> {
    match compute_hash(file_path) {
        Ok(hash) => Ok(Some(to_hex(&hash))),
        Err(SyncError::FileOperation { source, .. }) if source.kind() == ErrorKind::NotFound => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Lowercase hex encoding of a digest
pub fn to_hex(hash: &[u8; 32]) -> String {
    blake3::Hash::from(*hash).to_hex().to_string()
}
