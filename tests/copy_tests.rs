//! Tests for atomic file copy operations

use projsync::executor::copy_file_atomic;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn create_test_file(path: &PathBuf, content: &[u8]) {
    let mut file = fs::File::create(path).expect("Failed to create test file");
    file.write_all(content)
        .expect("Failed to write test content");
    file.flush().expect("Failed to flush");
}

fn set_file_mtime(path: &PathBuf, mtime: SystemTime) {
    let filetime_mtime = filetime::FileTime::from_system_time(mtime);
    filetime::set_file_mtime(path, filetime_mtime).expect("Failed to set mtime");
}

#[test]
fn test_copy_basic_content() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.jpg");
    let content = b"Hello, projsync! This is a test file.";
    create_test_file(&src_path, content);

    let dest_path = root.join("dest.jpg");

    let bytes_copied =
        copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    assert_eq!(bytes_copied, content.len() as u64);
    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), content);
}

#[test]
fn test_copy_creates_directories() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.jpg");
    create_test_file(&src_path, b"test content");

    let dest_path = root.join("0001 new/dest.jpg");

    copy_file_atomic(&src_path, &dest_path)
        .expect("copy_file_atomic should create parent directories");

    assert_eq!(
        fs::read(&dest_path).expect("Failed to read dest file"),
        b"test content"
    );
}

#[test]
fn test_copy_preserves_mtime_exactly() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.jpg");
    create_test_file(&src_path, b"test content");
    set_file_mtime(&src_path, SystemTime::now() - Duration::from_secs(3600));

    let dest_path = root.join("dest.jpg");
    copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    let src_mtime = filetime::FileTime::from_last_modification_time(
        &fs::metadata(&src_path).expect("Failed to read src metadata"),
    );
    let dest_mtime = filetime::FileTime::from_last_modification_time(
        &fs::metadata(&dest_path).expect("Failed to read dest metadata"),
    );

    assert_eq!(src_mtime, dest_mtime);
}

#[test]
fn test_copy_replaces_existing_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.jpg");
    create_test_file(&src_path, b"fresh");
    let dest_path = root.join("dest.jpg");
    create_test_file(&dest_path, b"stale content that is longer");

    copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should replace");

    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), b"fresh");
}

#[test]
fn test_copy_removes_part_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.jpg");
    create_test_file(&src_path, b"test content");

    let dest_path = root.join("dest.jpg");
    copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    let leftovers: Vec<_> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty(), ".part file should be removed after successful copy");
    assert!(dest_path.exists());
}

#[test]
fn test_copy_large_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("large.bin");
    let size = 1024 * 1024;
    let content: Vec<u8> = (0..size).map(|i| (i % 256) as u8).collect();
    create_test_file(&src_path, &content);

    let dest_path = root.join("large_copy.bin");

    let bytes_copied = copy_file_atomic(&src_path, &dest_path)
        .expect("copy_file_atomic should handle large files");

    assert_eq!(bytes_copied, size as u64);
    assert_eq!(fs::read(&dest_path).expect("Failed to read dest file"), content);
}

#[test]
fn test_copy_empty_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("empty");
    create_test_file(&src_path, b"");

    let dest_path = root.join("empty_copy");
    let bytes_copied = copy_file_atomic(&src_path, &dest_path).expect("copy empty file");

    assert_eq!(bytes_copied, 0);
    assert!(dest_path.exists());
}

#[test]
fn test_copy_preserves_permissions() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    let src_path = root.join("source.jpg");
    create_test_file(&src_path, b"test content");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&src_path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o640);
        fs::set_permissions(&src_path, perms).expect("Failed to set permissions");
    }

    let dest_path = root.join("dest.jpg");
    copy_file_atomic(&src_path, &dest_path).expect("copy_file_atomic should succeed");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let src_perms = fs::metadata(&src_path)
            .expect("Failed to get src metadata")
            .permissions();
        let dest_perms = fs::metadata(&dest_path)
            .expect("Failed to get dest metadata")
            .permissions();

        assert_eq!(
            src_perms.mode() & 0o777,
            dest_perms.mode() & 0o777,
            "Permissions should be preserved"
        );
    }
}
