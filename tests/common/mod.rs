//! Shared test utilities for integration tests.
//!
//! Archives are built through the public filesystem API: test fixtures are
//! written into a temp directory, packed with [`zipmate::create_archive`],
//! and read back from disk.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test
//! file compiles as a separate crate and may only use a subset of these
//! helpers.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zipmate::{create_archive, WriteOptions, WriteResult};

/// Writes a source tree of (relative path, contents) files under `root`.
pub fn write_source_tree(root: &Path, entries: &[(&str, &[u8])]) {
    for (name, data) in entries {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, data).expect("Failed to write fixture file");
    }
}

/// Builds an archive from the given entries with the given options.
///
/// Returns the temp directory keeping everything alive, the archive path
/// and the creation result.
pub fn build_archive_with_result(
    entries: &[(&str, &[u8])],
    mut options: WriteOptions,
) -> (TempDir, PathBuf, WriteResult) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let source = tmp.path().join("source");
    fs::create_dir_all(&source).expect("Failed to create source dir");
    write_source_tree(&source, entries);

    let dest = tmp.path().join("test.zip");
    let result =
        create_archive(&source, &dest, &mut options).expect("Failed to create test archive");
    (tmp, dest, result)
}

/// Builds an archive with default options.
pub fn build_archive(entries: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
    let (tmp, dest, _) = build_archive_with_result(entries, WriteOptions::new());
    (tmp, dest)
}

/// Builds a password-protected archive.
pub fn build_encrypted_archive(entries: &[(&str, &[u8])], password: &str) -> (TempDir, PathBuf) {
    let (tmp, dest, _) =
        build_archive_with_result(entries, WriteOptions::new().with_password(password));
    (tmp, dest)
}

/// Reads one extracted file back, panicking with context on failure.
pub fn read_extracted(dir: &Path, name: &str) -> Vec<u8> {
    fs::read(dir.join(name))
        .unwrap_or_else(|e| panic!("Failed to read extracted '{}': {}", name, e))
}

/// Asserts that extracting into `dest` reproduces every fixture exactly.
pub fn verify_extracted_tree(dest: &Path, entries: &[(&str, &[u8])]) {
    for (name, data) in entries {
        let actual = read_extracted(dest, name);
        assert_eq!(
            &actual, data,
            "extracted contents of '{}' differ from the fixture",
            name
        );
    }
}
