//! Error types for ZIP archive operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when working with ZIP archives, along with a convenient
//! [`Result<T>`] type alias.
//!
//! All fallible operations in this crate return `Result<T, Error>`:
//!
//! ```rust,no_run
//! use zipmate::{Archive, ExtractOptions, Result};
//!
//! fn extract_archive(path: &str, dest: &str) -> Result<()> {
//!     let archive = Archive::open_path(path)?;
//!     archive.extract(dest, &mut ExtractOptions::default())?;
//!     Ok(())
//! }
//! ```
//!
//! Note that a failure of a *single member* inside a batch operation is not
//! an `Error`: extraction and creation tolerate per-member failures and
//! aggregate them into [`ExtractResult`] / [`WriteResult`] instead of
//! aborting the batch.
//!
//! [`ExtractResult`]: crate::read::ExtractResult
//! [`WriteResult`]: crate::write::WriteResult

use std::io;
use std::path::PathBuf;

/// Helper struct for formatting WrongPassword error messages.
struct WrongPasswordDisplay<'a> {
    entry_index: Option<usize>,
    entry_name: Option<&'a str>,
}

impl std::fmt::Display for WrongPasswordDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Wrong password")?;
        match (self.entry_index, self.entry_name) {
            (Some(idx), Some(name)) => write!(f, " for entry {} ({})", idx, name),
            (Some(idx), None) => write!(f, " for entry {}", idx),
            (None, Some(name)) => write!(f, " for entry '{}'", name),
            (None, None) => Ok(()),
        }
    }
}

/// Helper struct for formatting CrcMismatch error messages.
struct CrcMismatchDisplay<'a> {
    entry_index: usize,
    entry_name: Option<&'a str>,
    expected: u32,
    actual: u32,
}

impl std::fmt::Display for CrcMismatchDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CRC mismatch for entry {}", self.entry_index)?;
        if let Some(name) = self.entry_name {
            write!(f, " ({})", name)?;
        }
        write!(f, ": expected {:#x}, got {:#x}", self.expected, self.actual)
    }
}

/// The main error type for ZIP archive operations.
///
/// This enum represents all terminal failures that can occur when reading,
/// writing, or extracting ZIP archives. Each variant includes relevant
/// context to help diagnose the issue.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    ///
    /// This wraps [`std::io::Error`] and is returned when file operations
    /// fail: permission denied, disk full, path too long, and so on.
    /// Check the underlying [`std::io::ErrorKind`] for specific handling.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive or creation source path does not exist.
    #[error("Path not found: {path}")]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The file is not a valid ZIP container.
    ///
    /// This error occurs when the end-of-central-directory record cannot be
    /// located, a record signature does not match, or a header field is
    /// inconsistent with the rest of the archive. The string describes what
    /// was expected vs. found.
    #[error("Invalid ZIP format: {0}")]
    InvalidFormat(String),

    /// The supplied password failed authentication against a member.
    ///
    /// ZipCrypto only exposes a single check byte per entry, so a wrong
    /// password has a 1-in-256 chance of passing the header check; such
    /// survivors are still caught by the CRC verification after
    /// decompression.
    #[error("{}", WrongPasswordDisplay { entry_index: *.entry_index, entry_name: entry_name.as_deref() })]
    WrongPassword {
        /// The entry index where authentication failed (if known).
        entry_index: Option<usize>,
        /// The entry name where authentication failed (if known).
        entry_name: Option<String>,
    },

    /// Archive creation found no files under the source path.
    #[error("No files to archive under: {path}")]
    EmptySource {
        /// The source path that yielded no regular files.
        path: PathBuf,
    },

    /// An index-based extraction request resolved to zero valid members.
    ///
    /// Out-of-range indices are dropped silently; this error is returned
    /// only when *nothing* remains after filtering.
    #[error("No valid entry indices selected")]
    InvalidSelection,

    /// The CRC checksum of decompressed data does not match the stored value.
    ///
    /// This indicates data corruption, or a wrong password that slipped past
    /// the ZipCrypto header check.
    #[error("{}", CrcMismatchDisplay { entry_index: *entry_index, entry_name: entry_name.as_deref(), expected: *expected, actual: *actual })]
    CrcMismatch {
        /// The entry index with the CRC mismatch.
        entry_index: usize,
        /// The entry name with the CRC mismatch (if known).
        entry_name: Option<String>,
        /// The expected CRC value from the central directory.
        expected: u32,
        /// The actual CRC value of the extracted data.
        actual: u32,
    },

    /// The entry uses a compression method other than Stored or Deflate.
    #[error("Unsupported compression method: {method_id}")]
    UnsupportedMethod {
        /// The raw method ID from the entry header.
        method_id: u16,
    },

    /// A container feature this crate does not implement (e.g. ZIP64).
    #[error("Unsupported feature: {feature}")]
    UnsupportedFeature {
        /// The name of the unsupported feature.
        feature: &'static str,
    },

    /// An entry path would escape the extraction directory.
    ///
    /// This is a security error indicating the archive contains paths
    /// designed to break out of the destination (e.g. `../../etc/passwd`
    /// or an absolute path). During batch extraction the affected member is
    /// skipped and recorded as a failure rather than aborting the batch.
    #[error("Unsafe entry path: {path}")]
    PathTraversal {
        /// The offending archive-internal path.
        path: String,
    },

    /// A compression level outside the valid `0..=9` range.
    #[error("Invalid compression level: {level} (expected 0-9)")]
    InvalidLevel {
        /// The rejected level.
        level: u8,
    },

    /// The operation was cancelled by the user.
    ///
    /// Returned when a progress callback requests cancellation before any
    /// member has been processed. Mid-batch cancellation instead surfaces
    /// through the `cancelled` flag on the batch result, preserving counts.
    #[error("Operation cancelled")]
    Cancelled,
}

/// A specialized [`Result`](std::result::Result) type for ZIP operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if this error indicates a password problem.
    pub fn is_password_error(&self) -> bool {
        matches!(self, Error::WrongPassword { .. })
    }

    /// Creates a `NotFound` error for the given path.
    pub(crate) fn not_found(path: impl Into<PathBuf>) -> Self {
        Error::NotFound { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_password_display_variants() {
        let err = Error::WrongPassword {
            entry_index: Some(3),
            entry_name: Some("secret.txt".to_string()),
        };
        assert_eq!(err.to_string(), "Wrong password for entry 3 (secret.txt)");

        let err = Error::WrongPassword {
            entry_index: None,
            entry_name: None,
        };
        assert_eq!(err.to_string(), "Wrong password");
    }

    #[test]
    fn test_crc_mismatch_display() {
        let err = Error::CrcMismatch {
            entry_index: 0,
            entry_name: Some("a.txt".to_string()),
            expected: 0xDEADBEEF,
            actual: 0x12345678,
        };
        let msg = err.to_string();
        assert!(msg.contains("a.txt"));
        assert!(msg.contains("0xdeadbeef"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_is_password_error() {
        let err = Error::WrongPassword {
            entry_index: None,
            entry_name: None,
        };
        assert!(err.is_password_error());
        assert!(!Error::Cancelled.is_password_error());
    }
}
