//! A pure Rust ZIP archive manager.
//!
//! zipmate reads, extracts and creates ZIP archives with the Stored and
//! Deflate methods, optional legacy ZipCrypto password protection, progress
//! reporting and cooperative cancellation. It is built for the common
//! "archive manager" workflow: open an archive, show its contents, pull out
//! some or all members, or pack a directory up, with per-member fault
//! tolerance instead of all-or-nothing batches.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use zipmate::{create_archive, Archive, ExtractOptions, WriteOptions};
//!
//! # fn main() -> zipmate::Result<()> {
//! // Pack a directory
//! let mut options = WriteOptions::new().with_level(9)?;
//! create_archive("notes/", "notes.zip", &mut options)?;
//!
//! // List it
//! let archive = Archive::open_path("notes.zip")?;
//! for entry in archive.entries() {
//!     println!("{:>10}  {}", entry.uncompressed_size, entry.path);
//! }
//!
//! // Extract a selection by listing index
//! archive.extract_indices("out/", &[0, 2], &mut ExtractOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Passwords
//!
//! Archives can be protected with the traditional ZipCrypto scheme for
//! interoperability with common ZIP tools; see the [`crypto`] module for
//! why this is obfuscation rather than real protection.
//! [`probe_password_required`] tells a UI whether to prompt before opening,
//! and [`Archive::open_path_with_password`] authenticates eagerly so a bad
//! password fails at open time, not halfway through an extraction.
//!
//! # Scope
//!
//! ZIP64, multi-disk archives and compression methods beyond Stored/Deflate
//! are rejected with [`Error::UnsupportedFeature`] /
//! [`Error::UnsupportedMethod`] rather than misread.

pub mod crypto;
pub mod error;
pub mod format;
pub mod password;
pub mod progress;
pub mod read;
pub mod timestamp;
pub mod write;

pub use error::{Error, Result};
pub use format::CompressionMethod;
pub use password::Password;
pub use progress::{CallbackProgress, CancelFlag, FlagProgress, NoProgress, ProgressReporter};
pub use read::{probe_password_required, Archive, ArchiveInfo, Entry, ExtractOptions, ExtractResult};
pub use timestamp::DosDateTime;
pub use write::{create_archive, WriteOptions, WriteResult, DEFAULT_COMPRESSION_LEVEL};
