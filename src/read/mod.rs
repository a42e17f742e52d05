//! Reading ZIP archives: listing, extraction and password probing.

mod decompression;
mod entry;
mod extraction;
mod info;
mod open;
mod options;
mod path_safety;

pub use entry::Entry;
pub use info::{ArchiveInfo, ExtractResult};
pub use open::probe_password_required;
pub use options::ExtractOptions;

use std::path::{Path, PathBuf};

use crate::format::records::CentralDirectoryRecord;
use crate::password::Password;

/// An opened ZIP archive.
///
/// Holds a snapshot of the central directory taken at open time, plus the
/// (verified) password if one was supplied. No file handle is kept between
/// operations; each extraction reopens the file for its own duration, so an
/// `Archive` can outlive arbitrary filesystem churn and is cheap to keep
/// around.
///
/// Listing indices refer to positions in [`entries`](Self::entries) and stay
/// valid for this value's lifetime regardless of changes to the file on
/// disk.
///
/// ```rust,no_run
/// use zipmate::Archive;
///
/// let archive = Archive::open_path("backup.zip")?;
/// for (i, entry) in archive.entries().iter().enumerate() {
///     println!("{:3}  {:>10}  {}", i, entry.uncompressed_size, entry.path);
/// }
/// # Ok::<(), zipmate::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Archive {
    pub(crate) path: PathBuf,
    pub(crate) entries: Vec<Entry>,
    pub(crate) records: Vec<CentralDirectoryRecord>,
    pub(crate) password: Option<Password>,
    pub(crate) archive_size: u64,
}

impl Archive {
    /// Returns the archive's entries in central-directory order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the entry at `index`, if in range.
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Returns the number of entries (files and directories).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the path this archive was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if any entry is encrypted.
    pub fn has_encrypted_entries(&self) -> bool {
        self.entries.iter().any(|e| e.is_encrypted)
    }

    /// Computes aggregate statistics over the entries.
    pub fn info(&self) -> ArchiveInfo {
        ArchiveInfo::from_entries(&self.entries, self.archive_size)
    }
}
