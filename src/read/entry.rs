//! Archive entry descriptors.

use crate::format::{CompressionMethod, DOS_ATTR_DIRECTORY};
use crate::format::records::CentralDirectoryRecord;
use crate::timestamp::DosDateTime;

/// A normalized view of one archive member's metadata.
///
/// Derived read-only from the member's central-directory record; no I/O is
/// performed and derived values ([`compression_ratio`](Self::compression_ratio),
/// the formatted date) are computed on access, not cached.
///
/// This struct is marked `#[non_exhaustive]` to allow adding new fields in
/// future versions without breaking downstream code.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Entry {
    /// Archive-internal relative path, forward-slash separated.
    ///
    /// A trailing slash marks a directory entry.
    pub path: String,
    /// Whether this entry is a directory, derived from the trailing-slash
    /// convention or from the DOS directory attribute bit.
    pub is_directory: bool,
    /// Uncompressed size in bytes (0 for directory entries).
    pub uncompressed_size: u64,
    /// Compressed size in bytes.
    ///
    /// NOT guaranteed to be `<= uncompressed_size`: stored or incompressible
    /// entries can expand slightly.
    pub compressed_size: u64,
    /// CRC-32 checksum of the uncompressed data. 0 is valid for directories
    /// and empty files.
    pub crc32: u32,
    /// Modification time, or `None` when the stored fields are unparsable.
    pub modified: Option<DosDateTime>,
    /// Whether this entry's data is encrypted.
    pub is_encrypted: bool,
    /// The entry's compression method.
    pub(crate) method: CompressionMethod,
    /// Position in central-directory order.
    pub(crate) index: usize,
}

impl Entry {
    pub(crate) fn from_record(record: &CentralDirectoryRecord, index: usize) -> Self {
        let is_directory =
            record.name.ends_with('/') || record.external_attrs & DOS_ATTR_DIRECTORY != 0;
        Self {
            path: record.name.clone(),
            is_directory,
            uncompressed_size: record.uncompressed_size as u64,
            compressed_size: record.compressed_size as u64,
            crc32: record.crc32,
            modified: DosDateTime::from_raw(record.dos_date, record.dos_time).validated(),
            is_encrypted: record.is_encrypted(),
            method: CompressionMethod::from_raw(record.method),
            index,
        }
    }

    /// Returns the file name (last component of the path).
    pub fn name(&self) -> &str {
        self.path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.path)
    }

    /// Returns true if this is a file (not a directory).
    pub fn is_file(&self) -> bool {
        !self.is_directory
    }

    /// Returns the compression method.
    pub fn method(&self) -> CompressionMethod {
        self.method
    }

    /// Returns the space saved by compression as a percentage.
    ///
    /// `(1 - compressed/uncompressed) * 100`, defined as exactly `0.0` when
    /// `uncompressed_size == 0` (directories, empty files). Negative for
    /// entries that expanded.
    pub fn compression_ratio(&self) -> f64 {
        if self.uncompressed_size == 0 {
            0.0
        } else {
            (1.0 - self.compressed_size as f64 / self.uncompressed_size as f64) * 100.0
        }
    }

    /// Returns the modification time formatted as `YYYY-MM-DD HH:MM:SS`,
    /// or `"Unknown"` when the stored timestamp is invalid.
    pub fn formatted_modified(&self) -> String {
        match self.modified {
            Some(ts) => ts.to_string(),
            None => "Unknown".to_string(),
        }
    }
}
