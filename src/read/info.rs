//! Summary types for archive contents and extraction outcomes.

use crate::read::entry::Entry;

/// Aggregate statistics for an archive's contents.
#[derive(Debug, Clone, Default)]
pub struct ArchiveInfo {
    /// Number of file entries.
    pub file_count: usize,
    /// Number of directory entries.
    pub dir_count: usize,
    /// Sum of uncompressed sizes across file entries.
    pub total_size: u64,
    /// Sum of compressed sizes across file entries.
    pub total_compressed: u64,
    /// Size of the archive container on disk.
    pub archive_size: u64,
    /// Whether any entry is encrypted.
    pub has_encrypted_entries: bool,
}

impl ArchiveInfo {
    pub(crate) fn from_entries(entries: &[Entry], archive_size: u64) -> Self {
        let mut info = Self {
            archive_size,
            ..Self::default()
        };
        for entry in entries {
            if entry.is_directory {
                info.dir_count += 1;
            } else {
                info.file_count += 1;
                info.total_size += entry.uncompressed_size;
                info.total_compressed += entry.compressed_size;
            }
        }
        info.has_encrypted_entries = entries.iter().any(|e| e.is_encrypted);
        info
    }

    /// Overall space savings as a percentage; `0.0` when the archive holds
    /// no data.
    pub fn compression_ratio(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (1.0 - self.total_compressed as f64 / self.total_size as f64) * 100.0
        }
    }
}

/// The outcome of a batch extraction.
///
/// Extraction is best-effort: a member that fails is recorded here and the
/// batch continues. The operation as a whole only returns an `Err` for
/// failures that precede the member loop (unreadable container, unwritable
/// destination, empty selection, cancellation before the first member).
#[derive(Debug, Default)]
pub struct ExtractResult {
    /// Number of members successfully written to disk.
    pub entries_extracted: usize,
    /// Number of members that failed and were skipped.
    pub entries_failed: usize,
    /// Number of selected members skipped because they are directories.
    pub entries_skipped: usize,
    /// Number of members the operation targeted (including skipped ones).
    pub total: usize,
    /// Total uncompressed bytes written.
    pub bytes_extracted: u64,
    /// Per-member failures as `(entry path, reason)` pairs, in batch order.
    pub failures: Vec<(String, String)>,
    /// True when a progress callback stopped the batch partway through.
    /// Counts above reflect the work completed before the stop; nothing is
    /// rolled back.
    pub cancelled: bool,
}

impl ExtractResult {
    /// Returns true when the extraction ran to completion usefully.
    ///
    /// A run with zero extractable members (only directories, or an empty
    /// selection of an empty archive) counts as success. A run where members
    /// were attempted but none succeeded does not. Cancelled runs never do.
    pub fn is_ok(&self) -> bool {
        if self.cancelled {
            return false;
        }
        self.entries_extracted > 0 || self.entries_failed == 0
    }

    /// Returns true if everything targeted was extracted.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.entries_failed == 0
    }
}

impl std::fmt::Display for ExtractResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} extracted, {} failed ({} bytes)",
            self.entries_extracted, self.entries_failed, self.bytes_extracted
        )?;
        if self.cancelled {
            write!(f, ", cancelled")?;
        }
        Ok(())
    }
}
