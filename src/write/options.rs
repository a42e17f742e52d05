//! Archive creation options and results.

use crate::error::{Error, Result};
use crate::password::Password;
use crate::progress::ProgressReporter;

/// Default deflate level, balancing speed and size.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Options controlling archive creation.
///
/// Level 0 stores entries uncompressed; 1-9 select deflate effort. Setting a
/// password switches the whole archive to the legacy ZipCrypto scheme (see
/// [`crate::crypto`] for the caveats).
pub struct WriteOptions {
    pub(crate) level: u8,
    pub(crate) password: Option<Password>,
    /// Optional progress reporter, also consulted for cancellation.
    pub progress: Option<Box<dyn ProgressReporter>>,
}

impl WriteOptions {
    /// Creates options with the default compression level and no password.
    pub fn new() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
            password: None,
            progress: None,
        }
    }

    /// Sets the compression level.
    ///
    /// Returns [`Error::InvalidLevel`] for levels above 9. This is the only
    /// fallible setter, so validation happens at configuration time rather
    /// than in the middle of a batch.
    pub fn with_level(mut self, level: u8) -> Result<Self> {
        if level > 9 {
            return Err(Error::InvalidLevel { level });
        }
        self.level = level;
        Ok(self)
    }

    /// Protects the archive with a password.
    pub fn with_password(mut self, password: impl Into<Password>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Attaches a progress reporter.
    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Returns the configured compression level.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Returns true if a password is set.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WriteOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteOptions")
            .field("level", &self.level)
            .field("password", &self.password.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// The outcome of an archive creation.
#[derive(Debug, Default)]
pub struct WriteResult {
    /// Number of source files written into the archive.
    pub entries_written: usize,
    /// Number of source files that failed and were left out.
    pub entries_failed: usize,
    /// Number of source files the operation targeted.
    pub total: usize,
    /// Total uncompressed bytes read from the sources.
    pub bytes_read: u64,
    /// Total compressed bytes written (entry data only, headers excluded).
    pub bytes_written: u64,
    /// Per-file failures as `(source path, reason)` pairs, in batch order.
    pub failures: Vec<(String, String)>,
    /// True when a progress callback stopped the batch partway through.
    /// The archive is still finalized with the entries written so far.
    pub cancelled: bool,
}

impl WriteResult {
    /// Returns true when the creation ran to completion usefully, on the
    /// same terms as [`ExtractResult::is_ok`](crate::read::ExtractResult::is_ok).
    pub fn is_ok(&self) -> bool {
        if self.cancelled {
            return false;
        }
        self.entries_written > 0 || self.entries_failed == 0
    }

    /// Returns true if every targeted file was written.
    pub fn is_complete(&self) -> bool {
        !self.cancelled && self.entries_failed == 0
    }

    /// Overall space savings as a percentage; `0.0` when nothing was read.
    pub fn space_savings(&self) -> f64 {
        if self.bytes_read == 0 {
            0.0
        } else {
            (1.0 - self.bytes_written as f64 / self.bytes_read as f64) * 100.0
        }
    }
}

impl std::fmt::Display for WriteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} written, {} failed ({} -> {} bytes)",
            self.entries_written, self.entries_failed, self.bytes_read, self.bytes_written
        )?;
        if self.cancelled {
            write!(f, ", cancelled")?;
        }
        Ok(())
    }
}
