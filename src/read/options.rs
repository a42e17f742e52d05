//! Extraction options.

use crate::progress::ProgressReporter;

/// Options controlling archive extraction.
///
/// ```rust,no_run
/// use zipmate::{Archive, ExtractOptions, CallbackProgress};
///
/// let archive = Archive::open_path("data.zip")?;
/// let mut options = ExtractOptions::new()
///     .with_progress(Box::new(CallbackProgress::new(|done, total| {
///         println!("{}/{}", done, total);
///         true
///     })));
/// archive.extract("out", &mut options)?;
/// # Ok::<(), zipmate::Error>(())
/// ```
pub struct ExtractOptions {
    /// Optional progress reporter, also consulted for cancellation.
    pub progress: Option<Box<dyn ProgressReporter>>,
    /// Restore each file's modification time from the archive. Defaults to
    /// true; entries with an unparsable timestamp keep the filesystem time.
    pub restore_mtime: bool,
}

impl ExtractOptions {
    /// Creates extraction options with default settings.
    pub fn new() -> Self {
        Self {
            progress: None,
            restore_mtime: true,
        }
    }

    /// Attaches a progress reporter.
    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Controls modification-time restoration.
    pub fn with_restore_mtime(mut self, restore: bool) -> Self {
        self.restore_mtime = restore;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("progress", &self.progress.is_some())
            .field("restore_mtime", &self.restore_mtime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;

    #[test]
    fn test_default_settings() {
        let options = ExtractOptions::new();
        assert!(options.progress.is_none());
        assert!(options.restore_mtime);
    }

    #[test]
    fn test_builder_chain() {
        let options = ExtractOptions::new()
            .with_progress(Box::new(NoProgress))
            .with_restore_mtime(false);
        assert!(options.progress.is_some());
        assert!(!options.restore_mtime);
    }
}
