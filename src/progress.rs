//! Progress reporting for archive operations.
//!
//! Long-running operations (extraction, creation) report progress through
//! the [`ProgressReporter`] trait. Callbacks fire at member granularity:
//! cancellation is cooperative and takes effect after the current member
//! finishes, never mid-file.
//!
//! # Example
//!
//! ```rust,no_run
//! use zipmate::{Archive, ExtractOptions};
//! use zipmate::progress::CallbackProgress;
//!
//! # fn main() -> zipmate::Result<()> {
//! let archive = Archive::open_path("archive.zip")?;
//! let mut options = ExtractOptions::new().with_progress(Box::new(
//!     CallbackProgress::new(|processed, total| {
//!         println!("{}/{}", processed, total);
//!         true // return false to cancel
//!     }),
//! ));
//! archive.extract("./output", &mut options)?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Progress reporting trait for archive operations.
///
/// All methods have default no-op implementations, so reporters only
/// override what they need. `on_progress` doubles as the cancellation
/// channel: returning `false` requests a cooperative stop after the member
/// currently being processed.
pub trait ProgressReporter: Send {
    /// Called once before the batch starts with the number of members.
    fn on_total(&mut self, total_entries: usize) {
        let _ = total_entries;
    }

    /// Called after each member attempt (success or failure).
    ///
    /// Returns `true` to continue or `false` to request cancellation.
    fn on_progress(&mut self, processed: usize, total_entries: usize) -> bool {
        let _ = (processed, total_entries);
        true
    }

    /// Called when a member starts processing.
    fn on_entry_start(&mut self, entry_name: &str, size: u64) {
        let _ = (entry_name, size);
    }

    /// Called when a member finishes processing.
    fn on_entry_complete(&mut self, entry_name: &str, success: bool) {
        let _ = (entry_name, success);
    }

    /// Called on non-fatal conditions (skipped directory selection, member
    /// failure that the batch tolerates, unsafe path).
    fn on_warning(&mut self, message: &str) {
        let _ = message;
    }

    /// Checked before each member, allowing early termination without
    /// waiting for the next `on_progress` callback.
    fn should_cancel(&self) -> bool {
        false
    }
}

/// A progress reporter that does nothing (null object pattern).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

/// Adapts a `(processed, total) -> continue` closure to [`ProgressReporter`].
///
/// This is the bridge for presentation layers that only care about the
/// per-member progress contract.
pub struct CallbackProgress<F> {
    callback: F,
}

impl<F: FnMut(usize, usize) -> bool + Send> CallbackProgress<F> {
    /// Wraps the given callback.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F: FnMut(usize, usize) -> bool + Send> ProgressReporter for CallbackProgress<F> {
    fn on_progress(&mut self, processed: usize, total_entries: usize) -> bool {
        (self.callback)(processed, total_entries)
    }
}

/// A cloneable cancellation flag for cross-thread cancellation.
///
/// A GUI worker thread or a Ctrl+C handler sets the flag; the operation
/// observes it through [`ProgressReporter::should_cancel`] between members.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Creates a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}

/// A reporter that observes a [`CancelFlag`] and otherwise stays silent.
#[derive(Debug, Clone, Default)]
pub struct FlagProgress {
    flag: CancelFlag,
}

impl FlagProgress {
    /// Creates a reporter observing the given flag.
    pub fn new(flag: CancelFlag) -> Self {
        Self { flag }
    }
}

impl ProgressReporter for FlagProgress {
    fn on_progress(&mut self, _processed: usize, _total_entries: usize) -> bool {
        !self.flag.is_cancelled()
    }

    fn should_cancel(&self) -> bool {
        self.flag.is_cancelled()
    }
}
