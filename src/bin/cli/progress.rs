//! Progress bar implementation for CLI operations.

use indicatif::{ProgressBar, ProgressStyle};
use zipmate::{CancelFlag, ProgressReporter};

/// Progress display for batch operations.
///
/// Wraps an indicatif bar at member granularity and relays Ctrl+C through a
/// [`CancelFlag`], so the library stops cooperatively after the current
/// member instead of being killed mid-write.
pub struct CliProgress {
    bar: ProgressBar,
    cancel: CancelFlag,
    quiet: bool,
}

impl CliProgress {
    /// Creates a new progress display
    pub fn new(quiet: bool, cancel: CancelFlag) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        };
        Self { bar, cancel, quiet }
    }

    /// Returns a handle to the underlying bar for finishing it after the
    /// boxed reporter has been handed to the library.
    pub fn bar_handle(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl ProgressReporter for CliProgress {
    fn on_total(&mut self, total_entries: usize) {
        self.bar.set_length(total_entries as u64);
    }

    fn on_progress(&mut self, processed: usize, _total_entries: usize) -> bool {
        self.bar.set_position(processed as u64);
        !self.cancel.is_cancelled()
    }

    fn on_entry_start(&mut self, entry_name: &str, _size: u64) {
        if self.quiet {
            return;
        }
        // Truncate long names
        let display_name = if entry_name.len() > 40 {
            format!("...{}", &entry_name[entry_name.len() - 37..])
        } else {
            entry_name.to_string()
        };
        self.bar.set_message(display_name);
    }

    fn on_warning(&mut self, message: &str) {
        let line = format!("warning: {}", message);
        self.bar.suspend(|| eprintln!("{}", line));
    }

    fn should_cancel(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
