//! Unencrypted archive creation with per-file progress.

use std::fs;
use std::io::Write;

use crate::error::{Error, Result};
use crate::timestamp::DosDateTime;
use crate::write::builder::ArchiveBuilder;
use crate::write::mod_time_of;
use crate::write::options::{WriteOptions, WriteResult};
use crate::write::SourceFile;

/// Writes `files` one at a time, reporting progress and tolerating per-file
/// failures.
///
/// A source file that cannot be read, or that would need ZIP64, is recorded
/// in the result and the batch continues. Errors on the archive itself are
/// fatal: the container would be corrupt, so the batch aborts. Cancellation
/// between files finalizes the archive with whatever was written so far.
pub(crate) fn write_archive<W: Write>(
    mut builder: ArchiveBuilder<W>,
    files: &[SourceFile],
    options: &mut WriteOptions,
) -> Result<WriteResult> {
    let mut result = WriteResult {
        total: files.len(),
        ..WriteResult::default()
    };

    if let Some(progress) = options.progress.as_mut() {
        progress.on_total(files.len());
        if progress.should_cancel() {
            return Err(Error::Cancelled);
        }
    }

    let mut processed = 0usize;
    for file in files {
        if let Some(progress) = options.progress.as_mut() {
            progress.on_entry_start(&file.name, 0);
        }

        let mut failure: Option<Error> = None;
        match fs::read(&file.path) {
            Ok(data) => {
                let modified = mod_time_of(&file.path).unwrap_or_else(DosDateTime::now);
                match builder.add_entry(&file.name, &data, modified, options.level, None) {
                    Ok(sizes) => {
                        result.entries_written += 1;
                        result.bytes_read += sizes.read;
                        result.bytes_written += sizes.written;
                    }
                    // Capacity limits hit before anything is written; skip
                    // the file and keep the container intact.
                    Err(e @ Error::UnsupportedFeature { .. }) => failure = Some(e),
                    // Writing to the sink failed partway; the container is
                    // no longer well-formed.
                    Err(e) => return Err(e),
                }
            }
            Err(e) => failure = Some(e.into()),
        }

        match failure {
            None => {
                if let Some(progress) = options.progress.as_mut() {
                    progress.on_entry_complete(&file.name, true);
                }
            }
            Some(e) => {
                log::warn!("failed to add '{}': {}", file.path.display(), e);
                result.entries_failed += 1;
                result
                    .failures
                    .push((file.path.display().to_string(), e.to_string()));
                if let Some(progress) = options.progress.as_mut() {
                    progress.on_warning(&format!("{}: {}", file.path.display(), e));
                    progress.on_entry_complete(&file.name, false);
                }
            }
        }

        processed += 1;
        if let Some(progress) = options.progress.as_mut() {
            let keep_going = progress.on_progress(processed, files.len());
            if !keep_going || progress.should_cancel() {
                log::info!(
                    "creation cancelled after {} of {} files",
                    processed,
                    files.len()
                );
                result.cancelled = true;
                break;
            }
        }
    }

    builder.finish()?;
    Ok(result)
}
