//! Batch extraction of archive members.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use filetime::FileTime;

use crate::error::{Error, Result};
use crate::format::records::CentralDirectoryRecord;
use crate::read::decompression::read_entry_data;
use crate::read::entry::Entry;
use crate::read::info::ExtractResult;
use crate::read::options::ExtractOptions;
use crate::read::path_safety::safe_join;
use crate::read::Archive;

impl Archive {
    /// Extracts every file member into `dest`.
    ///
    /// The destination directory is created if needed. Extraction is
    /// best-effort: members that fail (bad CRC, unsupported method, unsafe
    /// path, missing password) are recorded in the result and the batch
    /// continues. Directory structure is recreated implicitly from file
    /// paths.
    ///
    /// Indices remain bound to this `Archive`'s snapshot of the table of
    /// contents; rewriting the file on disk after opening does not shift
    /// what gets extracted, it only makes reads fail.
    pub fn extract(&self, dest: impl AsRef<Path>, options: &mut ExtractOptions) -> Result<ExtractResult> {
        let selection: Vec<usize> = self
            .entries
            .iter()
            .filter(|e| e.is_file())
            .map(|e| e.index)
            .collect();
        self.run_extraction(dest.as_ref(), &selection, options)
    }

    /// Extracts the members at the given listing indices into `dest`.
    ///
    /// Out-of-range indices are dropped with a warning. Directory entries
    /// among the selection are skipped and counted separately, not treated
    /// as failures. Returns [`Error::InvalidSelection`] when no valid index
    /// remains after filtering.
    pub fn extract_indices(
        &self,
        dest: impl AsRef<Path>,
        indices: &[usize],
        options: &mut ExtractOptions,
    ) -> Result<ExtractResult> {
        let mut valid = Vec::with_capacity(indices.len());
        for &index in indices {
            if index < self.entries.len() {
                valid.push(index);
            } else {
                log::warn!(
                    "index {} out of range (archive has {} entries), dropped",
                    index,
                    self.entries.len()
                );
            }
        }
        if valid.is_empty() {
            return Err(Error::InvalidSelection);
        }
        self.run_extraction(dest.as_ref(), &valid, options)
    }

    fn run_extraction(
        &self,
        dest: &Path,
        selection: &[usize],
        options: &mut ExtractOptions,
    ) -> Result<ExtractResult> {
        fs::create_dir_all(dest)?;

        // One handle for the whole batch, dropped when the operation ends.
        let file = File::open(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::not_found(&self.path)
            } else {
                Error::Io(e)
            }
        })?;
        let mut reader = BufReader::new(file);

        let mut result = ExtractResult {
            total: selection.len(),
            ..ExtractResult::default()
        };

        if let Some(progress) = options.progress.as_mut() {
            progress.on_total(selection.len());
            if progress.should_cancel() {
                return Err(Error::Cancelled);
            }
        }

        let mut processed = 0usize;
        for &index in selection {
            let entry = &self.entries[index];
            let record = &self.records[index];

            if entry.is_directory {
                log::debug!("skipping directory entry '{}'", entry.path);
                result.entries_skipped += 1;
                if let Some(progress) = options.progress.as_mut() {
                    progress.on_warning(&format!("skipping directory '{}'", entry.path));
                }
            } else {
                if let Some(progress) = options.progress.as_mut() {
                    progress.on_entry_start(&entry.path, entry.uncompressed_size);
                }
                match extract_one(
                    &mut reader,
                    record,
                    index,
                    entry,
                    dest,
                    self.password.as_ref(),
                    options.restore_mtime,
                ) {
                    Ok(bytes) => {
                        result.entries_extracted += 1;
                        result.bytes_extracted += bytes;
                        if let Some(progress) = options.progress.as_mut() {
                            progress.on_entry_complete(&entry.path, true);
                        }
                    }
                    Err(e) => {
                        log::warn!("failed to extract '{}': {}", entry.path, e);
                        result.entries_failed += 1;
                        result.failures.push((entry.path.clone(), e.to_string()));
                        if let Some(progress) = options.progress.as_mut() {
                            progress.on_warning(&format!("{}: {}", entry.path, e));
                            progress.on_entry_complete(&entry.path, false);
                        }
                    }
                }
            }

            processed += 1;
            if let Some(progress) = options.progress.as_mut() {
                let keep_going = progress.on_progress(processed, selection.len());
                if !keep_going || progress.should_cancel() {
                    log::info!(
                        "extraction cancelled after {} of {} members",
                        processed,
                        selection.len()
                    );
                    result.cancelled = true;
                    break;
                }
            }
        }

        Ok(result)
    }
}

fn extract_one<R: Read + Seek>(
    reader: &mut R,
    record: &CentralDirectoryRecord,
    index: usize,
    entry: &Entry,
    dest: &Path,
    password: Option<&crate::password::Password>,
    restore_mtime: bool,
) -> Result<u64> {
    let target = safe_join(dest, &entry.path)?;
    let data = read_entry_data(reader, record, index, password)?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, &data)?;

    if restore_mtime {
        if let Some(secs) = entry.modified.and_then(|ts| ts.as_unix_secs()) {
            let mtime = FileTime::from_unix_time(secs, 0);
            if let Err(e) = filetime::set_file_mtime(&target, mtime) {
                log::debug!("could not restore mtime for '{}': {}", entry.path, e);
            }
        }
    }
    Ok(data.len() as u64)
}
