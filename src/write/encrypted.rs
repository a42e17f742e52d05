//! Password-protected archive creation.
//!
//! Encrypted creation runs as a single batch: any failure aborts the whole
//! operation rather than leaving a partially protected archive. Progress is
//! reported at archive granularity only, before and after the batch.

use std::fs;
use std::io::Write;

use crate::error::{Error, Result};
use crate::password::Password;
use crate::timestamp::DosDateTime;
use crate::write::builder::ArchiveBuilder;
use crate::write::mod_time_of;
use crate::write::options::{WriteOptions, WriteResult};
use crate::write::SourceFile;

pub(crate) fn write_archive<W: Write>(
    mut builder: ArchiveBuilder<W>,
    files: &[SourceFile],
    password: &Password,
    options: &mut WriteOptions,
) -> Result<WriteResult> {
    if let Some(progress) = options.progress.as_mut() {
        progress.on_total(1);
        if progress.should_cancel() {
            return Err(Error::Cancelled);
        }
    }

    let mut result = WriteResult {
        total: files.len(),
        ..WriteResult::default()
    };
    for file in files {
        let data = fs::read(&file.path)?;
        let modified = mod_time_of(&file.path).unwrap_or_else(DosDateTime::now);
        let sizes = builder.add_entry(&file.name, &data, modified, options.level, Some(password))?;
        result.entries_written += 1;
        result.bytes_read += sizes.read;
        result.bytes_written += sizes.written;
    }
    builder.finish()?;

    if let Some(progress) = options.progress.as_mut() {
        progress.on_progress(1, 1);
    }
    Ok(result)
}
