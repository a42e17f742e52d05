//! Creating ZIP archives from files and directory trees.

mod builder;
mod encrypted;
mod options;
mod standard;

pub use options::{WriteOptions, WriteResult, DEFAULT_COMPRESSION_LEVEL};

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::timestamp::DosDateTime;

use builder::ArchiveBuilder;

/// One file scheduled for archiving.
pub(crate) struct SourceFile {
    /// Location on disk.
    pub path: PathBuf,
    /// Archive-internal path, forward-slash separated.
    pub name: String,
}

/// Which writing strategy a creation run uses.
///
/// Chosen once per operation from the options. The standard path reports
/// per-file progress and tolerates per-file failures; the encrypted path is
/// a single all-or-nothing batch with archive-granularity progress.
enum CodecPath {
    Standard,
    Encrypted(crate::password::Password),
}

impl CodecPath {
    fn select(options: &WriteOptions) -> Self {
        match &options.password {
            Some(password) => Self::Encrypted(password.clone()),
            None => Self::Standard,
        }
    }
}

/// Creates a ZIP archive at `dest` from the file or directory at `source`.
///
/// A file source becomes a single entry named after the file. A directory
/// source is walked recursively and entries are named by their path relative
/// to it; empty directories produce no entries. Returns
/// [`Error::NotFound`] for a missing source and [`Error::EmptySource`] when
/// the walk finds no regular files.
///
/// On any operation-level error the partially written `dest` is removed.
///
/// ```rust,no_run
/// use zipmate::{create_archive, WriteOptions};
///
/// let mut options = WriteOptions::new().with_level(9)?.with_password("secret");
/// let result = create_archive("photos/", "photos.zip", &mut options)?;
/// println!("{}", result);
/// # Ok::<(), zipmate::Error>(())
/// ```
pub fn create_archive(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &mut WriteOptions,
) -> Result<WriteResult> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    if !source.exists() {
        return Err(Error::not_found(source));
    }
    let files = collect_sources(source)?;
    if files.is_empty() {
        return Err(Error::EmptySource {
            path: source.to_path_buf(),
        });
    }
    log::info!(
        "creating '{}' from {} file(s) under '{}'",
        dest.display(),
        files.len(),
        source.display()
    );

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let sink = BufWriter::new(File::create(dest)?);
    let builder = ArchiveBuilder::new(sink);

    let outcome = match CodecPath::select(options) {
        CodecPath::Standard => standard::write_archive(builder, &files, options),
        CodecPath::Encrypted(password) => {
            encrypted::write_archive(builder, &files, &password, options)
        }
    };

    match outcome {
        Ok(result) => Ok(result),
        Err(e) => {
            // Don't leave a truncated container behind
            log::warn!("removing partially written '{}': {}", dest.display(), e);
            let _ = fs::remove_file(dest);
            Err(e)
        }
    }
}

/// Collects the regular files under `source` in a stable walk order.
///
/// Unreadable subtrees are skipped with a warning rather than failing the
/// whole walk.
fn collect_sources(source: &Path) -> Result<Vec<SourceFile>> {
    if source.is_file() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::not_found(source))?;
        return Ok(vec![SourceFile {
            path: source.to_path_buf(),
            name,
        }]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("skipping unreadable path during walk: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .unwrap_or_else(|_| entry.path());
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            name,
        });
    }
    Ok(files)
}

/// Reads a source file's modification time as a DOS timestamp.
pub(crate) fn mod_time_of(path: &Path) -> Option<DosDateTime> {
    let modified = fs::metadata(path).and_then(|m| m.modified()).ok()?;
    Some(DosDateTime::from_system_time(modified))
}
