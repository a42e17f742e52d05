//! Validation of archive-internal paths against directory escape.
//!
//! Archive entry names are attacker-controlled. A name like
//! `../../etc/passwd` or `C:\boot.ini` must never resolve outside the
//! extraction directory.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolves an archive-internal path under `dest`, rejecting anything that
/// would escape it.
///
/// The entry name is interpreted as forward-slash separated. Absolute paths,
/// drive/root prefixes and any `..` component are rejected with
/// [`Error::PathTraversal`]. `.` components are dropped. The check is purely
/// lexical; no symlinks are followed and no filesystem access happens here.
pub(crate) fn safe_join(dest: &Path, entry_path: &str) -> Result<PathBuf> {
    let traversal = || Error::PathTraversal {
        path: entry_path.to_string(),
    };

    // Backslashes come from archives written by non-conforming tools; treat
    // them as separators so "..\\x" cannot slip through as a file name.
    let normalized = entry_path.replace('\\', "/");
    let relative = Path::new(&normalized);

    let mut resolved = dest.to_path_buf();
    let mut depth = 0usize;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                depth += 1;
            }
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(traversal());
            }
        }
    }
    if depth == 0 {
        return Err(traversal());
    }
    Ok(resolved)
}
