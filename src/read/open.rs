//! Opening archives and probing for password protection.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::records::{CentralDirectoryRecord, EndOfCentralDirectory};
use crate::password::Password;
use crate::read::decompression::read_entry_data;
use crate::read::entry::Entry;
use crate::read::Archive;

/// Parses the central directory and returns all records in directory order.
pub(crate) fn load_records<R: Read + Seek>(reader: &mut R) -> Result<Vec<CentralDirectoryRecord>> {
    let eocd = EndOfCentralDirectory::find(reader)?;
    reader.seek(SeekFrom::Start(eocd.cd_offset as u64))?;
    let mut records = Vec::with_capacity(eocd.entry_count as usize);
    for _ in 0..eocd.entry_count {
        records.push(CentralDirectoryRecord::read_from(reader)?);
    }
    Ok(records)
}

impl Archive {
    /// Opens a ZIP archive and reads its table of contents.
    ///
    /// Only metadata is read; no member data is touched and no file handle
    /// is retained. Encrypted archives open fine without a password as long
    /// as only the listing is needed; extraction of encrypted members will
    /// then fail per member. Use [`open_path_with_password`] to authenticate
    /// up front.
    ///
    /// [`open_path_with_password`]: Self::open_path_with_password
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path.as_ref(), None)
    }

    /// Opens a ZIP archive and verifies the password against the first
    /// verifiable encrypted member.
    ///
    /// Returns [`Error::WrongPassword`] when that member rejects the
    /// password. The verified password is kept by the returned [`Archive`]
    /// and used for subsequent extractions; it is zeroized on drop.
    pub fn open_path_with_password(
        path: impl AsRef<Path>,
        password: impl Into<Password>,
    ) -> Result<Self> {
        Self::open_with(path.as_ref(), Some(password.into()))
    }

    fn open_with(path: &Path, password: Option<Password>) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::not_found(path));
        }
        let file = File::open(path)?;
        let archive_size = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let records = load_records(&mut reader)?;
        let entries: Vec<Entry> = records
            .iter()
            .enumerate()
            .map(|(i, r)| Entry::from_record(r, i))
            .collect();

        if let Some(pw) = &password {
            verify_password(&mut reader, &records, &entries, pw)?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            records,
            password,
            archive_size,
        })
    }
}

/// Authenticates a password against the first encrypted file member that can
/// be read at all.
///
/// ZipCrypto carries no archive-level password hash, so the only way to test
/// a password is to decrypt a member and check it. A check-byte pass followed
/// by a CRC mismatch is still a wrong password (the 1-in-256 check-byte
/// collision), so both are reported as [`Error::WrongPassword`]. Members that
/// fail for unrelated reasons are skipped here and dealt with at extraction
/// time.
fn verify_password<R: Read + Seek>(
    reader: &mut R,
    records: &[CentralDirectoryRecord],
    entries: &[Entry],
    password: &Password,
) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if entries[index].is_directory || !record.is_encrypted() {
            continue;
        }
        match read_entry_data(reader, record, index, Some(password)) {
            Ok(_) => return Ok(()),
            Err(Error::WrongPassword { .. }) | Err(Error::CrcMismatch { .. }) => {
                return Err(Error::WrongPassword {
                    entry_index: Some(index),
                    entry_name: Some(record.name.clone()),
                });
            }
            Err(e) => {
                log::warn!(
                    "cannot verify password against '{}': {}, trying next member",
                    record.name,
                    e
                );
            }
        }
    }
    // No verifiable encrypted member; nothing to authenticate against.
    Ok(())
}

/// Reports whether an archive needs a password to read its members.
///
/// Probes by attempting to read the first file member without a password.
/// Any failure, including an unreadable or malformed file, yields `true`:
/// callers use this to decide whether to prompt, and prompting spuriously is
/// cheaper than failing an extraction.
pub fn probe_password_required(path: impl AsRef<Path>) -> bool {
    fn probe(path: &Path) -> Result<bool> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let records = load_records(&mut reader)?;
        if records.iter().any(|r| r.is_encrypted()) {
            return Ok(true);
        }
        let first_file = records.iter().enumerate().find(|(_, r)| {
            !r.name.ends_with('/') && r.external_attrs & crate::format::DOS_ATTR_DIRECTORY == 0
        });
        match first_file {
            Some((index, record)) => {
                read_entry_data(&mut reader, record, index, None)?;
                Ok(false)
            }
            None => Ok(false),
        }
    }
    probe(path.as_ref()).unwrap_or(true)
}
