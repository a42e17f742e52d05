//! Parsing and encoding of the ZIP on-disk records.
//!
//! All multi-byte fields are little-endian. Record layouts follow the
//! PKWARE APPNOTE; only the fields this crate consumes are modeled.

use std::io::{self, Read, Seek, SeekFrom, Write};

use crate::{Error, Result};

use super::{CENTRAL_HEADER_SIG, EOCD_SIG, LOCAL_HEADER_SIG};

/// Fixed size of the end-of-central-directory record, without comment.
const EOCD_LEN: u64 = 22;
/// Maximum ZIP comment length, bounding the backward EOCD scan.
const MAX_COMMENT_LEN: u64 = 65_535;
/// Fixed size of a local file header, without name/extra.
const LOCAL_HEADER_LEN: usize = 30;

pub(crate) fn read_u16_le<R: Read>(r: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    r.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

pub(crate) fn read_u32_le<R: Read>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// The end-of-central-directory record.
#[derive(Debug, Clone)]
pub(crate) struct EndOfCentralDirectory {
    /// Total number of central directory entries.
    pub entry_count: u16,
    /// Size of the central directory in bytes.
    pub cd_size: u32,
    /// Offset of the central directory from the start of the file.
    pub cd_offset: u32,
}

impl EndOfCentralDirectory {
    /// Locates and parses the EOCD by scanning backwards from the end of
    /// the file.
    ///
    /// The record is at most 22 + 65535 bytes from the end (the trailing
    /// archive comment has a 16-bit length), so the scan window is bounded.
    pub fn find<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let file_len = reader.seek(SeekFrom::End(0))?;
        if file_len < EOCD_LEN {
            return Err(Error::InvalidFormat(
                "file too small to be a ZIP archive".to_string(),
            ));
        }

        let window = (EOCD_LEN + MAX_COMMENT_LEN).min(file_len);
        let window_start = file_len - window;
        reader.seek(SeekFrom::Start(window_start))?;
        let mut buf = vec![0u8; window as usize];
        reader.read_exact(&mut buf)?;

        let sig = EOCD_SIG.to_le_bytes();
        let mut pos = buf.len().saturating_sub(EOCD_LEN as usize);
        loop {
            if buf[pos..pos + 4] == sig {
                let mut rec = &buf[pos + 4..];
                let disk_number = read_u16_le(&mut rec)?;
                let disk_with_cd = read_u16_le(&mut rec)?;
                let disk_entries = read_u16_le(&mut rec)?;
                let total_entries = read_u16_le(&mut rec)?;
                let cd_size = read_u32_le(&mut rec)?;
                let cd_offset = read_u32_le(&mut rec)?;

                if disk_number != 0 || disk_with_cd != 0 || disk_entries != total_entries {
                    return Err(Error::UnsupportedFeature {
                        feature: "multi-disk archive",
                    });
                }
                if total_entries == 0xFFFF || cd_size == 0xFFFF_FFFF || cd_offset == 0xFFFF_FFFF {
                    return Err(Error::UnsupportedFeature { feature: "zip64" });
                }
                return Ok(Self {
                    entry_count: total_entries,
                    cd_size,
                    cd_offset,
                });
            }
            if pos == 0 {
                return Err(Error::InvalidFormat(
                    "end of central directory record not found".to_string(),
                ));
            }
            pos -= 1;
        }
    }

    /// Writes the record. `comment` is always empty for archives this crate
    /// produces.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&EOCD_SIG.to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?; // disk number
        writer.write_all(&0u16.to_le_bytes())?; // disk with central directory
        writer.write_all(&self.entry_count.to_le_bytes())?;
        writer.write_all(&self.entry_count.to_le_bytes())?;
        writer.write_all(&self.cd_size.to_le_bytes())?;
        writer.write_all(&self.cd_offset.to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?; // comment length
        Ok(())
    }
}

/// One central directory file header.
#[derive(Debug, Clone)]
pub(crate) struct CentralDirectoryRecord {
    pub flags: u16,
    pub method: u16,
    pub dos_time: u16,
    pub dos_date: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub external_attrs: u32,
    pub local_header_offset: u32,
    /// Archive-internal path, forward-slash separated.
    pub name: String,
}

impl CentralDirectoryRecord {
    /// Parses one record, including its signature.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let sig = read_u32_le(reader)?;
        if sig != CENTRAL_HEADER_SIG {
            return Err(Error::InvalidFormat(format!(
                "bad central directory signature: {:#010x}",
                sig
            )));
        }
        let _version_made_by = read_u16_le(reader)?;
        let _version_needed = read_u16_le(reader)?;
        let flags = read_u16_le(reader)?;
        let method = read_u16_le(reader)?;
        let dos_time = read_u16_le(reader)?;
        let dos_date = read_u16_le(reader)?;
        let crc32 = read_u32_le(reader)?;
        let compressed_size = read_u32_le(reader)?;
        let uncompressed_size = read_u32_le(reader)?;
        let name_len = read_u16_le(reader)? as usize;
        let extra_len = read_u16_le(reader)? as usize;
        let comment_len = read_u16_le(reader)? as usize;
        let _disk_start = read_u16_le(reader)?;
        let _internal_attrs = read_u16_le(reader)?;
        let external_attrs = read_u32_le(reader)?;
        let local_header_offset = read_u32_le(reader)?;

        if compressed_size == 0xFFFF_FFFF || uncompressed_size == 0xFFFF_FFFF {
            return Err(Error::UnsupportedFeature { feature: "zip64" });
        }

        let mut name_buf = vec![0u8; name_len];
        reader.read_exact(&mut name_buf)?;
        // Entry names are nominally CP437 unless the UTF-8 flag is set;
        // lossy UTF-8 matches what the reference tooling displays.
        let name = String::from_utf8_lossy(&name_buf).into_owned();

        // Extra fields and per-entry comments are not consumed
        io::copy(
            &mut reader.take((extra_len + comment_len) as u64),
            &mut io::sink(),
        )?;

        Ok(Self {
            flags,
            method,
            dos_time,
            dos_date,
            crc32,
            compressed_size,
            uncompressed_size,
            external_attrs,
            local_header_offset,
            name,
        })
    }

    /// Writes one record, including its signature.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&CENTRAL_HEADER_SIG.to_le_bytes())?;
        writer.write_all(&20u16.to_le_bytes())?; // version made by (2.0)
        writer.write_all(&20u16.to_le_bytes())?; // version needed
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&self.method.to_le_bytes())?;
        writer.write_all(&self.dos_time.to_le_bytes())?;
        writer.write_all(&self.dos_date.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        writer.write_all(&self.uncompressed_size.to_le_bytes())?;
        writer.write_all(&(self.name.len() as u16).to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?; // extra length
        writer.write_all(&0u16.to_le_bytes())?; // comment length
        writer.write_all(&0u16.to_le_bytes())?; // disk start
        writer.write_all(&0u16.to_le_bytes())?; // internal attributes
        writer.write_all(&self.external_attrs.to_le_bytes())?;
        writer.write_all(&self.local_header_offset.to_le_bytes())?;
        writer.write_all(self.name.as_bytes())?;
        Ok(())
    }

    /// Returns true if the encrypted flag is set.
    pub fn is_encrypted(&self) -> bool {
        self.flags & super::FLAG_ENCRYPTED != 0
    }

    /// The check byte a ZipCrypto header must decrypt to for this entry.
    ///
    /// Entries written with a data descriptor had no CRC available at
    /// encryption time, so the format substitutes the DOS time high byte.
    pub fn crypto_check_byte(&self) -> u8 {
        if self.flags & super::FLAG_DATA_DESCRIPTOR != 0 {
            (self.dos_time >> 8) as u8
        } else {
            (self.crc32 >> 24) as u8
        }
    }
}

/// Positions `reader` at the start of an entry's compressed data by walking
/// its local file header, and returns the data offset.
///
/// Local header name/extra lengths can differ from the central directory
/// copy (streaming writers pad extras), so the local copy is authoritative
/// for locating the data.
pub(crate) fn seek_to_entry_data<R: Read + Seek>(
    reader: &mut R,
    record: &CentralDirectoryRecord,
) -> Result<u64> {
    reader.seek(SeekFrom::Start(record.local_header_offset as u64))?;
    let mut header = [0u8; LOCAL_HEADER_LEN];
    reader.read_exact(&mut header)?;
    if header[0..4] != LOCAL_HEADER_SIG.to_le_bytes() {
        return Err(Error::InvalidFormat(format!(
            "bad local header signature for entry '{}'",
            record.name
        )));
    }
    let name_len = u16::from_le_bytes([header[26], header[27]]) as u64;
    let extra_len = u16::from_le_bytes([header[28], header[29]]) as u64;
    let data_offset = record.local_header_offset as u64 + LOCAL_HEADER_LEN as u64
        + name_len
        + extra_len;
    reader.seek(SeekFrom::Start(data_offset))?;
    Ok(data_offset)
}

/// Writes a local file header matching `record`.
///
/// The caller must have positioned the writer at
/// `record.local_header_offset`.
pub(crate) fn write_local_header<W: Write>(
    writer: &mut W,
    record: &CentralDirectoryRecord,
) -> io::Result<()> {
    writer.write_all(&LOCAL_HEADER_SIG.to_le_bytes())?;
    writer.write_all(&20u16.to_le_bytes())?; // version needed
    writer.write_all(&record.flags.to_le_bytes())?;
    writer.write_all(&record.method.to_le_bytes())?;
    writer.write_all(&record.dos_time.to_le_bytes())?;
    writer.write_all(&record.dos_date.to_le_bytes())?;
    writer.write_all(&record.crc32.to_le_bytes())?;
    writer.write_all(&record.compressed_size.to_le_bytes())?;
    writer.write_all(&record.uncompressed_size.to_le_bytes())?;
    writer.write_all(&(record.name.len() as u16).to_le_bytes())?;
    writer.write_all(&0u16.to_le_bytes())?; // extra length
    writer.write_all(record.name.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_record() -> CentralDirectoryRecord {
        CentralDirectoryRecord {
            flags: 0,
            method: 8,
            dos_time: 0x6C2A,
            dos_date: 0x58CF,
            crc32: 0xCAFE_BABE,
            compressed_size: 40,
            uncompressed_size: 100,
            external_attrs: 0,
            local_header_offset: 0,
            name: "dir/a.txt".to_string(),
        }
    }

    #[test]
    fn test_central_record_roundtrip() {
        let record = sample_record();
        let mut buf = Vec::new();
        record.write_to(&mut buf).unwrap();

        let parsed = CentralDirectoryRecord::read_from(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(parsed.name, "dir/a.txt");
        assert_eq!(parsed.crc32, 0xCAFE_BABE);
        assert_eq!(parsed.compressed_size, 40);
        assert_eq!(parsed.uncompressed_size, 100);
        assert_eq!(parsed.method, 8);
    }

    #[test]
    fn test_central_record_bad_signature() {
        let err = CentralDirectoryRecord::read_from(&mut Cursor::new(&[0u8; 46])).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_eocd_roundtrip() {
        let eocd = EndOfCentralDirectory {
            entry_count: 3,
            cd_size: 150,
            cd_offset: 1024,
        };
        let mut buf = Vec::new();
        eocd.write_to(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, EOCD_LEN);

        let found = EndOfCentralDirectory::find(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(found.entry_count, 3);
        assert_eq!(found.cd_size, 150);
        assert_eq!(found.cd_offset, 1024);
    }

    #[test]
    fn test_eocd_found_behind_comment_bytes() {
        let eocd = EndOfCentralDirectory {
            entry_count: 1,
            cd_size: 46,
            cd_offset: 30,
        };
        let mut buf = vec![0xAAu8; 64]; // leading junk simulating archive data
        eocd.write_to(&mut buf).unwrap();

        let found = EndOfCentralDirectory::find(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(found.entry_count, 1);
    }

    #[test]
    fn test_eocd_missing() {
        let buf = vec![0u8; 100];
        let err = EndOfCentralDirectory::find(&mut Cursor::new(&buf)).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_eocd_too_small() {
        let err = EndOfCentralDirectory::find(&mut Cursor::new(b"PK")).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_crypto_check_byte_sources() {
        let mut record = sample_record();
        assert_eq!(record.crypto_check_byte(), 0xCA); // CRC high byte

        record.flags |= crate::format::FLAG_DATA_DESCRIPTOR;
        assert_eq!(record.crypto_check_byte(), 0x6C); // DOS time high byte
    }

    #[test]
    fn test_local_header_seek() {
        let record = sample_record();
        let mut buf = Vec::new();
        write_local_header(&mut buf, &record).unwrap();
        buf.extend_from_slice(b"compressed-bytes");

        let mut cursor = Cursor::new(&buf);
        let offset = seek_to_entry_data(&mut cursor, &record).unwrap();
        assert_eq!(offset, 30 + record.name.len() as u64);

        let mut data = Vec::new();
        cursor.read_to_end(&mut data).unwrap();
        assert_eq!(data, b"compressed-bytes");
    }
}
