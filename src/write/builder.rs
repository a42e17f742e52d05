//! Sequential ZIP container assembly.
//!
//! Entry data is compressed (and encrypted) in memory before any header is
//! written, so sizes and CRCs are known up front and no data descriptors are
//! needed. The writer never seeks.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::crypto::zipcrypto::{ZipCryptoKeys, ENCRYPTION_HEADER_LEN};
use crate::error::{Error, Result};
use crate::format::records::{write_local_header, CentralDirectoryRecord, EndOfCentralDirectory};
use crate::format::{CompressionMethod, FLAG_ENCRYPTED, FLAG_UTF8};
use crate::password::Password;
use crate::timestamp::DosDateTime;

/// Fixed bytes per local header and central record, without the name.
const LOCAL_HEADER_LEN: u64 = 30;
const CENTRAL_RECORD_LEN: u64 = 46;

/// Byte counts for one written entry.
pub(crate) struct EntrySizes {
    /// Uncompressed input size.
    pub read: u64,
    /// Entry data bytes written (encryption header included).
    pub written: u64,
}

pub(crate) struct ArchiveBuilder<W: Write> {
    sink: W,
    records: Vec<CentralDirectoryRecord>,
    offset: u64,
}

impl<W: Write> ArchiveBuilder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            records: Vec::new(),
            offset: 0,
        }
    }

    /// Appends one entry.
    ///
    /// `name` is the archive-internal path, forward-slash separated. Level 0
    /// stores the data verbatim; 1-9 deflate it. When `password` is set the
    /// payload is ZipCrypto-encrypted behind a fresh 12-byte header.
    pub fn add_entry(
        &mut self,
        name: &str,
        data: &[u8],
        modified: DosDateTime,
        level: u8,
        password: Option<&Password>,
    ) -> Result<EntrySizes> {
        if self.records.len() >= u16::MAX as usize {
            return Err(Error::UnsupportedFeature { feature: "zip64" });
        }
        if data.len() as u64 > u32::MAX as u64 {
            return Err(Error::UnsupportedFeature { feature: "zip64" });
        }

        let crc32 = crc32fast::hash(data);

        let (method, mut payload) = if level == 0 {
            (CompressionMethod::Stored, data.to_vec())
        } else {
            let mut encoder =
                DeflateEncoder::new(Vec::new(), Compression::new(level as u32));
            encoder.write_all(data)?;
            (CompressionMethod::Deflated, encoder.finish()?)
        };

        let mut flags = 0u16;
        if !name.is_ascii() {
            flags |= FLAG_UTF8;
        }
        if let Some(password) = password {
            let mut keys = ZipCryptoKeys::new(password);
            let header = keys.make_header((crc32 >> 24) as u8)?;
            keys.encrypt_in_place(&mut payload);
            let mut sealed = Vec::with_capacity(ENCRYPTION_HEADER_LEN + payload.len());
            sealed.extend_from_slice(&header);
            sealed.append(&mut payload);
            payload = sealed;
            flags |= FLAG_ENCRYPTED;
        }

        let entry_len = LOCAL_HEADER_LEN + name.len() as u64 + payload.len() as u64;
        if self.offset + entry_len > u32::MAX as u64 || payload.len() as u64 > u32::MAX as u64 {
            return Err(Error::UnsupportedFeature { feature: "zip64" });
        }

        let record = CentralDirectoryRecord {
            flags,
            method: method.as_raw(),
            dos_time: modified.raw().1,
            dos_date: modified.raw().0,
            crc32,
            compressed_size: payload.len() as u32,
            uncompressed_size: data.len() as u32,
            external_attrs: 0,
            local_header_offset: self.offset as u32,
            name: name.to_string(),
        };

        write_local_header(&mut self.sink, &record)?;
        self.sink.write_all(&payload)?;
        self.offset += entry_len;
        self.records.push(record);

        Ok(EntrySizes {
            read: data.len() as u64,
            written: payload.len() as u64,
        })
    }

    /// Writes the central directory and end record, returning the final
    /// archive size in bytes.
    pub fn finish(mut self) -> Result<u64> {
        let cd_offset = self.offset;
        let mut cd_size = 0u64;
        for record in &self.records {
            record.write_to(&mut self.sink)?;
            cd_size += CENTRAL_RECORD_LEN + record.name.len() as u64;
        }
        if cd_offset + cd_size > u32::MAX as u64 {
            return Err(Error::UnsupportedFeature { feature: "zip64" });
        }

        let eocd = EndOfCentralDirectory {
            entry_count: self.records.len() as u16,
            cd_size: cd_size as u32,
            cd_offset: cd_offset as u32,
        };
        eocd.write_to(&mut self.sink)?;
        self.sink.flush()?;
        Ok(cd_offset + cd_size + 22)
    }
}
