//! Member data reading: decryption, decompression and checksum verification.

use std::io::{Read, Seek, SeekFrom};

use flate2::read::DeflateDecoder;

use crate::crypto::zipcrypto::{ZipCryptoKeys, ENCRYPTION_HEADER_LEN};
use crate::error::{Error, Result};
use crate::format::records::{seek_to_entry_data, CentralDirectoryRecord};
use crate::format::CompressionMethod;
use crate::password::Password;

/// Upper bound on buffer preallocation from header-claimed sizes.
///
/// Size fields in the central directory are untrusted; buffers start at
/// most this large and grow only as real data comes in.
const MAX_PREALLOC: usize = 1 << 20;

/// Reads one member's data fully into memory, decrypting and decompressing
/// as needed, and verifies it against the stored CRC-32.
///
/// Returns [`Error::WrongPassword`] when the entry is encrypted and no
/// password was supplied, or when the supplied password fails the check-byte
/// test. A check-byte match with a corrupt result surfaces as
/// [`Error::CrcMismatch`]; callers treating authentication strictly should
/// consider both password failures (see [`Error::is_password_error`]).
pub(crate) fn read_entry_data<R: Read + Seek>(
    reader: &mut R,
    record: &CentralDirectoryRecord,
    index: usize,
    password: Option<&Password>,
) -> Result<Vec<u8>> {
    let data_offset = seek_to_entry_data(reader, record)?;

    // The claimed compressed size cannot exceed what the file actually
    // holds past the data offset; a record that over-claims would otherwise
    // drive the allocation below.
    let file_len = reader.seek(SeekFrom::End(0))?;
    let available = file_len.saturating_sub(data_offset);
    if record.compressed_size as u64 > available {
        return Err(Error::InvalidFormat(format!(
            "entry '{}' claims {} compressed bytes but only {} remain in the file",
            record.name, record.compressed_size, available
        )));
    }
    reader.seek(SeekFrom::Start(data_offset))?;

    let mut raw = vec![0u8; record.compressed_size as usize];
    reader.read_exact(&mut raw)?;

    let payload: &[u8] = if record.is_encrypted() {
        let password = password.ok_or_else(|| Error::WrongPassword {
            entry_index: Some(index),
            entry_name: Some(record.name.clone()),
        })?;
        if raw.len() < ENCRYPTION_HEADER_LEN {
            return Err(Error::InvalidFormat(format!(
                "encrypted entry '{}' is shorter than its encryption header",
                record.name
            )));
        }
        let mut keys = ZipCryptoKeys::new(password);
        let mut header = [0u8; ENCRYPTION_HEADER_LEN];
        header.copy_from_slice(&raw[..ENCRYPTION_HEADER_LEN]);
        if !keys.consume_header(&header, record.crypto_check_byte()) {
            return Err(Error::WrongPassword {
                entry_index: Some(index),
                entry_name: Some(record.name.clone()),
            });
        }
        let (_, body) = raw.split_at_mut(ENCRYPTION_HEADER_LEN);
        keys.decrypt_in_place(body);
        &raw[ENCRYPTION_HEADER_LEN..]
    } else {
        &raw
    };

    let data = match CompressionMethod::from_raw(record.method) {
        CompressionMethod::Stored => payload.to_vec(),
        CompressionMethod::Deflated => {
            let mut decoder = DeflateDecoder::new(payload);
            let mut data =
                Vec::with_capacity((record.uncompressed_size as usize).min(MAX_PREALLOC));
            decoder.read_to_end(&mut data)?;
            data
        }
        CompressionMethod::Unknown(id) => {
            return Err(Error::UnsupportedMethod { method_id: id });
        }
    };

    let actual = crc32fast::hash(&data);
    if actual != record.crc32 {
        return Err(Error::CrcMismatch {
            entry_index: index,
            entry_name: Some(record.name.clone()),
            expected: record.crc32,
            actual,
        });
    }
    Ok(data)
}
