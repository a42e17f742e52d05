//! The traditional PKWARE ZipCrypto stream cipher.
//!
//! Each encrypted member carries a 12-byte encryption header ahead of its
//! compressed data. The last header byte is a check value: the high byte of
//! the entry CRC, or of the DOS time field when the entry uses a data
//! descriptor (general-purpose flag bit 3). This single byte is the only
//! password verification the format offers, so a wrong password passes the
//! header check with probability 1/256 and is only caught later by the CRC
//! of the decompressed data.

use crate::Password;

/// Size of the per-entry encryption header.
pub const ENCRYPTION_HEADER_LEN: usize = 12;

/// CRC-32 (IEEE) table for the key schedule.
///
/// The cipher state update is defined in terms of the byte-wise CRC-32
/// step, so the table lives here rather than going through `crc32fast`
/// (which exposes no single-byte state update).
const CRC32_TABLE: [u32; 256] = build_crc32_table();

const fn build_crc32_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[inline]
fn crc32_step(crc: u32, byte: u8) -> u32 {
    (crc >> 8) ^ CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize]
}

/// The 96-bit ZipCrypto cipher state.
#[derive(Clone)]
pub struct ZipCryptoKeys {
    key0: u32,
    key1: u32,
    key2: u32,
}

impl ZipCryptoKeys {
    /// Initializes the cipher state from a password.
    pub fn new(password: &Password) -> Self {
        let mut keys = Self {
            key0: 0x1234_5678,
            key1: 0x2345_6789,
            key2: 0x3456_7890,
        };
        for &byte in password.as_bytes() {
            keys.update(byte);
        }
        keys
    }

    #[inline]
    fn update(&mut self, byte: u8) {
        self.key0 = crc32_step(self.key0, byte);
        self.key1 = self
            .key1
            .wrapping_add(self.key0 & 0xFF)
            .wrapping_mul(134_775_813)
            .wrapping_add(1);
        self.key2 = crc32_step(self.key2, (self.key1 >> 24) as u8);
    }

    #[inline]
    fn stream_byte(&self) -> u8 {
        let tmp = (self.key2 | 2) as u16;
        (tmp.wrapping_mul(tmp ^ 1) >> 8) as u8
    }

    /// Decrypts one byte and advances the state.
    #[inline]
    pub fn decrypt_byte(&mut self, cipher: u8) -> u8 {
        let plain = cipher ^ self.stream_byte();
        self.update(plain);
        plain
    }

    /// Encrypts one byte and advances the state.
    #[inline]
    pub fn encrypt_byte(&mut self, plain: u8) -> u8 {
        let cipher = plain ^ self.stream_byte();
        self.update(plain);
        cipher
    }

    /// Decrypts a buffer in place.
    pub fn decrypt_in_place(&mut self, data: &mut [u8]) {
        for byte in data {
            *byte = self.decrypt_byte(*byte);
        }
    }

    /// Encrypts a buffer in place.
    pub fn encrypt_in_place(&mut self, data: &mut [u8]) {
        for byte in data {
            *byte = self.encrypt_byte(*byte);
        }
    }

    /// Consumes and verifies the 12-byte encryption header.
    ///
    /// `check_byte` is the expected value of the final header byte (CRC
    /// high byte, or DOS-time high byte for data-descriptor entries).
    /// Returns `false` if the check fails, meaning the password is almost
    /// certainly wrong.
    pub fn consume_header(&mut self, header: &[u8; ENCRYPTION_HEADER_LEN], check_byte: u8) -> bool {
        let mut last = 0;
        for &byte in header {
            last = self.decrypt_byte(byte);
        }
        last == check_byte
    }

    /// Produces an encrypted 12-byte header for writing.
    ///
    /// The first 11 bytes are random; the 12th is the check byte so readers
    /// can reject wrong passwords early.
    pub fn make_header(&mut self, check_byte: u8) -> crate::Result<[u8; ENCRYPTION_HEADER_LEN]> {
        let mut header = [0u8; ENCRYPTION_HEADER_LEN];
        getrandom::getrandom(&mut header[..ENCRYPTION_HEADER_LEN - 1])
            .map_err(|e| std::io::Error::other(format!("random source failed: {}", e)))?;
        header[ENCRYPTION_HEADER_LEN - 1] = check_byte;
        self.encrypt_in_place(&mut header);
        Ok(header)
    }
}

impl std::fmt::Debug for ZipCryptoKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of debug output
        f.write_str("ZipCryptoKeys { .. }")
    }
}
