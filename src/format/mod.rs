//! ZIP container format structures and constants.
//!
//! The ZIP on-disk layout, leaves to root: each member is a local file
//! header followed by its (possibly encrypted) compressed data; the central
//! directory at the end of the file indexes every member; the
//! end-of-central-directory record locates the central directory. Reading
//! starts from the end of the file, writing finishes there.

pub(crate) mod records;

/// Local file header signature (`PK\x03\x04`).
pub(crate) const LOCAL_HEADER_SIG: u32 = 0x0403_4B50;
/// Central directory file header signature (`PK\x01\x02`).
pub(crate) const CENTRAL_HEADER_SIG: u32 = 0x0201_4B50;
/// End of central directory signature (`PK\x05\x06`).
pub(crate) const EOCD_SIG: u32 = 0x0605_4B50;

/// General-purpose flag bit 0: entry data is encrypted.
pub(crate) const FLAG_ENCRYPTED: u16 = 0x0001;
/// General-purpose flag bit 3: sizes/CRC live in a trailing data descriptor.
pub(crate) const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;
/// General-purpose flag bit 11: entry name is UTF-8.
pub(crate) const FLAG_UTF8: u16 = 0x0800;

/// DOS external-attribute bit marking a directory entry.
pub(crate) const DOS_ATTR_DIRECTORY: u32 = 0x10;

/// A ZIP compression method.
///
/// Only Stored and Deflate are processed; everything else is preserved as
/// `Unknown` so listings can still show the entry while extraction reports
/// [`UnsupportedMethod`](crate::Error::UnsupportedMethod).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// No compression (method 0).
    Stored,
    /// DEFLATE (method 8).
    Deflated,
    /// Any other method ID.
    Unknown(u16),
}

impl CompressionMethod {
    /// Decodes the raw method field from a header.
    pub fn from_raw(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflated,
            other => CompressionMethod::Unknown(other),
        }
    }

    /// Encodes to the raw method field.
    pub fn as_raw(self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflated => 8,
            CompressionMethod::Unknown(value) => value,
        }
    }
}

impl std::fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompressionMethod::Stored => write!(f, "Stored"),
            CompressionMethod::Deflated => write!(f, "Deflated"),
            CompressionMethod::Unknown(id) => write!(f, "Unknown({})", id),
        }
    }
}
