//! Password handling for ZipCrypto encryption.

use zeroize::Zeroizing;

/// A password for archive encryption/decryption.
///
/// This type stores the password securely (the backing memory is zeroed on
/// drop) and provides conversion to the raw byte form consumed by the
/// ZipCrypto key schedule.
#[derive(Clone)]
pub struct Password {
    inner: Zeroizing<String>,
}

impl Password {
    /// Creates a new password from a string.
    pub fn new<S: Into<String>>(password: S) -> Self {
        Self {
            inner: Zeroizing::new(password.into()),
        }
    }

    /// Returns the password bytes fed to the ZipCrypto key schedule.
    ///
    /// ZipCrypto consumes the password as raw bytes; for interoperability
    /// with common ZIP tools this is the UTF-8 encoding of the string.
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Returns the password as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns true if the password is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the length of the password in characters.
    pub fn len(&self) -> usize {
        self.inner.chars().count()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't expose the actual password in debug output
        f.debug_struct("Password")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl From<&str> for Password {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Password {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
