//! Legacy ZIP encryption support.
//!
//! Only the traditional PKWARE "ZipCrypto" scheme is implemented, for
//! compatibility with archives produced by common ZIP tools. ZipCrypto is
//! known-weak cryptography (a byte-wise stream cipher with a 96-bit state
//! and well-studied plaintext attacks); treat it as obfuscation, not
//! protection.

pub(crate) mod zipcrypto;
