//! # Ferrule Cipher
//!
//! Seals third-party integration credentials into an at-rest envelope and
//! opens them again.
//!
//! This crate provides:
//! - Key generation and validation (32-byte keys as hex strings)
//! - AES-256-GCM encryption with a fresh 128-bit IV per call
//! - The `iv:tag:ciphertext` envelope format
//!
//! Every operation is a pure function of its arguments. The crate reads no
//! configuration, keeps no state and does not log.
//!
//! ```no_run
//! let key = ferrule_cipher::generate_key();
//! let envelope = ferrule_cipher::encrypt("hunter2", &key)?;
//! let password = ferrule_cipher::decrypt(&envelope, &key)?;
//! assert_eq!(password.as_str(), "hunter2");
//! # Ok::<(), ferrule_cipher::CipherError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aead;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod random;
pub mod value;

use zeroize::Zeroizing;

pub use envelope::Envelope;
pub use error::{CipherError, ErrorKind};
pub use keys::SecretKey;
pub use value::{decrypt_value, encrypt_value};

/// Generates a new key as 64 lowercase hex digits.
pub fn generate_key() -> String {
    let key = SecretKey::generate();
    key.to_hex().to_string()
}

/// Encrypts `plaintext` under the hex `key` and returns the envelope string.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKey`] if the key does not normalize to 32 bytes.
pub fn encrypt(plaintext: &str, key: &str) -> Result<String, CipherError> {
    let key = SecretKey::parse(key)?;
    Ok(Envelope::seal(plaintext, &key)?.to_string())
}

/// Decrypts an envelope string produced by [`encrypt`].
///
/// The envelope is validated before the key: segment count, IV length, tag
/// length, ciphertext encoding, then key normalization. A failure of the
/// cryptographic check is always [`CipherError::AuthenticationFailed`].
///
/// # Errors
///
/// - [`CipherError::MalformedEnvelope`] if there are not exactly 3 segments.
/// - [`CipherError::InvalidIv`] / [`CipherError::InvalidTag`] if the IV or tag
///   is not 16 bytes of hex.
/// - [`CipherError::InvalidCiphertext`] if the ciphertext segment is not hex.
/// - [`CipherError::InvalidKey`] if the key does not normalize to 32 bytes.
/// - [`CipherError::AuthenticationFailed`] for a wrong key or altered envelope.
pub fn decrypt(envelope: &str, key: &str) -> Result<Zeroizing<String>, CipherError> {
    let envelope: Envelope = envelope.parse()?;
    let key = SecretKey::parse(key)?;
    envelope.open(&key)
}

/// Returns whether `candidate` is a usable key. Never fails.
pub fn test_key(candidate: &str) -> bool {
    SecretKey::parse(candidate).is_ok()
}
