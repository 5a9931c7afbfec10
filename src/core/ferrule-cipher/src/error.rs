//! Cipher error types.

use thiserror::Error;

/// Errors that can occur while sealing or opening a credential.
///
/// Variants raised before any key material is touched carry a specific
/// message. Everything that fails inside the AEAD verification step is
/// reported as [`CipherError::AuthenticationFailed`] and nothing else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// Plaintext or envelope argument missing or not text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Key missing, not hexadecimal, or not 32 bytes once decoded.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Envelope does not split into exactly three `:` separated segments.
    #[error("invalid envelope format: expected 3 segments, got {segments}")]
    MalformedEnvelope {
        /// Number of segments found.
        segments: usize,
    },

    /// IV segment is not hex or does not decode to 16 bytes.
    #[error("invalid IV: {0}")]
    InvalidIv(String),

    /// Tag segment is not hex or does not decode to 16 bytes.
    #[error("invalid authentication tag: {0}")]
    InvalidTag(String),

    /// Ciphertext segment is not valid hex.
    #[error("invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// Tag verification failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The AEAD refused to encrypt the payload.
    #[error("encryption failed")]
    EncryptionFailed,
}

/// Coarse classification of a [`CipherError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or mistyped plaintext/envelope.
    Input,
    /// Unusable key.
    Key,
    /// Envelope shape violations.
    Format,
    /// Cryptographic verification failure.
    Authentication,
    /// AEAD failure while encrypting.
    Internal,
}

impl CipherError {
    /// Returns the kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CipherError::InvalidInput(_) => ErrorKind::Input,
            CipherError::InvalidKey(_) => ErrorKind::Key,
            CipherError::MalformedEnvelope { .. }
            | CipherError::InvalidIv(_)
            | CipherError::InvalidTag(_)
            | CipherError::InvalidCiphertext(_) => ErrorKind::Format,
            CipherError::AuthenticationFailed => ErrorKind::Authentication,
            CipherError::EncryptionFailed => ErrorKind::Internal,
        }
    }
}
