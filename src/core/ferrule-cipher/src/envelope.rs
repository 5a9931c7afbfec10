//! The at-rest envelope format.
//!
//! The string representation is `<iv>:<tag>:<ciphertext>`, each segment
//! lowercase hex. The ciphertext segment is empty for an empty plaintext.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use crate::aead::{self, IV_SIZE, TAG_SIZE};
use crate::error::CipherError;
use crate::keys::SecretKey;
use crate::random::generate_iv;

/// Segment separator.
pub const SEPARATOR: char = ':';

/// A parsed credential envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Random IV drawn for this envelope.
    pub iv: [u8; IV_SIZE],
    /// GCM authentication tag.
    pub tag: [u8; TAG_SIZE],
    /// Encrypted plaintext bytes.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encrypts `plaintext` under `key` with a fresh IV.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::EncryptionFailed`] if the cipher rejects the
    /// input, which only happens for plaintexts beyond the GCM length limit.
    pub fn seal(plaintext: &str, key: &SecretKey) -> Result<Self, CipherError> {
        let iv = generate_iv();
        let (ciphertext, tag) = aead::encrypt_detached(key, &iv, plaintext.as_bytes())?;

        Ok(Self {
            iv,
            tag,
            ciphertext,
        })
    }

    /// Verifies and decrypts this envelope.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::AuthenticationFailed`] for a wrong key, any
    /// altered byte, or a verified payload that is not UTF-8.
    pub fn open(&self, key: &SecretKey) -> Result<Zeroizing<String>, CipherError> {
        let mut bytes = aead::decrypt_detached(key, &self.iv, &self.ciphertext, &self.tag)?;

        let plaintext = String::from_utf8(std::mem::take(&mut *bytes))
            .map_err(|e| {
                // Scrub the rejected buffer before it is dropped.
                drop(Zeroizing::new(e.into_bytes()));
                CipherError::AuthenticationFailed
            })?;

        Ok(Zeroizing::new(plaintext))
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            hex::encode(self.iv),
            hex::encode(self.tag),
            hex::encode(&self.ciphertext),
        )
    }
}

impl FromStr for Envelope {
    type Err = CipherError;

    /// Parses `<iv>:<tag>:<ciphertext>`. Checks run in order: segment count,
    /// IV length, tag length, ciphertext encoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let [iv_hex, tag_hex, ciphertext_hex] = parts.as_slice() else {
            return Err(CipherError::MalformedEnvelope {
                segments: parts.len(),
            });
        };

        let iv = decode_fixed::<IV_SIZE>(iv_hex).map_err(CipherError::InvalidIv)?;
        let tag = decode_fixed::<TAG_SIZE>(tag_hex).map_err(CipherError::InvalidTag)?;
        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|e| CipherError::InvalidCiphertext(e.to_string()))?;

        Ok(Self {
            iv,
            tag,
            ciphertext,
        })
    }
}

fn decode_fixed<const N: usize>(segment: &str) -> Result<[u8; N], String> {
    let bytes = hex::decode(segment).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| format!("expected {} bytes, got {}", N, bytes.len()))
}
