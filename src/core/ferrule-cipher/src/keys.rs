//! Secret key handling.
//!
//! Keys travel as hex strings (64 digits, optional `0x` prefix). [`SecretKey`]
//! is the parsed form; it zeroizes on drop and never prints its bytes.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::aead::KEY_SIZE;
use crate::error::CipherError;
use crate::random::generate_key_bytes;

/// A 256-bit key used to seal credential envelopes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

impl SecretKey {
    /// Generates a new random key.
    pub fn generate() -> Self {
        let key = generate_key_bytes();
        Self { bytes: *key }
    }

    /// Parses a hex key, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidKey`] if the key is empty, contains a
    /// non-hex character, or does not decode to exactly 32 bytes.
    pub fn parse(hex_key: &str) -> Result<Self, CipherError> {
        let digits = strip_prefix(hex_key);
        if digits.is_empty() {
            return Err(CipherError::InvalidKey("key is required".to_string()));
        }

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CipherError::InvalidKey(
                "key must be hexadecimal".to_string(),
            ));
        }

        if digits.len() != KEY_SIZE * 2 {
            return Err(CipherError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_SIZE,
                digits.len() / 2
            )));
        }

        let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
        hex::decode_to_slice(digits, &mut *bytes)
            .map_err(|_| CipherError::InvalidKey("key must be hexadecimal".to_string()))?;

        Ok(Self { bytes: *bytes })
    }

    /// Returns the key as 64 lowercase hex digits, without prefix.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }

    /// Returns the raw key bytes.
    ///
    /// Use with caution - the returned slice is not zeroized automatically.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

fn strip_prefix(key: &str) -> &str {
    key.strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))
        .unwrap_or(key)
}
