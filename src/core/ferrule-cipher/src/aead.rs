//! AES-256-GCM authenticated encryption with a 128-bit IV.
//!
//! The IV and tag are kept detached from the ciphertext so the envelope can
//! carry them as separate segments. Tag verification is left to `aes-gcm`.

use aes_gcm::{
    aead::{consts::U16, AeadInPlace, KeyInit},
    aes::Aes256,
    AesGcm, Key, Nonce, Tag,
};
use zeroize::Zeroizing;

use crate::error::CipherError;
use crate::keys::SecretKey;

/// Size of an AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the IV in bytes.
pub const IV_SIZE: usize = 16;

/// Size of a GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// AES-256-GCM instantiated with a 16-byte nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

fn build_cipher(key: &SecretKey) -> Aes256Gcm16 {
    Aes256Gcm16::new(Key::<Aes256Gcm16>::from_slice(key.as_bytes()))
}

/// Encrypts `plaintext` under `key` and `iv` with no associated data.
///
/// Returns the ciphertext (same length as the plaintext) and the detached tag.
pub fn encrypt_detached(
    key: &SecretKey,
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_SIZE]), CipherError> {
    let cipher = build_cipher(key);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(iv), b"", &mut buffer)
        .map_err(|_| CipherError::EncryptionFailed)?;

    Ok((buffer, tag.into()))
}

/// Verifies `tag` and decrypts `ciphertext`.
///
/// Every failure is reported as [`CipherError::AuthenticationFailed`].
pub fn decrypt_detached(
    key: &SecretKey,
    iv: &[u8; IV_SIZE],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    let cipher = build_cipher(key);

    let mut buffer = Zeroizing::new(ciphertext.to_vec());
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(iv),
            b"",
            buffer.as_mut_slice(),
            Tag::<U16>::from_slice(tag),
        )
        .map_err(|_| CipherError::AuthenticationFailed)?;

    Ok(buffer)
}
