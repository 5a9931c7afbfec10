//! Entry points for untyped inputs.
//!
//! Callers that receive credentials as JSON cannot rely on the type system to
//! rule out a missing or non-string plaintext. These wrappers perform those
//! checks first, then follow the same order as [`crate::encrypt`] and
//! [`crate::decrypt`].

use serde_json::Value;
use zeroize::Zeroizing;

use crate::envelope::Envelope;
use crate::error::CipherError;
use crate::keys::SecretKey;

/// Encrypts a JSON value that must be a string.
///
/// # Errors
///
/// - [`CipherError::InvalidInput`] if `plaintext` is `null` or not a string.
/// - [`CipherError::InvalidKey`] if `key` is missing or malformed.
pub fn encrypt_value(plaintext: &Value, key: Option<&str>) -> Result<String, CipherError> {
    let plaintext = require_text(plaintext, "plaintext")?;
    crate::encrypt(plaintext, require_key(key)?)
}

/// Decrypts a JSON value that must be an envelope string.
///
/// Envelope checks run before the key is looked at.
///
/// # Errors
///
/// - [`CipherError::InvalidInput`] if `envelope` is `null` or not a string.
/// - Any error of [`crate::decrypt`], in the same order.
pub fn decrypt_value(
    envelope: &Value,
    key: Option<&str>,
) -> Result<Zeroizing<String>, CipherError> {
    let envelope: Envelope = require_text(envelope, "envelope")?.parse()?;
    let key = SecretKey::parse(require_key(key)?)?;
    envelope.open(&key)
}

/// Returns the string inside `value`, or an input error naming `name`.
///
/// # Errors
///
/// Returns [`CipherError::InvalidInput`] if `value` is `null` or not a string.
pub fn require_text<'a>(value: &'a Value, name: &str) -> Result<&'a str, CipherError> {
    match value {
        Value::Null => Err(CipherError::InvalidInput(format!("{name} is required"))),
        Value::String(s) => Ok(s),
        other => Err(CipherError::InvalidInput(format!(
            "{name} must be a string, got {}",
            type_name(other)
        ))),
    }
}

fn require_key(key: Option<&str>) -> Result<&str, CipherError> {
    key.ok_or_else(|| CipherError::InvalidKey("key is required".to_string()))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
