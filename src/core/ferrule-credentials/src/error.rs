//! Credential service error types.

use thiserror::Error;

/// Errors that can occur in the credential service.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The configured secret key is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No credential stored for this integration.
    #[error("credential not found: {0}")]
    NotFound(String),

    /// Invalid integration identifier.
    #[error("invalid integration id: {0}")]
    InvalidIntegration(String),

    /// Invalid credential fields.
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// Stored envelope is not well formed.
    #[error("stored credential is corrupted: {integration}")]
    Corrupted {
        /// Integration id.
        integration: String,
        /// Underlying cipher error.
        #[source]
        source: ferrule_cipher::CipherError,
    },

    /// Stored envelope failed authentication under the configured key.
    #[error("stored credential cannot be decrypted with the configured key: {0}")]
    Undecryptable(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Cryptographic error.
    #[error("crypto error: {0}")]
    Crypto(String),
}

impl From<ferrule_storage::StorageError> for CredentialError {
    fn from(e: ferrule_storage::StorageError) -> Self {
        CredentialError::Storage(e.to_string())
    }
}

impl From<ferrule_cipher::CipherError> for CredentialError {
    fn from(e: ferrule_cipher::CipherError) -> Self {
        CredentialError::Crypto(e.to_string())
    }
}
