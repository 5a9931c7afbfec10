//! # Ferrule Credentials
//!
//! Storage service for third-party integration credentials.
//!
//! ## Features
//!
//! - One process-wide secret key, validated at construction
//! - Passwords sealed with [`ferrule_cipher`] before they reach the store
//! - Decryption only when a credential is loaded for use
//! - Startup sweep that finds envelopes the current key cannot open
//!
//! Usernames are stored in clear; only the password is enveloped.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;

use ferrule_cipher::{CipherError, Envelope, ErrorKind, SecretKey};
use ferrule_storage::{CredentialStore, StoredCredential};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

pub use error::CredentialError;

/// Maximum length of an integration id.
const MAX_INTEGRATION_LEN: usize = 64;

/// A decrypted credential, ready to present to the external system.
#[derive(Clone)]
pub struct Credential {
    /// Integration identifier.
    pub integration: String,
    /// Account name on the external system.
    pub username: String,
    /// Decrypted password. Zeroized on drop.
    pub password: Zeroizing<String>,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("integration", &self.integration)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Encrypts credentials on write and decrypts them on use.
pub struct CredentialService<S> {
    store: S,
    key: SecretKey,
}

impl<S: CredentialStore> CredentialService<S> {
    /// Creates a service over `store` using the hex `secret_key`.
    ///
    /// Fails fast when the key is unusable. The error never echoes the key.
    pub fn new(store: S, secret_key: &str) -> Result<Self, CredentialError> {
        if !ferrule_cipher::test_key(secret_key) {
            return Err(CredentialError::Configuration(
                "secret key must be 64 hex digits (32 bytes), optionally prefixed with 0x"
                    .to_string(),
            ));
        }

        let key = SecretKey::parse(secret_key)?;

        info!("Credential service initialized");
        Ok(Self { store, key })
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates an integration id.
    fn validate_integration(integration: &str) -> Result<(), CredentialError> {
        if integration.is_empty() {
            return Err(CredentialError::InvalidIntegration(
                "integration id cannot be empty".into(),
            ));
        }
        if integration.len() > MAX_INTEGRATION_LEN {
            return Err(CredentialError::InvalidIntegration(
                "integration id too long".into(),
            ));
        }
        let valid = integration
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
        if !valid {
            return Err(CredentialError::InvalidIntegration(
                "integration id must match [a-z0-9_-]+".into(),
            ));
        }
        Ok(())
    }

    /// Returns the current Unix timestamp.
    fn now() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Stores or replaces the credential for an integration.
    pub async fn save(
        &self,
        integration: &str,
        username: &str,
        password: &str,
    ) -> Result<(), CredentialError> {
        Self::validate_integration(integration)?;
        if username.is_empty() {
            return Err(CredentialError::InvalidCredential(
                "username cannot be empty".into(),
            ));
        }

        let envelope = Envelope::seal(password, &self.key)?;

        let now = Self::now();
        let created_at = self
            .store
            .get(integration)
            .await?
            .map(|existing| existing.created_at)
            .unwrap_or(now);

        self.store
            .put(StoredCredential {
                integration: integration.to_string(),
                username: username.to_string(),
                password_envelope: envelope.to_string(),
                created_at,
                updated_at: now,
            })
            .await?;

        debug!(integration = integration, "Credential stored");
        Ok(())
    }

    /// Loads and decrypts the credential for an integration.
    pub async fn load(&self, integration: &str) -> Result<Credential, CredentialError> {
        Self::validate_integration(integration)?;

        let record = self
            .store
            .get(integration)
            .await?
            .ok_or_else(|| CredentialError::NotFound(integration.to_string()))?;

        let password = self.open(&record)?;

        debug!(integration = integration, "Credential decrypted");
        Ok(Credential {
            integration: record.integration,
            username: record.username,
            password,
        })
    }

    /// Deletes the credential for an integration.
    pub async fn delete(&self, integration: &str) -> Result<(), CredentialError> {
        Self::validate_integration(integration)?;

        if !self.store.delete(integration).await? {
            return Err(CredentialError::NotFound(integration.to_string()));
        }

        debug!(integration = integration, "Credential deleted");
        Ok(())
    }

    /// Lists integration ids with a stored credential.
    pub async fn list(&self) -> Result<Vec<String>, CredentialError> {
        let mut ids = self.store.list().await?;
        ids.sort();
        Ok(ids)
    }

    /// Returns the ids whose stored envelopes do not open under the current key.
    ///
    /// Envelopes carry no key identifier, so a replaced key only shows up as
    /// authentication failures. Run this at startup to surface them early.
    pub async fn verify_all(&self) -> Result<Vec<String>, CredentialError> {
        let mut unreadable = Vec::new();

        for integration in self.list().await? {
            let Some(record) = self.store.get(&integration).await? else {
                continue;
            };
            if self.open(&record).is_err() {
                unreadable.push(integration);
            }
        }

        if unreadable.is_empty() {
            info!("All stored credentials decrypt with the configured key");
        } else {
            warn!(
                count = unreadable.len(),
                integrations = ?unreadable,
                "Stored credentials cannot be decrypted with the configured key"
            );
        }

        Ok(unreadable)
    }

    fn open(&self, record: &StoredCredential) -> Result<Zeroizing<String>, CredentialError> {
        let corrupted = |source: CipherError| CredentialError::Corrupted {
            integration: record.integration.clone(),
            source,
        };

        let envelope: Envelope = record.password_envelope.parse().map_err(corrupted)?;

        envelope.open(&self.key).map_err(|e| match e.kind() {
            ErrorKind::Authentication => {
                CredentialError::Undecryptable(record.integration.clone())
            }
            _ => corrupted(e),
        })
    }
}
