//! Integration tests for Ferrule.
//!
//! These tests wire the cipher, the credential service and a store together
//! the way a host application does: validate the key at startup, accept
//! credentials from JSON request bodies, persist envelopes, decrypt on use.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use ferrule_credentials::CredentialService;
use ferrule_storage::CredentialStore;

// ============================================================================
// API Types
// ============================================================================

/// Body of a credential write as received by the host application.
#[derive(Debug, Deserialize)]
pub struct CredentialPutRequest {
    pub username: String,
    /// Left untyped so a missing or mistyped password reaches the cipher checks.
    #[serde(default)]
    pub password: Value,
}

// ============================================================================
// Test Host
// ============================================================================

/// Minimal stand-in for the request handlers that call the service.
pub struct TestHost<S> {
    pub service: CredentialService<S>,
}

impl<S: CredentialStore> TestHost<S> {
    /// Boots the host: fails fast if the configured key is unusable.
    pub fn start(store: S, secret_key: &str) -> Result<Self> {
        let service =
            CredentialService::new(store, secret_key).context("Failed to start credential service")?;
        Ok(Self { service })
    }

    /// Handles `PUT /integrations/{id}/credential`.
    pub async fn put_credential(&self, integration: &str, body: &str) -> Result<()> {
        let request: CredentialPutRequest =
            serde_json::from_str(body).context("Invalid request body")?;

        // Reject a null or non-string password before touching the store.
        let password = ferrule_cipher::value::require_text(&request.password, "password")?;

        self.service
            .save(integration, &request.username, password)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ferrule_cipher::{CipherError, ErrorKind};
    use ferrule_credentials::CredentialError;
    use ferrule_storage::{MemoryStore, StoredCredential};

    #[tokio::test]
    async fn test_full_credential_lifecycle() {
        let key = ferrule_cipher::generate_key();
        let host = TestHost::start(MemoryStore::new(), &key).unwrap();

        host.put_credential(
            "federation-eu",
            r#"{"username": "svc-sync", "password": "sensitive-api-password-123"}"#,
        )
        .await
        .unwrap();

        // The persisted text column holds only the envelope.
        let row = host
            .service
            .store()
            .get("federation-eu")
            .await
            .unwrap()
            .unwrap();
        let parts: Vec<&str> = row.password_envelope.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 32);
        assert_eq!(parts[1].len(), 32);

        // The envelope is self-contained: the cipher alone can open it.
        let password = ferrule_cipher::decrypt(&row.password_envelope, &key).unwrap();
        assert_eq!(password.as_str(), "sensitive-api-password-123");

        // Decrypt immediately before use.
        let credential = host.service.load("federation-eu").await.unwrap();
        assert_eq!(credential.username, "svc-sync");
        assert_eq!(credential.password.as_str(), "sensitive-api-password-123");

        host.service.delete("federation-eu").await.unwrap();
        assert!(host.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_startup_rejects_misconfigured_key() {
        for bad in ["", "0x", "not-hex", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"] {
            let result = TestHost::start(MemoryStore::new(), bad);
            let err = result.err().unwrap();
            let root = err.downcast_ref::<CredentialError>().unwrap();
            assert!(matches!(root, CredentialError::Configuration(_)));
        }
    }

    #[tokio::test]
    async fn test_request_with_bad_password_type_is_rejected() {
        let key = ferrule_cipher::generate_key();
        let host = TestHost::start(MemoryStore::new(), &key).unwrap();

        for body in [
            r#"{"username": "svc", "password": null}"#,
            r#"{"username": "svc"}"#,
            r#"{"username": "svc", "password": 123}"#,
        ] {
            let err = host.put_credential("fed", body).await.unwrap_err();
            let cipher_err = err.downcast_ref::<CipherError>().unwrap();
            assert_eq!(cipher_err.kind(), ErrorKind::Input);
        }

        assert!(host.service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rotated_key_is_detected_at_startup() {
        let store = MemoryStore::new();

        let old = TestHost::start(store.clone(), &ferrule_cipher::generate_key()).unwrap();
        old.put_credential("fed-a", r#"{"username": "a", "password": "pa"}"#)
            .await
            .unwrap();
        old.put_credential("fed-b", r#"{"username": "b", "password": "pb"}"#)
            .await
            .unwrap();

        let new = TestHost::start(store, &ferrule_cipher::generate_key()).unwrap();
        let unreadable = new.service.verify_all().await.unwrap();
        assert_eq!(unreadable, vec!["fed-a", "fed-b"]);

        let result = new.service.load("fed-a").await;
        assert!(matches!(result, Err(CredentialError::Undecryptable(_))));
    }

    #[tokio::test]
    async fn test_tampered_row_fails_authentication() {
        let key = ferrule_cipher::generate_key();
        let host = TestHost::start(MemoryStore::new(), &key).unwrap();
        host.put_credential("fed", r#"{"username": "u", "password": "pw"}"#)
            .await
            .unwrap();

        let mut row = host.service.store().get("fed").await.unwrap().unwrap();
        let last = row.password_envelope.pop().unwrap();
        row.password_envelope
            .push(if last == '0' { '1' } else { '0' });
        host.service.store().put(row).await.unwrap();

        let result = host.service.load("fed").await;
        assert!(matches!(result, Err(CredentialError::Undecryptable(_))));
    }

    #[tokio::test]
    async fn test_rows_survive_serialization() {
        let key = ferrule_cipher::generate_key();
        let host = TestHost::start(MemoryStore::new(), &key).unwrap();
        host.put_credential("fed", r#"{"username": "u", "password": "pw"}"#)
            .await
            .unwrap();

        // Round-trip through a text export, as a backup would.
        let row = host.service.store().get("fed").await.unwrap().unwrap();
        let exported = serde_json::to_string(&row).unwrap();

        let restored_store = MemoryStore::new();
        let restored: StoredCredential = serde_json::from_str(&exported).unwrap();
        restored_store.put(restored).await.unwrap();

        let restored_host = TestHost::start(restored_store, &format!("0x{key}")).unwrap();
        let credential = restored_host.service.load("fed").await.unwrap();
        assert_eq!(credential.password.as_str(), "pw");
    }

    #[tokio::test]
    async fn test_concurrent_writers_and_readers() {
        let key = ferrule_cipher::generate_key();
        let host = Arc::new(TestHost::start(MemoryStore::new(), &key).unwrap());

        let mut handles = Vec::new();
        for i in 0..16 {
            let host = Arc::clone(&host);
            handles.push(tokio::spawn(async move {
                let integration = format!("fed-{i}");
                let body = format!(r#"{{"username": "user-{i}", "password": "secret-{i}"}}"#);
                host.put_credential(&integration, &body).await.unwrap();

                let credential = host.service.load(&integration).await.unwrap();
                assert_eq!(credential.password.as_str(), format!("secret-{i}"));
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(host.service.list().await.unwrap().len(), 16);
        assert!(host.service.verify_all().await.unwrap().is_empty());
    }
}
