//! Credential store trait definition.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::StoredCredential;

/// Persistence for encrypted credentials, keyed by integration id.
///
/// Implementations store the record as given. They never see a plaintext
/// password or the secret key.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Get the credential stored for an integration.
    async fn get(&self, integration: &str) -> Result<Option<StoredCredential>, StorageError>;

    /// Insert or replace the credential for `record.integration`.
    async fn put(&self, record: StoredCredential) -> Result<(), StorageError>;

    /// Delete a credential. Returns whether a row was removed.
    async fn delete(&self, integration: &str) -> Result<bool, StorageError>;

    /// List integration ids that have a stored credential.
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Check if a credential exists.
    async fn exists(&self, integration: &str) -> Result<bool, StorageError> {
        Ok(self.get(integration).await?.is_some())
    }
}
