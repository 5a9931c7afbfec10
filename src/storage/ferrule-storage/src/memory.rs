//! In-memory credential store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::backend::CredentialStore;
use crate::error::StorageError;
use crate::record::StoredCredential;

/// Process-local [`CredentialStore`]. Contents are lost on drop.
///
/// Cloning is cheap; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: Arc<RwLock<BTreeMap<String, StoredCredential>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn get(&self, integration: &str) -> Result<Option<StoredCredential>, StorageError> {
        Ok(self.rows.read().await.get(integration).cloned())
    }

    async fn put(&self, record: StoredCredential) -> Result<(), StorageError> {
        debug!(integration = %record.integration, "Storing credential row");
        self.rows
            .write()
            .await
            .insert(record.integration.clone(), record);
        Ok(())
    }

    async fn delete(&self, integration: &str) -> Result<bool, StorageError> {
        let removed = self.rows.write().await.remove(integration).is_some();
        debug!(integration = %integration, removed, "Deleted credential row");
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.rows.read().await.keys().cloned().collect())
    }
}
