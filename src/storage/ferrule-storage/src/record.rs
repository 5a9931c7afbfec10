//! Stored credential record.

use serde::{Deserialize, Serialize};

/// A credential row as persisted.
///
/// `password_envelope` holds the cipher output verbatim
/// (`<iv>:<tag>:<ciphertext>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    /// Integration identifier (e.g. `"federation-eu"`).
    pub integration: String,
    /// Account name on the external system.
    pub username: String,
    /// Encrypted password envelope.
    pub password_envelope: String,
    /// Creation timestamp (Unix seconds).
    pub created_at: u64,
    /// Last update timestamp (Unix seconds).
    pub updated_at: u64,
}
