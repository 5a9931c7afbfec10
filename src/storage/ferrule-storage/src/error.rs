//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
///
/// A missing row is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be reached.
    #[error("connection error: {0}")]
    Connection(String),
}
