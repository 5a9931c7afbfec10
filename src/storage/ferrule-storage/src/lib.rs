//! # Ferrule Storage
//!
//! Storage abstraction for encrypted integration credentials.
//!
//! The relational store that backs production deployments lives outside this
//! workspace; it implements [`CredentialStore`] and keeps each envelope in a
//! single text column. [`MemoryStore`] is provided for development and tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod error;
pub mod memory;
pub mod record;

pub use backend::CredentialStore;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use record::StoredCredential;
