//! # consent-store
//!
//! Key/value storage gated on consent. Writes tagged with a category only
//! reach the medium when the category is granted; reads and deletes are
//! never gated. Ships memory, JSON-file, and SQLite media plus an async
//! variant whose consent check runs before any I/O is issued.

pub mod deferred;
pub mod engine;
pub mod gate;
pub mod medium;
pub mod namespace;

pub use deferred::{AsyncGatedStore, DeferredWrite};
pub use engine::GatedStore;
pub use gate::{ConsentGate, StorePolicy};
pub use medium::{FileMedium, MemoryAsyncMedium, MemoryMedium, SqliteMedium};
pub use namespace::Namespace;

use consent_core::errors::StorageError;

/// Wrap a lower-level failure message as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> StorageError {
    StorageError::Io {
        message: message.into(),
    }
}
