use async_trait::async_trait;
use serde_json::Value;

use crate::errors::StorageError;

/// The persistent key/value medium behind a gated store.
///
/// Knows nothing about consent. Keys arrive already namespaced.
pub trait IStorageMedium: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;
    /// Must leave prior contents untouched when it fails.
    fn write(&self, key: &str, value: Value) -> Result<(), StorageError>;
    /// Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
    /// All keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// A medium whose I/O completes asynchronously (e.g. a remote store).
#[async_trait]
pub trait IAsyncStorageMedium: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError>;
    async fn write(&self, key: &str, value: Value) -> Result<(), StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}
