use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use consent_core::errors::StorageError;
use consent_core::traits::IAsyncStorageMedium;

/// Async medium over a tokio mutex. Stands in for a remote store.
#[derive(Debug, Default)]
pub struct MemoryAsyncMedium {
    items: Mutex<BTreeMap<String, Value>>,
}

impl MemoryAsyncMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IAsyncStorageMedium for MemoryAsyncMedium {
    async fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.items.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.items.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().await.remove(key);
        Ok(())
    }
}
