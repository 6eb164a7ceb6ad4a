use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;

use consent_core::errors::StorageError;
use consent_core::traits::IStorageMedium;

use super::entry_size;
use crate::to_storage_err;

#[derive(Debug, Default)]
struct MemoryState {
    items: BTreeMap<String, Value>,
    used_bytes: u64,
}

/// Process-local medium with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryMedium {
    state: Mutex<MemoryState>,
    /// 0 = unlimited.
    quota_bytes: u64,
}

impl MemoryMedium {
    /// Unlimited.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes that would push total usage past `quota_bytes` fail with
    /// `QuotaExceeded`. 0 disables the limit.
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            state: Mutex::default(),
            quota_bytes,
        }
    }

    /// Bytes currently counted against the quota.
    pub fn used_bytes(&self) -> Result<u64, StorageError> {
        Ok(self.lock()?.used_bytes)
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.lock()?.items.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| to_storage_err(format!("memory medium lock poisoned: {e}")))
    }
}

impl IStorageMedium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.lock()?.items.get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        let replaced = state
            .items
            .get(key)
            .map(|old| entry_size(key, old))
            .unwrap_or(0);
        let used = state.used_bytes - replaced + entry_size(key, &value);

        if self.quota_bytes > 0 && used > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                used,
                limit: self.quota_bytes,
            });
        }

        state.items.insert(key.to_string(), value);
        state.used_bytes = used;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut state = self.lock()?;
        if let Some(old) = state.items.remove(key) {
            state.used_bytes -= entry_size(key, &old);
        }
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .lock()?
            .items
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
