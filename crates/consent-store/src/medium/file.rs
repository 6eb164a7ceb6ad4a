//! JSON-document medium: the on-disk analogue of browser local storage.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use consent_core::errors::StorageError;
use consent_core::traits::IStorageMedium;

use crate::to_storage_err;

/// Keeps the whole store in one JSON file.
///
/// Every mutation rewrites the file through a temp file in the same
/// directory and an atomic rename, so a crash leaves either the old or the
/// new document. A failed persist rolls the in-memory copy back.
#[derive(Debug)]
pub struct FileMedium {
    path: PathBuf,
    items: Mutex<BTreeMap<String, Value>>,
}

impl FileMedium {
    /// Open `path`, loading it if it exists. Missing parent directories are created.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let items = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| StorageError::Corrupted {
                    details: format!("{}: {e}", path.display()),
                })?
            }
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), entries = items.len(), "file medium opened");
        Ok(Self {
            path: path.to_path_buf(),
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Value>>, StorageError> {
        self.items
            .lock()
            .map_err(|e| to_storage_err(format!("file medium lock poisoned: {e}")))
    }

    fn persist(&self, items: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer(&mut tmp, items)
            .map_err(|e| to_storage_err(format!("encode {}: {e}", self.path.display())))?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::from(e.error))?;
        Ok(())
    }
}

impl IStorageMedium for FileMedium {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut items = self.lock()?;
        let previous = items.insert(key.to_string(), value);
        if let Err(e) = self.persist(&items) {
            match previous {
                Some(old) => items.insert(key.to_string(), old),
                None => items.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.lock()?;
        let Some(previous) = items.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist(&items) {
            items.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        Ok(self
            .lock()?
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
