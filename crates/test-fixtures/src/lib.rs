//! Test fixtures for the consent workspace: policy documents, a recording
//! observer, and a storage medium that fails on demand.
//!
//! All helpers panic on error; they are only for tests.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use consent_core::errors::StorageError;
use consent_core::models::{ConsentEvent, PermissionMap};
use consent_core::traits::{IConsentObserver, IStorageMedium};
use serde_json::Value;

/// Directory holding the policy JSON files.
pub fn policies_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("policies")
}

/// Raw contents of `policies/<name>.json`.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn policy_json(name: &str) -> String {
    let path = policies_dir().join(format!("{name}.json"));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Parsed `policies/<name>.json`.
///
/// # Panics
/// Panics if the file doesn't exist or isn't a flat boolean map.
pub fn load_policy(name: &str) -> PermissionMap {
    let json = policy_json(name);
    PermissionMap::from_json(&json).unwrap_or_else(|e| panic!("Failed to parse policy {name}: {e}"))
}

/// `{marketing: false, logging: false, stability: true}`.
pub fn reference_policy() -> PermissionMap {
    load_policy("reference")
}

/// Collects every event it sees.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ConsentEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ConsentEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IConsentObserver for RecordingObserver {
    fn on_event(&self, event: &ConsentEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// In-memory medium that can be switched into failing mode, and counts
/// every write attempt that reaches it.
#[derive(Debug, Default)]
pub struct FlakyMedium {
    items: Mutex<BTreeMap<String, Value>>,
    failing: AtomicBool,
    write_attempts: Mutex<usize>,
}

impl FlakyMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Writes that reached the medium, successful or not.
    pub fn write_attempts(&self) -> usize {
        *self.write_attempts.lock().unwrap()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Io {
                message: "injected failure".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl IStorageMedium for FlakyMedium {
    fn read(&self, key: &str) -> Result<Option<Value>, StorageError> {
        self.check()?;
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: Value) -> Result<(), StorageError> {
        *self.write_attempts.lock().unwrap() += 1;
        self.check()?;
        self.items.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.items.lock().unwrap().remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        self.check()?;
        Ok(self
            .items
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}
