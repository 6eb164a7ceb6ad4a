//! Storage media. None of them know about consent.

pub mod async_memory;
pub mod file;
pub mod memory;
pub mod sqlite;

pub use async_memory::MemoryAsyncMedium;
pub use file::FileMedium;
pub use memory::MemoryMedium;
pub use sqlite::SqliteMedium;

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use consent_core::config::{MediumKind, StoreConfig};
use consent_core::errors::ConsentResult;
use consent_core::traits::IStorageMedium;

/// Open the medium named by `config`.
pub fn open(config: &StoreConfig) -> ConsentResult<Arc<dyn IStorageMedium>> {
    let medium: Arc<dyn IStorageMedium> = match config.medium {
        MediumKind::Memory => Arc::new(MemoryMedium::with_quota(config.quota_bytes)),
        MediumKind::File => Arc::new(FileMedium::open(Path::new(&config.path))?),
        MediumKind::Sqlite => Arc::new(SqliteMedium::open(Path::new(&config.path))?),
    };
    tracing::debug!(medium = ?config.medium, path = %config.path, "storage medium opened");
    Ok(medium)
}

/// Bytes an entry counts against a quota: key plus compact JSON value.
pub(crate) fn entry_size(key: &str, value: &Value) -> u64 {
    (key.len() + value.to_string().len()) as u64
}
