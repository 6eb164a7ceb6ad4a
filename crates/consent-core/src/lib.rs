//! # consent-core
//!
//! Foundation crate for the consent-gated storage client.
//! Defines the permission model, the storage and consent-source traits,
//! errors, config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ConsentConfig;
pub use errors::{ConsentError, ConsentResult, StorageError};
pub use models::{CategoryStatus, ConsentEvent, ConsentEventKind, PermissionMap, WriteOptions};
