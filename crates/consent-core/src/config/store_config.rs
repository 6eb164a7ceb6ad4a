use serde::{Deserialize, Serialize};

use super::defaults;

/// Which medium backs a store built from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumKind {
    #[default]
    Memory,
    File,
    Sqlite,
}

/// Handling of writes that carry no category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UncategorizedWrites {
    /// Write without a consent check. Each such write is still reported.
    #[default]
    Allow,
    /// Fail with `CategoryRequired`.
    Reject,
}

/// Handling of categories absent from the policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategories {
    /// Report as `ConsentDenied`, same as an explicit `false`.
    #[default]
    Deny,
    /// Report as `UnknownCategory`. Still fail-closed.
    Distinguish,
}

/// Gated store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key prefix isolating this store from others on the same medium.
    pub namespace: String,
    pub medium: MediumKind,
    /// File or database path for file-backed media.
    pub path: String,
    /// Maximum total bytes for the memory medium. 0 disables the limit.
    pub quota_bytes: u64,
    pub uncategorized_writes: UncategorizedWrites,
    pub unknown_categories: UnknownCategories,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            namespace: defaults::DEFAULT_NAMESPACE.to_string(),
            medium: MediumKind::default(),
            path: defaults::DEFAULT_STORE_PATH.to_string(),
            quota_bytes: defaults::DEFAULT_QUOTA_BYTES,
            uncategorized_writes: UncategorizedWrites::default(),
            unknown_categories: UnknownCategories::default(),
        }
    }
}
