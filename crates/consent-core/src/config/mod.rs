pub mod defaults;
pub mod enforcement_config;
pub mod observability_config;
pub mod store_config;

pub use enforcement_config::EnforcementConfig;
pub use observability_config::ObservabilityConfig;
pub use store_config::{MediumKind, StoreConfig, UncategorizedWrites, UnknownCategories};

use serde::{Deserialize, Serialize};

use crate::errors::{ConsentError, ConsentResult};

/// Top-level configuration, loaded from TOML. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentConfig {
    pub store: StoreConfig,
    pub enforcement: EnforcementConfig,
    pub observability: ObservabilityConfig,
}

impl ConsentConfig {
    /// Parse from a TOML string. Missing fields take their defaults.
    pub fn from_toml(s: &str) -> ConsentResult<Self> {
        toml::from_str(s).map_err(|e| ConsentError::ConfigError {
            reason: e.to_string(),
        })
    }

    pub fn to_toml(&self) -> ConsentResult<String> {
        toml::to_string(self).map_err(|e| ConsentError::ConfigError {
            reason: e.to_string(),
        })
    }
}
