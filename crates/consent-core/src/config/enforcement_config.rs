//! Application-level switch for consent enforcement.
//!
//! Consulted by calling code *before* it reaches a gated store; the store
//! itself never reads it.
//!
//! # Examples
//!
//! ```
//! use consent_core::config::EnforcementConfig;
//!
//! let config = EnforcementConfig { gdpr_enforced: false };
//! assert!(config.gated_options("marketing").is_unrestricted());
//! ```

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::WriteOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnforcementConfig {
    /// When false, callers write without categories. Default: true.
    pub gdpr_enforced: bool,
}

impl EnforcementConfig {
    /// Options a caller should pass for data of `category`.
    pub fn gated_options(&self, category: &str) -> WriteOptions {
        if self.gdpr_enforced {
            WriteOptions::for_category(category)
        } else {
            WriteOptions::unrestricted()
        }
    }
}

impl Default for EnforcementConfig {
    fn default() -> Self {
        Self {
            gdpr_enforced: defaults::DEFAULT_GDPR_ENFORCED,
        }
    }
}
