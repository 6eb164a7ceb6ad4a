use std::fmt;

use serde::{Deserialize, Serialize};

/// Three-way answer to "may data of this category be persisted?".
///
/// Only `Granted` permits a gated write. `Unknown` covers both a category
/// missing from the policy and a registry that was never initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Granted,
    Denied,
    Unknown,
}

impl CategoryStatus {
    /// Lift a policy lookup into a status. Absent means unknown.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Granted,
            Some(false) => Self::Denied,
            None => Self::Unknown,
        }
    }

    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

impl fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}
