use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CategoryStatus;

/// What happened. Carries enough for an external collaborator to log it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConsentEventKind {
    /// The registry swapped in a new policy.
    PolicyReplaced {
        generation: u64,
        /// Categories that are now granted and were not before.
        granted: Vec<String>,
        /// Categories that were granted and no longer are.
        revoked: Vec<String>,
        added: Vec<String>,
        removed: Vec<String>,
    },
    WriteAccepted {
        namespace: String,
        key: String,
        category: String,
    },
    WriteDenied {
        namespace: String,
        key: String,
        category: String,
        status: CategoryStatus,
    },
    /// A write that skipped the consent check.
    UncategorizedWrite { namespace: String, key: String },
}

/// A timestamped consent event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentEvent {
    #[serde(flatten)]
    pub kind: ConsentEventKind,
    pub timestamp: DateTime<Utc>,
}

impl ConsentEvent {
    pub fn new(kind: ConsentEventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
        }
    }

    /// Category of a write event; `None` for policy and uncategorized events.
    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            ConsentEventKind::WriteAccepted { category, .. }
            | ConsentEventKind::WriteDenied { category, .. } => Some(category),
            _ => None,
        }
    }

    pub fn is_denial(&self) -> bool {
        matches!(self.kind, ConsentEventKind::WriteDenied { .. })
    }
}
