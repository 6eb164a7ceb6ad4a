//! Bounded record of consent decisions plus running per-category counters.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use consent_core::config::{defaults, ObservabilityConfig};
use consent_core::errors::{ConsentError, ConsentResult};
use consent_core::models::{ConsentEvent, ConsentEventKind};
use consent_core::traits::IConsentObserver;

use crate::tracing_setup::events;

/// Accepted/denied totals for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub accepted: u64,
    pub denied: u64,
}

/// Counters over every event ever recorded, including evicted ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub total_events: u64,
    pub policy_changes: u64,
    pub uncategorized_writes: u64,
    pub by_category: BTreeMap<String, CategoryCounts>,
    /// Events still held in the ring.
    pub retained: usize,
}

#[derive(Debug, Default)]
struct LogState {
    entries: VecDeque<ConsentEvent>,
    summary: DecisionSummary,
}

/// Observer that logs each event through `tracing` and keeps the most
/// recent ones in a ring buffer.
#[derive(Debug)]
pub struct DecisionLog {
    state: Mutex<LogState>,
    capacity: usize,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::with_capacity(defaults::DEFAULT_DECISION_LOG_CAPACITY)
    }

    /// A capacity of 0 keeps counters only.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::default(),
            capacity,
        }
    }

    pub fn from_config(config: &ObservabilityConfig) -> Self {
        Self::with_capacity(config.decision_log_capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record an event, evicting the oldest once full.
    pub fn record(&self, event: ConsentEvent) {
        events::emit(&event);

        let mut state = self.lock();
        let summary = &mut state.summary;
        summary.total_events += 1;
        match &event.kind {
            ConsentEventKind::PolicyReplaced { .. } => summary.policy_changes += 1,
            ConsentEventKind::UncategorizedWrite { .. } => summary.uncategorized_writes += 1,
            ConsentEventKind::WriteAccepted { category, .. } => {
                summary
                    .by_category
                    .entry(category.clone())
                    .or_default()
                    .accepted += 1;
            }
            ConsentEventKind::WriteDenied { category, .. } => {
                summary
                    .by_category
                    .entry(category.clone())
                    .or_default()
                    .denied += 1;
            }
        }

        if self.capacity == 0 {
            return;
        }
        if state.entries.len() == self.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(event);
    }

    /// Up to `n` most recent events, oldest first.
    pub fn recent(&self, n: usize) -> Vec<ConsentEvent> {
        let state = self.lock();
        let skip = state.entries.len().saturating_sub(n);
        state.entries.iter().skip(skip).cloned().collect()
    }

    /// Retained denial events, oldest first.
    pub fn denials(&self) -> Vec<ConsentEvent> {
        self.lock()
            .entries
            .iter()
            .filter(|e| e.is_denial())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> DecisionSummary {
        let state = self.lock();
        DecisionSummary {
            retained: state.entries.len(),
            ..state.summary.clone()
        }
    }

    /// Summary and retained events as JSON, for handing to a log shipper.
    pub fn snapshot_json(&self) -> ConsentResult<serde_json::Value> {
        let summary =
            serde_json::to_value(self.summary()).map_err(ConsentError::SerializationError)?;
        let entries = serde_json::to_value(self.recent(self.capacity))
            .map_err(ConsentError::SerializationError)?;
        Ok(serde_json::json!({
            "summary": summary,
            "events": entries,
        }))
    }

    /// Drop retained events and reset counters.
    pub fn clear(&self) {
        *self.lock() = LogState::default();
    }

    fn lock(&self) -> MutexGuard<'_, LogState> {
        // Poisoning is ignored; every update leaves the state consistent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for DecisionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl IConsentObserver for DecisionLog {
    fn on_event(&self, event: &ConsentEvent) {
        self.record(event.clone());
    }
}
