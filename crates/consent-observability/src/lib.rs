//! # consent-observability
//!
//! Tracing subscriber setup, structured events for consent decisions, and
//! [`DecisionLog`], an observer that keeps recent decisions and per-category
//! counters for an external logging collaborator to drain.

pub mod decision_log;
pub mod tracing_setup;

pub use decision_log::{CategoryCounts, DecisionLog, DecisionSummary};
