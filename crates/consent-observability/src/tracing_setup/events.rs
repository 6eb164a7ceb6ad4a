//! Structured log events for consent decisions.
//!
//! Each function emits a `tracing` event with structured fields.

use consent_core::models::{CategoryStatus, ConsentEvent, ConsentEventKind};

/// Log a policy replacement.
pub fn policy_replaced(generation: u64, granted: &[String], revoked: &[String]) {
    tracing::info!(
        event = "policy_replaced",
        generation = generation,
        granted = ?granted,
        revoked = ?revoked,
        "consent policy replaced"
    );
}

/// Log a gated write that passed its consent check.
pub fn write_accepted(namespace: &str, key: &str, category: &str) {
    tracing::debug!(
        event = "write_accepted",
        namespace = %namespace,
        key = %key,
        category = %category,
        "gated write accepted"
    );
}

/// Log a gated write rejected for lack of consent.
pub fn write_denied(namespace: &str, key: &str, category: &str, status: CategoryStatus) {
    tracing::info!(
        event = "write_denied",
        namespace = %namespace,
        key = %key,
        category = %category,
        status = %status,
        "gated write denied"
    );
}

/// Log a write that skipped the consent check.
pub fn uncategorized_write(namespace: &str, key: &str) {
    tracing::warn!(
        event = "uncategorized_write",
        namespace = %namespace,
        key = %key,
        "write bypassed consent check"
    );
}

/// Dispatch to the matching event function.
pub fn emit(event: &ConsentEvent) {
    match &event.kind {
        ConsentEventKind::PolicyReplaced {
            generation,
            granted,
            revoked,
            ..
        } => policy_replaced(*generation, granted, revoked),
        ConsentEventKind::WriteAccepted {
            namespace,
            key,
            category,
        } => write_accepted(namespace, key, category),
        ConsentEventKind::WriteDenied {
            namespace,
            key,
            category,
            status,
        } => write_denied(namespace, key, category, *status),
        ConsentEventKind::UncategorizedWrite { namespace, key } => {
            uncategorized_write(namespace, key)
        }
    }
}
