use crate::models::ConsentEvent;

/// Receives every policy change and every gated-write decision.
///
/// Called synchronously on the thread performing the operation, after the
/// decision is made. Implementations must not block.
pub trait IConsentObserver: Send + Sync {
    fn on_event(&self, event: &ConsentEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl IConsentObserver for NoopObserver {
    fn on_event(&self, _event: &ConsentEvent) {}
}
