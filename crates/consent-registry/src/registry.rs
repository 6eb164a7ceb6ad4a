//! [`ConsentRegistry`]: the one shared copy of the user's consent policy.

use std::sync::{Arc, RwLock};

use consent_core::errors::ConsentResult;
use consent_core::models::{CategoryStatus, ConsentEvent, ConsentEventKind, PermissionMap};
use consent_core::traits::{IConsentObserver, IConsentSource};

use crate::diff::PolicyDiff;

/// An immutable policy plus the generation that installed it.
#[derive(Debug, Default)]
struct RegistryState {
    map: PermissionMap,
    /// 0 until the first `init`.
    generation: u64,
}

/// Holds the current permission map.
///
/// Constructed explicitly and shared by `Arc`; there is no global instance.
/// `init` builds the replacement state off to the side and swaps a pointer
/// under a write lock, so concurrent readers see either the old map or the
/// new one, never a blend.
pub struct ConsentRegistry {
    state: RwLock<Arc<RegistryState>>,
    observers: Vec<Arc<dyn IConsentObserver>>,
}

impl ConsentRegistry {
    /// An uninitialized registry. Every category is unknown until `init`.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Arc::new(RegistryState::default())),
            observers: Vec::new(),
        }
    }

    /// Notify `observer` of every policy replacement.
    pub fn with_observer(mut self, observer: Arc<dyn IConsentObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Replace the whole policy. No key validation; the server is trusted.
    pub fn init(&self, map: PermissionMap) {
        let _span = tracing::debug_span!("consent.policy_init", categories = map.len()).entered();

        let (diff, generation) = {
            let mut guard = self.state.write().unwrap_or_else(|e| e.into_inner());
            let generation = guard.generation + 1;
            let diff = PolicyDiff::between(&guard.map, &map);
            *guard = Arc::new(RegistryState { map, generation });
            (diff, generation)
        };

        tracing::trace!(generation, changed = !diff.is_empty(), "policy state swapped");

        if self.observers.is_empty() {
            return;
        }
        let event = ConsentEvent::new(ConsentEventKind::PolicyReplaced {
            generation,
            granted: diff.granted,
            revoked: diff.revoked,
            added: diff.added,
            removed: diff.removed,
        });
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    /// Same as [`init`](Self::init); reads better for server refreshes.
    pub fn update(&self, map: PermissionMap) {
        self.init(map);
    }

    /// Parse a server policy document and install it. On a parse error the
    /// current policy stays in place.
    pub fn init_from_json(&self, json: &str) -> ConsentResult<()> {
        let map = PermissionMap::from_json(json)?;
        self.init(map);
        Ok(())
    }

    /// Fail-closed lookup: absent categories and the pre-init state are denied.
    pub fn is_granted(&self, category: &str) -> bool {
        self.status(category).is_granted()
    }

    /// Distinguishes an explicit `false` from a category the policy never named.
    pub fn status(&self, category: &str) -> CategoryStatus {
        CategoryStatus::from_flag(self.current().map.get(category))
    }

    /// An owned copy of the current policy, for display and template binding.
    pub fn snapshot(&self) -> PermissionMap {
        self.current().map.clone()
    }

    /// Number of policies installed so far.
    pub fn generation(&self) -> u64 {
        self.current().generation
    }

    pub fn is_initialized(&self) -> bool {
        self.generation() > 0
    }

    fn current(&self) -> Arc<RegistryState> {
        let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }
}

impl Default for ConsentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConsentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.current();
        f.debug_struct("ConsentRegistry")
            .field("generation", &state.generation)
            .field("map", &state.map)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl IConsentSource for ConsentRegistry {
    fn status(&self, category: &str) -> CategoryStatus {
        ConsentRegistry::status(self, category)
    }

    fn is_granted(&self, category: &str) -> bool {
        ConsentRegistry::is_granted(self, category)
    }

    /// Holds the read lock while `f` runs, so `init` waits for it.
    fn with_status(&self, category: &str, f: &mut dyn FnMut(CategoryStatus)) {
        let guard = self.state.read().unwrap_or_else(|e| e.into_inner());
        f(CategoryStatus::from_flag(guard.map.get(category)));
    }
}
