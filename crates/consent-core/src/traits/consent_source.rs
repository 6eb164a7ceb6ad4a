use crate::models::CategoryStatus;

/// Read-only view of the current consent policy.
///
/// Gated stores depend on this rather than on a concrete registry, so any
/// number of stores can share one policy without being able to mutate it.
pub trait IConsentSource: Send + Sync {
    /// Status of `category` under the current policy.
    fn status(&self, category: &str) -> CategoryStatus;

    /// Fail-closed: only an explicit `true` grants.
    fn is_granted(&self, category: &str) -> bool {
        self.status(category).is_granted()
    }

    /// Run `f` with the status of `category`, holding the policy fixed until
    /// `f` returns.
    ///
    /// Sources that can be replaced concurrently must block replacement for
    /// the duration of `f`. `f` must not replace the policy itself.
    fn with_status(&self, category: &str, f: &mut dyn FnMut(CategoryStatus)) {
        f(self.status(category));
    }
}
