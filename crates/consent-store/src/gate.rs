//! The consent decision shared by the sync and async stores.

use std::sync::Arc;

use consent_core::config::{StoreConfig, UncategorizedWrites, UnknownCategories};
use consent_core::errors::{ConsentError, ConsentResult};
use consent_core::models::{CategoryStatus, ConsentEvent, ConsentEventKind, WriteOptions};
use consent_core::traits::{IConsentObserver, IConsentSource};

use crate::namespace::Namespace;

/// How a store treats writes the policy doesn't clearly cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StorePolicy {
    pub uncategorized: UncategorizedWrites,
    pub unknown: UnknownCategories,
}

impl StorePolicy {
    /// Refuse uncategorized writes and report unknown categories separately.
    pub fn strict() -> Self {
        Self {
            uncategorized: UncategorizedWrites::Reject,
            unknown: UnknownCategories::Distinguish,
        }
    }
}

impl From<&StoreConfig> for StorePolicy {
    fn from(config: &StoreConfig) -> Self {
        Self {
            uncategorized: config.uncategorized_writes,
            unknown: config.unknown_categories,
        }
    }
}

/// Decides whether a write may proceed and reports the decision.
///
/// Holds only a read-only consent source; it can never change the policy.
#[derive(Clone)]
pub struct ConsentGate {
    source: Arc<dyn IConsentSource>,
    namespace: Namespace,
    policy: StorePolicy,
    observers: Vec<Arc<dyn IConsentObserver>>,
}

impl ConsentGate {
    pub fn new(source: Arc<dyn IConsentSource>) -> Self {
        Self {
            source,
            namespace: Namespace::default(),
            policy: StorePolicy::default(),
            observers: Vec::new(),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn policy(&self) -> StorePolicy {
        self.policy
    }

    pub(crate) fn set_namespace(&mut self, namespace: Namespace) {
        self.namespace = namespace;
    }

    pub(crate) fn set_policy(&mut self, policy: StorePolicy) {
        self.policy = policy;
    }

    pub(crate) fn add_observer(&mut self, observer: Arc<dyn IConsentObserver>) {
        self.observers.push(observer);
    }

    /// `Ok` when a write of `key` under `options` may reach the medium.
    ///
    /// The policy may change as soon as this returns; use
    /// [`guarded`](Self::guarded) to keep it fixed across the write itself.
    pub fn check(&self, key: &str, options: &WriteOptions) -> ConsentResult<()> {
        self.guarded(key, options, || Ok(()))
    }

    /// Decide, and on success run `write` before the policy can change.
    ///
    /// For a categorized write the status is read once and `write` runs
    /// inside [`IConsentSource::with_status`], so a concurrent policy
    /// replacement waits until the write has finished. Observers are
    /// notified inside that window and must not call back into the source.
    pub fn guarded<R>(
        &self,
        key: &str,
        options: &WriteOptions,
        write: impl FnOnce() -> ConsentResult<R>,
    ) -> ConsentResult<R> {
        let Some(category) = options.category() else {
            self.check_uncategorized(key)?;
            return write();
        };

        let mut pending = Some(write);
        let mut outcome: Option<ConsentResult<R>> = None;
        self.source.with_status(category, &mut |status| {
            let Some(write) = pending.take() else {
                return;
            };
            self.report(key, category, status);
            outcome = Some(if status.is_granted() {
                write()
            } else {
                Err(self.denial(category, status))
            });
        });

        // A source that never invokes the callback grants nothing.
        outcome.unwrap_or_else(|| {
            Err(ConsentError::ConsentDenied {
                category: category.to_string(),
            })
        })
    }

    fn denial(&self, category: &str, status: CategoryStatus) -> ConsentError {
        match (status, self.policy.unknown) {
            (CategoryStatus::Unknown, UnknownCategories::Distinguish) => {
                ConsentError::UnknownCategory {
                    category: category.to_string(),
                }
            }
            _ => ConsentError::ConsentDenied {
                category: category.to_string(),
            },
        }
    }

    fn report(&self, key: &str, category: &str, status: CategoryStatus) {
        tracing::trace!(
            namespace = %self.namespace.name(),
            key = %key,
            category = %category,
            status = %status,
            "consent gate decision"
        );
        let namespace = self.namespace.name().to_string();
        let key = key.to_string();
        let category = category.to_string();
        self.notify(if status.is_granted() {
            ConsentEventKind::WriteAccepted {
                namespace,
                key,
                category,
            }
        } else {
            ConsentEventKind::WriteDenied {
                namespace,
                key,
                category,
                status,
            }
        });
    }

    fn check_uncategorized(&self, key: &str) -> ConsentResult<()> {
        match self.policy.uncategorized {
            UncategorizedWrites::Allow => {
                tracing::trace!(
                    namespace = %self.namespace.name(),
                    key = %key,
                    "consent gate bypassed"
                );
                self.notify(ConsentEventKind::UncategorizedWrite {
                    namespace: self.namespace.name().to_string(),
                    key: key.to_string(),
                });
                Ok(())
            }
            UncategorizedWrites::Reject => Err(ConsentError::CategoryRequired {
                key: key.to_string(),
            }),
        }
    }

    fn notify(&self, kind: ConsentEventKind) {
        if self.observers.is_empty() {
            return;
        }
        let event = ConsentEvent::new(kind);
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }
}

impl std::fmt::Debug for ConsentGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsentGate")
            .field("namespace", &self.namespace)
            .field("policy", &self.policy)
            .field("observers", &self.observers.len())
            .finish()
    }
}
