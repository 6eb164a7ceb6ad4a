//! Gated store over an asynchronous medium.
//!
//! The consent check never crosses an `.await`: [`AsyncGatedStore::set_deferred`]
//! decides synchronously and only hands back a write future when the
//! category is granted. A denied call issues no I/O at all. Dropping the
//! returned future before completion leaves the write's outcome unspecified.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use consent_core::errors::{ConsentError, ConsentResult};
use consent_core::models::WriteOptions;
use consent_core::traits::{IAsyncStorageMedium, IConsentObserver, IConsentSource};

use crate::gate::{ConsentGate, StorePolicy};
use crate::namespace::Namespace;

/// A write that already passed its consent check.
pub type DeferredWrite = Pin<Box<dyn Future<Output = ConsentResult<()>> + Send + 'static>>;

#[derive(Clone)]
pub struct AsyncGatedStore {
    gate: ConsentGate,
    medium: Arc<dyn IAsyncStorageMedium>,
}

impl AsyncGatedStore {
    pub fn new(source: Arc<dyn IConsentSource>, medium: Arc<dyn IAsyncStorageMedium>) -> Self {
        Self {
            gate: ConsentGate::new(source),
            medium,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.gate.set_namespace(Namespace::new(namespace));
        self
    }

    pub fn with_policy(mut self, policy: StorePolicy) -> Self {
        self.gate.set_policy(policy);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn IConsentObserver>) -> Self {
        self.gate.add_observer(observer);
        self
    }

    pub fn namespace(&self) -> &str {
        self.gate.namespace().name()
    }

    pub async fn get(&self, key: &str) -> ConsentResult<Option<Value>> {
        let medium_key = self.gate.namespace().qualify(key);
        Ok(self.medium.read(&medium_key).await?)
    }

    pub async fn remove(&self, key: &str) -> ConsentResult<()> {
        let medium_key = self.gate.namespace().qualify(key);
        self.medium.delete(&medium_key).await?;
        Ok(())
    }

    /// Check consent now; on success return the pending write.
    ///
    /// Denial and serialization errors are returned from this call, denial
    /// first. Errors from the medium surface when the future is awaited.
    pub fn set_deferred<V: Serialize>(
        &self,
        key: &str,
        value: V,
        options: WriteOptions,
    ) -> ConsentResult<DeferredWrite> {
        self.gate.check(key, &options)?;
        let value = serde_json::to_value(value)?;

        let medium = Arc::clone(&self.medium);
        let medium_key = self.gate.namespace().qualify(key);
        Ok(Box::pin(async move {
            medium
                .write(&medium_key, value)
                .await
                .map_err(ConsentError::from)
        }))
    }

    /// Check, then await the write.
    pub async fn set<V: Serialize>(
        &self,
        key: &str,
        value: V,
        options: WriteOptions,
    ) -> ConsentResult<()> {
        self.set_deferred(key, value, options)?.await
    }
}

impl std::fmt::Debug for AsyncGatedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncGatedStore")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
