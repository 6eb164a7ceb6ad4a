//! [`GatedStore`]: key/value façade that refuses to persist data of an
//! ungranted category.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use consent_core::{ConsentError, PermissionMap, WriteOptions};
//! use consent_registry::ConsentRegistry;
//! use consent_store::{GatedStore, MemoryMedium};
//!
//! let registry = Arc::new(ConsentRegistry::new());
//! registry.init(PermissionMap::from([("marketing", false), ("stability", true)]));
//!
//! let store = GatedStore::new(registry, Arc::new(MemoryMedium::new()));
//! store.set("crash_count", 3, WriteOptions::for_category("stability")).unwrap();
//!
//! let err = store.set("promo", 1, WriteOptions::for_category("marketing")).unwrap_err();
//! assert!(matches!(err, ConsentError::ConsentDenied { .. }));
//! assert_eq!(store.get("promo").unwrap(), None);
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use consent_core::config::StoreConfig;
use consent_core::errors::ConsentResult;
use consent_core::models::WriteOptions;
use consent_core::traits::{IConsentObserver, IConsentSource, IStorageMedium};

use crate::gate::{ConsentGate, StorePolicy};
use crate::medium;
use crate::namespace::Namespace;

/// Consent-gated key/value store over a synchronous medium.
///
/// Many stores (one per namespace) may share a medium and a consent source.
/// A `set` holds the consent policy fixed from its check through the write.
#[derive(Clone)]
pub struct GatedStore {
    gate: ConsentGate,
    medium: Arc<dyn IStorageMedium>,
}

impl GatedStore {
    pub fn new(source: Arc<dyn IConsentSource>, medium: Arc<dyn IStorageMedium>) -> Self {
        Self {
            gate: ConsentGate::new(source),
            medium,
        }
    }

    /// Build a store and its medium from config.
    pub fn from_config(config: &StoreConfig, source: Arc<dyn IConsentSource>) -> ConsentResult<Self> {
        let medium = medium::open(config)?;
        Ok(Self::new(source, medium)
            .with_namespace(config.namespace.clone())
            .with_policy(StorePolicy::from(config)))
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.gate.set_namespace(Namespace::new(namespace));
        self
    }

    pub fn with_policy(mut self, policy: StorePolicy) -> Self {
        self.gate.set_policy(policy);
        self
    }

    /// Report every write decision to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn IConsentObserver>) -> Self {
        self.gate.add_observer(observer);
        self
    }

    pub fn namespace(&self) -> &str {
        self.gate.namespace().name()
    }

    pub fn policy(&self) -> StorePolicy {
        self.gate.policy()
    }

    /// Never consults consent.
    pub fn get(&self, key: &str) -> ConsentResult<Option<Value>> {
        let medium_key = self.gate.namespace().qualify(key);
        Ok(self.medium.read(&medium_key)?)
    }

    /// [`get`](Self::get), deserialized into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> ConsentResult<Option<T>> {
        match self.get(key)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn contains_key(&self, key: &str) -> ConsentResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Persist `value` under `key` if `options` allow it.
    ///
    /// With a category: the medium is only touched when the category is
    /// granted; otherwise the call fails with `ConsentDenied` (or
    /// `UnknownCategory` in distinguishing mode) and the stored value is
    /// left exactly as it was. Without a category the store's
    /// [`StorePolicy`] decides.
    ///
    /// A policy replacement racing with a granted write waits for the write
    /// to finish. The value is serialized only after consent is granted.
    pub fn set<V: Serialize>(&self, key: &str, value: V, options: WriteOptions) -> ConsentResult<()> {
        let medium_key = self.gate.namespace().qualify(key);
        self.gate.guarded(key, &options, || {
            let value = serde_json::to_value(value)?;
            self.medium.write(&medium_key, value)?;
            Ok(())
        })
    }

    /// Never consults consent. Removing an absent key succeeds.
    pub fn remove(&self, key: &str) -> ConsentResult<()> {
        let medium_key = self.gate.namespace().qualify(key);
        self.medium.delete(&medium_key)?;
        Ok(())
    }

    /// Keys in this namespace, without the namespace prefix, sorted.
    pub fn keys(&self) -> ConsentResult<Vec<String>> {
        let ns = self.gate.namespace();
        let mut keys: Vec<String> = self
            .medium
            .keys_with_prefix(ns.prefix())?
            .iter()
            .filter_map(|k| ns.strip(k))
            .collect();
        keys.sort();
        Ok(keys)
    }

    /// Remove every key in this namespace. Returns how many were removed.
    ///
    /// Keys of other namespaces, including nested names like `a:b` for `a`
    /// and every named namespace for the empty one, are left alone.
    pub fn clear(&self) -> ConsentResult<usize> {
        let ns = self.gate.namespace();
        let keys: Vec<String> = self
            .medium
            .keys_with_prefix(ns.prefix())?
            .into_iter()
            .filter(|k| ns.owns(k))
            .collect();
        for key in &keys {
            self.medium.delete(key)?;
        }
        tracing::debug!(
            namespace = %ns.name(),
            removed = keys.len(),
            "namespace cleared"
        );
        Ok(keys.len())
    }
}

impl std::fmt::Debug for GatedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatedStore")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
