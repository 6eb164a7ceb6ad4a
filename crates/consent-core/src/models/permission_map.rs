//! The server-delivered mapping from consent category to granted flag.
//!
//! # Examples
//!
//! ```
//! use consent_core::PermissionMap;
//!
//! let map = PermissionMap::from_json(r#"{"marketing": false, "stability": true}"#).unwrap();
//! assert_eq!(map.get("stability"), Some(true));
//! assert_eq!(map.get("advertising"), None);
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConsentResult;

/// Category name → granted flag. Keys are server-defined.
///
/// Ordered so snapshots and serialized output are deterministic. Only a flat
/// object of booleans deserializes; nested values are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<String, bool>);

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a policy document as delivered by the server.
    pub fn from_json(json: &str) -> ConsentResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> ConsentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The stored flag, or `None` when the category is absent.
    pub fn get(&self, category: &str) -> Option<bool> {
        self.0.get(category).copied()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    /// Set a flag, returning the previous one.
    pub fn insert(&mut self, category: impl Into<String>, granted: bool) -> Option<bool> {
        self.0.insert(category.into(), granted)
    }

    pub fn remove(&mut self, category: &str) -> Option<bool> {
        self.0.remove(category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Categories whose flag is `true`.
    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, g)| *g).map(|(k, _)| k)
    }

    /// Categories present with flag `false`.
    pub fn denied(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, g)| !*g).map(|(k, _)| k)
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for PermissionMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, bool); N]> for PermissionMap {
    fn from(entries: [(K, bool); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<BTreeMap<String, bool>> for PermissionMap {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self(map)
    }
}

impl IntoIterator for PermissionMap {
    type Item = (String, bool);
    type IntoIter = btree_map::IntoIter<String, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
