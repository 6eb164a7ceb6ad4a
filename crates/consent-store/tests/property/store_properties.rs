//! Property tests: granted writes land, denied writes leave no trace,
//! unrestricted writes always succeed, namespaces stay disjoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use consent_core::{ConsentError, PermissionMap, WriteOptions};
use consent_registry::ConsentRegistry;
use consent_store::{GatedStore, MemoryMedium};

fn policy_strategy() -> impl Strategy<Value = BTreeMap<String, bool>> {
    prop::collection::btree_map("[a-z]{1,8}", any::<bool>(), 0..8)
}

fn store_for(map: &BTreeMap<String, bool>) -> GatedStore {
    let registry = Arc::new(ConsentRegistry::new());
    registry.init(PermissionMap::from(map.clone()));
    GatedStore::new(registry, Arc::new(MemoryMedium::new()))
}

proptest! {
    #[test]
    fn prop_gated_write_matches_grant(
        map in policy_strategy(),
        category in "[a-z]{1,8}",
        key in "[a-z0-9_]{1,16}",
        prior in any::<Option<i64>>(),
        value in any::<i64>(),
    ) {
        let store = store_for(&map);
        if let Some(p) = prior {
            store.set(&key, p, WriteOptions::unrestricted()).unwrap();
        }

        let granted = map.get(&category).copied().unwrap_or(false);
        let result = store.set(&key, value, WriteOptions::for_category(category.clone()));

        if granted {
            prop_assert!(result.is_ok());
            prop_assert_eq!(store.get(&key).unwrap(), Some(json!(value)));
        } else {
            let denied_category = match result {
                Err(ConsentError::ConsentDenied { category }) => category,
                other => return Err(TestCaseError::fail(format!("expected denial, got {other:?}"))),
            };
            prop_assert_eq!(denied_category, category);
            prop_assert_eq!(store.get(&key).unwrap(), prior.map(|p| json!(p)));
        }
    }

    #[test]
    fn prop_unrestricted_always_succeeds(
        map in policy_strategy(),
        key in "[a-z0-9_]{1,16}",
        value in ".{0,32}",
    ) {
        let store = store_for(&map);
        prop_assert!(store.set(&key, &value, WriteOptions::unrestricted()).is_ok());
        prop_assert_eq!(store.get(&key).unwrap(), Some(json!(value)));
    }

    #[test]
    fn prop_namespaces_are_disjoint(
        first in "[a-z:%]{0,6}",
        second in "[a-z:%]{0,6}",
        key in "[a-z:%]{1,8}",
    ) {
        prop_assume!(first != second);
        let registry = Arc::new(ConsentRegistry::new());
        let medium = Arc::new(MemoryMedium::new());
        let a = GatedStore::new(registry.clone(), medium.clone()).with_namespace(first);
        let b = GatedStore::new(registry, medium).with_namespace(second);

        a.set(&key, 1, WriteOptions::unrestricted()).unwrap();
        prop_assert_eq!(a.keys().unwrap(), vec![key.clone()]);
        prop_assert!(b.keys().unwrap().is_empty());
        prop_assert_eq!(b.get(&key).unwrap(), None);
        prop_assert_eq!(b.clear().unwrap(), 0);
        prop_assert_eq!(a.get(&key).unwrap(), Some(json!(1)));
    }
}
