//! Property tests: fail-closed lookups, wholesale replacement, idempotent reads.

use std::collections::BTreeMap;

use consent_core::PermissionMap;
use consent_registry::ConsentRegistry;
use proptest::prelude::*;

fn policy_strategy() -> impl Strategy<Value = BTreeMap<String, bool>> {
    prop::collection::btree_map("[a-z]{1,10}", any::<bool>(), 0..12)
}

proptest! {
    #[test]
    fn prop_uninitialized_denies(category in "[a-z]{1,16}") {
        let registry = ConsentRegistry::new();
        prop_assert!(!registry.is_granted(&category));
    }

    #[test]
    fn prop_init_matches_map(map in policy_strategy(), probe in "[a-z]{1,10}") {
        let registry = ConsentRegistry::new();
        registry.init(PermissionMap::from(map.clone()));

        for (category, granted) in &map {
            prop_assert_eq!(registry.is_granted(category), *granted);
        }
        let expected = map.get(&probe).copied().unwrap_or(false);
        prop_assert_eq!(registry.is_granted(&probe), expected);
    }

    #[test]
    fn prop_second_init_replaces(first in policy_strategy(), second in policy_strategy()) {
        let registry = ConsentRegistry::new();
        registry.init(PermissionMap::from(first.clone()));
        registry.init(PermissionMap::from(second.clone()));

        for category in first.keys() {
            let expected = second.get(category).copied().unwrap_or(false);
            prop_assert_eq!(registry.is_granted(category), expected);
        }
        prop_assert_eq!(registry.snapshot(), PermissionMap::from(second));
    }

    #[test]
    fn prop_is_granted_idempotent(map in policy_strategy(), probe in "[a-z]{1,10}") {
        let registry = ConsentRegistry::new();
        registry.init(PermissionMap::from(map));
        let first = registry.is_granted(&probe);
        for _ in 0..5 {
            prop_assert_eq!(registry.is_granted(&probe), first);
        }
    }
}
