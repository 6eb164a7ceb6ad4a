use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use consent_core::constants::categories;
use consent_core::models::{CategoryStatus, ConsentEventKind, PermissionMap};
use consent_core::traits::IConsentSource;
use consent_registry::{ConsentRegistry, PolicyDiff};
use test_fixtures::{load_policy, reference_policy, RecordingObserver};

#[test]
fn uninitialized_registry_denies_everything() {
    let registry = ConsentRegistry::new();
    assert!(!registry.is_initialized());
    assert_eq!(registry.generation(), 0);
    for category in categories::ALL {
        assert!(!registry.is_granted(category));
        assert_eq!(registry.status(category), CategoryStatus::Unknown);
    }
    assert!(registry.snapshot().is_empty());
}

#[test]
fn init_reflects_map_immediately() {
    let registry = ConsentRegistry::new();
    registry.init(reference_policy());

    assert!(registry.is_initialized());
    assert!(registry.is_granted("stability"));
    assert!(!registry.is_granted("marketing"));
    assert!(!registry.is_granted("logging"));
    assert!(!registry.is_granted("advertising"));

    assert_eq!(registry.status("marketing"), CategoryStatus::Denied);
    assert_eq!(registry.status("advertising"), CategoryStatus::Unknown);
}

#[test]
fn second_init_fully_replaces_first() {
    let registry = ConsentRegistry::new();
    registry.init(PermissionMap::from([("marketing", true), ("logging", true)]));
    registry.init(PermissionMap::from([("stability", true)]));

    assert!(!registry.is_granted("marketing"));
    assert!(!registry.is_granted("logging"));
    assert!(registry.is_granted("stability"));
    assert_eq!(registry.status("marketing"), CategoryStatus::Unknown);
    assert_eq!(registry.generation(), 2);
}

#[test]
fn update_is_a_full_replacement() {
    let registry = ConsentRegistry::new();
    registry.init(load_policy("all_granted"));
    registry.update(load_policy("all_denied"));
    for category in categories::ALL {
        assert_eq!(registry.status(category), CategoryStatus::Denied);
    }
}

#[test]
fn snapshot_is_detached_from_registry() {
    let registry = ConsentRegistry::new();
    registry.init(reference_policy());

    let mut snapshot = registry.snapshot();
    snapshot.insert("marketing", true);
    snapshot.remove("stability");

    assert!(!registry.is_granted("marketing"));
    assert!(registry.is_granted("stability"));
    assert_eq!(registry.snapshot(), reference_policy());
}

#[test]
fn init_from_json_installs_policy() {
    let registry = ConsentRegistry::new();
    registry
        .init_from_json(&test_fixtures::policy_json("reference"))
        .unwrap();
    assert!(registry.is_granted("stability"));
}

#[test]
fn malformed_json_leaves_policy_untouched() {
    let registry = ConsentRegistry::new();
    registry.init(reference_policy());

    let err = registry
        .init_from_json(&test_fixtures::policy_json("malformed_nested"))
        .unwrap_err();
    assert!(matches!(
        err,
        consent_core::ConsentError::SerializationError(_)
    ));
    assert_eq!(registry.generation(), 1);
    assert!(registry.is_granted("stability"));
}

#[test]
fn observer_receives_policy_diff() {
    let observer = Arc::new(RecordingObserver::new());
    let registry = ConsentRegistry::new().with_observer(observer.clone());

    registry.init(PermissionMap::from([("marketing", true), ("stability", false)]));
    registry.init(PermissionMap::from([("stability", true), ("logging", false)]));

    let events = observer.events();
    assert_eq!(events.len(), 2);
    match &events[1].kind {
        ConsentEventKind::PolicyReplaced {
            generation,
            granted,
            revoked,
            added,
            removed,
        } => {
            assert_eq!(*generation, 2);
            assert_eq!(granted, &vec!["stability".to_string()]);
            assert_eq!(revoked, &vec!["marketing".to_string()]);
            assert_eq!(added, &vec!["logging".to_string()]);
            assert_eq!(removed, &vec!["marketing".to_string()]);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn policy_diff_of_identical_maps_is_empty() {
    let map = reference_policy();
    assert!(PolicyDiff::between(&map, &map).is_empty());
}

#[test]
fn registry_works_through_trait_object() {
    let registry = Arc::new(ConsentRegistry::new());
    registry.init(reference_policy());
    let source: Arc<dyn IConsentSource> = registry.clone();
    assert!(source.is_granted("stability"));
    assert_eq!(source.status("marketing"), CategoryStatus::Denied);
}

#[test]
fn readers_never_observe_a_torn_map() {
    // Policy A grants both categories, policy B denies both. A reader must
    // see the pair agree on every snapshot.
    let a = PermissionMap::from([("marketing", true), ("logging", true)]);
    let b = PermissionMap::from([("marketing", false), ("logging", false)]);
    let registry = Arc::new(ConsentRegistry::new());
    registry.init(a.clone());

    let writer = {
        let registry = Arc::clone(&registry);
        std::thread::spawn(move || {
            for i in 0..2_000 {
                registry.init(if i % 2 == 0 { b.clone() } else { a.clone() });
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..2_000 {
                    let snapshot = registry.snapshot();
                    assert_eq!(snapshot.get("marketing"), snapshot.get("logging"));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(registry.generation(), 2_001);
}

#[test]
fn init_waits_for_status_callback() {
    let registry = Arc::new(ConsentRegistry::new());
    registry.init(PermissionMap::from([("marketing", true)]));
    let replaced = Arc::new(AtomicBool::new(false));

    let mut seen = None;
    let mut revoker = None;
    registry.with_status("marketing", &mut |status| {
        let r = Arc::clone(&registry);
        let done = Arc::clone(&replaced);
        revoker = Some(thread::spawn(move || {
            r.init(PermissionMap::from([("marketing", false)]));
            done.store(true, Ordering::SeqCst);
        }));
        thread::sleep(Duration::from_millis(50));
        seen = Some((status, replaced.load(Ordering::SeqCst)));
    });

    revoker.unwrap().join().unwrap();
    assert_eq!(seen, Some((CategoryStatus::Granted, false)));
    assert_eq!(registry.status("marketing"), CategoryStatus::Denied);
    assert_eq!(registry.generation(), 2);
}
