use std::sync::Arc;

use serde_json::json;

use consent_core::config::{MediumKind, StoreConfig};
use consent_core::traits::IStorageMedium;
use consent_core::{StorageError, WriteOptions};
use consent_registry::ConsentRegistry;
use consent_store::{FileMedium, GatedStore, SqliteMedium};
use test_fixtures::reference_policy;

fn exercise(medium: &dyn IStorageMedium) {
    medium.write("ns:a", json!(1)).unwrap();
    medium.write("ns:b", json!({"x": [1, 2]})).unwrap();
    medium.write("other:c", json!("c")).unwrap();
    medium.write("ns:a", json!(2)).unwrap();

    assert_eq!(medium.read("ns:a").unwrap(), Some(json!(2)));
    assert_eq!(medium.read("ns:b").unwrap(), Some(json!({"x": [1, 2]})));
    assert_eq!(medium.read("missing").unwrap(), None);
    assert_eq!(medium.keys_with_prefix("ns:").unwrap(), vec!["ns:a", "ns:b"]);
    assert_eq!(medium.keys_with_prefix("").unwrap().len(), 3);

    medium.delete("ns:a").unwrap();
    medium.delete("ns:a").unwrap();
    assert_eq!(medium.read("ns:a").unwrap(), None);
}

#[test]
fn file_medium_contract() {
    let dir = tempfile::tempdir().unwrap();
    let medium = FileMedium::open(&dir.path().join("store.json")).unwrap();
    exercise(&medium);
}

#[test]
fn sqlite_medium_contract() {
    let medium = SqliteMedium::open_in_memory().unwrap();
    exercise(&medium);
    assert_eq!(medium.count().unwrap(), 2);
}

#[test]
fn file_medium_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");
    {
        let medium = FileMedium::open(&path).unwrap();
        medium.write("k", json!({"v": 1})).unwrap();
    }
    let reopened = FileMedium::open(&path).unwrap();
    assert_eq!(reopened.read("k").unwrap(), Some(json!({"v": 1})));
}

#[test]
fn file_medium_reports_corruption() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = FileMedium::open(&path).unwrap_err();
    assert!(matches!(err, StorageError::Corrupted { .. }));
}

#[test]
fn sqlite_medium_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    {
        let medium = SqliteMedium::open(&path).unwrap();
        medium.write("k", json!([true])).unwrap();
    }
    let reopened = SqliteMedium::open(&path).unwrap();
    assert_eq!(reopened.read("k").unwrap(), Some(json!([true])));
}

#[test]
fn gated_store_over_configured_file_medium() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("consent.json");
    let config = StoreConfig {
        medium: MediumKind::File,
        path: path.to_string_lossy().into_owned(),
        namespace: "app".into(),
        ..StoreConfig::default()
    };
    let registry = Arc::new(ConsentRegistry::new());
    registry.init(reference_policy());

    let store = GatedStore::from_config(&config, registry.clone()).unwrap();
    store
        .set("crash", 1, WriteOptions::for_category("stability"))
        .unwrap();
    assert!(store
        .set("promo", 1, WriteOptions::for_category("marketing"))
        .is_err());
    drop(store);

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({"app:crash": 1}));
}

#[test]
fn gated_store_over_configured_sqlite_medium() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        medium: MediumKind::Sqlite,
        path: dir.path().join("consent.db").to_string_lossy().into_owned(),
        ..StoreConfig::default()
    };
    let registry = Arc::new(ConsentRegistry::new());
    registry.init(reference_policy());

    let store = GatedStore::from_config(&config, registry).unwrap();
    store
        .set("crash", json!({"n": 3}), WriteOptions::for_category("stability"))
        .unwrap();
    assert_eq!(store.get("crash").unwrap(), Some(json!({"n": 3})));
}
