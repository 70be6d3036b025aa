//! Remote store factory tests

use predcache_providers::remote::{RemoteStoreConfig, create_remote_store, registered_stores};

#[test]
fn test_create_each_registered_store() {
    for entry in registered_stores() {
        let config = RemoteStoreConfig::new(entry.name).with_uri("redis://localhost:6379");
        let store = create_remote_store(&config).unwrap();
        assert_eq!(store.provider_name(), entry.name);
    }
}

#[test]
fn test_store_names_are_case_insensitive() {
    let store = create_remote_store(&RemoteStoreConfig::new("Memory")).unwrap();
    assert_eq!(store.provider_name(), "memory");
}

#[test]
fn test_unknown_store_lists_alternatives() {
    let err = create_remote_store(&RemoteStoreConfig::new("memcached")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("memcached"));
    assert!(message.contains("null"));
}
