//! Figment environment override tests
//!
//! These tests modify environment variables and must run sequentially:
//!
//! ```bash
//! cargo test -p predcache-infrastructure --test unit config_figment -- --test-threads=1 --ignored
//! ```
//!
//! Rust 2024 requires `unsafe` for `env::set_var`/`env::remove_var`.

use predcache_infrastructure::config::{ConfigLoader, RemoteProvider};
use std::env;

fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::set_var(key, value);
    }
}

fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        env::remove_var(key);
    }
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_nested_env_override() {
    set_env("PREDCACHE_CACHE__DEFAULT_TTL_SECS", "120");
    set_env("PREDCACHE_REMOTE__PROVIDER", "null");

    let config = ConfigLoader::new().load().expect("Should load config");
    assert_eq!(config.cache.default_ttl_secs, 120);
    assert_eq!(config.remote.provider, RemoteProvider::Null);

    remove_env("PREDCACHE_CACHE__DEFAULT_TTL_SECS");
    remove_env("PREDCACHE_REMOTE__PROVIDER");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_single_underscore_does_not_nest() {
    set_env("PREDCACHE_CACHE_DEFAULT_TTL_SECS", "5");

    let config = ConfigLoader::new().load().expect("Should load config");
    assert_ne!(config.cache.default_ttl_secs, 5);

    remove_env("PREDCACHE_CACHE_DEFAULT_TTL_SECS");
}

#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_invalid_env_value_fails_validation() {
    set_env("PREDCACHE_CACHE__MAX_MEMORY_ITEMS", "0");

    let result = ConfigLoader::new().load();
    assert!(result.is_err());

    remove_env("PREDCACHE_CACHE__MAX_MEMORY_ITEMS");
}
