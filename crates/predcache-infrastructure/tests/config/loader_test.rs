//! Configuration Loader Tests

use predcache_infrastructure::config::{ConfigBuilder, ConfigLoader, RemoteProvider};
use predcache_infrastructure::constants::{
    CACHE_DEFAULT_TTL_SECS, DEFAULT_APP_ID, DEFAULT_LOG_LEVEL, MEMORY_TTL_CAP_SECS,
};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::new()
        .with_config_path(temp_dir.path().join("absent.toml"))
        .with_env_prefix("PREDCACHE_LOADER_TEST_UNSET")
        .load()
        .unwrap();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.cache.app_id, DEFAULT_APP_ID);
    assert_eq!(config.cache.default_ttl_secs, CACHE_DEFAULT_TTL_SECS);
    assert_eq!(config.cache.memory_ttl_cap_secs, MEMORY_TTL_CAP_SECS);
    assert_eq!(config.remote.provider, RemoteProvider::Redis);
}

#[test]
fn test_partial_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("predcache.toml");
    std::fs::write(
        &config_path,
        r#"
[cache]
app_id = "predictions-api"
default_ttl_secs = 600
remote_timeout_ms = 250

[remote]
provider = "memory"

[warming]
pacing_ms = 0
"#,
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("PREDCACHE_LOADER_TEST_UNSET")
        .load()
        .unwrap();

    assert_eq!(config.cache.app_id, "predictions-api");
    assert_eq!(config.cache.default_ttl(), Duration::from_secs(600));
    assert_eq!(config.cache.remote_timeout(), Duration::from_millis(250));
    assert_eq!(config.cache.max_memory_items, 1000);
    assert_eq!(config.remote.provider, RemoteProvider::Memory);
    assert_eq!(config.warming.pacing(), Duration::ZERO);
    assert_eq!(config.warming.prediction_ttl_secs, 1800);
}

#[test]
fn test_invalid_file_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("predcache.toml");
    std::fs::write(&config_path, "[cache]\ndefault_ttl_secs = 0\n").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("PREDCACHE_LOADER_TEST_UNSET")
        .load();
    assert!(result.is_err());
}

#[test]
fn test_unknown_provider_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("predcache.toml");
    std::fs::write(&config_path, "[remote]\nprovider = \"memcached\"\n").unwrap();

    let result = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("PREDCACHE_LOADER_TEST_UNSET")
        .load();
    assert!(result.is_err());
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");

    let original = ConfigBuilder::new()
        .with_app_id("saved")
        .with_remote_provider(RemoteProvider::Null)
        .build();

    let loader = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("PREDCACHE_LOADER_TEST_UNSET");
    loader.save_to_file(&original, &config_path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded.cache, original.cache);
    assert_eq!(loaded.remote, original.remote);
    assert_eq!(loaded.warming, original.warming);
    assert_eq!(loader.config_path(), Some(config_path.as_path()));
}
