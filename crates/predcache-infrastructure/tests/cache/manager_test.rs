//! Cache Manager Tests

use crate::test_utils::{
    FlakyRemoteStore, SlowRemoteStore, TEST_APP_ID, flaky_manager, memory_backed_manager,
    test_cache_config,
};
use predcache_domain::ports::{RemoteStore, TTL_MISSING_KEY, TTL_NO_EXPIRY};
use predcache_domain::value_objects::CacheEntryConfig;
use predcache_infrastructure::cache::CacheManager;
use predcache_infrastructure::config::CacheConfig;
use predcache_providers::remote::InMemoryRemoteStore;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Prediction {
    home: f64,
    draw: f64,
    away: f64,
}

fn sample_prediction() -> Prediction {
    Prediction {
        home: 0.5,
        draw: 0.3,
        away: 0.2,
    }
}

/// Serializes to an error, like a value holding a non-JSON type
struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("model handle is not serializable"))
    }
}

#[tokio::test]
async fn test_set_then_get_round_trips() {
    let (manager, _store) = memory_backed_manager();

    let stored = manager
        .set(
            "pred:42",
            &sample_prediction(),
            CacheEntryConfig::in_namespace("predictions"),
        )
        .await;
    assert!(stored);

    let cached: Option<Prediction> = manager.get("pred:42", "predictions").await;
    assert_eq!(cached, Some(sample_prediction()));

    let stats = manager.get_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.sets, 1);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.errors, 0);
}

#[tokio::test]
async fn test_keys_are_composed_with_app_and_namespace() {
    let (manager, store) = memory_backed_manager();
    manager
        .set("t1", &1, CacheEntryConfig::in_namespace("teams"))
        .await;

    let keys = store.keys("*").await.unwrap();
    assert_eq!(keys, vec![format!("{TEST_APP_ID}:teams:t1")]);
}

#[tokio::test]
async fn test_miss_is_counted() {
    let (manager, _store) = memory_backed_manager();

    let cached: Option<String> = manager.get("absent", "default").await;
    assert_eq!(cached, None);
    assert_eq!(manager.get_stats().misses, 1);
    assert_eq!(manager.get_stats().hit_rate(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_and_memory_copy_is_dropped_on_read() {
    let (manager, _store) = memory_backed_manager();
    manager
        .set(
            "short",
            &"lived",
            CacheEntryConfig::new().with_ttl(Duration::from_secs(2)),
        )
        .await;
    assert_eq!(manager.memory_len(), 1);

    tokio::time::advance(Duration::from_secs(3)).await;

    let cached: Option<String> = manager.get("short", "default").await;
    assert_eq!(cached, None);
    assert_eq!(manager.memory_len(), 0);
}

#[tokio::test]
async fn test_unserializable_value_is_rejected_without_touching_tiers() {
    let (manager, store) = memory_backed_manager();

    assert!(
        !manager
            .set("bad", &Unserializable, CacheEntryConfig::default())
            .await
    );

    let stats = manager.get_stats();
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.sets, 0);
    assert!(store.is_empty());
    assert_eq!(manager.memory_len(), 0);
}

#[tokio::test]
async fn test_namespaces_are_isolated() {
    let (manager, _store) = memory_backed_manager();
    manager
        .set("k", &"alpha", CacheEntryConfig::in_namespace("a"))
        .await;
    manager
        .set("k", &"beta", CacheEntryConfig::in_namespace("b"))
        .await;

    assert_eq!(
        manager.get::<String>("k", "a").await.as_deref(),
        Some("alpha")
    );
    assert_eq!(
        manager.get::<String>("k", "b").await.as_deref(),
        Some("beta")
    );

    assert!(manager.delete("k", "a").await);
    assert_eq!(manager.get::<String>("k", "a").await, None);
    assert!(!manager.delete("k", "a").await);
    assert_eq!(manager.get_stats().deletes, 2);
    assert_eq!(
        manager.get::<String>("k", "b").await.as_deref(),
        Some("beta")
    );
}

#[tokio::test]
async fn test_remote_hit_is_promoted_to_memory() {
    let (manager, _store) = memory_backed_manager();
    manager.set("k", &7u32, CacheEntryConfig::default()).await;
    manager.clear_memory();
    assert_eq!(manager.memory_len(), 0);

    assert_eq!(manager.get::<u32>("k", "default").await, Some(7));
    assert_eq!(manager.memory_len(), 1);
}

#[tokio::test]
async fn test_corrupt_remote_payload_is_deleted() {
    let (manager, store) = memory_backed_manager();
    let full_key = format!("{TEST_APP_ID}:default:broken");
    store.set_ex(&full_key, "{not json", 60).await.unwrap();

    assert_eq!(manager.get::<u32>("broken", "default").await, None);
    assert_eq!(manager.get_stats().errors, 1);
    assert!(!store.exists(&full_key).await.unwrap());
}

#[tokio::test]
async fn test_type_mismatch_keeps_the_record() {
    let (manager, store) = memory_backed_manager();
    manager
        .set("n", &"not a number", CacheEntryConfig::default())
        .await;

    // Memory tier hit with the wrong type
    assert_eq!(manager.get::<u32>("n", "default").await, None);
    assert_eq!(manager.get_stats().errors, 1);
    assert_eq!(manager.memory_len(), 1);

    // Remote hit with the wrong type
    manager.clear_memory();
    assert_eq!(manager.get::<u32>("n", "default").await, None);
    assert_eq!(manager.get_stats().errors, 2);
    assert_eq!(store.len(), 1);

    assert_eq!(
        manager.get::<String>("n", "default").await.as_deref(),
        Some("not a number")
    );
}

#[tokio::test(start_paused = true)]
async fn test_promoted_entry_expires_with_remote_record() {
    let store = Arc::new(InMemoryRemoteStore::new());
    let config = CacheConfig {
        max_memory_items: 1,
        ..test_cache_config()
    };
    let manager = CacheManager::new(&config, store);

    manager
        .set("k1", &1u32, CacheEntryConfig::new().with_ttl_secs(10))
        .await;
    // Pushes k1 out of the single memory slot
    manager.set("k2", &2u32, CacheEntryConfig::default()).await;

    tokio::time::advance(Duration::from_secs(9)).await;
    assert_eq!(manager.get::<u32>("k1", "default").await, Some(1));
    assert_eq!(manager.memory_len(), 1);

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(manager.get::<u32>("k1", "default").await, None);
    assert!(!manager.exists("k1", "default").await);
}

#[tokio::test(start_paused = true)]
async fn test_promotion_is_capped_by_memory_ceiling() {
    let (manager, store) = flaky_manager();
    manager
        .set("k", &7u32, CacheEntryConfig::new().with_ttl_secs(3600))
        .await;
    manager.clear_memory();

    assert_eq!(manager.get::<u32>("k", "default").await, Some(7));
    assert_eq!(manager.memory_len(), 1);

    store.set_failing(true);
    assert_eq!(manager.get::<u32>("k", "default").await, Some(7));

    // Default ceiling is 300 s even though the remote record lives an hour
    tokio::time::advance(Duration::from_secs(301)).await;
    assert_eq!(manager.get::<u32>("k", "default").await, None);
}

#[tokio::test]
async fn test_sub_second_ttl_is_rejected() {
    let (manager, store) = memory_backed_manager();

    let stored = manager
        .set(
            "k",
            &1,
            CacheEntryConfig::new().with_ttl(Duration::from_millis(500)),
        )
        .await;
    assert!(!stored);
    assert_eq!(manager.get_stats().errors, 1);
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_get_ttl_reports_remote_expiry() {
    let (manager, _store) = memory_backed_manager();
    manager
        .set("k", &1, CacheEntryConfig::new().with_ttl_secs(60))
        .await;

    assert_eq!(manager.get_ttl("k", "default").await, 60);
    assert_eq!(manager.get_ttl("absent", "default").await, TTL_MISSING_KEY);
}

#[tokio::test]
async fn test_exists_checks_both_tiers() {
    let (manager, _store) = memory_backed_manager();
    manager.set("k", &1, CacheEntryConfig::default()).await;

    assert!(manager.exists("k", "default").await);
    manager.clear_memory();
    assert!(manager.exists("k", "default").await);
    assert!(!manager.exists("other", "default").await);
}

#[tokio::test]
async fn test_clear_namespace_removes_only_that_namespace() {
    let (manager, _store) = memory_backed_manager();
    for team in ["t1", "t2", "t3"] {
        manager
            .set(team, &team, CacheEntryConfig::in_namespace("teams"))
            .await;
    }
    manager
        .set("l1", &"l1", CacheEntryConfig::in_namespace("leagues"))
        .await;

    assert_eq!(manager.clear_namespace("teams").await, 3);
    assert_eq!(manager.memory_len(), 1);
    assert_eq!(manager.get::<String>("t1", "teams").await, None);
    assert!(manager.exists("l1", "leagues").await);
    assert_eq!(manager.get_stats().deletes, 3);
}

#[tokio::test]
async fn test_memory_overflow_evicts_least_recently_used() {
    let store = Arc::new(FlakyRemoteStore::new());
    let config = CacheConfig {
        max_memory_items: 2,
        ..test_cache_config()
    };
    let manager = CacheManager::new(&config, store.clone());

    for key in ["a", "b", "c"] {
        assert!(manager.set(key, &key, CacheEntryConfig::default()).await);
    }
    assert_eq!(manager.memory_len(), 2);

    // Only the two most recent writes survive once the remote goes away
    store.set_failing(true);
    assert_eq!(manager.get::<String>("a", "default").await, None);
    assert_eq!(
        manager.get::<String>("b", "default").await.as_deref(),
        Some("b")
    );
    assert_eq!(
        manager.get::<String>("c", "default").await.as_deref(),
        Some("c")
    );
}

#[tokio::test]
async fn test_remote_failures_fail_open() {
    let (manager, store) = flaky_manager();
    store.set_failing(true);

    assert!(!manager.set("k", &1, CacheEntryConfig::default()).await);
    assert_eq!(manager.memory_len(), 0);
    assert_eq!(manager.get::<u32>("k", "default").await, None);
    assert!(!manager.exists("k", "default").await);
    assert!(!manager.delete("k", "default").await);
    assert_eq!(manager.get_ttl("k", "default").await, TTL_NO_EXPIRY);
    assert_eq!(manager.clear_namespace("default").await, 0);

    assert_eq!(manager.get_stats().errors, 6);
}

#[tokio::test]
async fn test_memory_tier_serves_while_remote_is_down() {
    let (manager, store) = flaky_manager();
    assert!(manager.set("k", &1u32, CacheEntryConfig::default()).await);

    store.set_failing(true);
    assert_eq!(manager.get::<u32>("k", "default").await, Some(1));
    assert!(manager.exists("k", "default").await);
    assert_eq!(manager.get_stats().errors, 0);
}

#[tokio::test]
async fn test_failed_write_leaves_memory_untouched() {
    let (manager, store) = flaky_manager();
    assert!(manager.set("k", &1u32, CacheEntryConfig::default()).await);

    store.set_failing(true);
    assert!(!manager.set("k", &2u32, CacheEntryConfig::default()).await);
    assert_eq!(manager.get::<u32>("k", "default").await, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_slow_remote_times_out() {
    let config = CacheConfig {
        remote_timeout_ms: 100,
        ..test_cache_config()
    };
    let store = Arc::new(SlowRemoteStore::new(Duration::from_secs(5)));
    let manager = CacheManager::new(&config, store);

    assert!(!manager.set("k", &1, CacheEntryConfig::default()).await);
    assert_eq!(manager.get::<u32>("k", "default").await, None);

    let stats = manager.get_stats();
    assert_eq!(stats.errors, 2);
    assert_eq!(stats.sets, 0);
}
