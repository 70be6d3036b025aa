//! Health Check Tests

use crate::test_utils::{flaky_manager, memory_backed_manager};
use predcache_domain::value_objects::{CacheEntryConfig, HealthStatus};

#[tokio::test]
async fn test_reachable_store_is_healthy() {
    let (manager, _store) = memory_backed_manager();
    manager.set("k", &1, CacheEntryConfig::default()).await;

    let report = manager.health_check().await;
    assert!(report.is_healthy());
    assert!(report.redis_connected);
    assert_eq!(report.memory_cache_size, 1);
    assert_eq!(report.stats.sets, 1);
    assert!(report.error.is_none());
    assert!(
        report
            .redis_info
            .version
            .as_deref()
            .is_some_and(|v| v.starts_with("in-memory-"))
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn test_unreachable_store_is_unhealthy() {
    let (manager, store) = flaky_manager();
    store.set_failing(true);

    let report = manager.health_check().await;
    assert_eq!(report.status, HealthStatus::Unhealthy);
    assert!(!report.redis_connected);
    assert!(
        report
            .error
            .as_deref()
            .is_some_and(|e| e.contains("PING"))
    );
    assert!(report.response_time >= 0.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["status"], "unhealthy");
    assert_eq!(json["redis_connected"], false);
    assert!(json["error"].is_string());
}
