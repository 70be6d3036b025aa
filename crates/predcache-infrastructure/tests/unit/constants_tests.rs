//! Constants Tests

use predcache_infrastructure::constants::*;

#[test]
fn test_memory_cap_is_below_default_ttl() {
    assert!(MEMORY_TTL_CAP_SECS < CACHE_DEFAULT_TTL_SECS);
}

#[test]
fn test_warm_ttls_increase_with_stability() {
    assert!(WARM_PREDICTION_TTL_SECS < WARM_TEAM_STATS_TTL_SECS);
    assert!(WARM_TEAM_STATS_TTL_SECS < WARM_LEAGUE_TTL_SECS);
    assert!(WARM_LEAGUE_TTL_SECS < WARM_MODEL_METADATA_TTL_SECS);
}

#[test]
fn test_env_naming() {
    assert_eq!(CONFIG_ENV_PREFIX, "PREDCACHE");
    assert_eq!(CONFIG_ENV_NESTING_SEPARATOR, "__");
    assert!(LOG_FILTER_ENV.starts_with(CONFIG_ENV_PREFIX));
}
