//! Cache configuration types

use crate::constants::{
    CACHE_DEFAULT_TTL_SECS, DEFAULT_APP_ID, MAX_SCHEDULED_INVALIDATIONS, MEMORY_MAX_ITEMS,
    MEMORY_TTL_CAP_SECS, REMOTE_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Application id prefixed to every key
    pub app_id: String,

    /// Default TTL in seconds
    pub default_ttl_secs: u64,

    /// Upper bound on memory-tier TTLs in seconds
    pub memory_ttl_cap_secs: u64,

    /// Memory tier capacity (entries); least recently used entries are evicted
    pub max_memory_items: usize,

    /// Deadline for each remote store call in milliseconds
    pub remote_timeout_ms: u64,

    /// Maximum scheduled invalidations pending at once
    pub max_scheduled_invalidations: usize,
}

impl CacheConfig {
    /// Default TTL as a Duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Memory TTL cap as a Duration
    pub fn memory_ttl_cap(&self) -> Duration {
        Duration::from_secs(self.memory_ttl_cap_secs)
    }

    /// Remote call deadline as a Duration
    pub fn remote_timeout(&self) -> Duration {
        Duration::from_millis(self.remote_timeout_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_APP_ID.to_string(),
            default_ttl_secs: CACHE_DEFAULT_TTL_SECS,
            memory_ttl_cap_secs: MEMORY_TTL_CAP_SECS,
            max_memory_items: MEMORY_MAX_ITEMS,
            remote_timeout_ms: REMOTE_TIMEOUT_MS,
            max_scheduled_invalidations: MAX_SCHEDULED_INVALIDATIONS,
        }
    }
}
