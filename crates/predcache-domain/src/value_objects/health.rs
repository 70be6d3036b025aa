//! Health report types
//!
//! The serialized shape is a stable contract for monitoring collaborators.

use super::cache::CacheStats;
use serde::{Deserialize, Serialize};

/// Overall cache health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The remote store answered a `PING`
    Healthy,
    /// The remote store could not be reached
    Unhealthy,
}

/// Remote store details taken from `INFO`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteInfo {
    /// `redis_version`
    pub version: Option<String>,
    /// `used_memory_human`
    pub used_memory: Option<String>,
    /// `connected_clients`
    pub connected_clients: Option<u64>,
}

impl RemoteInfo {
    /// Parse the `field:value` lines of an `INFO` reply
    ///
    /// Section headers (`# Server`), blank lines and unknown fields are skipped.
    pub fn parse(raw: &str) -> Self {
        let mut info = Self::default();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            match field {
                "redis_version" => info.version = Some(value.to_string()),
                "used_memory_human" => info.used_memory = Some(value.to_string()),
                "connected_clients" => info.connected_clients = value.parse().ok(),
                _ => {}
            }
        }
        info
    }
}

/// Result of `CacheManager::health_check`
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// Healthy iff the remote `PING` round-tripped
    pub status: HealthStatus,
    /// Whether the remote store is reachable
    pub redis_connected: bool,
    /// Duration of the health probe in seconds
    pub response_time: f64,
    /// Entries currently held in the memory tier
    pub memory_cache_size: usize,
    /// Snapshot of the cache counters
    pub stats: CacheStats,
    /// Remote server details (empty when unreachable)
    pub redis_info: RemoteInfo,
    /// The error that made the check fail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// Whether the report is healthy
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
