//! In-memory remote store
//!
//! A process-local implementation of the remote tier. It follows the same
//! command semantics as Redis (TTL replies, glob matching, `SETEX` rejecting a
//! zero expiry) so it can stand in for Redis in single-instance deployments
//! and in tests.
//!
//! Expiry uses `tokio::time::Instant`, so tests running with a paused clock
//! can advance time deterministically.

use async_trait::async_trait;
use dashmap::DashMap;
use glob::Pattern;
use predcache_domain::error::{Error, Result};
use predcache_domain::ports::{RemoteStore, TTL_MISSING_KEY, TTL_NO_EXPIRY};
use predcache_domain::value_objects::RemoteInfo;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct StoredRecord {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredRecord {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-memory remote store backed by a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    entries: DashMap<String, StoredRecord>,
}

impl InMemoryRemoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) keys
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count()
    }

    /// Whether the store holds no live keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_value(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            None => return None,
            Some(record) if !record.is_expired(now) => return Some(record.value.clone()),
            Some(_) => true,
        };
        if expired {
            self.entries.remove_if(key, |_, record| record.is_expired(now));
        }
        None
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.live_value(key))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Err(Error::invalid_argument(
                "invalid expire time in 'setex' command",
            ));
        }
        self.entries.insert(
            key.to_string(),
            StoredRecord {
                value: value.to_string(),
                expires_at: Some(Instant::now() + Duration::from_secs(ttl_secs)),
            },
        );
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        let now = Instant::now();
        let removed = keys
            .iter()
            .filter_map(|key| self.entries.remove(key))
            .filter(|(_, record)| !record.is_expired(now))
            .count();
        Ok(removed as u64)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.live_value(key).is_some())
    }

    async fn ttl(&self, key: &str) -> Result<i64> {
        let now = Instant::now();
        let Some(record) = self.entries.get(key) else {
            return Ok(TTL_MISSING_KEY);
        };
        match record.expires_at {
            None => Ok(TTL_NO_EXPIRY),
            Some(at) if now >= at => Ok(TTL_MISSING_KEY),
            Some(at) => {
                let remaining_ms = (at - now).as_millis();
                Ok(i64::try_from(remaining_ms.div_ceil(1000)).unwrap_or(i64::MAX))
            }
        }
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = Pattern::new(pattern)
            .map_err(|e| Error::invalid_argument(format!("Invalid key pattern '{pattern}': {e}")))?;
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now) && matcher.matches(entry.key()))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort_unstable();
        Ok(keys)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn info(&self) -> Result<RemoteInfo> {
        let bytes: usize = self
            .entries
            .iter()
            .map(|entry| entry.key().len() + entry.value().value.len())
            .sum();
        Ok(RemoteInfo {
            version: Some(format!("in-memory-{}", env!("CARGO_PKG_VERSION"))),
            used_memory: Some(format!("{bytes}B")),
            connected_clients: Some(1),
        })
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
