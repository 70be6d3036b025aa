//! Two-tier cache manager
//!
//! Cache-aside reads and write-through writes over a bounded memory tier and
//! a shared remote store.
//!
//! ## Lookup Order
//!
//! 1. Memory tier (no I/O)
//! 2. Remote store; a hit is promoted into memory
//! 3. Miss
//!
//! ## Failure Handling
//!
//! Every public method is fail-open: remote errors and timeouts, serialization
//! failures and corrupt payloads are logged, counted in `errors` and turned
//! into the operation's "absent" outcome (`None`, `false`, `0`, `-1`).
//! Callers never see an error and must treat the cache as advisory.
//!
//! A payload that is not valid JSON is corrupt and removed from both tiers.
//! Valid JSON that does not fit the requested type is left in place: the
//! record is fine, the caller asked for the wrong shape.

use crate::cache::memory::{MemoryLookup, MemoryTier};
use crate::cache::stats::StatsRecorder;
use crate::config::CacheConfig;
use crate::constants::DELETE_BATCH_SIZE;
use crate::utils::TimedOperation;
use glob::Pattern;
use predcache_domain::error::{Error, Result};
use predcache_domain::ports::{RemoteStore, TTL_NO_EXPIRY};
use predcache_domain::value_objects::{
    CacheEntryConfig, CacheKey, CacheStats, HealthReport, HealthStatus, RemoteInfo,
};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::error::Category;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Two-tier cache manager
///
/// Share it behind an `Arc`; the invalidator, the warmer and memoized
/// functions all hold the same instance.
pub struct CacheManager {
    app_id: String,
    default_ttl: Duration,
    remote_timeout: Duration,
    memory: MemoryTier,
    remote: Arc<dyn RemoteStore>,
    stats: StatsRecorder,
}

impl CacheManager {
    /// Create a manager over `remote` with the given settings
    pub fn new(config: &CacheConfig, remote: Arc<dyn RemoteStore>) -> Self {
        Self {
            app_id: config.app_id.clone(),
            default_ttl: config.default_ttl(),
            remote_timeout: config.remote_timeout(),
            memory: MemoryTier::new(config.max_memory_items, config.memory_ttl_cap()),
            remote,
            stats: StatsRecorder::new(),
        }
    }

    /// Application id prefixed to every key
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// TTL applied when an entry config leaves it unset
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Name of the remote store provider
    pub fn remote_provider(&self) -> &str {
        self.remote.provider_name()
    }

    /// Entries currently held in the memory tier
    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    /// Drop every memory-tier entry; the remote store is untouched
    pub fn clear_memory(&self) {
        self.memory.clear();
    }

    /// Snapshot of the operation counters
    pub fn get_stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    fn compose(&self, key: &str, namespace: &str) -> String {
        CacheKey::compose(&self.app_id, namespace, key)
    }

    /// Run one remote command under the configured deadline
    async fn remote_call<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.remote_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(Error::timeout(
                operation,
                u64::try_from(self.remote_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    /// Read a value, memory tier first
    ///
    /// Returns `None` on a miss and on any failure. A stored payload that is
    /// not valid JSON is deleted from both tiers; a remote hit is promoted
    /// for at most its remaining remote lifetime.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, namespace: &str) -> Option<T> {
        let full_key = self.compose(key, namespace);

        match self.memory.get(&full_key) {
            MemoryLookup::Hit(payload) => {
                return match serde_json::from_str::<T>(&payload) {
                    Ok(value) => {
                        self.stats.hit();
                        debug!(key, namespace, tier = "memory", "Cache hit");
                        Some(value)
                    }
                    Err(e) => {
                        self.undecodable(&full_key, key, namespace, &payload, e)
                            .await;
                        None
                    }
                };
            }
            MemoryLookup::Expired => {
                debug!(key, namespace, "Memory entry expired");
            }
            MemoryLookup::Absent => {}
        }

        let raw = match self.remote_call("GET", self.remote.get(&full_key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                self.stats.miss();
                debug!(key, namespace, "Cache miss");
                return None;
            }
            Err(e) => {
                self.stats.error();
                self.stats.miss();
                warn!(key, namespace, operation = "get", error = %e, "Remote read failed");
                return None;
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                self.stats.hit();
                self.promote(&full_key, key, namespace, raw).await;
                Some(value)
            }
            Err(e) => {
                self.undecodable(&full_key, key, namespace, &raw, e).await;
                None
            }
        }
    }

    /// Copy a remote hit into memory for no longer than the record has left
    ///
    /// Skipped when the remaining lifetime cannot be read or has run out.
    async fn promote(&self, full_key: &str, key: &str, namespace: &str, raw: String) {
        let remaining = match self.remote_call("TTL", self.remote.ttl(full_key)).await {
            Ok(TTL_NO_EXPIRY) => self.default_ttl,
            Ok(secs) if secs > 0 => Duration::from_secs(secs.unsigned_abs()),
            Ok(_) => {
                debug!(key, namespace, "Remote entry expired after read, not promoted");
                return;
            }
            Err(e) => {
                self.stats.error();
                warn!(key, namespace, operation = "ttl", error = %e, "Remote TTL query failed, not promoted");
                return;
            }
        };
        self.memory.insert(full_key, Arc::from(raw), remaining);
        debug!(key, namespace, tier = "remote", "Cache hit, promoted to memory");
    }

    /// Count a payload that could not be decoded as the requested type
    ///
    /// Invalid JSON is removed from both tiers; a shape mismatch is not.
    async fn undecodable(
        &self,
        full_key: &str,
        key: &str,
        namespace: &str,
        payload: &str,
        error: serde_json::Error,
    ) {
        self.stats.error();
        // A type error can be reported before the parser reaches broken input
        let corrupt = matches!(error.classify(), Category::Syntax | Category::Eof)
            || serde_json::from_str::<IgnoredAny>(payload).is_err();
        if !corrupt {
            warn!(key, namespace, operation = "get", error = %error, "Cached value does not match the requested type");
            return;
        }

        let error = Error::from(error);
        warn!(key, namespace, operation = "get", error = %error, "Discarding corrupt cache entry");
        self.memory.remove(full_key);
        let doomed = [full_key.to_string()];
        if let Err(e) = self
            .remote_call("DEL", self.remote.delete(&doomed))
            .await
        {
            self.stats.error();
            warn!(key, namespace, operation = "delete", error = %e, "Failed to remove undecodable entry");
        }
    }

    /// Write a value to both tiers
    ///
    /// The remote store is written first; the memory tier is only populated
    /// when that succeeds, with the TTL capped by the memory ceiling. Returns
    /// `false` if the value cannot be serialized, the TTL is under one
    /// second, or the remote write fails.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        config: CacheEntryConfig,
    ) -> bool {
        let namespace = config.effective_namespace();
        let ttl = config.effective_ttl(self.default_ttl);
        let ttl_secs = ttl.as_secs();
        if ttl_secs == 0 {
            self.stats.error();
            warn!(key, namespace, ttl = ?ttl, "TTL must be at least one second");
            return false;
        }

        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                self.stats.error();
                warn!(key, namespace, operation = "set", error = %e, "Failed to serialize cache value");
                return false;
            }
        };

        let full_key = self.compose(key, namespace);
        if let Err(e) = self
            .remote_call("SETEX", self.remote.set_ex(&full_key, &payload, ttl_secs))
            .await
        {
            self.stats.error();
            warn!(key, namespace, operation = "set", error = %e, "Remote write failed");
            return false;
        }

        if let Some(evicted) = self.memory.insert(&full_key, Arc::from(payload), ttl) {
            debug!(evicted = %evicted, "Memory tier full, evicted least recently used entry");
        }
        self.stats.set();
        debug!(key, namespace, ttl_secs, "Cache set");
        true
    }

    /// Remove a key from both tiers
    ///
    /// Returns whether the remote store held the key. Every delete the remote
    /// store acknowledges counts in `deletes`, present key or not.
    pub async fn delete(&self, key: &str, namespace: &str) -> bool {
        let full_key = self.compose(key, namespace);
        self.memory.remove(&full_key);

        match self
            .remote_call("DEL", self.remote.delete(&[full_key]))
            .await
        {
            Ok(removed) => {
                self.stats.deleted(1);
                debug!(key, namespace, removed, "Cache delete");
                removed > 0
            }
            Err(e) => {
                self.stats.error();
                warn!(key, namespace, operation = "delete", error = %e, "Remote delete failed");
                false
            }
        }
    }

    /// Whether a live entry exists in either tier
    pub async fn exists(&self, key: &str, namespace: &str) -> bool {
        let full_key = self.compose(key, namespace);
        if self.memory.contains(&full_key) {
            return true;
        }

        match self
            .remote_call("EXISTS", self.remote.exists(&full_key))
            .await
        {
            Ok(exists) => exists,
            Err(e) => {
                self.stats.error();
                warn!(key, namespace, operation = "exists", error = %e, "Remote exists check failed");
                false
            }
        }
    }

    /// Remaining remote TTL in seconds
    ///
    /// `-2` when the key does not exist, `-1` when it has no expiry or the
    /// store could not be asked.
    pub async fn get_ttl(&self, key: &str, namespace: &str) -> i64 {
        let full_key = self.compose(key, namespace);
        match self.remote_call("TTL", self.remote.ttl(&full_key)).await {
            Ok(ttl) => ttl,
            Err(e) => {
                self.stats.error();
                warn!(key, namespace, operation = "ttl", error = %e, "Remote TTL query failed");
                TTL_NO_EXPIRY
            }
        }
    }

    /// Remove every key of a namespace from both tiers
    ///
    /// Returns the number of remote keys removed.
    pub async fn clear_namespace(&self, namespace: &str) -> u64 {
        let pattern = CacheKey::namespace_pattern(&self.app_id, namespace);
        match self.remove_matching(&pattern).await {
            Ok(removed) => {
                debug!(namespace, removed, "Namespace cleared");
                removed
            }
            Err(e) => {
                warn!(namespace, operation = "clear_namespace", error = %e, "Namespace clear failed");
                0
            }
        }
    }

    /// Remove every key matching a glob over composed keys
    ///
    /// The memory tier is purged first, then remote keys are deleted in
    /// batches. A failing batch is logged and counted; the remaining batches
    /// still run and the surviving count is returned. Fails only when the
    /// pattern is invalid or the remote scan fails; either is already counted
    /// in `errors`.
    pub(crate) async fn remove_matching(&self, pattern: &str) -> Result<u64> {
        let matcher = Pattern::new(pattern).map_err(|e| {
            self.stats.error();
            Error::invalid_argument(format!("Invalid key pattern '{pattern}': {e}"))
        })?;
        let purged = self.memory.purge_matching(&matcher);

        let keys = self
            .remote_call("SCAN", self.remote.keys(pattern))
            .await
            .inspect_err(|_| self.stats.error())?;
        let mut removed = 0;
        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            match self.remote_call("DEL", self.remote.delete(batch)).await {
                Ok(count) => removed += count,
                Err(e) => {
                    self.stats.error();
                    warn!(pattern, batch_size = batch.len(), operation = "delete", error = %e, "Batch delete failed, continuing");
                }
            }
        }

        self.stats.deleted(removed);
        debug!(pattern, removed, purged, "Pattern removal complete");
        Ok(removed)
    }

    /// Probe the remote store
    ///
    /// Healthy iff `PING` succeeds. `INFO` failures leave `redis_info` empty
    /// without affecting the status.
    pub async fn health_check(&self) -> HealthReport {
        let timer = TimedOperation::start();

        let (status, redis_info, error) =
            match self.remote_call("PING", self.remote.ping()).await {
                Ok(()) => {
                    let info = match self.remote_call("INFO", self.remote.info()).await {
                        Ok(info) => info,
                        Err(e) => {
                            warn!(operation = "info", error = %e, "Remote INFO failed");
                            RemoteInfo::default()
                        }
                    };
                    (HealthStatus::Healthy, info, None)
                }
                Err(e) => {
                    self.stats.error();
                    warn!(operation = "ping", error = %e, "Cache health check failed");
                    (HealthStatus::Unhealthy, RemoteInfo::default(), Some(e.to_string()))
                }
            };

        HealthReport {
            status,
            redis_connected: status == HealthStatus::Healthy,
            response_time: timer.elapsed_secs(),
            memory_cache_size: self.memory.len(),
            stats: self.stats.snapshot(),
            redis_info,
            error,
        }
    }
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("app_id", &self.app_id)
            .field("remote", &self.remote.provider_name())
            .field("memory_len", &self.memory.len())
            .finish_non_exhaustive()
    }
}
