//! Cache value objects: key scheme, entry configuration and statistics

use crate::constants::{DEFAULT_NAMESPACE, GLOB_METACHARACTERS, KEY_SEPARATOR};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

/// Cache key utilities
///
/// Every key stored by the cache is composed as `{app_id}:{namespace}:{key}`,
/// so two identical raw keys in different namespaces never collide.
pub struct CacheKey;

impl CacheKey {
    /// Compose the full key stored in both tiers
    pub fn compose(app_id: &str, namespace: &str, key: &str) -> String {
        format!("{app_id}{KEY_SEPARATOR}{namespace}{KEY_SEPARATOR}{key}")
    }

    /// Glob pattern matching every key of a namespace
    pub fn namespace_pattern(app_id: &str, namespace: &str) -> String {
        Self::compose(app_id, namespace, "*")
    }

    /// Glob pattern scoped to a namespace (e.g. `user:*` inside `users`)
    pub fn scoped_pattern(app_id: &str, namespace: &str, pattern: &str) -> String {
        Self::compose(app_id, namespace, pattern)
    }

    /// Glob pattern for a tag: any composed key with `tag` as an inner segment
    pub fn tag_pattern(tag: &str) -> String {
        format!("*{KEY_SEPARATOR}{tag}{KEY_SEPARATOR}*")
    }

    /// Whether `key` contains glob metacharacters
    pub fn is_pattern(key: &str) -> bool {
        key.contains(GLOB_METACHARACTERS)
    }
}

/// Cache Entry Configuration
///
/// Configures how a cache entry should be stored: TTL and namespace. Either
/// may be left unset, in which case the cache manager's default TTL and the
/// `"default"` namespace apply.
///
/// # Example
///
/// ```
/// use predcache_domain::CacheEntryConfig;
/// use std::time::Duration;
///
/// let config = CacheEntryConfig::default()
///     .with_ttl(Duration::from_secs(60))
///     .with_namespace("predictions");
/// assert_eq!(config.effective_namespace(), "predictions");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryConfig {
    /// Time to live for the cache entry
    pub ttl: Option<Duration>,
    /// Namespace for the cache entry
    pub namespace: Option<String>,
}

impl CacheEntryConfig {
    /// Create an entry config using every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a config that only selects a namespace
    pub fn in_namespace<S: Into<String>>(namespace: S) -> Self {
        Self::new().with_namespace(namespace)
    }

    /// Set the TTL for the cache entry
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set TTL in seconds
    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = Some(Duration::from_secs(secs));
        self
    }

    /// Set the namespace for the cache entry
    pub fn with_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Get the effective TTL, falling back to `default`
    pub fn effective_ttl(&self, default: Duration) -> Duration {
        self.ttl.unwrap_or(default)
    }

    /// Get the effective namespace, falling back to `"default"`
    pub fn effective_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }
}

/// Cache Operation Statistics
///
/// Monotonic counters for one cache manager. `hit_rate` is derived, never
/// stored, and is serialized alongside the counters.
///
/// # Example
///
/// ```
/// use predcache_domain::CacheStats;
///
/// let stats = CacheStats { hits: 7, misses: 3, ..CacheStats::default() };
/// assert!((stats.hit_rate() - 0.7).abs() < f64::EPSILON);
/// assert_eq!(CacheStats::default().hit_rate(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads answered from either tier
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Successful writes
    pub sets: u64,
    /// Keys removed by delete or invalidation
    pub deletes: u64,
    /// Recovered faults (serialization, remote I/O, corrupt payloads)
    pub errors: u64,
}

impl CacheStats {
    /// Hits over total accesses, `0.0` when nothing was read yet
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Total number of reads
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

impl Serialize for CacheStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CacheStats", 6)?;
        state.serialize_field("hits", &self.hits)?;
        state.serialize_field("misses", &self.misses)?;
        state.serialize_field("sets", &self.sets)?;
        state.serialize_field("deletes", &self.deletes)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("hit_rate", &self.hit_rate())?;
        state.end()
    }
}
