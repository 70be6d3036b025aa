//! Remote Store Port
//!
//! Port for the shared, authoritative cache tier. The command surface is the
//! small fixed subset of a Redis-compatible key/value service that the cache
//! needs: `SETEX`, `GET`, `DEL`, `EXISTS`, `TTL`, `SCAN MATCH`, `PING` and
//! `INFO`.
//!
//! ## Implementations
//!
//! - **Redis**: networked store shared by every instance
//! - **InMemory**: process-local stand-in honoring TTLs (single instance, tests)
//! - **Null**: accepts writes and stores nothing

use crate::error::Result;
use crate::value_objects::RemoteInfo;
use async_trait::async_trait;

/// `TTL` reply for a key that does not exist
pub const TTL_MISSING_KEY: i64 = -2;

/// `TTL` reply for a key without expiry, also used for "cannot determine"
pub const TTL_NO_EXPIRY: i64 = -1;

/// Remote Store Port
///
/// Every method is a single atomic command at the store level, so callers
/// need no transaction or locking discipline.
///
/// # Example
///
/// ```ignore
/// use predcache_domain::ports::RemoteStore;
///
/// store.set_ex("predcache:predictions:pred:42", r#"{"home":0.4}"#, 60).await?;
/// let json = store.get("predcache:predictions:pred:42").await?;
/// ```
#[async_trait]
pub trait RemoteStore: Send + Sync + std::fmt::Debug {
    /// Get the JSON payload stored at `key`
    ///
    /// # Returns
    /// The payload if present, None if not found or expired
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` at `key` with a time to live in seconds (`SETEX`)
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()>;

    /// Delete the given keys (`DEL key [key...]`)
    ///
    /// # Returns
    /// The number of keys that existed and were removed
    async fn delete(&self, keys: &[String]) -> Result<u64>;

    /// Check if a key exists and hasn't expired
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Seconds remaining for `key`
    ///
    /// # Returns
    /// Remaining seconds, [`TTL_NO_EXPIRY`] for a persistent key or
    /// [`TTL_MISSING_KEY`] when the key does not exist
    async fn ttl(&self, key: &str) -> Result<i64>;

    /// List every key matching a glob `pattern`
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Round-trip a `PING`
    async fn ping(&self) -> Result<()>;

    /// Server details consumed by health checks
    async fn info(&self) -> Result<RemoteInfo>;

    /// Get the name/identifier of this store implementation
    ///
    /// # Returns
    /// A string identifier (e.g., "redis", "memory", "null")
    fn provider_name(&self) -> &str;
}
