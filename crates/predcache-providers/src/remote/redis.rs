//! Redis remote store
//!
//! The shared, authoritative tier for multi-instance deployments.
//!
//! ## Features
//!
//! - One `ConnectionManager` per store, created lazily on first use and cloned
//!   for every command (multiplexed, reconnects on its own)
//! - Cursor-based `SCAN MATCH` instead of blocking `KEYS`
//! - `INFO` parsing for health checks
//!
//! ## Example
//!
//! ```ignore
//! use predcache_providers::remote::RedisRemoteStore;
//!
//! let store = RedisRemoteStore::new("redis://localhost:6379")?;
//! ```

use crate::constants::SCAN_BATCH_SIZE;
use async_trait::async_trait;
use predcache_domain::error::{Error, Result};
use predcache_domain::ports::RemoteStore;
use predcache_domain::value_objects::RemoteInfo;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use tokio::sync::OnceCell;
use tracing::debug;

fn redis_error(command: &str, err: RedisError) -> Error {
    Error::network_with_source(format!("Redis {command} failed: {err}"), err)
}

/// Redis remote store
///
/// Creating the store validates the URL but does not connect; the connection
/// is established by the first command.
pub struct RedisRemoteStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    address: String,
}

impl RedisRemoteStore {
    /// Create a new Redis store from a connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| Error::Configuration {
            message: format!("Failed to create Redis client: {e}"),
            source: Some(Box::new(e)),
        })?;

        // Never keep credentials in the printable address
        let address = connection_string
            .rsplit_once('@')
            .map_or(connection_string, |(_, host)| host)
            .trim_start_matches("redis://")
            .trim_start_matches("rediss://")
            .to_string();

        Ok(Self {
            client,
            connection: OnceCell::new(),
            address,
        })
    }

    /// Whether the shared connection has been established
    pub fn is_connected(&self) -> bool {
        self.connection.initialized()
    }

    /// Shared connection handle, created on first use
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                debug!(address = %self.address, "Opening Redis connection");
                self.client
                    .get_connection_manager()
                    .await
                    .map_err(|e| redis_error("CONNECT", e))
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl RemoteStore for RedisRemoteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| redis_error("GET", e))?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(|e| redis_error("SETEX", e))?;
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> Result<u64> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        let removed: u64 = conn
            .del(keys.to_vec())
            .await
            .map_err(|e| redis_error("DEL", e))?;
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| redis_error("EXISTS", e))?;
        Ok(exists)
    }

    async fn ttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        let ttl: i64 = conn.ttl(key).await.map_err(|e| redis_error("TTL", e))?;
        Ok(ttl)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        let mut cursor: u64 = 0;
        let mut keys = Vec::new();

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await
                .map_err(|e| redis_error("SCAN", e))?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        // SCAN may report a key more than once while the keyspace is rehashing
        keys.sort_unstable();
        keys.dedup();
        Ok(keys)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("PING", e))?;
        Ok(())
    }

    async fn info(&self) -> Result<RemoteInfo> {
        let mut conn = self.connection().await?;
        let raw: String = redis::cmd("INFO")
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("INFO", e))?;
        Ok(RemoteInfo::parse(&raw))
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisRemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisRemoteStore")
            .field("server", &self.address)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}
