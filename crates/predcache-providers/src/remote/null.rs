//! Null remote store
//!
//! A remote store that doesn't store anything. Every write succeeds, every
//! read misses, so a cache manager built on it runs from its memory tier
//! alone.

use async_trait::async_trait;
use predcache_domain::error::Result;
use predcache_domain::ports::{RemoteStore, TTL_MISSING_KEY};
use predcache_domain::value_objects::RemoteInfo;

/// Null remote store that doesn't store anything
///
/// # Example
///
/// ```rust
/// use predcache_providers::remote::NullRemoteStore;
///
/// let store = NullRemoteStore::new();
/// // All operations succeed but nothing is stored
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullRemoteStore;

impl NullRemoteStore {
    /// Create a new null remote store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RemoteStore for NullRemoteStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl_secs: u64) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _keys: &[String]) -> Result<u64> {
        Ok(0)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn ttl(&self, _key: &str) -> Result<i64> {
        Ok(TTL_MISSING_KEY)
    }

    async fn keys(&self, _pattern: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn info(&self) -> Result<RemoteInfo> {
        Ok(RemoteInfo::default())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
