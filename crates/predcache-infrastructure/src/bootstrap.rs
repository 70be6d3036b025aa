//! Cache System Bootstrap
//!
//! The composition root: builds the remote store named by the configuration,
//! then the cache manager, invalidator and warmer sharing it. There is no
//! global instance; the owner passes `Arc`s to whoever needs them.
//!
//! ```text
//! AppConfig → create_remote_store → CacheManager ─┬→ CacheInvalidator
//!                                                 └→ CacheWarmer ← WarmDataSource
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let system = init_cache_system(ConfigLoader::new().load()?)?;
//!
//! let cache = system.manager();
//! cache.set("pred:42", &prediction, CacheEntryConfig::in_namespace("predictions")).await;
//!
//! system.shutdown(Duration::from_secs(10)).await;
//! ```

use crate::cache::{CacheInvalidator, CacheManager, CacheWarmer};
use crate::config::AppConfig;
use crate::constants::SHUTDOWN_TIMEOUT_SECS;
use predcache_domain::error::Result;
use predcache_domain::ports::{RemoteStore, WarmDataSource};
use predcache_providers::remote::create_remote_store;
use predcache_providers::warming::FixtureWarmSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Cache components wired over one remote store
pub struct CacheSystem {
    /// Application configuration
    pub config: Arc<AppConfig>,

    manager: Arc<CacheManager>,
    invalidator: Arc<CacheInvalidator>,
    warmer: Arc<CacheWarmer>,
}

impl CacheSystem {
    /// Wire the components over an existing remote store and warm source
    pub fn new(
        config: AppConfig,
        remote: Arc<dyn RemoteStore>,
        warm_source: Arc<dyn WarmDataSource>,
    ) -> Self {
        let manager = Arc::new(CacheManager::new(&config.cache, remote));
        let invalidator = Arc::new(CacheInvalidator::new(
            Arc::clone(&manager),
            config.cache.max_scheduled_invalidations,
        ));
        let warmer = Arc::new(CacheWarmer::new(
            Arc::clone(&manager),
            warm_source,
            config.warming.clone(),
        ));

        info!(
            app_id = %config.cache.app_id,
            remote = manager.remote_provider(),
            "Cache system initialized"
        );

        Self {
            config: Arc::new(config),
            manager,
            invalidator,
            warmer,
        }
    }

    /// Get the cache manager
    pub fn manager(&self) -> Arc<CacheManager> {
        Arc::clone(&self.manager)
    }

    /// Get the cache invalidator
    pub fn invalidator(&self) -> Arc<CacheInvalidator> {
        Arc::clone(&self.invalidator)
    }

    /// Get the cache warmer
    pub fn warmer(&self) -> Arc<CacheWarmer> {
        Arc::clone(&self.warmer)
    }

    /// Cancel pending scheduled invalidations and wait for their tasks
    ///
    /// Returns `true` if everything stopped before `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        let clean = self.invalidator.shutdown(timeout).await;
        info!(clean, "Cache system shut down");
        clean
    }

    /// [`CacheSystem::shutdown`] with the default timeout
    pub async fn close(&self) -> bool {
        self.shutdown(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS)).await
    }
}

impl std::fmt::Debug for CacheSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSystem")
            .field("manager", &self.manager)
            .field("invalidator", &self.invalidator)
            .finish_non_exhaustive()
    }
}

/// Build a cache system from configuration
///
/// The remote store is selected by `config.remote`; warming uses fixture
/// payloads. Construction does not connect to the remote store.
pub fn init_cache_system(config: AppConfig) -> Result<CacheSystem> {
    let remote = create_remote_store(&config.remote.to_store_config())?;
    Ok(CacheSystem::new(
        config,
        remote,
        Arc::new(FixtureWarmSource::new()),
    ))
}
