//! Configuration loader
//!
//! Loads configuration from default values, a TOML file and environment
//! variables, merged with Figment.

use crate::config::types::{
    AppConfig, CacheConfig, LoggingConfig, RemoteConfig, RemoteProvider, WarmingConfig,
};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use predcache_domain::constants::KEY_SEPARATOR;
use predcache_domain::error::{Error, Result};
use predcache_domain::value_objects::CacheKey;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `PREDCACHE_CACHE__DEFAULT_TTL_SECS`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nesting so snake_case field names survive
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_NESTING_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(
                home.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME),
            );
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Checks every section; the first violation is returned.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_cache_config(&config.cache)?;
    validate_remote_config(&config.remote)?;
    validate_warming_config(&config.warming)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if config.app_id.trim().is_empty() {
        return Err(Error::config("Cache app_id cannot be empty"));
    }
    if config.app_id.contains(KEY_SEPARATOR) {
        return Err(Error::config(format!(
            "Cache app_id cannot contain '{KEY_SEPARATOR}': {}",
            config.app_id
        )));
    }
    // The app id prefixes every invalidation pattern
    if CacheKey::is_pattern(&config.app_id) {
        return Err(Error::config(format!(
            "Cache app_id cannot contain glob characters: {}",
            config.app_id
        )));
    }
    if config.default_ttl_secs == 0 {
        return Err(Error::config("Cache default TTL cannot be 0"));
    }
    if config.memory_ttl_cap_secs == 0 {
        return Err(Error::config("Memory TTL cap cannot be 0"));
    }
    if config.max_memory_items == 0 {
        return Err(Error::config("Memory tier capacity cannot be 0"));
    }
    if config.remote_timeout_ms == 0 {
        return Err(Error::config("Remote timeout cannot be 0"));
    }
    if config.max_scheduled_invalidations == 0 {
        return Err(Error::config(
            "Maximum scheduled invalidations cannot be 0",
        ));
    }
    Ok(())
}

fn validate_remote_config(config: &RemoteConfig) -> Result<()> {
    if config.provider == RemoteProvider::Redis
        && config.url.as_deref().is_none_or(|url| url.trim().is_empty())
    {
        return Err(Error::config(
            "Redis URL is required when the redis provider is selected",
        ));
    }
    Ok(())
}

fn validate_warming_config(config: &WarmingConfig) -> Result<()> {
    let ttls = [
        ("prediction", config.prediction_ttl_secs),
        ("team stats", config.team_stats_ttl_secs),
        ("league", config.league_ttl_secs),
        ("model metadata", config.model_metadata_ttl_secs),
    ];
    if let Some((category, _)) = ttls.iter().find(|(_, ttl)| *ttl == 0) {
        return Err(Error::config(format!("Warm {category} TTL cannot be 0")));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set remote store configuration
    pub fn with_remote(mut self, remote: RemoteConfig) -> Self {
        self.config.remote = remote;
        self
    }

    /// Select a remote provider, keeping the configured URL
    pub fn with_remote_provider(mut self, provider: RemoteProvider) -> Self {
        self.config.remote.provider = provider;
        self
    }

    /// Set warming configuration
    pub fn with_warming(mut self, warming: WarmingConfig) -> Self {
        self.config.warming = warming;
        self
    }

    /// Set the application id used as key prefix
    pub fn with_app_id<S: Into<String>>(mut self, app_id: S) -> Self {
        self.config.cache.app_id = app_id.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }

    /// Build and validate the configuration
    pub fn build_validated(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
