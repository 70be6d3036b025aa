//! Infrastructure layer constants
//!
//! Defaults for configuration values and internal tunables. Configuration
//! types take their defaults from here.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "PREDCACHE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_NESTING_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "predcache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "predcache";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a full `EnvFilter` directive
pub const LOG_FILTER_ENV: &str = "PREDCACHE_LOG";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Application id prefixed to every cache key
pub const DEFAULT_APP_ID: &str = "predcache";

/// Default TTL for cache entries (1 hour)
pub const CACHE_DEFAULT_TTL_SECS: u64 = 3600;

/// Upper bound on a memory-tier entry's TTL (5 minutes)
pub const MEMORY_TTL_CAP_SECS: u64 = 300;

/// Maximum entries held by the memory tier
pub const MEMORY_MAX_ITEMS: usize = 1000;

/// Per-call deadline for remote store operations
pub const REMOTE_TIMEOUT_MS: u64 = 2000;

/// Keys removed per `DEL` during bulk invalidation
pub const DELETE_BATCH_SIZE: usize = 500;

/// Maximum scheduled invalidations pending at once
pub const MAX_SCHEDULED_INVALIDATIONS: usize = 1024;

/// Separator between memoized function name and argument parts
pub const MEMOIZE_KEY_SEPARATOR: &str = ":";

// ============================================================================
// WARMING CONSTANTS
// ============================================================================

/// Delay between consecutive warm writes
pub const WARM_PACING_MS: u64 = 10;

/// TTL of warmed match predictions (30 minutes)
pub const WARM_PREDICTION_TTL_SECS: u64 = 1800;

/// TTL of warmed team statistics (1 hour)
pub const WARM_TEAM_STATS_TTL_SECS: u64 = 3600;

/// TTL of warmed league data (2 hours)
pub const WARM_LEAGUE_TTL_SECS: u64 = 7200;

/// TTL of warmed model metadata (1 day)
pub const WARM_MODEL_METADATA_TTL_SECS: u64 = 86_400;

/// Namespace of match predictions
pub const NAMESPACE_PREDICTIONS: &str = "predictions";

/// Namespace of team statistics
pub const NAMESPACE_TEAMS: &str = "teams";

/// Namespace of league data
pub const NAMESPACE_LEAGUES: &str = "leagues";

/// Namespace of model metadata
pub const NAMESPACE_MODELS: &str = "models";

// ============================================================================
// SHUTDOWN CONSTANTS
// ============================================================================

/// Time allowed for pending scheduled invalidations during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 10;
