//! Provider constants

/// Keys requested per `SCAN` round trip
pub const SCAN_BATCH_SIZE: usize = 500;

/// Redis URL used when none is configured
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Version reported by the fixture model metadata
pub const FIXTURE_MODEL_VERSION: &str = "1.0.0";
