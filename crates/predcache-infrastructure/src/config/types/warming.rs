//! Cache warming configuration types

use crate::constants::{
    WARM_LEAGUE_TTL_SECS, WARM_MODEL_METADATA_TTL_SECS, WARM_PACING_MS, WARM_PREDICTION_TTL_SECS,
    WARM_TEAM_STATS_TTL_SECS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache warming configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarmingConfig {
    /// Delay between consecutive warm writes in milliseconds
    pub pacing_ms: u64,

    /// TTL of match predictions in seconds
    pub prediction_ttl_secs: u64,

    /// TTL of team statistics in seconds
    pub team_stats_ttl_secs: u64,

    /// TTL of league data in seconds
    pub league_ttl_secs: u64,

    /// TTL of model metadata in seconds
    pub model_metadata_ttl_secs: u64,
}

impl WarmingConfig {
    /// Pacing delay as a Duration
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

impl Default for WarmingConfig {
    fn default() -> Self {
        Self {
            pacing_ms: WARM_PACING_MS,
            prediction_ttl_secs: WARM_PREDICTION_TTL_SECS,
            team_stats_ttl_secs: WARM_TEAM_STATS_TTL_SECS,
            league_ttl_secs: WARM_LEAGUE_TTL_SECS,
            model_metadata_ttl_secs: WARM_MODEL_METADATA_TTL_SECS,
        }
    }
}
