//! Warm Data Source Port
//!
//! Where the cache warmer obtains values for keys it finds absent. The
//! serving backend computes these from its models and database; the cache
//! only needs their JSON form.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Producer of values for proactive cache warming
#[async_trait]
pub trait WarmDataSource: Send + Sync {
    /// Outcome probabilities for a match
    async fn prediction(&self, match_id: &str) -> Result<Value>;

    /// Aggregated statistics for a team
    async fn team_stats(&self, team_id: &str) -> Result<Value>;

    /// Standings and metadata for a league
    async fn league_data(&self, league_id: &str) -> Result<Value>;

    /// Metadata of the currently deployed prediction model
    async fn model_metadata(&self) -> Result<Value>;
}
