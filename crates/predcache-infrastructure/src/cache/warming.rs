//! Proactive cache warming
//!
//! Fills keys that are likely to be requested soon. Every pass is
//! idempotent: a key already present in either tier is skipped, so running a
//! pass twice writes nothing the second time.
//!
//! | Category | Namespace | Key |
//! |----------|-----------|-----|
//! | Predictions | `predictions` | `match:{id}` |
//! | Team statistics | `teams` | `stats:{id}` |
//! | League data | `leagues` | `league:{id}` |
//! | Model metadata | `models` | `metadata` |

use crate::cache::manager::CacheManager;
use crate::config::WarmingConfig;
use crate::constants::{NAMESPACE_LEAGUES, NAMESPACE_MODELS, NAMESPACE_PREDICTIONS, NAMESPACE_TEAMS};
use predcache_domain::error::Result;
use predcache_domain::ports::WarmDataSource;
use predcache_domain::value_objects::CacheEntryConfig;
use serde::Serialize;
use serde_json::Value;
use std::ops::AddAssign;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of a warm pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarmReport {
    /// Keys considered
    pub requested: usize,
    /// Keys written
    pub warmed: usize,
    /// Keys already present
    pub skipped: usize,
    /// Keys whose value could not be produced or written
    pub failed: usize,
}

impl AddAssign for WarmReport {
    fn add_assign(&mut self, other: Self) {
        self.requested += other.requested;
        self.warmed += other.warmed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, Copy)]
enum WarmCategory {
    Prediction,
    TeamStats,
    League,
    ModelMetadata,
}

impl WarmCategory {
    fn namespace(self) -> &'static str {
        match self {
            Self::Prediction => NAMESPACE_PREDICTIONS,
            Self::TeamStats => NAMESPACE_TEAMS,
            Self::League => NAMESPACE_LEAGUES,
            Self::ModelMetadata => NAMESPACE_MODELS,
        }
    }

    fn key(self, id: &str) -> String {
        match self {
            Self::Prediction => format!("match:{id}"),
            Self::TeamStats => format!("stats:{id}"),
            Self::League => format!("league:{id}"),
            Self::ModelMetadata => "metadata".to_string(),
        }
    }
}

/// Cache warmer
pub struct CacheWarmer {
    manager: Arc<CacheManager>,
    source: Arc<dyn WarmDataSource>,
    config: WarmingConfig,
}

impl CacheWarmer {
    /// Create a warmer writing values produced by `source`
    pub fn new(
        manager: Arc<CacheManager>,
        source: Arc<dyn WarmDataSource>,
        config: WarmingConfig,
    ) -> Self {
        Self {
            manager,
            source,
            config,
        }
    }

    fn ttl(&self, category: WarmCategory) -> Duration {
        Duration::from_secs(match category {
            WarmCategory::Prediction => self.config.prediction_ttl_secs,
            WarmCategory::TeamStats => self.config.team_stats_ttl_secs,
            WarmCategory::League => self.config.league_ttl_secs,
            WarmCategory::ModelMetadata => self.config.model_metadata_ttl_secs,
        })
    }

    async fn produce(&self, category: WarmCategory, id: &str) -> Result<Value> {
        match category {
            WarmCategory::Prediction => self.source.prediction(id).await,
            WarmCategory::TeamStats => self.source.team_stats(id).await,
            WarmCategory::League => self.source.league_data(id).await,
            WarmCategory::ModelMetadata => self.source.model_metadata().await,
        }
    }

    async fn warm<S: AsRef<str>>(&self, category: WarmCategory, ids: &[S]) -> WarmReport {
        let namespace = category.namespace();
        let entry_config = CacheEntryConfig::in_namespace(namespace).with_ttl(self.ttl(category));
        let pacing = self.config.pacing();
        let mut report = WarmReport {
            requested: ids.len(),
            ..WarmReport::default()
        };

        for id in ids {
            let id = id.as_ref();
            let key = category.key(id);
            if self.manager.exists(&key, namespace).await {
                report.skipped += 1;
                continue;
            }

            let value = match self.produce(category, id).await {
                Ok(value) => value,
                Err(e) => {
                    report.failed += 1;
                    warn!(key = %key, namespace, error = %e, "Warm source failed");
                    continue;
                }
            };

            if self.manager.set(&key, &value, entry_config.clone()).await {
                report.warmed += 1;
                debug!(key = %key, namespace, "Warmed cache entry");
            } else {
                report.failed += 1;
            }

            if !pacing.is_zero() {
                tokio::time::sleep(pacing).await;
            }
        }

        info!(
            namespace,
            requested = report.requested,
            warmed = report.warmed,
            skipped = report.skipped,
            failed = report.failed,
            "Warm pass complete"
        );
        report
    }

    /// Warm match predictions
    pub async fn warm_predictions<S: AsRef<str>>(&self, match_ids: &[S]) -> WarmReport {
        self.warm(WarmCategory::Prediction, match_ids).await
    }

    /// Warm team statistics
    pub async fn warm_team_stats<S: AsRef<str>>(&self, team_ids: &[S]) -> WarmReport {
        self.warm(WarmCategory::TeamStats, team_ids).await
    }

    /// Warm league data
    pub async fn warm_league_data<S: AsRef<str>>(&self, league_ids: &[S]) -> WarmReport {
        self.warm(WarmCategory::League, league_ids).await
    }

    /// Warm the deployed model's metadata
    pub async fn warm_model_metadata(&self) -> WarmReport {
        self.warm(WarmCategory::ModelMetadata, &[""]).await
    }

    /// Run every category in turn and aggregate the reports
    pub async fn warm_all<M, T, L>(&self, match_ids: &[M], team_ids: &[T], league_ids: &[L]) -> WarmReport
    where
        M: AsRef<str>,
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let mut report = self.warm_model_metadata().await;
        report += self.warm_league_data(league_ids).await;
        report += self.warm_team_stats(team_ids).await;
        report += self.warm_predictions(match_ids).await;
        report
    }
}

impl std::fmt::Debug for CacheWarmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheWarmer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
