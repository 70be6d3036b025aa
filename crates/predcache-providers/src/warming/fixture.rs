//! Fixture warm source
//!
//! Deterministic placeholder payloads for every warm category. The serving
//! backend's models are mocked, so the values only need a realistic shape:
//! outcome probabilities summing to one, team form, league tables and model
//! metadata.

use crate::constants::FIXTURE_MODEL_VERSION;
use async_trait::async_trait;
use predcache_domain::error::{Error, Result};
use predcache_domain::ports::WarmDataSource;
use serde_json::{Value, json};

/// Fixture-backed warm data source
#[derive(Debug, Clone, Default)]
pub struct FixtureWarmSource;

impl FixtureWarmSource {
    /// Create a new fixture source
    pub fn new() -> Self {
        Self
    }
}

/// Stable pseudo-random fraction in `[0, 1)` derived from an id
fn id_fraction(id: &str) -> f64 {
    let sum: u32 = id.bytes().map(u32::from).sum();
    f64::from(sum % 100) / 100.0
}

fn require_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    if id.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{kind} id cannot be empty")));
    }
    Ok(id)
}

#[async_trait]
impl WarmDataSource for FixtureWarmSource {
    async fn prediction(&self, match_id: &str) -> Result<Value> {
        let match_id = require_id("match", match_id)?;
        let swing = id_fraction(match_id) * 0.2;
        let home = 0.35 + swing;
        let draw = 0.30 - swing / 2.0;
        Ok(json!({
            "match_id": match_id,
            "home": home,
            "draw": draw,
            "away": 1.0 - home - draw,
            "model_version": FIXTURE_MODEL_VERSION,
        }))
    }

    async fn team_stats(&self, team_id: &str) -> Result<Value> {
        let team_id = require_id("team", team_id)?;
        let strength = id_fraction(team_id);
        Ok(json!({
            "team_id": team_id,
            "form": ["W", "D", "W", "L", "W"],
            "goals_for_avg": 1.0 + strength,
            "goals_against_avg": 2.0 - strength,
        }))
    }

    async fn league_data(&self, league_id: &str) -> Result<Value> {
        let league_id = require_id("league", league_id)?;
        Ok(json!({
            "league_id": league_id,
            "season": "2026/27",
            "standings": [],
        }))
    }

    async fn model_metadata(&self) -> Result<Value> {
        Ok(json!({
            "name": "baseline-poisson",
            "version": FIXTURE_MODEL_VERSION,
            "features": ["home_form", "away_form", "head_to_head"],
        }))
    }
}
