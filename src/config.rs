use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::heuristic::PruneConfig;
use crate::{CraftError, Result};

/// Which heuristic the planner hands to the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    /// The crafting feasibility filter driven by [`PruneConfig`].
    #[default]
    Crafting,
    /// No pruning at all.
    Zero,
}

/// Planner configuration, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Wall-clock budget for one search pass, in seconds.
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: f64,

    #[serde(default)]
    pub heuristic: HeuristicKind,

    /// Holding limits, used when `heuristic` is `crafting`.
    #[serde(default)]
    pub prune: PruneConfig,
}

fn default_time_budget_secs() -> f64 {
    30.0
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: default_time_budget_secs(),
            heuristic: HeuristicKind::default(),
            prune: PruneConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_secs = budget.as_secs_f64();
        self
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Rejects budgets that are not a finite, positive number of seconds.
    pub fn validate(&self) -> Result<()> {
        let secs = self.time_budget_secs;
        if !secs.is_finite() || secs <= 0.0 || Duration::try_from_secs_f64(secs).is_err() {
            return Err(CraftError::InvalidConfig(format!(
                "time budget must be a positive number of seconds, got {}",
                secs
            )));
        }
        Ok(())
    }

    /// The search budget. Call [`validate`](Self::validate) first.
    pub fn time_budget(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_budget_secs).unwrap_or_default()
    }
}
