use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

use crate::splits::DEFAULT_FINISH_WINDOW_KM;

/// Runtime configuration for the planner service.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlannerConfig {
    /// Checkpoint distances offered in the split table, ascending. Filtered
    /// per race to the distances the race actually reaches.
    pub key_splits_km: Vec<f64>,
    /// Width of the finishing window used by the split projector, km.
    pub finish_window_km: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            key_splits_km: vec![
                5.0, 10.0, 15.0, 20.0, 21.0975, 25.0, 30.0, 35.0, 40.0, 41.0, 42.0, 42.195,
            ],
            finish_window_km: DEFAULT_FINISH_WINDOW_KM,
        }
    }
}

impl PlannerConfig {
    pub fn load(path: &str) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("failed to read config at {path}"))?;
        serde_json::from_str(&data).with_context(|| format!("invalid config JSON at {path}"))
    }
}
