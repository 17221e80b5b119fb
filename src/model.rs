use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::PaceError;
use crate::predict;
use crate::solver;
use crate::splits::{self, DISTANCE_EPSILON_KM};
use crate::timefmt::{format_hms, format_pace, parse_hms};

// ---------- Request-side enums ----------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Full,
    Half,
}

impl Race {
    pub fn distance_km(self) -> f64 {
        match self {
            Race::Full => 42.195,
            Race::Half => 21.0975,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Even,
    Negative,
}

/// A duration-like field that arrives either as raw seconds or as a clock
/// string (`"3:45:30"` for targets, `"5:00"` for paces).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    Seconds(f64),
    Clock(String),
}

impl TimeInput {
    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            TimeInput::Seconds(s) => Some(*s),
            TimeInput::Clock(text) => parse_hms(text),
        }
    }
}

fn default_strategy_seconds() -> f64 {
    10.0
}

// ---------- Plan endpoint ----------

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub target: TimeInput,
    pub race: Race,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_strategy_seconds")]
    pub strategy_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct SplitRow {
    pub distance_km: f64,
    pub reference_pace_sec_per_km: f64,
    pub reference_pace: String,
    pub cumulative_seconds: f64,
    pub cumulative_time: String,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub race: Race,
    pub distance_km: f64,
    pub target_seconds: f64,
    pub strategy: Strategy,
    pub avg_pace_sec_per_km: f64,
    pub avg_pace: String,
    pub start_pace: String,
    pub finish_pace: String,
    pub converged: bool,
    pub splits: Vec<SplitRow>,
}

/// Assemble the full split table for a plan request.
///
/// Even pacing multiplies the average pace out directly; the negative-split
/// strategy runs the linear solver and projects its curve. Either way the
/// checkpoint at the race distance reports the requested target verbatim.
pub fn build_plan(req: &PlanRequest, cfg: &PlannerConfig) -> Result<PlanResponse, PaceError> {
    let target_seconds = req
        .target
        .as_seconds()
        .ok_or_else(|| PaceError::invalid("target time is not a valid H:MM:SS value"))?;
    if !target_seconds.is_finite() || target_seconds <= 0.0 {
        return Err(PaceError::invalid("target time must be positive"));
    }

    let distance_km = req.race.distance_km();
    let avg_pace = target_seconds / distance_km;
    let checkpoints = splits::key_splits_for(distance_km, &cfg.key_splits_km);

    let (rows, start, finish, converged) = match req.strategy {
        Strategy::Even => {
            let rows = checkpoints
                .iter()
                .map(|&km| {
                    let cumulative = if (km - distance_km).abs() <= DISTANCE_EPSILON_KM {
                        target_seconds
                    } else {
                        avg_pace * km
                    };
                    split_row(km, avg_pace, cumulative)
                })
                .collect();
            (rows, avg_pace, avg_pace, true)
        }
        Strategy::Negative => {
            let curve = solver::solve(target_seconds, distance_km, req.strategy_seconds)?;
            let rows = splits::project(&curve, &checkpoints, cfg.finish_window_km)
                .into_iter()
                .map(|s| split_row(s.distance_km, s.reference_pace_sec_per_km, s.cumulative_seconds))
                .collect();
            (rows, curve.first_pace(), curve.last_pace(), curve.converged())
        }
    };

    Ok(PlanResponse {
        race: req.race,
        distance_km,
        target_seconds,
        strategy: req.strategy,
        avg_pace_sec_per_km: avg_pace,
        avg_pace: format_pace(avg_pace),
        start_pace: format_pace(start),
        finish_pace: format_pace(finish),
        converged,
        splits: rows,
    })
}

fn split_row(distance_km: f64, pace: f64, cumulative: f64) -> SplitRow {
    SplitRow {
        distance_km,
        reference_pace_sec_per_km: pace,
        reference_pace: format_pace(pace),
        cumulative_seconds: cumulative,
        cumulative_time: format_hms(cumulative),
    }
}

// ---------- Predict endpoint ----------

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub pace: TimeInput,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_strategy_seconds")]
    pub strategy_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct PredictionRow {
    pub label: String,
    pub distance_km: f64,
    pub predicted_seconds: f64,
    pub predicted_time: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub pace_sec_per_km: f64,
    pub strategy: Strategy,
    pub rows: Vec<PredictionRow>,
}

pub fn build_prediction(req: &PredictRequest) -> Result<PredictResponse, PaceError> {
    let pace_sec_per_km = req
        .pace
        .as_seconds()
        .ok_or_else(|| PaceError::invalid("pace is not a valid M:SS value"))?;

    let split = match req.strategy {
        Strategy::Even => None,
        Strategy::Negative => Some(req.strategy_seconds),
    };

    let rows = predict::predict(pace_sec_per_km, split)?
        .into_iter()
        .map(|p| PredictionRow {
            label: p.label.to_string(),
            distance_km: p.distance_km,
            predicted_seconds: p.predicted_seconds,
            predicted_time: format_hms(p.predicted_seconds),
        })
        .collect();

    Ok(PredictResponse {
        pace_sec_per_km,
        strategy: req.strategy,
        rows,
    })
}
