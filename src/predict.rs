use serde::Serialize;

use crate::error::PaceError;
use crate::solver;

/// Standard race distances offered by the predictor, kilometers.
pub const DISTANCE_10K_KM: f64 = 10.0;
pub const HALF_MARATHON_KM: f64 = 21.0975;
pub const MARATHON_KM: f64 = 42.195;

/// Predicted finish time for one standard distance.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: &'static str,
    pub distance_km: f64,
    pub predicted_seconds: f64,
}

/// Estimate finish times for the standard distances from a goal pace.
///
/// With `negative_split_seconds = None` (even pacing) the prediction is just
/// `pace * distance`. With a split value the target is run through the pace
/// solver and the summed curve reported, so predictor and planner share one
/// pacing model; under the solver's sum invariant the two modes agree, which
/// keeps the strategy toggle an interface symmetry rather than a different
/// physiology claim.
///
/// # Errors
/// `PaceError::InvalidInput` if the pace is non-positive or non-finite.
pub fn predict(
    sec_per_km: f64,
    negative_split_seconds: Option<f64>,
) -> Result<Vec<Prediction>, PaceError> {
    if !sec_per_km.is_finite() || sec_per_km <= 0.0 {
        return Err(PaceError::invalid(format!(
            "pace must be a positive number of seconds per kilometer, got {sec_per_km}"
        )));
    }

    let distances: [(&'static str, f64); 3] = [
        ("10 km", DISTANCE_10K_KM),
        ("Half marathon", HALF_MARATHON_KM),
        ("Full marathon", MARATHON_KM),
    ];

    distances
        .iter()
        .map(|&(label, km)| {
            let target = sec_per_km * km;
            let predicted_seconds = match negative_split_seconds {
                Some(split) => solver::solve(target, km, split)?.total_seconds(),
                None => target,
            };
            Ok(Prediction {
                label,
                distance_km: km,
                predicted_seconds,
            })
        })
        .collect()
}
