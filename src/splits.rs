use serde::Serialize;

use crate::solver::PaceCurve;

/// Tolerance when comparing a checkpoint distance against the race distance.
pub const DISTANCE_EPSILON_KM: f64 = 1e-6;

/// Checkpoints within this many kilometers of the finish report the final
/// kilometer's pace instead of the pace of the kilometer just completed.
pub const DEFAULT_FINISH_WINDOW_KM: f64 = 1.5;

/// Cumulative time and reference pace at one checkpoint along the race.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Split {
    /// Checkpoint distance in kilometers (may be fractional).
    pub distance_km: f64,
    /// Elapsed time at the checkpoint, seconds.
    pub cumulative_seconds: f64,
    /// Pace to display at the checkpoint, seconds per kilometer.
    pub reference_pace_sec_per_km: f64,
}

/// Project a pace curve onto a list of checkpoint distances.
///
/// For each checkpoint the whole kilometers are summed and a fractional tail
/// is pro-rated linearly within the next kilometer (uniform pace within a
/// kilometer is assumed). Two display conventions from the projector
/// contract apply on top:
///
/// - a checkpoint equal to the race distance reports the curve's original
///   target time verbatim, so the displayed total always matches the goal
///   even if accumulation drifted;
/// - checkpoints within `finish_window_km` of the finish report the final
///   kilometer's pace ("how fast am I going at the finish"), all others the
///   pace of the kilometer just completed.
///
/// Output order follows the input order; no filtering or deduplication
/// happens here — see [`key_splits_for`] for the caller-side filter.
pub fn project(curve: &PaceCurve, checkpoints_km: &[f64], finish_window_km: f64) -> Vec<Split> {
    let paces = curve.paces();
    let last_pace = curve.last_pace();

    checkpoints_km
        .iter()
        .map(|&km| {
            let whole = km.floor() as usize;

            let mut cumulative: f64 = paces[..whole.min(paces.len())].iter().sum();
            let fraction = km - km.floor();
            if fraction > 0.0 {
                let next_pace = paces.get(whole).copied().unwrap_or(last_pace);
                cumulative += next_pace * fraction;
            }
            if (km - curve.distance_km()).abs() <= DISTANCE_EPSILON_KM {
                cumulative = curve.target_seconds();
            }

            let reference_pace = if km > curve.distance_km() - finish_window_km {
                last_pace
            } else if whole >= 1 {
                paces.get(whole - 1).copied().unwrap_or(last_pace)
            } else {
                last_pace
            };

            Split {
                distance_km: km,
                cumulative_seconds: cumulative,
                reference_pace_sec_per_km: reference_pace,
            }
        })
        .collect()
}

/// Filter a key-split list down to the checkpoints a race of `distance_km`
/// actually reaches (`km <= distance + epsilon`), preserving order.
pub fn key_splits_for(distance_km: f64, key_splits_km: &[f64]) -> Vec<f64> {
    key_splits_km
        .iter()
        .copied()
        .filter(|&km| km <= distance_km + DISTANCE_EPSILON_KM)
        .collect()
}
