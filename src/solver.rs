use serde::Serialize;

use crate::error::PaceError;

/// Convergence tolerance for the offset iteration, in seconds.
pub const SUM_TOLERANCE_S: f64 = 0.001;

/// Iteration cap for the offset search. The linear model converges after a
/// single adjustment; the cap only matters if the profile is ever generalized
/// to a shape where the update is no longer exact.
pub const MAX_ITERATIONS: usize = 1000;

/// Shape of the pace curve across the race.
///
/// `Linear` is the canonical profile: pace falls linearly from start to
/// finish and the curve is corrected so its sum matches the target exactly.
/// `Quadratic` slows only the early kilometers (`avg + s·(1 − progress)²`)
/// and applies no correction, so its sum is not guaranteed to hit the target.
/// The two are never mixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaceProfile {
    #[default]
    Linear,
    Quadratic,
}

/// Per-kilometer pace plan for a single race.
///
/// Holds one pace value (seconds per kilometer) for each of the
/// `ceil(distance_km)` kilometers, stored 0-indexed. For the linear profile
/// the values sum to `target_seconds` up to floating-point residue far below
/// a millisecond.
#[derive(Debug, Clone, Serialize)]
pub struct PaceCurve {
    paces: Vec<f64>,
    target_seconds: f64,
    distance_km: f64,
    converged: bool,
}

impl PaceCurve {
    /// Pace values in kilometer order, seconds per kilometer.
    pub fn paces(&self) -> &[f64] {
        &self.paces
    }

    /// The finish time this curve was solved for.
    pub fn target_seconds(&self) -> f64 {
        self.target_seconds
    }

    /// Race distance in kilometers (may be fractional).
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// False only when the offset iteration hit its cap without meeting
    /// tolerance. The curve is still the best available one in that case.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Number of kilometers in the plan, `ceil(distance_km)`.
    pub fn len(&self) -> usize {
        self.paces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paces.is_empty()
    }

    /// Pace of the first kilometer.
    pub fn first_pace(&self) -> f64 {
        self.paces[0]
    }

    /// Pace of the final kilometer, i.e. the finishing pace.
    pub fn last_pace(&self) -> f64 {
        self.paces[self.paces.len() - 1]
    }

    /// Average pace over the true (fractional) distance.
    pub fn avg_pace(&self) -> f64 {
        self.target_seconds / self.distance_km
    }

    /// Sum of all per-kilometer paces.
    pub fn total_seconds(&self) -> f64 {
        self.paces.iter().sum()
    }
}

/// Normalized position of kilometer `km` (1-based) along an `n`-kilometer
/// race: 0.0 for the first kilometer, 1.0 for the last. Callers must
/// guarantee `n > 1`.
fn progress(km: usize, n: usize) -> f64 {
    (km - 1) as f64 / (n - 1) as f64
}

fn validate(target_seconds: f64, distance_km: f64, strategy_seconds: f64) -> Result<(), PaceError> {
    if !target_seconds.is_finite() || target_seconds <= 0.0 {
        return Err(PaceError::invalid(format!(
            "target time must be a positive number of seconds, got {target_seconds}"
        )));
    }
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(PaceError::invalid(format!(
            "distance must be a positive number of kilometers, got {distance_km}"
        )));
    }
    if !strategy_seconds.is_finite() {
        return Err(PaceError::invalid("strategy seconds must be finite"));
    }
    Ok(())
}

/// Solve a pace curve under the canonical linear profile.
///
/// The first and last kilometer differ by exactly `strategy_seconds`
/// (positive = negative split: start slower, finish faster), and the summed
/// per-kilometer times equal `target_seconds`.
///
/// # Errors
/// `PaceError::InvalidInput` if target or distance is non-positive or any
/// argument is non-finite.
pub fn solve(
    target_seconds: f64,
    distance_km: f64,
    strategy_seconds: f64,
) -> Result<PaceCurve, PaceError> {
    solve_with_profile(target_seconds, distance_km, strategy_seconds, PaceProfile::Linear)
}

/// Solve a pace curve under an explicit profile. See [`PaceProfile`] for the
/// guarantees each shape carries.
pub fn solve_with_profile(
    target_seconds: f64,
    distance_km: f64,
    strategy_seconds: f64,
    profile: PaceProfile,
) -> Result<PaceCurve, PaceError> {
    validate(target_seconds, distance_km, strategy_seconds)?;

    let n = distance_km.ceil() as usize;
    if n == 1 {
        // The progression term divides by n - 1; a one-kilometer plan is just
        // the target itself.
        return Ok(PaceCurve {
            paces: vec![target_seconds],
            target_seconds,
            distance_km,
            converged: true,
        });
    }

    match profile {
        PaceProfile::Linear => Ok(solve_linear(target_seconds, distance_km, strategy_seconds, n)),
        PaceProfile::Quadratic => {
            Ok(solve_quadratic(target_seconds, distance_km, strategy_seconds, n))
        }
    }
}

/// Linear profile: `pace(km) = (avg + offset) − s·progress(km)`.
///
/// `offset` is found by fixed-point iteration on the sum error. The sum is
/// linear in `offset` with slope `n`, so the update `offset -= error / n` is
/// exact and the loop settles after one adjustment; the tolerance and cap
/// stay in place for non-linear generalizations of the profile. A final
/// residual correction on the last kilometer pins the sum to the target.
fn solve_linear(target_seconds: f64, distance_km: f64, strategy_seconds: f64, n: usize) -> PaceCurve {
    let avg_pace = target_seconds / distance_km;

    let mut offset = 0.0;
    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let start_pace = avg_pace + offset;
        let total: f64 = (1..=n)
            .map(|km| start_pace - strategy_seconds * progress(km, n))
            .sum();
        let error = total - target_seconds;
        if error.abs() < SUM_TOLERANCE_S {
            converged = true;
            break;
        }
        offset -= error / n as f64;
    }
    if !converged {
        tracing::warn!(
            target_seconds,
            distance_km,
            strategy_seconds,
            "pace solver hit iteration cap; returning best curve"
        );
    }

    let start_pace = avg_pace + offset;
    let mut paces: Vec<f64> = (1..=n)
        .map(|km| start_pace - strategy_seconds * progress(km, n))
        .collect();

    // Pin the sum to the target; the residual here is sub-millisecond.
    let correction = target_seconds - paces.iter().sum::<f64>();
    if let Some(last) = paces.last_mut() {
        *last += correction;
    }

    PaceCurve {
        paces,
        target_seconds,
        distance_km,
        converged,
    }
}

/// Quadratic profile: `pace(km) = avg + s·(1 − progress)²`. Only the start
/// is slowed; deviation is `+s` at the first kilometer and 0 at the last.
/// No residual correction, so the sum may drift from the target.
fn solve_quadratic(
    target_seconds: f64,
    distance_km: f64,
    strategy_seconds: f64,
    n: usize,
) -> PaceCurve {
    let avg_pace = target_seconds / distance_km;
    let paces = (1..=n)
        .map(|km| {
            let p = progress(km, n);
            avg_pace + strategy_seconds * (1.0 - 2.0 * p + p * p)
        })
        .collect();

    PaceCurve {
        paces,
        target_seconds,
        distance_km,
        converged: true,
    }
}
