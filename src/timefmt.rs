//! Clock-time parsing and display formatting shared by the API layer.
//!
//! Numeric semantics are part of the contract: totals round to the nearest
//! second, hours are unpadded, minutes and seconds zero-padded.

/// Placeholder shown for unrepresentable values.
const EM_DASH: &str = "—";

/// Parse `H:MM:SS` into total seconds, or `M:SS` into `minutes * 60 + seconds`
/// (the latter doubles as the pace-field format). Returns `None` on empty
/// components, negative numbers, or minute/second fields >= 60.
pub fn parse_hms(input: &str) -> Option<f64> {
    let parts: Vec<&str> = input.trim().split(':').map(str::trim).collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let nums: Option<Vec<f64>> = parts.iter().map(|p| p.parse::<f64>().ok()).collect();
    let nums = nums?;
    if nums.iter().any(|&v| !v.is_finite() || v < 0.0) {
        return None;
    }

    match nums.as_slice() {
        [h, m, s] => {
            if *m >= 60.0 || *s >= 60.0 {
                return None;
            }
            Some(h * 3600.0 + m * 60.0 + s)
        }
        [a, b] => {
            if *b >= 60.0 {
                return None;
            }
            Some(a * 60.0 + b)
        }
        _ => None,
    }
}

/// Format total seconds as `H:MM:SS`, rounding to the nearest second.
pub fn format_hms(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds < 0.0 {
        return EM_DASH.to_string();
    }
    let s = total_seconds.round() as u64;
    let hours = s / 3600;
    let minutes = (s % 3600) / 60;
    let seconds = s % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Format a pace as `M:SS /km`, rounding to the nearest second.
pub fn format_pace(sec_per_km: f64) -> String {
    if !sec_per_km.is_finite() || sec_per_km <= 0.0 {
        return EM_DASH.to_string();
    }
    let s = sec_per_km.round() as u64;
    format!("{}:{:02} /km", s / 60, s % 60)
}
