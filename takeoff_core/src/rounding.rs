//! Rounding helpers shared by the estimators.
//!
//! Estimator outputs are non-negative, so `f64::round` (half away from zero)
//! behaves as half-up here.

/// Round to 2 decimal places: `round(x * 100) / 100`.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to the nearest whole unit.
pub fn round0(x: f64) -> f64 {
    x.round()
}

/// Sum already-rounded components, then round the sum with the same rule.
///
/// Re-rounding removes binary representation noise (0.1 + 0.2 style) so the
/// total matches the visible sum of its parts.
pub fn rounded_sum(parts: &[f64], round: fn(f64) -> f64) -> f64 {
    round(parts.iter().sum())
}
