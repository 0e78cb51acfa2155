//! Input validation shared by the estimators.
//!
//! Required numeric fields arrive as `Option`s so that an absent field and a
//! zero field are both rejected before any arithmetic runs. Zero is treated
//! the same as missing for every required quantity, which also makes
//! `floors = 0` a rejected building.

use crate::errors::{CalcError, CalcResult};

/// Require a present, finite, strictly positive value.
pub fn require_positive(field: &str, value: Option<f64>) -> CalcResult<f64> {
    let value = value.ok_or_else(|| CalcError::missing_field(field))?;
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be greater than zero"));
    }
    Ok(value)
}

/// Like [`require_positive`], but an absent value falls back to `default`.
///
/// A value that is present but zero or negative is still rejected.
pub fn positive_or(field: &str, value: Option<f64>, default: f64) -> CalcResult<f64> {
    match value {
        None => Ok(default),
        some => require_positive(field, some),
    }
}

/// Require a floor count of at least one.
pub fn require_floors(value: Option<u32>) -> CalcResult<u32> {
    match value {
        None => Err(CalcError::missing_field("floors")),
        Some(0) => Err(CalcError::invalid_input("floors", "0", "A building needs at least one floor")),
        Some(n) => Ok(n),
    }
}

/// Reject a computed result if any of its fields is NaN or infinite.
///
/// Valid inputs can still overflow (e.g. an absurd project area), and a
/// result with `inf` in it is worse than no result at all.
pub fn ensure_finite(calculation: &str, fields: &[(&str, f64)]) -> CalcResult<()> {
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(CalcError::calculation_failed(
                calculation,
                format!("{name} is not a finite number ({value})"),
            ));
        }
    }
    Ok(())
}
