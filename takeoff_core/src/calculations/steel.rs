//! # Reinforcement Steel Estimate
//!
//! Converts a concrete volume into a reinforcement steel weight and splits it
//! by category (variant A) or by structural element (variant B).
//!
//! ## Steel Ratio
//!
//! `steelRatio` means two different things depending on its magnitude:
//!
//! - absent (or `0`): 80 kg/m³
//! - below 1: a fraction of the concrete volume that is steel, converted with
//!   the density of steel (`0.08` → `0.08 × 7850 = 628 kg/m³`)
//! - 1 or more: already in kg/m³ (`80` → `80 kg/m³`)
//!
//! Callers sending a rate just under 1 kg/m³ will have it read as a fraction.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::steel::{estimate, SteelInput};
//! use takeoff_core::calculations::FormulaVariant;
//!
//! let result = estimate(&SteelInput::new(100.0, Some(80.0)), FormulaVariant::B).unwrap();
//! assert_eq!(result.total_weight, 8000.0);
//! ```

use serde::{Deserialize, Serialize};

use super::{FormulaVariant, SteelScheme};
use crate::errors::{CalcError, CalcResult};
use crate::rounding::round0;
use crate::units::{CubicMeters, KgPerCubicMeter};
use crate::validation::{ensure_finite, require_positive};

/// Density of steel (kg/m³)
pub const STEEL_DENSITY_KG_M3: f64 = 7850.0;

/// Reinforcement rate used when no steel ratio is given (kg/m³)
pub const DEFAULT_KG_PER_M3: f64 = 80.0;

/// Input parameters for a steel estimate.
///
/// ## JSON Example
///
/// ```json
/// { "concreteVolume": 100.0, "steelRatio": 0.08 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelInput {
    /// Concrete volume to reinforce (m³)
    pub concrete_volume: Option<f64>,

    /// Fraction (< 1) or kg/m³ (≥ 1); see the module docs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steel_ratio: Option<f64>,
}

impl SteelInput {
    pub fn new(concrete_volume: f64, steel_ratio: Option<f64>) -> Self {
        SteelInput {
            concrete_volume: Some(concrete_volume),
            steel_ratio,
        }
    }
}

/// Resolve `steelRatio` into kg of steel per m³ of concrete.
///
/// Zero counts as absent. Negative or non-finite ratios are rejected.
pub fn resolve_kg_per_m3(steel_ratio: Option<f64>) -> CalcResult<KgPerCubicMeter> {
    let ratio = match steel_ratio {
        None => return Ok(KgPerCubicMeter(DEFAULT_KG_PER_M3)),
        Some(r) if r == 0.0 => return Ok(KgPerCubicMeter(DEFAULT_KG_PER_M3)),
        Some(r) => r,
    };

    if !ratio.is_finite() || ratio < 0.0 {
        return Err(CalcError::invalid_input(
            "steelRatio",
            ratio.to_string(),
            "Steel ratio must be a positive number",
        ));
    }

    // WARNING: magnitude decides the unit. Values below 1 are fractions of
    // the concrete volume, everything else is kg/m³.
    if ratio < 1.0 {
        Ok(KgPerCubicMeter(ratio * STEEL_DENSITY_KG_M3))
    } else {
        Ok(KgPerCubicMeter(ratio))
    }
}

/// Split of the steel total. Which shape is produced depends on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SteelBreakdown {
    /// Main (40%) and secondary (60%) reinforcement.
    #[serde(rename_all = "camelCase")]
    Category {
        main_steel_weight: f64,
        secondary_steel_weight: f64,
    },
    /// Columns 30%, beams 25%, slabs 25%, foundation 20%.
    #[serde(rename_all = "camelCase")]
    PerElement {
        columns_steel: f64,
        beams_steel: f64,
        slabs_steel: f64,
        foundation_steel: f64,
    },
}

impl SteelBreakdown {
    fn split(total: f64, scheme: SteelScheme) -> Self {
        match scheme {
            SteelScheme::Category => SteelBreakdown::Category {
                main_steel_weight: round0(total * 0.4),
                secondary_steel_weight: round0(total * 0.6),
            },
            SteelScheme::PerElement => SteelBreakdown::PerElement {
                columns_steel: round0(total * 0.3),
                beams_steel: round0(total * 0.25),
                slabs_steel: round0(total * 0.25),
                foundation_steel: round0(total * 0.2),
            },
        }
    }

    /// Named parts of the breakdown (kg).
    pub fn parts(&self) -> Vec<(&'static str, f64)> {
        match *self {
            SteelBreakdown::Category {
                main_steel_weight,
                secondary_steel_weight,
            } => vec![("main", main_steel_weight), ("secondary", secondary_steel_weight)],
            SteelBreakdown::PerElement {
                columns_steel,
                beams_steel,
                slabs_steel,
                foundation_steel,
            } => vec![
                ("columns", columns_steel),
                ("beams", beams_steel),
                ("slabs", slabs_steel),
                ("foundation", foundation_steel),
            ],
        }
    }
}

/// Steel weight estimate, all weights in whole kg.
///
/// ## JSON Example (variant B)
///
/// ```json
/// {
///   "totalWeight": 8000.0,
///   "kgPerCubicMeter": 80.0,
///   "columnsSteel": 2400.0,
///   "beamsSteel": 2000.0,
///   "slabsSteel": 2000.0,
///   "foundationSteel": 1600.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SteelResult {
    pub total_weight: f64,

    /// Reinforcement rate the total was computed with
    pub kg_per_cubic_meter: f64,

    #[serde(flatten)]
    pub breakdown: SteelBreakdown,
}

/// Estimate reinforcement steel weight.
///
/// # Returns
///
/// * `Ok(SteelResult)` - Total weight and its breakdown
/// * `Err(CalcError)` - `concreteVolume` missing or not positive, bad
///   `steelRatio`, or the weight overflowed
pub fn estimate(input: &SteelInput, variant: FormulaVariant) -> CalcResult<SteelResult> {
    let volume = CubicMeters(require_positive("concreteVolume", input.concrete_volume)?);
    let rate = resolve_kg_per_m3(input.steel_ratio)?;

    let raw_total = (volume * rate).value();
    let breakdown = SteelBreakdown::split(raw_total, variant.steel_scheme());
    let result = SteelResult {
        total_weight: round0(raw_total),
        kg_per_cubic_meter: rate.value(),
        breakdown,
    };

    let mut fields = vec![("totalWeight", result.total_weight)];
    fields.extend(breakdown.parts());
    ensure_finite("steel", &fields)?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_ratio_uses_steel_density() {
        let r = estimate(&SteelInput::new(100.0, Some(0.08)), FormulaVariant::B).unwrap();
        assert!((r.kg_per_cubic_meter - 628.0).abs() < 1e-9);
        assert_eq!(r.total_weight, 62800.0);
    }

    #[test]
    fn test_ratio_at_least_one_is_kg_per_m3() {
        let r = estimate(&SteelInput::new(100.0, Some(80.0)), FormulaVariant::B).unwrap();
        assert_eq!(r.kg_per_cubic_meter, 80.0);
        assert_eq!(r.total_weight, 8000.0);

        let r = estimate(&SteelInput::new(10.0, Some(1.0)), FormulaVariant::B).unwrap();
        assert_eq!(r.kg_per_cubic_meter, 1.0);
    }

    #[test]
    fn test_ratio_just_below_one_is_still_a_fraction() {
        // 0.999 * 7850, not 0.999 kg/m³
        let rate = resolve_kg_per_m3(Some(0.999)).unwrap();
        assert!((rate.value() - 7842.15).abs() < 1e-9);

        let r = estimate(&SteelInput::new(100.0, Some(0.999)), FormulaVariant::B).unwrap();
        assert_eq!(r.total_weight, 784215.0);

        // one step up flips to kg/m³
        assert_eq!(resolve_kg_per_m3(Some(1.0)).unwrap().value(), 1.0);
    }

    #[test]
    fn test_default_ratio() {
        let r = estimate(&SteelInput::new(100.0, None), FormulaVariant::B).unwrap();
        assert_eq!(r.kg_per_cubic_meter, 80.0);
        assert_eq!(r.total_weight, 8000.0);

        let zero = estimate(&SteelInput::new(100.0, Some(0.0)), FormulaVariant::B).unwrap();
        assert_eq!(zero, r);
    }

    #[test]
    fn test_per_element_breakdown() {
        let r = estimate(&SteelInput::new(100.0, Some(80.0)), FormulaVariant::B).unwrap();
        assert_eq!(
            r.breakdown,
            SteelBreakdown::PerElement {
                columns_steel: 2400.0,
                beams_steel: 2000.0,
                slabs_steel: 2000.0,
                foundation_steel: 1600.0,
            }
        );
    }

    #[test]
    fn test_category_breakdown() {
        let r = estimate(&SteelInput::new(100.0, Some(80.0)), FormulaVariant::A).unwrap();
        assert_eq!(
            r.breakdown,
            SteelBreakdown::Category {
                main_steel_weight: 3200.0,
                secondary_steel_weight: 4800.0,
            }
        );
    }

    #[test]
    fn test_breakdown_covers_total() {
        for variant in [FormulaVariant::A, FormulaVariant::B] {
            let r = estimate(&SteelInput::new(142.16, Some(0.08)), variant).unwrap();
            let sum: f64 = r.breakdown.parts().iter().map(|(_, w)| w).sum();
            // each part rounds independently
            assert!((sum - r.total_weight).abs() <= 2.0, "{variant:?}: {sum} vs {}", r.total_weight);
        }
    }

    #[test]
    fn test_weights_are_whole_kg() {
        let r = estimate(&SteelInput::new(142.16, Some(0.08)), FormulaVariant::B).unwrap();
        assert_eq!(r.total_weight, r.total_weight.round());
        for (_, w) in r.breakdown.parts() {
            assert_eq!(w, w.round());
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            estimate(&SteelInput::default(), FormulaVariant::B).unwrap_err(),
            CalcError::missing_field("concreteVolume")
        );
        assert!(estimate(&SteelInput::new(0.0, None), FormulaVariant::B).unwrap_err().is_validation());
        assert!(estimate(&SteelInput::new(-1.0, None), FormulaVariant::B).unwrap_err().is_validation());
        assert!(estimate(&SteelInput::new(10.0, Some(-0.5)), FormulaVariant::B).unwrap_err().is_validation());
    }

    #[test]
    fn test_json_shape() {
        let input: SteelInput = serde_json::from_str(r#"{"concreteVolume": 100}"#).unwrap();
        let b = serde_json::to_value(estimate(&input, FormulaVariant::B).unwrap()).unwrap();
        assert_eq!(b["totalWeight"], 8000.0);
        assert_eq!(b["foundationSteel"], 1600.0);
        assert!(b.get("mainSteelWeight").is_none());

        let a = serde_json::to_value(estimate(&input, FormulaVariant::A).unwrap()).unwrap();
        assert_eq!(a["mainSteelWeight"], 3200.0);
        assert!(a.get("columnsSteel").is_none());
    }
}
