//! # Cost Estimate
//!
//! Prices the concrete and steel quantities, then adds labor, equipment and
//! overhead as percentages.
//!
//! | | Variant A | Variant B |
//! |---|---|---|
//! | labor | 30% of materials | 25% of materials |
//! | equipment | 15% of materials | 15% of materials |
//! | overhead | 10% of materials | 10% of materials + labor + equipment |
//! | rounding | whole units | 2 decimals |
//!
//! "Materials" is `concreteCost + steelCost`.

use serde::{Deserialize, Serialize};

use super::{FormulaVariant, OverheadBase};
use crate::errors::CalcResult;
use crate::rounding::rounded_sum;
use crate::validation::{ensure_finite, require_positive};

/// Input parameters for a cost estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "concreteVolume": 10.0,
///   "steelWeight": 1000.0,
///   "concretePricePerCubicMeter": 350.0,
///   "steelPricePerKg": 3.0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostInput {
    /// Concrete volume (m³)
    pub concrete_volume: Option<f64>,
    /// Steel weight (kg)
    pub steel_weight: Option<f64>,
    /// Currency per m³ of concrete
    pub concrete_price_per_cubic_meter: Option<f64>,
    /// Currency per kg of steel
    pub steel_price_per_kg: Option<f64>,
}

impl CostInput {
    pub fn new(concrete_volume: f64, steel_weight: f64, concrete_price_per_cubic_meter: f64, steel_price_per_kg: f64) -> Self {
        CostInput {
            concrete_volume: Some(concrete_volume),
            steel_weight: Some(steel_weight),
            concrete_price_per_cubic_meter: Some(concrete_price_per_cubic_meter),
            steel_price_per_kg: Some(steel_price_per_kg),
        }
    }
}

/// Cost components. They add up to `CostResult::total_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub concrete: f64,
    pub steel: f64,
    pub labor: f64,
    pub equipment: f64,
    pub overhead: f64,
}

impl CostBreakdown {
    /// Components in a fixed order: concrete, steel, labor, equipment, overhead.
    pub fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("concrete", self.concrete),
            ("steel", self.steel),
            ("labor", self.labor),
            ("equipment", self.equipment),
            ("overhead", self.overhead),
        ]
    }
}

/// Cost estimate.
///
/// ## JSON Example (variant B)
///
/// ```json
/// {
///   "concreteCost": 3500.0,
///   "steelCost": 3000.0,
///   "totalCost": 10010.0,
///   "costBreakdown": {
///     "concrete": 3500.0,
///     "steel": 3000.0,
///     "labor": 1625.0,
///     "equipment": 975.0,
///     "overhead": 910.0
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    pub concrete_cost: f64,
    pub steel_cost: f64,
    pub total_cost: f64,
    pub cost_breakdown: CostBreakdown,
}

/// Estimate project cost.
///
/// # Returns
///
/// * `Ok(CostResult)` - Costs with breakdown
/// * `Err(CalcError)` - A required field is missing or not positive, or the
///   amounts overflowed
pub fn estimate(input: &CostInput, variant: FormulaVariant) -> CalcResult<CostResult> {
    let concrete_volume = require_positive("concreteVolume", input.concrete_volume)?;
    let steel_weight = require_positive("steelWeight", input.steel_weight)?;
    let concrete_price = require_positive("concretePricePerCubicMeter", input.concrete_price_per_cubic_meter)?;
    let steel_price = require_positive("steelPricePerKg", input.steel_price_per_kg)?;

    let rates = variant.cost_rates();
    let round = variant.cost_rounding();

    let concrete_cost = concrete_volume * concrete_price;
    let steel_cost = steel_weight * steel_price;
    let materials = concrete_cost + steel_cost;

    let labor = materials * rates.labor;
    let equipment = materials * rates.equipment;
    let overhead = match rates.overhead_base {
        OverheadBase::Flat => materials * rates.overhead,
        OverheadBase::Compounded => (materials + labor + equipment) * rates.overhead,
    };

    let cost_breakdown = CostBreakdown {
        concrete: round(concrete_cost),
        steel: round(steel_cost),
        labor: round(labor),
        equipment: round(equipment),
        overhead: round(overhead),
    };
    let parts = cost_breakdown.components().map(|(_, v)| v);

    let result = CostResult {
        concrete_cost: cost_breakdown.concrete,
        steel_cost: cost_breakdown.steel,
        total_cost: rounded_sum(&parts, round),
        cost_breakdown,
    };

    let mut fields = vec![("totalCost", result.total_cost)];
    fields.extend(cost_breakdown.components());
    ensure_finite("cost", &fields)?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    fn reference_input() -> CostInput {
        CostInput::new(10.0, 1000.0, 350.0, 3.0)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_material_costs() {
        for variant in [FormulaVariant::A, FormulaVariant::B] {
            let r = estimate(&reference_input(), variant).unwrap();
            assert_close(r.concrete_cost, 3500.0);
            assert_close(r.steel_cost, 3000.0);
            assert_eq!(r.concrete_cost, r.cost_breakdown.concrete);
            assert_eq!(r.steel_cost, r.cost_breakdown.steel);
        }
    }

    #[test]
    fn test_variant_a_flat_overhead() {
        let r = estimate(&reference_input(), FormulaVariant::A).unwrap();
        let b = r.cost_breakdown;
        assert_close(b.labor, 1950.0);
        assert_close(b.equipment, 975.0);
        assert_close(b.overhead, 650.0);
        assert_close(r.total_cost, 10075.0);
    }

    #[test]
    fn test_variant_b_compounded_overhead() {
        let r = estimate(&reference_input(), FormulaVariant::B).unwrap();
        let b = r.cost_breakdown;
        assert_close(b.labor, 1625.0);
        assert_close(b.equipment, 975.0);
        // (6500 + 1625 + 975) * 0.10
        assert_close(b.overhead, 910.0);
        assert_close(r.total_cost, 10010.0);
    }

    #[test]
    fn test_total_is_sum_of_breakdown() {
        let inputs = [
            reference_input(),
            CostInput::new(142.16, 11372.8, 412.37, 2.91),
            CostInput::new(3.33, 266.4, 99.99, 1.17),
        ];
        for input in &inputs {
            for variant in [FormulaVariant::A, FormulaVariant::B] {
                let r = estimate(input, variant).unwrap();
                let sum: f64 = r.cost_breakdown.components().iter().map(|(_, v)| v).sum();
                assert!((r.total_cost - sum).abs() < 0.01, "{variant:?}: {} vs {sum}", r.total_cost);
            }
        }
    }

    #[test]
    fn test_rounding_per_variant() {
        let input = CostInput::new(3.33, 266.4, 99.99, 1.17);
        let a = estimate(&input, FormulaVariant::A).unwrap();
        for (_, v) in a.cost_breakdown.components() {
            assert_eq!(v, v.round());
        }
        let b = estimate(&input, FormulaVariant::B).unwrap();
        for (_, v) in b.cost_breakdown.components() {
            assert_eq!(v, (v * 100.0).round() / 100.0);
        }
    }

    #[test]
    fn test_missing_and_non_positive_rejected() {
        let cases = [
            (CostInput { concrete_volume: None, ..reference_input() }, "concreteVolume"),
            (CostInput { steel_weight: Some(0.0), ..reference_input() }, "steelWeight"),
            (CostInput { concrete_price_per_cubic_meter: Some(-350.0), ..reference_input() }, "concretePricePerCubicMeter"),
            (CostInput { steel_price_per_kg: None, ..reference_input() }, "steelPricePerKg"),
        ];
        for (input, field) in cases {
            let err = estimate(&input, FormulaVariant::B).unwrap_err();
            assert!(err.is_validation());
            match err {
                CalcError::MissingField { field: f } | CalcError::InvalidInput { field: f, .. } => assert_eq!(f, field),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let first = estimate(&reference_input(), FormulaVariant::B).unwrap();
        let second = estimate(&reference_input(), FormulaVariant::B).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_shape() {
        let r = estimate(&reference_input(), FormulaVariant::B).unwrap();
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["totalCost"], 10010.0);
        assert_eq!(v["costBreakdown"]["overhead"], 910.0);
    }
}
