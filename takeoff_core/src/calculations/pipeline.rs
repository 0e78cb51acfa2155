//! # Project Estimate Pipeline
//!
//! Runs concrete → steel → cost for one set of project parameters. A failure
//! at any stage fails the whole estimate.
//!
//! Steel weight is rounded to whole kg before the cost stage sees it, so a
//! tiny fractional steel ratio can round it to zero. That is reported against
//! `steelRatio`, not the derived `steelWeight` the caller never sent.

use serde::{Deserialize, Serialize};

use super::concrete::{self, ConcreteInput, ConcreteResult};
use super::cost::{self, CostInput, CostResult};
use super::steel::{self, SteelInput, SteelResult};
use super::FormulaVariant;
use crate::errors::{CalcError, CalcResult};
use crate::report::UnitPrices;

/// Project geometry plus the optional steel ratio.
///
/// ## JSON Example
///
/// ```json
/// {
///   "projectArea": 100.0,
///   "floors": 2,
///   "foundationDepth": 0.5,
///   "wallThickness": 0.2,
///   "slabThickness": 0.15,
///   "steelRatio": 0.08
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParameters {
    #[serde(flatten)]
    pub geometry: ConcreteInput,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub steel_ratio: Option<f64>,
}

/// Results of every stage, plus the variant that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEstimate {
    pub variant: FormulaVariant,
    pub concrete: ConcreteResult,
    pub steel: SteelResult,
    pub cost: CostResult,
}

/// Estimate quantities and cost for a project.
///
/// # Example
///
/// ```rust
/// use takeoff_core::calculations::concrete::ConcreteInput;
/// use takeoff_core::calculations::pipeline::{estimate_project, ProjectParameters};
/// use takeoff_core::calculations::FormulaVariant;
/// use takeoff_core::report::UnitPrices;
///
/// let params = ProjectParameters {
///     geometry: ConcreteInput::new(100.0, 2, 0.5, 0.2, 0.15),
///     steel_ratio: None,
/// };
/// let estimate = estimate_project(&params, &UnitPrices::default(), FormulaVariant::B).unwrap();
/// assert_eq!(estimate.steel.total_weight, 11373.0);
/// ```
pub fn estimate_project(params: &ProjectParameters, prices: &UnitPrices, variant: FormulaVariant) -> CalcResult<ProjectEstimate> {
    let concrete = concrete::estimate(&params.geometry, variant)?;

    let steel = steel::estimate(
        &SteelInput {
            concrete_volume: Some(concrete.total_volume),
            steel_ratio: params.steel_ratio,
        },
        variant,
    )?;
    if steel.total_weight <= 0.0 {
        return Err(CalcError::invalid_input(
            "steelRatio",
            params.steel_ratio.unwrap_or_default().to_string(),
            "Steel ratio is too small: reinforcement rounds to 0 kg",
        ));
    }

    let cost = cost::estimate(
        &CostInput {
            concrete_volume: Some(concrete.total_volume),
            steel_weight: Some(steel.total_weight),
            concrete_price_per_cubic_meter: Some(prices.concrete_per_cubic_meter),
            steel_price_per_kg: Some(prices.steel_per_kg),
        },
        variant,
    )?;

    Ok(ProjectEstimate {
        variant,
        concrete,
        steel,
        cost,
    })
}
