//! # Estimation Calculations
//!
//! This module contains the three estimators. Each follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, camelCase fields)
//! - `*Result` - Estimation results (JSON-serializable)
//! - `estimate(input, variant) -> Result<*Result, CalcError>` - Pure function
//!
//! Data flows concrete → steel → cost: the steel estimator consumes the total
//! concrete volume, and the cost estimator consumes both quantities.
//!
//! ## Available Calculations
//!
//! - [`concrete`] - Concrete volume by structural element
//! - [`steel`] - Reinforcement steel weight
//! - [`cost`] - Materials, labor, equipment and overhead
//! - [`pipeline`] - All three chained from project parameters

pub mod concrete;
pub mod cost;
pub mod pipeline;
pub mod steel;

use serde::{Deserialize, Serialize};

use crate::rounding::{round0, round2};

// Re-export commonly used types
pub use concrete::{ConcreteInput, ConcreteResult};
pub use cost::{CostBreakdown, CostInput, CostResult};
pub use pipeline::{ProjectEstimate, ProjectParameters};
pub use steel::{SteelBreakdown, SteelInput, SteelResult};

/// Which coefficient set the estimators use.
///
/// Two formula sets exist for the same quantities and they are never mixed:
/// every coefficient an estimator needs comes from exactly one variant.
///
/// The default is [`FormulaVariant::B`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FormulaVariant {
    /// Proportional-area model. Steel split into main/secondary categories,
    /// labor at 30%, overhead on the flat base, costs in whole units.
    A,
    /// Explicit-element model on a square footprint. Steel split per element,
    /// labor at 25%, overhead on the compounded base, costs to the cent.
    #[default]
    B,
}

/// How the steel total is split up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteelScheme {
    /// main 40% / secondary 60%
    Category,
    /// columns 30% / beams 25% / slabs 25% / foundation 20%
    PerElement,
}

/// What the overhead percentage is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverheadBase {
    /// concrete + steel
    Flat,
    /// concrete + steel + labor + equipment
    Compounded,
}

/// Cost coefficients for one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    pub labor: f64,
    pub equipment: f64,
    pub overhead: f64,
    pub overhead_base: OverheadBase,
}

impl FormulaVariant {
    /// Parse "A"/"B" (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => Some(FormulaVariant::A),
            "B" => Some(FormulaVariant::B),
            _ => None,
        }
    }

    /// Get the variant as a string
    pub fn code(&self) -> &'static str {
        match self {
            FormulaVariant::A => "A",
            FormulaVariant::B => "B",
        }
    }

    /// Steel breakdown scheme used by this variant.
    pub fn steel_scheme(&self) -> SteelScheme {
        match self {
            FormulaVariant::A => SteelScheme::Category,
            FormulaVariant::B => SteelScheme::PerElement,
        }
    }

    /// Cost coefficients used by this variant.
    pub fn cost_rates(&self) -> CostRates {
        match self {
            FormulaVariant::A => CostRates {
                labor: 0.30,
                equipment: 0.15,
                overhead: 0.10,
                overhead_base: OverheadBase::Flat,
            },
            FormulaVariant::B => CostRates {
                labor: 0.25,
                equipment: 0.15,
                overhead: 0.10,
                overhead_base: OverheadBase::Compounded,
            },
        }
    }

    /// Rounding applied to every cost field.
    pub fn cost_rounding(&self) -> fn(f64) -> f64 {
        match self {
            FormulaVariant::A => round0,
            FormulaVariant::B => round2,
        }
    }
}
