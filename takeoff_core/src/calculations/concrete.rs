//! # Concrete Quantity Estimate
//!
//! Converts project geometry into a concrete volume per structural element
//! (foundation, columns, slabs, beams, stairs, walls).
//!
//! ## Assumptions
//!
//! - Square building footprint (perimeter = 4 × √area)
//! - 3 m storey height
//! - No deductions for openings
//!
//! ## Formula Variants
//!
//! **A** (proportional-area): footing area is the plan area plus 10%,
//! columns and beams are fixed shares of the plan area (4% and 3%), a fixed
//! 20 m² stair footprint runs the full building height.
//!
//! **B** (explicit-element): foundation is the square footprint at full depth,
//! 4 columns of 0.3×0.3 m per floor, perimeter beams of 0.3×0.4 m, one
//! 2×3 m stair flight of 0.2 m per floor. Wall and slab thickness are
//! optional and default to 0.2 m and 0.15 m.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::concrete::{estimate, ConcreteInput};
//! use takeoff_core::calculations::FormulaVariant;
//!
//! let input = ConcreteInput::new(100.0, 2, 0.5, 0.2, 0.15);
//! let result = estimate(&input, FormulaVariant::B).unwrap();
//! assert_eq!(result.total_volume, 142.16);
//! ```

use serde::{Deserialize, Serialize};

use super::FormulaVariant;
use crate::errors::CalcResult;
use crate::rounding::{round2, rounded_sum};
use crate::units::{Meters, SquareMeters};
use crate::validation::{ensure_finite, positive_or, require_floors, require_positive};

/// Storey height used by both variants (m)
pub const STOREY_HEIGHT_M: f64 = 3.0;

/// Wall thickness assumed by variant B when none is given (m)
pub const DEFAULT_WALL_THICKNESS_M: f64 = 0.2;

/// Slab thickness assumed by variant B when none is given (m)
pub const DEFAULT_SLAB_THICKNESS_M: f64 = 0.15;

/// Input parameters for a concrete estimate.
///
/// Every field is optional at the type level so that a missing field can be
/// reported as such; [`estimate`] rejects anything absent, zero or negative.
///
/// ## JSON Example
///
/// ```json
/// {
///   "projectArea": 100.0,
///   "floors": 2,
///   "foundationDepth": 0.5,
///   "wallThickness": 0.2,
///   "slabThickness": 0.15
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteInput {
    /// Plan area per floor (m²)
    pub project_area: Option<f64>,

    /// Number of floors (≥ 1)
    pub floors: Option<u32>,

    /// Foundation depth (m)
    pub foundation_depth: Option<f64>,

    /// Wall thickness (m). Required for variant A.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_thickness: Option<f64>,

    /// Slab thickness (m). Required for variant A.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slab_thickness: Option<f64>,
}

impl ConcreteInput {
    /// Create an input with every field present.
    pub fn new(project_area: f64, floors: u32, foundation_depth: f64, wall_thickness: f64, slab_thickness: f64) -> Self {
        ConcreteInput {
            project_area: Some(project_area),
            floors: Some(floors),
            foundation_depth: Some(foundation_depth),
            wall_thickness: Some(wall_thickness),
            slab_thickness: Some(slab_thickness),
        }
    }

    /// Validate input parameters and resolve variant defaults.
    pub fn validate(&self, variant: FormulaVariant) -> CalcResult<Geometry> {
        let project_area = require_positive("projectArea", self.project_area)?;
        let floors = require_floors(self.floors)?;
        let foundation_depth = require_positive("foundationDepth", self.foundation_depth)?;

        let (wall_thickness, slab_thickness) = match variant {
            FormulaVariant::A => (
                require_positive("wallThickness", self.wall_thickness)?,
                require_positive("slabThickness", self.slab_thickness)?,
            ),
            FormulaVariant::B => (
                positive_or("wallThickness", self.wall_thickness, DEFAULT_WALL_THICKNESS_M)?,
                positive_or("slabThickness", self.slab_thickness, DEFAULT_SLAB_THICKNESS_M)?,
            ),
        };

        Ok(Geometry {
            area: SquareMeters(project_area),
            floors: floors as f64,
            foundation_depth: Meters(foundation_depth),
            wall_thickness: Meters(wall_thickness),
            slab_thickness: Meters(slab_thickness),
        })
    }
}

/// Validated geometry, all fields present and positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub area: SquareMeters,
    pub floors: f64,
    pub foundation_depth: Meters,
    pub wall_thickness: Meters,
    pub slab_thickness: Meters,
}

impl Geometry {
    /// Building height at the fixed storey height.
    fn height(&self) -> f64 {
        self.floors * STOREY_HEIGHT_M
    }

    /// Perimeter of the square footprint.
    fn perimeter(&self) -> Meters {
        self.area.square_side().square_perimeter()
    }
}

/// Concrete volume per structural element (m³), each rounded to 2 decimals.
///
/// `total_volume` is the sum of the six element volumes.
///
/// ## JSON Example
///
/// ```json
/// {
///   "totalVolume": 142.16,
///   "foundationVolume": 50.0,
///   "columnsVolume": 2.16,
///   "slabsVolume": 30.0,
///   "beamsVolume": 9.6,
///   "stairsVolume": 2.4,
///   "wallsVolume": 48.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcreteResult {
    pub total_volume: f64,
    pub foundation_volume: f64,
    pub columns_volume: f64,
    pub slabs_volume: f64,
    pub beams_volume: f64,
    pub stairs_volume: f64,
    pub walls_volume: f64,
}

impl ConcreteResult {
    /// Element volumes in a fixed order: foundation, columns, slabs, beams, stairs, walls.
    pub fn elements(&self) -> [(&'static str, f64); 6] {
        [
            ("foundation", self.foundation_volume),
            ("columns", self.columns_volume),
            ("slabs", self.slabs_volume),
            ("beams", self.beams_volume),
            ("stairs", self.stairs_volume),
            ("walls", self.walls_volume),
        ]
    }

    fn from_elements(foundation: f64, columns: f64, slabs: f64, beams: f64, stairs: f64, walls: f64) -> Self {
        let parts = [foundation, columns, slabs, beams, stairs, walls].map(round2);
        ConcreteResult {
            total_volume: rounded_sum(&parts, round2),
            foundation_volume: parts[0],
            columns_volume: parts[1],
            slabs_volume: parts[2],
            beams_volume: parts[3],
            stairs_volume: parts[4],
            walls_volume: parts[5],
        }
    }
}

/// Variant A element volumes (unrounded).
fn proportional_area(g: &Geometry) -> [f64; 6] {
    let area = g.area.value();

    // 10% extra area for perimeter footing overrun
    let foundation = area * 1.1 * g.foundation_depth.value();
    let columns = (area * 0.04) * g.height();
    let slabs = area * g.floors * g.slab_thickness.value();
    // 0.3 m average beam depth
    let beams = (area * 0.03) * g.floors * 0.3;
    // 20 m² stair footprint, 0.15 m waist slab
    let stairs = 20.0 * g.height() * 0.15;
    let walls = g.perimeter().value() * g.height() * g.wall_thickness.value();

    [foundation, columns, slabs, beams, stairs, walls]
}

/// Variant B element volumes (unrounded).
fn explicit_element(g: &Geometry) -> [f64; 6] {
    let side = g.area.square_side();
    let perimeter = side.square_perimeter().value();

    let foundation = (side * side * g.foundation_depth).value();
    // 4 columns per floor, 0.3 x 0.3 m, one storey tall
    let columns = (4.0 * 0.3 * 0.3 * STOREY_HEIGHT_M) * g.floors;
    let slabs = g.area.value() * g.slab_thickness.value() * g.floors;
    // 0.3 x 0.4 m beams along the perimeter
    let beams = perimeter * 0.3 * 0.4 * g.floors;
    // one 2 x 3 m flight, 0.2 m thick, per floor
    let stairs = (2.0 * 3.0 * 0.2) * g.floors;
    let walls = perimeter * g.wall_thickness.value() * STOREY_HEIGHT_M * g.floors;

    [foundation, columns, slabs, beams, stairs, walls]
}

/// Estimate concrete volumes.
///
/// # Returns
///
/// * `Ok(ConcreteResult)` - Volumes per element and total
/// * `Err(CalcError)` - A required field is missing, zero or negative, or
///   the volumes overflowed
pub fn estimate(input: &ConcreteInput, variant: FormulaVariant) -> CalcResult<ConcreteResult> {
    let geometry = input.validate(variant)?;

    let [foundation, columns, slabs, beams, stairs, walls] = match variant {
        FormulaVariant::A => proportional_area(&geometry),
        FormulaVariant::B => explicit_element(&geometry),
    };
    let result = ConcreteResult::from_elements(foundation, columns, slabs, beams, stairs, walls);

    let mut fields = vec![("totalVolume", result.total_volume)];
    fields.extend(result.elements());
    ensure_finite("concrete", &fields)?;

    Ok(result)
}
