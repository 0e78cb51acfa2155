//! # Unit Types
//!
//! Type-safe wrappers for the SI units the estimators work in. Lightweight
//! newtypes over f64 that serialize as bare numbers.
//!
//! ## SI Units
//!
//! - Length: meters (m)
//! - Area: square meters (m²)
//! - Volume: cubic meters (m³)
//! - Mass: kilograms (kg)
//! - Density: kilograms per cubic meter (kg/m³)
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{CubicMeters, KgPerCubicMeter, Kilograms, SquareMeters};
//!
//! let plan = SquareMeters(100.0);
//! assert_eq!(plan.square_side().0, 10.0);
//!
//! let steel: Kilograms = CubicMeters(100.0) * KgPerCubicMeter(80.0);
//! assert_eq!(steel.0, 8000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

// ============================================================================
// Geometric Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl Meters {
    /// Perimeter of a square with this side length.
    pub fn square_perimeter(self) -> Meters {
        Meters(4.0 * self.0)
    }
}

impl SquareMeters {
    /// Side of the square footprint with this area.
    pub fn square_side(self) -> Meters {
        Meters(self.0.sqrt())
    }
}

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Mul<Meters> for SquareMeters {
    type Output = CubicMeters;
    fn mul(self, rhs: Meters) -> CubicMeters {
        CubicMeters(self.0 * rhs.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Density (or reinforcement rate) in kilograms per cubic meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerCubicMeter(pub f64);

impl Mul<KgPerCubicMeter> for CubicMeters {
    type Output = Kilograms;
    fn mul(self, rhs: KgPerCubicMeter) -> Kilograms {
        Kilograms(self.0 * rhs.0)
    }
}

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Meters, SquareMeters, CubicMeters, Kilograms, KgPerCubicMeter);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_footprint() {
        let side = SquareMeters(100.0).square_side();
        assert_eq!(side.0, 10.0);
        assert_eq!(side.square_perimeter().0, 40.0);
    }

    #[test]
    fn test_volume_from_area_and_depth() {
        let plan = Meters(10.0) * Meters(10.0);
        let vol = plan * Meters(0.5);
        assert_eq!(vol.0, 50.0);
    }

    #[test]
    fn test_mass_from_density() {
        let mass = CubicMeters(100.0) * KgPerCubicMeter(628.0);
        assert_eq!(mass.0, 62800.0);
    }

    #[test]
    fn test_serialization() {
        let vol = CubicMeters(142.16);
        let json = serde_json::to_string(&vol).unwrap();
        assert_eq!(json, "142.16");

        let roundtrip: CubicMeters = serde_json::from_str(&json).unwrap();
        assert_eq!(vol, roundtrip);
    }
}
