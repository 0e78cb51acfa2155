//! # takeoff_core - Quantity Takeoff and Cost Estimation Engine
//!
//! `takeoff_core` turns a handful of project parameters (floor area, floor
//! count, foundation depth, wall and slab thickness) into concrete volumes,
//! reinforcement steel weights and a cost breakdown. All inputs and outputs
//! are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Explicit variants**: Two coefficient sets, selected by [`FormulaVariant`], never blended
//! - **All or nothing**: A call returns a full result or an error
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::calculations::{concrete, steel, ConcreteInput, FormulaVariant, SteelInput};
//!
//! let variant = FormulaVariant::default();
//! let volumes = concrete::estimate(&ConcreteInput::new(100.0, 2, 0.5, 0.2, 0.15), variant).unwrap();
//! let rebar = steel::estimate(&SteelInput::new(volumes.total_volume, None), variant).unwrap();
//!
//! let json = serde_json::to_string_pretty(&rebar).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Concrete, steel and cost estimators plus the pipeline
//! - [`report`] - Priced line-item report
//! - [`api`] - JSON endpoint contract (status + envelope)
//! - [`settings`] - Variant and unit price configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod api;
pub mod calculations;
pub mod errors;
pub mod report;
pub mod rounding;
pub mod settings;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::FormulaVariant;
pub use errors::{CalcError, CalcResult};
pub use report::{assemble_report, EstimateReport, UnitPrices};
pub use settings::{load_settings, save_settings, EstimatorSettings};
