//! # Estimator Settings
//!
//! Which formula variant to run and which unit prices to use, stored as a
//! small JSON file.
//!
//! - **Atomic saves**: write to .tmp, sync, rename
//! - **Version validation**: refuse files written by an incompatible release
//!
//! ## File Format
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "variant": "B",
//!   "unitPrices": { "concretePerCubicMeter": 350.0, "steelPerKg": 3.0 }
//! }
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculations::FormulaVariant;
use crate::errors::{CalcError, CalcResult};
use crate::report::UnitPrices;

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Estimator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatorSettings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Formula variant used by every estimator
    #[serde(default)]
    pub variant: FormulaVariant,

    /// Prices used by the pipeline and report
    #[serde(default)]
    pub unit_prices: UnitPrices,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        EstimatorSettings {
            version: SCHEMA_VERSION.to_string(),
            variant: FormulaVariant::default(),
            unit_prices: UnitPrices::default(),
        }
    }
}

impl EstimatorSettings {
    /// Check that unit prices are usable.
    pub fn validate(&self) -> CalcResult<()> {
        let prices = [
            ("unitPrices.concretePerCubicMeter", self.unit_prices.concrete_per_cubic_meter),
            ("unitPrices.steelPerKg", self.unit_prices.steel_per_kg),
        ];
        for (field, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Price must be positive"));
            }
        }
        Ok(())
    }
}

/// Save settings with atomic write semantics.
///
/// The save process:
/// 1. Serialize settings to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp to the target path
pub fn save_settings(settings: &EstimatorSettings, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(settings)?;

    let tmp_path = path.with_extension("json.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), "Saved estimator settings");
    Ok(())
}

/// Load settings from a file.
///
/// # Returns
///
/// * `Ok(EstimatorSettings)` - Successfully loaded and validated
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_settings(path: &Path) -> CalcResult<EstimatorSettings> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let settings: EstimatorSettings =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&settings.version)?;
    settings.validate()?;

    debug!(
        path = %path.display(),
        variant = settings.variant.code(),
        "Loaded estimator settings"
    );
    Ok(settings)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x, a newer minor may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}
