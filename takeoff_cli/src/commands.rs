//! Subcommand arguments and handlers.
//!
//! Every handler prints JSON on stdout and returns an exit code. Diagnostics
//! go to stderr through `tracing`.

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::{error, info};

use takeoff_core::api;
use takeoff_core::calculations::pipeline::{estimate_project, ProjectParameters};
use takeoff_core::calculations::{concrete, cost, steel, ConcreteInput, CostInput, FormulaVariant, SteelInput};
use takeoff_core::{assemble_report, save_settings, CalcError, CalcResult, EstimatorSettings};

use crate::error::CliExitCode;

/// Project geometry flags, shared by `concrete` and `estimate`.
#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Plan area per floor (m²)
    #[arg(long = "area")]
    pub project_area: Option<f64>,

    /// Number of floors
    #[arg(long)]
    pub floors: Option<u32>,

    /// Foundation depth (m)
    #[arg(long)]
    pub foundation_depth: Option<f64>,

    /// Wall thickness (m), required by variant A
    #[arg(long)]
    pub wall_thickness: Option<f64>,

    /// Slab thickness (m), required by variant A
    #[arg(long)]
    pub slab_thickness: Option<f64>,
}

impl From<GeometryArgs> for ConcreteInput {
    fn from(args: GeometryArgs) -> Self {
        ConcreteInput {
            project_area: args.project_area,
            floors: args.floors,
            foundation_depth: args.foundation_depth,
            wall_thickness: args.wall_thickness,
            slab_thickness: args.slab_thickness,
        }
    }
}

#[derive(Args, Debug)]
pub struct SteelArgs {
    /// Concrete volume (m³)
    #[arg(long)]
    pub concrete_volume: Option<f64>,

    /// Below 1: fraction of the concrete volume. 1 or more: kg/m³. Default 80 kg/m³.
    #[arg(long)]
    pub steel_ratio: Option<f64>,
}

#[derive(Args, Debug)]
pub struct CostArgs {
    /// Concrete volume (m³)
    #[arg(long)]
    pub concrete_volume: Option<f64>,

    /// Steel weight (kg)
    #[arg(long)]
    pub steel_weight: Option<f64>,

    /// Price per m³ of concrete (defaults to the configured unit price)
    #[arg(long)]
    pub concrete_price: Option<f64>,

    /// Price per kg of steel (defaults to the configured unit price)
    #[arg(long)]
    pub steel_price: Option<f64>,
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub geometry: GeometryArgs,

    /// Below 1: fraction of the concrete volume. 1 or more: kg/m³.
    #[arg(long)]
    pub steel_ratio: Option<f64>,

    /// Print the priced line-item report instead of the raw estimate
    #[arg(long)]
    pub report: bool,
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Endpoint path, e.g. /calculations/concrete
    pub path: String,

    /// HTTP method
    #[arg(long, default_value = "POST")]
    pub method: String,

    /// JSON body; read from stdin when omitted
    #[arg(long)]
    pub body: Option<String>,
}

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the settings file
    #[arg(default_value = "takeoff.json")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn concrete_command(args: GeometryArgs, settings: &EstimatorSettings) -> CliExitCode {
    let input = ConcreteInput::from(args);
    emit(concrete::estimate(&input, settings.variant))
}

pub fn steel_command(args: SteelArgs, settings: &EstimatorSettings) -> CliExitCode {
    let input = SteelInput {
        concrete_volume: args.concrete_volume,
        steel_ratio: args.steel_ratio,
    };
    emit(steel::estimate(&input, settings.variant))
}

pub fn cost_command(args: CostArgs, settings: &EstimatorSettings) -> CliExitCode {
    let input = CostInput {
        concrete_volume: args.concrete_volume,
        steel_weight: args.steel_weight,
        concrete_price_per_cubic_meter: Some(args.concrete_price.unwrap_or(settings.unit_prices.concrete_per_cubic_meter)),
        steel_price_per_kg: Some(args.steel_price.unwrap_or(settings.unit_prices.steel_per_kg)),
    };
    emit(cost::estimate(&input, settings.variant))
}

pub fn estimate_command(args: EstimateArgs, settings: &EstimatorSettings) -> CliExitCode {
    let params = ProjectParameters {
        geometry: args.geometry.into(),
        steel_ratio: args.steel_ratio,
    };
    let estimate = estimate_project(&params, &settings.unit_prices, settings.variant);
    if args.report {
        emit(estimate.map(|e| assemble_report(&e, &settings.unit_prices)))
    } else {
        emit(estimate)
    }
}

pub fn request_command(args: RequestArgs, settings: &EstimatorSettings) -> CliExitCode {
    let body = match args.body {
        Some(body) => body,
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                error!("Failed to read request body from stdin: {e}");
                return CliExitCode::Failed;
            }
            buf
        }
    };

    let response = api::dispatch(&args.method, &args.path, &body, settings.variant);
    info!(status = response.status, path = %args.path, "Request handled");
    print_json(&response);
    CliExitCode::from(&response)
}

pub fn init_config_command(args: InitConfigArgs, settings: &EstimatorSettings) -> CliExitCode {
    if args.path.exists() && !args.force {
        eprintln!("{} already exists (use --force to overwrite)", args.path.display());
        return CliExitCode::Rejected;
    }
    match save_settings(settings, &args.path) {
        Ok(()) => {
            print_json(settings);
            CliExitCode::Success
        }
        Err(e) => report_error(&e),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

/// Ask for the project parameters one by one and print the report.
pub fn interactive_command(settings: &EstimatorSettings) -> CliExitCode {
    println!("Takeoff - Quantity and Cost Estimator (variant {})", settings.variant.code());
    println!("=====================================================");
    println!();

    let area = prompt_f64("Plan area per floor (m²) [100.0]: ", 100.0);
    let floors = prompt_f64("Floors [2]: ", 2.0);
    let foundation_depth = prompt_f64("Foundation depth (m) [0.5]: ", 0.5);
    let wall_thickness = prompt_f64("Wall thickness (m) [0.2]: ", 0.2);
    let slab_thickness = prompt_f64("Slab thickness (m) [0.15]: ", 0.15);
    let steel_ratio = prompt_f64("Steel ratio (<1 fraction, >=1 kg/m³) [80]: ", 80.0);

    if floors < 1.0 || floors.fract() != 0.0 || floors > u32::MAX as f64 {
        return report_error(&CalcError::invalid_input(
            "floors",
            floors.to_string(),
            "Floors must be a whole number of at least 1",
        ));
    }

    let params = ProjectParameters {
        geometry: ConcreteInput::new(area, floors as u32, foundation_depth, wall_thickness, slab_thickness),
        steel_ratio: Some(steel_ratio),
    };

    let estimate = match estimate_project(&params, &settings.unit_prices, settings.variant) {
        Ok(estimate) => estimate,
        Err(e) => return report_error(&e),
    };

    let report = assemble_report(&estimate, &settings.unit_prices);
    println!();
    println!("═══════════════════════════════════════");
    println!("  ESTIMATE");
    println!("═══════════════════════════════════════");
    for item in &report.line_items {
        match (item.quantity, &item.unit) {
            (Some(q), Some(unit)) => println!("  {:<24} {:>12.2} {:<3} {:>14.2}", item.description, q, unit, item.amount),
            _ => println!("  {:<24} {:>31.2}", item.description, item.amount),
        }
    }
    println!("───────────────────────────────────────");
    println!("  {:<24} {:>31.2}", "TOTAL", report.grand_total);
    println!("═══════════════════════════════════════");
    CliExitCode::Success
}

/// Resolve the variant flag. Unknown codes are a usage error.
pub fn parse_variant(code: &str) -> Result<FormulaVariant, String> {
    FormulaVariant::from_code(code).ok_or_else(|| format!("unknown variant '{code}' (expected A or B)"))
}

fn emit<T: Serialize>(result: CalcResult<T>) -> CliExitCode {
    match result {
        Ok(value) => {
            print_json(&value);
            CliExitCode::Success
        }
        Err(e) => report_error(&e),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize output: {e}"),
    }
}

fn report_error(err: &CalcError) -> CliExitCode {
    eprintln!("Error: {}", err);
    if let Ok(json) = serde_json::to_string_pretty(err) {
        eprintln!("{}", json);
    }
    CliExitCode::from(err)
}
