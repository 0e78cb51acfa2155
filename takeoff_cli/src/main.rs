//! # Takeoff CLI
//!
//! Terminal front end for the quantity takeoff and cost estimation engine.
//!
//! ## Commands
//!
//! - `concrete`: concrete volumes from project geometry
//! - `steel`: reinforcement weight from a concrete volume
//! - `cost`: cost breakdown from quantities and prices
//! - `estimate`: all three in sequence, optionally as a priced report
//! - `request`: replay an endpoint call (`POST /calculations/...`) with a JSON body
//! - `init-config`: write a settings file with the current settings
//! - `interactive`: prompt for parameters and print a report
//!
//! Settings precedence: `--variant` flag, then `--config` file, then defaults.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use takeoff_core::calculations::FormulaVariant;
use takeoff_core::{load_settings, EstimatorSettings};

mod commands;
mod error;

use error::CliExitCode;

/// Takeoff - concrete, steel and cost estimates for building projects
#[derive(Parser)]
#[command(name = "takeoff")]
#[command(version)]
#[command(about = "Quantity takeoff and cost estimation for construction projects")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Formula variant (A or B); overrides the settings file
    #[arg(long, global = true, value_parser = commands::parse_variant)]
    variant: Option<FormulaVariant>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate concrete volumes per structural element
    Concrete(commands::GeometryArgs),
    /// Estimate reinforcement steel weight
    Steel(commands::SteelArgs),
    /// Estimate cost from quantities and unit prices
    Cost(commands::CostArgs),
    /// Run concrete, steel and cost in sequence
    Estimate(commands::EstimateArgs),
    /// Send a JSON body to a calculation endpoint
    Request(commands::RequestArgs),
    /// Write a settings file
    InitConfig(commands::InitConfigArgs),
    /// Prompt for project parameters
    Interactive,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let settings = match resolve_settings(cli.config.as_deref(), cli.variant) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return CliExitCode::from(&e).into();
        }
    };
    debug!(variant = settings.variant.code(), "Using estimator settings");

    let exit_code = match cli.command {
        Commands::Concrete(args) => commands::concrete_command(args, &settings),
        Commands::Steel(args) => commands::steel_command(args, &settings),
        Commands::Cost(args) => commands::cost_command(args, &settings),
        Commands::Estimate(args) => commands::estimate_command(args, &settings),
        Commands::Request(args) => commands::request_command(args, &settings),
        Commands::InitConfig(args) => commands::init_config_command(args, &settings),
        Commands::Interactive => commands::interactive_command(&settings),
    };

    exit_code.into()
}

/// Flag > file > default.
fn resolve_settings(
    config: Option<&std::path::Path>,
    variant: Option<FormulaVariant>,
) -> takeoff_core::CalcResult<EstimatorSettings> {
    let mut settings = match config {
        Some(path) => load_settings(path)?,
        None => EstimatorSettings::default(),
    };
    if let Some(variant) = variant {
        settings.variant = variant;
    }
    Ok(settings)
}
