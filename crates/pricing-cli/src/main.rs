mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use pricing_core::analytics::InteractionSink;

use commands::presets::PresetCommand;
use commands::roi::RoiArgs;
use commands::tiers::{ListTiersArgs, SelectTierArgs};
use commands::tri_pillar::TriPillarArgs;

/// Pricing tier selection and ROI projections
#[derive(Parser)]
#[command(
    name = "roical",
    version,
    about = "Pricing tier selection and ROI projections",
    long_about = "A CLI for the calculators behind the platform's plan page: ordered tier \
                  lookup, dispute-deflection ROI, and the three-pillar savings model, all \
                  computed with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Emit one interaction-tracking event per invocation to stderr
    #[arg(long, global = true)]
    track: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project dispute-deflection savings for a plan
    Roi(RoiArgs),
    /// Run the three-pillar savings model
    TriPillar(TriPillarArgs),
    /// Pick the tier covering a monthly transaction volume
    SelectTier(SelectTierArgs),
    /// List the active tier catalog
    Tiers(ListTiersArgs),
    /// Save, load, list, or delete calculator presets
    #[command(subcommand)]
    Preset(PresetCommand),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let (event, result): (&str, Result<serde_json::Value, Box<dyn std::error::Error>>) =
        match cli.command {
            Commands::Roi(args) => ("roi_calculated", commands::roi::run_roi(args)),
            Commands::TriPillar(args) => (
                "tri_pillar_calculated",
                commands::tri_pillar::run_tri_pillar(args),
            ),
            Commands::SelectTier(args) => ("tier_selected", commands::tiers::run_select_tier(args)),
            Commands::Tiers(args) => ("tiers_listed", commands::tiers::run_list_tiers(args)),
            Commands::Preset(command) => ("preset_managed", commands::presets::run_preset(command)),
            Commands::Version => {
                println!("roical {}", env!("CARGO_PKG_VERSION"));
                return;
            }
        };

    match result {
        Ok(value) => {
            if cli.track {
                telemetry::StderrSink.track_interaction(event, &value);
            }
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
