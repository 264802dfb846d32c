//! CLI module for nutripsych
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `enrich` - Run AI predictions over a JSON file of food records
//! - `config` - Configuration utilities (init)
//!
//! # Example
//!
//! ```bash
//! # Predict brain nutrients and impacts, writing results to a new file
//! nutripsych enrich --foods foods.json --tasks nutrients,impacts -o enriched.json
//!
//! # Write a starter configuration
//! nutripsych config init
//! ```

pub mod config;
pub mod enrich;
pub mod output;

pub use config::handle_config_init;
pub use enrich::run_enrich;

use crate::enrich::EnrichTask;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// nutripsych - AI enrichment for a nutritional psychiatry food database
#[derive(Parser, Debug)]
#[command(
    name = "nutripsych",
    version,
    about = "Predict brain nutrients and mental-health impacts for foods"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enrich food records with AI predictions
    Enrich(EnrichArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct EnrichArgs {
    /// JSON file holding an array of food records
    #[arg(short, long)]
    pub foods: PathBuf,

    /// Where to write the enriched records (defaults to the input file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Predictions to run
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_values_t = EnrichTask::ALL
    )]
    pub tasks: Vec<EnrichTask>,

    /// Path to configuration file
    #[arg(short, long, default_value = "nutripsych.toml")]
    pub config: PathBuf,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NUTRIPSYCH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Foods enriched at the same time
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "nutripsych.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}
