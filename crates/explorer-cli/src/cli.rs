//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use explorer_core::TypeFilter;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Reusable simulation arguments
#[derive(Debug, Clone, Args)]
pub struct SimulationArgs {
    /// Random seed for a reproducible run, or use EXPLORER_SEED env var
    #[arg(short, long, env = "EXPLORER_SEED")]
    pub seed: Option<u64>,

    /// Only show sensors of this type (rain, gas, microphone, camera, ultrasonic, all)
    #[arg(short = 't', long = "type", default_value = "all")]
    pub sensor_type: TypeFilter,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format (defaults to the config file value, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Parser)]
#[command(name = "explorer")]
#[command(author, version, about = "CLI for the explorer vehicle sensor simulation", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output (any NO_COLOR value other than 0/false/no/off)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the initial sensor set
    Read {
        #[command(flatten)]
        sim: SimulationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the simulation and print every tick
    Watch {
        /// Seconds between ticks, 1-60 (defaults to the config file value, then 5)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Number of ticks to print (0 for unlimited)
        #[arg(short = 'n', long, default_value = "0")]
        count: u32,

        #[command(flatten)]
        sim: SimulationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Classify a value against a measurement range
    Classify {
        /// Value to classify
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Lower bound of the range
        #[arg(long, allow_negative_numbers = true)]
        min: f64,

        /// Upper bound of the range
        #[arg(long, allow_negative_numbers = true)]
        max: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Count sensors per status
    Summary {
        #[command(flatten)]
        sim: SimulationArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the history window and statistics for one sensor
    History {
        /// Sensor id (e.g. s001)
        id: String,

        /// Random seed for a reproducible run, or use EXPLORER_SEED env var
        #[arg(short, long, env = "EXPLORER_SEED")]
        seed: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file if none exists
    Init,
    /// Set a configuration value (interval, format, no_color, seed)
    Set {
        /// Key to set
        key: String,
        /// Value to store
        value: String,
    },
    /// Clear a configuration value back to its default
    Unset {
        /// Key to clear
        key: String,
    },
}
