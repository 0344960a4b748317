use crate::profile::ProfileKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable summary
    Text,
    /// Machine readable verification report
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sqatt")]
#[command(about = "Metric profiles and risk-quadrant compliance checks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a lines-of-code profile from a metrics CSV
    Profile {
        /// Metrics CSV with one row per measured entity
        input: PathBuf,

        /// Profile to build
        #[arg(short, long, value_enum)]
        kind: ProfileKind,

        /// Column holding the classifying metric
        #[arg(long = "metric-column")]
        metric_column: String,

        /// Column holding the lines of code to accumulate (defaults to the metric itself)
        #[arg(long = "weight-column")]
        weight_column: Option<String>,

        /// Report directory (overrides the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Verify metrics against the thresholds of each component's risk quadrant
    Verify {
        /// CSV mapping components to quadrants (Component, Quadrant)
        #[arg(long)]
        components: PathBuf,

        /// CSV of thresholds per quadrant (Quadrant, <metric>...)
        #[arg(long)]
        thresholds: PathBuf,

        /// Metric CSVs to verify (Component, <metric>)
        #[arg(required = true)]
        metrics: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default .sqatt.toml
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
