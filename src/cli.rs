use crate::detectors::AnalyzerKind;
pub use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "claimguard")]
#[command(about = "Rule-based risk pattern detection for warranty claims", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every detector over a claims file and print a report
    Analyze {
        /// Claims file (.csv or .json)
        path: PathBuf,

        /// Output format (defaults to the config file's, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Configuration file (defaults to .claimguard.toml discovery)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Run the detectors concurrently
        #[arg(long)]
        parallel: bool,

        /// Disable colors and box-drawing characters
        #[arg(long)]
        plain: bool,

        /// Rows shown per detector in the terminal report
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Write one detector's flagged claims as delimited text
    Export {
        /// Claims file (.csv or .json)
        path: PathBuf,

        /// Detector whose findings are exported
        #[arg(short, long, value_enum)]
        analyzer: AnalyzerKind,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (defaults to the config file's, then ',')
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Export per-group statistics instead of flagged claims
        #[arg(long)]
        stats: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Configuration file (defaults to .claimguard.toml discovery)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Detection threshold overrides. Each falls back to the config file and
/// then to the built-in default when not given.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ThresholdArgs {
    /// Minimum claims on one VIN to flag it
    #[arg(long, env = "VIN_THRESHOLD")]
    pub vin_threshold: Option<usize>,

    /// Standard deviations above the mean for a high-dollar claim
    #[arg(long, env = "DOLLAR_THRESHOLD")]
    pub dollar_threshold: Option<f64>,

    /// Window in days for repeat claims on one VIN
    #[arg(long, env = "DAYS_THRESHOLD")]
    pub days_threshold: Option<u32>,

    /// Claim count at which a dealer is flagged
    #[arg(long, env = "DEALER_COUNT_THRESHOLD")]
    pub dealer_count_threshold: Option<usize>,

    /// Multiple of the portfolio mean at which a dealer is flagged
    #[arg(long, env = "DEALER_AMOUNT_MULTIPLIER")]
    pub dealer_amount_multiplier: Option<f64>,
}

impl ThresholdArgs {
    /// The given overrides as a settings table.
    pub fn to_value(&self) -> Value {
        let mut table = Map::new();
        if let Some(v) = self.vin_threshold {
            table.insert("vin_threshold".into(), v.into());
        }
        if let Some(v) = self.dollar_threshold {
            table.insert("dollar_threshold".into(), v.into());
        }
        if let Some(v) = self.days_threshold {
            table.insert("days_threshold".into(), v.into());
        }
        if let Some(v) = self.dealer_count_threshold {
            table.insert("dealer_count_threshold".into(), v.into());
        }
        if let Some(v) = self.dealer_amount_multiplier {
            table.insert("dealer_amount_multiplier".into(), v.into());
        }
        Value::Object(table)
    }
}
