//! CLI argument definitions for the crop yield tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crop-yield",
    version,
    about = "Crop yield consolidation, prediction, and recommendation",
    long_about = "Consolidate raw FAO yield, pesticide, rainfall, and temperature tables \
                  into a single modeling table, and query a fitted pipeline for yield \
                  predictions and crop rankings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: crop-yield.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean and fuse the raw tables into one consolidated CSV.
    Consolidate(ConsolidateArgs),

    /// Check a consolidated CSV and list its problems.
    Validate(ValidateArgs),

    /// Predict the yield of one crop.
    Predict(PredictArgs),

    /// Rank candidate crops by predicted yield.
    Recommend(RecommendArgs),

    /// Show what the loaded model supports.
    Info(InfoArgs),
}

#[derive(Args)]
pub struct ConsolidateArgs {
    /// Directory holding the raw CSV files (default: data.raw_dir).
    #[arg(long = "raw-dir", value_name = "DIR")]
    pub raw_dir: Option<PathBuf>,

    /// Consolidated CSV to write (default: <data.processed_dir>/consolidated.csv).
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Add temp_category, rainfall_category, log_pesticides, and
    /// temp_rain_interaction columns.
    #[arg(long = "with-features")]
    pub with_features: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Consolidated CSV to check (default: <data.processed_dir>/consolidated.csv).
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Environmental inputs shared by `predict` and `recommend`.
#[derive(Args)]
pub struct EnvironmentArgs {
    #[arg(long = "country")]
    pub country: String,

    /// Annual rainfall in millimetres.
    #[arg(long = "rainfall", allow_negative_numbers = true)]
    pub rainfall: f64,

    /// Pesticide use in tonnes.
    #[arg(long = "pesticides", allow_negative_numbers = true)]
    pub pesticides: f64,

    /// Average temperature in degrees Celsius.
    #[arg(long = "temp", allow_negative_numbers = true)]
    pub temp: f64,
}

/// Model location overrides shared by the inference commands.
#[derive(Args)]
pub struct ModelArgs {
    /// Pipeline artifact (default: model.artifact).
    #[arg(long = "model", value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Metadata document (default: model.metadata).
    #[arg(long = "metadata", value_name = "FILE")]
    pub metadata: Option<PathBuf>,
}

#[derive(Args)]
pub struct PredictArgs {
    #[arg(long = "crop")]
    pub crop: String,

    #[command(flatten)]
    pub environment: EnvironmentArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Print the response as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct RecommendArgs {
    #[command(flatten)]
    pub environment: EnvironmentArgs,

    /// Number of crops to return.
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Candidate crops (default: every supported crop).
    #[arg(long = "crops", value_name = "CROP", num_args = 1..)]
    pub crops: Vec<String>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Print the response as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
