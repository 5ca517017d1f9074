//! CLI argument parsing for Costar

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for cost analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// Enriched-table CSV for spreadsheet analysis
    Csv,
    /// Self-contained HTML report
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "costar")]
#[command(version)]
#[command(about = "Serverless function cost analyzer", long_about = None)]
pub struct Cli {
    /// Telemetry CSV to analyze
    pub input: PathBuf,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Rows shown in the ranking and prediction previews
    #[arg(long = "top", value_name = "N", default_value = "20")]
    pub top: usize,

    /// TOML file overriding the classification thresholds
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only analyze functions whose name matches this regex
    #[arg(long = "filter-function", value_name = "REGEX")]
    pub filter_function: Option<String>,

    /// Only analyze functions in this environment (exact match)
    #[arg(short = 'e', long = "environment", value_name = "ENV")]
    pub environment: Option<String>,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
