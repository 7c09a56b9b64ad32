//! CLI definitions.

pub mod commands;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Strategy backtesting sandbox")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a backtest
    Backtest(BacktestArgs),
    /// Print the daily closes a backtest would see, as CSV
    Prices(PricesArgs),
    /// List available strategies
    Strategies(StrategiesArgs),
    /// Validate configuration
    ValidateConfig,
    /// Print the default configuration as TOML
    DefaultConfig(DefaultConfigArgs),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Symbol to backtest
    #[arg(short = 'S', long, required_unless_present = "request")]
    pub symbol: Option<String>,

    /// Strategy key (ma_crossover, rsi, momentum)
    #[arg(short, long, required_unless_present = "request")]
    pub strategy: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, required_unless_present = "request")]
    pub start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, required_unless_present = "request")]
    pub end: Option<NaiveDate>,

    /// Initial capital [default: backtest.default_capital]
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// JSON request body file; prints the JSON response payload
    #[arg(long, conflicts_with_all = ["symbol", "strategy", "start", "end", "capital"])]
    pub request: Option<PathBuf>,

    /// Strategy parameter overrides file (JSON)
    #[arg(long)]
    pub strategy_config: Option<PathBuf>,

    /// CSV file or directory, replacing the configured price provider
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Save the full report as JSON
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Write the complete trade ledger as CSV
    #[arg(long)]
    pub ledger_csv: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct PricesArgs {
    /// Symbol
    #[arg(short = 'S', long)]
    pub symbol: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// CSV file or directory, replacing the configured price provider
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct StrategiesArgs {
    /// Print as JSON, including default parameters
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct DefaultConfigArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
