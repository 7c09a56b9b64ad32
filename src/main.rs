//! Backtesting sandbox CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use folio_config::load_config;
use folio_monitor::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Flags win over the [logging] section
    let level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.logging.format
    };
    let _guard = setup_logging(&level, format, config.logging.file.as_deref())
        .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Backtest(args) => cli::commands::backtest::run(args, &config).await,
        Commands::Prices(args) => cli::commands::prices::run(args, &config).await,
        Commands::Strategies(args) => cli::commands::strategies::run(args),
        Commands::ValidateConfig => cli::commands::validate::run(&config, &cli.config),
        Commands::DefaultConfig(args) => cli::commands::default_config::run(args),
    }
}
