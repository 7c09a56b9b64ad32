//! Validate configuration command.

use anyhow::Result;
use folio_config::AppConfig;
use std::path::Path;

pub fn run(config: &AppConfig, config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("(file not found, checking built-in defaults)");
    }

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Price provider: {:?}", config.data.provider);
    match config.data.seed {
        Some(seed) => println!("Seed: {}", seed),
        None => println!("Seed: random per request"),
    }
    println!("Default capital: {}", config.backtest.default_capital);
    println!("Trade log limit: {}", config.backtest.trade_log_limit);
    println!("Sizing: {:?}", config.backtest.sizing);
    println!("Unknown strategy: {:?}", config.backtest.unknown_strategy);
    for key in config.strategies.keys() {
        println!("Overrides: {}", key);
    }

    Ok(())
}
