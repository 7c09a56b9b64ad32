//! Backtest command implementation.

use anyhow::{bail, Context, Result};
use folio_backtest::{handle_request, BacktestEngine, BacktestRequest};
use folio_config::AppConfig;
use std::path::Path;
use tracing::info;

use super::price_provider;
use crate::cli::{BacktestArgs, OutputFormat};

pub async fn run(args: BacktestArgs, config: &AppConfig) -> Result<()> {
    let provider = price_provider(args.data.as_deref(), config)?;
    let engine = BacktestEngine::new(config.backtest_config(), provider);

    if let Some(path) = &args.request {
        return run_request_file(&engine, path).await;
    }

    let request = build_request(&args, config)?;
    info!("Starting backtest for strategy: {}", request.strategy);

    let report = engine.run(&request).await.context("Backtest failed")?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.result())?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)
            .with_context(|| format!("Failed to write {}", save_path.display()))?;
        info!("Results saved to {:?}", save_path);
    }

    if let Some(ledger_path) = &args.ledger_csv {
        std::fs::write(ledger_path, report.trades_to_csv()?)
            .with_context(|| format!("Failed to write {}", ledger_path.display()))?;
        info!(trades = report.trades().len(), "Ledger saved to {:?}", ledger_path);
    }

    Ok(())
}

/// Feed a JSON request body through the response boundary.
async fn run_request_file(engine: &BacktestEngine, path: &Path) -> Result<()> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request {}", path.display()))?;

    let response = handle_request(engine, &body).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        bail!("Backtest request failed with status {}", response.status());
    }
    Ok(())
}

fn build_request(args: &BacktestArgs, config: &AppConfig) -> Result<BacktestRequest> {
    let (Some(symbol), Some(strategy), Some(start), Some(end)) =
        (&args.symbol, &args.strategy, args.start, args.end)
    else {
        bail!("--symbol, --strategy, --start and --end are required without --request");
    };

    let capital = args.capital.unwrap_or(config.backtest.default_capital);
    let mut request = BacktestRequest::new(symbol.as_str(), strategy.as_str(), start, end, capital);

    if let Some(path) = &args.strategy_config {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read strategy config {}", path.display()))?;
        let params: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("Strategy config {} is not valid JSON", path.display()))?;
        request = request.with_params(params);
    }

    Ok(request)
}
