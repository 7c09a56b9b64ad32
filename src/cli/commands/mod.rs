//! CLI command implementations.

pub mod backtest;
pub mod default_config;
pub mod prices;
pub mod strategies;
pub mod validate;

use anyhow::{Context, Result};
use folio_config::AppConfig;
use folio_core::PriceProvider;
use folio_data::CsvPriceProvider;
use std::path::Path;
use std::sync::Arc;

/// Price provider for a command: `--data` if given, else the configured one.
fn price_provider(data: Option<&Path>, config: &AppConfig) -> Result<Arc<dyn PriceProvider>> {
    match data {
        Some(path) => {
            let provider = CsvPriceProvider::new(path).with_context(|| {
                format!(
                    "Data path '{}' is not usable. Provide a CSV file or a directory of {{SYMBOL}}.csv files",
                    path.display()
                )
            })?;
            Ok(Arc::new(provider))
        }
        None => config
            .data
            .price_provider()
            .context("Failed to build the configured price provider"),
    }
}
