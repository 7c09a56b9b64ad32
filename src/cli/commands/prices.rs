//! Price series dump.

use anyhow::{Context, Result};
use folio_config::AppConfig;
use folio_core::PriceProvider;
use tracing::info;

use super::price_provider;
use crate::cli::PricesArgs;

pub async fn run(args: PricesArgs, config: &AppConfig) -> Result<()> {
    let provider = price_provider(args.data.as_deref(), config)?;
    let prices = provider
        .daily_closes(&args.symbol, args.start, args.end)
        .await
        .with_context(|| format!("Failed to load prices for {}", args.symbol))?;

    info!(symbol = %args.symbol, bars = prices.len(), provider = provider.name(), "loaded prices");

    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    for point in &prices {
        writer.serialize(point)?;
    }
    writer.flush()?;

    Ok(())
}
