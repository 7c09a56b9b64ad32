//! Synthetic random-walk price provider.
//!
//! Stands in for a market-data feed. Each weekday's close is the previous
//! close scaled by `1 + (u - 0.48) * 0.02` with `u ~ U(0, 1)`, a walk with a
//! slight upward drift. Closes are rounded to cents; the walk itself carries
//! the unrounded value forward.

use async_trait::async_trait;
use chrono::NaiveDate;
use folio_core::error::DataError;
use folio_core::traits::PriceProvider;
use folio_core::types::PricePoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use tracing::debug;

use crate::calendar::trading_days;

const DRIFT_CENTER: f64 = 0.48;
const DAILY_SCALE: f64 = 0.02;

/// Starting price per symbol, with a fallback for unknown symbols.
#[derive(Debug, Clone)]
pub struct BasePriceTable {
    prices: HashMap<String, Decimal>,
    default_price: Decimal,
}

impl BasePriceTable {
    pub fn new(prices: HashMap<String, Decimal>, default_price: Decimal) -> Self {
        Self {
            prices,
            default_price,
        }
    }

    /// Starting price for `symbol`, or the default when unrecognized.
    pub fn lookup(&self, symbol: &str) -> Decimal {
        self.prices
            .get(symbol)
            .copied()
            .unwrap_or(self.default_price)
    }

    pub fn default_price(&self) -> Decimal {
        self.default_price
    }
}

impl Default for BasePriceTable {
    fn default() -> Self {
        let prices = [
            ("AAPL", dec!(180)),
            ("TSLA", dec!(200)),
            ("NVDA", dec!(500)),
            ("MSFT", dec!(380)),
            ("SPY", dec!(450)),
            ("GOOGL", dec!(140)),
        ]
        .into_iter()
        .map(|(symbol, price)| (symbol.to_string(), price))
        .collect();

        Self::new(prices, dec!(100))
    }
}

/// Seeded random-walk price provider.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    base_prices: BasePriceTable,
    /// `None` draws a fresh entropy seed per request
    seed: Option<u64>,
}

impl SyntheticProvider {
    pub fn new(base_prices: BasePriceTable, seed: Option<u64>) -> Self {
        Self { base_prices, seed }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(BasePriceTable::default(), Some(seed))
    }

    pub fn base_prices(&self) -> &BasePriceTable {
        &self.base_prices
    }

    /// Generate the series for `symbol` over `[start, end]`.
    pub fn generate(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, DataError> {
        let base_price = self
            .base_prices
            .lookup(symbol)
            .to_f64()
            .ok_or_else(|| DataError::Unavailable(format!("invalid base price for {symbol}")))?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(symbol_seed(seed, symbol)),
            None => StdRng::from_entropy(),
        };

        let prices = random_walk(&mut rng, start, end, base_price)?;
        debug!(symbol, bars = prices.len(), base_price, "generated synthetic series");
        Ok(prices)
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(BasePriceTable::default(), Some(42))
    }
}

#[async_trait]
impl PriceProvider for SyntheticProvider {
    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, DataError> {
        self.generate(symbol, start, end)
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

/// Walk from `base_price` across every weekday in `[start, end]`.
pub fn random_walk<R: Rng>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
    base_price: f64,
) -> Result<Vec<PricePoint>, DataError> {
    let mut price = base_price;

    trading_days(start, end)
        .map(|date| -> Result<PricePoint, DataError> {
            let u: f64 = rng.gen();
            price *= 1.0 + (u - DRIFT_CENTER) * DAILY_SCALE;
            Ok(PricePoint::new(date, round_to_cents(price)?))
        })
        .collect()
}

fn round_to_cents(price: f64) -> Result<Decimal, DataError> {
    // Half-up on the f64 value before converting.
    let cents = (price * 100.0).round() / 100.0;
    Decimal::try_from(cents)
        .map(|d| d.round_dp(2))
        .map_err(|e| DataError::Unavailable(format!("price out of range: {e}")))
}

// FNV-1a over the symbol, folded into the configured seed.
fn symbol_seed(seed: u64, symbol: &str) -> u64 {
    let hash = symbol.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    seed ^ hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::closes;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_seed_same_series() {
        let provider = SyntheticProvider::with_seed(7);
        let a = provider.generate("AAPL", date(2023, 1, 1), date(2024, 1, 1)).unwrap();
        let b = provider.generate("AAPL", date(2023, 1, 1), date(2024, 1, 1)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_symbols_get_distinct_walks() {
        let provider = SyntheticProvider::new(
            BasePriceTable::new(HashMap::new(), dec!(100)),
            Some(7),
        );
        let a = provider.generate("AAA", date(2023, 1, 1), date(2023, 3, 1)).unwrap();
        let b = provider.generate("BBB", date(2023, 1, 1), date(2023, 3, 1)).unwrap();

        assert_ne!(closes(&a), closes(&b));
    }

    #[test]
    fn test_series_is_dense_and_rounded() {
        let provider = SyntheticProvider::with_seed(1);
        let prices = provider.generate("NVDA", date(2023, 1, 1), date(2023, 12, 31)).unwrap();

        assert_eq!(prices.len(), 260);
        assert!(prices.windows(2).all(|w| w[0].date < w[1].date));
        assert!(prices.iter().all(|p| crate::is_trading_day(p.date)));
        assert!(prices.iter().all(|p| p.close > Decimal::ZERO && p.close.scale() <= 2));
    }

    #[test]
    fn test_first_step_stays_near_base() {
        let provider = SyntheticProvider::with_seed(3);
        let prices = provider.generate("MSFT", date(2024, 1, 2), date(2024, 1, 2)).unwrap();

        assert_eq!(prices.len(), 1);
        // one step moves at most ~1.04%
        let first = prices[0].close_f64();
        assert!((first - 380.0).abs() <= 380.0 * 0.0105);
    }

    #[test]
    fn test_unknown_symbol_uses_default_base() {
        let table = BasePriceTable::default();

        assert_eq!(table.lookup("SPY"), dec!(450));
        assert_eq!(table.lookup("ZZZZ"), dec!(100));
    }

    #[test]
    fn test_empty_ranges() {
        let provider = SyntheticProvider::default();

        assert!(provider.generate("SPY", date(2024, 1, 6), date(2024, 1, 7)).unwrap().is_empty());
        assert!(provider.generate("SPY", date(2024, 2, 1), date(2024, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_round_to_cents_half_up() {
        assert_eq!(round_to_cents(100.125).unwrap(), dec!(100.13));
        assert_eq!(round_to_cents(99.994).unwrap(), dec!(99.99));
    }

    #[tokio::test]
    async fn test_provider_trait() {
        let provider = SyntheticProvider::default();
        let prices = provider
            .daily_closes("TSLA", date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();

        assert_eq!(prices.len(), 23);
        assert_eq!(provider.name(), "synthetic");
    }
}
