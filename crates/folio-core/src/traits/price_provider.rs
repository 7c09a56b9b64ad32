//! Price provider trait definition.

use crate::error::DataError;
use crate::types::PricePoint;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Source of daily closing prices.
///
/// Implementations must return an ordered, dense series: one entry per
/// weekday in `[start, end]` (inclusive), strictly increasing dates, closes
/// rounded to cents. An inverted range yields an empty series, not an error.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily closes for `symbol` over the date range.
    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Fixed(Vec<PricePoint>);

    #[async_trait]
    impl PriceProvider for Fixed {
        async fn daily_closes(
            &self,
            _symbol: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<PricePoint>, DataError> {
            Ok(self
                .0
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_provider_object_safety() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let provider: Box<dyn PriceProvider> = Box::new(Fixed(vec![PricePoint::new(day, dec!(100))]));

        let prices = provider.daily_closes("SPY", day, day).await.unwrap();
        assert_eq!(prices.len(), 1);

        let inverted = provider
            .daily_closes("SPY", day, day.pred_opt().unwrap())
            .await
            .unwrap();
        assert!(inverted.is_empty());
    }
}
