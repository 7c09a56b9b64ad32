//! Daily closing-price data.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day's closing price.
///
/// Series of price points are ordered by strictly increasing `date` and
/// contain weekdays only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day
    pub date: NaiveDate,
    /// Closing price, rounded to cents
    pub close: Decimal,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }

    /// Closing price as `f64` for indicator math.
    #[inline]
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(0.0)
    }
}

/// Extract close prices as a vector.
pub fn closes(prices: &[PricePoint]) -> Vec<f64> {
    prices.iter().map(PricePoint::close_f64).collect()
}
