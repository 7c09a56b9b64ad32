//! Momentum indicators.

use folio_core::traits::Indicator;

/// Relative strength assigned when the window has no losses.
///
/// Keeps RSI finite (just under 100) instead of dividing by zero.
const RS_WITHOUT_LOSSES: f64 = 100.0;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
///
/// Uses simple averages over the trailing window of `period` day-over-day
/// changes ending at each bar, not Wilder's smoothing.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn value_at(&self, data: &[f64], index: usize) -> f64 {
        let window = &data[index - self.period..=index];
        let period_f64 = self.period as f64;

        let (gains, losses) = window
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .fold((0.0, 0.0), |(gains, losses), change| {
                if change > 0.0 {
                    (gains + change, losses)
                } else if change < 0.0 {
                    (gains, losses + change)
                } else {
                    (gains, losses)
                }
            });

        let avg_gain = gains / period_f64;
        let avg_loss = losses.abs() / period_f64;

        let rs = if avg_loss == 0.0 {
            RS_WITHOUT_LOSSES
        } else {
            avg_gain / avg_loss
        };

        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        (0..data.len())
            .map(|i| (i >= self.period).then(|| self.value_at(data, i)))
            .collect()
    }

    fn warmup_period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// Rate of change over a fixed lookback: `(close[i] - close[i-n]) / close[i-n]`.
#[derive(Debug, Clone)]
pub struct RateOfChange {
    lookback: usize,
}

impl RateOfChange {
    pub fn new(lookback: usize) -> Self {
        assert!(lookback > 0, "Lookback must be greater than 0");
        Self { lookback }
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }
}

impl Indicator for RateOfChange {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        (0..data.len())
            .map(|i| {
                if i < self.lookback {
                    return None;
                }
                let past = data[i - self.lookback];
                (past != 0.0).then(|| (data[i] - past) / past)
            })
            .collect()
    }

    fn warmup_period(&self) -> usize {
        self.lookback
    }

    fn name(&self) -> &str {
        "ROC"
    }
}
