//! Moving average indicators.

use folio_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values. Each window is
/// summed on its own so long series do not accumulate rounding drift.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len().min(self.period - 1)];
        let period_f64 = self.period as f64;

        result.extend(
            data.windows(self.period)
                .map(|window| Some(window.iter().sum::<f64>() / period_f64)),
        );

        result
    }

    fn warmup_period(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}
