//! Moving Average Crossover Strategy.
//!
//! Generates entry signals when the fast SMA crosses above the slow SMA,
//! and exit signals when the fast SMA crosses below the slow SMA.

use folio_core::{
    error::StrategyError,
    traits::{Indicator, Strategy, StrategyConfig},
    types::{IndicatorFrame, SignalType},
};
use folio_indicators::Sma;
use serde::{Deserialize, Serialize};

use crate::MAX_PERIOD;

const FAST_MA: &str = "fast_ma";
const SLOW_MA: &str = "slow_ma";

/// Configuration for the MA Crossover strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MACrossoverConfig {
    /// Fast moving average period
    pub fast_period: usize,
    /// Slow moving average period
    pub slow_period: usize,
}

impl Default for MACrossoverConfig {
    fn default() -> Self {
        Self {
            fast_period: 50,
            slow_period: 200,
        }
    }
}

impl StrategyConfig for MACrossoverConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.fast_period == 0 {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be greater than 0".into(),
            ));
        }
        if self.fast_period >= self.slow_period {
            return Err(StrategyError::InvalidConfig(
                "Fast period must be less than slow period".into(),
            ));
        }
        if self.slow_period > MAX_PERIOD {
            return Err(StrategyError::InvalidConfig(format!(
                "Slow period must be at most {MAX_PERIOD}"
            )));
        }
        Ok(())
    }
}

/// Moving Average Crossover Strategy.
pub struct MACrossoverStrategy {
    config: MACrossoverConfig,
}

impl MACrossoverStrategy {
    /// Create a new MA Crossover strategy.
    pub fn new(config: MACrossoverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MACrossoverConfig {
        &self.config
    }
}

impl Strategy for MACrossoverStrategy {
    fn name(&self) -> &str {
        "MA Crossover"
    }

    fn description(&self) -> &str {
        "Enters when the fast SMA crosses above the slow SMA, exits on the downward cross"
    }

    /// Both averages must be defined on the bar before the first evaluated bar.
    fn warmup_period(&self) -> usize {
        self.config.slow_period.saturating_add(1)
    }

    fn indicators(&self, closes: &[f64]) -> IndicatorFrame {
        IndicatorFrame::new()
            .with(FAST_MA, Sma::new(self.config.fast_period).calculate(closes))
            .with(SLOW_MA, Sma::new(self.config.slow_period).calculate(closes))
    }

    fn signal_at(&self, _closes: &[f64], frame: &IndicatorFrame, index: usize) -> Option<SignalType> {
        let prev = index.checked_sub(1)?;
        let fast = frame.value(FAST_MA, index)?;
        let slow = frame.value(SLOW_MA, index)?;
        let prev_fast = frame.value(FAST_MA, prev)?;
        let prev_slow = frame.value(SLOW_MA, prev)?;

        if fast > slow && prev_fast <= prev_slow {
            Some(SignalType::Enter)
        } else if fast < slow && prev_fast >= prev_slow {
            Some(SignalType::Exit)
        } else {
            None
        }
    }
}
