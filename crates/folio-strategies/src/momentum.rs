//! Momentum Strategy.
//!
//! Uses the rate of change over a fixed lookback. Enters when momentum is
//! strongly positive and exits once it turns sufficiently negative.

use folio_core::{
    error::StrategyError,
    traits::{Indicator, Strategy, StrategyConfig},
    types::{IndicatorFrame, SignalType},
};
use folio_indicators::RateOfChange;
use serde::{Deserialize, Serialize};

use crate::MAX_PERIOD;

const MOMENTUM: &str = "momentum";

/// Configuration for the Momentum strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Momentum lookback in bars
    pub lookback: usize,
    /// Enter when momentum is above this fraction
    pub entry_threshold: f64,
    /// Exit when momentum is below this fraction
    pub exit_threshold: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            lookback: 20,
            entry_threshold: 0.05,  // +5%
            exit_threshold: -0.03, // -3%
        }
    }
}

impl StrategyConfig for MomentumConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.lookback == 0 {
            return Err(StrategyError::InvalidConfig(
                "Momentum lookback must be greater than 0".into(),
            ));
        }
        if self.lookback > MAX_PERIOD {
            return Err(StrategyError::InvalidConfig(format!(
                "Momentum lookback must be at most {MAX_PERIOD}"
            )));
        }
        if self.exit_threshold >= self.entry_threshold {
            return Err(StrategyError::InvalidConfig(
                "Exit threshold must be below entry threshold".into(),
            ));
        }
        Ok(())
    }
}

/// Momentum Strategy.
pub struct MomentumStrategy {
    config: MomentumConfig,
}

impl MomentumStrategy {
    /// Create a new Momentum strategy.
    pub fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MomentumConfig {
        &self.config
    }
}

impl Strategy for MomentumStrategy {
    fn name(&self) -> &str {
        "Momentum"
    }

    fn description(&self) -> &str {
        "Follows strong trends using the 20-bar rate of change"
    }

    fn warmup_period(&self) -> usize {
        self.config.lookback
    }

    fn indicators(&self, closes: &[f64]) -> IndicatorFrame {
        IndicatorFrame::new().with(
            MOMENTUM,
            RateOfChange::new(self.config.lookback).calculate(closes),
        )
    }

    fn signal_at(&self, _closes: &[f64], frame: &IndicatorFrame, index: usize) -> Option<SignalType> {
        let momentum = frame.value(MOMENTUM, index)?;

        if momentum > self.config.entry_threshold {
            Some(SignalType::Enter)
        } else if momentum < self.config.exit_threshold {
            Some(SignalType::Exit)
        } else {
            None
        }
    }
}
