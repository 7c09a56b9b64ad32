//! RSI Mean-Reversion Strategy.
//!
//! Enters while RSI sits strictly below the oversold level and exits while
//! it sits strictly above the overbought level.

use folio_core::{
    error::StrategyError,
    traits::{Indicator, Strategy, StrategyConfig},
    types::{IndicatorFrame, SignalType},
};
use folio_indicators::Rsi;
use serde::{Deserialize, Serialize};

use crate::MAX_PERIOD;

const RSI: &str = "rsi";

/// Configuration for the RSI strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    /// RSI calculation period
    pub period: usize,
    /// Oversold threshold (enter below this)
    pub oversold: f64,
    /// Overbought threshold (exit above this)
    pub overbought: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

impl StrategyConfig for RsiConfig {
    fn validate(&self) -> Result<(), StrategyError> {
        if self.period < 2 {
            return Err(StrategyError::InvalidConfig(
                "RSI period must be at least 2".into(),
            ));
        }
        if self.period > MAX_PERIOD {
            return Err(StrategyError::InvalidConfig(format!(
                "RSI period must be at most {MAX_PERIOD}"
            )));
        }
        if self.overbought <= self.oversold {
            return Err(StrategyError::InvalidConfig(
                "Overbought must be greater than oversold".into(),
            ));
        }
        if self.overbought > 100.0 || self.oversold < 0.0 {
            return Err(StrategyError::InvalidConfig(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// RSI Mean-Reversion Strategy.
pub struct RsiStrategy {
    config: RsiConfig,
    rsi: Rsi,
}

impl RsiStrategy {
    /// Create a new RSI strategy.
    pub fn new(config: RsiConfig) -> Self {
        let rsi = Rsi::new(config.period);
        Self { config, rsi }
    }

    pub fn config(&self) -> &RsiConfig {
        &self.config
    }
}

impl Strategy for RsiStrategy {
    fn name(&self) -> &str {
        "RSI Strategy"
    }

    fn description(&self) -> &str {
        "Buys oversold RSI readings and sells overbought ones"
    }

    // The first RSI reading lands at `period`; evaluation begins one bar later.
    fn warmup_period(&self) -> usize {
        self.config.period.saturating_add(1)
    }

    fn indicators(&self, closes: &[f64]) -> IndicatorFrame {
        IndicatorFrame::new().with(RSI, self.rsi.calculate(closes))
    }

    fn signal_at(&self, _closes: &[f64], frame: &IndicatorFrame, index: usize) -> Option<SignalType> {
        let rsi = frame.value(RSI, index)?;

        if rsi < self.config.oversold {
            Some(SignalType::Enter)
        } else if rsi > self.config.overbought {
            Some(SignalType::Exit)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::Signal;

    fn frame_with(values: Vec<Option<f64>>) -> IndicatorFrame {
        IndicatorFrame::new().with(RSI, values)
    }

    #[test]
    fn test_config_validation() {
        let mut config = RsiConfig::default();
        assert!(config.validate().is_ok());

        config.overbought = 30.0;
        config.oversold = 70.0;
        assert!(config.validate().is_err());

        let config = RsiConfig {
            period: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RsiConfig {
            period: usize::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_oversold_boundary_is_strict() {
        let strategy = RsiStrategy::new(RsiConfig::default());
        let frame = frame_with(vec![Some(30.0), Some(29.999)]);

        assert_eq!(strategy.signal_at(&[], &frame, 0), None);
        assert_eq!(strategy.signal_at(&[], &frame, 1), Some(SignalType::Enter));
    }

    #[test]
    fn test_series_with_rsi_exactly_oversold_does_not_enter() {
        let strategy = RsiStrategy::new(RsiConfig::default());
        // window ending at bar 15: seven -1 moves, three +1 moves, four flat (RSI 30)
        // bar 16 swaps a -1 for a -1.5 (RSI about 28.57)
        let closes = vec![
            100.0, 100.0, 99.0, 98.0, 97.0, 96.0, 95.0, 94.0, 93.0, 94.0, 95.0, 96.0, 96.0, 96.0,
            96.0, 96.0, 94.5,
        ];

        let frame = strategy.indicators(&closes);
        assert_eq!(frame.value(RSI, 15), Some(30.0));
        assert!(frame.value(RSI, 16).unwrap() < 30.0);

        let signals = strategy.evaluate(&closes, &frame);
        assert_eq!(signals, vec![Signal::enter(16)]);
    }

    #[test]
    fn test_overbought_boundary_is_strict() {
        let strategy = RsiStrategy::new(RsiConfig::default());
        let frame = frame_with(vec![Some(70.0), Some(70.001)]);

        assert_eq!(strategy.signal_at(&[], &frame, 0), None);
        assert_eq!(strategy.signal_at(&[], &frame, 1), Some(SignalType::Exit));
    }

    #[test]
    fn test_warmup_reading_is_not_zero() {
        let strategy = RsiStrategy::new(RsiConfig::default());
        let frame = frame_with(vec![None]);

        assert_eq!(strategy.signal_at(&[], &frame, 0), None);
    }

    #[test]
    fn test_decline_then_rally() {
        let strategy = RsiStrategy::new(RsiConfig {
            period: 3,
            ..Default::default()
        });
        // steady decline drives RSI to 0, a steady rally drives it near 100
        let closes = vec![20.0, 19.0, 18.0, 17.0, 16.0, 17.0, 18.0, 19.0, 20.0];

        let frame = strategy.indicators(&closes);
        let signals = strategy.evaluate(&closes, &frame);

        assert_eq!(signals.first(), Some(&Signal::enter(4)));
        assert_eq!(signals.last(), Some(&Signal::exit(8)));
    }
}
