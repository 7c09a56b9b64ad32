//! Strategy trait definitions.

use crate::error::StrategyError;
use crate::types::{IndicatorFrame, Signal, SignalType};

/// Configuration trait for strategies.
pub trait StrategyConfig: Send + Sync + Clone + 'static {
    /// Validate the configuration.
    fn validate(&self) -> Result<(), StrategyError>;
}

/// Core strategy trait.
///
/// A strategy is a pure policy over a closing-price series: it computes the
/// indicators it needs, then decides per bar whether to request an entry or
/// an exit. It never sees portfolio state; the simulator decides whether a
/// signal is actionable.
pub trait Strategy: Send + Sync {
    /// Get the unique name of this strategy.
    fn name(&self) -> &str;

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }

    /// First bar index at which the strategy may emit signals.
    fn warmup_period(&self) -> usize;

    /// Compute the indicator series this strategy reads.
    fn indicators(&self, closes: &[f64]) -> IndicatorFrame;

    /// Decide the action for a single bar.
    ///
    /// Called only for `index >= warmup_period()`. At most one action per bar.
    fn signal_at(&self, closes: &[f64], frame: &IndicatorFrame, index: usize) -> Option<SignalType>;

    /// Evaluate every bar in ascending index order.
    fn evaluate(&self, closes: &[f64], frame: &IndicatorFrame) -> Vec<Signal> {
        (self.warmup_period()..closes.len())
            .filter_map(|index| {
                self.signal_at(closes, frame, index).map(|signal_type| Signal {
                    index,
                    signal_type,
                })
            })
            .collect()
    }

    /// Check if the strategy has enough bars to emit any signal.
    fn is_warmed_up(&self, bars_available: usize) -> bool {
        bars_available > self.warmup_period()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Threshold {
        warmup: usize,
    }

    impl Strategy for Threshold {
        fn name(&self) -> &str {
            "threshold"
        }

        fn warmup_period(&self) -> usize {
            self.warmup
        }

        fn indicators(&self, _closes: &[f64]) -> IndicatorFrame {
            IndicatorFrame::new()
        }

        fn signal_at(&self, closes: &[f64], _frame: &IndicatorFrame, index: usize) -> Option<SignalType> {
            if closes[index] > 10.0 {
                Some(SignalType::Enter)
            } else if closes[index] < 5.0 {
                Some(SignalType::Exit)
            } else {
                None
            }
        }
    }

    #[test]
    fn test_evaluate_skips_warmup() {
        let strategy = Threshold { warmup: 2 };
        let closes = [11.0, 1.0, 8.0, 12.0, 4.0];
        let signals = strategy.evaluate(&closes, &IndicatorFrame::new());

        assert_eq!(signals, vec![Signal::enter(3), Signal::exit(4)]);
    }

    #[test]
    fn test_strategy_warmup() {
        let strategy = Threshold { warmup: 20 };

        assert!(!strategy.is_warmed_up(10));
        assert!(!strategy.is_warmed_up(20));
        assert!(strategy.is_warmed_up(21));
    }
}
