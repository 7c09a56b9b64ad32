//! Trading strategy implementations.
//!
//! This crate provides the built-in signal generators:
//! - Moving Average Crossover (SMA 50/200)
//! - RSI mean reversion
//! - Momentum (20-bar rate of change)

mod ma_crossover;
mod momentum;
mod registry;
mod rsi_strategy;

/// Longest indicator window a strategy config accepts.
pub const MAX_PERIOD: usize = 10_000;

pub use ma_crossover::{MACrossoverConfig, MACrossoverStrategy};
pub use momentum::{MomentumConfig, MomentumStrategy};
pub use registry::{StrategyInfo, StrategyKind, StrategyRegistry};
pub use rsi_strategy::{RsiConfig, RsiStrategy};
