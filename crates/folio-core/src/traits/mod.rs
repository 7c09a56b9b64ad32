//! Core traits for the backtesting engine.

mod indicator;
mod price_provider;
mod strategy;

pub use indicator::Indicator;
pub use price_provider::PriceProvider;
pub use strategy::{Strategy, StrategyConfig};
