//! Core data types for the backtesting engine.

mod indicator_frame;
mod price;
mod signal;
mod trade;

pub use indicator_frame::{IndicatorFrame, IndicatorSeries};
pub use price::{closes, PricePoint};
pub use signal::{Signal, SignalType};
pub use trade::{Trade, TradeAction};
