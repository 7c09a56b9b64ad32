//! Technical indicators over daily closes.
//!
//! This crate provides the indicators the built-in strategies read:
//! - Simple Moving Average (SMA)
//! - Relative Strength Index (RSI)
//! - Rate of change (momentum)
//!
//! Every indicator returns a series aligned with its input, with `None`
//! in the warm-up positions.

pub mod momentum;
pub mod moving_average;

pub use momentum::{RateOfChange, Rsi};
pub use moving_average::Sma;
