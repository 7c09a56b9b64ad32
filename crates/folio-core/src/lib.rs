//! Core types and traits for the backtesting engine.
//!
//! This crate provides the foundational building blocks including:
//! - Price data types (PricePoint, closes extraction)
//! - Trading signals and the trade ledger entry
//! - Aligned indicator series with explicit warm-up gaps
//! - Core traits for indicators, strategies and price providers

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, FolioError, FolioResult, StrategyError};
pub use traits::*;
pub use types::*;
