//! Backtesting pipeline.
//!
//! Prices flow from a [`PriceProvider`](folio_core::PriceProvider) through a
//! strategy's indicators and signals into the single-position
//! [`Simulator`], and the resulting ledger is summarized by
//! [`PerformanceStats`].

mod engine;
mod report;
pub mod service;
mod simulator;
mod sizing;
mod statistics;

pub use engine::{
    backtest, BacktestConfig, BacktestEngine, BacktestRequest, UnknownStrategyPolicy, MAX_CAPITAL,
};
pub use report::{BacktestReport, BacktestResult};
pub use service::{handle_request, BacktestResponse};
pub use simulator::{OpenPosition, PortfolioState, SimulationOutcome, Simulator};
pub use sizing::{PositionSizer, SizingMethod};
pub use statistics::PerformanceStats;
