//! Backtesting engine.

use chrono::NaiveDate;
use folio_core::error::{FolioError, FolioResult, StrategyError};
use folio_core::traits::{PriceProvider, Strategy};
use folio_core::types::{closes, PricePoint};
use folio_strategies::StrategyRegistry;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::report::BacktestReport;
use crate::simulator::{SimulationOutcome, Simulator};
use crate::sizing::{PositionSizer, SizingMethod};
use crate::statistics::PerformanceStats;

/// Largest starting capital a request may carry.
///
/// Keeps share counts within `u64` and ledger arithmetic within `Decimal`.
pub const MAX_CAPITAL: Decimal = dec!(1000000000000000);

/// What to do with a strategy key the registry does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStrategyPolicy {
    /// Fail the request
    #[default]
    Reject,
    /// Run without signals: zero trades, 0% return
    NoTrades,
}

/// Backtest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Capital used when a caller does not supply one
    #[serde(with = "rust_decimal::serde::float")]
    pub default_capital: Decimal,
    /// Trades returned in the response body
    pub trade_log_limit: usize,
    /// Handling of unrecognized strategy keys
    pub unknown_strategy: UnknownStrategyPolicy,
    /// Entry sizing
    pub sizing: SizingMethod,
    /// Per-strategy parameter overrides keyed by strategy key
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub strategy_params: HashMap<String, Value>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            default_capital: dec!(10000),
            trade_log_limit: 50,
            unknown_strategy: UnknownStrategyPolicy::Reject,
            sizing: SizingMethod::AllIn,
            strategy_params: HashMap::new(),
        }
    }
}

/// A single backtest request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestRequest {
    pub symbol: String,
    /// Strategy key: `ma_crossover`, `rsi` or `momentum`
    pub strategy: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub capital: Decimal,
    /// Strategy parameter overrides, applied over configured ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl BacktestRequest {
    pub fn new(
        symbol: impl Into<String>,
        strategy: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        capital: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            strategy: strategy.into(),
            start_date,
            end_date,
            capital,
            params: None,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Reject requests the pipeline cannot run.
    ///
    /// `start_date > end_date` is allowed and yields an empty series.
    pub fn validate(&self) -> FolioResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(FolioError::Validation("symbol must not be empty".into()));
        }
        if self.capital <= Decimal::ZERO {
            return Err(FolioError::Validation(format!(
                "capital must be positive, got {}",
                self.capital
            )));
        }
        if self.capital > MAX_CAPITAL {
            return Err(FolioError::Validation(format!(
                "capital must be at most {MAX_CAPITAL}, got {}",
                self.capital
            )));
        }
        Ok(())
    }
}

/// Run the synchronous pipeline over an already loaded series.
///
/// Deterministic: the same prices, strategy and capital always produce the
/// same ledger.
pub fn backtest(
    prices: &[PricePoint],
    strategy: &dyn Strategy,
    initial_capital: Decimal,
    sizer: &dyn PositionSizer,
) -> SimulationOutcome {
    if !strategy.is_warmed_up(prices.len()) {
        debug!(
            strategy = strategy.name(),
            bars = prices.len(),
            warmup = strategy.warmup_period(),
            "series shorter than warm-up, no signals possible"
        );
    }

    let closes = closes(prices);
    let frame = strategy.indicators(&closes);
    let signals = strategy.evaluate(&closes, &frame);

    debug!(
        strategy = strategy.name(),
        bars = prices.len(),
        signals = signals.len(),
        "evaluated strategy"
    );

    Simulator::new(sizer).run(initial_capital, prices, &signals)
}

/// Backtesting engine.
///
/// Holds no per-request state; concurrent `run` calls are independent.
pub struct BacktestEngine {
    config: BacktestConfig,
    provider: Arc<dyn PriceProvider>,
    registry: StrategyRegistry,
}

impl BacktestEngine {
    /// Create a new backtest engine.
    pub fn new(config: BacktestConfig, provider: Arc<dyn PriceProvider>) -> Self {
        Self {
            config,
            provider,
            registry: StrategyRegistry::new(),
        }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    pub fn provider(&self) -> &dyn PriceProvider {
        self.provider.as_ref()
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Run a backtest.
    pub async fn run(&self, request: &BacktestRequest) -> FolioResult<BacktestReport> {
        request.validate()?;
        self.config.sizing.validate().map_err(FolioError::Config)?;

        let strategy = self.resolve_strategy(request)?;

        info!(
            symbol = %request.symbol,
            strategy = %request.strategy,
            start = %request.start_date,
            end = %request.end_date,
            capital = %request.capital,
            provider = self.provider.name(),
            "running backtest"
        );

        let prices = self
            .provider
            .daily_closes(&request.symbol, request.start_date, request.end_date)
            .await?;

        let outcome = match &strategy {
            Some(strategy) => backtest(&prices, strategy.as_ref(), request.capital, &self.config.sizing),
            None => Simulator::new(&self.config.sizing).run(request.capital, &prices, &[]),
        };

        let stats = PerformanceStats::compute(request.capital, outcome.final_cash, &outcome.trades);

        info!(
            symbol = %request.symbol,
            bars = prices.len(),
            trades = stats.total_trades,
            total_return_pct = %stats.total_return_pct.round_dp(2),
            max_drawdown_pct = %stats.max_drawdown_pct.round_dp(2),
            sharpe = stats.sharpe_ratio,
            "backtest complete"
        );

        Ok(BacktestReport::new(
            request.clone(),
            strategy.as_ref().map(|s| s.name().to_string()),
            self.provider.name().to_string(),
            prices.len(),
            stats,
            self.config.trade_log_limit,
            outcome.trades,
        ))
    }

    fn resolve_strategy(&self, request: &BacktestRequest) -> FolioResult<Option<Box<dyn Strategy>>> {
        let params = merge_params(
            self.config.strategy_params.get(&request.strategy),
            request.params.as_ref(),
        );

        match self.registry.create(&request.strategy, params.as_ref()) {
            Ok(strategy) => Ok(Some(strategy)),
            Err(StrategyError::NotFound(key))
                if self.config.unknown_strategy == UnknownStrategyPolicy::NoTrades =>
            {
                warn!(strategy = %key, "unknown strategy, running without signals");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Overlay request parameters on configured ones, key by key.
fn merge_params(configured: Option<&Value>, requested: Option<&Value>) -> Option<Value> {
    match (configured, requested) {
        (None, None) => None,
        (Some(v), None) | (None, Some(v)) => Some(v.clone()),
        (Some(Value::Object(base)), Some(Value::Object(overlay))) => {
            let mut merged = base.clone();
            merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
            Some(Value::Object(merged))
        }
        (Some(_), Some(v)) => Some(v.clone()),
    }
}
