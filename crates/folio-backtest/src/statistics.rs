//! Performance statistics over a completed trade ledger.

use folio_core::types::Trade;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Trading days per year used to annualize the Sharpe ratio.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Aggregate performance of one backtest.
///
/// Every field is finite. Degenerate inputs (no closed trades, zero
/// variance) resolve to zero rather than NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    pub initial_capital: Decimal,
    /// Cash after forced liquidation, i.e. ending equity
    pub final_equity: Decimal,
    pub total_return_pct: Decimal,
    /// Winning SELLs over all SELLs
    pub win_rate_pct: Decimal,
    /// Ledger entries, BUY and SELL
    pub total_trades: usize,
    /// SELL entries
    pub closed_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Sum of realized P&L
    pub net_pnl: Decimal,
    /// Largest peak-to-trough decline of equity sampled at each SELL
    pub max_drawdown_pct: Decimal,
    /// Annualized, from per-trade returns on initial capital
    pub sharpe_ratio: f64,
}

impl PerformanceStats {
    /// Compute statistics for a ledger.
    pub fn compute(initial_capital: Decimal, final_equity: Decimal, trades: &[Trade]) -> Self {
        let realized: Vec<Decimal> = trades
            .iter()
            .filter(|t| t.is_sell())
            .map(|t| t.pnl.unwrap_or(Decimal::ZERO))
            .collect();

        let winning_trades = realized.iter().filter(|pnl| **pnl > Decimal::ZERO).count();
        let losing_trades = realized.iter().filter(|pnl| **pnl < Decimal::ZERO).count();

        let total_return_pct = if initial_capital > Decimal::ZERO {
            (final_equity - initial_capital) / initial_capital * dec!(100)
        } else {
            Decimal::ZERO
        };

        let win_rate_pct = if realized.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(winning_trades) * dec!(100) / Decimal::from(realized.len())
        };

        Self {
            initial_capital,
            final_equity,
            total_return_pct,
            win_rate_pct,
            total_trades: trades.len(),
            closed_trades: realized.len(),
            winning_trades,
            losing_trades,
            net_pnl: realized.iter().sum(),
            max_drawdown_pct: max_drawdown_pct(initial_capital, &realized),
            sharpe_ratio: sharpe_ratio(initial_capital, &realized),
        }
    }

    /// Closed trades that neither made nor lost money.
    pub fn breakeven_trades(&self) -> usize {
        self.closed_trades - self.winning_trades - self.losing_trades
    }
}

/// Walk equity across SELLs only, tracking the deepest fall from a peak.
fn max_drawdown_pct(initial_capital: Decimal, realized: &[Decimal]) -> Decimal {
    let mut equity = initial_capital;
    let mut peak = initial_capital;
    let mut max_drawdown = Decimal::ZERO;

    for pnl in realized {
        equity += *pnl;
        if equity > peak {
            peak = equity;
        }
        if peak > Decimal::ZERO {
            let drawdown = (peak - equity) / peak * dec!(100);
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    max_drawdown
}

/// `mean / population_std * sqrt(252)` over `pnl / initial_capital`.
fn sharpe_ratio(initial_capital: Decimal, realized: &[Decimal]) -> f64 {
    let Some(capital) = initial_capital.to_f64().filter(|c| *c > 0.0) else {
        return 0.0;
    };
    if realized.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = realized
        .iter()
        .map(|pnl| pnl.to_f64().unwrap_or(0.0) / capital)
        .collect();

    let mean = returns.iter().mean();
    let std_dev = returns.iter().population_std_dev();
    if std_dev.is_nan() || std_dev <= 0.0 {
        return 0.0;
    }

    let sharpe = mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt();
    if sharpe.is_finite() {
        sharpe
    } else {
        0.0
    }
}
