//! Backtest report generation.

use folio_core::error::{FolioError, FolioResult};
use folio_core::types::{Trade, TradeAction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::BacktestRequest;
use crate::statistics::PerformanceStats;

/// Response body of a successful backtest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_return_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub win_rate_pct: Decimal,
    /// Every ledger entry, BUY and SELL
    pub total_trades: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub max_drawdown_pct: Decimal,
    pub sharpe_ratio: f64,
    /// Leading slice of the ledger
    pub trades: Vec<Trade>,
}

/// Complete backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Request that produced this report
    pub request: BacktestRequest,
    /// Display name of the strategy, `None` when the key was unknown
    pub strategy_name: Option<String>,
    /// Price provider name
    pub provider: String,
    /// Bars in the price series
    pub bars: usize,
    /// Statistics
    pub stats: PerformanceStats,
    /// Cap applied to the trade log in [`BacktestResult`]
    pub trade_log_limit: usize,
    trades: Vec<Trade>,
}

impl BacktestReport {
    pub(crate) fn new(
        request: BacktestRequest,
        strategy_name: Option<String>,
        provider: String,
        bars: usize,
        stats: PerformanceStats,
        trade_log_limit: usize,
        trades: Vec<Trade>,
    ) -> Self {
        Self {
            request,
            strategy_name,
            provider,
            bars,
            stats,
            trade_log_limit,
            trades,
        }
    }

    /// The full, unbounded ledger in chronological order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Response payload with the trade log capped at `trade_log_limit`.
    pub fn result(&self) -> BacktestResult {
        BacktestResult {
            total_return_pct: self.stats.total_return_pct,
            win_rate_pct: self.stats.win_rate_pct,
            total_trades: self.stats.total_trades,
            max_drawdown_pct: self.stats.max_drawdown_pct,
            sharpe_ratio: self.stats.sharpe_ratio,
            trades: self.trades.iter().take(self.trade_log_limit).cloned().collect(),
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        let rule = "-".repeat(59);

        s.push_str(&"=".repeat(59));
        s.push_str("\n                      BACKTEST REPORT\n");
        s.push_str(&"=".repeat(59));
        s.push_str("\n\n");

        s.push_str(&format!("  Symbol:              {}\n", self.request.symbol));
        s.push_str(&format!(
            "  Strategy:            {}\n",
            self.strategy_name.as_deref().unwrap_or("(unknown, no trades)")
        ));
        s.push_str(&format!(
            "  Period:              {} to {}\n",
            self.request.start_date, self.request.end_date
        ));
        s.push_str(&format!(
            "  Bars:                {} ({})\n\n",
            self.bars, self.provider
        ));

        s.push_str("PERFORMANCE\n");
        s.push_str(&rule);
        s.push('\n');
        s.push_str(&format!(
            "  Initial Capital:     ${:.2}\n",
            self.stats.initial_capital
        ));
        s.push_str(&format!(
            "  Final Equity:        ${:.2}\n",
            self.stats.final_equity
        ));
        s.push_str(&format!(
            "  Total Return:        {:.2}%\n",
            self.stats.total_return_pct
        ));
        s.push_str(&format!(
            "  Max Drawdown:        {:.2}%\n",
            self.stats.max_drawdown_pct
        ));
        s.push_str(&format!(
            "  Sharpe Ratio:        {:.2}\n\n",
            self.stats.sharpe_ratio
        ));

        s.push_str("TRADE STATISTICS\n");
        s.push_str(&rule);
        s.push('\n');
        s.push_str(&format!(
            "  Total Trades:        {}\n",
            self.stats.total_trades
        ));
        s.push_str(&format!(
            "  Closed Trades:       {}\n",
            self.stats.closed_trades
        ));
        s.push_str(&format!(
            "  Winning / Losing:    {} / {}\n",
            self.stats.winning_trades, self.stats.losing_trades
        ));
        s.push_str(&format!(
            "  Win Rate:            {:.2}%\n",
            self.stats.win_rate_pct
        ));
        s.push_str(&format!("  Net P&L:             ${:.2}\n\n", self.stats.net_pnl));

        s.push_str(&"=".repeat(59));
        s.push('\n');

        s
    }

    /// Export the whole report to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the full ledger as CSV.
    pub fn trades_to_csv(&self) -> FolioResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        for trade in &self.trades {
            writer
                .serialize(LedgerRow::from(trade))
                .map_err(|e| FolioError::Serialization(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FolioError::Serialization(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| FolioError::Serialization(e.to_string()))
    }
}

/// Flat CSV row; `pnl` is blank on BUY rows.
#[derive(Serialize)]
struct LedgerRow {
    date: chrono::NaiveDate,
    action: TradeAction,
    price: Decimal,
    shares: u64,
    pnl: Option<Decimal>,
}

impl From<&Trade> for LedgerRow {
    fn from(trade: &Trade) -> Self {
        Self {
            date: trade.date,
            action: trade.action,
            price: trade.price,
            shares: trade.shares,
            pnl: trade.pnl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_report(round_trips: usize, limit: usize) -> BacktestReport {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let trades: Vec<Trade> = (0..round_trips)
            .flat_map(|i| {
                let day = start + chrono::Days::new(i as u64 * 2);
                [
                    Trade::buy(day, dec!(100), 10),
                    Trade::sell(day.succ_opt().unwrap(), dec!(101), 10, dec!(10)),
                ]
            })
            .collect();
        let final_equity = dec!(10000) + Decimal::from(round_trips * 10);
        let stats = PerformanceStats::compute(dec!(10000), final_equity, &trades);

        BacktestReport::new(
            BacktestRequest::new("AAPL", "rsi", start, start + chrono::Days::new(365), dec!(10000)),
            Some("RSI Mean Reversion".into()),
            "synthetic".into(),
            252,
            stats,
            limit,
            trades,
        )
    }

    #[test]
    fn test_result_caps_trade_log() {
        let report = sample_report(40, 50);
        let result = report.result();

        assert_eq!(result.total_trades, 80);
        assert_eq!(result.trades.len(), 50);
        assert_eq!(report.trades().len(), 80);
        assert_eq!(result.trades[..], report.trades()[..50]);
    }

    #[test]
    fn test_result_json_keys() {
        let report = sample_report(1, 50);
        let json = serde_json::to_value(report.result()).unwrap();

        for key in [
            "totalReturnPct",
            "winRatePct",
            "totalTrades",
            "maxDrawdownPct",
            "sharpeRatio",
            "trades",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["totalReturnPct"], 0.1);
        assert_eq!(json["winRatePct"], 100.0);
        assert_eq!(json["trades"][0]["action"], "BUY");
    }

    #[test]
    fn test_report_summary() {
        let report = sample_report(3, 50);
        let summary = report.summary();

        assert!(summary.contains("Total Return"));
        assert!(summary.contains("0.30%"));
        assert!(summary.contains("AAPL"));
    }

    #[test]
    fn test_trades_to_csv() {
        let report = sample_report(1, 50);
        let csv = report.trades_to_csv().unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines[0], "date,action,price,shares,pnl");
        assert_eq!(lines[1], "2024-01-01,BUY,100,10,");
        assert_eq!(lines[2], "2024-01-02,SELL,101,10,10");
    }
}
