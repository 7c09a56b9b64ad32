//! Single-position portfolio simulator.
//!
//! The portfolio is either flat or long one lot. Signals are applied in
//! ascending bar order at that bar's close; anything still open after the
//! last bar is sold at the last close.

use folio_core::types::{PricePoint, Signal, SignalType, Trade};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::sizing::PositionSizer;

/// The open lot while long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPosition {
    pub shares: u64,
    pub entry_price: Decimal,
}

/// Cash plus at most one open lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioState {
    pub cash: Decimal,
    pub position: Option<OpenPosition>,
}

impl PortfolioState {
    pub fn new(cash: Decimal) -> Self {
        Self {
            cash,
            position: None,
        }
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.position.is_none()
    }

    /// Mark-to-market equity at `price`.
    pub fn equity(&self, price: Decimal) -> Decimal {
        let held = self
            .position
            .map_or(Decimal::ZERO, |p| Decimal::from(p.shares) * price);
        self.cash + held
    }
}

/// Ledger and ending cash of a completed simulation. Always flat.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub trades: Vec<Trade>,
    pub final_cash: Decimal,
}

/// Turns signals into trades.
pub struct Simulator<'a> {
    sizer: &'a dyn PositionSizer,
}

impl<'a> Simulator<'a> {
    pub fn new(sizer: &'a dyn PositionSizer) -> Self {
        Self { sizer }
    }

    /// Replay `signals` over `prices` starting from `initial_capital` in cash.
    pub fn run(
        &self,
        initial_capital: Decimal,
        prices: &[PricePoint],
        signals: &[Signal],
    ) -> SimulationOutcome {
        let mut state = PortfolioState::new(initial_capital);
        let mut trades = Vec::new();

        for signal in signals {
            let Some(bar) = prices.get(signal.index) else {
                warn!(index = signal.index, bars = prices.len(), "signal past end of series, ignoring");
                continue;
            };

            let trade = match signal.signal_type {
                SignalType::Enter => self.enter(&mut state, bar),
                SignalType::Exit => exit(&mut state, bar),
            };
            if let Some(trade) = trade {
                trades.push(trade);
            }
        }

        if let Some(last) = prices.last() {
            if let Some(trade) = exit(&mut state, last) {
                debug!(date = %last.date, "force-closing open position at end of series");
                trades.push(trade);
            }
        }

        SimulationOutcome {
            trades,
            final_cash: state.cash,
        }
    }

    fn enter(&self, state: &mut PortfolioState, bar: &PricePoint) -> Option<Trade> {
        // Gate: flat and cash strictly above one share's price.
        if !state.is_flat() || state.cash <= bar.close {
            return None;
        }

        let shares = self.sizer.shares(state.cash, bar.close);
        if shares == 0 {
            return None;
        }

        let trade = Trade::buy(bar.date, bar.close, shares);
        state.cash -= trade.notional();
        state.position = Some(OpenPosition {
            shares,
            entry_price: bar.close,
        });

        debug!(
            date = %bar.date,
            price = %bar.close,
            shares,
            cash = %state.cash,
            equity = %state.equity(bar.close),
            "BUY"
        );
        Some(trade)
    }
}

fn exit(state: &mut PortfolioState, bar: &PricePoint) -> Option<Trade> {
    let position = state.position.take()?;
    let pnl = Decimal::from(position.shares) * (bar.close - position.entry_price);
    let trade = Trade::sell(bar.date, bar.close, position.shares, pnl);

    state.cash += trade.notional();

    debug!(
        date = %bar.date,
        price = %bar.close,
        shares = position.shares,
        %pnl,
        equity = %state.equity(bar.close),
        "SELL"
    );
    Some(trade)
}
