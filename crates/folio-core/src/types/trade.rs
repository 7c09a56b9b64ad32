//! Trade ledger entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

/// A single executed trade. Immutable once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub action: TradeAction,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub shares: u64,
    /// Realized P&L, present on SELL trades only
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub pnl: Option<Decimal>,
}

impl Trade {
    /// Opening trade.
    pub fn buy(date: NaiveDate, price: Decimal, shares: u64) -> Self {
        Self {
            date,
            action: TradeAction::Buy,
            price,
            shares,
            pnl: None,
        }
    }

    /// Closing trade carrying realized P&L.
    pub fn sell(date: NaiveDate, price: Decimal, shares: u64, pnl: Decimal) -> Self {
        Self {
            date,
            action: TradeAction::Sell,
            price,
            shares,
            pnl: Some(pnl),
        }
    }

    #[inline]
    pub fn is_sell(&self) -> bool {
        self.action == TradeAction::Sell
    }

    /// Gross value of the trade (shares * price).
    pub fn notional(&self) -> Decimal {
        Decimal::from(self.shares) * self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_serializes_without_pnl() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let trade = Trade::buy(day, dec!(110.5), 90);

        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["action"], "BUY");
        assert_eq!(json["price"], 110.5);
        assert_eq!(json["shares"], 90);
        assert!(json.get("pnl").is_none());
    }

    #[test]
    fn test_sell_carries_pnl() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let trade = Trade::sell(day, dec!(60), 90, dec!(-4500));

        assert!(trade.is_sell());
        assert_eq!(trade.notional(), dec!(5400));
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["action"], "SELL");
        assert_eq!(json["pnl"], -4500.0);
    }
}
