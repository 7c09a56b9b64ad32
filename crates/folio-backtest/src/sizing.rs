//! Position sizing.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Decides how many whole shares an entry buys.
pub trait PositionSizer: Send + Sync {
    /// Shares to buy with `cash` available at `price`. Zero means skip the entry.
    fn shares(&self, cash: Decimal, price: Decimal) -> u64;
}

/// Sizing methods selectable from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SizingMethod {
    /// Every affordable whole share
    #[default]
    AllIn,
    /// A fixed lot, reduced to what cash covers
    FixedShares { shares: u64 },
    /// A percentage of current cash
    PercentCash {
        #[serde(with = "rust_decimal::serde::float")]
        percent: Decimal,
    },
}

impl SizingMethod {
    /// Check parameters are usable.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SizingMethod::AllIn => Ok(()),
            SizingMethod::FixedShares { shares } if *shares == 0 => {
                Err("fixed_shares sizing needs at least one share".into())
            }
            SizingMethod::FixedShares { .. } => Ok(()),
            SizingMethod::PercentCash { percent }
                if *percent <= Decimal::ZERO || *percent > dec!(100) =>
            {
                Err(format!("percent_cash must be in (0, 100], got {percent}"))
            }
            SizingMethod::PercentCash { .. } => Ok(()),
        }
    }
}

impl PositionSizer for SizingMethod {
    fn shares(&self, cash: Decimal, price: Decimal) -> u64 {
        let affordable = whole_shares(cash, price);

        match self {
            SizingMethod::AllIn => affordable,
            SizingMethod::FixedShares { shares } => (*shares).min(affordable),
            SizingMethod::PercentCash { percent } => {
                // scale the fraction, not the cash, so the product never exceeds `cash`
                whole_shares(cash * (*percent / dec!(100)), price).min(affordable)
            }
        }
    }
}

/// `floor(amount / price)`, zero when nothing is affordable, saturating at `u64::MAX`.
fn whole_shares(amount: Decimal, price: Decimal) -> u64 {
    if price <= Decimal::ZERO || amount <= Decimal::ZERO {
        return 0;
    }
    amount
        .checked_div(price)
        .and_then(|shares| shares.floor().to_u64())
        .unwrap_or(u64::MAX)
}
