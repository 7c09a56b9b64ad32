//! Daily price providers.

mod calendar;
mod csv_source;
mod synthetic;

pub use calendar::{is_trading_day, trading_days};
pub use csv_source::CsvPriceProvider;
pub use synthetic::{BasePriceTable, SyntheticProvider};
