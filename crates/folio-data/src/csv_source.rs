//! CSV price provider.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use folio_core::error::DataError;
use folio_core::traits::PriceProvider;
use folio_core::types::PricePoint;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::calendar::is_trading_day;

/// CSV record format. Columns other than date and close are ignored.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
}

/// Historical closes read from CSV.
///
/// `path` is either a single file, used for every symbol, or a directory
/// holding `{SYMBOL}.csv`, `{symbol}.csv`, `{SYMBOL}_daily.csv` or
/// `{symbol}_daily.csv`.
#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    path: PathBuf,
}

impl CsvPriceProvider {
    /// Create a new CSV provider.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        if !path.exists() {
            return Err(DataError::Unavailable(format!(
                "{} does not exist",
                path.display()
            )));
        }
        Ok(Self { path })
    }

    fn resolve(&self, symbol: &str) -> Result<PathBuf, DataError> {
        if self.path.is_file() {
            return Ok(self.path.clone());
        }

        let lower = symbol.to_lowercase();
        [
            format!("{symbol}.csv"),
            format!("{lower}.csv"),
            format!("{symbol}_daily.csv"),
            format!("{lower}_daily.csv"),
        ]
        .into_iter()
        .map(|name| self.path.join(name))
        .find(|candidate| candidate.is_file())
        .ok_or(DataError::NoDataAvailable)
    }

    /// Load every row of a file, sorted by date, one entry per date.
    fn load_from_path(path: &Path) -> Result<Vec<PricePoint>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        // Later rows win on duplicate dates.
        let mut by_date = BTreeMap::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;
            let date = parse_date(&record.date)?;

            if !record.close.is_finite() || record.close <= 0.0 {
                return Err(DataError::ParseError(format!(
                    "invalid close {} on {}",
                    record.close, date
                )));
            }
            let close = Decimal::try_from(record.close)
                .map_err(|e| DataError::ParseError(e.to_string()))?
                .round_dp(2);

            if by_date.insert(date, close).is_some() {
                warn!(%date, file = %path.display(), "duplicate date in CSV, keeping last row");
            }
        }

        Ok(by_date
            .into_iter()
            .map(|(date, close)| PricePoint::new(date, close))
            .collect())
    }
}

#[async_trait]
impl PriceProvider for CsvPriceProvider {
    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>, DataError> {
        let path = self.resolve(symbol)?;
        let all = Self::load_from_path(&path)?;
        let total = all.len();

        let prices: Vec<PricePoint> = all
            .into_iter()
            .filter(|p| p.date >= start && p.date <= end && is_trading_day(p.date))
            .collect();

        debug!(symbol, file = %path.display(), total, kept = prices.len(), "loaded CSV closes");
        Ok(prices)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse the date formats commonly found in exported price files.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_str, format).ok())
    {
        return Ok(date);
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date_str, format).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| DataError::ParseError(format!("Could not parse date: {date_str}")))
}
