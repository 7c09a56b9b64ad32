//! Configuration structures.

use folio_backtest::BacktestConfig;
use folio_core::error::{FolioError, FolioResult};
use folio_core::traits::PriceProvider;
use folio_data::{BasePriceTable, CsvPriceProvider, SyntheticProvider};
use folio_monitor::LogFormat;
use folio_strategies::StrategyRegistry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub backtest: BacktestConfig,
    /// Strategy parameter overrides keyed by strategy key
    #[serde(default)]
    pub strategies: BTreeMap<String, Value>,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "folio".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

/// Which price provider backs the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Synthetic,
    Csv,
}

/// Price data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub provider: ProviderKind,
    /// Random-walk seed; unset draws a fresh seed per request
    pub seed: Option<u64>,
    /// CSV file or directory of `{SYMBOL}.csv` files
    pub csv_path: Option<PathBuf>,
    /// Starting price for symbols missing from `base_prices`
    pub default_base_price: f64,
    pub base_prices: BTreeMap<String, f64>,
}

impl Default for DataSettings {
    fn default() -> Self {
        let table = BasePriceTable::default();
        let base_prices = ["AAPL", "TSLA", "NVDA", "MSFT", "SPY", "GOOGL"]
            .into_iter()
            .map(|symbol| (symbol.to_string(), decimal_to_f64(table.lookup(symbol))))
            .collect();

        Self {
            provider: ProviderKind::Synthetic,
            seed: Some(42),
            csv_path: None,
            default_base_price: decimal_to_f64(table.default_price()),
            base_prices,
        }
    }
}

impl DataSettings {
    /// Base prices keyed by upper-cased symbol.
    pub fn base_price_table(&self) -> FolioResult<BasePriceTable> {
        let prices = self
            .base_prices
            .iter()
            .map(|(symbol, price)| Ok((symbol.to_ascii_uppercase(), positive_decimal(symbol, *price)?)))
            .collect::<FolioResult<HashMap<_, _>>>()?;

        Ok(BasePriceTable::new(
            prices,
            positive_decimal("default_base_price", self.default_base_price)?,
        ))
    }

    /// Build the configured price provider.
    pub fn price_provider(&self) -> FolioResult<Arc<dyn PriceProvider>> {
        match self.provider {
            ProviderKind::Synthetic => Ok(Arc::new(SyntheticProvider::new(
                self.base_price_table()?,
                self.seed,
            ))),
            ProviderKind::Csv => {
                let path = self.csv_path.as_ref().ok_or_else(|| {
                    FolioError::Config("data.csv_path is required for the csv provider".into())
                })?;
                Ok(Arc::new(CsvPriceProvider::new(path)?))
            }
        }
    }
}

impl AppConfig {
    /// Engine configuration with `[strategies]` overrides folded in.
    pub fn backtest_config(&self) -> BacktestConfig {
        let mut config = self.backtest.clone();
        for (key, params) in &self.strategies {
            config
                .strategy_params
                .entry(key.clone())
                .or_insert_with(|| params.clone());
        }
        config
    }

    /// Check every section, including that strategy overrides build.
    pub fn validate(&self) -> FolioResult<()> {
        if self.backtest.default_capital <= Decimal::ZERO {
            return Err(FolioError::Config(
                "backtest.default_capital must be positive".into(),
            ));
        }
        if self.backtest.trade_log_limit == 0 {
            return Err(FolioError::Config(
                "backtest.trade_log_limit must be at least 1".into(),
            ));
        }
        self.backtest.sizing.validate().map_err(FolioError::Config)?;
        self.data.base_price_table()?;
        if self.data.provider == ProviderKind::Csv && self.data.csv_path.is_none() {
            return Err(FolioError::Config(
                "data.csv_path is required for the csv provider".into(),
            ));
        }

        let registry = StrategyRegistry::new();
        for (key, params) in &self.backtest_config().strategy_params {
            registry.create(key, Some(params))?;
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> FolioResult<String> {
        toml::to_string_pretty(self).map_err(|e| FolioError::Serialization(e.to_string()))
    }
}

fn positive_decimal(name: &str, value: f64) -> FolioResult<Decimal> {
    Decimal::try_from(value)
        .ok()
        .filter(|d| *d > Decimal::ZERO)
        .ok_or_else(|| FolioError::Config(format!("base price for {name} must be positive, got {value}")))
}

fn decimal_to_f64(value: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    value.to_f64().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_config;
    use folio_backtest::{SizingMethod, UnknownStrategyPolicy};
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.backtest.trade_log_limit, 50);
        assert_eq!(config.data.seed, Some(42));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config(std::path::Path::new("/nonexistent/folio.toml")).unwrap();

        assert_eq!(config.backtest.default_capital, dec!(10000));
        assert_eq!(config.data.provider, ProviderKind::Synthetic);
    }

    #[test]
    fn test_default_toml_round_trips() {
        let rendered = AppConfig::default().to_toml().unwrap();
        let file = write_config(&rendered);

        let loaded = load_config(file.path()).unwrap();
        assert_eq!(loaded.backtest.sizing, SizingMethod::AllIn);
        assert_eq!(loaded.backtest.unknown_strategy, UnknownStrategyPolicy::Reject);
        assert_eq!(loaded.logging.format, LogFormat::Pretty);

        let table = loaded.data.base_price_table().unwrap();
        assert_eq!(table.lookup("NVDA"), dec!(500));
        assert_eq!(table.lookup("ZZZ"), dec!(100));
    }

    #[test]
    fn test_file_sections() {
        let file = write_config(
            r#"
[backtest]
trade_log_limit = 10
unknown_strategy = "no_trades"

[backtest.sizing]
method = "fixed_shares"
shares = 25

[data]
seed = 7

[data.base_prices]
AAPL = 190.5

[strategies.rsi]
period = 10
oversold = 25
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.backtest.trade_log_limit, 10);
        assert_eq!(config.backtest.unknown_strategy, UnknownStrategyPolicy::NoTrades);
        assert_eq!(config.backtest.sizing, SizingMethod::FixedShares { shares: 25 });
        assert_eq!(config.data.seed, Some(7));
        assert_eq!(config.data.base_price_table().unwrap().lookup("AAPL"), dec!(190.5));

        let engine_config = config.backtest_config();
        assert_eq!(engine_config.strategy_params["rsi"]["period"], 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_strategy_override_fails_validation() {
        let file = write_config("[strategies.ma_crossover]\nfast_period = 300\n");

        let config = load_config(file.path()).unwrap();
        assert!(matches!(config.validate(), Err(FolioError::Strategy(_))));
    }

    #[test]
    fn test_csv_provider_requires_path() {
        let mut config = AppConfig::default();
        config.data.provider = ProviderKind::Csv;

        assert!(config.validate().is_err());
        assert!(config.data.price_provider().is_err());
    }

    #[test]
    fn test_environment_override() {
        std::env::set_var("FOLIO__APP__ENVIRONMENT", "staging");
        let config = load_config(std::path::Path::new("/nonexistent/folio.toml")).unwrap();
        std::env::remove_var("FOLIO__APP__ENVIRONMENT");

        assert_eq!(config.app.environment, "staging");
    }

    #[test]
    fn test_non_positive_base_price_rejected() {
        let mut config = AppConfig::default();
        config.data.base_prices.insert("BAD".into(), 0.0);

        assert!(matches!(config.validate(), Err(FolioError::Config(_))));
    }
}
