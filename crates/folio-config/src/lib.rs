//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, DataSettings, LoggingConfig, ProviderKind};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// A missing file yields defaults. `FOLIO__SECTION__KEY` variables override
/// file values, e.g. `FOLIO__BACKTEST__TRADE_LOG_LIMIT=100`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
