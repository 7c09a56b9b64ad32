//! Strategy registry for selecting strategies by key.

use crate::{
    MACrossoverConfig, MACrossoverStrategy, MomentumConfig, MomentumStrategy, RsiConfig,
    RsiStrategy,
};
use folio_core::{error::StrategyError, traits::Strategy, traits::StrategyConfig};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Built-in strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    MaCrossover,
    Rsi,
    Momentum,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::MaCrossover,
        StrategyKind::Rsi,
        StrategyKind::Momentum,
    ];

    /// Request key for this strategy.
    pub fn key(&self) -> &'static str {
        match self {
            StrategyKind::MaCrossover => "ma_crossover",
            StrategyKind::Rsi => "rsi",
            StrategyKind::Momentum => "momentum",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| StrategyError::NotFound(s.to_string()))
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Information about a registered strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyInfo {
    /// Request key
    pub key: String,
    /// Strategy name
    pub name: String,
    /// Strategy description
    pub description: String,
    /// Default configuration as JSON
    pub default_config: serde_json::Value,
}

/// Registry for available trading strategies.
pub struct StrategyRegistry {
    strategies: BTreeMap<StrategyKind, StrategyInfo>,
}

impl StrategyRegistry {
    /// Create a new strategy registry with all built-in strategies.
    pub fn new() -> Self {
        let mut strategies = BTreeMap::new();

        for kind in StrategyKind::ALL {
            let (strategy, default_config) = match kind {
                StrategyKind::MaCrossover => {
                    let config = MACrossoverConfig::default();
                    let value = serde_json::to_value(&config).unwrap_or_default();
                    (Box::new(MACrossoverStrategy::new(config)) as Box<dyn Strategy>, value)
                }
                StrategyKind::Rsi => {
                    let config = RsiConfig::default();
                    let value = serde_json::to_value(&config).unwrap_or_default();
                    (Box::new(RsiStrategy::new(config)) as Box<dyn Strategy>, value)
                }
                StrategyKind::Momentum => {
                    let config = MomentumConfig::default();
                    let value = serde_json::to_value(&config).unwrap_or_default();
                    (Box::new(MomentumStrategy::new(config)) as Box<dyn Strategy>, value)
                }
            };

            strategies.insert(
                kind,
                StrategyInfo {
                    key: kind.key().to_string(),
                    name: strategy.name().to_string(),
                    description: strategy.description().to_string(),
                    default_config,
                },
            );
        }

        Self { strategies }
    }

    /// List all available strategies.
    pub fn list(&self) -> Vec<&StrategyInfo> {
        self.strategies.values().collect()
    }

    /// Get strategy info by key.
    pub fn get(&self, key: &str) -> Option<&StrategyInfo> {
        let kind = key.parse::<StrategyKind>().ok()?;
        self.strategies.get(&kind)
    }

    /// Check if a strategy exists.
    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Create a strategy instance, applying JSON overrides on top of the defaults.
    ///
    /// Overrides may name any subset of the strategy's parameters.
    pub fn create(
        &self,
        key: &str,
        overrides: Option<&serde_json::Value>,
    ) -> Result<Box<dyn Strategy>, StrategyError> {
        let kind = key.parse::<StrategyKind>()?;
        debug!(strategy = key, has_overrides = overrides.is_some(), "creating strategy");

        match kind {
            StrategyKind::MaCrossover => {
                let config: MACrossoverConfig = parse_config(overrides)?;
                Ok(Box::new(MACrossoverStrategy::new(config)))
            }
            StrategyKind::Rsi => {
                let config: RsiConfig = parse_config(overrides)?;
                Ok(Box::new(RsiStrategy::new(config)))
            }
            StrategyKind::Momentum => {
                let config: MomentumConfig = parse_config(overrides)?;
                Ok(Box::new(MomentumStrategy::new(config)))
            }
        }
    }

    /// Create a strategy with default configuration.
    pub fn create_default(&self, key: &str) -> Result<Box<dyn Strategy>, StrategyError> {
        self.create(key, None)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_config<C>(overrides: Option<&serde_json::Value>) -> Result<C, StrategyError>
where
    C: StrategyConfig + DeserializeOwned + Default,
{
    let config = match overrides {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| StrategyError::InvalidConfig(e.to_string()))?,
        None => C::default(),
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_list() {
        let registry = StrategyRegistry::new();
        let keys: Vec<_> = registry.list().iter().map(|s| s.key.as_str()).collect();

        assert_eq!(keys, vec!["ma_crossover", "rsi", "momentum"]);
    }

    #[test]
    fn test_registry_get() {
        let registry = StrategyRegistry::new();

        assert!(registry.get("ma_crossover").is_some());
        assert!(registry.exists("rsi"));
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_create_default() {
        let registry = StrategyRegistry::new();

        let strategy = registry.create_default("ma_crossover").unwrap();
        assert_eq!(strategy.name(), "MA Crossover");
        assert_eq!(strategy.warmup_period(), 201);
    }

    #[test]
    fn test_create_with_partial_overrides() {
        let registry = StrategyRegistry::new();
        let overrides = serde_json::json!({ "period": 7 });

        let strategy = registry.create("rsi", Some(&overrides)).unwrap();
        assert_eq!(strategy.warmup_period(), 8);
    }

    #[test]
    fn test_invalid_overrides_rejected() {
        let registry = StrategyRegistry::new();
        let overrides = serde_json::json!({ "fast_period": 300 });

        let result = registry.create("ma_crossover", Some(&overrides));
        assert!(matches!(result, Err(StrategyError::InvalidConfig(_))));
    }

    #[test]
    fn test_create_unknown_strategy() {
        let registry = StrategyRegistry::new();

        let result = registry.create_default("breakout");
        assert!(matches!(result, Err(StrategyError::NotFound(key)) if key == "breakout"));
    }

    #[test]
    fn test_kind_round_trips_through_key() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.key().parse::<StrategyKind>().unwrap(), kind);
        }
    }
}
