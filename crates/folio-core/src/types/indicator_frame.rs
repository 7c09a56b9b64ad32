//! Named indicator series aligned to a price series.

use std::collections::HashMap;

/// Indicator values aligned index-for-index with the price series.
///
/// Positions inside the indicator's warm-up window are `None`.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Collection of named indicator series computed for one price series.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    series: HashMap<String, IndicatorSeries>,
}

impl IndicatorFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, series: IndicatorSeries) {
        self.series.insert(name.into(), series);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, series: IndicatorSeries) -> Self {
        self.insert(name, series);
        self
    }

    /// Value of `name` at `index`, `None` while warming up or out of range.
    pub fn value(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name)?.get(index).copied().flatten()
    }
}
