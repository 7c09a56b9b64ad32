//! Indicator trait definition.

/// Trait for technical indicators.
///
/// Indicators process price data and produce derived values aligned
/// index-for-index with the input. Positions that fall inside the warm-up
/// window are `None` rather than a sentinel number.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closing prices)
    ///
    /// # Returns
    /// A vector of the same length as `data`
    fn calculate(&self, data: &[f64]) -> Vec<Option<Self::Output>>;

    /// Number of leading positions that are undefined.
    fn warmup_period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
