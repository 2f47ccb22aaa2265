//! Fatigue-adjusted rolling form.

use crate::config::{BACK_TO_BACK_DISCOUNT, FeatureConfig};

/// Scales rolling aggregates down on back-to-back games.
#[derive(Debug, Clone, Copy)]
pub struct FatigueCombiner {
    discount: f64,
}

impl FatigueCombiner {
    /// Creates a combiner with the given back-to-back discount.
    #[must_use]
    pub const fn new(discount: f64) -> Self {
        Self { discount }
    }

    /// Creates a combiner from the pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &FeatureConfig) -> Self {
        Self::new(config.back_to_back_discount)
    }

    /// `1 - discount * back_to_back` for each game.
    pub fn penalties(&self, back_to_back: &[i32]) -> Vec<f64> {
        back_to_back
            .iter()
            .map(|&b2b| 1.0 - self.discount * f64::from(b2b))
            .collect()
    }

    /// Multiplies each rolling value by its penalty; missing stays missing.
    pub fn adjust(rolling: &[Option<f64>], penalties: &[f64]) -> Vec<Option<f64>> {
        rolling
            .iter()
            .zip(penalties)
            .map(|(value, penalty)| value.map(|v| v * penalty))
            .collect()
    }
}

impl Default for FatigueCombiner {
    fn default() -> Self {
        Self::new(BACK_TO_BACK_DISCOUNT)
    }
}
