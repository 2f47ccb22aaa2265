//! Pipeline configuration and the default feature policy.

use std::path::Path;

use serde::{Deserialize, Serialize};
use puckline_traits::{PucklineError, Result};

/// Width of the trailing window for rolling means, in games.
pub const DEFAULT_WINDOW: usize = 5;

/// Rest days assumed for an entity's first observed game.
pub const DEFAULT_REST_DAYS: i64 = 3;

/// Fractional discount applied to rolling form on a back-to-back game.
pub const BACK_TO_BACK_DISCOUNT: f64 = 0.1;

/// What to do with a negative rest-day count.
///
/// The rest formula `(date[i] - date[i-1]) - 1` goes negative only when an
/// entity has two games on one date, which the timeline builder already
/// rejects. The policy is kept explicit so an audit can see which rule ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestClamp {
    /// Keep the raw value.
    #[default]
    None,
    /// Floor the value at zero.
    Zero,
}

impl RestClamp {
    /// Applies the policy to a raw rest-day count.
    #[must_use]
    pub const fn apply(self, days: i64) -> i64 {
        match self {
            Self::None => days,
            Self::Zero => if days < 0 { 0 } else { days },
        }
    }
}

/// Configuration for the feature pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Trailing window width for rolling means (default: 5 games)
    pub window: usize,

    /// Rest days assigned to an entity's first observed game (default: 3)
    pub default_rest_days: i64,

    /// Discount applied to rolling form on back-to-back games (default: 0.1)
    pub back_to_back_discount: f64,

    /// Policy for negative rest-day counts (default: keep raw value)
    pub rest_clamp: RestClamp,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            default_rest_days: DEFAULT_REST_DAYS,
            back_to_back_discount: BACK_TO_BACK_DISCOUNT,
            rest_clamp: RestClamp::None,
        }
    }
}

impl FeatureConfig {
    /// Loads a configuration from a JSON file. Absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or holds values
    /// rejected by [`validate`](Self::validate).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field is inside its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`PucklineError::InvalidConfig`] for a zero window, a negative
    /// default rest, or a discount outside `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(PucklineError::InvalidConfig(
                "window must be at least one game".to_string(),
            ));
        }
        if self.default_rest_days < 0 {
            return Err(PucklineError::InvalidConfig(format!(
                "default_rest_days must be non-negative, got {}",
                self.default_rest_days
            )));
        }
        if !(0.0..1.0).contains(&self.back_to_back_discount) {
            return Err(PucklineError::InvalidConfig(format!(
                "back_to_back_discount must be in [0, 1), got {}",
                self.back_to_back_discount
            )));
        }
        Ok(())
    }
}
