//! Rest and back-to-back indicators over one entity timeline.

use puckline_traits::Date;
use tracing::warn;

use crate::config::{FeatureConfig, RestClamp};

/// Derives days-of-rest and back-to-back flags from a chronological timeline.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use puckline_features::RestCalculator;
///
/// let dates: Vec<NaiveDate> = [1, 2, 6]
///     .iter()
///     .map(|&d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
///     .collect();
///
/// let rest = RestCalculator::default().days_rest(&dates);
/// assert_eq!(rest, vec![3, 0, 3]);
/// assert_eq!(RestCalculator::back_to_back(&rest), vec![0, 1, 0]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RestCalculator {
    default_rest_days: i64,
    clamp: RestClamp,
}

impl RestCalculator {
    /// Creates a calculator with an explicit first-game default and clamp policy.
    #[must_use]
    pub const fn new(default_rest_days: i64, clamp: RestClamp) -> Self {
        Self {
            default_rest_days,
            clamp,
        }
    }

    /// Creates a calculator from the pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &FeatureConfig) -> Self {
        Self::new(config.default_rest_days, config.rest_clamp)
    }

    /// Rest days before each game of a chronologically sorted timeline.
    ///
    /// The first game gets the configured default; every later game gets the
    /// number of full days off since the previous one (0 for consecutive days).
    pub fn days_rest(&self, dates: &[Date]) -> Vec<i64> {
        let mut rest = Vec::with_capacity(dates.len());
        if dates.is_empty() {
            return rest;
        }
        rest.push(self.default_rest_days);
        for pair in dates.windows(2) {
            let raw = (pair[1] - pair[0]).num_days() - 1;
            let days = self.clamp.apply(raw);
            if days != raw {
                warn!(raw, clamped = days, date = %pair[1], "clamped negative rest days");
            }
            rest.push(days);
        }
        rest
    }

    /// `1` where a game is played with zero days of rest, `0` otherwise.
    pub fn back_to_back(days_rest: &[i64]) -> Vec<i32> {
        days_rest.iter().map(|&d| i32::from(d == 0)).collect()
    }
}

impl Default for RestCalculator {
    fn default() -> Self {
        Self::from_config(&FeatureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REST_DAYS;

    fn dates(days: &[u32]) -> Vec<Date> {
        days.iter()
            .map(|&d| Date::from_ymd_opt(2024, 3, d).unwrap())
            .collect()
    }

    #[test]
    fn test_first_game_gets_default() {
        let calc = RestCalculator::default();
        assert_eq!(calc.days_rest(&dates(&[15])), vec![DEFAULT_REST_DAYS]);
    }

    #[test]
    fn test_rest_formula() {
        let calc = RestCalculator::default();
        let rest = calc.days_rest(&dates(&[1, 2, 4, 10, 11]));
        assert_eq!(rest, vec![3, 0, 1, 5, 0]);
    }

    #[test]
    fn test_rest_crosses_month_boundary() {
        let calc = RestCalculator::default();
        let timeline = vec![
            Date::from_ymd_opt(2024, 2, 28).unwrap(),
            Date::from_ymd_opt(2024, 3, 1).unwrap(),
        ];
        // 2024 is a leap year: Feb 29 is the single off day.
        assert_eq!(calc.days_rest(&timeline), vec![3, 1]);
    }

    #[test]
    fn test_custom_default() {
        let calc = RestCalculator::new(7, RestClamp::None);
        assert_eq!(calc.days_rest(&dates(&[1, 3])), vec![7, 1]);
    }

    #[test]
    fn test_back_to_back_iff_zero_rest() {
        let rest = vec![3, 0, 1, 0, -1, 5];
        assert_eq!(RestCalculator::back_to_back(&rest), vec![0, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn test_empty_timeline() {
        assert!(RestCalculator::default().days_rest(&[]).is_empty());
    }
}
