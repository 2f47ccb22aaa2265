//! Lag-1 rolling means with expanding backfill.
//!
//! For a timeline `x[0..n]` the value at game `i` only ever looks at
//! `x[0..i]`; the game itself never contributes to its own aggregate.
//!
//! The rule is two-staged:
//!
//! 1. Shift the metric by one game (`lag[i] = x[i-1]`, `lag[0]` missing).
//! 2. Take the mean of the trailing `window` lag values when all of them are
//!    present. Where that window is not complete (early in the timeline, or
//!    because of a missing metric), fall back to the mean of every present
//!    lag value so far.
//!
//! The first game of a timeline has no prior value at all and stays missing.

use puckline_traits::stats::{mean_if_complete, mean_present};

use crate::config::{DEFAULT_WINDOW, FeatureConfig};

/// Shifts a series one position later; the first slot becomes missing.
///
/// # Examples
///
/// ```
/// use puckline_features::rolling::lag1;
///
/// assert_eq!(lag1(&[Some(2.0), Some(4.0), Some(1.0)]), vec![None, Some(2.0), Some(4.0)]);
/// ```
pub fn lag1(values: &[Option<f64>]) -> Vec<Option<f64>> {
    if values.is_empty() {
        return Vec::new();
    }
    std::iter::once(None)
        .chain(values[..values.len() - 1].iter().copied())
        .collect()
}

/// Fixed-window mean over a lag-1 series, backfilled by the expanding mean.
///
/// Returns a vector as long as `lagged`. Position `i` holds the mean of
/// `lagged[i + 1 - window ..= i]` when that window exists and is fully
/// populated, otherwise the mean of all present values in `lagged[..= i]`,
/// otherwise `None`.
///
/// # Examples
///
/// ```
/// use puckline_features::rolling::rolling_mean_with_backfill;
///
/// let lagged = [None, Some(2.0), Some(4.0)];
/// assert_eq!(
///     rolling_mean_with_backfill(&lagged, 5),
///     vec![None, Some(2.0), Some(3.0)]
/// );
/// ```
pub fn rolling_mean_with_backfill(lagged: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(lagged.len());
    let mut sum = 0.0;
    let mut count = 0usize;

    for i in 0..lagged.len() {
        if let Some(v) = lagged[i].filter(|v| v.is_finite()) {
            sum += v;
            count += 1;
        }

        let windowed = if window > 0 && i + 1 >= window {
            mean_if_complete(&lagged[i + 1 - window..=i])
        } else {
            None
        };
        let expanding = (count > 0).then(|| sum / count as f64);

        out.push(windowed.or(expanding));
    }
    out
}

/// Lag-1 rolling aggregator for one metric of one timeline.
#[derive(Debug, Clone, Copy)]
pub struct RollingAggregator {
    window: usize,
}

impl RollingAggregator {
    /// Creates an aggregator with the given window width.
    #[must_use]
    pub const fn new(window: usize) -> Self {
        Self { window }
    }

    /// Creates an aggregator from the pipeline configuration.
    #[must_use]
    pub const fn from_config(config: &FeatureConfig) -> Self {
        Self::new(config.window)
    }

    /// Window width in games.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Rolling form entering each game of a chronological metric series.
    pub fn aggregate(&self, metric: &[Option<f64>]) -> Vec<Option<f64>> {
        rolling_mean_with_backfill(&lag1(metric), self.window)
    }
}

impl Default for RollingAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

/// Expanding mean over a lag-1 series, exposed for cross-checking.
pub fn expanding_mean(lagged: &[Option<f64>]) -> Vec<Option<f64>> {
    (0..lagged.len())
        .map(|i| mean_present(&lagged[..=i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_lag1() {
        assert!(lag1(&[]).is_empty());
        assert_eq!(lag1(&[Some(1.0)]), vec![None]);
        assert_eq!(lag1(&[Some(1.0), None, Some(3.0)]), vec![None, Some(1.0), None]);
    }

    #[test]
    fn test_first_game_stays_missing() {
        let out = RollingAggregator::default().aggregate(&some(&[4.0]));
        assert_eq!(out, vec![None]);
    }

    #[test]
    fn test_backfill_before_full_window() {
        let out = RollingAggregator::default().aggregate(&some(&[2.0, 4.0, 1.0, 5.0, 3.0]));
        assert!(out[0].is_none());
        assert_relative_eq!(out[1].unwrap(), 2.0);
        assert_relative_eq!(out[2].unwrap(), 3.0);
        assert_relative_eq!(out[3].unwrap(), 7.0 / 3.0);
        assert_relative_eq!(out[4].unwrap(), 3.0);
    }

    #[test]
    fn test_window_takes_over_after_five_prior_games() {
        let goals = some(&[10.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0]);
        let out = RollingAggregator::default().aggregate(&goals);

        // Five prior games: games 0..5.
        assert_relative_eq!(out[5].unwrap(), 4.0);
        // Window drops game 0, the expanding mean would not.
        assert_relative_eq!(out[6].unwrap(), 3.0);
        assert_relative_eq!(out[7].unwrap(), 4.0);
    }

    #[test]
    fn test_current_game_never_leaks() {
        let base = some(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let agg = RollingAggregator::default();
        let reference = agg.aggregate(&base);

        for i in 0..base.len() {
            let mut changed = base.clone();
            changed[i] = Some(100.0);
            let out = agg.aggregate(&changed);
            assert_eq!(out[i], reference[i], "row {i} saw its own value");
        }
    }

    #[test]
    fn test_missing_metric_falls_back_to_expanding() {
        let metric = vec![
            Some(1.0),
            Some(2.0),
            None,
            Some(3.0),
            Some(4.0),
            Some(5.0),
            Some(6.0),
            Some(7.0),
            Some(8.0),
        ];
        let out = RollingAggregator::default().aggregate(&metric);

        // Row 6 window is lag[2..=6] = [2, None, 3, 4, 5]: incomplete.
        assert_relative_eq!(out[6].unwrap(), 15.0 / 5.0);
        // Row 8 window is lag[4..=8] = [3, 4, 5, 6, 7]: complete.
        assert_relative_eq!(out[8].unwrap(), 5.0);
    }

    #[test]
    fn test_all_missing_history_stays_missing() {
        let out = RollingAggregator::default().aggregate(&[None, None, Some(1.0)]);
        assert_eq!(out, vec![None, None, None]);
    }

    #[test]
    fn test_window_of_one_is_previous_game() {
        let out = RollingAggregator::new(1).aggregate(&some(&[3.0, 5.0, 8.0]));
        assert_eq!(out, vec![None, Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_matches_expanding_mean_before_window() {
        let lagged = lag1(&some(&[2.0, 7.0, 1.0, 4.0]));
        assert_eq!(rolling_mean_with_backfill(&lagged, 5), expanding_mean(&lagged));
    }
}
