//! The per-entity timeline transform shared by every feature stage.
//!
//! Both the team pass and the opponent pass run this same function, keyed on
//! a different column, so the two can never drift apart.

use puckline_traits::{GameLog, Result};
use tracing::debug;

use crate::config::FeatureConfig;
use crate::rest::RestCalculator;
use crate::rolling::RollingAggregator;
use crate::timeline::{Timelines, gather, scatter};

/// Rest and rolling values for every row, in the log's row order.
#[derive(Debug, Clone)]
pub struct TimelineOutputs {
    /// Days of rest before each row's game, on the grouping entity's timeline.
    pub days_rest: Vec<i64>,
    /// One rolling series per requested metric, same order as requested.
    pub rolling: Vec<Vec<Option<f64>>>,
    /// Number of distinct entities seen.
    pub entities: usize,
}

/// Groups `log` by `key_column`, orders each group by `gameDate`, and computes
/// rest days plus the lag-1 rolling mean of each metric in `metrics`.
///
/// Results are written back to the row each value belongs to, so the output
/// is independent of the order entities are processed in.
///
/// # Errors
///
/// - Schema errors for absent or mistyped key, date, or metric columns
/// - Ordering errors for unreadable dates or same-day duplicates
pub fn transform_timelines(
    log: &GameLog,
    key_column: &str,
    metrics: &[&str],
    config: &FeatureConfig,
) -> Result<TimelineOutputs> {
    let keys = log.strings(key_column)?;
    let dates = log.game_dates()?;
    let metric_values = metrics
        .iter()
        .map(|name| log.floats(name))
        .collect::<Result<Vec<_>>>()?;

    let timelines = Timelines::build(&keys, &dates, key_column)?;

    let rest = RestCalculator::from_config(config);
    let aggregator = RollingAggregator::from_config(config);

    let n = log.len();
    let mut days_rest = vec![config.default_rest_days; n];
    let mut rolling = vec![vec![None; n]; metrics.len()];

    for (entity, rows) in timelines.iter() {
        let timeline_dates: Vec<_> = rows.iter().filter_map(|&row| dates[row]).collect();
        scatter(&mut days_rest, rows, &rest.days_rest(&timeline_dates));

        for (values, target) in metric_values.iter().zip(rolling.iter_mut()) {
            let series = aggregator.aggregate(&gather(values, rows));
            scatter(target, rows, &series);
        }

        debug!(key = key_column, entity, games = rows.len(), "processed timeline");
    }

    Ok(TimelineOutputs {
        days_rest,
        rolling,
        entities: timelines.len(),
    })
}
