//! Opponent-context features.
//!
//! Re-keys the record set on `opposingTeam` and runs the same timeline
//! transform as the team pass. Each row then describes the opposing team's
//! trailing form entering that date, independent of who it is facing.

use polars::prelude::*;
use puckline_traits::{GameLog, Result, TimelineFeature, columns};
use tracing::info;

use crate::catalogue::{OPP_DAYS_REST, opp_rolling_xg_against_column};
use crate::config::FeatureConfig;
use crate::transform::transform_timelines;

const REQUIRED: [&str; 3] = [
    columns::OPPOSING_TEAM,
    columns::GAME_DATE,
    columns::XGOALS_AGAINST,
];

/// Opponent-anchored features: `opp_rolling_xg_against_{w}` and `opp_days_rest`.
#[derive(Debug, Clone, Default)]
pub struct OpponentContext {
    config: FeatureConfig,
}

impl OpponentContext {
    /// Create the stage with the given configuration.
    #[must_use]
    pub const fn new(config: FeatureConfig) -> Self {
        Self { config }
    }
}

impl TimelineFeature for OpponentContext {
    fn name(&self) -> &str {
        "opponent_context"
    }

    fn compute(&self, log: &GameLog) -> Result<Vec<Series>> {
        log.require_columns(self.required_columns())?;

        let mut out = transform_timelines(
            log,
            columns::OPPOSING_TEAM,
            &[columns::XGOALS_AGAINST],
            &self.config,
        )?;
        let rolling_xga = out.rolling.pop().unwrap_or_default();

        info!(opponents = out.entities, "computed opponent context");

        Ok(vec![
            Series::new(
                opp_rolling_xg_against_column(self.config.window).into(),
                rolling_xga,
            ),
            Series::new(OPP_DAYS_REST.into(), out.days_rest),
        ])
    }

    fn required_columns(&self) -> &[&str] {
        &REQUIRED
    }

    fn output_columns(&self) -> Vec<String> {
        vec![
            opp_rolling_xg_against_column(self.config.window),
            OPP_DAYS_REST.to_string(),
        ]
    }
}
