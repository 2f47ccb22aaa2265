//! Rest, rolling form and fatigue features on the row's own team timeline.

use polars::prelude::*;
use puckline_traits::{GameLog, Result, TimelineFeature, columns};
use tracing::info;

use crate::catalogue::{
    BACK_TO_BACK, DAYS_REST, FATIGUE_ADJ_GOALS, FATIGUE_ADJ_XG, FATIGUE_PENALTY,
    rolling_goals_column, rolling_xg_column,
};
use crate::config::FeatureConfig;
use crate::fatigue::FatigueCombiner;
use crate::rest::RestCalculator;
use crate::transform::transform_timelines;

const METRICS: [&str; 2] = [columns::GOALS_FOR, columns::XGOALS_FOR];

const REQUIRED: [&str; 4] = [
    columns::TEAM,
    columns::GAME_DATE,
    columns::GOALS_FOR,
    columns::XGOALS_FOR,
];

/// Team-anchored features.
///
/// Produces, in order: `days_rest`, `back_to_back`, `rolling_goals_{w}`,
/// `rolling_xg_{w}`, `fatigue_penalty`, `fatigue_adj_goals`, `fatigue_adj_xg`.
#[derive(Debug, Clone, Default)]
pub struct TeamForm {
    config: FeatureConfig,
}

impl TeamForm {
    /// Create the stage with the given configuration.
    #[must_use]
    pub const fn new(config: FeatureConfig) -> Self {
        Self { config }
    }
}

impl TimelineFeature for TeamForm {
    fn name(&self) -> &str {
        "team_form"
    }

    fn compute(&self, log: &GameLog) -> Result<Vec<Series>> {
        log.require_columns(self.required_columns())?;

        let mut out = transform_timelines(log, columns::TEAM, &METRICS, &self.config)?;
        let rolling_xg = out.rolling.pop().unwrap_or_default();
        let rolling_goals = out.rolling.pop().unwrap_or_default();

        let back_to_back = RestCalculator::back_to_back(&out.days_rest);
        let penalties = FatigueCombiner::from_config(&self.config).penalties(&back_to_back);
        let adj_goals = FatigueCombiner::adjust(&rolling_goals, &penalties);
        let adj_xg = FatigueCombiner::adjust(&rolling_xg, &penalties);

        info!(
            teams = out.entities,
            back_to_backs = back_to_back.iter().filter(|&&b| b == 1).count(),
            "computed team form"
        );

        let window = self.config.window;
        Ok(vec![
            Series::new(DAYS_REST.into(), out.days_rest),
            Series::new(BACK_TO_BACK.into(), back_to_back),
            Series::new(rolling_goals_column(window).into(), rolling_goals),
            Series::new(rolling_xg_column(window).into(), rolling_xg),
            Series::new(FATIGUE_PENALTY.into(), penalties),
            Series::new(FATIGUE_ADJ_GOALS.into(), adj_goals),
            Series::new(FATIGUE_ADJ_XG.into(), adj_xg),
        ])
    }

    fn required_columns(&self) -> &[&str] {
        &REQUIRED
    }

    fn output_columns(&self) -> Vec<String> {
        let window = self.config.window;
        vec![
            DAYS_REST.to_string(),
            BACK_TO_BACK.to_string(),
            rolling_goals_column(window),
            rolling_xg_column(window),
            FATIGUE_PENALTY.to_string(),
            FATIGUE_ADJ_GOALS.to_string(),
            FATIGUE_ADJ_XG.to_string(),
        ]
    }
}
