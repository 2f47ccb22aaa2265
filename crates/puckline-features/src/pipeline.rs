//! End-to-end feature pipeline.

use std::fmt;

use polars::prelude::Series;
use puckline_traits::{GameLog, PucklineError, Result, TimelineFeature, columns};
use tracing::{debug, info};

use crate::config::FeatureConfig;
use crate::opponent::OpponentContext;
use crate::team_form::TeamForm;

/// Runs every feature stage over a game log and appends their columns.
///
/// All stages are computed before any column is appended, so a failing stage
/// leaves no partially enriched log behind.
///
/// # Example
///
/// ```no_run
/// use puckline_features::{FeatureConfig, FeaturePipeline};
/// use puckline_traits::GameLog;
/// # fn load() -> GameLog { unimplemented!() }
///
/// let pipeline = FeaturePipeline::new(FeatureConfig::default())?;
/// let enriched = pipeline.run(load())?;
/// # Ok::<(), puckline_traits::PucklineError>(())
/// ```
pub struct FeaturePipeline {
    config: FeatureConfig,
    stages: Vec<Box<dyn TimelineFeature>>,
}

impl FeaturePipeline {
    /// Creates the standard pipeline: team form followed by opponent context.
    ///
    /// # Errors
    ///
    /// Returns [`PucklineError::InvalidConfig`] if the configuration is rejected.
    pub fn new(config: FeatureConfig) -> Result<Self> {
        config.validate()?;
        let stages: Vec<Box<dyn TimelineFeature>> = vec![
            Box::new(TeamForm::new(config.clone())),
            Box::new(OpponentContext::new(config.clone())),
        ];
        Ok(Self { config, stages })
    }

    /// The configuration the stages were built with.
    pub const fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Every column the pipeline appends, in output order.
    pub fn output_columns(&self) -> Vec<String> {
        self.stages
            .iter()
            .flat_map(|stage| stage.output_columns())
            .collect()
    }

    /// Enriches `log` with every derived column.
    ///
    /// Row order is preserved: row `i` of the output is row `i` of the input
    /// with the derived columns appended.
    ///
    /// # Errors
    ///
    /// - [`PucklineError::Schema`] if a required input column is missing
    /// - [`PucklineError::Ordering`] if any entity timeline is malformed
    pub fn run(&self, log: GameLog) -> Result<GameLog> {
        log.require_columns(&columns::REQUIRED)?;
        info!(rows = log.len(), "running feature pipeline");

        let mut derived: Vec<Series> = Vec::new();
        for stage in &self.stages {
            let series = stage.compute(&log)?;
            if let Some(bad) = series.iter().find(|s| s.len() != log.len()) {
                return Err(PucklineError::InvalidData(format!(
                    "stage '{}' produced {} values for '{}', expected {}",
                    stage.name(),
                    bad.len(),
                    bad.name(),
                    log.len()
                )));
            }
            debug!(stage = stage.name(), columns = series.len(), "stage complete");
            derived.extend(series);
        }

        log.with_columns(derived)
    }
}

impl fmt::Debug for FeaturePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeaturePipeline")
            .field("config", &self.config)
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
