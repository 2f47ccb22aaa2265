//! Feature engineering over team game timelines.
//!
//! This crate turns a one-row-per-team-per-game log into model features:
//! - Rest: days since the previous game and back-to-back flags
//! - Form: lag-1 rolling means of goals and expected goals
//! - Fatigue: rolling form discounted on back-to-back games
//! - Opponent: the opposing team's rest and rolling expected goals against
//!
//! Every rolling value looks only at games strictly before the row's own
//! game. Early rows with too little history hold nulls, never zeros.
//!
//! # Example
//!
//! ```ignore
//! use puckline_features::{FeatureConfig, FeaturePipeline};
//!
//! let pipeline = FeaturePipeline::new(FeatureConfig::default())?;
//! let enriched = pipeline.run(game_log)?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod catalogue;
pub mod config;
pub mod fatigue;
pub mod opponent;
pub mod pipeline;
pub mod rest;
pub mod rolling;
pub mod team_form;
pub mod timeline;
pub mod transform;

// Re-export key types
pub use catalogue::{FeatureGroup, FeatureInfo, available_features};
pub use config::{FeatureConfig, RestClamp};
pub use fatigue::FatigueCombiner;
pub use opponent::OpponentContext;
pub use pipeline::FeaturePipeline;
pub use rest::RestCalculator;
pub use rolling::RollingAggregator;
pub use team_form::TeamForm;
pub use timeline::Timelines;
pub use transform::{TimelineOutputs, transform_timelines};
