#![doc(issue_tracker_base_url = "https://github.com/puckline/puckline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # puckline
//!
//! Per-team-per-game features from a sequential hockey results table.
//!
//! puckline is an umbrella crate that re-exports the puckline sub-crates and
//! wires them into file-to-file runs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use puckline::{FeatureConfig, build_features};
//!
//! # fn main() -> puckline::Result<()> {
//! let summary = build_features(
//!     "data/processed/moneypuck_modern.csv",
//!     "data/processed/moneypuck_features_final.csv",
//!     FeatureConfig::default(),
//! )?;
//! println!("{} rows enriched", summary.rows);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Game log container, errors, and the [`TimelineFeature`] trait
//! - [`features`] - Timeline builder, rest, rolling, fatigue and opponent stages
//! - [`data`] - CSV persistence and raw-export preparation
//!
//! ## Architecture
//!
//! 1. **Prepare** narrows a raw export to one team-level row per team per game
//! 2. **Timelines** group rows by team (or opponent) and sort them by date
//! 3. **Stages** derive rest, rolling form, fatigue and opponent context
//! 4. **Pipeline** appends every stage's columns in input row order

use std::path::Path;

use tracing::info;

/// Version information for the puckline crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core types and traits.
pub mod traits {
    pub use puckline_traits::*;
}

/// Feature stages and the pipeline.
pub mod features {
    pub use puckline_features::*;
}

/// Persistence and upstream preparation.
pub mod data {
    pub use puckline_data::*;
}

pub use puckline_data::PrepareConfig;
pub use puckline_features::{FeatureConfig, FeaturePipeline, RestClamp};
pub use puckline_traits::{GameLog, PucklineError, Result, TimelineFeature};

/// Outcome of a file-to-file run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written.
    pub rows: usize,
    /// Columns written, input and derived.
    pub columns: usize,
}

/// Reads `input`, appends every derived feature column, and writes `output`.
///
/// Nothing is written unless every stage succeeds.
///
/// # Errors
///
/// Any schema, ordering, configuration, or I/O error aborts the run.
pub fn build_features(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: FeatureConfig,
) -> Result<RunSummary> {
    let pipeline = FeaturePipeline::new(config)?;
    let log = puckline_data::read_game_log(input)?;
    let enriched = pipeline.run(log)?;
    let summary = RunSummary {
        rows: enriched.len(),
        columns: enriched.columns().len(),
    };
    puckline_data::write_game_log(enriched, output)?;
    info!(rows = summary.rows, columns = summary.columns, "feature build complete");
    Ok(summary)
}

/// Reads a raw export, keeps one team-level row per team per game, and writes it.
///
/// # Errors
///
/// Fails on missing filter columns, duplicate team-game rows, or I/O errors.
pub fn prepare_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &PrepareConfig,
) -> Result<RunSummary> {
    let raw = puckline_data::read_game_log(input)?;
    let prepared = puckline_data::prepare(&raw, config)?;
    let summary = RunSummary {
        rows: prepared.len(),
        columns: prepared.columns().len(),
    };
    puckline_data::write_game_log(prepared, output)?;
    Ok(summary)
}
