#![doc(issue_tracker_base_url = "https://github.com/puckline/puckline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and trait definitions for the puckline feature pipeline.
//!
//! This crate provides the game log container, the error type, the
//! [`TimelineFeature`] abstraction every feature stage implements, and the
//! null-aware statistics the rolling aggregators share.

/// The version of the puckline-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod feature;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{PucklineError, Result};
pub use feature::TimelineFeature;
pub use types::{Date, GameLog, TeamId, columns};
