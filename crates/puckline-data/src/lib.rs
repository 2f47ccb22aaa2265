//! Persistence and upstream preparation for puckline.
//!
//! Neither module computes features. [`io`] moves game logs between CSV files
//! and memory; [`prepare`] narrows a raw export to one team-level row per
//! team per game before the feature pipeline sees it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod io;
pub mod prepare;

pub use io::{read_game_log, write_game_log};
pub use prepare::{PrepareConfig, filter_rows, prepare, validate_unique_team_games};
