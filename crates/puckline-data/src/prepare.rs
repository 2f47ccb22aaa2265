//! Upstream preparation of raw team-game data.
//!
//! Raw exports hold one row per team per game per game situation and also
//! player-level rows. The feature pipeline expects exactly one all-situation,
//! team-level row per (game, team); this module narrows the raw table to that
//! shape and verifies the invariant.

use std::collections::HashSet;

use polars::prelude::*;
use puckline_traits::{GameLog, PucklineError, Result, columns};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Game situation column (`all`, `5on5`, ...).
pub const SITUATION: &str = "situation";
/// Row granularity column (`Team Level`, or a player position).
pub const POSITION: &str = "position";
/// Season start year.
pub const SEASON: &str = "season";
/// Game identifier shared by both teams' rows.
pub const GAME_ID: &str = "gameId";

/// Filter parameters for [`prepare`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    /// Situation to keep (default: "all")
    pub situation: String,

    /// Row granularity to keep (default: "Team Level")
    pub position: String,

    /// First season to keep (default: 2017)
    pub min_season: i64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            situation: "all".to_string(),
            position: "Team Level".to_string(),
            min_season: 2017,
        }
    }
}

/// Keeps only rows matching the configured situation, position and seasons.
///
/// # Errors
///
/// Returns a schema error if a filter column is missing or mistyped.
pub fn filter_rows(log: &GameLog, config: &PrepareConfig) -> Result<GameLog> {
    log.require_columns(&[SITUATION, POSITION, SEASON])?;
    let situations = log.strings(SITUATION)?;
    let positions = log.strings(POSITION)?;
    let seasons = log.integers(SEASON)?;

    let mask: BooleanChunked = situations
        .iter()
        .zip(&positions)
        .zip(&seasons)
        .map(|((situation, position), season)| {
            situation.as_deref() == Some(config.situation.as_str())
                && position.as_deref() == Some(config.position.as_str())
                && season.is_some_and(|s| s >= config.min_season)
        })
        .collect();

    let filtered = log.data().filter(&mask)?;
    Ok(GameLog::new(filtered))
}

/// Checks that no (game, team) pair occurs more than once.
///
/// # Errors
///
/// - [`PucklineError::DuplicateRecord`] naming the first repeated pair
/// - [`PucklineError::InvalidData`] for a row with no game or team identifier
pub fn validate_unique_team_games(log: &GameLog) -> Result<()> {
    log.require_columns(&[GAME_ID, columns::TEAM])?;
    let games = identifiers(log, GAME_ID)?;
    let teams = log.strings(columns::TEAM)?;

    let mut seen = HashSet::with_capacity(log.len());
    for (row, (game, team)) in games.into_iter().zip(teams).enumerate() {
        let (Some(game), Some(team)) = (game, team) else {
            return Err(PucklineError::InvalidData(format!(
                "missing {GAME_ID} or {} at row {row}",
                columns::TEAM
            )));
        };
        if !seen.insert((game.clone(), team.clone())) {
            return Err(PucklineError::DuplicateRecord { game, team });
        }
    }
    Ok(())
}

/// Filters a raw table and validates the one-row-per-team-per-game invariant.
///
/// # Errors
///
/// Fails on missing filter columns or on duplicate team-game rows left after
/// filtering.
pub fn prepare(raw: &GameLog, config: &PrepareConfig) -> Result<GameLog> {
    let filtered = filter_rows(raw, config)?;
    info!(
        raw_rows = raw.len(),
        kept_rows = filtered.len(),
        situation = %config.situation,
        position = %config.position,
        min_season = config.min_season,
        "filtered raw rows"
    );
    validate_unique_team_games(&filtered)?;
    Ok(filtered)
}

/// Reads an identifier column that may be stored as text or as integers.
fn identifiers(log: &GameLog, name: &str) -> Result<Vec<Option<String>>> {
    match log.strings(name) {
        Ok(values) => Ok(values),
        Err(PucklineError::Schema { .. }) => Ok(log
            .integers(name)?
            .into_iter()
            .map(|v| v.map(|v| v.to_string()))
            .collect()),
        Err(other) => Err(other),
    }
}
