//! Common types used throughout the puckline pipeline.
//!
//! This module defines the game log container and the typed column accessors
//! every feature stage reads its inputs through.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::{PucklineError, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A team (entity) identifier such as `"TOR"`.
pub type TeamId = String;

/// Days between 0001-01-01 and 1970-01-01, the offset of Polars' `Date` encoding.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Names of the identity and metric columns of a game record.
pub mod columns {
    /// Entity identifier of the row's own team.
    pub const TEAM: &str = "team";
    /// Entity identifier of the other side in the same game.
    pub const OPPOSING_TEAM: &str = "opposingTeam";
    /// Calendar date of the game.
    pub const GAME_DATE: &str = "gameDate";
    /// Goals scored by `team`.
    pub const GOALS_FOR: &str = "goalsFor";
    /// Expected goals for `team`.
    pub const XGOALS_FOR: &str = "xGoalsFor";
    /// Expected goals against `team`.
    pub const XGOALS_AGAINST: &str = "xGoalsAgainst";

    /// Every column the feature pipeline reads.
    pub const REQUIRED: [&str; 6] = [
        TEAM,
        OPPOSING_TEAM,
        GAME_DATE,
        GOALS_FOR,
        XGOALS_FOR,
        XGOALS_AGAINST,
    ];
}

/// Container for a team-game record set.
///
/// `GameLog` wraps a Polars DataFrame holding one row per team per game.
/// Feature stages only ever append columns to it; the identity and metric
/// columns are read, never rewritten.
///
/// # Expected Schema
///
/// - `team`, `opposingTeam`: string entity identifiers
/// - `gameDate`: a `Date` column, an integer `YYYYMMDD`, or a string in
///   `YYYYMMDD` / `YYYY-MM-DD` form
/// - `goalsFor`, `xGoalsFor`, `xGoalsAgainst`: numeric
///
/// Any other columns pass through untouched.
///
/// # Example
///
/// ```no_run
/// use puckline_traits::GameLog;
/// use polars::prelude::*;
///
/// let df = df! {
///     "team" => &["TOR", "MTL"],
///     "opposingTeam" => &["MTL", "TOR"],
///     "gameDate" => &[20240110, 20240110],
/// }.unwrap();
///
/// let log = GameLog::new(df);
/// ```
#[derive(Debug, Clone)]
pub struct GameLog {
    data: DataFrame,
}

impl GameLog {
    /// Creates a new `GameLog` from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the log holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Fails with a schema error naming the first absent column.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(PucklineError::schema(*missing, "required column not found")),
            None => Ok(()),
        }
    }

    fn series(&self, name: &str) -> Result<&Series> {
        self.data
            .column(name)
            .map(Column::as_materialized_series)
            .map_err(|_| PucklineError::schema(name, "required column not found"))
    }

    /// Reads a string column.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the column is absent or not a string column.
    pub fn strings(&self, name: &str) -> Result<Vec<Option<String>>> {
        let series = self.series(name)?;
        if series.dtype() != &DataType::String {
            return Err(PucklineError::schema(
                name,
                format!("expected string values, found {}", series.dtype()),
            ));
        }
        Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect())
    }

    /// Reads a numeric column as `f64`, keeping nulls.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the column is absent or not numeric.
    pub fn floats(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let series = self.series(name)?;
        let dtype = series.dtype();
        if !(dtype.is_float() || dtype.is_integer()) {
            return Err(PucklineError::schema(
                name,
                format!("expected numeric values, found {dtype}"),
            ));
        }
        let cast = series.cast(&DataType::Float64)?;
        Ok(cast.f64()?.into_iter().collect())
    }

    /// Reads an integer column as `i64`, keeping nulls.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the column is absent or not an integer column.
    pub fn integers(&self, name: &str) -> Result<Vec<Option<i64>>> {
        let series = self.series(name)?;
        if !series.dtype().is_integer() {
            return Err(PucklineError::schema(
                name,
                format!("expected integer values, found {}", series.dtype()),
            ));
        }
        let cast = series.cast(&DataType::Int64)?;
        Ok(cast.i64()?.into_iter().collect())
    }

    /// Reads the `gameDate` column.
    ///
    /// Values that are null or cannot be read as a calendar date come back as
    /// `None`; the timeline builder reports them together with the entity they
    /// belong to.
    ///
    /// # Errors
    ///
    /// Returns a schema error if the column is absent or of a type that can
    /// never hold a date.
    pub fn game_dates(&self) -> Result<Vec<Option<Date>>> {
        let series = self.series(columns::GAME_DATE)?;
        let dtype = series.dtype().clone();
        match dtype {
            DataType::Date | DataType::Datetime(_, _) => {
                let days = series.cast(&DataType::Date)?.cast(&DataType::Int32)?;
                Ok(days
                    .i32()?
                    .into_iter()
                    .map(|d| d.and_then(|d| NaiveDate::from_num_days_from_ce_opt(d + EPOCH_DAYS_FROM_CE)))
                    .collect())
            }
            DataType::String => Ok(series
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_game_date))
                .collect()),
            dt if dt.is_integer() => {
                let cast = series.cast(&DataType::Int64)?;
                Ok(cast
                    .i64()?
                    .into_iter()
                    .map(|v| v.and_then(date_from_yyyymmdd))
                    .collect())
            }
            other => Err(PucklineError::schema(
                columns::GAME_DATE,
                format!("cannot read dates from a {other} column"),
            )),
        }
    }

    /// Appends columns, returning the enriched log.
    ///
    /// # Errors
    ///
    /// Fails if a column's length differs from the log's height or its name
    /// collides with an input column.
    pub fn with_columns(self, new_columns: Vec<Series>) -> Result<Self> {
        let mut data = self.data;
        for series in new_columns {
            if data
                .get_column_names()
                .iter()
                .any(|s| s.as_str() == series.name().as_str())
            {
                return Err(PucklineError::schema(
                    series.name().as_str(),
                    "derived column already present in input",
                ));
            }
            data.with_column(series)?;
        }
        Ok(Self { data })
    }
}

impl From<DataFrame> for GameLog {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for GameLog {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

/// Parses a date written as `YYYYMMDD` or `YYYY-MM-DD`.
pub fn parse_game_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Converts an integer such as `20240110` into a date.
pub fn date_from_yyyymmdd(value: i64) -> Option<Date> {
    if value <= 0 {
        return None;
    }
    let year = i32::try_from(value / 10_000).ok()?;
    let month = u32::try_from((value / 100) % 100).ok()?;
    let day = u32::try_from(value % 100).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
