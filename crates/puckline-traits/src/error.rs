//! Error types for the puckline pipeline.
//!
//! Every fatal condition of a run maps onto one variant of [`PucklineError`].
//! Missing history for a rolling window is not an error; it is carried as a
//! null in the output columns.

use thiserror::Error;

/// The main error type for puckline operations.
#[derive(Debug, Error)]
pub enum PucklineError {
    /// A required column is absent or cannot be read as the required kind.
    #[error("Schema error in column '{column}': {reason}")]
    Schema {
        /// Name of the offending column.
        column: String,
        /// What is wrong with it.
        reason: String,
    },

    /// An entity timeline cannot be put into chronological order.
    #[error("Ordering error for entity '{entity}': {reason}")]
    Ordering {
        /// The team whose timeline is malformed.
        entity: String,
        /// What is wrong with it.
        reason: String,
    },

    /// More than one row exists for a (game, team) pair.
    #[error("Duplicate team-game row: game {game}, team '{team}'")]
    DuplicateRecord {
        /// Game identifier.
        game: String,
        /// Team identifier.
        team: String,
    },

    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A configuration value is outside its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding a JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl PucklineError {
    /// Shorthand for a [`PucklineError::Schema`] error.
    pub fn schema(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`PucklineError::Ordering`] error.
    pub fn ordering(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Ordering {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}

impl From<String> for PucklineError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for PucklineError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for puckline operations.
pub type Result<T> = std::result::Result<T, PucklineError>;
