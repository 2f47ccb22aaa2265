//! Reading and writing game logs as CSV.

use std::fs::{self, File};
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

use polars::prelude::*;
use puckline_traits::{GameLog, Result};
use tracing::{debug, info};

/// Rows sampled when inferring column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// Loads a CSV file with a header row into a [`GameLog`].
///
/// # Errors
///
/// Returns an I/O error if the file does not exist, or a Polars error if it
/// cannot be parsed.
pub fn read_game_log(path: impl AsRef<Path>) -> Result<GameLog> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(IoError::new(
            ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        )
        .into());
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    info!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded game log");
    Ok(GameLog::new(df))
}

/// Writes a [`GameLog`] as CSV.
///
/// The frame is written to a hidden sibling file first and renamed over
/// `path` only once the write succeeded, so `path` never holds a partial
/// table. Missing parent directories are created.
///
/// # Errors
///
/// Returns an I/O or Polars error if the file cannot be written.
pub fn write_game_log(log: GameLog, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let rows = log.len();
    let mut df = log.into_inner();

    let written: Result<()> = File::create(&staging)
        .map_err(Into::into)
        .and_then(|mut file| {
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)
                .map_err(Into::into)
        });
    if let Err(err) = written {
        let _ = fs::remove_file(&staging);
        return Err(err);
    }

    fs::rename(&staging, path)?;
    debug!(staging = %staging.display(), "renamed staging file");
    info!(path = %path.display(), rows, "wrote game log");
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use puckline_traits::PucklineError;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("puckline-io-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_round_trip_keeps_nulls_and_dates() {
        let path = scratch("round_trip.csv");
        let df = df! {
            "team" => &["TOR", "MTL"],
            "gameDate" => &[20240110i64, 20240111],
            "rolling_goals_5" => &[None, Some(2.5)],
        }
        .unwrap();

        write_game_log(GameLog::new(df), &path).unwrap();
        let log = read_game_log(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.integers("gameDate").unwrap(), vec![Some(20240110), Some(20240111)]);
        assert_eq!(log.floats("rolling_goals_5").unwrap(), vec![None, Some(2.5)]);
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let result = read_game_log(scratch("does_not_exist.csv"));
        assert!(matches!(result, Err(PucklineError::Io(_))));
    }

    #[test]
    fn test_staging_path_is_hidden_sibling() {
        let staged = staging_path(Path::new("data/processed/features.csv"));
        assert_eq!(staged, PathBuf::from("data/processed/.features.csv.partial"));
    }
}
