//! Feature trait for per-entity timeline transforms.
//!
//! A [`TimelineFeature`] reads a [`GameLog`] and produces derived columns,
//! one value per input row and in input row order. Stages never drop or
//! reorder rows, so a pipeline can append each stage's output directly.

use crate::{GameLog, Result};
use polars::prelude::Series;

/// A feature stage that derives columns from a game log.
///
/// Implementations must be deterministic: the output cannot depend on the
/// order entities are visited in. They should also be `Send + Sync` so a
/// pipeline can hold them as trait objects.
///
/// # Example
///
/// ```no_run
/// use puckline_traits::{GameLog, Result, TimelineFeature};
/// use polars::prelude::*;
///
/// struct RowNumber;
///
/// impl TimelineFeature for RowNumber {
///     fn name(&self) -> &str {
///         "row_number"
///     }
///
///     fn compute(&self, log: &GameLog) -> Result<Vec<Series>> {
///         let rows: Vec<u32> = (0..log.len() as u32).collect();
///         Ok(vec![Series::new("row".into(), rows)])
///     }
///
///     fn required_columns(&self) -> &[&str] {
///         &[]
///     }
///
///     fn output_columns(&self) -> Vec<String> {
///         vec!["row".to_string()]
///     }
/// }
/// ```
pub trait TimelineFeature: Send + Sync {
    /// Returns the name of this stage, used in logs.
    fn name(&self) -> &str;

    /// Computes the derived columns for every row of `log`.
    ///
    /// # Returns
    ///
    /// One series per entry of [`output_columns`](Self::output_columns), in
    /// that order, each as long as `log`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required columns are missing or mistyped
    /// - An entity timeline cannot be ordered chronologically
    fn compute(&self, log: &GameLog) -> Result<Vec<Series>>;

    /// Returns the input columns this stage reads.
    fn required_columns(&self) -> &[&str];

    /// Returns the names of the columns this stage produces.
    fn output_columns(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    struct ConstantFeature {
        value: i64,
    }

    impl TimelineFeature for ConstantFeature {
        fn name(&self) -> &str {
            "constant"
        }

        fn compute(&self, log: &GameLog) -> Result<Vec<Series>> {
            log.require_columns(self.required_columns())?;
            Ok(vec![Series::new(
                "constant".into(),
                vec![self.value; log.len()],
            )])
        }

        fn required_columns(&self) -> &[&str] {
            &["team"]
        }

        fn output_columns(&self) -> Vec<String> {
            vec!["constant".to_string()]
        }
    }

    #[test]
    fn test_feature_compute() {
        let feature = ConstantFeature { value: 7 };
        let log = GameLog::new(df! { "team" => &["TOR", "MTL", "BOS"] }.unwrap());

        let columns = feature.compute(&log).unwrap();
        assert_eq!(columns.len(), feature.output_columns().len());
        assert_eq!(columns[0].len(), 3);
        assert_eq!(columns[0].name().as_str(), "constant");
    }

    #[test]
    fn test_feature_checks_columns() {
        let feature = ConstantFeature { value: 7 };
        let log = GameLog::new(df! { "opposingTeam" => &["TOR"] }.unwrap());
        assert!(feature.compute(&log).is_err());
    }

    #[test]
    fn test_feature_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn TimelineFeature>>();
    }
}
