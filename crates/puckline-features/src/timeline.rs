//! Entity timeline builder.
//!
//! Partitions a record set by an entity key and orders each partition by
//! game date. Every "prior game" notion downstream means "earlier in one of
//! these timelines".

use std::collections::BTreeMap;

use puckline_traits::{Date, PucklineError, Result, TeamId};

/// Row indices of every entity's games, in chronological order.
///
/// Entities are held in a `BTreeMap`, so iteration order is the sorted key
/// order and never depends on hashing or on input order.
#[derive(Debug, Clone, Default)]
pub struct Timelines {
    groups: BTreeMap<TeamId, Vec<usize>>,
}

impl Timelines {
    /// Builds timelines from parallel key and date columns.
    ///
    /// `key_column` only names the grouping column in error messages.
    /// Rows sharing a date keep their input order (stable sort), but such a
    /// pair is then rejected as an ordering error since one entity cannot
    /// play twice on one date.
    ///
    /// # Errors
    ///
    /// - [`PucklineError::Schema`] if a row has no entity identifier
    /// - [`PucklineError::Ordering`] if a row has no readable date, or an
    ///   entity has two rows on the same date
    pub fn build(keys: &[Option<String>], dates: &[Option<Date>], key_column: &str) -> Result<Self> {
        if keys.len() != dates.len() {
            return Err(PucklineError::InvalidData(format!(
                "{} keys but {} dates",
                keys.len(),
                dates.len()
            )));
        }

        let mut groups: BTreeMap<TeamId, Vec<usize>> = BTreeMap::new();
        for (row, (key, date)) in keys.iter().zip(dates).enumerate() {
            let Some(key) = key else {
                return Err(PucklineError::schema(
                    key_column,
                    format!("missing entity identifier at row {row}"),
                ));
            };
            if date.is_none() {
                return Err(PucklineError::ordering(
                    key.as_str(),
                    format!("missing or malformed gameDate at row {row}"),
                ));
            }
            groups.entry(key.clone()).or_default().push(row);
        }

        for (entity, rows) in &mut groups {
            rows.sort_by_key(|&row| dates[row]);
            if let Some(pair) = rows.windows(2).find(|pair| dates[pair[0]] == dates[pair[1]]) {
                let date = dates[pair[0]].map(|d| d.to_string()).unwrap_or_default();
                return Err(PucklineError::ordering(
                    entity.as_str(),
                    format!("rows {} and {} share the date {date}", pair[0], pair[1]),
                ));
            }
        }

        Ok(Self { groups })
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no entities at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The chronological row indices of one entity.
    pub fn rows(&self, entity: &str) -> Option<&[usize]> {
        self.groups.get(entity).map(Vec::as_slice)
    }

    /// Iterates over `(entity, rows)` in sorted entity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.groups
            .iter()
            .map(|(entity, rows)| (entity.as_str(), rows.as_slice()))
    }
}

/// Collects `values` at `rows`, in the order of `rows`.
pub fn gather<T: Clone>(values: &[T], rows: &[usize]) -> Vec<T> {
    rows.iter().map(|&row| values[row].clone()).collect()
}

/// Writes `timeline_values[k]` into `target[rows[k]]`.
pub fn scatter<T: Clone>(target: &mut [T], rows: &[usize], timeline_values: &[T]) {
    for (&row, value) in rows.iter().zip(timeline_values) {
        target[row] = value.clone();
    }
}
