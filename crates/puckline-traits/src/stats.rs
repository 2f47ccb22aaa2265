//! Null-aware averaging helpers shared by the rolling aggregators.

use ndarray::Array1;

/// Mean of the present values in `values`, or `None` if every value is missing.
///
/// Non-finite values count as missing, matching how a null-skipping rolling
/// mean treats NaN inputs.
///
/// # Examples
///
/// ```
/// use puckline_traits::stats::mean_present;
///
/// assert_eq!(mean_present(&[Some(2.0), None, Some(4.0)]), Some(3.0));
/// assert_eq!(mean_present(&[None, None]), None);
/// ```
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let present: Array1<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    present.mean()
}

/// Mean of `values` if every one of them is present, otherwise `None`.
///
/// This is the "full window" condition of a fixed-width rolling mean: the
/// window only yields a value when it is completely populated.
///
/// # Examples
///
/// ```
/// use puckline_traits::stats::mean_if_complete;
///
/// assert_eq!(mean_if_complete(&[Some(1.0), Some(2.0)]), Some(1.5));
/// assert_eq!(mean_if_complete(&[Some(1.0), None]), None);
/// assert_eq!(mean_if_complete(&[]), None);
/// ```
pub fn mean_if_complete(values: &[Option<f64>]) -> Option<f64> {
    if values.is_empty() || values.iter().any(|v| !v.is_some_and(f64::is_finite)) {
        return None;
    }
    mean_present(values)
}
