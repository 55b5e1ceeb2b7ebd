//! Daily date sequence generation.

use chrono::NaiveDate;

/// Generates `n_days` consecutive daily dates starting at `start`.
///
/// # Example
///
/// ```ignore
/// let start = NaiveDate::from_ymd_opt(2000, 2, 28).unwrap();
/// let dates = daily_sequence(start, 3);
/// // Feb 28, Feb 29, Mar 1
/// ```
pub fn daily_sequence(start: NaiveDate, n_days: usize) -> Vec<NaiveDate> {
    start.iter_days().take(n_days).collect()
}
