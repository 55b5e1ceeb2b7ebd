//! Per-period reductions and day-of-year threshold lookup.

use chrono::NaiveDate;
use ndarray::Array2;
use xcalc_array::{Coord, DataArray};
use xcalc_calendar::{Doy, Frequency};
use xcalc_stats::run_lengths;

use crate::error::IndexError;

/// Statistic summarising the spells of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpellStat {
    /// Number of spells.
    Frequency,
    /// Length of the longest spell, 0 if none.
    MaxLength,
    /// Number of days inside spells.
    TotalLength,
}

/// Summarises the runs of `true` in `mask` that last at least `window` days.
pub(crate) fn spell_stat(mask: &[bool], window: usize, stat: SpellStat) -> f64 {
    let spells = run_lengths(mask).into_iter().filter(|&len| len >= window.max(1));
    let value = match stat {
        SpellStat::Frequency => spells.count(),
        SpellStat::MaxLength => spells.max().unwrap_or(0),
        SpellStat::TotalLength => spells.sum::<usize>(),
    };
    value as f64
}

/// Returns the time axis of `da`.
pub(crate) fn time_axis(da: &DataArray) -> Result<&[NaiveDate], IndexError> {
    da.dates().ok_or_else(|| IndexError::NotATimeSeries {
        variable: da.name().to_string(),
    })
}

/// Reduces each resampling period of every cell to one value.
///
/// `reduce` receives the period's values and dates. The result is labelled
/// by the first date of each period.
pub(crate) fn resample<F>(
    da: &DataArray,
    freq: Frequency,
    name: &str,
    units: &str,
    reduce: F,
) -> Result<DataArray, IndexError>
where
    F: Fn(&[f64], &[NaiveDate]) -> f64,
{
    let dates = time_axis(da)?;
    let periods = freq.periods(dates);
    let mut out = Array2::from_elem((periods.len(), da.n_cells()), f64::NAN);
    for cell in 0..da.n_cells() {
        let series = da.column(cell).to_vec();
        for (p, period) in periods.iter().enumerate() {
            let range = period.range.clone();
            out[[p, cell]] = reduce(&series[range.clone()], &dates[range]);
        }
    }
    let labels = periods.iter().map(|p| p.label).collect();
    Ok(DataArray::new(name, Coord::Time(labels), out, units)?.with_attr("freq", freq.token()))
}

/// Builds a derived time series with the same axis as `da`, cell by cell.
pub(crate) fn derive<F>(da: &DataArray, name: &str, units: &str, f: F) -> Result<DataArray, IndexError>
where
    F: Fn(usize, &[f64], &[NaiveDate]) -> Vec<f64>,
{
    let dates = time_axis(da)?;
    let mut out = Array2::from_elem((da.n_steps(), da.n_cells()), f64::NAN);
    for cell in 0..da.n_cells() {
        let series = da.column(cell).to_vec();
        for (t, v) in f(cell, &series, dates).into_iter().enumerate().take(da.n_steps()) {
            out[[t, cell]] = v;
        }
    }
    Ok(DataArray::new(name, Coord::Time(dates.to_vec()), out, units)?)
}

/// Counts the `true` entries of a boolean indicator series encoded as
/// `1.0` / `0.0`; `NaN` never counts.
pub(crate) fn count_true(values: &[f64]) -> f64 {
    values.iter().filter(|&&v| v == 1.0).count() as f64
}

/// Encodes a condition as `1.0` / `0.0`, propagating missing values.
pub(crate) fn flag(value: f64, condition: bool) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if condition {
        1.0
    } else {
        0.0
    }
}

/// Maps a day-of-year threshold array onto a time axis.
///
/// Each date takes the threshold of its day-of-year for `cell`. Thresholds
/// with a single cell broadcast to every cell. Days the threshold does not
/// cover get `NaN`.
pub(crate) fn thresholds_on(
    per: &DataArray,
    name: &str,
    dates: &[NaiveDate],
    cell: usize,
) -> Result<Vec<f64>, IndexError> {
    if per.doys().is_none() {
        return Err(IndexError::InvalidArgument {
            name: name.to_string(),
            reason: format!("'{}' has no dayofyear axis", per.name()),
        });
    }
    let per_cell = if per.n_cells() == 1 { 0 } else { cell };
    if per_cell >= per.n_cells() {
        return Err(IndexError::InvalidArgument {
            name: name.to_string(),
            reason: format!("has {} cells, data has more", per.n_cells()),
        });
    }
    Ok(dates
        .iter()
        .map(|&d| per.doy_value(Doy::from_date(d), per_cell).unwrap_or(f64::NAN))
        .collect())
}
