//! Day-of-year percentile thresholds over a base period.
//!
//! For every day of year the values of all base-period days within a window
//! centred on it are pooled, and the requested percentile of the pool is
//! taken (type-8 quantile, NaN-skipping). Cells are processed in parallel.

use std::collections::BTreeMap;
use std::sync::Arc;

use ndarray::Array2;
use rayon::prelude::*;
use tracing::info;
use xcalc_array::{ChunkingScope, DataArray, Dataset, Quantity};
use xcalc_calendar::{Doy, expand_indices, period_end, period_start, window_offsets};
use xcalc_indices::Value;
use xcalc_stats::nan_percentile;

use crate::descriptor::{PercentileSpec, Preprocessing};
use crate::error::EngineError;

/// Variable name of a percentile stored in a dataset.
pub const STORED_PERCENTILE_VAR: &str = "per";

/// A percentile spec with every stage override applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileRequest {
    spec: PercentileSpec,
    wet_day_threshold: String,
}

impl PercentileRequest {
    /// Creates a request; `wet_day_threshold` only matters for
    /// precipitation preprocessing.
    pub fn new(spec: PercentileSpec, wet_day_threshold: impl Into<String>) -> Self {
        Self {
            spec,
            wet_day_threshold: wet_day_threshold.into(),
        }
    }

    pub fn spec(&self) -> &PercentileSpec {
        &self.spec
    }

    pub fn wet_day_threshold(&self) -> &str {
        &self.wet_day_threshold
    }
}

/// Computes or passes through percentile arrays, counting the computations.
#[derive(Debug)]
pub struct PercentileEngine {
    window: usize,
    computations: usize,
}

impl PercentileEngine {
    /// Creates an engine pooling `window` days around each day of year.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            computations: 0,
        }
    }

    /// Number of percentiles computed (not passed through) so far.
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Returns the percentile array for `request`.
    ///
    /// A `provided` array is returned as is. A provided dataset must hold the
    /// percentile under [`STORED_PERCENTILE_VAR`]. Otherwise the percentile
    /// is computed from the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] for a provided value that is
    /// neither an array nor a dataset, or a rank outside `[0, 100]`;
    /// [`EngineError::MissingVariable`] if the source variable is absent; and
    /// [`EngineError::EmptyBasePeriod`] if the base period selects no data.
    pub fn materialize(
        &mut self,
        request: &PercentileRequest,
        provided: Option<&Value>,
        dataset: &Dataset,
    ) -> Result<Arc<DataArray>, EngineError> {
        let spec = request.spec();
        match provided {
            Some(Value::Array(per)) => {
                tracing::debug!(param = spec.output_param_name(), "using supplied percentile");
                Ok(Arc::clone(per))
            }
            Some(Value::Dataset(stored)) => {
                let per = stored.get(STORED_PERCENTILE_VAR).map_err(|_| {
                    EngineError::MissingVariable {
                        name: STORED_PERCENTILE_VAR.to_string(),
                    }
                })?;
                tracing::debug!(param = spec.output_param_name(), "using stored percentile");
                Ok(Arc::new(per.clone()))
            }
            Some(other) if !other.is_none() => Err(EngineError::InvalidParameter {
                name: spec.output_param_name().to_string(),
                reason: format!("expected a percentile array, got {}", other.kind()),
            }),
            _ => self.compute(request, dataset).map(Arc::new),
        }
    }

    fn compute(
        &mut self,
        request: &PercentileRequest,
        dataset: &Dataset,
    ) -> Result<DataArray, EngineError> {
        let spec = request.spec();
        let rank = spec.rank();
        if !(0.0..=100.0).contains(&rank) {
            return Err(EngineError::InvalidParameter {
                name: spec.output_param_name().to_string(),
                reason: format!("rank must be within 0..=100, got {rank}"),
            });
        }

        let source = dataset.get(spec.source_variable())?;
        let source = match spec.preprocessing() {
            Preprocessing::None => source.clone(),
            Preprocessing::Precipitation { .. } => {
                let thresh = Quantity::parse(request.wet_day_threshold())?.to(source.units())?;
                source.mask_not_above(thresh)
            }
        };

        let (start, end) = spec.base_period();
        let base = source.sel_time(period_start(start)?, period_end(end)?)?;
        if base.n_steps() == 0 {
            return Err(EngineError::EmptyBasePeriod {
                variable: spec.source_variable().to_string(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let per = {
            let _scope = ChunkingScope::disable_splitting();
            percentile_doy(&base, self.window, rank, spec.output_param_name())?
        };
        self.computations += 1;
        info!(
            variable = spec.source_variable(),
            rank,
            start,
            end,
            days = per.n_steps(),
            "computed day-of-year percentile"
        );
        Ok(per)
    }
}

/// Day-of-year percentile of `data` pooled over `window` days.
///
/// Days of year absent from `data` are absent from the result.
pub fn percentile_doy(
    data: &DataArray,
    window: usize,
    rank: f64,
    name: &str,
) -> Result<DataArray, EngineError> {
    let dates = data.dates().ok_or_else(|| EngineError::InvalidParameter {
        name: data.name().to_string(),
        reason: "percentiles need a time axis".to_string(),
    })?;

    let mut by_doy: BTreeMap<Doy, Vec<usize>> = BTreeMap::new();
    for (i, date) in dates.iter().enumerate() {
        by_doy.entry(Doy::from_date(*date)).or_default().push(i);
    }
    let offsets = window_offsets(window);
    let n = dates.len();
    let pools: Vec<Vec<usize>> = by_doy
        .values()
        .map(|base| expand_indices(base, &offsets, n))
        .collect();

    let columns: Vec<Vec<f64>> = (0..data.n_cells())
        .into_par_iter()
        .map(|cell| {
            let series = data.column(cell);
            pools
                .iter()
                .map(|pool| {
                    let values: Vec<f64> = pool.iter().map(|&i| series[i]).collect();
                    nan_percentile(&values, rank)
                })
                .collect()
        })
        .collect();

    let doys: Vec<Doy> = by_doy.into_keys().collect();
    let mut values = Array2::from_elem((doys.len(), data.n_cells()), f64::NAN);
    for (cell, column) in columns.iter().enumerate() {
        for (row, &v) in column.iter().enumerate() {
            values[[row, cell]] = v;
        }
    }
    Ok(DataArray::from_doy_rows(name, doys, values, data.units())?
        .with_attr("percentile", rank.to_string())
        .with_attr("window", window.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use xcalc_calendar::daily_sequence;

    fn series(values: Vec<f64>) -> DataArray {
        let start = NaiveDate::from_ymd_opt(2001, 1, 1).unwrap();
        let dates = daily_sequence(start, values.len());
        DataArray::from_series("tas", dates, values, "K").unwrap()
    }

    #[test]
    fn window_of_one_is_the_value_itself() {
        let data = series(vec![1.0, 2.0, 3.0]);
        let per = percentile_doy(&data, 1, 50.0, "tas_per").unwrap();
        assert_eq!(per.n_steps(), 3);
        assert_eq!(per.values().column(0).to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(per.attr("percentile"), Some("50"));
    }

    #[test]
    fn pools_neighbouring_days() {
        let data = series(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let per = percentile_doy(&data, 3, 100.0, "tas_per").unwrap();
        let doy = Doy::new(3).unwrap();
        assert_eq!(per.doy_value(doy, 0), Some(4.0));
        // Windows are clipped at the series edges.
        assert_eq!(per.doy_value(Doy::new(1).unwrap(), 0), Some(2.0));
    }

    #[test]
    fn rejects_out_of_range_rank() {
        let ds = Dataset::new().with_variable(series(vec![1.0; 10]));
        let spec = PercentileSpec::new("tas_per", "tas", 120.0).with_base_period("2001", "2001");
        let err = PercentileEngine::new(5)
            .materialize(&PercentileRequest::new(spec, "1 mm/day"), None, &ds)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { .. }));
    }

    #[test]
    fn rejects_non_array_percentile() {
        let spec = PercentileSpec::new("tas_per", "tas", 90.0);
        let err = PercentileEngine::new(5)
            .materialize(
                &PercentileRequest::new(spec, "1 mm/day"),
                Some(&Value::Int(3)),
                &Dataset::new(),
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { ref name, .. } if name == "tas_per"));
    }
}
