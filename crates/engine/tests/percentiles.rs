//! Day-of-year percentile computation, pass-through and failure modes.

use std::sync::Arc;

use chrono::NaiveDate;
use ndarray::Array2;
use xcalc_array::{Coord, DataArray, Dataset, split_large_chunks};
use xcalc_calendar::daily_sequence;
use xcalc_engine::{EngineError, PercentileEngine, PercentileRequest, PercentileSpec};
use xcalc_indices::Value;

const N_DAYS: usize = 730;

fn dates() -> Vec<NaiveDate> {
    daily_sequence(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(), N_DAYS)
}

/// Two cells of a seasonal temperature cycle with a deterministic wobble.
fn tas() -> DataArray {
    let values = Array2::from_shape_fn((N_DAYS, 2), |(i, cell)| {
        let season = (i as f64 * std::f64::consts::TAU / 365.0).sin();
        280.0 + 10.0 * season + ((i * 7 + cell * 3) % 5) as f64 + cell as f64
    });
    DataArray::new("tas", Coord::Time(dates()), values, "K").unwrap()
}

/// Alternating dry and 10 mm/day wet days.
fn pr() -> DataArray {
    let values = (0..N_DAYS)
        .map(|i| if i % 2 == 0 { 0.0 } else { 10.0 / 86_400.0 })
        .collect();
    DataArray::from_series("pr", dates(), values, "kg m-2 s-1").unwrap()
}

fn dataset() -> Dataset {
    Dataset::new().with_variable(tas()).with_variable(pr())
}

fn tas_request(rank: f64) -> PercentileRequest {
    let spec = PercentileSpec::new("tas_per", "tas", rank).with_base_period("2001", "2002");
    PercentileRequest::new(spec, "1 mm/day")
}

#[test]
fn computes_one_value_per_day_of_year() {
    let mut engine = PercentileEngine::new(5);
    let per = engine.materialize(&tas_request(90.0), None, &dataset()).unwrap();
    assert_eq!(engine.computations(), 1);
    assert_eq!(per.name(), "tas_per");
    assert_eq!(per.units(), "K");
    assert_eq!(per.n_steps(), 365);
    assert_eq!(per.n_cells(), 2);
    assert!(per.doys().is_some());
    assert!(per.values().iter().all(|v| v.is_finite()));
}

#[test]
fn result_is_a_single_chunk() {
    assert!(split_large_chunks());
    let mut engine = PercentileEngine::new(5);
    let per = engine.materialize(&tas_request(50.0), None, &dataset()).unwrap();
    assert_eq!(per.chunks().count(), 1);
    assert_eq!(per.chunks().total(), 365);
    // The scope does not outlive the computation.
    assert!(split_large_chunks());
}

#[test]
fn recomputation_is_bit_identical() {
    let mut engine = PercentileEngine::new(5);
    let a = engine.materialize(&tas_request(90.0), None, &dataset()).unwrap();
    let b = engine.materialize(&tas_request(90.0), None, &dataset()).unwrap();
    assert_eq!(engine.computations(), 2);
    let bits = |d: &DataArray| d.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn supplied_array_is_passed_through() {
    let mut engine = PercentileEngine::new(5);
    let per = engine.materialize(&tas_request(90.0), None, &dataset()).unwrap();

    let mut reuse = PercentileEngine::new(5);
    let provided = Value::Array(Arc::clone(&per));
    let again = reuse
        .materialize(&tas_request(90.0), Some(&provided), &dataset())
        .unwrap();
    assert!(Arc::ptr_eq(&per, &again));
    assert_eq!(reuse.computations(), 0);
}

#[test]
fn stored_dataset_supplies_per() {
    let mut engine = PercentileEngine::new(5);
    let per = engine.materialize(&tas_request(10.0), None, &dataset()).unwrap();
    let stored = Dataset::new().with_variable((*per).clone().with_name("per"));

    let mut reuse = PercentileEngine::new(5);
    let again = reuse
        .materialize(&tas_request(10.0), Some(&Value::from(stored)), &dataset())
        .unwrap();
    assert_eq!(again.values(), per.values());
    assert_eq!(reuse.computations(), 0);

    let err = reuse
        .materialize(&tas_request(10.0), Some(&Value::from(Dataset::new())), &dataset())
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingVariable { ref name } if name == "per"));
}

#[test]
fn empty_base_period_fails_fast() {
    let spec = PercentileSpec::new("tas_per", "tas", 90.0);
    let mut engine = PercentileEngine::new(5);
    let err = engine
        .materialize(&PercentileRequest::new(spec, "1 mm/day"), None, &dataset())
        .unwrap_err();
    match err {
        EngineError::EmptyBasePeriod {
            variable,
            start,
            end,
        } => {
            assert_eq!(variable, "tas");
            assert_eq!((start.as_str(), end.as_str()), ("1961", "1990"));
        }
        other => panic!("expected EmptyBasePeriod, got {other:?}"),
    }
    assert_eq!(engine.computations(), 0);
}

#[test]
fn missing_source_variable() {
    let spec = PercentileSpec::new("tasmax_per", "tasmax", 90.0).with_base_period("2001", "2002");
    let err = PercentileEngine::new(5)
        .materialize(&PercentileRequest::new(spec, "1 mm/day"), None, &dataset())
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingVariable { ref name } if name == "tasmax"));
}

#[test]
fn precipitation_ignores_dry_days() {
    let spec = PercentileSpec::new("pr_per", "pr", 10.0)
        .with_base_period("2001", "2002")
        .with_precipitation(None);
    let per = PercentileEngine::new(5)
        .materialize(&PercentileRequest::new(spec, "1 mm/day"), None, &dataset())
        .unwrap();
    // Only the 10 mm/day days survive the wet-day mask.
    for &v in per.values() {
        assert_eq!(v, 10.0 / 86_400.0);
    }
}

#[test]
fn wet_day_threshold_above_all_values_leaves_nothing() {
    let spec = PercentileSpec::new("pr_per", "pr", 50.0)
        .with_base_period("2001", "2002")
        .with_precipitation(Some("thresh"));
    let per = PercentileEngine::new(5)
        .materialize(&PercentileRequest::new(spec, "20 mm/day"), None, &dataset())
        .unwrap();
    assert!(per.values().iter().all(|v| v.is_nan()));
}
