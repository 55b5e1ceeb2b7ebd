//! Indicator bodies on a one-week station series.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use ndarray::Array2;
use xcalc_array::{ArrayError, DataArray, Dataset};
use xcalc_calendar::{Doy, MonthDay, daily_sequence};
use xcalc_indices::exceedance::{DAYS_OVER_PRECIP_DOY_THRESH, TG90P, WARM_SPELL_DURATION_INDEX};
use xcalc_indices::precipitation::*;
use xcalc_indices::temperature::*;
use xcalc_indices::{Args, IndexError, IndicatorFunction, Value};

const TEMPS_C: [f64; 7] = [-1.0, -10.0, 0.0, 15.0, 32.0, 6.0, -8.0];
const PR_MM_DAY: [f64; 7] = [3.0, 4.0, 20.0, 20.0, 0.0, 6.0, 9.0];

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

fn temperature(name: &str) -> DataArray {
    let values = TEMPS_C.iter().map(|t| t + 273.15).collect();
    DataArray::from_series(name, daily_sequence(start(), 7), values, "K").unwrap()
}

fn precipitation() -> DataArray {
    let values = PR_MM_DAY.iter().map(|p| p / 86_400.0).collect();
    DataArray::from_series("pr", daily_sequence(start(), 7), values, "kg m-2 s-1").unwrap()
}

fn dataset() -> Dataset {
    Dataset::new()
        .with_variable(temperature("tas"))
        .with_variable(temperature("tasmax"))
        .with_variable(temperature("tasmin"))
        .with_variable(precipitation())
}

fn weekly() -> Args {
    Args::new().with("freq", "7D")
}

fn single(f: &IndicatorFunction, args: Args) -> f64 {
    let out = f.call(&dataset(), &args).unwrap();
    assert_eq!(out.n_steps(), 1, "{} should yield one week", f.name());
    out.values()[[0, 0]]
}

#[test]
fn temperature_statistics() {
    assert_relative_eq!(single(&TG_MEAN, weekly()), 278.0, max_relative = 1e-3);
    assert_relative_eq!(single(&TX_MEAN, weekly()), 278.0, max_relative = 1e-3);
    assert_relative_eq!(single(&TN_MEAN, weekly()), 278.0, max_relative = 1e-3);
    assert_relative_eq!(single(&TX_MIN, weekly()), 263.15, max_relative = 1e-3);
    assert_relative_eq!(single(&TX_MAX, weekly()), 305.15, max_relative = 1e-3);
    assert_relative_eq!(single(&TN_MIN, weekly()), 263.15, max_relative = 1e-3);
    assert_relative_eq!(single(&TN_MAX, weekly()), 305.15, max_relative = 1e-3);
}

#[test]
fn temperature_day_counts() {
    assert_eq!(single(&FROST_DAYS, weekly()), 3.0);
    assert_eq!(single(&ICE_DAYS, weekly()), 3.0);
    assert_eq!(single(&TX_DAYS_ABOVE, weekly().with("thresh", "25 degC")), 1.0);
    assert_eq!(single(&TN_DAYS_ABOVE, weekly().with("thresh", "20 degC")), 1.0);
    assert_eq!(single(&TN_DAYS_ABOVE, weekly().with("thresh", "18 degC")), 1.0);
    assert_eq!(
        single(&MAXIMUM_CONSECUTIVE_WARM_DAYS, weekly().with("thresh", "25 degC")),
        1.0
    );
    assert_eq!(single(&CONSECUTIVE_FROST_DAYS, weekly()), 2.0);
}

#[test]
fn frost_days_counts_zero_as_not_frost() {
    // 0 degC equals the threshold exactly and is not below it.
    let out = FROST_DAYS
        .call(&dataset(), &weekly().with("thresh", "0 degC"))
        .unwrap();
    assert_eq!(out.values()[[0, 0]], 3.0);
    assert_eq!(out.units(), "days");
}

#[test]
fn late_frost_days_honours_date_bounds() {
    let january = (MonthDay::parse("01-02").unwrap(), MonthDay::parse("01-03").unwrap());
    let args = weekly()
        .with("thresh", "-2 degC")
        .with("date_bounds", Value::DateBounds(january.0, january.1));
    assert_eq!(single(&LATE_FROST_DAYS, args), 1.0);
    // The default April to June window excludes every January day.
    assert_eq!(single(&LATE_FROST_DAYS, weekly()), 0.0);
}

#[test]
fn precipitation_totals() {
    assert_relative_eq!(single(&PRECIP_ACCUMULATION, weekly()), 62.0, max_relative = 1e-3);
    assert_relative_eq!(
        single(&DAILY_PR_INTENSITY, weekly().with("thresh", "1 mm/day")),
        10.33,
        max_relative = 1e-3
    );
    assert_relative_eq!(
        single(&MAX_1DAY_PRECIPITATION_AMOUNT, weekly()),
        20.0,
        max_relative = 1e-3
    );
    assert_relative_eq!(
        single(&MAX_N_DAY_PRECIPITATION_AMOUNT, weekly().with("window", 5)),
        55.0,
        max_relative = 1e-3
    );
}

#[test]
fn precipitation_day_counts() {
    let wet = |thresh: &str| single(&WETDAYS, weekly().with("thresh", thresh));
    assert_eq!(wet("1 mm/day"), 6.0);
    assert_eq!(wet("10 mm/day"), 2.0);
    assert_eq!(wet("20 mm/day"), 2.0);
    assert_eq!(wet("25 mm/day"), 0.0);
    assert_eq!(single(&DRY_DAYS, weekly().with("thresh", "1 mm/day")), 1.0);
    assert_eq!(
        single(&MAXIMUM_CONSECUTIVE_DRY_DAYS, weekly().with("thresh", "1 mm/day")),
        1.0
    );
    assert_eq!(
        single(&MAXIMUM_CONSECUTIVE_WET_DAYS, weekly().with("thresh", "1 mm/day")),
        4.0
    );
}

#[test]
fn wet_spells_use_amount_threshold() {
    let args = weekly().with("thresh", "1 mm").with("window", 3);
    assert_eq!(single(&WET_SPELL_FREQUENCY, args.clone()), 1.0);
    assert_eq!(single(&WET_SPELL_TOTAL_LENGTH, args), 4.0);
}

fn constant_per(name: &str, value: f64, units: &str) -> DataArray {
    let doys: Vec<Doy> = (1..=366).map(|d| Doy::new(d).unwrap()).collect();
    DataArray::from_doy_rows(name, doys, Array2::from_elem((366, 1), value), units).unwrap()
}

#[test]
fn percentile_exceedances() {
    let per = constant_per("tas_per", 10.0, "degC");
    let args = weekly().with("tas_per", per);
    // 15 and 32 degC exceed 10 degC.
    assert_eq!(single(&TG90P, args), 2.0);
}

#[test]
fn warm_spell_needs_a_long_enough_run() {
    let per = constant_per("tasmax_per", 10.0, "degC");
    let args = weekly().with("tasmax_per", per.clone()).with("window", 2);
    assert_eq!(single(&WARM_SPELL_DURATION_INDEX, args), 2.0);
    let args = weekly().with("tasmax_per", per).with("window", 3);
    assert_eq!(single(&WARM_SPELL_DURATION_INDEX, args), 0.0);
}

#[test]
fn precip_percentile_is_floored_by_wet_day_threshold() {
    // A zero percentile leaves only the wet-day threshold in force.
    let per = constant_per("pr_per", 0.0, "mm/day");
    let args = weekly().with("pr_per", per).with("thresh", "5 mm/day");
    assert_eq!(single(&DAYS_OVER_PRECIP_DOY_THRESH, args), 4.0);
}

#[test]
fn missing_percentile_is_reported() {
    let err = TG90P.call(&dataset(), &weekly()).unwrap_err();
    assert!(matches!(err, IndexError::MissingArgument { name, .. } if name == "tas_per"));
}

#[test]
fn missing_variable_is_reported() {
    let ds = Dataset::new().with_variable(precipitation());
    let err = TG_MEAN.call(&ds, &weekly()).unwrap_err();
    assert!(matches!(
        err,
        IndexError::Array(ArrayError::VariableNotFound { ref name, .. }) if name == "tas"
    ));
}

#[test]
fn declared_parameters() {
    assert!(TX_DAYS_ABOVE.accepts("thresh"));
    assert!(TX_DAYS_ABOVE.accepts("freq"));
    assert!(!TX_DAYS_ABOVE.accepts("window"));
    assert!(MAX_N_DAY_PRECIPITATION_AMOUNT.accepts("window"));
    assert_eq!(TG90P.params(), &["tas_per", "freq"]);
    assert_eq!(TG_MEAN.inputs(), &["tas"]);
}
