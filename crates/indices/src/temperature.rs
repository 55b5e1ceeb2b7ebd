//! Temperature indicators on `tas`, `tasmax` and `tasmin`.

use ndarray::Zip;
use xcalc_array::{DataArray, Dataset};
use xcalc_calendar::MonthDay;
use xcalc_stats::{nan_max, nan_mean, nan_min};

use crate::args::Args;
use crate::error::IndexError;
use crate::function::IndicatorFunction;
use crate::reduce::{SpellStat, resample, spell_stat, time_axis};

const DAYS: &str = "days";
const DEGREE_DAYS: &str = "K d";

fn statistic(
    da: &DataArray,
    args: &Args,
    name: &str,
    stat: fn(&[f64]) -> f64,
) -> Result<DataArray, IndexError> {
    resample(da, args.freq()?, name, da.units(), |v, _| stat(v))
}

fn days_where(
    da: &DataArray,
    args: &Args,
    name: &str,
    default_thresh: &str,
    cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let thresh = args.quantity("thresh", default_thresh, da.units())?;
    resample(da, args.freq()?, name, DAYS, |v, _| {
        v.iter().filter(|&&x| cmp(x, thresh)).count() as f64
    })
}

fn longest_run(
    da: &DataArray,
    args: &Args,
    name: &str,
    default_thresh: &str,
    cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let thresh = args.quantity("thresh", default_thresh, da.units())?;
    resample(da, args.freq()?, name, DAYS, |v, _| {
        let mask: Vec<bool> = v.iter().map(|&x| cmp(x, thresh)).collect();
        spell_stat(&mask, 1, SpellStat::MaxLength)
    })
}

fn spells(
    da: &DataArray,
    args: &Args,
    name: &str,
    defaults: (&str, usize),
    cmp: fn(f64, f64) -> bool,
    stat: SpellStat,
) -> Result<DataArray, IndexError> {
    let thresh = args.quantity("thresh", defaults.0, da.units())?;
    let window = args.count("window", defaults.1)?;
    let units = if stat == SpellStat::Frequency { "" } else { DAYS };
    resample(da, args.freq()?, name, units, |v, _| {
        let mask: Vec<bool> = v.iter().map(|&x| cmp(x, thresh)).collect();
        spell_stat(&mask, window, stat)
    })
}

fn above(x: f64, t: f64) -> bool {
    x > t
}

fn below(x: f64, t: f64) -> bool {
    x < t
}

fn tg_mean(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    statistic(ds.get("tas")?, args, "tg_mean", nan_mean)
}

fn tx_mean(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    statistic(ds.get("tasmax")?, args, "tx_mean", nan_mean)
}

fn tx_min(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    statistic(ds.get("tasmax")?, args, "tx_min", nan_min)
}

fn tx_max(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    statistic(ds.get("tasmax")?, args, "tx_max", nan_max)
}

fn tn_mean(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    statistic(ds.get("tasmin")?, args, "tn_mean", nan_mean)
}

fn tn_min(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    statistic(ds.get("tasmin")?, args, "tn_min", nan_min)
}

fn tn_max(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    statistic(ds.get("tasmin")?, args, "tn_max", nan_max)
}

fn daily_temperature_range(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let tasmax = ds.get("tasmax")?.convert_units("K")?;
    let tasmin = ds.get("tasmin")?.convert_units("K")?;
    if tasmax.n_steps() != tasmin.n_steps() {
        return Err(IndexError::InvalidArgument {
            name: "tasmin".to_string(),
            reason: format!(
                "has {} steps, tasmax has {}",
                tasmin.n_steps(),
                tasmax.n_steps()
            ),
        });
    }
    let range = tasmax.values() - tasmin.values();
    let dtr = DataArray::new("dtr", tasmax.coord().clone(), range, "K")?;
    statistic(&dtr, args, "daily_temperature_range", nan_mean)
}

fn frost_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_where(ds.get("tasmin")?, args, "frost_days", "0 degC", below)
}

fn ice_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_where(ds.get("tasmax")?, args, "ice_days", "0 degC", below)
}

fn tx_days_above(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_where(ds.get("tasmax")?, args, "tx_days_above", "25.0 degC", above)
}

fn tn_days_above(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_where(ds.get("tasmin")?, args, "tn_days_above", "20.0 degC", above)
}

fn tn_days_below(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_where(ds.get("tasmin")?, args, "tn_days_below", "-10.0 degC", below)
}

fn maximum_consecutive_warm_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    longest_run(
        ds.get("tasmax")?,
        args,
        "maximum_consecutive_warm_days",
        "25 degC",
        above,
    )
}

fn consecutive_frost_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    longest_run(ds.get("tasmin")?, args, "consecutive_frost_days", "0 degC", below)
}

fn late_frost_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let tasmin = ds.get("tasmin")?;
    let thresh = args.quantity("thresh", "-2 degC", tasmin.units())?;
    let (start, end) = args.date_bounds(("04-01", "06-30"))?;
    resample(tasmin, args.freq()?, "late_frost_days", DAYS, |v, dates| {
        v.iter()
            .zip(dates)
            .filter(|&(&x, &d)| x < thresh && MonthDay::within(d, start, end))
            .count() as f64
    })
}

fn degree_days(
    da: &DataArray,
    args: &Args,
    name: &str,
    default_thresh: &str,
    excess: fn(f64, f64) -> f64,
) -> Result<DataArray, IndexError> {
    let tas = da.convert_units("K")?;
    let thresh = args.quantity("thresh", default_thresh, "K")?;
    resample(&tas, args.freq()?, name, DEGREE_DAYS, |v, _| {
        v.iter()
            .filter(|x| x.is_finite())
            .map(|&x| excess(x, thresh).max(0.0))
            .sum()
    })
}

fn growing_degree_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    degree_days(ds.get("tas")?, args, "growing_degree_days", "4.0 degC", |x, t| x - t)
}

fn heating_degree_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    degree_days(ds.get("tas")?, args, "heating_degree_days", "17.0 degC", |x, t| t - x)
}

fn hot_spell_frequency(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let da = ds.get("tasmax")?;
    spells(da, args, "hot_spell_frequency", ("30 degC", 3), above, SpellStat::Frequency)
}

fn hot_spell_max_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let da = ds.get("tasmax")?;
    spells(da, args, "hot_spell_max_length", ("30 degC", 1), above, SpellStat::MaxLength)
}

fn hot_spell_total_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let da = ds.get("tasmax")?;
    spells(da, args, "hot_spell_total_length", ("30 degC", 3), above, SpellStat::TotalLength)
}

fn cold_spell_frequency(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let da = ds.get("tas")?;
    spells(da, args, "cold_spell_frequency", ("-10 degC", 3), below, SpellStat::Frequency)
}

fn cold_spell_max_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let da = ds.get("tas")?;
    spells(da, args, "cold_spell_max_length", ("-10 degC", 1), below, SpellStat::MaxLength)
}

fn cold_spell_total_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let da = ds.get("tas")?;
    spells(da, args, "cold_spell_total_length", ("-10 degC", 3), below, SpellStat::TotalLength)
}

fn heat_wave(
    ds: &Dataset,
    args: &Args,
    name: &str,
    window: usize,
    stat: SpellStat,
) -> Result<DataArray, IndexError> {
    let tasmax = ds.get("tasmax")?;
    let tasmin = ds.get("tasmin")?;
    let thresh_max = args.quantity("thresh_tasmax", "30 degC", tasmax.units())?;
    let thresh_min = args.quantity("thresh_tasmin", "22 degC", tasmin.units())?;
    let window = args.count("window", window)?;
    let dates = time_axis(tasmax)?;
    if time_axis(tasmin)? != dates {
        return Err(IndexError::InvalidArgument {
            name: "tasmin".to_string(),
            reason: "time axis differs from tasmax".to_string(),
        });
    }
    // Both conditions must hold on the same day.
    let both = Zip::from(tasmax.values())
        .and(tasmin.values())
        .map_collect(|&tx, &tn| {
            if tx > thresh_max && tn > thresh_min {
                1.0
            } else {
                0.0
            }
        });
    let hot = DataArray::new("hot", tasmax.coord().clone(), both, "")?;
    let units = if stat == SpellStat::Frequency { "" } else { DAYS };
    resample(&hot, args.freq()?, name, units, |v, _| {
        let mask: Vec<bool> = v.iter().map(|&x| x == 1.0).collect();
        spell_stat(&mask, window, stat)
    })
}

fn heat_wave_frequency(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    heat_wave(ds, args, "heat_wave_frequency", 3, SpellStat::Frequency)
}

fn heat_wave_max_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    heat_wave(ds, args, "heat_wave_max_length", 1, SpellStat::MaxLength)
}

fn heat_wave_total_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    heat_wave(ds, args, "heat_wave_total_length", 3, SpellStat::TotalLength)
}

const FREQ: &[&str] = &["freq"];
const THRESH_FREQ: &[&str] = &["thresh", "freq"];
const SPELL: &[&str] = &["thresh", "window", "freq"];
const HEAT_WAVE: &[&str] = &["thresh_tasmin", "thresh_tasmax", "window", "freq"];

/// Mean of daily mean temperature.
pub static TG_MEAN: IndicatorFunction = IndicatorFunction::new("tg_mean", &["tas"], FREQ, tg_mean);
/// Mean of daily maximum temperature.
pub static TX_MEAN: IndicatorFunction = IndicatorFunction::new("tx_mean", &["tasmax"], FREQ, tx_mean);
/// Minimum of daily maximum temperature.
pub static TX_MIN: IndicatorFunction = IndicatorFunction::new("tx_min", &["tasmax"], FREQ, tx_min);
/// Maximum of daily maximum temperature.
pub static TX_MAX: IndicatorFunction = IndicatorFunction::new("tx_max", &["tasmax"], FREQ, tx_max);
/// Mean of daily minimum temperature.
pub static TN_MEAN: IndicatorFunction = IndicatorFunction::new("tn_mean", &["tasmin"], FREQ, tn_mean);
/// Minimum of daily minimum temperature.
pub static TN_MIN: IndicatorFunction = IndicatorFunction::new("tn_min", &["tasmin"], FREQ, tn_min);
/// Maximum of daily minimum temperature.
pub static TN_MAX: IndicatorFunction = IndicatorFunction::new("tn_max", &["tasmin"], FREQ, tn_max);
/// Mean diurnal temperature range.
pub static DAILY_TEMPERATURE_RANGE: IndicatorFunction = IndicatorFunction::new(
    "daily_temperature_range",
    &["tasmax", "tasmin"],
    FREQ,
    daily_temperature_range,
);
/// Days with `tasmin < thresh` (default 0 °C).
pub static FROST_DAYS: IndicatorFunction =
    IndicatorFunction::new("frost_days", &["tasmin"], THRESH_FREQ, frost_days);
/// Days with `tasmax < thresh` (default 0 °C).
pub static ICE_DAYS: IndicatorFunction =
    IndicatorFunction::new("ice_days", &["tasmax"], THRESH_FREQ, ice_days);
/// Days with `tasmax > thresh`.
pub static TX_DAYS_ABOVE: IndicatorFunction =
    IndicatorFunction::new("tx_days_above", &["tasmax"], THRESH_FREQ, tx_days_above);
/// Days with `tasmin > thresh`.
pub static TN_DAYS_ABOVE: IndicatorFunction =
    IndicatorFunction::new("tn_days_above", &["tasmin"], THRESH_FREQ, tn_days_above);
/// Days with `tasmin < thresh`.
pub static TN_DAYS_BELOW: IndicatorFunction =
    IndicatorFunction::new("tn_days_below", &["tasmin"], THRESH_FREQ, tn_days_below);
/// Longest run of days with `tasmax > thresh`.
pub static MAXIMUM_CONSECUTIVE_WARM_DAYS: IndicatorFunction = IndicatorFunction::new(
    "maximum_consecutive_warm_days",
    &["tasmax"],
    THRESH_FREQ,
    maximum_consecutive_warm_days,
);
/// Longest run of days with `tasmin < thresh`.
pub static CONSECUTIVE_FROST_DAYS: IndicatorFunction = IndicatorFunction::new(
    "consecutive_frost_days",
    &["tasmin"],
    THRESH_FREQ,
    consecutive_frost_days,
);
/// Frost days inside a month-day window (default April to June).
pub static LATE_FROST_DAYS: IndicatorFunction = IndicatorFunction::new(
    "late_frost_days",
    &["tasmin"],
    &["thresh", "date_bounds", "freq"],
    late_frost_days,
);
/// Cumulative degrees above `thresh`.
pub static GROWING_DEGREE_DAYS: IndicatorFunction = IndicatorFunction::new(
    "growing_degree_days",
    &["tas"],
    THRESH_FREQ,
    growing_degree_days,
);
/// Cumulative degrees below `thresh`.
pub static HEATING_DEGREE_DAYS: IndicatorFunction = IndicatorFunction::new(
    "heating_degree_days",
    &["tas"],
    THRESH_FREQ,
    heating_degree_days,
);
pub static HOT_SPELL_FREQUENCY: IndicatorFunction =
    IndicatorFunction::new("hot_spell_frequency", &["tasmax"], SPELL, hot_spell_frequency);
pub static HOT_SPELL_MAX_LENGTH: IndicatorFunction =
    IndicatorFunction::new("hot_spell_max_length", &["tasmax"], SPELL, hot_spell_max_length);
pub static HOT_SPELL_TOTAL_LENGTH: IndicatorFunction =
    IndicatorFunction::new("hot_spell_total_length", &["tasmax"], SPELL, hot_spell_total_length);
pub static COLD_SPELL_FREQUENCY: IndicatorFunction =
    IndicatorFunction::new("cold_spell_frequency", &["tas"], SPELL, cold_spell_frequency);
pub static COLD_SPELL_MAX_LENGTH: IndicatorFunction =
    IndicatorFunction::new("cold_spell_max_length", &["tas"], SPELL, cold_spell_max_length);
pub static COLD_SPELL_TOTAL_LENGTH: IndicatorFunction =
    IndicatorFunction::new("cold_spell_total_length", &["tas"], SPELL, cold_spell_total_length);
/// Number of heat waves: both `tasmin` and `tasmax` above their thresholds
/// for at least `window` days.
pub static HEAT_WAVE_FREQUENCY: IndicatorFunction = IndicatorFunction::new(
    "heat_wave_frequency",
    &["tasmin", "tasmax"],
    HEAT_WAVE,
    heat_wave_frequency,
);
pub static HEAT_WAVE_MAX_LENGTH: IndicatorFunction = IndicatorFunction::new(
    "heat_wave_max_length",
    &["tasmin", "tasmax"],
    HEAT_WAVE,
    heat_wave_max_length,
);
pub static HEAT_WAVE_TOTAL_LENGTH: IndicatorFunction = IndicatorFunction::new(
    "heat_wave_total_length",
    &["tasmin", "tasmax"],
    HEAT_WAVE,
    heat_wave_total_length,
);
