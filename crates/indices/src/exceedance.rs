//! Indicators comparing daily values against day-of-year percentile
//! thresholds (`*_per` arguments).

use ndarray::Zip;
use xcalc_array::{DataArray, Dataset, convert};

use crate::args::Args;
use crate::error::IndexError;
use crate::function::IndicatorFunction;
use crate::reduce::{
    SpellStat, count_true, derive, flag, resample, spell_stat, thresholds_on, time_axis,
};

const DAYS: &str = "days";

/// Flags the days on which `cmp(value, threshold)` holds.
///
/// Days without a threshold are flagged `0.0`; missing values stay `NaN`.
fn exceeds(
    da: &DataArray,
    per: &DataArray,
    per_name: &str,
    cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let per = per.convert_units(da.units())?;
    let dates = time_axis(da)?;
    let thresholds = (0..da.n_cells())
        .map(|cell| thresholds_on(&per, per_name, dates, cell))
        .collect::<Result<Vec<_>, _>>()?;
    derive(da, per_name, "", |cell, series, _| {
        series
            .iter()
            .zip(&thresholds[cell])
            .map(|(&x, &t)| flag(x, !t.is_nan() && cmp(x, t)))
            .collect()
    })
}

fn above(x: f64, t: f64) -> bool {
    x > t
}

fn below(x: f64, t: f64) -> bool {
    x < t
}

fn days_beyond(
    ds: &Dataset,
    args: &Args,
    name: &'static str,
    (var, per_name): (&str, &str),
    cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let da = ds.get(var)?;
    let per = args.array(name, per_name)?;
    let flags = exceeds(da, per, per_name, cmp)?;
    resample(&flags, args.freq()?, name, DAYS, |v, _| count_true(v))
}

fn tg10p(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_beyond(ds, args, "tg10p", ("tas", "tas_per"), below)
}

fn tg90p(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_beyond(ds, args, "tg90p", ("tas", "tas_per"), above)
}

fn tx10p(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_beyond(ds, args, "tx10p", ("tasmax", "tasmax_per"), below)
}

fn tx90p(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_beyond(ds, args, "tx90p", ("tasmax", "tasmax_per"), above)
}

fn tn10p(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_beyond(ds, args, "tn10p", ("tasmin", "tasmin_per"), below)
}

fn tn90p(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    days_beyond(ds, args, "tn90p", ("tasmin", "tasmin_per"), above)
}

fn spell_duration(
    ds: &Dataset,
    args: &Args,
    name: &'static str,
    (var, per_name): (&str, &str),
    cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let da = ds.get(var)?;
    let per = args.array(name, per_name)?;
    let window = args.count("window", 6)?;
    let flags = exceeds(da, per, per_name, cmp)?;
    resample(&flags, args.freq()?, name, DAYS, |v, _| {
        let mask: Vec<bool> = v.iter().map(|&x| x == 1.0).collect();
        spell_stat(&mask, window, SpellStat::TotalLength)
    })
}

fn warm_spell_duration_index(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    spell_duration(
        ds,
        args,
        "warm_spell_duration_index",
        ("tasmax", "tasmax_per"),
        above,
    )
}

fn cold_spell_duration_index(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    spell_duration(
        ds,
        args,
        "cold_spell_duration_index",
        ("tasmin", "tasmin_per"),
        below,
    )
}

/// Days on which the temperature and the precipitation condition coincide.
fn compound_days(
    ds: &Dataset,
    args: &Args,
    name: &'static str,
    tas_cmp: fn(f64, f64) -> bool,
    pr_cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let tas = ds.get("tas")?;
    let pr = ds.get("pr")?;
    if tas.dates() != pr.dates() {
        return Err(IndexError::InvalidArgument {
            name: "pr".to_string(),
            reason: "time axis differs from tas".to_string(),
        });
    }
    let tas_flags = exceeds(tas, args.array(name, "tas_per")?, "tas_per", tas_cmp)?;
    let pr_flags = exceeds(pr, args.array(name, "pr_per")?, "pr_per", pr_cmp)?;
    let both = derive(&tas_flags, name, "", |cell, series, _| {
        series
            .iter()
            .zip(pr_flags.column(cell))
            .map(|(&t, &p)| if t == 1.0 && p == 1.0 { 1.0 } else { 0.0 })
            .collect()
    })?;
    resample(&both, args.freq()?, name, DAYS, |v, _| count_true(v))
}

fn cold_and_dry_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    compound_days(ds, args, "cold_and_dry_days", below, below)
}

fn cold_and_wet_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    compound_days(ds, args, "cold_and_wet_days", below, above)
}

fn warm_and_dry_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    compound_days(ds, args, "warm_and_dry_days", above, below)
}

fn warm_and_wet_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    compound_days(ds, args, "warm_and_wet_days", above, above)
}

/// Per-day precipitation threshold: the day-of-year percentile, raised to
/// the wet-day threshold where it is lower or missing.
fn precip_thresholds(
    pr: &DataArray,
    args: &Args,
    function: &'static str,
) -> Result<Vec<Vec<f64>>, IndexError> {
    let per = args.array(function, "pr_per")?.convert_units(pr.units())?;
    let thresh = args.quantity("thresh", "1 mm/day", pr.units())?;
    let dates = time_axis(pr)?;
    (0..pr.n_cells())
        .map(|cell| -> Result<Vec<f64>, IndexError> {
            let t = thresholds_on(&per, "pr_per", dates, cell)?;
            Ok(t.into_iter()
                .map(|p| if p > thresh { p } else { thresh })
                .collect())
        })
        .collect()
}

/// Keeps the daily values above their threshold, `NaN` elsewhere.
fn over_thresholds(pr: &DataArray, thresholds: &[Vec<f64>]) -> Result<DataArray, IndexError> {
    derive(pr, "pr_over", pr.units(), |cell, series, _| {
        series
            .iter()
            .zip(&thresholds[cell])
            .map(|(&x, &t)| if x > t { x } else { f64::NAN })
            .collect()
    })
}

fn days_over_precip_doy_thresh(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let thresholds = precip_thresholds(pr, args, "days_over_precip_doy_thresh")?;
    let over = over_thresholds(pr, &thresholds)?;
    resample(&over, args.freq()?, "days_over_precip_doy_thresh", DAYS, |v, _| {
        v.iter().filter(|x| !x.is_nan()).count() as f64
    })
}

fn fraction_over_precip_thresh(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let thresh = args.quantity("thresh", "1 mm/day", pr.units())?;
    let thresholds = precip_thresholds(pr, args, "fraction_over_precip_thresh")?;
    let over = over_thresholds(pr, &thresholds)?;
    let freq = args.freq()?;
    let over_total = resample(&over, freq, "over", pr.units(), |v, _| {
        v.iter().filter(|x| !x.is_nan()).sum()
    })?;
    let wet_total = resample(pr, freq, "wet", pr.units(), |v, _| {
        v.iter().filter(|&&x| x > thresh).sum()
    })?;
    let ratio = Zip::from(over_total.values())
        .and(wet_total.values())
        .map_collect(|&o, &w| if w > 0.0 { o / w } else { f64::NAN });
    Ok(
        DataArray::new("fraction_over_precip_thresh", over_total.coord().clone(), ratio, "")?
            .with_attr("freq", freq.token()),
    )
}

fn precip_amount_over_doy_thresh(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = convert(1.0, pr.units(), "mm/day")?;
    let thresholds = precip_thresholds(pr, args, "precip_amount_over_doy_thresh")?;
    let over = over_thresholds(pr, &thresholds)?;
    resample(&over, args.freq()?, "precip_amount_over_doy_thresh", "mm", |v, _| {
        v.iter().filter(|x| !x.is_nan()).sum::<f64>() * k
    })
}

/// Returns the supplied day-of-year percentile itself.
fn percentile_doy_value(_ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let per = args.array("percentile_doy_value", "pr_per")?;
    Ok(per.clone().with_name("percentile_doy_value"))
}

pub static TG10P: IndicatorFunction =
    IndicatorFunction::new("tg10p", &["tas"], &["tas_per", "freq"], tg10p);
pub static TG90P: IndicatorFunction =
    IndicatorFunction::new("tg90p", &["tas"], &["tas_per", "freq"], tg90p);
pub static TX10P: IndicatorFunction =
    IndicatorFunction::new("tx10p", &["tasmax"], &["tasmax_per", "freq"], tx10p);
pub static TX90P: IndicatorFunction =
    IndicatorFunction::new("tx90p", &["tasmax"], &["tasmax_per", "freq"], tx90p);
pub static TN10P: IndicatorFunction =
    IndicatorFunction::new("tn10p", &["tasmin"], &["tasmin_per", "freq"], tn10p);
pub static TN90P: IndicatorFunction =
    IndicatorFunction::new("tn90p", &["tasmin"], &["tasmin_per", "freq"], tn90p);
/// Days inside runs of at least `window` days with `tasmax` above its percentile.
pub static WARM_SPELL_DURATION_INDEX: IndicatorFunction = IndicatorFunction::new(
    "warm_spell_duration_index",
    &["tasmax"],
    &["tasmax_per", "window", "freq"],
    warm_spell_duration_index,
);
/// Days inside runs of at least `window` days with `tasmin` below its percentile.
pub static COLD_SPELL_DURATION_INDEX: IndicatorFunction = IndicatorFunction::new(
    "cold_spell_duration_index",
    &["tasmin"],
    &["tasmin_per", "window", "freq"],
    cold_spell_duration_index,
);
pub static COLD_AND_DRY_DAYS: IndicatorFunction = IndicatorFunction::new(
    "cold_and_dry_days",
    &["tas", "pr"],
    &["tas_per", "pr_per", "freq"],
    cold_and_dry_days,
);
pub static COLD_AND_WET_DAYS: IndicatorFunction = IndicatorFunction::new(
    "cold_and_wet_days",
    &["tas", "pr"],
    &["tas_per", "pr_per", "freq"],
    cold_and_wet_days,
);
pub static WARM_AND_DRY_DAYS: IndicatorFunction = IndicatorFunction::new(
    "warm_and_dry_days",
    &["tas", "pr"],
    &["tas_per", "pr_per", "freq"],
    warm_and_dry_days,
);
pub static WARM_AND_WET_DAYS: IndicatorFunction = IndicatorFunction::new(
    "warm_and_wet_days",
    &["tas", "pr"],
    &["tas_per", "pr_per", "freq"],
    warm_and_wet_days,
);
/// Wet days above the day-of-year precipitation percentile.
pub static DAYS_OVER_PRECIP_DOY_THRESH: IndicatorFunction = IndicatorFunction::new(
    "days_over_precip_doy_thresh",
    &["pr"],
    &["pr_per", "thresh", "freq"],
    days_over_precip_doy_thresh,
);
/// Share of wet-day precipitation falling on days above the percentile.
pub static FRACTION_OVER_PRECIP_THRESH: IndicatorFunction = IndicatorFunction::new(
    "fraction_over_precip_thresh",
    &["pr"],
    &["pr_per", "thresh", "freq"],
    fraction_over_precip_thresh,
);
/// Precipitation amount falling on days above the percentile.
pub static PRECIP_AMOUNT_OVER_DOY_THRESH: IndicatorFunction = IndicatorFunction::new(
    "precip_amount_over_doy_thresh",
    &["pr"],
    &["pr_per", "thresh", "freq"],
    precip_amount_over_doy_thresh,
);
/// The day-of-year precipitation percentile itself.
pub static PERCENTILE_DOY_VALUE: IndicatorFunction =
    IndicatorFunction::new("percentile_doy_value", &[], &["pr_per"], percentile_doy_value);
