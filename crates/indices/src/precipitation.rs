//! Precipitation indicators on `pr`.
//!
//! Thresholds are compared in the units the data is stored in; totals and
//! maxima are reported in `mm` or `mm/day`.

use xcalc_array::{DataArray, Dataset, convert};
use xcalc_stats::{nan_max, nan_mean, nan_sum, rolling_sum};

use crate::args::Args;
use crate::error::IndexError;
use crate::function::IndicatorFunction;
use crate::reduce::{SpellStat, derive, resample, spell_stat};

const DAYS: &str = "days";
const MM: &str = "mm";
const MM_PER_DAY: &str = "mm/day";

/// Factor turning one stored value into millimetres per day.
fn to_mm_per_day(pr: &DataArray) -> Result<f64, IndexError> {
    Ok(convert(1.0, pr.units(), MM_PER_DAY)?)
}

fn precip_accumulation(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = to_mm_per_day(pr)?;
    resample(pr, args.freq()?, "precip_accumulation", MM, |v, _| {
        nan_sum(v) * k
    })
}

fn precip_average(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = to_mm_per_day(pr)?;
    resample(pr, args.freq()?, "precip_average", MM_PER_DAY, |v, _| {
        nan_mean(v) * k
    })
}

fn wet_precip_accumulation(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = to_mm_per_day(pr)?;
    let thresh = args.quantity("thresh", "1 mm/day", pr.units())?;
    resample(pr, args.freq()?, "wet_precip_accumulation", MM, |v, _| {
        v.iter().filter(|&&x| x >= thresh).sum::<f64>() * k
    })
}

fn max_1day_precipitation_amount(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = to_mm_per_day(pr)?;
    resample(
        pr,
        args.freq()?,
        "max_1day_precipitation_amount",
        MM_PER_DAY,
        |v, _| nan_max(v) * k,
    )
}

fn max_n_day_precipitation_amount(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = to_mm_per_day(pr)?;
    let window = args.count("window", 1)?;
    // Windows are trailing and may reach back across period boundaries.
    let rolled = derive(pr, "pr_rolled", pr.units(), |_, series, _| {
        rolling_sum(series, window)
    })?;
    resample(
        &rolled,
        args.freq()?,
        "max_n_day_precipitation_amount",
        MM,
        |v, _| nan_max(v) * k,
    )
}

fn count_days(
    ds: &Dataset,
    args: &Args,
    name: &str,
    default_thresh: &str,
    cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let thresh = args.quantity("thresh", default_thresh, pr.units())?;
    resample(pr, args.freq()?, name, DAYS, |v, _| {
        v.iter().filter(|&&x| cmp(x, thresh)).count() as f64
    })
}

fn longest_run(
    ds: &Dataset,
    args: &Args,
    name: &str,
    cmp: fn(f64, f64) -> bool,
) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let thresh = args.quantity("thresh", "1 mm/day", pr.units())?;
    resample(pr, args.freq()?, name, DAYS, |v, _| {
        let mask: Vec<bool> = v.iter().map(|&x| cmp(x, thresh)).collect();
        spell_stat(&mask, 1, SpellStat::MaxLength)
    })
}

fn wet(x: f64, t: f64) -> bool {
    x >= t
}

fn dry(x: f64, t: f64) -> bool {
    x < t
}

fn wetdays(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    count_days(ds, args, "wetdays", "1.0 mm/day", wet)
}

fn dry_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    count_days(ds, args, "dry_days", "0.2 mm/d", dry)
}

fn maximum_consecutive_dry_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    longest_run(ds, args, "maximum_consecutive_dry_days", dry)
}

fn maximum_consecutive_wet_days(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    longest_run(ds, args, "maximum_consecutive_wet_days", wet)
}

fn daily_pr_intensity(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = to_mm_per_day(pr)?;
    let thresh = args.quantity("thresh", "1 mm/day", pr.units())?;
    resample(pr, args.freq()?, "daily_pr_intensity", MM_PER_DAY, |v, _| {
        let (total, n) = v
            .iter()
            .filter(|&&x| x >= thresh)
            .fold((0.0, 0usize), |(s, n), &x| (s + x, n + 1));
        if n == 0 { f64::NAN } else { total / n as f64 * k }
    })
}

/// Spells of days whose amount is below (dry) or at least (wet) `thresh`.
///
/// The threshold is an amount (`mm`); each day's flux is read as the amount
/// fallen that day.
fn precip_spells(
    ds: &Dataset,
    args: &Args,
    name: &str,
    window: usize,
    cmp: fn(f64, f64) -> bool,
    stat: SpellStat,
) -> Result<DataArray, IndexError> {
    let pr = ds.get("pr")?;
    let k = to_mm_per_day(pr)?;
    let thresh = args.quantity("thresh", "1.0 mm", MM)?;
    let window = args.count("window", window)?;
    let units = if stat == SpellStat::Frequency { "" } else { DAYS };
    resample(pr, args.freq()?, name, units, |v, _| {
        let mask: Vec<bool> = v
            .iter()
            .map(|&x| !x.is_nan() && cmp(x * k, thresh))
            .collect();
        spell_stat(&mask, window, stat)
    })
}

fn dry_spell_frequency(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    precip_spells(ds, args, "dry_spell_frequency", 3, dry, SpellStat::Frequency)
}

fn dry_spell_max_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    precip_spells(ds, args, "dry_spell_max_length", 1, dry, SpellStat::MaxLength)
}

fn dry_spell_total_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    precip_spells(ds, args, "dry_spell_total_length", 3, dry, SpellStat::TotalLength)
}

fn wet_spell_frequency(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    precip_spells(ds, args, "wet_spell_frequency", 3, wet, SpellStat::Frequency)
}

fn wet_spell_max_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    precip_spells(ds, args, "wet_spell_max_length", 1, wet, SpellStat::MaxLength)
}

fn wet_spell_total_length(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    precip_spells(ds, args, "wet_spell_total_length", 3, wet, SpellStat::TotalLength)
}

const FREQ: &[&str] = &["freq"];
const THRESH_FREQ: &[&str] = &["thresh", "freq"];
const SPELL: &[&str] = &["thresh", "window", "freq"];

/// Total precipitation.
pub static PRECIP_ACCUMULATION: IndicatorFunction =
    IndicatorFunction::new("precip_accumulation", &["pr"], FREQ, precip_accumulation);
/// Mean daily precipitation.
pub static PRECIP_AVERAGE: IndicatorFunction =
    IndicatorFunction::new("precip_average", &["pr"], FREQ, precip_average);
/// Total precipitation on days with `pr >= thresh`.
pub static WET_PRECIP_ACCUMULATION: IndicatorFunction = IndicatorFunction::new(
    "wet_precip_accumulation",
    &["pr"],
    THRESH_FREQ,
    wet_precip_accumulation,
);
/// Highest daily precipitation.
pub static MAX_1DAY_PRECIPITATION_AMOUNT: IndicatorFunction = IndicatorFunction::new(
    "max_1day_precipitation_amount",
    &["pr"],
    FREQ,
    max_1day_precipitation_amount,
);
/// Highest precipitation total over `window` consecutive days.
pub static MAX_N_DAY_PRECIPITATION_AMOUNT: IndicatorFunction = IndicatorFunction::new(
    "max_n_day_precipitation_amount",
    &["pr"],
    &["window", "freq"],
    max_n_day_precipitation_amount,
);
/// Days with `pr >= thresh`.
pub static WETDAYS: IndicatorFunction =
    IndicatorFunction::new("wetdays", &["pr"], THRESH_FREQ, wetdays);
/// Days with `pr < thresh`.
pub static DRY_DAYS: IndicatorFunction =
    IndicatorFunction::new("dry_days", &["pr"], THRESH_FREQ, dry_days);
pub static MAXIMUM_CONSECUTIVE_DRY_DAYS: IndicatorFunction = IndicatorFunction::new(
    "maximum_consecutive_dry_days",
    &["pr"],
    THRESH_FREQ,
    maximum_consecutive_dry_days,
);
pub static MAXIMUM_CONSECUTIVE_WET_DAYS: IndicatorFunction = IndicatorFunction::new(
    "maximum_consecutive_wet_days",
    &["pr"],
    THRESH_FREQ,
    maximum_consecutive_wet_days,
);
/// Simple daily intensity index: mean precipitation on wet days.
pub static DAILY_PR_INTENSITY: IndicatorFunction =
    IndicatorFunction::new("daily_pr_intensity", &["pr"], THRESH_FREQ, daily_pr_intensity);
pub static DRY_SPELL_FREQUENCY: IndicatorFunction =
    IndicatorFunction::new("dry_spell_frequency", &["pr"], SPELL, dry_spell_frequency);
pub static DRY_SPELL_MAX_LENGTH: IndicatorFunction =
    IndicatorFunction::new("dry_spell_max_length", &["pr"], SPELL, dry_spell_max_length);
pub static DRY_SPELL_TOTAL_LENGTH: IndicatorFunction =
    IndicatorFunction::new("dry_spell_total_length", &["pr"], SPELL, dry_spell_total_length);
pub static WET_SPELL_FREQUENCY: IndicatorFunction =
    IndicatorFunction::new("wet_spell_frequency", &["pr"], SPELL, wet_spell_frequency);
pub static WET_SPELL_MAX_LENGTH: IndicatorFunction =
    IndicatorFunction::new("wet_spell_max_length", &["pr"], SPELL, wet_spell_max_length);
pub static WET_SPELL_TOTAL_LENGTH: IndicatorFunction =
    IndicatorFunction::new("wet_spell_total_length", &["pr"], SPELL, wet_spell_total_length);
