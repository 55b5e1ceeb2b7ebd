//! Surface wind indicators on `sfcWind` and `sfcWindmax`.

use xcalc_array::{DataArray, Dataset};
use xcalc_stats::{nan_max, nan_mean, nan_min};

use crate::args::Args;
use crate::error::IndexError;
use crate::function::IndicatorFunction;
use crate::reduce::resample;

fn wind_stat(
    ds: &Dataset,
    args: &Args,
    var: &str,
    name: &str,
    stat: fn(&[f64]) -> f64,
) -> Result<DataArray, IndexError> {
    let da = ds.get(var)?;
    resample(da, args.freq()?, name, da.units(), |v, _| stat(v))
}

fn sfc_wind_mean(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    wind_stat(ds, args, "sfcWind", "sfcWind_mean", nan_mean)
}

fn sfc_wind_min(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    wind_stat(ds, args, "sfcWind", "sfcWind_min", nan_min)
}

fn sfc_wind_max(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    wind_stat(ds, args, "sfcWind", "sfcWind_max", nan_max)
}

fn sfc_windmax_mean(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    wind_stat(ds, args, "sfcWindmax", "sfcWindmax_mean", nan_mean)
}

fn sfc_windmax_min(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    wind_stat(ds, args, "sfcWindmax", "sfcWindmax_min", nan_min)
}

fn sfc_windmax_max(ds: &Dataset, args: &Args) -> Result<DataArray, IndexError> {
    wind_stat(ds, args, "sfcWindmax", "sfcWindmax_max", nan_max)
}

const FREQ: &[&str] = &["freq"];

pub static SFC_WIND_MEAN: IndicatorFunction =
    IndicatorFunction::new("sfcWind_mean", &["sfcWind"], FREQ, sfc_wind_mean);
pub static SFC_WIND_MIN: IndicatorFunction =
    IndicatorFunction::new("sfcWind_min", &["sfcWind"], FREQ, sfc_wind_min);
pub static SFC_WIND_MAX: IndicatorFunction =
    IndicatorFunction::new("sfcWind_max", &["sfcWind"], FREQ, sfc_wind_max);
pub static SFC_WINDMAX_MEAN: IndicatorFunction =
    IndicatorFunction::new("sfcWindmax_mean", &["sfcWindmax"], FREQ, sfc_windmax_mean);
pub static SFC_WINDMAX_MIN: IndicatorFunction =
    IndicatorFunction::new("sfcWindmax_min", &["sfcWindmax"], FREQ, sfc_windmax_min);
pub static SFC_WINDMAX_MAX: IndicatorFunction =
    IndicatorFunction::new("sfcWindmax_max", &["sfcWindmax"], FREQ, sfc_windmax_max);
