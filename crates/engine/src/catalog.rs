//! The built-in indicator catalogue.

use xcalc_indices::exceedance::*;
use xcalc_indices::precipitation::*;
use xcalc_indices::temperature::*;
use xcalc_indices::wind::*;
use xcalc_indices::{IndicatorFunction, Value};

use crate::descriptor::{IndicatorDescriptor, PercentileSpec};

const DEG_C: &str = "degC";
const MM_PER_DAY: &str = "mm/day";

/// A count or statistic with a single embedded threshold.
fn threshold(
    id: &'static str,
    summary: &'static str,
    f: &'static IndicatorFunction,
    thresh: impl Into<Value>,
    unit: &'static str,
) -> IndicatorDescriptor {
    IndicatorDescriptor::new(id, summary, f)
        .with_default("thresh", thresh)
        .with_unit("thresh", unit)
        .with_embedded_param("thresh")
}

fn spell(
    id: &'static str,
    summary: &'static str,
    f: &'static IndicatorFunction,
    thresh: i64,
    unit: &'static str,
    window: i64,
) -> IndicatorDescriptor {
    threshold(id, summary, f, thresh, unit).with_default("window", window)
}

fn heat_wave(
    id: &'static str,
    summary: &'static str,
    f: &'static IndicatorFunction,
    window: i64,
) -> IndicatorDescriptor {
    IndicatorDescriptor::new(id, summary, f)
        .with_default("thresh_tasmin", 22)
        .with_default("thresh_tasmax", 30)
        .with_default("window", window)
        .with_unit("thresh_tasmin", DEG_C)
        .with_unit("thresh_tasmax", DEG_C)
}

/// Days beyond a temperature percentile.
fn temperature_percentile(
    id: &'static str,
    summary: &'static str,
    f: &'static IndicatorFunction,
    param: &'static str,
    variable: &'static str,
    rank: f64,
) -> IndicatorDescriptor {
    IndicatorDescriptor::new(id, summary, f)
        .with_percentile(PercentileSpec::new(param, variable, rank))
        .with_consistent_chunking()
}

/// Joint temperature and precipitation percentile counts.
fn compound(
    id: &'static str,
    summary: &'static str,
    f: &'static IndicatorFunction,
    tas_rank: f64,
    pr_rank: f64,
) -> IndicatorDescriptor {
    IndicatorDescriptor::new(id, summary, f)
        .with_percentile(PercentileSpec::new("tas_per", "tas", tas_rank))
        .with_percentile(PercentileSpec::new("pr_per", "pr", pr_rank).with_precipitation(None))
        .with_consistent_chunking()
}

/// Precipitation against its day-of-year percentile, rank taken from `per`.
fn precip_percentile(
    id: &'static str,
    summary: &'static str,
    f: &'static IndicatorFunction,
) -> IndicatorDescriptor {
    IndicatorDescriptor::new(id, summary, f)
        .with_default("per", 75)
        .with_default("thresh", 1)
        .with_unit("thresh", MM_PER_DAY)
        .with_embedded_param("per")
        .with_percentile(
            PercentileSpec::new("pr_per", "pr", 75.0)
                .with_precipitation(Some("thresh"))
                .with_rank_param("per"),
        )
}

/// Builds every built-in descriptor.
pub(crate) fn builtin_descriptors() -> Vec<IndicatorDescriptor> {
    use IndicatorDescriptor as D;
    vec![
        // Temperature statistics
        D::new("TG", "Mean of daily mean temperature", &TG_MEAN),
        D::new("TX", "Mean of daily maximum temperature", &TX_MEAN),
        D::new("TXn", "Minimum of daily maximum temperature", &TX_MIN),
        D::new("TXx", "Maximum of daily maximum temperature", &TX_MAX),
        D::new("TN", "Mean of daily minimum temperature", &TN_MEAN),
        D::new("TNn", "Minimum of daily minimum temperature", &TN_MIN),
        D::new("TNx", "Maximum of daily minimum temperature", &TN_MAX),
        D::new("DTR", "Mean daily temperature range", &DAILY_TEMPERATURE_RANGE),
        // Temperature thresholds
        D::new("FD", "Frost days (TN < 0 degC)", &FROST_DAYS),
        D::new("ID", "Ice days (TX < 0 degC)", &ICE_DAYS),
        D::new("CFD", "Maximum number of consecutive frost days", &CONSECUTIVE_FROST_DAYS),
        threshold("SU", "Summer days (TX > 25 degC)", &TX_DAYS_ABOVE, 25, DEG_C),
        threshold(
            "CSU",
            "Maximum number of consecutive summer days",
            &MAXIMUM_CONSECUTIVE_WARM_DAYS,
            25,
            DEG_C,
        ),
        threshold(
            "CHDYYx",
            "Maximum number of consecutive hot days (TX > YY degC)",
            &MAXIMUM_CONSECUTIVE_WARM_DAYS,
            30,
            DEG_C,
        ),
        threshold("TR", "Tropical nights (TN > 20 degC)", &TN_DAYS_ABOVE, 20, DEG_C),
        threshold("SQI", "Uncomfortable sleep events (TN > 18 degC)", &TN_DAYS_ABOVE, 18, DEG_C),
        threshold("WI", "Winter days (TN < -10 degC)", &TN_DAYS_BELOW, -10, DEG_C),
        threshold("GD", "Growing degree days above 4 degC", &GROWING_DEGREE_DAYS, 4, DEG_C),
        D::new("HD17", "Heating degree days below 17 degC", &HEATING_DEGREE_DAYS),
        D::new("LFD", "Late frost days between April and June", &LATE_FROST_DAYS)
            .with_date_bounds("04-01", "06-30"),
        // Temperature spells
        spell("CSf", "Cold spell frequency", &COLD_SPELL_FREQUENCY, -10, DEG_C, 3),
        spell("CSx", "Maximum cold spell length", &COLD_SPELL_MAX_LENGTH, -10, DEG_C, 1),
        spell("CSn", "Total cold spell length", &COLD_SPELL_TOTAL_LENGTH, -10, DEG_C, 3),
        spell("HSf", "Hot spell frequency", &HOT_SPELL_FREQUENCY, 35, DEG_C, 3),
        spell("HSx", "Maximum hot spell length", &HOT_SPELL_MAX_LENGTH, 35, DEG_C, 1),
        spell("HSn", "Total hot spell length", &HOT_SPELL_TOTAL_LENGTH, 35, DEG_C, 3),
        heat_wave("HWf", "Heat wave frequency", &HEAT_WAVE_FREQUENCY, 3),
        heat_wave("HWx", "Maximum heat wave length", &HEAT_WAVE_MAX_LENGTH, 1),
        heat_wave("HWn", "Total heat wave length", &HEAT_WAVE_TOTAL_LENGTH, 3),
        // Temperature percentiles
        temperature_percentile("TG10p", "Cold days (TG < 10th percentile)", &TG10P, "tas_per", "tas", 10.0),
        temperature_percentile("TG90p", "Warm days (TG > 90th percentile)", &TG90P, "tas_per", "tas", 90.0),
        temperature_percentile("TX10p", "Cold day-times (TX < 10th percentile)", &TX10P, "tasmax_per", "tasmax", 10.0),
        temperature_percentile("TX90p", "Warm day-times (TX > 90th percentile)", &TX90P, "tasmax_per", "tasmax", 90.0),
        temperature_percentile("TN10p", "Cold nights (TN < 10th percentile)", &TN10P, "tasmin_per", "tasmin", 10.0),
        temperature_percentile("TN90p", "Warm nights (TN > 90th percentile)", &TN90P, "tasmin_per", "tasmin", 90.0),
        temperature_percentile(
            "WSDI",
            "Warm spell duration index",
            &WARM_SPELL_DURATION_INDEX,
            "tasmax_per",
            "tasmax",
            90.0,
        )
        .with_default("window", 6),
        temperature_percentile(
            "CSDI",
            "Cold spell duration index",
            &COLD_SPELL_DURATION_INDEX,
            "tasmin_per",
            "tasmin",
            10.0,
        )
        .with_default("window", 6),
        // Compound
        compound("CD", "Cold and dry days", &COLD_AND_DRY_DAYS, 25.0, 25.0),
        compound("CW", "Cold and wet days", &COLD_AND_WET_DAYS, 25.0, 75.0),
        compound("WD", "Warm and dry days", &WARM_AND_DRY_DAYS, 75.0, 25.0),
        compound("WW", "Warm and wet days", &WARM_AND_WET_DAYS, 75.0, 75.0),
        // Precipitation totals
        D::new("RR", "Precipitation sum", &PRECIP_ACCUMULATION),
        D::new("RRm", "Mean daily precipitation", &PRECIP_AVERAGE),
        threshold(
            "PRCPTOT",
            "Precipitation sum on wet days",
            &WET_PRECIP_ACCUMULATION,
            1,
            MM_PER_DAY,
        ),
        threshold("SDII", "Simple daily intensity index", &DAILY_PR_INTENSITY, 1, MM_PER_DAY),
        D::new("RX1day", "Maximum 1-day precipitation", &MAX_1DAY_PRECIPITATION_AMOUNT),
        D::new(
            "RXYYday",
            "Maximum YY-day precipitation",
            &MAX_N_DAY_PRECIPITATION_AMOUNT,
        )
        .with_default("window", 5)
        .with_embedded_param("window"),
        // Precipitation day counts
        D::new("RR1", "Wet days (RR >= 1 mm)", &WETDAYS)
            .with_default("thresh", "1 mm/day")
            .with_unit("thresh", MM_PER_DAY),
        D::new("R10mm", "Heavy precipitation days (RR >= 10 mm)", &WETDAYS)
            .with_default("thresh", "10 mm/day")
            .with_unit("thresh", MM_PER_DAY),
        D::new("R20mm", "Very heavy precipitation days (RR >= 20 mm)", &WETDAYS)
            .with_default("thresh", "20 mm/day")
            .with_unit("thresh", MM_PER_DAY),
        D::new("R25mm", "Super heavy precipitation days (RR >= 25 mm)", &WETDAYS)
            .with_default("thresh", "25 mm/day")
            .with_unit("thresh", MM_PER_DAY),
        threshold("RYYmm", "Days with RR >= YY mm", &WETDAYS, 25, MM_PER_DAY),
        threshold("DD", "Dry days (RR < 1 mm)", &DRY_DAYS, 1, MM_PER_DAY),
        threshold(
            "CDD",
            "Maximum number of consecutive dry days",
            &MAXIMUM_CONSECUTIVE_DRY_DAYS,
            1,
            MM_PER_DAY,
        ),
        threshold(
            "CWD",
            "Maximum number of consecutive wet days",
            &MAXIMUM_CONSECUTIVE_WET_DAYS,
            1,
            MM_PER_DAY,
        ),
        // Precipitation spells
        spell("DSf", "Dry spell frequency", &DRY_SPELL_FREQUENCY, 1, "mm", 5),
        spell("DSx", "Maximum dry spell length", &DRY_SPELL_MAX_LENGTH, 1, "mm", 1),
        spell("DSn", "Total dry spell length", &DRY_SPELL_TOTAL_LENGTH, 1, "mm", 5),
        spell("WSf", "Wet spell frequency", &WET_SPELL_FREQUENCY, 1, "mm", 5),
        spell("WSx", "Maximum wet spell length", &WET_SPELL_MAX_LENGTH, 1, "mm", 1),
        spell("WSn", "Total wet spell length", &WET_SPELL_TOTAL_LENGTH, 1, "mm", 5),
        // Precipitation percentiles
        precip_percentile("RRYYp", "YYth percentile of wet-day precipitation", &PERCENTILE_DOY_VALUE),
        precip_percentile("RYYp", "Days with RR above the YYth percentile", &DAYS_OVER_PRECIP_DOY_THRESH),
        precip_percentile(
            "RYYpABS",
            "Precipitation amount on days above the YYth percentile",
            &PRECIP_AMOUNT_OVER_DOY_THRESH,
        )
        .with_consistent_chunking(),
        precip_percentile(
            "RYYpTOT",
            "Share of precipitation on days above the YYth percentile",
            &FRACTION_OVER_PRECIP_THRESH,
        )
        .with_consistent_chunking(),
        // Wind
        D::new("FG", "Mean of daily mean wind speed", &SFC_WIND_MEAN),
        D::new("FGn", "Minimum of daily mean wind speed", &SFC_WIND_MIN),
        D::new("FGx", "Maximum of daily mean wind speed", &SFC_WIND_MAX),
        D::new("FX", "Mean of daily maximum wind speed", &SFC_WINDMAX_MEAN),
        D::new("FXn", "Minimum of daily maximum wind speed", &SFC_WINDMAX_MIN),
        D::new("FXx", "Maximum of daily maximum wind speed", &SFC_WINDMAX_MAX),
    ]
}
