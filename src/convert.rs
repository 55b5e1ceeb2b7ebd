//! Pure conversion functions: TOML and command-line input -> engine types.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use xcalc_array::{DataArray, Dataset};
use xcalc_calendar::daily_sequence;
use xcalc_engine::EngineConfig;
use xcalc_indices::Value;

use crate::config::EngineToml;
use crate::input::SeriesToml;

/// Builds an [`EngineConfig`] from the TOML engine configuration.
pub fn build_engine_config(engine: &EngineToml) -> Result<EngineConfig> {
    let [start, end] = &engine.base_period;
    let cfg = EngineConfig::new()
        .with_base_period(start.as_str(), end.as_str())
        .with_wet_day_threshold(engine.wet_day_threshold.as_str())
        .with_percentile_window(engine.percentile_window)
        .with_placeholder(engine.placeholder.as_str());
    cfg.validate().context("invalid [engine] configuration")?;
    Ok(cfg)
}

/// Turns `--set name=value` pairs into parameter overrides.
///
/// Values are parsed as literals. A dotted name `name.key` sets one entry of
/// a map-valued parameter; mixing both forms for the same name is an error.
pub fn build_overrides(sets: &[(String, String)]) -> Result<BTreeMap<String, Value>> {
    let mut overrides = BTreeMap::new();
    for (name, raw) in sets {
        let value = Value::from_literal(raw);
        match name.split_once('.') {
            None => {
                if matches!(overrides.get(name), Some(Value::Map(_))) {
                    bail!("'{name}' is set both as a map and as a plain value");
                }
                overrides.insert(name.clone(), value);
            }
            Some((outer, key)) => {
                let entry = overrides
                    .entry(outer.to_string())
                    .or_insert_with(|| Value::Map(BTreeMap::new()));
                let Value::Map(map) = entry else {
                    bail!("'{outer}' is set both as a map and as a plain value");
                };
                map.insert(key.to_string(), value);
            }
        }
    }
    Ok(overrides)
}

/// Builds a [`Dataset`] from inline series, all starting on the same day.
pub fn build_dataset(series: &SeriesToml) -> Result<Dataset> {
    let start = NaiveDate::parse_from_str(&series.start, "%Y-%m-%d")
        .with_context(|| format!("invalid start date: {:?}", series.start))?;
    let mut dataset = Dataset::new();
    for (name, variable) in &series.variables {
        let dates = daily_sequence(start, variable.values.len());
        let array = DataArray::from_series(
            name.as_str(),
            dates,
            variable.values.clone(),
            variable.units.as_str(),
        )
        .with_context(|| format!("invalid series for variable '{name}'"))?;
        dataset.insert(array);
    }
    if let Some(ref freq) = series.frequency {
        dataset = dataset.with_frequency(freq.as_str());
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::VariableToml;

    fn sets(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn default_engine_toml_validates() {
        let cfg = build_engine_config(&EngineToml::default()).unwrap();
        assert_eq!(cfg.base_period(), ("1961", "1990"));
        assert_eq!(cfg.placeholder(), "YY");
    }

    #[test]
    fn invalid_engine_toml_is_rejected() {
        let engine = EngineToml {
            percentile_window: 0,
            ..EngineToml::default()
        };
        assert!(build_engine_config(&engine).is_err());
    }

    #[test]
    fn overrides_parse_literals() {
        let o = build_overrides(&sets(&[("window", "3"), ("thresh", "25 degC")])).unwrap();
        assert_eq!(o["window"], Value::Int(3));
        assert_eq!(o["thresh"], Value::from("25 degC"));
    }

    #[test]
    fn dotted_names_build_maps() {
        let o = build_overrides(&sets(&[
            ("base_period_time_range.start", "1971"),
            ("base_period_time_range.end", "2000"),
        ]))
        .unwrap();
        let range = o["base_period_time_range"].as_map().unwrap();
        assert_eq!(range["start"], Value::Int(1971));
        assert_eq!(range["end"], Value::Int(2000));
    }

    #[test]
    fn mixed_forms_are_rejected() {
        assert!(build_overrides(&sets(&[("a", "1"), ("a.b", "2")])).is_err());
        assert!(build_overrides(&sets(&[("a.b", "2"), ("a", "1")])).is_err());
    }

    #[test]
    fn dataset_from_series() {
        let mut variables = BTreeMap::new();
        variables.insert(
            "tas".to_string(),
            VariableToml {
                units: "K".to_string(),
                values: vec![280.0, 281.0, 282.0],
            },
        );
        let series = SeriesToml {
            start: "2000-02-28".to_string(),
            frequency: Some("MS".to_string()),
            variables,
        };
        let ds = build_dataset(&series).unwrap();
        assert_eq!(ds.frequency(), Some("MS"));
        let tas = ds.get("tas").unwrap();
        assert_eq!(tas.n_steps(), 3);
        assert_eq!(
            tas.dates().unwrap()[2],
            NaiveDate::from_ymd_opt(2000, 3, 1).unwrap()
        );
    }

    #[test]
    fn bad_start_date() {
        let series = SeriesToml {
            start: "01/01/2000".to_string(),
            frequency: None,
            variables: BTreeMap::new(),
        };
        let err = build_dataset(&series).unwrap_err();
        assert!(err.to_string().contains("01/01/2000"));
    }
}
