use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use xcalc_engine::{DEFAULT_BASE_PERIOD, DEFAULT_PLACEHOLDER};

/// Top-level xcalc configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct XcalcConfig {
    /// Engine settings.
    #[serde(default)]
    pub engine: EngineToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineToml {
    #[serde(default = "default_base_period")]
    pub base_period: [String; 2],
    #[serde(default = "default_wet_day_threshold")]
    pub wet_day_threshold: String,
    #[serde(default = "default_percentile_window")]
    pub percentile_window: usize,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

impl Default for EngineToml {
    fn default() -> Self {
        Self {
            base_period: default_base_period(),
            wet_day_threshold: default_wet_day_threshold(),
            percentile_window: default_percentile_window(),
            placeholder: default_placeholder(),
        }
    }
}

fn default_base_period() -> [String; 2] {
    [
        DEFAULT_BASE_PERIOD.0.to_string(),
        DEFAULT_BASE_PERIOD.1.to_string(),
    ]
}
fn default_wet_day_threshold() -> String {
    "1 mm/day".to_string()
}
fn default_percentile_window() -> usize {
    5
}
fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

impl XcalcConfig {
    /// Reads the configuration file, or returns the defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config TOML: {}", path.display()))
    }
}
