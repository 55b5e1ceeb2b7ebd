//! Inline daily series read from a TOML file.
//!
//! ```toml
//! start = "2000-01-01"
//! frequency = "7D"
//!
//! [variables.tas]
//! units = "K"
//! values = [272.15, 263.15, 273.15]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesToml {
    /// First day of every series, `YYYY-MM-DD`.
    pub start: String,
    /// Resampling frequency used when `freq` is not given.
    #[serde(default)]
    pub frequency: Option<String>,
    pub variables: BTreeMap<String, VariableToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableToml {
    pub units: String,
    /// One value per day. `nan` marks a missing day.
    pub values: Vec<f64>,
}

/// Reads and parses an input series file.
pub fn read_series(path: &Path) -> Result<SeriesToml> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input series: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse input series TOML: {}", path.display()))
}
