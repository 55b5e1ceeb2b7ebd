//! Engine configuration and the fallback source of parameter defaults.

use std::collections::BTreeMap;

use xcalc_array::Quantity;
use xcalc_calendar::{period_end, period_start};
use xcalc_indices::Value;

use crate::error::EngineError;

/// Reference period used for percentile thresholds unless overridden.
pub const DEFAULT_BASE_PERIOD: (&str, &str) = ("1961", "1990");

/// Token that stands for an embedded number in placeholder-style ids.
pub const DEFAULT_PLACEHOLDER: &str = "YY";

/// Supplies values for descriptor defaults declared as [`Value::None`].
///
/// Consulted by the binder only after explicit overrides and registry
/// defaults; returning `None` leaves the parameter unbound.
pub trait DefaultProvider {
    /// Returns the fallback value for `name`, if this provider knows one.
    fn default_for(&self, name: &str) -> Option<Value>;
}

/// A provider that knows no defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultProvider for NoDefaults {
    fn default_for(&self, _name: &str) -> Option<Value> {
        None
    }
}

/// Configuration for the calculator.
///
/// # Example
///
/// ```
/// use xcalc_engine::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_base_period("1971", "2000")
///     .with_percentile_window(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    base_period: (String, String),
    wet_day_threshold: String,
    percentile_window: usize,
    placeholder: String,
}

impl EngineConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `base_period = ("1961", "1990")`,
    /// `wet_day_threshold = "1 mm/day"`, `percentile_window = 5`,
    /// `placeholder = "YY"`.
    pub fn new() -> Self {
        Self {
            base_period: (
                DEFAULT_BASE_PERIOD.0.to_string(),
                DEFAULT_BASE_PERIOD.1.to_string(),
            ),
            wet_day_threshold: "1 mm/day".to_string(),
            percentile_window: 5,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    /// Sets the percentile base period as two (partial) date strings.
    pub fn with_base_period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.base_period = (start.into(), end.into());
        self
    }

    /// Sets the wet-day threshold used to mask precipitation before
    /// percentiles are computed.
    pub fn with_wet_day_threshold(mut self, thresh: impl Into<String>) -> Self {
        self.wet_day_threshold = thresh.into();
        self
    }

    /// Sets the day-of-year window (in days) pooled around each day.
    pub fn with_percentile_window(mut self, window: usize) -> Self {
        self.percentile_window = window;
        self
    }

    /// Sets the placeholder token used by placeholder-style ids.
    pub fn with_placeholder(mut self, token: impl Into<String>) -> Self {
        self.placeholder = token.into();
        self
    }

    // --- Accessors ---

    /// Returns the base period.
    pub fn base_period(&self) -> (&str, &str) {
        (&self.base_period.0, &self.base_period.1)
    }

    /// Returns the wet-day threshold quantity string.
    pub fn wet_day_threshold(&self) -> &str {
        &self.wet_day_threshold
    }

    /// Returns the percentile window length.
    pub fn percentile_window(&self) -> usize {
        self.percentile_window
    }

    /// Returns the placeholder token.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Validates this configuration.
    ///
    /// Checks that the base period parses and is ordered, that the wet-day
    /// threshold is a quantity, that the window is positive and that the
    /// placeholder contains no digits.
    pub fn validate(&self) -> Result<(), EngineError> {
        let (start, end) = self.base_period();
        let first = period_start(start).map_err(|e| EngineError::InvalidConfig {
            reason: format!("base period start: {e}"),
        })?;
        let last = period_end(end).map_err(|e| EngineError::InvalidConfig {
            reason: format!("base period end: {e}"),
        })?;
        if last < first {
            return Err(EngineError::InvalidConfig {
                reason: format!("base period {start}..{end} ends before it starts"),
            });
        }
        if let Err(e) = Quantity::parse(&self.wet_day_threshold) {
            return Err(EngineError::InvalidConfig {
                reason: format!("wet_day_threshold: {e}"),
            });
        }
        if self.percentile_window == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "percentile_window must be >= 1".to_string(),
            });
        }
        if self.placeholder.is_empty() || self.placeholder.chars().any(|c| c.is_ascii_digit()) {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "placeholder must be non-empty and digit-free, got '{}'",
                    self.placeholder
                ),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultProvider for EngineConfig {
    fn default_for(&self, name: &str) -> Option<Value> {
        match name {
            "base_period_time_range" => {
                let mut range = BTreeMap::new();
                range.insert("start".to_string(), Value::from(self.base_period.0.as_str()));
                range.insert("end".to_string(), Value::from(self.base_period.1.as_str()));
                Some(Value::Map(range))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_period(), ("1961", "1990"));
        assert_eq!(config.wet_day_threshold(), "1 mm/day");
        assert_eq!(config.percentile_window(), 5);
        assert_eq!(config.placeholder(), "YY");
    }

    #[test]
    fn rejects_reversed_base_period() {
        let config = EngineConfig::new().with_base_period("1990", "1961");
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_bad_threshold_and_window() {
        assert!(EngineConfig::new().with_wet_day_threshold("wet").validate().is_err());
        assert!(EngineConfig::new().with_percentile_window(0).validate().is_err());
    }

    #[test]
    fn rejects_digit_placeholder() {
        let err = EngineConfig::new().with_placeholder("N1").validate().unwrap_err();
        assert!(err.to_string().contains("digit-free"));
    }

    #[test]
    fn provides_base_period() {
        let config = EngineConfig::new().with_base_period("1971", "2000");
        let value = config.default_for("base_period_time_range").unwrap();
        let range = value.as_map().unwrap();
        assert_eq!(range["start"], Value::from("1971"));
        assert_eq!(range["end"], Value::from("2000"));
        assert_eq!(config.default_for("thresh"), None);
        assert_eq!(NoDefaults.default_for("base_period_time_range"), None);
    }
}
