//! Named arguments handed to an indicator function.

use std::collections::BTreeMap;

use xcalc_array::{DataArray, Quantity};
use xcalc_calendar::{Frequency, MonthDay};

use crate::error::IndexError;
use crate::value::Value;

/// Default resampling frequency when no `freq` argument is given.
pub const DEFAULT_FREQ: &str = "YS";

/// Keyword arguments of one indicator call.
///
/// Typed getters convert on access; an argument that is absent or
/// [`Value::None`] falls back to the function's own default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: BTreeMap<String, Value>,
}

impl Args {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts or replaces an argument.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Removes an argument, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Returns the raw value of an argument.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns `true` if the argument is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterates over argument names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keeps only the arguments for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Value) -> bool) {
        self.values.retain(|k, v| keep(k, v));
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn present(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_none())
    }

    /// Returns a quantity argument expressed in `units`.
    ///
    /// The argument must be a quantity string (`"25 degC"`); `default` is used
    /// when it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidArgument`] for non-string values and
    /// propagates parsing and conversion errors.
    pub fn quantity(&self, name: &str, default: &str, units: &str) -> Result<f64, IndexError> {
        let quantity = match self.present(name) {
            None => Quantity::parse(default)?,
            Some(Value::Str(s)) => Quantity::parse(s)?,
            Some(other) => {
                return Err(IndexError::InvalidArgument {
                    name: name.to_string(),
                    reason: format!("expected a quantity string, got {} '{other}'", other.kind()),
                });
            }
        };
        Ok(quantity.to(units)?)
    }

    /// Returns a non-negative integer argument.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidArgument`] for negative, fractional or
    /// non-numeric values.
    pub fn count(&self, name: &str, default: usize) -> Result<usize, IndexError> {
        let invalid = |v: &Value| IndexError::InvalidArgument {
            name: name.to_string(),
            reason: format!("expected a non-negative integer, got '{v}'"),
        };
        match self.present(name) {
            None => Ok(default),
            Some(Value::Int(i)) => usize::try_from(*i).map_err(|_| invalid(&Value::Int(*i))),
            Some(Value::Float(f)) if f.fract() == 0.0 && *f >= 0.0 => Ok(*f as usize),
            Some(v) => Err(invalid(v)),
        }
    }

    /// Returns the resampling frequency (`freq`), defaulting to [`DEFAULT_FREQ`].
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidArgument`] for non-string values and
    /// propagates unknown frequency tokens.
    pub fn freq(&self) -> Result<Frequency, IndexError> {
        match self.present("freq") {
            None => Ok(Frequency::parse(DEFAULT_FREQ)?),
            Some(Value::Str(s)) => Ok(Frequency::parse(s)?),
            Some(other) => Err(IndexError::InvalidArgument {
                name: "freq".to_string(),
                reason: format!("expected a frequency string, got {}", other.kind()),
            }),
        }
    }

    /// Returns a required array argument.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MissingArgument`] if absent and
    /// [`IndexError::InvalidArgument`] if the value is not an array.
    pub fn array(&self, function: &'static str, name: &str) -> Result<&DataArray, IndexError> {
        match self.present(name) {
            None => Err(IndexError::MissingArgument {
                function,
                name: name.to_string(),
            }),
            Some(Value::Array(a)) => Ok(a),
            Some(other) => Err(IndexError::InvalidArgument {
                name: name.to_string(),
                reason: format!("expected an array, got {}", other.kind()),
            }),
        }
    }

    /// Returns the `date_bounds` window, or `default` as `"MM-DD"` strings.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidArgument`] for values other than date bounds.
    pub fn date_bounds(&self, default: (&str, &str)) -> Result<(MonthDay, MonthDay), IndexError> {
        match self.present("date_bounds") {
            None => Ok((MonthDay::parse(default.0)?, MonthDay::parse(default.1)?)),
            Some(Value::DateBounds(start, end)) => Ok((*start, *end)),
            Some(other) => Err(IndexError::InvalidArgument {
                name: "date_bounds".to_string(),
                reason: format!("expected date bounds, got {}", other.kind()),
            }),
        }
    }
}

impl FromIterator<(String, Value)> for Args {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Args {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quantity_converts_and_defaults() {
        let args = Args::new().with("thresh", "30 degC");
        assert_relative_eq!(args.quantity("thresh", "25 degC", "K").unwrap(), 303.15);
        assert_relative_eq!(args.quantity("other", "25 degC", "K").unwrap(), 298.15);
    }

    #[test]
    fn quantity_rejects_bare_numbers() {
        let args = Args::new().with("thresh", 30);
        assert!(matches!(
            args.quantity("thresh", "25 degC", "K"),
            Err(IndexError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn none_falls_back_to_default() {
        let args = Args::new().with("window", Value::None);
        assert_eq!(args.count("window", 5).unwrap(), 5);
    }

    #[test]
    fn count_validation() {
        let args = Args::new()
            .with("a", 3)
            .with("b", 4.0)
            .with("c", -1)
            .with("d", 2.5);
        assert_eq!(args.count("a", 0).unwrap(), 3);
        assert_eq!(args.count("b", 0).unwrap(), 4);
        assert!(args.count("c", 0).is_err());
        assert!(args.count("d", 0).is_err());
    }

    #[test]
    fn freq_default_and_parse() {
        assert_eq!(Args::new().freq().unwrap(), Frequency::YearStart);
        assert_eq!(
            Args::new().with("freq", "7D").freq().unwrap(),
            Frequency::Days(7)
        );
        assert!(Args::new().with("freq", 7).freq().is_err());
    }

    #[test]
    fn array_missing() {
        let err = Args::new().array("tg90p", "tas_per").unwrap_err();
        assert_eq!(err.to_string(), "tg90p: missing argument 'tas_per'");
    }

    #[test]
    fn date_bounds_default() {
        let (start, end) = Args::new().date_bounds(("04-01", "06-30")).unwrap();
        assert_eq!((start.to_string(), end.to_string()), ("04-01".into(), "06-30".into()));
    }
}
