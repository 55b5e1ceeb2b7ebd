//! Dynamically typed parameter values.

use std::collections::BTreeMap;
use std::sync::Arc;

use xcalc_array::{DataArray, Dataset};
use xcalc_calendar::MonthDay;

/// A parameter value passed to an indicator function.
///
/// `None` marks a parameter that has no value yet and must be supplied by the
/// caller or computed before the call.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    None,
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String, including quantity strings such as `"25 degC"`.
    Str(String),
    /// Ordered list.
    List(Vec<Value>),
    /// Nested mapping.
    Map(BTreeMap<String, Value>),
    /// Inclusive month-day window.
    DateBounds(MonthDay, MonthDay),
    /// A computed array (e.g. a day-of-year percentile).
    Array(Arc<DataArray>),
    /// A dataset (e.g. a stored percentile dataset holding a `per` variable).
    Dataset(Arc<Dataset>),
}

impl Value {
    /// Parses a literal as written on a command line or in a config file.
    ///
    /// `true`/`false` become booleans, integers and floats are recognised,
    /// `none` is [`Value::None`], `[a, b]` is a list; everything else is a string.
    pub fn from_literal(s: &str) -> Self {
        let s = s.trim();
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            if inner.trim().is_empty() {
                return Self::List(Vec::new());
            }
            return Self::List(inner.split(',').map(Self::from_literal).collect());
        }
        match s {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            "none" | "None" => return Self::None,
            _ => {}
        }
        if let Ok(i) = s.parse::<i64>() {
            Self::Int(i)
        } else if let Ok(f) = s.parse::<f64>() {
            Self::Float(f)
        } else {
            Self::Str(s.trim_matches('"').to_string())
        }
    }

    /// Returns `true` for [`Value::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` for bare numbers.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Returns the value as `f64` if it is a bare number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as a string slice if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested mapping, if any.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::DateBounds(..) => "date bounds",
            Self::Array(_) => "array",
            Self::Dataset(_) => "dataset",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Self::DateBounds(start, end) => write!(f, "({start}, {end})"),
            Self::Array(a) => write!(f, "<array '{}' [{}]>", a.name(), a.units()),
            Self::Dataset(ds) => write!(f, "<dataset with {} variables>", ds.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<DataArray> for Value {
    fn from(a: DataArray) -> Self {
        Self::Array(Arc::new(a))
    }
}

impl From<Arc<DataArray>> for Value {
    fn from(a: Arc<DataArray>) -> Self {
        Self::Array(a)
    }
}

impl From<Dataset> for Value {
    fn from(ds: Dataset) -> Self {
        Self::Dataset(Arc::new(ds))
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(Value::from_literal("30"), Value::Int(30));
        assert_eq!(Value::from_literal("-2.5"), Value::Float(-2.5));
        assert_eq!(Value::from_literal("true"), Value::Bool(true));
        assert_eq!(Value::from_literal("none"), Value::None);
        assert_eq!(Value::from_literal("25 degC"), Value::from("25 degC"));
        assert_eq!(Value::from_literal("\"YS\""), Value::from("YS"));
        assert_eq!(
            Value::from_literal("[1971, 2000]"),
            Value::List(vec![Value::Int(1971), Value::Int(2000)])
        );
    }

    #[test]
    fn display() {
        assert_eq!(Value::Int(30).to_string(), "30");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Float(25.0).to_string(), "25");
        let mut map = BTreeMap::new();
        map.insert("end".to_string(), Value::from("1990"));
        map.insert("start".to_string(), Value::from("1961"));
        assert_eq!(Value::Map(map).to_string(), "{end: 1990, start: 1961}");
        let bounds = Value::DateBounds(
            MonthDay::parse("04-01").unwrap(),
            MonthDay::parse("06-30").unwrap(),
        );
        assert_eq!(bounds.to_string(), "(04-01, 06-30)");
    }

    #[test]
    fn numbers() {
        assert!(Value::Int(1).is_number());
        assert!(!Value::from("1 mm/day").is_number());
        assert_eq!(Value::Int(-5).as_f64(), Some(-5.0));
        assert_eq!(Value::None.kind(), "none");
    }
}
