//! Index-code resolution.
//!
//! A code such as `"RX5day"` is matched against the registry in three
//! steps: as given, with its digits removed (`"RXday"`), and with each digit
//! run replaced by the placeholder token (`"RXYYday"`). The first strategy
//! that lands on a registered id wins. The digits become the embedded value;
//! a descriptor without an embedded parameter ignores it.

use xcalc_indices::Value;

use crate::binder::ParameterSet;
use crate::descriptor::IndicatorDescriptor;
use crate::error::EngineError;
use crate::registry::IndicatorRegistry;

/// Outcome of resolving one index code.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedCode {
    /// The code is a canonical id.
    Exact {
        /// Canonical id.
        id: &'static str,
    },
    /// The code minus its digits is a canonical id.
    AlphabeticStripped {
        /// Canonical id.
        id: &'static str,
        /// Number taken from the stripped digits.
        value: Value,
    },
    /// The code with digit runs replaced by the placeholder is a canonical id.
    PlaceholderSubstituted {
        /// Canonical id.
        id: &'static str,
        /// Number taken from the replaced digits.
        value: Value,
        /// The placeholder token.
        token: String,
    },
}

impl ResolvedCode {
    /// Canonical id of the indicator.
    pub fn canonical_id(&self) -> &'static str {
        match self {
            Self::Exact { id }
            | Self::AlphabeticStripped { id, .. }
            | Self::PlaceholderSubstituted { id, .. } => id,
        }
    }

    /// Number embedded in the code, if any.
    pub fn embedded_value(&self) -> Option<&Value> {
        match self {
            Self::Exact { .. } => None,
            Self::AlphabeticStripped { value, .. } | Self::PlaceholderSubstituted { value, .. } => {
                Some(value)
            }
        }
    }

    /// Placeholder token, for placeholder matches.
    pub fn placeholder_token(&self) -> Option<&str> {
        match self {
            Self::PlaceholderSubstituted { token, .. } => Some(token),
            _ => None,
        }
    }
}

/// Resolves index codes against a registry.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'r> {
    registry: &'r IndicatorRegistry,
    placeholder: &'r str,
}

impl<'r> NameResolver<'r> {
    /// Creates a resolver using `placeholder` for placeholder-style ids.
    pub fn new(registry: &'r IndicatorRegistry, placeholder: &'r str) -> Self {
        Self {
            registry,
            placeholder,
        }
    }

    /// Resolves `code` to a canonical id and an optional embedded value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownIndex`] if no strategy matches.
    pub fn resolve(&self, code: &str) -> Result<ResolvedCode, EngineError> {
        if let Some(d) = self.registry.get(code) {
            tracing::debug!(code, id = d.canonical_id(), "resolved exactly");
            return Ok(ResolvedCode::Exact {
                id: d.canonical_id(),
            });
        }

        let digits: String = code.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return Err(unknown(code));
        }

        let stripped: String = code.chars().filter(|c| !c.is_ascii_digit()).collect();
        if let Some((d, value)) = self.embedding(&stripped, &digits) {
            tracing::debug!(code, id = d.canonical_id(), %value, "resolved by stripping digits");
            return Ok(ResolvedCode::AlphabeticStripped {
                id: d.canonical_id(),
                value,
            });
        }

        let substituted = replace_digit_runs(code, self.placeholder);
        if let Some((d, value)) = self.embedding(&substituted, &digits) {
            tracing::debug!(code, id = d.canonical_id(), %value, "resolved by placeholder");
            return Ok(ResolvedCode::PlaceholderSubstituted {
                id: d.canonical_id(),
                value,
                token: self.placeholder.to_string(),
            });
        }

        Err(unknown(code))
    }

    /// Looks up `candidate` and converts `digits` for its embedded parameter.
    fn embedding(&self, candidate: &str, digits: &str) -> Option<(&'r IndicatorDescriptor, Value)> {
        let descriptor = self.registry.get(candidate)?;
        let Some(param) = descriptor.embedded_param() else {
            tracing::warn!(
                id = descriptor.canonical_id(),
                digits,
                "index takes no embedded value; ignoring the digits"
            );
            return Some((descriptor, embedded_number(digits, false)));
        };
        let negative = descriptor
            .default(param)
            .and_then(numeric_default)
            .is_some_and(|v| v < 0.0);
        Some((descriptor, embedded_number(digits, negative)))
    }

    /// Name the result should carry.
    ///
    /// Placeholder tokens in `code` are replaced by the bound embedded value.
    /// Without a token, an explicit override of the embedded parameter
    /// replaces the digits of the code, or is appended if there are none.
    pub fn output_name(
        &self,
        code: &str,
        descriptor: &IndicatorDescriptor,
        params: &ParameterSet,
        overridden: bool,
    ) -> String {
        let bound = descriptor
            .embedded_param()
            .and_then(|p| params.get(p))
            .and_then(naming_token);
        let Some(token) = bound else {
            return code.to_string();
        };
        if code.contains(self.placeholder) {
            code.replace(self.placeholder, &token)
        } else if overridden {
            if code.chars().any(|c| c.is_ascii_digit()) {
                replace_digit_runs(code, &token)
            } else {
                format!("{code}{token}")
            }
        } else {
            code.to_string()
        }
    }
}

fn unknown(code: &str) -> EngineError {
    EngineError::UnknownIndex {
        code: code.to_string(),
    }
}

/// Replaces every maximal run of ASCII digits with `token`.
fn replace_digit_runs(code: &str, token: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut in_run = false;
    for c in code.chars() {
        if c.is_ascii_digit() {
            if !in_run {
                out.push_str(token);
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// `"05"` → `0.5`, `"5"` → `5`; negated when the default is negative.
fn embedded_number(digits: &str, negative: bool) -> Value {
    let sign = if negative { -1 } else { 1 };
    match digits.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => {
            let fraction = format!("0.{rest}").parse::<f64>().unwrap_or(0.0);
            Value::Float(f64::from(sign) * fraction)
        }
        _ => match digits.parse::<i64>() {
            Ok(i) => Value::Int(i64::from(sign) * i),
            Err(_) => Value::Float(f64::from(sign) * digits.parse::<f64>().unwrap_or(f64::NAN)),
        },
    }
}

/// Numeric magnitude of a default, for sign detection.
fn numeric_default(v: &Value) -> Option<f64> {
    v.as_f64().or_else(|| {
        v.as_str()
            .and_then(|s| xcalc_array::Quantity::parse(s).ok())
            .map(|q| q.value())
    })
}

/// Text a bound value contributes to an output name.
fn naming_token(v: &Value) -> Option<String> {
    match v {
        Value::Int(_) | Value::Float(_) => Some(v.to_string()),
        Value::Str(s) => Some(
            xcalc_array::Quantity::parse(s)
                .map(|q| q.value().to_string())
                .unwrap_or_else(|_| s.clone()),
        ),
        _ => None,
    }
}
