//! Unit strings, quantities and linear conversion between them.
//!
//! Units are mapped onto a canonical SI unit per physical dimension; a
//! conversion is then `canonical = value * mul / div + offset`. Precipitation
//! fluxes and amounts follow the hydrological convention that 1 kg m-2 of
//! water equals 1 mm.

use crate::error::ArrayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Temperature,
    /// Temperature interval (degree days and thresholds on differences).
    TemperatureDelta,
    PrecipitationFlux,
    PrecipitationAmount,
    Speed,
    Time,
    Dimensionless,
}

/// `canonical = value * mul / div + offset`.
///
/// Keeping the divisor separate means `1 mm/day` converts to exactly
/// `1.0 / 86400.0` kg m-2 s-1, matching data stored in SI flux units.
#[derive(Debug, Clone, Copy, PartialEq)]
struct UnitDef {
    dimension: Dimension,
    mul: f64,
    div: f64,
    offset: f64,
}

const SECONDS_PER_DAY: f64 = 86_400.0;

fn unit_def(unit: &str) -> Option<UnitDef> {
    use Dimension::*;
    let normalized = unit.split_whitespace().collect::<Vec<_>>().join(" ");
    let def = |dimension, mul, div, offset| {
        Some(UnitDef {
            dimension,
            mul,
            div,
            offset,
        })
    };
    match normalized.as_str() {
        "K" | "kelvin" | "degK" => def(Temperature, 1.0, 1.0, 0.0),
        "degC" | "°C" | "C" | "celsius" | "deg_C" => def(Temperature, 1.0, 1.0, 273.15),
        "degF" | "°F" | "fahrenheit" => def(Temperature, 5.0, 9.0, 273.15 - 32.0 * 5.0 / 9.0),
        "K d" | "K days" | "degC d" | "degC days" | "delta_degC" | "delta_K" => {
            def(TemperatureDelta, 1.0, 1.0, 0.0)
        }
        "kg m-2 s-1" | "kg/m2/s" | "kg m**-2 s**-1" | "mm/s" | "mm s-1" => {
            def(PrecipitationFlux, 1.0, 1.0, 0.0)
        }
        "mm/day" | "mm/d" | "mm d-1" | "mm day-1" | "kg m-2 d-1" => {
            def(PrecipitationFlux, 1.0, SECONDS_PER_DAY, 0.0)
        }
        "mm/h" | "mm h-1" | "mm/hr" => def(PrecipitationFlux, 1.0, 3600.0, 0.0),
        "mm" | "kg m-2" | "kg/m2" => def(PrecipitationAmount, 1.0, 1.0, 0.0),
        "cm" => def(PrecipitationAmount, 10.0, 1.0, 0.0),
        "m" => def(PrecipitationAmount, 1000.0, 1.0, 0.0),
        "m s-1" | "m/s" => def(Speed, 1.0, 1.0, 0.0),
        "km/h" | "km h-1" => def(Speed, 1.0, 3.6, 0.0),
        "d" | "day" | "days" => def(Time, 1.0, 1.0, 0.0),
        "" | "1" | "dimensionless" => def(Dimensionless, 1.0, 1.0, 0.0),
        "%" | "percent" => def(Dimensionless, 1.0, 100.0, 0.0),
        _ => None,
    }
}

fn lookup(unit: &str) -> Result<UnitDef, ArrayError> {
    unit_def(unit).ok_or_else(|| ArrayError::UnknownUnit {
        unit: unit.to_string(),
    })
}

/// Converts `value` from unit `from` to unit `to`.
///
/// # Errors
///
/// Returns [`ArrayError::UnknownUnit`] if either unit is not recognised and
/// [`ArrayError::IncompatibleUnits`] if they measure different dimensions.
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64, ArrayError> {
    if from.trim() == to.trim() {
        return Ok(value);
    }
    let src = lookup(from)?;
    let dst = lookup(to)?;
    if src.dimension != dst.dimension {
        return Err(ArrayError::IncompatibleUnits {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    if src.offset == dst.offset && src.mul == dst.mul && src.div == dst.div {
        return Ok(value);
    }
    let canonical = value * src.mul / src.div + src.offset;
    Ok((canonical - dst.offset) * dst.div / dst.mul)
}

/// Returns `true` if both units are known and measure the same dimension.
pub fn same_dimension(a: &str, b: &str) -> bool {
    matches!((unit_def(a), unit_def(b)), (Some(x), Some(y)) if x.dimension == y.dimension)
}

/// A magnitude with a unit, written as `"<number> <unit>"` (e.g. `"25.0 degC"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: String,
}

impl Quantity {
    /// Creates a new quantity.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Parses a quantity string.
    ///
    /// The number and the unit may be separated by whitespace (`"1 mm/day"`)
    /// or written together (`"1mm/day"`). A bare number is dimensionless.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidQuantity`] if no leading number is found.
    pub fn parse(s: &str) -> Result<Self, ArrayError> {
        let trimmed = s.trim();
        let split = trimmed
            .char_indices()
            .find(|&(i, c)| {
                !(c.is_ascii_digit()
                    || c == '.'
                    || ((c == '-' || c == '+') && (i == 0 || trimmed[..i].ends_with(['e', 'E'])))
                    || ((c == 'e' || c == 'E')
                        && i > 0
                        && trimmed[i + 1..].starts_with(|n: char| {
                            n.is_ascii_digit() || n == '-' || n == '+'
                        })))
            })
            .map_or(trimmed.len(), |(i, _)| i);
        let (number, unit) = trimmed.split_at(split);
        let value = number
            .parse::<f64>()
            .map_err(|_| ArrayError::InvalidQuantity {
                value: s.to_string(),
                reason: "expected a leading number".to_string(),
            })?;
        Ok(Self::new(value, unit.trim()))
    }

    /// Returns the magnitude.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the unit string.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Returns the magnitude expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`convert`].
    pub fn to(&self, unit: &str) -> Result<f64, ArrayError> {
        convert(self.value, &self.unit, unit)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

impl std::str::FromStr for Quantity {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn temperature_conversions() {
        assert_relative_eq!(convert(0.0, "degC", "K").unwrap(), 273.15);
        assert_relative_eq!(convert(305.15, "K", "degC").unwrap(), 32.0, epsilon = 1e-10);
        assert_relative_eq!(convert(32.0, "degF", "degC").unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn precipitation_flux_hydro_context() {
        let per_second = convert(1.0, "mm/day", "kg m-2 s-1").unwrap();
        assert_eq!(per_second, 1.0 / 86_400.0);
        assert_eq!(convert(20.0, "mm/day", "kg m-2 s-1").unwrap(), 20.0 / 86_400.0);
        assert_relative_eq!(convert(per_second, "kg m-2 s-1", "mm d-1").unwrap(), 1.0);
        assert_relative_eq!(convert(2.0, "cm", "mm").unwrap(), 20.0);
    }

    #[test]
    fn incompatible_and_unknown() {
        assert!(matches!(
            convert(1.0, "K", "mm/day"),
            Err(ArrayError::IncompatibleUnits { .. })
        ));
        assert!(matches!(
            convert(1.0, "furlong", "m"),
            Err(ArrayError::UnknownUnit { .. })
        ));
        // Identical strings pass through even when unknown.
        assert_eq!(convert(3.0, "furlong", "furlong").unwrap(), 3.0);
    }

    #[test]
    fn parse_spaced_and_compact() {
        let q = Quantity::parse("25.0 degC").unwrap();
        assert_eq!((q.value(), q.unit()), (25.0, "degC"));

        let q = Quantity::parse("1mm/day").unwrap();
        assert_eq!((q.value(), q.unit()), (1.0, "mm/day"));

        let q = Quantity::parse("-5 degC").unwrap();
        assert_eq!(q.value(), -5.0);

        let q = Quantity::parse("1e-3 kg m-2 s-1").unwrap();
        assert_eq!((q.value(), q.unit()), (1e-3, "kg m-2 s-1"));

        let q = Quantity::parse("0.5").unwrap();
        assert_eq!((q.value(), q.unit()), (0.5, ""));
    }

    #[test]
    fn parse_rejects_missing_number() {
        assert!(matches!(
            Quantity::parse("degC"),
            Err(ArrayError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Quantity::new(10.0, "mm/day").to_string(), "10 mm/day");
        assert_eq!(Quantity::new(0.5, "").to_string(), "0.5");
    }

    #[test]
    fn dimension_check() {
        assert!(same_dimension("degC", "K"));
        assert!(!same_dimension("degC", "mm"));
        assert!(!same_dimension("??", "??"));
    }
}
