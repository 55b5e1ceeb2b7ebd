//! Error types for the xcalc-array crate.

/// Error type for all fallible operations in the xcalc-array crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrayError {
    /// Returned when a dataset does not hold the requested variable.
    #[error("variable '{name}' not found in dataset (available: {available:?})")]
    VariableNotFound {
        /// Name of the missing variable.
        name: String,
        /// Variables the dataset does hold.
        available: Vec<String>,
    },

    /// Returned when a unit string is not recognised.
    #[error("unknown unit: '{unit}'")]
    UnknownUnit {
        /// The unrecognised unit string.
        unit: String,
    },

    /// Returned when converting between units of different dimensions.
    #[error("cannot convert '{from}' to '{to}'")]
    IncompatibleUnits {
        /// Source unit.
        from: String,
        /// Target unit.
        to: String,
    },

    /// Returned when a quantity string cannot be parsed.
    #[error("invalid quantity '{value}': {reason}")]
    InvalidQuantity {
        /// The string that failed to parse.
        value: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when values and coordinates disagree in length.
    #[error("shape mismatch: coordinate has {expected} steps, values have {got}")]
    ShapeMismatch {
        /// Length of the coordinate.
        expected: usize,
        /// Length of the values along the leading axis.
        got: usize,
    },

    /// Returned when an operation needs a coordinate the array does not have.
    #[error("coordinate mismatch: {reason}")]
    CoordinateMismatch {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error originating from the xcalc-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

impl From<xcalc_calendar::CalendarError> for ArrayError {
    fn from(e: xcalc_calendar::CalendarError) -> Self {
        ArrayError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variable_not_found() {
        let e = ArrayError::VariableNotFound {
            name: "tasmax".to_string(),
            available: vec!["pr".to_string(), "tas".to_string()],
        };
        assert_eq!(
            e.to_string(),
            "variable 'tasmax' not found in dataset (available: [\"pr\", \"tas\"])"
        );
    }

    #[test]
    fn error_incompatible_units() {
        let e = ArrayError::IncompatibleUnits {
            from: "K".to_string(),
            to: "mm/day".to_string(),
        };
        assert_eq!(e.to_string(), "cannot convert 'K' to 'mm/day'");
    }

    #[test]
    fn error_from_calendar() {
        let e: ArrayError = xcalc_calendar::CalendarError::InvalidMonth { month: 13 }.into();
        assert!(matches!(e, ArrayError::Calendar { .. }));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ArrayError>();
    }
}
