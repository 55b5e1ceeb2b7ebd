//! Error types for the xcalc-indices crate.

use xcalc_array::ArrayError;
use xcalc_calendar::CalendarError;

/// Error type for all fallible operations in the xcalc-indices crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndexError {
    /// Returned when a required argument was not supplied.
    #[error("{function}: missing argument '{name}'")]
    MissingArgument {
        /// Name of the indicator function.
        function: &'static str,
        /// Name of the missing argument.
        name: String,
    },

    /// Returned when an argument has the wrong type or an unusable value.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an input variable has no time axis.
    #[error("'{variable}' must have a time axis")]
    NotATimeSeries {
        /// Name of the variable.
        variable: String,
    },

    /// Array error.
    #[error(transparent)]
    Array(#[from] ArrayError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_argument() {
        let e = IndexError::MissingArgument {
            function: "tg90p",
            name: "tas_per".to_string(),
        };
        assert_eq!(e.to_string(), "tg90p: missing argument 'tas_per'");
    }

    #[test]
    fn display_invalid_argument() {
        let e = IndexError::InvalidArgument {
            name: "window".to_string(),
            reason: "expected a non-negative integer, got 'five'".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid argument 'window': expected a non-negative integer, got 'five'"
        );
    }

    #[test]
    fn array_transparent() {
        let e: IndexError = ArrayError::UnknownUnit {
            unit: "furlong".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "unknown unit: 'furlong'");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<IndexError>();
    }
}
