//! Error types for the xcalc-calendar crate.

/// Error type for all fallible operations in the xcalc-calendar crate.
///
/// This enum covers validation failures for day-of-year values, month and
/// day numbers, date strings and resampling frequency tokens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned when a date string cannot be parsed.
    #[error("invalid date string '{value}': {reason}")]
    InvalidDateString {
        /// The string that failed to parse.
        value: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a resampling frequency token is not recognised.
    #[error("unknown frequency token: '{token}'")]
    UnknownFrequency {
        /// The unrecognised token.
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_doy() {
        let err = CalendarError::InvalidDoy { doy: 0 };
        assert_eq!(err.to_string(), "invalid day of year: 0 (must be 1..=366)");
    }

    #[test]
    fn error_invalid_day() {
        let err = CalendarError::InvalidDay {
            day: 30,
            month: 2,
            max_day: 29,
        };
        assert_eq!(err.to_string(), "invalid day: 30 for month 2 (max 29)");
    }

    #[test]
    fn error_invalid_date_string() {
        let err = CalendarError::InvalidDateString {
            value: "19x1".to_string(),
            reason: "year is not numeric".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date string '19x1': year is not numeric"
        );
    }

    #[test]
    fn error_unknown_frequency() {
        let err = CalendarError::UnknownFrequency {
            token: "fortnight".to_string(),
        };
        assert_eq!(err.to_string(), "unknown frequency token: 'fortnight'");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<CalendarError>();
    }
}
