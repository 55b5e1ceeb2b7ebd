//! Error types for the xcalc-engine crate.

use xcalc_array::ArrayError;

/// Error type for all fallible operations in the xcalc-engine crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Returned when no resolution strategy maps a code to a registered indicator.
    #[error("unknown index code '{code}'")]
    UnknownIndex {
        /// The code as given by the caller.
        code: String,
    },

    /// Returned when the dataset lacks a variable the computation reads.
    #[error("dataset has no variable '{name}'")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
    },

    /// Returned when a missing input cannot be built from the variables present.
    #[error("cannot derive '{variable}': {reason}")]
    Derivation {
        /// Variable being derived.
        variable: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the percentile base period selects no time steps.
    #[error("base period {start}..{end} selects no data in '{variable}'")]
    EmptyBasePeriod {
        /// Source variable of the percentile.
        variable: String,
        /// First date string of the base period.
        start: String,
        /// Last date string of the base period.
        end: String,
    },

    /// Returned when a bound parameter has an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Indicator function error.
    #[error(transparent)]
    Indicator(#[from] xcalc_indices::IndexError),

    /// Array error.
    #[error(transparent)]
    Array(ArrayError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] xcalc_calendar::CalendarError),
}

impl From<ArrayError> for EngineError {
    fn from(e: ArrayError) -> Self {
        match e {
            ArrayError::VariableNotFound { name, .. } => Self::MissingVariable { name },
            other => Self::Array(other),
        }
    }
}
