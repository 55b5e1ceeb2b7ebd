//! Named collections of arrays.

use std::collections::BTreeMap;

use crate::data_array::DataArray;
use crate::error::ArrayError;

/// A set of named variables sharing one resampling-frequency token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    variables: BTreeMap<String, DataArray>,
    frequency: Option<String>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable under its own name, replacing any previous one.
    pub fn with_variable(mut self, array: DataArray) -> Self {
        self.insert(array);
        self
    }

    /// Sets the resampling-frequency token the data was prepared for.
    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }

    /// Adds a variable under its own name, replacing any previous one.
    pub fn insert(&mut self, array: DataArray) {
        self.variables.insert(array.name().to_string(), array);
    }

    /// Returns a variable by name.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::VariableNotFound`] if the variable is absent.
    pub fn get(&self, name: &str) -> Result<&DataArray, ArrayError> {
        self.variables
            .get(name)
            .ok_or_else(|| ArrayError::VariableNotFound {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    /// Returns `true` if the dataset holds `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Iterates over the variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Returns the resampling-frequency token, if set.
    pub fn frequency(&self) -> Option<&str> {
        self.frequency.as_deref()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if the dataset holds no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use xcalc_calendar::daily_sequence;

    fn var(name: &str) -> DataArray {
        let dates = daily_sequence(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 2);
        DataArray::from_series(name, dates, vec![1.0, 2.0], "K").unwrap()
    }

    #[test]
    fn get_and_missing() {
        let ds = Dataset::new()
            .with_variable(var("tas"))
            .with_variable(var("pr"))
            .with_frequency("week");
        assert_eq!(ds.get("tas").unwrap().name(), "tas");
        assert_eq!(ds.frequency(), Some("week"));
        assert_eq!(ds.names().collect::<Vec<_>>(), vec!["pr", "tas"]);

        match ds.get("tasmin").unwrap_err() {
            ArrayError::VariableNotFound { name, available } => {
                assert_eq!(name, "tasmin");
                assert_eq!(available, vec!["pr", "tas"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn insert_replaces() {
        let mut ds = Dataset::new().with_variable(var("tas"));
        ds.insert(var("tas").with_attr("source", "station"));
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get("tas").unwrap().attr("source"), Some("station"));
    }
}
