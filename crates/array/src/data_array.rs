//! Labeled two-dimensional arrays.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use ndarray::{Array2, ArrayView1, Axis, s};
use xcalc_calendar::Doy;

use crate::chunks::Chunks;
use crate::error::ArrayError;
use crate::units::convert;

/// Coordinate of the leading axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Coord {
    /// Daily (or coarser) time stamps, sorted ascending.
    Time(Vec<NaiveDate>),
    /// Day-of-year labels, as produced by per-day-of-year reductions.
    DayOfYear(Vec<Doy>),
}

impl Coord {
    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        match self {
            Coord::Time(d) => d.len(),
            Coord::DayOfYear(d) => d.len(),
        }
    }

    /// Returns `true` if the coordinate has no labels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dimension name of the axis.
    pub fn dim(&self) -> &'static str {
        match self {
            Coord::Time(_) => "time",
            Coord::DayOfYear(_) => "dayofyear",
        }
    }
}

/// A `(leading axis × cell)` array of `f64` with units and attributes.
///
/// Cells are independent spatial points; a single station series has one
/// cell. Missing values are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    name: String,
    coord: Coord,
    values: Array2<f64>,
    units: String,
    attrs: BTreeMap<String, String>,
    chunks: Chunks,
}

impl DataArray {
    /// Creates a new array. The whole leading axis forms one chunk.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::ShapeMismatch`] if the coordinate length differs
    /// from the number of rows in `values`.
    pub fn new(
        name: impl Into<String>,
        coord: Coord,
        values: Array2<f64>,
        units: impl Into<String>,
    ) -> Result<Self, ArrayError> {
        if coord.len() != values.nrows() {
            return Err(ArrayError::ShapeMismatch {
                expected: coord.len(),
                got: values.nrows(),
            });
        }
        let chunks = Chunks::single(values.nrows());
        Ok(Self {
            name: name.into(),
            coord,
            values,
            units: units.into(),
            attrs: BTreeMap::new(),
            chunks,
        })
    }

    /// Creates a single-cell time series.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::ShapeMismatch`] if `dates` and `values` differ in length.
    pub fn from_series(
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        units: impl Into<String>,
    ) -> Result<Self, ArrayError> {
        if dates.len() != values.len() {
            return Err(ArrayError::ShapeMismatch {
                expected: dates.len(),
                got: values.len(),
            });
        }
        let n = values.len();
        let values = Array2::from_shape_vec((n, 1), values).map_err(|_| {
            ArrayError::ShapeMismatch {
                expected: n,
                got: 0,
            }
        })?;
        Self::new(name, Coord::Time(dates), values, units)
    }

    /// Returns the variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the leading-axis coordinate.
    pub fn coord(&self) -> &Coord {
        &self.coord
    }

    /// Returns the time stamps, if the leading axis is time.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        match &self.coord {
            Coord::Time(d) => Some(d),
            Coord::DayOfYear(_) => None,
        }
    }

    /// Returns the day-of-year labels, if the leading axis is day-of-year.
    pub fn doys(&self) -> Option<&[Doy]> {
        match &self.coord {
            Coord::DayOfYear(d) => Some(d),
            Coord::Time(_) => None,
        }
    }

    /// Returns the values.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Returns the unit string.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Returns the attributes.
    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    /// Returns one attribute.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Returns the chunk layout of the leading axis.
    pub fn chunks(&self) -> &Chunks {
        &self.chunks
    }

    /// Number of steps along the leading axis.
    pub fn n_steps(&self) -> usize {
        self.values.nrows()
    }

    /// Number of cells.
    pub fn n_cells(&self) -> usize {
        self.values.ncols()
    }

    /// Returns the series of one cell.
    pub fn column(&self, cell: usize) -> ArrayView1<'_, f64> {
        self.values.column(cell)
    }

    /// Returns a copy with a new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns a copy with one attribute set.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Returns a copy with an explicit chunk layout.
    ///
    /// Layouts that do not cover the leading axis exactly are replaced by a
    /// single chunk.
    pub fn with_chunks(mut self, chunks: Chunks) -> Self {
        self.chunks = if chunks.total() == self.n_steps() {
            chunks
        } else {
            Chunks::single(self.n_steps())
        };
        self
    }

    /// Selects the time steps between `start` and `end`, both inclusive.
    ///
    /// The result may be empty; callers decide whether that is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::CoordinateMismatch`] if the leading axis is not time.
    pub fn sel_time(&self, start: NaiveDate, end: NaiveDate) -> Result<Self, ArrayError> {
        let dates = self.dates().ok_or_else(|| ArrayError::CoordinateMismatch {
            reason: format!("'{}' has no time axis", self.name),
        })?;
        let lo = dates.partition_point(|d| *d < start);
        let hi = dates.partition_point(|d| *d <= end).max(lo);
        Ok(Self {
            name: self.name.clone(),
            coord: Coord::Time(dates[lo..hi].to_vec()),
            values: self.values.slice(s![lo..hi, ..]).to_owned(),
            units: self.units.clone(),
            attrs: self.attrs.clone(),
            chunks: self.chunks.slice(lo..hi),
        })
    }

    /// Returns a copy with its values expressed in `units`.
    ///
    /// # Errors
    ///
    /// Propagates the unit errors of [`convert`].
    pub fn convert_units(&self, units: &str) -> Result<Self, ArrayError> {
        if self.units == units {
            return Ok(self.clone());
        }
        // Validates the pair once so the per-element map cannot fail.
        convert(0.0, &self.units, units)?;
        let from = self.units.as_str();
        let values = self
            .values
            .mapv(|v| convert(v, from, units).unwrap_or(f64::NAN));
        Ok(Self {
            values,
            units: units.to_string(),
            ..self.clone()
        })
    }

    /// Keeps values strictly greater than `threshold`; everything else
    /// becomes `NaN`.
    pub fn mask_not_above(&self, threshold: f64) -> Self {
        let values = self
            .values
            .mapv(|v| if v > threshold { v } else { f64::NAN });
        Self {
            values,
            ..self.clone()
        }
    }

    /// Gathers the given rows into a new array labelled by day-of-year.
    ///
    /// The chunk layout follows the current splitting policy.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::ShapeMismatch`] if `values` and `doys` disagree.
    pub fn from_doy_rows(
        name: impl Into<String>,
        doys: Vec<Doy>,
        values: Array2<f64>,
        units: impl Into<String>,
    ) -> Result<Self, ArrayError> {
        let n = doys.len();
        Ok(Self::new(name, Coord::DayOfYear(doys), values, units)?.with_chunks(Chunks::for_gather(n)))
    }

    /// Returns the value of `cell` at day-of-year `doy`, if present.
    pub fn doy_value(&self, doy: Doy, cell: usize) -> Option<f64> {
        let doys = self.doys()?;
        let row = doys.binary_search(&doy).ok()?;
        self.values.get((row, cell)).copied()
    }

    /// Sums over the leading axis per cell, ignoring `NaN`.
    pub fn nan_sum_axis(&self) -> Vec<f64> {
        self.values
            .axis_iter(Axis(1))
            .map(|col| col.iter().filter(|v| v.is_finite()).sum())
            .collect()
    }
}
