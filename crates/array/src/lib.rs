//! Labeled arrays and the dataset accessor used by the index calculator.
//!
//! # Overview
//!
//! - [`DataArray`]: a `(time × cell)` or `(dayofyear × cell)` array with
//!   units, attributes and a chunk layout along the leading axis.
//! - [`Dataset`]: named variables plus the resampling-frequency token the
//!   data was prepared for.
//! - [`Quantity`] / [`convert`]: `"<number> <unit>"` parsing and conversion
//!   between the units climate data ships with.
//! - [`ChunkingScope`]: scoped suspension of automatic chunk splitting.
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use xcalc_array::{DataArray, Dataset, Quantity};
//!
//! let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! let tas = DataArray::from_series(
//!     "tas",
//!     xcalc_calendar::daily_sequence(start, 3),
//!     vec![272.15, 263.15, 273.15],
//!     "K",
//! )
//! .unwrap();
//! let ds = Dataset::new().with_variable(tas).with_frequency("week");
//!
//! let thresh = Quantity::parse("0 degC").unwrap();
//! assert_eq!(thresh.to("K").unwrap(), 273.15);
//! ```

mod chunks;
mod data_array;
mod dataset;
mod error;
mod units;

pub use chunks::{ChunkingScope, Chunks, DEFAULT_MAX_CHUNK_LEN, split_large_chunks};
pub use data_array::{Coord, DataArray};
pub use dataset::Dataset;
pub use error::ArrayError;
pub use units::{Quantity, convert, same_dimension};
