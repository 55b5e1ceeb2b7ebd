//! # xcalc-indices
//!
//! Climate indicator functions over daily [`xcalc_array::DataArray`]s.
//!
//! Every indicator is an [`IndicatorFunction`] `static`: a name, the dataset
//! variables it reads, the keyword parameters it accepts, and a body taking
//! a [`Dataset`](xcalc_array::Dataset) and [`Args`]. Callers that hold a
//! `&'static IndicatorFunction` can check `accepts()` before calling, so no
//! unsupported keyword ever reaches a body.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Dataset"] --> C["IndicatorFunction::call()"]
//!     B["Args (thresh, window, freq, *_per)"] --> C
//!     C -->|"resample by Frequency"| D["DataArray (period × cell)"]
//! ```
//!
//! ## Conventions
//!
//! - Thresholds are quantity strings (`"25 degC"`, `"1 mm/day"`) converted
//!   to the units of the data before comparison.
//! - `freq` defaults to `YS`.
//! - Percentile thresholds (`tas_per`, `pr_per`, ...) are day-of-year arrays;
//!   days they do not cover never count as exceedances.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `temperature` | Means, extremes, threshold counts, spells, degree days |
//! | `precipitation` | Totals, wet/dry day counts, n-day maxima, spells |
//! | `exceedance` | Indicators against day-of-year percentile thresholds |
//! | `wind` | Surface wind statistics |
//! | `args` | Typed access to keyword arguments |
//! | `value` | Dynamically typed parameter values |
//! | `error` | Error types |

mod args;
mod error;
mod function;
mod reduce;
mod value;

pub mod exceedance;
pub mod precipitation;
pub mod temperature;
pub mod wind;

pub use args::{Args, DEFAULT_FREQ};
pub use error::IndexError;
pub use function::{IndicatorFn, IndicatorFunction};
pub use value::Value;
