//! # xcalc-calendar
//!
//! Date arithmetic shared by the index calculator: day-of-year values,
//! month-day bounds, partial date-string bounds and resampling frequencies.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDate"] -->|"Doy::from_date()"| B["Doy (1..=366)"]
//!     C["\"04-01\""] -->|"MonthDay::parse()"| D["MonthDay"]
//!     E["\"1961\""] -->|"period_start() / period_end()"| A
//!     F["\"7D\" / \"mon\""] -->|"Frequency::parse()"| G["Frequency"]
//!     G -->|".periods(dates)"| H["Vec of Period"]
//!     I["indices of one doy"] -->|"expand_indices()"| J["window indices"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use xcalc_calendar::{Doy, Frequency, MonthDay, daily_sequence, period_end};
//!
//! let doy = Doy::from_month_day(3, 15).unwrap(); // Mar 15 → DOY 74 (non-leap)
//! let bound = MonthDay::parse("04-01").unwrap();
//! let end = period_end("1990").unwrap(); // 1990-12-31
//!
//! let dates = daily_sequence(chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), 7);
//! let periods = Frequency::parse("7D").unwrap().periods(&dates);
//! assert_eq!(periods.len(), 1);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype |
//! | `date` | Month-day bounds and partial date strings |
//! | `sequence` | Daily date sequence generation |
//! | `frequency` | Resampling frequencies and period grouping |
//! | `expand` | Index expansion for day-of-year windows |
//! | `error` | Error types |

mod date;
mod doy;
mod error;
mod expand;
mod frequency;
mod sequence;

pub use date::{MonthDay, period_end, period_start};
pub use doy::{DAYS_IN_LEAP_YEAR, Doy};
pub use error::CalendarError;
pub use expand::{expand_indices, window_offsets};
pub use frequency::{Frequency, Period};
pub use sequence::daily_sequence;
