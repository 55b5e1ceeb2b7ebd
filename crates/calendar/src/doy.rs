//! Day-of-year newtype for the proleptic Gregorian calendar.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Number of day-of-year slots needed to cover leap years.
pub const DAYS_IN_LEAP_YEAR: usize = 366;

/// Number of days in each month of a non-leap year (index 0 unused).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts in a non-leap year (index 0 unused).
const MONTH_START_DOY: [u16; 13] = [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Day-of-year (1..=366), as returned by the ordinal of a Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=DAYS_IN_LEAP_YEAR as u16).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Returns the day-of-year of a date. Dec 31 is 365 in common years and
    /// 366 in leap years.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.ordinal() as u16)
    }

    /// Creates a new `Doy` from a (month, day) pair of a non-leap year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    /// Returns [`CalendarError::InvalidDay`] if `day` is not valid for the given month.
    pub fn from_month_day(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = DAYS_PER_MONTH[month as usize];
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self(MONTH_START_DOY[month as usize] + day as u16 - 1))
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for array indexing (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}
