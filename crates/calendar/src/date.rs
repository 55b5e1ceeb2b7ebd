//! Month-day bounds and partial date strings.

use chrono::{Datelike, NaiveDate};

use crate::doy::DAYS_PER_MONTH;
use crate::error::CalendarError;

/// A (month, day) pair without year context, written as `"MM-DD"`.
///
/// February 29 is accepted so that bounds can be expressed for leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    /// Creates a new `MonthDay`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] or [`CalendarError::InvalidDay`]
    /// for out-of-range values.
    pub fn new(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = if month == 2 {
            29
        } else {
            DAYS_PER_MONTH[month as usize]
        };
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self { month, day })
    }

    /// Parses an `"MM-DD"` string.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDateString`] if the string is not of
    /// the form `MM-DD`, or a range error from [`MonthDay::new`].
    pub fn parse(s: &str) -> Result<Self, CalendarError> {
        let invalid = |reason: &str| CalendarError::InvalidDateString {
            value: s.to_string(),
            reason: reason.to_string(),
        };
        let (m, d) = s.trim().split_once('-').ok_or_else(|| invalid("expected MM-DD"))?;
        let month = m.parse::<u8>().map_err(|_| invalid("month is not numeric"))?;
        let day = d.parse::<u8>().map_err(|_| invalid("day is not numeric"))?;
        Self::new(month, day)
    }

    /// Returns the month-day of a date.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns `true` if `date` falls within `[start, end]`.
    ///
    /// When `start > end` the window wraps around the new year
    /// (e.g. `11-01` to `02-28`).
    pub fn within(date: NaiveDate, start: Self, end: Self) -> bool {
        let md = Self::of(date);
        if start <= end {
            start <= md && md <= end
        } else {
            md >= start || md <= end
        }
    }
}

impl std::fmt::Display for MonthDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Splits a partial date string (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`) into its
/// numeric components.
fn split_partial(s: &str) -> Result<(i32, Option<u32>, Option<u32>), CalendarError> {
    let invalid = |reason: &str| CalendarError::InvalidDateString {
        value: s.to_string(),
        reason: reason.to_string(),
    };
    let mut parts = s.trim().split('-');
    let year = parts
        .next()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| invalid("missing year"))?
        .parse::<i32>()
        .map_err(|_| invalid("year is not numeric"))?;
    let month = parts
        .next()
        .map(|p| p.parse::<u32>().map_err(|_| invalid("month is not numeric")))
        .transpose()?;
    let day = parts
        .next()
        .map(|p| p.parse::<u32>().map_err(|_| invalid("day is not numeric")))
        .transpose()?;
    if parts.next().is_some() {
        return Err(invalid("too many components"));
    }
    Ok((year, month, day))
}

fn build_date(s: &str, year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| CalendarError::InvalidDateString {
        value: s.to_string(),
        reason: format!("{year:04}-{month:02}-{day:02} is not a valid date"),
    })
}

/// Returns the first day covered by a partial date string.
///
/// `"1961"` → 1961-01-01, `"1961-03"` → 1961-03-01.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDateString`] if the string cannot be parsed.
pub fn period_start(s: &str) -> Result<NaiveDate, CalendarError> {
    let (year, month, day) = split_partial(s)?;
    build_date(s, year, month.unwrap_or(1), day.unwrap_or(1))
}

/// Returns the last day covered by a partial date string.
///
/// `"1990"` → 1990-12-31, `"1992-02"` → 1992-02-29.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDateString`] if the string cannot be parsed.
pub fn period_end(s: &str) -> Result<NaiveDate, CalendarError> {
    match split_partial(s)? {
        (year, None, _) => build_date(s, year, 12, 31),
        (year, Some(month), None) => {
            let first = build_date(s, year, month, 1)?;
            let next = first
                .checked_add_months(chrono::Months::new(1))
                .ok_or_else(|| CalendarError::InvalidDateString {
                    value: s.to_string(),
                    reason: "date out of range".to_string(),
                })?;
            Ok(next.pred_opt().unwrap_or(first))
        }
        (year, Some(month), Some(day)) => build_date(s, year, month, day),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_day_parse() {
        let md = MonthDay::parse("04-01").unwrap();
        assert_eq!((md.month(), md.day()), (4, 1));
        assert_eq!(md.to_string(), "04-01");
        assert!(MonthDay::parse("02-29").is_ok());
        assert!(MonthDay::parse("0401").is_err());
        assert_eq!(
            MonthDay::parse("06-31").unwrap_err(),
            CalendarError::InvalidDay {
                day: 31,
                month: 6,
                max_day: 30,
            }
        );
    }

    #[test]
    fn month_day_within() {
        let start = MonthDay::parse("04-01").unwrap();
        let end = MonthDay::parse("06-30").unwrap();
        assert!(MonthDay::within(ymd(2001, 4, 1), start, end));
        assert!(MonthDay::within(ymd(2001, 6, 30), start, end));
        assert!(!MonthDay::within(ymd(2001, 7, 1), start, end));
        assert!(!MonthDay::within(ymd(2001, 3, 31), start, end));
    }

    #[test]
    fn month_day_within_wraps() {
        let start = MonthDay::parse("11-01").unwrap();
        let end = MonthDay::parse("02-28").unwrap();
        assert!(MonthDay::within(ymd(2001, 12, 25), start, end));
        assert!(MonthDay::within(ymd(2001, 1, 15), start, end));
        assert!(!MonthDay::within(ymd(2001, 6, 1), start, end));
    }

    #[test]
    fn partial_bounds() {
        assert_eq!(period_start("1961").unwrap(), ymd(1961, 1, 1));
        assert_eq!(period_end("1990").unwrap(), ymd(1990, 12, 31));
        assert_eq!(period_start("1961-03").unwrap(), ymd(1961, 3, 1));
        assert_eq!(period_end("1992-02").unwrap(), ymd(1992, 2, 29));
        assert_eq!(period_end("1991-02").unwrap(), ymd(1991, 2, 28));
        assert_eq!(period_end("1990-06-15").unwrap(), ymd(1990, 6, 15));
    }

    #[test]
    fn partial_bounds_invalid() {
        assert!(period_start("").is_err());
        assert!(period_start("19x1").is_err());
        assert!(period_end("1990-13").is_err());
        assert!(period_start("1990-01-01-01").is_err());
    }
}
