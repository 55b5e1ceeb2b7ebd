//! Resampling frequencies and period grouping.

use std::ops::Range;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::CalendarError;

/// Resampling frequency of an indicator result.
///
/// Accepts both pandas-style offsets (`D`, `7D`, `MS`, `QS-DEC`, `YS`) and the
/// short output-frequency names (`day`, `week`, `mon`, `sem`, `year`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Blocks of `n` days anchored at the first time step.
    Days(u32),
    /// Calendar months.
    MonthStart,
    /// Meteorological seasons (DJF, MAM, JJA, SON), labelled by their first month.
    SeasonStart,
    /// Calendar years.
    YearStart,
}

impl Frequency {
    /// Parses a frequency token.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnknownFrequency`] for unrecognised tokens.
    pub fn parse(token: &str) -> Result<Self, CalendarError> {
        let t = token.trim();
        let freq = match t {
            "day" | "D" => Self::Days(1),
            "week" => Self::Days(7),
            "mon" | "MS" | "M" => Self::MonthStart,
            "sem" | "QS-DEC" | "Q-FEB" => Self::SeasonStart,
            "year" | "YS" | "AS" | "A" | "Y" => Self::YearStart,
            _ => {
                let n = t
                    .strip_suffix('D')
                    .and_then(|n| n.parse::<u32>().ok())
                    .filter(|&n| n > 0)
                    .ok_or_else(|| CalendarError::UnknownFrequency {
                        token: token.to_string(),
                    })?;
                Self::Days(n)
            }
        };
        Ok(freq)
    }

    /// Returns the pandas-style token for this frequency.
    pub fn token(self) -> String {
        match self {
            Self::Days(n) if n == 1 => "D".to_string(),
            Self::Days(n) => format!("{n}D"),
            Self::MonthStart => "MS".to_string(),
            Self::SeasonStart => "QS-DEC".to_string(),
            Self::YearStart => "YS".to_string(),
        }
    }

    /// Returns the label (start date) of the period containing `date`.
    ///
    /// `origin` anchors day-block frequencies; calendar frequencies ignore it.
    pub fn period_label(self, date: NaiveDate, origin: NaiveDate) -> NaiveDate {
        match self {
            Self::Days(n) => {
                let offset = (date - origin).num_days().div_euclid(n as i64);
                origin + Duration::days(offset * n as i64)
            }
            Self::MonthStart => date.with_day(1).unwrap_or(date),
            Self::SeasonStart => {
                let (year, month) = match date.month() {
                    12 => (date.year(), 12),
                    1 | 2 => (date.year() - 1, 12),
                    m => (date.year(), (m / 3) * 3),
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
            }
            Self::YearStart => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// Groups a sorted date axis into consecutive periods.
    pub fn periods(self, dates: &[NaiveDate]) -> Vec<Period> {
        let Some(&origin) = dates.first() else {
            return Vec::new();
        };
        let mut periods: Vec<Period> = Vec::new();
        for (i, &date) in dates.iter().enumerate() {
            let label = self.period_label(date, origin);
            match periods.last_mut() {
                Some(current) if current.label == label => current.range.end = i + 1,
                _ => periods.push(Period {
                    label,
                    range: i..i + 1,
                }),
            }
        }
        periods
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token())
    }
}

/// One resampling period: its label and the time-step range it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    /// First date of the period.
    pub label: NaiveDate,
    /// Indices of the time steps inside the period.
    pub range: Range<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::daily_sequence;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_tokens() {
        assert_eq!(Frequency::parse("7D").unwrap(), Frequency::Days(7));
        assert_eq!(Frequency::parse("week").unwrap(), Frequency::Days(7));
        assert_eq!(Frequency::parse("D").unwrap(), Frequency::Days(1));
        assert_eq!(Frequency::parse("mon").unwrap(), Frequency::MonthStart);
        assert_eq!(Frequency::parse("sem").unwrap(), Frequency::SeasonStart);
        assert_eq!(Frequency::parse("YS").unwrap(), Frequency::YearStart);
    }

    #[test]
    fn parse_unknown() {
        for bad in ["", "0D", "xD", "fortnight"] {
            assert!(
                matches!(
                    Frequency::parse(bad),
                    Err(CalendarError::UnknownFrequency { .. })
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn token_roundtrip() {
        for f in [
            Frequency::Days(1),
            Frequency::Days(7),
            Frequency::MonthStart,
            Frequency::SeasonStart,
            Frequency::YearStart,
        ] {
            assert_eq!(Frequency::parse(&f.token()).unwrap(), f);
        }
    }

    #[test]
    fn seven_day_blocks() {
        let dates = daily_sequence(ymd(2000, 1, 1), 15);
        let periods = Frequency::Days(7).periods(&dates);
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].range, 0..7);
        assert_eq!(periods[1].label, ymd(2000, 1, 8));
        assert_eq!(periods[2].range, 14..15);
    }

    #[test]
    fn seasons_span_new_year() {
        assert_eq!(
            Frequency::SeasonStart.period_label(ymd(2001, 1, 15), ymd(2000, 1, 1)),
            ymd(2000, 12, 1)
        );
        assert_eq!(
            Frequency::SeasonStart.period_label(ymd(2001, 5, 31), ymd(2000, 1, 1)),
            ymd(2001, 3, 1)
        );
        assert_eq!(
            Frequency::SeasonStart.period_label(ymd(2001, 11, 30), ymd(2000, 1, 1)),
            ymd(2001, 9, 1)
        );
    }

    #[test]
    fn yearly_periods() {
        let dates = daily_sequence(ymd(2000, 1, 1), 366 + 365);
        let periods = Frequency::YearStart.periods(&dates);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].range.len(), 366);
        assert_eq!(periods[1].label, ymd(2001, 1, 1));
    }

    #[test]
    fn empty_axis() {
        assert!(Frequency::MonthStart.periods(&[]).is_empty());
    }
}
