//! Monthly reporting periods for tax declarations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Month outside 1..=12.
    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),
}

/// A calendar month of a given year.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    year: i32,
    month: u32,
}

impl ReportingPeriod {
    /// Creates a period, validating the month.
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-based.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based month index, handy for 12-slot arrays.
    #[must_use]
    pub const fn month_index(&self) -> usize {
        (self.month - 1) as usize
    }

    /// A period is concluded once the calendar has moved past its month.
    #[must_use]
    pub fn is_concluded(&self, today: NaiveDate) -> bool {
        *self < Self::containing(today)
    }
}

impl std::fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_invalid_month_rejected(#[case] month: u32) {
        assert_eq!(
            ReportingPeriod::new(2025, month),
            Err(PeriodError::InvalidMonth(month))
        );
    }

    #[rstest]
    #[case(2025, 5, date(2025, 6, 1), true)]
    #[case(2025, 6, date(2025, 6, 30), false)]
    #[case(2025, 7, date(2025, 6, 15), false)]
    #[case(2024, 12, date(2025, 1, 1), true)]
    #[case(2026, 1, date(2025, 12, 31), false)]
    fn test_is_concluded(
        #[case] year: i32,
        #[case] month: u32,
        #[case] today: NaiveDate,
        #[case] expected: bool,
    ) {
        let period = ReportingPeriod::new(year, month).unwrap();
        assert_eq!(period.is_concluded(today), expected);
    }

    #[test]
    fn test_display_and_index() {
        let period = ReportingPeriod::new(2025, 3).unwrap();
        assert_eq!(period.to_string(), "2025-03");
        assert_eq!(period.month_index(), 2);
    }
}
