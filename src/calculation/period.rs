//! Accounting period detection.
//!
//! A pay period closes on the profile's month-end day (inclusive) and opens
//! the day after the previous month's month-end day. Overtime tiering is
//! applied within a period, never across two.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::MAX_MONTH_END_DAY;

/// One accounting period, both bounds inclusive.
///
/// # Example
///
/// ```
/// use shift_payroll::calculation::AccountingPeriod;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
/// let period = AccountingPeriod::containing(date, 15).unwrap();
///
/// assert_eq!(period.start, NaiveDate::from_ymd_opt(2026, 1, 16).unwrap());
/// assert_eq!(period.end, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
/// assert!(period.contains_date(date));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// The first day of the period.
    pub start: NaiveDate,
    /// The closing day of the period (the month-end day).
    pub end: NaiveDate,
}

impl AccountingPeriod {
    /// Finds the period containing `date` for the given month-end day.
    ///
    /// Returns `None` if `month_end_day` is outside `1..=28` or the period
    /// would fall outside the representable calendar.
    pub fn containing(date: NaiveDate, month_end_day: u8) -> Option<Self> {
        if !(1..=MAX_MONTH_END_DAY).contains(&month_end_day) {
            return None;
        }
        let close_day = u32::from(month_end_day);

        let close_this_month = date.with_day(close_day)?;
        let end = if date.day() <= close_day {
            close_this_month
        } else {
            close_this_month.checked_add_months(Months::new(1))?
        };
        let start = end.checked_sub_months(Months::new(1))?.succ_opt()?;

        Some(Self { start, end })
    }

    /// Checks if a given date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for AccountingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
