//! Shift model and its persisted record.
//!
//! This module defines the [`Shift`] struct, a worked interval that may
//! embed one unpaid break, and [`ShiftRecord`], the field-by-field form a
//! shift takes when it crosses the persistence boundary.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::comparand::Comparand;
use super::interval::{TimeInterval, format_duration, parse_duration, resolve_interval};

/// Represents a work shift with an optional embedded break.
///
/// A break ("time off") is a plain [`TimeInterval`] owned by the shift;
/// breaks never carry breaks of their own. A default break is the
/// zero-length interval produced by [`TimeInterval::empty_at`].
///
/// Shifts are equal, hashed and ordered by their start and end only. The
/// break does not take part in identity.
///
/// # Examples
///
/// ```
/// use shift_payroll::models::{Shift, TimeInterval};
/// use chrono::{NaiveDate, TimeDelta};
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let mut shift = Shift::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(17, 30, 0).unwrap(),
/// );
/// shift.attach_break(TimeInterval::starting_at(
///     day.and_hms_opt(12, 0, 0).unwrap(),
///     TimeDelta::minutes(30),
/// ));
///
/// assert_eq!(shift.payable_hours(), Decimal::new(80, 1)); // 8.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "ShiftRecord", try_from = "ShiftRecord")]
pub struct Shift {
    interval: TimeInterval,
    time_off: Option<TimeInterval>,
}

impl Shift {
    /// Creates a shift from explicit start and end timestamps.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::from_interval(TimeInterval::new(start, end))
    }

    /// Creates a shift that begins at `start` and lasts `duration`.
    pub fn starting_at(start: NaiveDateTime, duration: TimeDelta) -> Self {
        Self::from_interval(TimeInterval::starting_at(start, duration))
    }

    /// Creates a shift that lasts `duration` and finishes at `end`.
    pub fn ending_at(duration: TimeDelta, end: NaiveDateTime) -> Self {
        Self::from_interval(TimeInterval::ending_at(duration, end))
    }

    /// Creates a shift covering `interval`, without a break.
    pub fn from_interval(interval: TimeInterval) -> Self {
        Self {
            interval,
            time_off: None,
        }
    }

    /// Returns this shift with `time_off` attached as its break.
    pub fn with_break(mut self, time_off: TimeInterval) -> Self {
        self.attach_break(time_off);
        self
    }

    /// Replaces the owned break.
    ///
    /// The break is not checked against the shift's bounds.
    pub fn attach_break(&mut self, time_off: TimeInterval) {
        self.time_off = Some(time_off);
    }

    /// Removes the owned break, returning it if there was one.
    pub fn clear_break(&mut self) -> Option<TimeInterval> {
        self.time_off.take()
    }

    /// The worked interval.
    pub fn interval(&self) -> &TimeInterval {
        &self.interval
    }

    /// The embedded break, if any.
    pub fn time_off(&self) -> Option<&TimeInterval> {
        self.time_off.as_ref()
    }

    /// The start of the shift.
    pub fn start(&self) -> NaiveDateTime {
        self.interval.start()
    }

    /// The end of the shift.
    pub fn end(&self) -> NaiveDateTime {
        self.interval.end()
    }

    /// Gross duration, break included.
    pub fn duration(&self) -> TimeDelta {
        self.interval.duration()
    }

    /// Gross duration in fractional hours.
    pub fn hours(&self) -> Decimal {
        self.interval.hours()
    }

    /// Gross duration in fractional minutes.
    pub fn minutes(&self) -> Decimal {
        self.interval.minutes()
    }

    /// Hours of the embedded break, zero when there is none.
    pub fn break_hours(&self) -> Decimal {
        self.time_off
            .as_ref()
            .map(TimeInterval::hours)
            .unwrap_or(Decimal::ZERO)
    }

    /// Calculates the payable hours for the shift.
    ///
    /// Payable hours are the gross hours less the break, never negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_payroll::models::{Shift, TimeInterval};
    /// use chrono::{NaiveDate, TimeDelta};
    /// use rust_decimal::Decimal;
    ///
    /// let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
    /// let shift = Shift::starting_at(start, TimeDelta::hours(1))
    ///     .with_break(TimeInterval::starting_at(start, TimeDelta::hours(2)));
    ///
    /// assert_eq!(shift.payable_hours(), Decimal::ZERO);
    /// ```
    pub fn payable_hours(&self) -> Decimal {
        (self.hours() - self.break_hours()).max(Decimal::ZERO)
    }

    /// Compares against a value of unknown type.
    ///
    /// Shifts and bare intervals are accepted. An absent value yields
    /// [`EngineError::NullArgument`]; any other type yields
    /// [`EngineError::TypeMismatch`].
    pub fn try_compare(&self, other: Option<&dyn Comparand>) -> EngineResult<Ordering> {
        let other = resolve_interval(other, "Shift")?;
        Ok(self.interval.cmp(&other))
    }
}

impl PartialEq for Shift {
    fn eq(&self, other: &Self) -> bool {
        self.interval == other.interval
    }
}

impl Eq for Shift {}

impl PartialOrd for Shift {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Shift {
    fn cmp(&self, other: &Self) -> Ordering {
        self.interval.cmp(&other.interval)
    }
}

impl Hash for Shift {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.interval.hash(state);
    }
}

impl From<TimeInterval> for Shift {
    fn from(interval: TimeInterval) -> Self {
        Self::from_interval(interval)
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.interval)?;
        if let Some(time_off) = &self.time_off {
            write!(f, ", break {}", time_off)?;
        }
        Ok(())
    }
}

/// The persisted form of a [`Shift`].
///
/// `duration`, `hours` and `minutes` are derived values written for
/// readers of the record. On restore `duration` must agree with
/// `end - start`; `hours` and `minutes` are not read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// The start of the shift.
    pub start: NaiveDateTime,
    /// The end of the shift.
    pub end: NaiveDateTime,
    /// `end - start` in `[-][d.]hh:mm:ss[.fffffff]` form.
    pub duration: String,
    /// Gross hours.
    #[serde(default)]
    pub hours: Decimal,
    /// Gross minutes.
    #[serde(default)]
    pub minutes: Decimal,
    /// The embedded break, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_off: Option<TimeInterval>,
}

impl From<Shift> for ShiftRecord {
    fn from(shift: Shift) -> Self {
        Self {
            start: shift.start(),
            end: shift.end(),
            duration: format_duration(shift.duration()),
            hours: shift.hours(),
            minutes: shift.minutes(),
            time_off: shift.time_off,
        }
    }
}

impl TryFrom<ShiftRecord> for Shift {
    type Error = EngineError;

    fn try_from(record: ShiftRecord) -> EngineResult<Self> {
        let recorded = parse_duration(&record.duration)?;
        let actual = record.end - record.start;
        if recorded != actual {
            return Err(EngineError::validation(
                "duration",
                format!(
                    "recorded duration {} does not match end - start ({})",
                    record.duration,
                    format_duration(actual)
                ),
            ));
        }

        Ok(Self {
            interval: TimeInterval::new(record.start, record.end),
            time_off: record.time_off,
        })
    }
}
