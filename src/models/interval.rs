//! Time interval model.
//!
//! This module defines [`TimeInterval`], the immutable start/end pair that
//! shifts and breaks are built from, together with the textual duration
//! format used by persisted shift records.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Shift;
use super::comparand::Comparand;

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;

/// An immutable span between two timestamps.
///
/// `end >= start` is not enforced: a reversed interval has a negative
/// duration. Intervals are totally ordered by `start`, then by `end`, and
/// two intervals are equal exactly when both timestamps are equal.
///
/// # Examples
///
/// ```
/// use shift_payroll::models::TimeInterval;
/// use chrono::{NaiveDate, TimeDelta};
///
/// let start = NaiveDate::from_ymd_opt(2015, 8, 8).unwrap().and_hms_opt(9, 10, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2015, 8, 8).unwrap().and_hms_opt(19, 22, 0).unwrap();
///
/// let by_end = TimeInterval::new(start, end);
/// let by_duration = TimeInterval::starting_at(start, TimeDelta::minutes(10 * 60 + 12));
///
/// assert_eq!(by_end, by_duration);
/// assert_eq!(by_end.duration(), TimeDelta::minutes(612));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeInterval {
    /// Creates an interval from explicit start and end timestamps.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Creates an interval that begins at `start` and lasts `duration`.
    pub fn starting_at(start: NaiveDateTime, duration: TimeDelta) -> Self {
        Self::new(start, start + duration)
    }

    /// Creates an interval that lasts `duration` and finishes at `end`.
    pub fn ending_at(duration: TimeDelta, end: NaiveDateTime) -> Self {
        Self::new(end - duration, end)
    }

    /// Creates a zero-length interval at `at`.
    pub fn empty_at(at: NaiveDateTime) -> Self {
        Self::new(at, at)
    }

    /// The beginning of the interval.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The end of the interval.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// `end - start`, negative for a reversed interval.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// The duration in fractional hours, at millisecond resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_payroll::models::TimeInterval;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let day = NaiveDate::from_ymd_opt(2015, 8, 8).unwrap();
    /// let interval = TimeInterval::new(
    ///     day.and_hms_opt(9, 0, 0).unwrap(),
    ///     day.and_hms_opt(19, 22, 0).unwrap(),
    /// );
    /// assert_eq!(interval.hours().round_dp(4), Decimal::from_str("10.3667").unwrap());
    /// ```
    pub fn hours(&self) -> Decimal {
        Decimal::from(self.duration().num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR)
    }

    /// The duration in fractional minutes, at millisecond resolution.
    pub fn minutes(&self) -> Decimal {
        Decimal::from(self.duration().num_milliseconds()) / Decimal::from(MILLIS_PER_MINUTE)
    }

    /// Returns true if this interval lies entirely within `[from, to]`.
    pub fn is_within(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.start >= from && self.end <= to
    }

    /// Compares against a value of unknown type.
    ///
    /// Intervals and shifts are accepted (a shift compares by its interval).
    /// An absent value yields [`EngineError::NullArgument`]; any other type
    /// yields [`EngineError::TypeMismatch`].
    pub fn try_compare(&self, other: Option<&dyn Comparand>) -> EngineResult<Ordering> {
        let other = resolve_interval(other, "TimeInterval")?;
        Ok(self.cmp(&other))
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({})",
            self.start,
            self.end,
            format_duration(self.duration())
        )
    }
}

/// Resolves an interval or shift behind a dynamic comparand.
pub(crate) fn resolve_interval(
    other: Option<&dyn Comparand>,
    expected: &str,
) -> EngineResult<TimeInterval> {
    let other = other.ok_or_else(|| EngineError::NullArgument {
        what: expected.to_string(),
    })?;

    let any = other.as_any();
    if let Some(interval) = any.downcast_ref::<TimeInterval>() {
        return Ok(*interval);
    }
    if let Some(shift) = any.downcast_ref::<Shift>() {
        return Ok(*shift.interval());
    }

    Err(EngineError::TypeMismatch {
        expected: expected.to_string(),
        found: other.type_name().to_string(),
    })
}

/// Formats a duration as `[-][d.]hh:mm:ss[.fffffff]`.
///
/// The fractional part is written in 100ns ticks and only when non-zero.
///
/// # Examples
///
/// ```
/// use shift_payroll::models::format_duration;
/// use chrono::TimeDelta;
///
/// assert_eq!(format_duration(TimeDelta::minutes(622)), "10:22:00");
/// assert_eq!(format_duration(TimeDelta::hours(26)), "1.02:00:00");
/// assert_eq!(format_duration(-TimeDelta::minutes(90)), "-01:30:00");
/// assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "00:00:01.5000000");
/// ```
pub fn format_duration(duration: TimeDelta) -> String {
    let negative = duration < TimeDelta::zero();
    let magnitude = if negative { -duration } else { duration };

    let days = magnitude.num_days();
    let hours = magnitude.num_hours() % 24;
    let minutes = magnitude.num_minutes() % 60;
    let seconds = magnitude.num_seconds() % 60;
    let ticks = magnitude.subsec_nanos() / 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        out.push_str(&format!(".{:07}", ticks));
    }
    out
}

/// Parses a duration written by [`format_duration`].
///
/// # Examples
///
/// ```
/// use shift_payroll::models::parse_duration;
/// use chrono::TimeDelta;
///
/// assert_eq!(parse_duration("10:22:00").unwrap(), TimeDelta::minutes(622));
/// assert_eq!(parse_duration("-1.00:30:00").unwrap(), -TimeDelta::minutes(24 * 60 + 30));
/// assert!(parse_duration("ten hours").is_err());
/// ```
pub fn parse_duration(text: &str) -> EngineResult<TimeDelta> {
    let invalid = || EngineError::validation("duration", format!("malformed duration '{}'", text));

    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let parts: Vec<&str> = body.split(':').collect();
    let [head, minutes, seconds] = parts.as_slice() else {
        return Err(invalid());
    };

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (parse_component(days, i64::MAX).map_err(|_| invalid())?, hours),
        None => (0, *head),
    };
    let hours = parse_component(hours, 23).map_err(|_| invalid())?;
    let minutes = parse_component(minutes, 59).map_err(|_| invalid())?;

    let (whole_seconds, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (*seconds, None),
    };
    let whole_seconds = parse_component(whole_seconds, 59).map_err(|_| invalid())?;

    let nanos = match fraction {
        Some(digits) if !digits.is_empty() && digits.len() <= 9 => {
            let padded = format!("{:0<9}", digits);
            parse_component(&padded, 999_999_999).map_err(|_| invalid())?
        }
        Some(_) => return Err(invalid()),
        None => 0,
    };

    let days = TimeDelta::try_days(days).ok_or_else(invalid)?;
    let magnitude = days
        + TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(whole_seconds)
        + TimeDelta::nanoseconds(nanos);

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_component(text: &str, max: i64) -> EngineResult<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EngineError::validation(
            "duration",
            format!("expected digits, got '{}'", text),
        ));
    }
    let value: i64 = text
        .parse()
        .map_err(|_| EngineError::validation("duration", format!("'{}' is out of range", text)))?;
    if value > max {
        return Err(EngineError::validation(
            "duration",
            format!("component {} exceeds {}", value, max),
        ));
    }
    Ok(value)
}
