//! The per-employee shift ledger.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, warn};

use crate::calculation::{SalaryBreakdown, SalaryCalculator};
use crate::config::CalculatorConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Money, Shift, WageProfile};

/// An ordered collection of shifts owned by one wage profile.
///
/// Shifts are kept sorted by start, then end. Duplicates and overlapping
/// shifts are accepted.
///
/// # Example
///
/// ```
/// use shift_payroll::ledger::ShiftLedger;
/// use shift_payroll::models::{Shift, WageProfile};
/// use chrono::{NaiveDate, TimeDelta};
/// use rust_decimal::Decimal;
///
/// let profile = WageProfile::with_wage(Decimal::from(20), 15).unwrap();
/// let mut ledger = ShiftLedger::new(profile);
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// ledger.add_shift(Shift::starting_at(day.and_hms_opt(9, 0, 0).unwrap(), TimeDelta::hours(8)));
///
/// assert_eq!(ledger.count(), 1);
/// assert_eq!(ledger.shifts_on_date(day).count(), 1);
/// assert_eq!(ledger.salary_on_date(day).unwrap().amount(), Decimal::from(160));
/// ```
#[derive(Debug, Clone)]
pub struct ShiftLedger {
    profile: WageProfile,
    calculator: SalaryCalculator,
    shifts: Vec<Shift>,
}

impl ShiftLedger {
    /// Creates an empty ledger using the default calculator configuration.
    pub fn new(profile: WageProfile) -> Self {
        Self {
            profile,
            calculator: SalaryCalculator::default(),
            shifts: Vec::new(),
        }
    }

    /// Creates an empty ledger with a specific calculator configuration.
    pub fn with_config(profile: WageProfile, config: CalculatorConfig) -> EngineResult<Self> {
        Ok(Self {
            profile,
            calculator: SalaryCalculator::new(config)?,
            shifts: Vec::new(),
        })
    }

    /// The owning wage profile.
    pub fn profile(&self) -> &WageProfile {
        &self.profile
    }

    /// Replaces the wage profile. Recorded shifts are kept.
    pub fn set_profile(&mut self, profile: WageProfile) {
        self.profile = profile;
    }

    /// The calculator configuration in use.
    pub fn config(&self) -> &CalculatorConfig {
        self.calculator.config()
    }

    /// Replaces the calculator configuration after validating it.
    pub fn set_config(&mut self, config: CalculatorConfig) -> EngineResult<()> {
        self.calculator = SalaryCalculator::new(config)?;
        Ok(())
    }

    /// Records a shift, keeping the ledger ordered.
    pub fn add_shift(&mut self, shift: Shift) {
        let index = self.shifts.partition_point(|s| s <= &shift);
        debug!(start = %shift.start(), end = %shift.end(), index, "Adding shift");
        self.shifts.insert(index, shift);
    }

    /// Removes the first shift equal to `shift` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no equal shift is recorded.
    pub fn remove_shift(&mut self, shift: &Shift) -> EngineResult<Shift> {
        let index = self.position(shift).ok_or_else(|| {
            warn!(start = %shift.start(), end = %shift.end(), "Shift to remove not found");
            EngineError::NotFound {
                what: format!("shift {}", shift.interval()),
            }
        })?;
        debug!(start = %shift.start(), end = %shift.end(), index, "Removing shift");
        Ok(self.shifts.remove(index))
    }

    /// Replaces `old` with `new`.
    ///
    /// If `old` is not recorded the ledger is left unchanged.
    pub fn edit_shift(&mut self, old: &Shift, new: Shift) -> EngineResult<()> {
        self.remove_shift(old)?;
        self.add_shift(new);
        Ok(())
    }

    /// Number of recorded shifts.
    pub fn count(&self) -> usize {
        self.shifts.len()
    }

    /// Returns true if no shifts are recorded.
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// All shifts in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shift> {
        self.shifts.iter()
    }

    /// Shifts with `start >= from` and `end <= to`, in order.
    ///
    /// Reversed shifts (end before start) are matched by the same rule, so
    /// one starting after `to` is still returned if it ends inside the range.
    /// The iterator is lazy and can be cloned to restart it.
    pub fn shifts_within(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> impl Iterator<Item = &Shift> + Clone + '_ {
        let first = self.shifts.partition_point(|s| s.start() < from);
        self.shifts[first..]
            .iter()
            .filter(move |s| s.interval().is_within(from, to))
    }

    /// Shifts lying entirely within the whole days `start..=end`.
    ///
    /// `start` counts from midnight and `end` up to and including the
    /// following midnight.
    pub fn shifts_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &Shift> + Clone + '_ {
        let (from, to) = day_bounds(start, end);
        self.shifts_within(from, to)
    }

    /// Shifts lying entirely within `date`.
    pub fn shifts_on_date(&self, date: NaiveDate) -> impl Iterator<Item = &Shift> + Clone + '_ {
        self.shifts_between(date, date)
    }

    /// Salary for the shifts returned by [`shifts_between`](Self::shifts_between).
    pub fn salary_between(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Money> {
        self.calculator
            .calculate(self.shifts_between(start, end), &self.profile)
    }

    /// Salary for the shifts returned by [`shifts_on_date`](Self::shifts_on_date).
    pub fn salary_on_date(&self, date: NaiveDate) -> EngineResult<Money> {
        self.salary_between(date, date)
    }

    /// Salary with per-period detail for the days `start..=end`.
    pub fn salary_breakdown_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<SalaryBreakdown> {
        self.calculator
            .breakdown(self.shifts_between(start, end), &self.profile)
    }

    fn position(&self, shift: &Shift) -> Option<usize> {
        let index = self.shifts.partition_point(|s| s < shift);
        (self.shifts.get(index)? == shift).then_some(index)
    }
}

impl<'a> IntoIterator for &'a ShiftLedger {
    type Item = &'a Shift;
    type IntoIter = std::slice::Iter<'a, Shift>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn day_bounds(start: NaiveDate, end: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let from = start.and_time(NaiveTime::MIN);
    let to = end
        .succ_opt()
        .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));
    (from, to)
}
