//! Thread-safe ledger handle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::calculation::SalaryBreakdown;
use crate::error::EngineResult;
use crate::models::{Money, Shift, WageProfile};

use super::ShiftLedger;

/// A cloneable handle to a ledger shared between threads.
///
/// Queries return owned snapshots so no lock is held while callers iterate.
///
/// # Example
///
/// ```
/// use shift_payroll::ledger::{SharedLedger, ShiftLedger};
/// use shift_payroll::models::{Shift, WageProfile};
/// use chrono::{NaiveDate, TimeDelta};
/// use rust_decimal::Decimal;
///
/// let profile = WageProfile::with_wage(Decimal::from(20), 15).unwrap();
/// let shared = SharedLedger::new(ShiftLedger::new(profile));
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// let writer = shared.clone();
/// std::thread::spawn(move || {
///     writer.add_shift(Shift::starting_at(day.and_hms_opt(9, 0, 0).unwrap(), TimeDelta::hours(4)));
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(shared.shifts_on_date(day).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<ShiftLedger>>,
}

impl SharedLedger {
    /// Wraps `ledger` for shared use.
    pub fn new(ledger: ShiftLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Records a shift.
    pub fn add_shift(&self, shift: Shift) {
        self.write().add_shift(shift);
    }

    /// Removes the first shift equal to `shift`.
    pub fn remove_shift(&self, shift: &Shift) -> EngineResult<Shift> {
        self.write().remove_shift(shift)
    }

    /// Replaces `old` with `new` under a single write lock.
    pub fn edit_shift(&self, old: &Shift, new: Shift) -> EngineResult<()> {
        self.write().edit_shift(old, new)
    }

    /// Number of recorded shifts.
    pub fn count(&self) -> usize {
        self.read().count()
    }

    /// Snapshot of the shifts within the whole days `start..=end`.
    pub fn shifts_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Shift> {
        self.read().shifts_between(start, end).cloned().collect()
    }

    /// Snapshot of the shifts within `date`.
    pub fn shifts_on_date(&self, date: NaiveDate) -> Vec<Shift> {
        self.shifts_between(date, date)
    }

    /// Salary for the days `start..=end`.
    pub fn salary_between(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Money> {
        self.read().salary_between(start, end)
    }

    /// Salary for `date`.
    pub fn salary_on_date(&self, date: NaiveDate) -> EngineResult<Money> {
        self.read().salary_on_date(date)
    }

    /// Salary with per-period detail for the days `start..=end`.
    pub fn salary_breakdown_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<SalaryBreakdown> {
        self.read().salary_breakdown_between(start, end)
    }

    /// Copy of the current wage profile.
    pub fn profile(&self) -> WageProfile {
        self.read().profile().clone()
    }

    /// Replaces the wage profile.
    pub fn set_profile(&self, profile: WageProfile) {
        self.write().set_profile(profile);
    }

    /// Copy of the whole ledger.
    pub fn snapshot(&self) -> ShiftLedger {
        self.read().clone()
    }

    // A panic while holding the lock cannot leave the ledger half-updated:
    // every mutation is a single Vec insert or remove.
    fn read(&self) -> RwLockReadGuard<'_, ShiftLedger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ShiftLedger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<ShiftLedger> for SharedLedger {
    fn from(ledger: ShiftLedger) -> Self {
        Self::new(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeDelta};
    use rust_decimal::Decimal;
    use std::thread;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn shared() -> SharedLedger {
        SharedLedger::new(ShiftLedger::new(
            WageProfile::with_wage(Decimal::from(10), 15).unwrap(),
        ))
    }

    #[test]
    fn test_shared_ledger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<SharedLedger>();
    }

    #[test]
    fn test_concurrent_adds() {
        let ledger = shared();
        let handles: Vec<_> = (1..=8)
            .map(|day| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    let start = make_datetime(&format!("2026-01-{:02}", day), "09:00:00");
                    ledger.add_shift(Shift::starting_at(start, TimeDelta::hours(8)));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.count(), 8);
        let snapshot = ledger.snapshot();
        let mut previous = None;
        for shift in snapshot.iter() {
            if let Some(prev) = previous {
                assert!(prev <= shift);
            }
            previous = Some(shift);
        }
        assert_eq!(
            ledger
                .salary_between(
                    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
                )
                .unwrap(),
            Money::from(640)
        );
    }

    #[test]
    fn test_snapshot_is_detached() {
        let ledger = shared();
        let shift = Shift::starting_at(make_datetime("2026-01-05", "09:00:00"), TimeDelta::hours(8));
        ledger.add_shift(shift.clone());

        let snapshot = ledger.shifts_on_date(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        ledger.remove_shift(&shift).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(ledger.count(), 0);
    }

    #[test]
    fn test_profile_round_trip() {
        let ledger = shared();
        let profile = WageProfile::with_wage(Decimal::from(30), 20).unwrap();
        ledger.set_profile(profile.clone());
        assert_eq!(ledger.profile().hour_wage(), Decimal::from(30));
        assert_eq!(ledger.profile().month_end_day(), 20);
    }
}
