//! Salary calculation.
//!
//! Converts a set of shifts and a wage profile into money:
//! 1. Each shift is attributed to the accounting period containing the date
//!    it starts on. Shifts crossing a period boundary are not split.
//! 2. Each shift contributes its payable hours (gross hours less break).
//! 3. Within a period, payable hours are split into bands by the configured
//!    thresholds, either over the period total or over each day's total.
//! 4. Band hours are priced with the profile's wage and overtime rates,
//!    summed across periods and rounded once, midpoints away from zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{CalculatorConfig, OvertimeBasis};
use crate::error::{EngineError, EngineResult};
use crate::models::{Money, Shift, WageProfile};

use super::overtime_tiers::{TierPay, TierSplit, price_tiers, split_hours};
use super::period::AccountingPeriod;

/// Pay attributed to one accounting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodPay {
    /// The accounting period.
    pub period: AccountingPeriod,
    /// Number of shifts attributed to the period.
    pub shift_count: usize,
    /// Payable hours split into bands.
    pub hours: TierSplit,
    /// Unrounded pay per band.
    pub pay: TierPay,
}

impl PeriodPay {
    /// Unrounded pay for the period.
    pub fn total(&self) -> Money {
        self.pay.total()
    }
}

/// The full result of a salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Identifier used to correlate log lines for this calculation.
    pub calculation_id: Uuid,
    /// Per-period pay, oldest period first.
    pub periods: Vec<PeriodPay>,
    /// Sum of all periods, rounded to the configured minor units.
    pub total: Money,
}

impl SalaryBreakdown {
    /// Payable hours across all periods.
    pub fn payable_hours(&self) -> Decimal {
        self.periods.iter().map(|p| p.hours.total_hours()).sum()
    }

    /// Overtime hours (both tiers) across all periods.
    pub fn overtime_hours(&self) -> Decimal {
        self.periods.iter().map(|p| p.hours.overtime_hours()).sum()
    }
}

/// Computes salaries from shifts under a fixed configuration.
///
/// The calculator holds no state besides its configuration; every call is
/// pure and deterministic and leaves its inputs untouched.
///
/// # Example
///
/// ```
/// use shift_payroll::calculation::SalaryCalculator;
/// use shift_payroll::config::CalculatorConfig;
/// use shift_payroll::models::{Money, Shift, WageProfile};
/// use chrono::{NaiveDate, TimeDelta};
/// use rust_decimal::Decimal;
///
/// let config = CalculatorConfig::with_thresholds(Decimal::from(8), Decimal::from(12)).unwrap();
/// let calculator = SalaryCalculator::new(config).unwrap();
/// let profile = WageProfile::with_wage(Decimal::from(10), 15)
///     .unwrap()
///     .with_overtime_rates(Decimal::from(150), Decimal::from(200))
///     .unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let shifts = vec![Shift::starting_at(start, TimeDelta::hours(10))];
///
/// assert_eq!(calculator.calculate(&shifts, &profile).unwrap(), Money::from(110));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SalaryCalculator {
    config: CalculatorConfig,
}

impl SalaryCalculator {
    /// Creates a calculator after validating `config`.
    pub fn new(config: CalculatorConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Calculates the rounded salary for `shifts`.
    ///
    /// An empty collection yields zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if a shift starts on a date whose
    /// accounting period falls outside the representable calendar, and
    /// [`EngineError::Overflow`] if accumulated hours or pay leave the
    /// decimal range. Wage and rate limits on [`WageProfile`] keep the pay
    /// for any single shift far below that range.
    pub fn calculate<'a, I>(&self, shifts: I, profile: &WageProfile) -> EngineResult<Money>
    where
        I: IntoIterator<Item = &'a Shift>,
    {
        Ok(self.breakdown(shifts, profile)?.total)
    }

    /// Calculates the salary for `shifts` with per-period detail.
    ///
    /// Fails under the same conditions as [`calculate`](Self::calculate).
    pub fn breakdown<'a, I>(&self, shifts: I, profile: &WageProfile) -> EngineResult<SalaryBreakdown>
    where
        I: IntoIterator<Item = &'a Shift>,
    {
        let calculation_id = Uuid::new_v4();
        let month_end_day = profile.month_end_day();

        // period -> (shift count, payable hours per start date)
        let mut grouped: BTreeMap<AccountingPeriod, (usize, BTreeMap<NaiveDate, Decimal>)> =
            BTreeMap::new();

        for shift in shifts {
            let date = shift.start().date();
            let period = AccountingPeriod::containing(date, month_end_day).ok_or_else(|| {
                EngineError::validation(
                    "shift",
                    format!("no accounting period for shift starting {}", shift.start()),
                )
            })?;

            let (count, days) = grouped.entry(period).or_default();
            *count += 1;
            let day_hours = days.entry(date).or_insert(Decimal::ZERO);
            *day_hours = day_hours
                .checked_add(shift.payable_hours())
                .ok_or_else(|| overflow("payable hours"))?;
        }

        let periods = grouped
            .into_iter()
            .map(|(period, (shift_count, days))| {
                let hours = self.split_period(&days)?;
                let pay = price_tiers(&hours, profile)?;
                let amount = pay.checked_total().ok_or_else(|| overflow("period pay"))?;
                debug!(
                    calculation_id = %calculation_id,
                    period = %period,
                    shift_count,
                    regular_hours = %hours.regular_hours.normalize(),
                    tier1_hours = %hours.tier1_hours.normalize(),
                    tier2_hours = %hours.tier2_hours.normalize(),
                    amount = %amount,
                    "Priced accounting period"
                );
                Ok(PeriodPay {
                    period,
                    shift_count,
                    hours,
                    pay,
                })
            })
            .collect::<EngineResult<Vec<PeriodPay>>>()?;

        let total = periods
            .iter()
            .try_fold(Money::ZERO, |sum, p| sum.checked_add(p.pay.checked_total()?))
            .ok_or_else(|| overflow("salary total"))?
            .round_to(self.config.minor_units);

        info!(
            calculation_id = %calculation_id,
            periods = periods.len(),
            total = %total,
            "Salary calculated"
        );

        Ok(SalaryBreakdown {
            calculation_id,
            periods,
            total,
        })
    }

    fn split_period(&self, days: &BTreeMap<NaiveDate, Decimal>) -> EngineResult<TierSplit> {
        let tier1 = self.config.tier1_threshold_hours;
        let tier2 = self.config.tier2_threshold_hours;

        // Every per-day split is bounded by this total, so summing splits is safe.
        let period_hours = days
            .values()
            .try_fold(Decimal::ZERO, |sum, &hours| sum.checked_add(hours))
            .ok_or_else(|| overflow("period hours"))?;

        Ok(match self.config.overtime_basis {
            OvertimeBasis::PerPeriod => split_hours(period_hours, tier1, tier2),
            OvertimeBasis::PerDay => days
                .values()
                .map(|&hours| split_hours(hours, tier1, tier2))
                .sum(),
        })
    }
}

fn overflow(what: &str) -> EngineError {
    EngineError::Overflow {
        what: what.to_string(),
    }
}

/// Calculates the salary for `shifts` under the default configuration.
///
/// # Example
///
/// ```
/// use shift_payroll::calculation::calc_salary;
/// use shift_payroll::models::{Money, Shift, WageProfile};
/// use rust_decimal::Decimal;
///
/// let profile = WageProfile::with_wage(Decimal::from(40), 10).unwrap();
/// let shifts: Vec<Shift> = Vec::new();
/// assert_eq!(calc_salary(&shifts, &profile).unwrap(), Money::ZERO);
/// ```
pub fn calc_salary<'a, I>(shifts: I, profile: &WageProfile) -> EngineResult<Money>
where
    I: IntoIterator<Item = &'a Shift>,
{
    SalaryCalculator::default().calculate(shifts, profile)
}

/// Calculates the salary for `shifts` under the default configuration,
/// keeping the per-period detail.
pub fn calc_salary_breakdown<'a, I>(shifts: I, profile: &WageProfile) -> EngineResult<SalaryBreakdown>
where
    I: IntoIterator<Item = &'a Shift>,
{
    SalaryCalculator::default().breakdown(shifts, profile)
}
