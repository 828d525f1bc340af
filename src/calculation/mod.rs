//! Calculation logic for the shift payroll engine.
//!
//! This module contains accounting period detection, overtime tier
//! splitting and pricing, and the salary calculator that combines them.

mod overtime_tiers;
mod period;
mod salary;

pub use overtime_tiers::{TierPay, TierSplit, price_tiers, split_hours};
pub use period::AccountingPeriod;
pub use salary::{PeriodPay, SalaryBreakdown, SalaryCalculator, calc_salary, calc_salary_breakdown};
