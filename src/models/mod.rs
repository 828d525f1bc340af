//! Core data models for the shift payroll engine.
//!
//! This module contains the interval, shift, wage profile and money types
//! used throughout the engine, along with their persisted record forms.

mod comparand;
mod interval;
mod money;
mod name;
mod profile;
mod shift;

pub use comparand::Comparand;
pub use interval::{TimeInterval, format_duration, parse_duration};
pub use money::Money;
pub use name::PersonName;
pub use profile::{
    MAX_HOUR_WAGE, MAX_MONTH_END_DAY, MAX_OVERTIME_RATE, MIN_OVERTIME_RATE, ProfileRecord,
    WageProfile,
};
pub use shift::{Shift, ShiftRecord};
