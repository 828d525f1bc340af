//! Shift storage for one employee.
//!
//! [`ShiftLedger`] owns a wage profile and its shifts and answers date-range
//! and salary queries. [`SharedLedger`] wraps a ledger for use across threads.

mod shared;
mod shift_ledger;

pub use shared::SharedLedger;
pub use shift_ledger::ShiftLedger;
