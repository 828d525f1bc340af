//! The persisted form of a whole ledger.

use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::error::EngineResult;
use crate::ledger::ShiftLedger;
use crate::models::{Shift, WageProfile};

/// The persisted form of a [`ShiftLedger`]: its profile and shifts.
///
/// The calculator configuration is not stored; it is supplied again when
/// the ledger is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// The owning wage profile.
    pub profile: WageProfile,
    /// Recorded shifts, in ledger order.
    #[serde(default)]
    pub shifts: Vec<Shift>,
}

impl LedgerRecord {
    /// Rebuilds a ledger under the default calculator configuration.
    pub fn into_ledger(self) -> ShiftLedger {
        let mut ledger = ShiftLedger::new(self.profile);
        for shift in self.shifts {
            ledger.add_shift(shift);
        }
        ledger
    }

    /// Rebuilds a ledger under `config`.
    pub fn into_ledger_with_config(self, config: CalculatorConfig) -> EngineResult<ShiftLedger> {
        let mut ledger = ShiftLedger::with_config(self.profile, config)?;
        for shift in self.shifts {
            ledger.add_shift(shift);
        }
        Ok(ledger)
    }
}

impl From<&ShiftLedger> for LedgerRecord {
    fn from(ledger: &ShiftLedger) -> Self {
        Self {
            profile: ledger.profile().clone(),
            shifts: ledger.iter().cloned().collect(),
        }
    }
}

impl From<LedgerRecord> for ShiftLedger {
    fn from(record: LedgerRecord) -> Self {
        record.into_ledger()
    }
}
