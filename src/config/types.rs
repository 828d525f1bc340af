//! Configuration types for salary calculation.
//!
//! This module contains the strongly-typed calculator configuration that is
//! deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Default hours paid at the base wage per accounting period.
pub const DEFAULT_TIER1_THRESHOLD_HOURS: Decimal = Decimal::from_parts(186, 0, 0, false, 0);

/// Default hours after which second-tier overtime applies per accounting period.
pub const DEFAULT_TIER2_THRESHOLD_HOURS: Decimal = Decimal::from_parts(216, 0, 0, false, 0);

/// Default currency precision (cents).
pub const DEFAULT_MINOR_UNITS: u32 = 2;

const MAX_MINOR_UNITS: u32 = 10;

/// The span over which overtime thresholds are measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeBasis {
    /// Thresholds apply to the payable hours of a whole accounting period.
    #[default]
    PerPeriod,
    /// Thresholds apply to each calendar day's payable hours within a period.
    PerDay,
}

/// Settings for the salary calculator.
///
/// Payable hours up to `tier1_threshold_hours` are paid at the base wage,
/// hours up to `tier2_threshold_hours` at the profile's first overtime
/// rate, and anything beyond at its second rate.
///
/// # Example
///
/// ```
/// use shift_payroll::config::{CalculatorConfig, OvertimeBasis};
/// use rust_decimal::Decimal;
///
/// let config = CalculatorConfig::with_thresholds(Decimal::from(8), Decimal::from(12)).unwrap();
/// assert_eq!(config.overtime_basis, OvertimeBasis::PerPeriod);
/// assert_eq!(config.minor_units, 2);
///
/// assert!(CalculatorConfig::with_thresholds(Decimal::from(12), Decimal::from(8)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Whether thresholds apply per period or per day.
    pub overtime_basis: OvertimeBasis,
    /// Hours paid at the base wage before first-tier overtime starts.
    pub tier1_threshold_hours: Decimal,
    /// Hours after which second-tier overtime starts.
    pub tier2_threshold_hours: Decimal,
    /// Decimal places the final amount is rounded to.
    pub minor_units: u32,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            overtime_basis: OvertimeBasis::PerPeriod,
            tier1_threshold_hours: DEFAULT_TIER1_THRESHOLD_HOURS,
            tier2_threshold_hours: DEFAULT_TIER2_THRESHOLD_HOURS,
            minor_units: DEFAULT_MINOR_UNITS,
        }
    }
}

impl CalculatorConfig {
    /// Creates a per-period configuration with the given thresholds.
    pub fn with_thresholds(tier1: Decimal, tier2: Decimal) -> EngineResult<Self> {
        let config = Self {
            tier1_threshold_hours: tier1,
            tier2_threshold_hours: tier2,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns this configuration measuring thresholds per day.
    pub fn per_day(mut self) -> Self {
        self.overtime_basis = OvertimeBasis::PerDay;
        self
    }

    /// Checks that the thresholds and precision are usable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when a threshold is negative,
    /// when the first threshold exceeds the second, or when the precision
    /// exceeds ten decimal places.
    pub fn validate(&self) -> EngineResult<()> {
        if self.tier1_threshold_hours < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "tier1_threshold_hours must not be negative, got {}",
                    self.tier1_threshold_hours
                ),
            });
        }
        if self.tier2_threshold_hours < self.tier1_threshold_hours {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "tier2_threshold_hours ({}) must not be below tier1_threshold_hours ({})",
                    self.tier2_threshold_hours, self.tier1_threshold_hours
                ),
            });
        }
        if self.minor_units > MAX_MINOR_UNITS {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "minor_units must be at most {}, got {}",
                    MAX_MINOR_UNITS, self.minor_units
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CalculatorConfig::default();
        assert_eq!(config.overtime_basis, OvertimeBasis::PerPeriod);
        assert_eq!(config.tier1_threshold_hours, Decimal::from(186));
        assert_eq!(config.tier2_threshold_hours, Decimal::from(216));
        assert_eq!(config.minor_units, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_equal_thresholds_are_valid() {
        assert!(CalculatorConfig::with_thresholds(Decimal::from(8), Decimal::from(8)).is_ok());
    }

    #[test]
    fn test_negative_threshold_is_invalid() {
        let result = CalculatorConfig::with_thresholds(Decimal::from(-1), Decimal::from(8));
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_excessive_precision_is_invalid() {
        let config = CalculatorConfig {
            minor_units: 11,
            ..CalculatorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_per_day_keeps_thresholds() {
        let config = CalculatorConfig::with_thresholds(Decimal::from(8), Decimal::from(12))
            .unwrap()
            .per_day();
        assert_eq!(config.overtime_basis, OvertimeBasis::PerDay);
        assert_eq!(config.tier1_threshold_hours, Decimal::from(8));
    }

    #[test]
    fn test_overtime_basis_serialization() {
        assert_eq!(
            serde_json::to_string(&OvertimeBasis::PerPeriod).unwrap(),
            "\"per_period\""
        );
        assert_eq!(
            serde_json::to_string(&OvertimeBasis::PerDay).unwrap(),
            "\"per_day\""
        );
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: CalculatorConfig = serde_yaml::from_str("overtime_basis: per_day\n").unwrap();
        assert_eq!(config.overtime_basis, OvertimeBasis::PerDay);
        assert_eq!(config.tier1_threshold_hours, DEFAULT_TIER1_THRESHOLD_HOURS);
        assert_eq!(config.minor_units, DEFAULT_MINOR_UNITS);
    }
}
