//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading calculator
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::CalculatorConfig;

/// Loads and validates calculator configuration.
///
/// The file is a single YAML mapping. Omitted keys take their defaults:
///
/// ```text
/// overtime_basis: per_period   # or per_day
/// tier1_threshold_hours: 186
/// tier2_threshold_hours: 216
/// minor_units: 2
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/calculator.yaml").unwrap();
/// println!("Overtime starts after {} hours", loader.config().tier1_threshold_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: CalculatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML for the schema (`ConfigParseError`)
    /// - The values are inconsistent (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content, &path_str)?;
        debug!(
            path = %path_str,
            basis = ?config.overtime_basis,
            tier1 = %config.tier1_threshold_hours,
            tier2 = %config.tier2_threshold_hours,
            "Loaded calculator configuration"
        );

        Ok(Self { config })
    }

    /// Parses configuration from YAML text.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_payroll::config::{ConfigLoader, OvertimeBasis};
    /// use rust_decimal::Decimal;
    ///
    /// let loader = ConfigLoader::from_yaml_str(
    ///     "overtime_basis: per_day\ntier1_threshold_hours: 8\ntier2_threshold_hours: 10\n",
    /// )
    /// .unwrap();
    /// assert_eq!(loader.config().overtime_basis, OvertimeBasis::PerDay);
    /// assert_eq!(loader.config().tier2_threshold_hours, Decimal::from(10));
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config = Self::parse(content, "<inline>")?;
        Ok(Self { config })
    }

    fn parse(content: &str, path: &str) -> EngineResult<CalculatorConfig> {
        let config: CalculatorConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> CalculatorConfig {
        self.config
    }
}
