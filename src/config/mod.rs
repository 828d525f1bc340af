//! Configuration loading and management for the shift payroll engine.
//!
//! This module provides the calculator configuration (overtime thresholds,
//! overtime basis and rounding precision) and loads it from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use shift_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/calculator.yaml").unwrap().into_config();
//! println!("Second-tier overtime after {} hours", config.tier2_threshold_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalculatorConfig, DEFAULT_MINOR_UNITS, DEFAULT_TIER1_THRESHOLD_HOURS,
    DEFAULT_TIER2_THRESHOLD_HOURS, OvertimeBasis,
};
