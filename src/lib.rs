//! Shift tracking and salary calculation.
//!
//! This crate records work shifts (with optional unpaid breaks) against a
//! wage profile and computes salaries with two tiers of overtime, tiered
//! within month-end accounting periods.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod persistence;
