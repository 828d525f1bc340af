//! Error types for the shift payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can surface: profile validation, ledger
//! lookups, dynamic comparisons, pay arithmetic, configuration loading and
//! persistence.

use thiserror::Error;

/// The main error type for the shift payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use shift_payroll::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "month_end_day".to_string(),
///     message: "must be between 1 and 28, got 29".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid value for 'month_end_day': must be between 1 and 28, got 29"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A value failed validation (profile fields, persisted records).
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of the violated constraint.
        message: String,
    },

    /// The requested entry does not exist.
    #[error("Not found: {what}")]
    NotFound {
        /// A description of what was looked up.
        what: String,
    },

    /// A dynamic comparison was made against a value of an incompatible type.
    #[error("Cannot compare {expected} with a value of type {found}")]
    TypeMismatch {
        /// The type the comparison expected.
        expected: String,
        /// The type that was actually supplied.
        found: String,
    },

    /// A dynamic comparison was made against an absent value.
    #[error("Cannot compare {what} with an absent value")]
    NullArgument {
        /// The type on the receiving side of the comparison.
        what: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is internally inconsistent.
    #[error("Invalid calculator configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },

    /// A monetary or hour total left the representable decimal range.
    #[error("Arithmetic overflow while computing {what}")]
    Overflow {
        /// The quantity being computed.
        what: String,
    },

    /// A record could not be encoded or decoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// A description of the encoder/decoder failure.
        message: String,
    },

    /// Reading or writing a persisted file failed.
    #[error("I/O error on '{path}': {message}")]
    Io {
        /// The file involved.
        path: String,
        /// The underlying error message.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
