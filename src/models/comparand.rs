//! Dynamic, fallible comparison support.
//!
//! Statically typed code compares intervals, shifts and profiles through
//! `Ord` or dedicated methods. Code that holds values of unknown type (for
//! example heterogeneous collections) compares through [`Comparand`], which
//! reports an absent value and a value of the wrong type as distinct errors.

use std::any::{Any, type_name};

use crate::error::{EngineError, EngineResult};

/// A value that can take part in a dynamic comparison.
///
/// Implemented for every `'static` type, so any value can be passed as
/// `&dyn Comparand`.
///
/// # Example
///
/// ```
/// use shift_payroll::error::EngineError;
/// use shift_payroll::models::{Comparand, TimeInterval};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2015, 8, 8).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let interval = TimeInterval::new(at, at);
///
/// let not_an_interval = 42_u32;
/// assert!(matches!(
///     interval.try_compare(Some(&not_an_interval as &dyn Comparand)),
///     Err(EngineError::TypeMismatch { .. })
/// ));
/// assert!(matches!(
///     interval.try_compare(None),
///     Err(EngineError::NullArgument { .. })
/// ));
/// ```
pub trait Comparand: Any {
    /// Returns `self` as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns the concrete type name, used in mismatch errors.
    fn type_name(&self) -> &'static str;
}

impl<T: Any> Comparand for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Resolves a dynamic comparand to a concrete `T`.
///
/// `expected` names the receiving type in the produced error.
pub(crate) fn downcast<'a, T: Any>(
    other: Option<&'a dyn Comparand>,
    expected: &str,
) -> EngineResult<&'a T> {
    let other = other.ok_or_else(|| EngineError::NullArgument {
        what: expected.to_string(),
    })?;

    other
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| EngineError::TypeMismatch {
            expected: expected.to_string(),
            found: other.type_name().to_string(),
        })
}
