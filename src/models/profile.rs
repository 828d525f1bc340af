//! Wage profile model.
//!
//! This module defines the [`WageProfile`] struct holding an employee's
//! payroll configuration, and [`ProfileRecord`], its persisted form.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::comparand::{Comparand, downcast};
use super::name::PersonName;

/// The smallest allowed overtime rate, in percent of the hourly wage.
pub const MIN_OVERTIME_RATE: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// The largest allowed overtime rate, in percent of the hourly wage.
pub const MAX_OVERTIME_RATE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// The largest allowed hourly wage.
///
/// Together with [`MAX_OVERTIME_RATE`] this keeps the pay for any
/// representable shift duration well inside `Decimal` range.
pub const MAX_HOUR_WAGE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// The latest day of month a pay period may close on.
///
/// Every month has this day, so period boundaries never need clamping.
pub const MAX_MONTH_END_DAY: u8 = 28;

/// Represents an employee's payroll configuration.
///
/// Identity (name, company, role) is display data; the calculation engine
/// only reads the wage, the month-end day and the two overtime rates.
///
/// Equality and hashing consider the full name, the company name and the
/// hourly wage only, so two profiles differing just in role, month-end
/// day or overtime rates are equal. Ordering is by wage alone and is
/// exposed through [`WageProfile::compare_by_wage`] rather than `Ord`.
///
/// # Examples
///
/// ```
/// use shift_payroll::models::WageProfile;
/// use rust_decimal::Decimal;
///
/// let profile = WageProfile::new(
///     "Ada Lovelace",
///     "Analytical Engines Ltd.",
///     "Programmer",
///     Decimal::from(85),
///     15,
///     Decimal::from(125),
///     Decimal::from(150),
/// )
/// .unwrap();
///
/// assert_eq!(profile.display_name(), "Ada Lovelace");
/// assert_eq!(profile.overtime_multiplier1(), Decimal::new(125, 2));
///
/// assert!(WageProfile::with_wage(Decimal::from(85), 29).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "ProfileRecord", try_from = "ProfileRecord")]
pub struct WageProfile {
    full_name: PersonName,
    company_name: String,
    role_name: String,
    hour_wage: Decimal,
    month_end_day: u8,
    overtime_rate1: Decimal,
    overtime_rate2: Decimal,
}

impl WageProfile {
    /// Creates a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] naming the offending field when:
    /// - `hour_wage` is not positive or exceeds [`MAX_HOUR_WAGE`]
    /// - `month_end_day` is outside `1..=28`
    /// - either overtime rate is below 100 or above [`MAX_OVERTIME_RATE`]
    pub fn new(
        full_name: &str,
        company_name: &str,
        role_name: &str,
        hour_wage: Decimal,
        month_end_day: u8,
        overtime_rate1: Decimal,
        overtime_rate2: Decimal,
    ) -> EngineResult<Self> {
        validate_hour_wage(hour_wage)?;
        validate_month_end_day(month_end_day)?;
        validate_overtime_rate("overtime_rate1", overtime_rate1)?;
        validate_overtime_rate("overtime_rate2", overtime_rate2)?;

        Ok(Self {
            full_name: PersonName::parse(full_name),
            company_name: company_name.trim().to_string(),
            role_name: role_name.trim().to_string(),
            hour_wage,
            month_end_day,
            overtime_rate1,
            overtime_rate2,
        })
    }

    /// Creates a profile with identity and no overtime premium.
    pub fn with_identity(
        full_name: &str,
        company_name: &str,
        role_name: &str,
        hour_wage: Decimal,
        month_end_day: u8,
    ) -> EngineResult<Self> {
        Self::new(
            full_name,
            company_name,
            role_name,
            hour_wage,
            month_end_day,
            MIN_OVERTIME_RATE,
            MIN_OVERTIME_RATE,
        )
    }

    /// Creates an anonymous profile with no overtime premium.
    pub fn with_wage(hour_wage: Decimal, month_end_day: u8) -> EngineResult<Self> {
        Self::with_identity("", "", "", hour_wage, month_end_day)
    }

    /// Returns this profile with both overtime rates replaced.
    pub fn with_overtime_rates(
        mut self,
        overtime_rate1: Decimal,
        overtime_rate2: Decimal,
    ) -> EngineResult<Self> {
        self.set_overtime_rate1(overtime_rate1)?;
        self.set_overtime_rate2(overtime_rate2)?;
        Ok(self)
    }

    /// The structured full name.
    pub fn full_name(&self) -> &PersonName {
        &self.full_name
    }

    /// The full name joined for display.
    pub fn display_name(&self) -> String {
        self.full_name.to_string()
    }

    /// The employer's name.
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// The employee's role.
    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    /// Base pay per hour.
    pub fn hour_wage(&self) -> Decimal {
        self.hour_wage
    }

    /// The day of month that closes each pay period.
    pub fn month_end_day(&self) -> u8 {
        self.month_end_day
    }

    /// First-tier overtime rate in percent.
    pub fn overtime_rate1(&self) -> Decimal {
        self.overtime_rate1
    }

    /// Second-tier overtime rate in percent.
    pub fn overtime_rate2(&self) -> Decimal {
        self.overtime_rate2
    }

    /// First-tier overtime rate as a multiplier (150 → 1.5).
    pub fn overtime_multiplier1(&self) -> Decimal {
        self.overtime_rate1 / Decimal::ONE_HUNDRED
    }

    /// Second-tier overtime rate as a multiplier (200 → 2.0).
    pub fn overtime_multiplier2(&self) -> Decimal {
        self.overtime_rate2 / Decimal::ONE_HUNDRED
    }

    /// Replaces the full name.
    pub fn set_full_name(&mut self, full_name: &str) {
        self.full_name = PersonName::parse(full_name);
    }

    /// Replaces the company name.
    pub fn set_company_name(&mut self, company_name: &str) {
        self.company_name = company_name.trim().to_string();
    }

    /// Replaces the role.
    pub fn set_role_name(&mut self, role_name: &str) {
        self.role_name = role_name.trim().to_string();
    }

    /// Replaces the hourly wage, which must be positive and at most [`MAX_HOUR_WAGE`].
    pub fn set_hour_wage(&mut self, hour_wage: Decimal) -> EngineResult<()> {
        validate_hour_wage(hour_wage)?;
        self.hour_wage = hour_wage;
        Ok(())
    }

    /// Replaces the month-end day, which must be within `1..=28`.
    pub fn set_month_end_day(&mut self, month_end_day: u8) -> EngineResult<()> {
        validate_month_end_day(month_end_day)?;
        self.month_end_day = month_end_day;
        Ok(())
    }

    /// Replaces the first-tier overtime rate, which must be within `100..=10000`.
    pub fn set_overtime_rate1(&mut self, overtime_rate1: Decimal) -> EngineResult<()> {
        validate_overtime_rate("overtime_rate1", overtime_rate1)?;
        self.overtime_rate1 = overtime_rate1;
        Ok(())
    }

    /// Replaces the second-tier overtime rate, which must be within `100..=10000`.
    pub fn set_overtime_rate2(&mut self, overtime_rate2: Decimal) -> EngineResult<()> {
        validate_overtime_rate("overtime_rate2", overtime_rate2)?;
        self.overtime_rate2 = overtime_rate2;
        Ok(())
    }

    /// Orders two profiles by hourly wage, ascending.
    pub fn compare_by_wage(&self, other: &WageProfile) -> Ordering {
        self.hour_wage.cmp(&other.hour_wage)
    }

    /// Compares by wage against a value of unknown type.
    ///
    /// An absent value yields [`EngineError::NullArgument`]; anything other
    /// than a `WageProfile` yields [`EngineError::TypeMismatch`].
    pub fn try_compare(&self, other: Option<&dyn Comparand>) -> EngineResult<Ordering> {
        let other = downcast::<WageProfile>(other, "WageProfile")?;
        Ok(self.compare_by_wage(other))
    }
}

impl PartialEq for WageProfile {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
            && self.company_name == other.company_name
            && self.hour_wage == other.hour_wage
    }
}

impl Eq for WageProfile {}

impl fmt::Display for WageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} at {}): {:.2}/h, month end day {}, overtime {}% / {}%",
            self.display_name(),
            self.role_name,
            self.company_name,
            self.hour_wage,
            self.month_end_day,
            self.overtime_rate1.normalize(),
            self.overtime_rate2.normalize()
        )
    }
}

impl Hash for WageProfile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
        self.company_name.hash(state);
        self.hour_wage.hash(state);
    }
}

fn validate_hour_wage(hour_wage: Decimal) -> EngineResult<()> {
    if hour_wage <= Decimal::ZERO {
        return Err(EngineError::validation(
            "hour_wage",
            format!("must be positive, got {}", hour_wage),
        ));
    }
    if hour_wage > MAX_HOUR_WAGE {
        return Err(EngineError::validation(
            "hour_wage",
            format!("must be at most {}, got {}", MAX_HOUR_WAGE, hour_wage),
        ));
    }
    Ok(())
}

fn validate_month_end_day(month_end_day: u8) -> EngineResult<()> {
    if !(1..=MAX_MONTH_END_DAY).contains(&month_end_day) {
        return Err(EngineError::validation(
            "month_end_day",
            format!(
                "must be between 1 and {}, got {}",
                MAX_MONTH_END_DAY, month_end_day
            ),
        ));
    }
    Ok(())
}

fn validate_overtime_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < MIN_OVERTIME_RATE {
        return Err(EngineError::validation(
            field,
            format!("must be at least {}, got {}", MIN_OVERTIME_RATE, rate),
        ));
    }
    if rate > MAX_OVERTIME_RATE {
        return Err(EngineError::validation(
            field,
            format!("must be at most {}, got {}", MAX_OVERTIME_RATE, rate),
        ));
    }
    Ok(())
}

/// The persisted form of a [`WageProfile`].
///
/// Restoring a record runs the same validation as construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// The full name as a single display string.
    pub full_name: String,
    /// The employer's name.
    pub company_name: String,
    /// The employee's role.
    pub role_name: String,
    /// Base pay per hour.
    pub hour_wage: Decimal,
    /// The day of month that closes each pay period.
    pub month_end_day: u8,
    /// First-tier overtime rate in percent.
    pub overtime_rate1: Decimal,
    /// Second-tier overtime rate in percent.
    pub overtime_rate2: Decimal,
}

impl From<WageProfile> for ProfileRecord {
    fn from(profile: WageProfile) -> Self {
        Self {
            full_name: profile.full_name.to_string(),
            company_name: profile.company_name,
            role_name: profile.role_name,
            hour_wage: profile.hour_wage,
            month_end_day: profile.month_end_day,
            overtime_rate1: profile.overtime_rate1,
            overtime_rate2: profile.overtime_rate2,
        }
    }
}

impl TryFrom<ProfileRecord> for WageProfile {
    type Error = EngineError;

    fn try_from(record: ProfileRecord) -> EngineResult<Self> {
        WageProfile::new(
            &record.full_name,
            &record.company_name,
            &record.role_name,
            record.hour_wage,
            record.month_end_day,
            record.overtime_rate1,
            record.overtime_rate2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_profile() -> WageProfile {
        WageProfile::new(
            "Ada Lovelace",
            "Analytical Engines Ltd.",
            "Programmer",
            dec("85"),
            15,
            dec("125"),
            dec("150"),
        )
        .unwrap()
    }

    #[test]
    fn test_month_end_day_bounds() {
        for day in [0, 29, 31] {
            let err = WageProfile::with_wage(dec("10"), day).unwrap_err();
            assert!(
                matches!(&err, EngineError::Validation { field, .. } if field == "month_end_day"),
                "unexpected error for day {}: {:?}",
                day,
                err
            );
        }
        assert!(WageProfile::with_wage(dec("10"), 1).is_ok());
        assert!(WageProfile::with_wage(dec("10"), 28).is_ok());
    }

    #[test]
    fn test_overtime_rate1_below_100_is_rejected() {
        let err = WageProfile::new("", "", "", dec("10"), 10, dec("99"), dec("150")).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation {
                field: "overtime_rate1".to_string(),
                message: "must be at least 100, got 99".to_string(),
            }
        );
    }

    #[test]
    fn test_overtime_rate2_below_100_is_rejected() {
        let err =
            WageProfile::new("", "", "", dec("10"), 10, dec("150"), dec("99.99")).unwrap_err();
        assert!(matches!(err, EngineError::Validation { field, .. } if field == "overtime_rate2"));
    }

    #[test]
    fn test_non_positive_wage_is_rejected() {
        assert!(WageProfile::with_wage(Decimal::ZERO, 10).is_err());
        assert!(WageProfile::with_wage(dec("-5"), 10).is_err());
    }

    #[test]
    fn test_convenience_constructors_default_rates_to_100() {
        let profile = WageProfile::with_wage(dec("40"), 10).unwrap();
        assert_eq!(profile.overtime_rate1(), dec("100"));
        assert_eq!(profile.overtime_rate2(), dec("100"));
        assert!(profile.full_name().is_empty());
        assert_eq!(profile.company_name(), "");
    }

    #[test]
    fn test_setters_validate() {
        let mut profile = create_test_profile();
        assert!(profile.set_month_end_day(0).is_err());
        assert_eq!(profile.month_end_day(), 15);
        assert!(profile.set_overtime_rate2(dec("50")).is_err());
        assert_eq!(profile.overtime_rate2(), dec("150"));

        profile.set_month_end_day(28).unwrap();
        profile.set_hour_wage(dec("90")).unwrap();
        assert_eq!(profile.month_end_day(), 28);
        assert_eq!(profile.hour_wage(), dec("90"));
    }

    #[test]
    fn test_multipliers() {
        let profile = create_test_profile();
        assert_eq!(profile.overtime_multiplier1(), dec("1.25"));
        assert_eq!(profile.overtime_multiplier2(), dec("1.5"));
    }

    #[test]
    fn test_compare_by_wage_only() {
        let cheap = WageProfile::with_identity("Zed", "Z Corp", "Lead", dec("20"), 1).unwrap();
        let dear = WageProfile::with_identity("Amy", "A Corp", "Intern", dec("30"), 28).unwrap();

        assert_eq!(cheap.compare_by_wage(&dear), Ordering::Less);
        assert_eq!(dear.compare_by_wage(&cheap), Ordering::Greater);
        assert_eq!(
            cheap.try_compare(Some(&dear as &dyn Comparand)),
            Ok(Ordering::Less)
        );
    }

    #[test]
    fn test_try_compare_errors() {
        let profile = create_test_profile();
        assert_eq!(
            profile.try_compare(None),
            Err(EngineError::NullArgument {
                what: "WageProfile".to_string()
            })
        );
        assert!(matches!(
            profile.try_compare(Some(&42_i32 as &dyn Comparand)),
            Err(EngineError::TypeMismatch { .. })
        ));
    }

    /// Equality ignores role, month-end day and overtime rates.
    #[test]
    fn test_equality_is_name_company_and_wage_only() {
        let a = create_test_profile();
        let b = WageProfile::new(
            "Ada Lovelace",
            "Analytical Engines Ltd.",
            "Director",
            dec("85.00"),
            1,
            dec("300"),
            dec("400"),
        )
        .unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));

        let mut c = a.clone();
        c.set_hour_wage(dec("86")).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_profile_serialization_round_trip() {
        let profile = create_test_profile();
        let json = serde_json::to_string(&profile).unwrap();
        let restored: WageProfile = serde_json::from_str(&json).unwrap();

        assert_eq!(profile, restored);
        assert_eq!(restored.role_name(), "Programmer");
        assert_eq!(restored.month_end_day(), 15);
        assert_eq!(restored.overtime_rate1(), dec("125"));
        assert_eq!(restored.overtime_rate2(), dec("150"));
    }

    #[test]
    fn test_profile_serialized_fields() {
        let json = serde_json::to_value(create_test_profile()).unwrap();
        assert_eq!(json["full_name"], "Ada Lovelace");
        assert_eq!(json["company_name"], "Analytical Engines Ltd.");
        assert_eq!(json["role_name"], "Programmer");
        assert_eq!(json["hour_wage"], "85");
        assert_eq!(json["month_end_day"], 15);
        assert_eq!(json["overtime_rate1"], "125");
        assert_eq!(json["overtime_rate2"], "150");
    }

    #[test]
    fn test_deserialization_revalidates() {
        let json = r#"{
            "full_name": "Ada Lovelace",
            "company_name": "Analytical Engines Ltd.",
            "role_name": "Programmer",
            "hour_wage": "85",
            "month_end_day": 30,
            "overtime_rate1": "125",
            "overtime_rate2": "150"
        }"#;

        let err = serde_json::from_str::<WageProfile>(json).unwrap_err();
        assert!(err.to_string().contains("month_end_day"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            create_test_profile().to_string(),
            "Ada Lovelace (Programmer at Analytical Engines Ltd.): 85.00/h, month end day 15, overtime 125% / 150%"
        );
    }

    #[test]
    fn test_oversized_wage_is_rejected() {
        let err = WageProfile::with_wage(dec("50000000000000000000000000000"), 15).unwrap_err();
        assert!(matches!(err, EngineError::Validation { ref field, .. } if field == "hour_wage"));
        assert!(WageProfile::with_wage(MAX_HOUR_WAGE, 15).is_ok());

        let mut profile = create_test_profile();
        assert!(profile.set_hour_wage(dec("1000000.01")).is_err());
        assert_eq!(profile.hour_wage(), dec("85"));
    }

    #[test]
    fn test_oversized_overtime_rate_is_rejected() {
        let err = WageProfile::new("", "", "", dec("10"), 10, dec("150"), dec("10001")).unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation {
                field: "overtime_rate2".to_string(),
                message: "must be at most 10000, got 10001".to_string(),
            }
        );
    }
}
