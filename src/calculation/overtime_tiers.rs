//! Overtime tier splitting and pricing.
//!
//! Payable hours are split into three bands by two thresholds:
//! - up to tier 1: base wage
//! - tier 1 to tier 2: first overtime rate
//! - beyond tier 2: second overtime rate

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Money, WageProfile};

/// Hours split across the three pay bands.
///
/// # Example
///
/// ```
/// use shift_payroll::calculation::split_hours;
/// use rust_decimal::Decimal;
///
/// let split = split_hours(Decimal::from(14), Decimal::from(8), Decimal::from(12));
/// assert_eq!(split.regular_hours, Decimal::from(8));
/// assert_eq!(split.tier1_hours, Decimal::from(4));
/// assert_eq!(split.tier2_hours, Decimal::from(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSplit {
    /// Hours paid at the base wage.
    pub regular_hours: Decimal,
    /// Hours paid at the first overtime rate.
    pub tier1_hours: Decimal,
    /// Hours paid at the second overtime rate.
    pub tier2_hours: Decimal,
}

impl TierSplit {
    /// All hours in the split.
    pub fn total_hours(&self) -> Decimal {
        self.regular_hours + self.tier1_hours + self.tier2_hours
    }

    /// Hours paid at either overtime rate.
    pub fn overtime_hours(&self) -> Decimal {
        self.tier1_hours + self.tier2_hours
    }
}

impl Add for TierSplit {
    type Output = TierSplit;

    fn add(self, rhs: TierSplit) -> TierSplit {
        TierSplit {
            regular_hours: self.regular_hours + rhs.regular_hours,
            tier1_hours: self.tier1_hours + rhs.tier1_hours,
            tier2_hours: self.tier2_hours + rhs.tier2_hours,
        }
    }
}

impl Sum for TierSplit {
    fn sum<I: Iterator<Item = TierSplit>>(iter: I) -> Self {
        iter.fold(TierSplit::default(), Add::add)
    }
}

/// Splits `hours` into bands using the two thresholds.
///
/// Negative hours are treated as zero. `tier2_threshold` below
/// `tier1_threshold` is treated as equal to it.
pub fn split_hours(hours: Decimal, tier1_threshold: Decimal, tier2_threshold: Decimal) -> TierSplit {
    let hours = hours.max(Decimal::ZERO);
    let tier1_threshold = tier1_threshold.max(Decimal::ZERO);
    let tier2_threshold = tier2_threshold.max(tier1_threshold);

    let regular_hours = hours.min(tier1_threshold);
    let tier1_hours = (hours.min(tier2_threshold) - tier1_threshold).max(Decimal::ZERO);
    let tier2_hours = (hours - tier2_threshold).max(Decimal::ZERO);

    TierSplit {
        regular_hours,
        tier1_hours,
        tier2_hours,
    }
}

/// The unrounded pay for each band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPay {
    /// Pay for regular hours.
    pub regular: Money,
    /// Pay for first-tier overtime hours.
    pub tier1: Money,
    /// Pay for second-tier overtime hours.
    pub tier2: Money,
}

impl TierPay {
    /// Sum of all bands.
    pub fn total(&self) -> Money {
        self.regular + self.tier1 + self.tier2
    }

    /// Sum of all bands, or `None` if it leaves the decimal range.
    pub fn checked_total(&self) -> Option<Money> {
        self.regular.checked_add(self.tier1)?.checked_add(self.tier2)
    }
}

/// Prices a split using the profile's wage and overtime rates.
///
/// # Errors
///
/// Returns [`EngineError::Overflow`] if a band's pay leaves the decimal
/// range. A validated profile cannot reach it for any single shift; only
/// an enormous accumulation of hours can.
///
/// # Example
///
/// ```
/// use shift_payroll::calculation::{price_tiers, split_hours};
/// use shift_payroll::models::{Money, WageProfile};
/// use rust_decimal::Decimal;
///
/// let profile = WageProfile::with_wage(Decimal::from(10), 1)
///     .unwrap()
///     .with_overtime_rates(Decimal::from(150), Decimal::from(200))
///     .unwrap();
/// let split = split_hours(Decimal::from(10), Decimal::from(8), Decimal::from(12));
///
/// assert_eq!(price_tiers(&split, &profile).unwrap().total(), Money::from(110));
/// ```
pub fn price_tiers(split: &TierSplit, profile: &WageProfile) -> EngineResult<TierPay> {
    let wage = profile.hour_wage();
    Ok(TierPay {
        regular: band_pay(split.regular_hours, wage, Decimal::ONE, "regular pay")?,
        tier1: band_pay(split.tier1_hours, wage, profile.overtime_multiplier1(), "tier 1 pay")?,
        tier2: band_pay(split.tier2_hours, wage, profile.overtime_multiplier2(), "tier 2 pay")?,
    })
}

fn band_pay(hours: Decimal, wage: Decimal, multiplier: Decimal, what: &str) -> EngineResult<Money> {
    wage.checked_mul(multiplier)
        .and_then(|rate| hours.checked_mul(rate))
        .map(Money::new)
        .ok_or_else(|| EngineError::Overflow {
            what: what.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn profile_10_150_200() -> WageProfile {
        WageProfile::with_wage(dec("10"), 1)
            .unwrap()
            .with_overtime_rates(dec("150"), dec("200"))
            .unwrap()
    }

    #[test]
    fn test_under_first_threshold() {
        let split = split_hours(dec("6"), dec("8"), dec("12"));
        assert_eq!(split.regular_hours, dec("6"));
        assert_eq!(split.tier1_hours, Decimal::ZERO);
        assert_eq!(split.tier2_hours, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_first_threshold() {
        let split = split_hours(dec("8"), dec("8"), dec("12"));
        assert_eq!(split.regular_hours, dec("8"));
        assert_eq!(split.overtime_hours(), Decimal::ZERO);
    }

    #[test]
    fn test_between_thresholds() {
        let split = split_hours(dec("10"), dec("8"), dec("12"));
        assert_eq!(split.regular_hours, dec("8"));
        assert_eq!(split.tier1_hours, dec("2"));
        assert_eq!(split.tier2_hours, Decimal::ZERO);
    }

    #[test]
    fn test_beyond_second_threshold() {
        let split = split_hours(dec("15.5"), dec("8"), dec("12"));
        assert_eq!(split.regular_hours, dec("8"));
        assert_eq!(split.tier1_hours, dec("4"));
        assert_eq!(split.tier2_hours, dec("3.5"));
        assert_eq!(split.total_hours(), dec("15.5"));
    }

    #[test]
    fn test_equal_thresholds_skip_first_tier() {
        let split = split_hours(dec("10"), dec("8"), dec("8"));
        assert_eq!(split.tier1_hours, Decimal::ZERO);
        assert_eq!(split.tier2_hours, dec("2"));
    }

    #[test]
    fn test_negative_hours_are_zero() {
        assert_eq!(split_hours(dec("-3"), dec("8"), dec("12")), TierSplit::default());
    }

    #[test]
    fn test_split_sum() {
        let total: TierSplit = [
            split_hours(dec("10"), dec("8"), dec("12")),
            split_hours(dec("13"), dec("8"), dec("12")),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.regular_hours, dec("16"));
        assert_eq!(total.tier1_hours, dec("6"));
        assert_eq!(total.tier2_hours, dec("1"));
    }

    #[test]
    fn test_price_ten_hours() {
        let pay = price_tiers(&split_hours(dec("10"), dec("8"), dec("12")), &profile_10_150_200()).unwrap();
        assert_eq!(pay.regular, Money::from(80));
        assert_eq!(pay.tier1, Money::from(30));
        assert_eq!(pay.tier2, Money::ZERO);
        assert_eq!(pay.total(), Money::from(110));
    }

    #[test]
    fn test_price_fourteen_hours() {
        let pay = price_tiers(&split_hours(dec("14"), dec("8"), dec("12")), &profile_10_150_200()).unwrap();
        assert_eq!(pay.total(), Money::from(180)); // 80 + 60 + 40
    }

    #[test]
    fn test_price_without_premium() {
        let profile = WageProfile::with_wage(dec("10"), 1).unwrap();
        let pay = price_tiers(&split_hours(dec("14"), dec("8"), dec("12")), &profile).unwrap();
        assert_eq!(pay.total(), Money::from(140));
    }

    #[test]
    fn test_price_at_wage_limit_does_not_overflow() {
        let profile = WageProfile::with_wage(crate::models::MAX_HOUR_WAGE, 1)
            .unwrap()
            .with_overtime_rates(crate::models::MAX_OVERTIME_RATE, crate::models::MAX_OVERTIME_RATE)
            .unwrap();
        // A century of continuous work, all in the top band.
        let split = split_hours(dec("876600"), Decimal::ZERO, Decimal::ZERO);
        let pay = price_tiers(&split, &profile).unwrap();
        assert_eq!(pay.tier2, Money::new(dec("87660000000000")));
    }

    #[test]
    fn test_price_overflow_is_an_error() {
        let profile = WageProfile::with_wage(crate::models::MAX_HOUR_WAGE, 1).unwrap();
        let split = split_hours(Decimal::MAX, Decimal::MAX, Decimal::MAX);
        assert!(matches!(
            price_tiers(&split, &profile),
            Err(EngineError::Overflow { .. })
        ));
    }
}
