//! VR tier classification.
//!
//! The threshold table is walked from the top of the ladder down and the
//! highest tier whose minimum is met wins. Adults (at or above the adult age
//! threshold) cannot sit on the lowest configured tier: their floor is the
//! second rung.

use rust_decimal::Decimal;

use crate::config::{Settings, VrPolicy};
use crate::models::{Employee, VrTier};

/// Classifies a VR tier from total experience and age.
///
/// Experience below every configured threshold degrades to the lowest
/// configured tier (before the adult floor is applied).
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::classify_vr_tier;
/// use experience_engine::config::Settings;
/// use experience_engine::models::VrTier;
/// use rust_decimal::Decimal;
///
/// let settings = Settings::default();
///
/// assert_eq!(classify_vr_tier(Decimal::new(69, 1), 20, &settings), VrTier::Vr0);
/// assert_eq!(classify_vr_tier(Decimal::new(70, 1), 20, &settings), VrTier::Vr1);
/// assert_eq!(classify_vr_tier(Decimal::ZERO, 25, &settings), VrTier::Vr1);
/// ```
pub fn classify_vr_tier(total_experience_months: Decimal, age: u32, settings: &Settings) -> VrTier {
    let ladder = &settings.vr_thresholds;
    let lowest = ladder.keys().next().copied().unwrap_or(VrTier::Vr0);

    let reached = ladder
        .iter()
        .rev()
        .find(|(_, minimum)| **minimum <= total_experience_months)
        .map(|(tier, _)| *tier)
        .unwrap_or(lowest);

    if settings.is_adult(age) {
        let floor = ladder.keys().nth(1).copied().unwrap_or(lowest);
        reached.max(floor)
    } else {
        reached
    }
}

/// Resolves an employee's tier according to the configured [`VrPolicy`].
///
/// Under [`VrPolicy::Stored`] the tier on the record is passed through, and a
/// record without one sits on the lowest configured tier.
pub fn resolve_vr_tier(
    employee: &Employee,
    total_experience_months: Decimal,
    age: u32,
    settings: &Settings,
) -> VrTier {
    match settings.vr_policy {
        VrPolicy::Derive => classify_vr_tier(total_experience_months, age, settings),
        VrPolicy::Stored => employee.status_vr.unwrap_or_else(|| {
            settings
                .vr_thresholds
                .keys()
                .next()
                .copied()
                .unwrap_or(VrTier::Vr0)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(status_vr: Option<VrTier>) -> Employee {
        let mut employee = Employee::new(
            "emp_001",
            NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        employee.status_vr = status_vr;
        employee
    }

    #[test]
    fn test_minor_below_first_threshold_is_vr0() {
        let settings = Settings::default();
        assert_eq!(classify_vr_tier(dec("6.9"), 20, &settings), VrTier::Vr0);
    }

    #[test]
    fn test_minor_at_threshold_moves_up() {
        let settings = Settings::default();
        assert_eq!(classify_vr_tier(dec("7.0"), 20, &settings), VrTier::Vr1);
        assert_eq!(classify_vr_tier(dec("13"), 20, &settings), VrTier::Vr2);
        assert_eq!(classify_vr_tier(dec("37"), 20, &settings), VrTier::Vr3);
        assert_eq!(classify_vr_tier(dec("61"), 20, &settings), VrTier::Vr4);
    }

    #[test]
    fn test_just_below_each_threshold_stays_down() {
        let settings = Settings::default();
        assert_eq!(classify_vr_tier(dec("12.9"), 20, &settings), VrTier::Vr1);
        assert_eq!(classify_vr_tier(dec("36.9"), 20, &settings), VrTier::Vr2);
        assert_eq!(classify_vr_tier(dec("60.9"), 20, &settings), VrTier::Vr3);
    }

    #[test]
    fn test_highest_configured_tier_is_ceiling() {
        let settings = Settings::default();
        assert_eq!(classify_vr_tier(dec("400"), 40, &settings), VrTier::Vr4);
    }

    #[test]
    fn test_adult_with_no_experience_sits_on_floor() {
        let settings = Settings::default();
        assert_eq!(classify_vr_tier(Decimal::ZERO, 25, &settings), VrTier::Vr1);
        assert_eq!(classify_vr_tier(Decimal::ZERO, 22, &settings), VrTier::Vr1);
    }

    #[test]
    fn test_adult_floor_does_not_cap_higher_tiers() {
        let settings = Settings::default();
        assert_eq!(classify_vr_tier(dec("40"), 30, &settings), VrTier::Vr3);
    }

    #[test]
    fn test_sixth_tier_when_configured() {
        let mut settings = Settings::default();
        settings.vr_thresholds.insert(VrTier::Vr5, dec("121"));

        assert_eq!(classify_vr_tier(dec("120.9"), 30, &settings), VrTier::Vr4);
        assert_eq!(classify_vr_tier(dec("121"), 30, &settings), VrTier::Vr5);
    }

    #[test]
    fn test_below_every_threshold_degrades_to_lowest_tier() {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(VrTier::Vr1, dec("3"));
        thresholds.insert(VrTier::Vr2, dec("12"));
        let settings = Settings {
            vr_thresholds: thresholds,
            ..Settings::default()
        };

        assert_eq!(classify_vr_tier(dec("1"), 18, &settings), VrTier::Vr1);
        // Adult floor is the second configured rung.
        assert_eq!(classify_vr_tier(dec("1"), 30, &settings), VrTier::Vr2);
    }

    #[test]
    fn test_single_tier_table_has_no_floor_step() {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(VrTier::Vr0, Decimal::ZERO);
        let settings = Settings {
            vr_thresholds: thresholds,
            ..Settings::default()
        };

        assert_eq!(classify_vr_tier(dec("50"), 30, &settings), VrTier::Vr0);
    }

    #[test]
    fn test_stored_policy_passes_through_record_tier() {
        let settings = Settings {
            vr_policy: VrPolicy::Stored,
            ..Settings::default()
        };
        let employee = create_test_employee(Some(VrTier::Vr3));

        assert_eq!(
            resolve_vr_tier(&employee, Decimal::ZERO, 20, &settings),
            VrTier::Vr3
        );
    }

    #[test]
    fn test_stored_policy_without_tier_uses_lowest() {
        let settings = Settings {
            vr_policy: VrPolicy::Stored,
            ..Settings::default()
        };
        let employee = create_test_employee(None);

        assert_eq!(
            resolve_vr_tier(&employee, dec("100"), 40, &settings),
            VrTier::Vr0
        );
    }

    #[test]
    fn test_derive_policy_ignores_record_tier() {
        let settings = Settings::default();
        let employee = create_test_employee(Some(VrTier::Vr4));

        assert_eq!(
            resolve_vr_tier(&employee, dec("8"), 20, &settings),
            VrTier::Vr1
        );
    }
}
