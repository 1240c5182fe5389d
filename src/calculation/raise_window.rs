//! Raise window evaluation.
//!
//! A raise window is open while the reference date sits close enough to a
//! milestone's effective date. Adults skip the milestones named by the
//! configured [`MilestoneExclusion`](crate::config::MilestoneExclusion).

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::{RaiseWindowMode, Settings};

use super::experience::AVERAGE_DAYS_PER_MONTH;

/// Returns the milestones that apply to an employee of `age`, ascending.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::relevant_milestones;
/// use experience_engine::config::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(relevant_milestones(20, &settings), vec![6, 12, 36, 60]);
/// assert_eq!(relevant_milestones(30, &settings), vec![12, 36, 60]);
/// ```
pub fn relevant_milestones(age: u32, settings: &Settings) -> Vec<u32> {
    let adult = settings.is_adult(age);
    settings
        .raise_milestones
        .iter()
        .copied()
        .filter(|m| !(adult && settings.adult_milestone_exclusion.excludes(*m)))
        .collect()
}

/// Returns the calendar date on which a milestone takes effect.
///
/// The employee reaches `milestone + offset_months` total months once
/// `milestone + offset_months - previous_experience_months` months have
/// passed since `start_date`. Whole months are added on the calendar (the
/// day is clamped to the end of shorter months); a fractional remainder is
/// converted to days using the average month length. When prior experience
/// already exceeds the milestone the date lies before `start_date`.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::milestone_effective_date;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(
///     milestone_effective_date(start, Decimal::ZERO, 6, 0),
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
/// );
/// assert_eq!(
///     milestone_effective_date(start, Decimal::from(2), 6, 1),
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
/// );
/// ```
pub fn milestone_effective_date(
    start_date: NaiveDate,
    previous_experience_months: Decimal,
    milestone: u32,
    offset_months: u32,
) -> NaiveDate {
    let months = Decimal::from(milestone) + Decimal::from(offset_months)
        - previous_experience_months.max(Decimal::ZERO);
    let forward = !months.is_sign_negative();
    let months = months.abs();

    let whole = months.trunc();
    let fraction_days = ((months - whole) * AVERAGE_DAYS_PER_MONTH)
        .round()
        .to_u64()
        .unwrap_or(0);
    let whole = whole.to_u32().unwrap_or(u32::MAX);

    let shifted = if forward {
        start_date
            .checked_add_months(Months::new(whole))
            .and_then(|d| d.checked_add_days(Days::new(fraction_days)))
    } else {
        start_date
            .checked_sub_months(Months::new(whole))
            .and_then(|d| d.checked_sub_days(Days::new(fraction_days)))
    };

    shifted.unwrap_or(if forward { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Evaluates whether an employee is inside a raise window.
///
/// In [`RaiseWindowMode::Calendar`] the window is open when the reference
/// date lies within `raise_window_days` (inclusive) of any relevant
/// milestone's effective date, before or after it. In
/// [`RaiseWindowMode::Months`] it is open when total experience lies in
/// `[effective - raise_window_months, effective]`, both ends inclusive.
///
/// A window may be open for a milestone that has just been passed, so this
/// can be true while the next milestone is already a later one.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::evaluate_raise_window;
/// use experience_engine::config::Settings;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let settings = Settings::default();
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
///
/// // 11 days before the six month mark.
/// assert!(evaluate_raise_window(Decimal::new(56, 1), 20, &settings, start, Decimal::ZERO, as_of));
/// ```
pub fn evaluate_raise_window(
    total_experience_months: Decimal,
    age: u32,
    settings: &Settings,
    start_date: NaiveDate,
    previous_experience_months: Decimal,
    as_of: NaiveDate,
) -> bool {
    let milestones = relevant_milestones(age, settings);
    let offset = settings.raise_effective_offset_months;

    match settings.raise_window_mode {
        RaiseWindowMode::Calendar => {
            let window_days = i64::from(settings.raise_window_days);
            milestones.into_iter().any(|milestone| {
                let effective = milestone_effective_date(
                    start_date,
                    previous_experience_months,
                    milestone,
                    offset,
                );
                (effective - as_of).num_days().abs() <= window_days
            })
        }
        RaiseWindowMode::Months => {
            let window_months = settings.raise_window_months;
            milestones.into_iter().any(|milestone| {
                let effective_month = Decimal::from(milestone) + Decimal::from(offset);
                total_experience_months >= effective_month - window_months
                    && total_experience_months <= effective_month
            })
        }
    }
}
