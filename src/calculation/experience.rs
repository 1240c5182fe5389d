//! Tenure and total experience calculation.
//!
//! Months are counted as elapsed days divided by an average Gregorian month
//! length of 30.437 days, then rounded to one decimal place. Keep the constant:
//! calendar-accurate month arithmetic gives different figures.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Average Gregorian month length in days (30.437).
pub const AVERAGE_DAYS_PER_MONTH: Decimal = Decimal::from_parts(30437, 0, 0, false, 3);

/// Rounds a month quantity to one decimal place, halves away from zero.
pub fn round_months(months: Decimal) -> Decimal {
    months.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the whole days from `start_date` to `as_of`, clamped at 0.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::calculate_days_worked;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(calculate_days_worked(start, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()), 30);
/// assert_eq!(calculate_days_worked(start, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()), 0);
/// ```
pub fn calculate_days_worked(start_date: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - start_date).num_days().max(0)
}

/// Returns the months since `start_date`, without prior experience.
pub fn calculate_tenure_months(start_date: NaiveDate, as_of: NaiveDate) -> Decimal {
    calculate_experience_months(start_date, Decimal::ZERO, as_of)
}

/// Calculates total experience in months as of a reference date.
///
/// Elapsed days since `start_date` (never negative) are divided by
/// [`AVERAGE_DAYS_PER_MONTH`], prior experience is added, and the sum is
/// rounded to one decimal place. Negative prior experience counts as zero.
///
/// The result never decreases as `as_of` advances.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::calculate_experience_months;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let as_of = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
///
/// // 182 days / 30.437 = 5.979...
/// assert_eq!(calculate_experience_months(start, Decimal::ZERO, as_of), Decimal::new(60, 1));
/// assert_eq!(calculate_experience_months(start, Decimal::from(12), as_of), Decimal::new(180, 1));
/// ```
pub fn calculate_experience_months(
    start_date: NaiveDate,
    previous_experience_months: Decimal,
    as_of: NaiveDate,
) -> Decimal {
    let days = Decimal::from(calculate_days_worked(start_date, as_of));
    let tenure = days / AVERAGE_DAYS_PER_MONTH;
    round_months(tenure.saturating_add(previous_experience_months.max(Decimal::ZERO)))
}
