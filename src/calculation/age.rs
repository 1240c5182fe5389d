//! Calendar age calculation.

use chrono::{Datelike, NaiveDate};

/// Calculates an age in whole calendar years as of a reference date.
///
/// The year difference is reduced by one when the birthday has not yet been
/// reached in the reference year. A birth date after the reference date
/// yields 0.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::calculate_age;
/// use chrono::NaiveDate;
///
/// let dob = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
/// let day_before = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
///
/// assert_eq!(calculate_age(dob, day_before), 23);
/// assert_eq!(calculate_age(dob, birthday), 24);
/// ```
pub fn calculate_age(date_of_birth: NaiveDate, as_of: NaiveDate) -> u32 {
    let mut age = as_of.year() - date_of_birth.year();
    if (as_of.month(), as_of.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}
