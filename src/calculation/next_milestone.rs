//! Next raise milestone lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Settings;

use super::experience::round_months;
use super::raise_window::relevant_milestones;

/// The next unmet milestone and the months remaining until it.
///
/// Both fields are `None` once every relevant milestone has been passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextMilestone {
    /// Months remaining, rounded to one decimal place.
    pub months: Option<Decimal>,
    /// The milestone itself.
    pub milestone: Option<u32>,
}

impl NextMilestone {
    /// The result once all milestones are behind the employee.
    pub const NONE: NextMilestone = NextMilestone {
        months: None,
        milestone: None,
    };
}

/// Finds the first relevant milestone strictly above total experience.
///
/// The same adult exclusion used for raise windows applies here.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::{next_milestone, NextMilestone};
/// use experience_engine::config::Settings;
/// use rust_decimal::Decimal;
///
/// let settings = Settings::default();
///
/// let next = next_milestone(Decimal::new(45, 1), 20, &settings);
/// assert_eq!(next.milestone, Some(6));
/// assert_eq!(next.months, Some(Decimal::new(15, 1)));
///
/// assert_eq!(next_milestone(Decimal::from(61), 20, &settings), NextMilestone::NONE);
/// ```
pub fn next_milestone(
    total_experience_months: Decimal,
    age: u32,
    settings: &Settings,
) -> NextMilestone {
    relevant_milestones(age, settings)
        .into_iter()
        .find(|m| Decimal::from(*m) > total_experience_months)
        .map(|m| NextMilestone {
            months: Some(round_months(Decimal::from(m) - total_experience_months)),
            milestone: Some(m),
        })
        .unwrap_or(NextMilestone::NONE)
}
