//! Workforce-level aggregation of derived statistics.
//!
//! Feeds the dashboard cards and charts: headcount, averages, and the tier,
//! age, performance and language distributions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::{Employee, VrTier};

use super::derive::derive_employee_stats;
use super::experience::round_months;

/// Age bands used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    /// Younger than 22.
    #[serde(rename = "<22")]
    Under22,
    /// 22 to 29.
    #[serde(rename = "22-29")]
    From22To29,
    /// 30 to 39.
    #[serde(rename = "30-39")]
    From30To39,
    /// 40 to 49.
    #[serde(rename = "40-49")]
    From40To49,
    /// 50 and older.
    #[serde(rename = "50+")]
    From50,
}

impl AgeBucket {
    /// Every bucket, youngest first.
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Under22,
        AgeBucket::From22To29,
        AgeBucket::From30To39,
        AgeBucket::From40To49,
        AgeBucket::From50,
    ];

    /// Returns the bucket for an age.
    pub fn for_age(age: u32) -> AgeBucket {
        match age {
            0..=21 => AgeBucket::Under22,
            22..=29 => AgeBucket::From22To29,
            30..=39 => AgeBucket::From30To39,
            40..=49 => AgeBucket::From40To49,
            _ => AgeBucket::From50,
        }
    }
}

/// Aggregate statistics over a set of employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkforceSummary {
    /// Number of employees summarized.
    pub total_employees: usize,
    /// Mean age, one decimal place.
    pub average_age: Decimal,
    /// Mean tenure in months (without prior experience), one decimal place.
    pub average_tenure_months: Decimal,
    /// Headcount per tier; every tier is present.
    pub vr_distribution: BTreeMap<VrTier, u32>,
    /// Headcount per age band; every band is present.
    pub age_buckets: BTreeMap<AgeBucket, u32>,
    /// Headcount per performance rating 1 to 5; every rating is present.
    pub performance_distribution: BTreeMap<u8, u32>,
    /// Mean sick days taken this year, one decimal place.
    pub average_sick_days: Decimal,
    /// Speakers per language.
    pub language_distribution: BTreeMap<String, u32>,
    /// Employees currently inside a raise window.
    pub raise_window_count: u32,
}

/// Buckets a performance rating into 1..=5.
///
/// Ratings are rounded half away from zero and clamped; an unset (zero)
/// rating counts as the default 3.
pub fn performance_bucket(rating: Decimal) -> u8 {
    if rating.is_zero() {
        return 3;
    }
    rating
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .max(Decimal::ONE)
        .min(Decimal::from(5))
        .to_u8()
        .unwrap_or(3)
}

/// Summarizes a workforce as of a reference date.
///
/// An empty slice yields zero averages and zero-filled distributions.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::summarize_workforce;
/// use experience_engine::config::Settings;
/// use experience_engine::models::VrTier;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let as_of = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let summary = summarize_workforce(&[], &Settings::default(), as_of);
///
/// assert_eq!(summary.total_employees, 0);
/// assert_eq!(summary.average_age, Decimal::ZERO);
/// assert_eq!(summary.vr_distribution[&VrTier::Vr5], 0);
/// ```
pub fn summarize_workforce(
    employees: &[Employee],
    settings: &Settings,
    as_of: NaiveDate,
) -> WorkforceSummary {
    let mut vr_distribution: BTreeMap<VrTier, u32> =
        VrTier::ALL.into_iter().map(|t| (t, 0)).collect();
    let mut age_buckets: BTreeMap<AgeBucket, u32> =
        AgeBucket::ALL.into_iter().map(|b| (b, 0)).collect();
    let mut performance_distribution: BTreeMap<u8, u32> = (1..=5).map(|r| (r, 0)).collect();
    let mut language_distribution = BTreeMap::new();
    let mut raise_window_count = 0;
    let mut age_sum = Decimal::ZERO;
    let mut tenure_sum = Decimal::ZERO;
    let mut sick_days_sum = Decimal::ZERO;

    for employee in employees {
        let stats = derive_employee_stats(employee, settings, Some(as_of));

        age_sum += Decimal::from(stats.age);
        tenure_sum += stats.tenure_months;
        sick_days_sum = sick_days_sum.saturating_add(employee.sick_days_ytd);
        *vr_distribution.entry(stats.status_vr).or_insert(0) += 1;
        *age_buckets.entry(AgeBucket::for_age(stats.age)).or_insert(0) += 1;
        *performance_distribution
            .entry(performance_bucket(employee.performance_rating))
            .or_insert(0) += 1;
        if stats.in_raise_window {
            raise_window_count += 1;
        }

        for language in &employee.languages {
            let language = language.trim();
            if !language.is_empty() {
                *language_distribution.entry(language.to_string()).or_insert(0) += 1;
            }
        }
    }

    WorkforceSummary {
        total_employees: employees.len(),
        average_age: average(age_sum, employees.len()),
        average_tenure_months: average(tenure_sum, employees.len()),
        vr_distribution,
        age_buckets,
        performance_distribution,
        average_sick_days: average(sick_days_sum, employees.len()),
        language_distribution,
        raise_window_count,
    }
}

fn average(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    round_months(sum / Decimal::from(count))
}
