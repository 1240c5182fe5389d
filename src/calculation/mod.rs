//! Calculation logic for the experience engine.
//!
//! This module contains the pure derivation functions: calendar age, tenure
//! and total experience months, VR tier classification, raise window
//! evaluation, next milestone lookup, the combined per-employee derivation,
//! and workforce aggregation for the dashboard.

mod age;
mod derive;
mod experience;
mod next_milestone;
mod raise_window;
mod vr_classification;
mod workforce;

pub use age::calculate_age;
pub use derive::{derive_employee_stats, derive_employee_stats_traced, enrich_employee, today};
pub use experience::{
    AVERAGE_DAYS_PER_MONTH, calculate_days_worked, calculate_experience_months,
    calculate_tenure_months, round_months,
};
pub use next_milestone::{NextMilestone, next_milestone};
pub use raise_window::{evaluate_raise_window, milestone_effective_date, relevant_milestones};
pub use vr_classification::{classify_vr_tier, resolve_vr_tier};
pub use workforce::{AgeBucket, WorkforceSummary, performance_bucket, summarize_workforce};
