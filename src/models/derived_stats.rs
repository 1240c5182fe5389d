//! Derived employee statistics and the audit trail that explains them.
//!
//! Everything in this module is recomputed on every read. None of it is a
//! source of truth for persistence.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, VrTier};

/// The fields derived for one employee as of a reference date.
///
/// # Example
///
/// ```
/// use experience_engine::models::{DerivedStats, VrTier};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let stats = DerivedStats {
///     as_of: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     age: 24,
///     total_days_worked: 182,
///     tenure_months: Decimal::new(60, 1),
///     total_experience_months: Decimal::new(60, 1),
///     status_vr: VrTier::Vr1,
///     in_raise_window: false,
///     months_to_next_raise: Some(Decimal::new(60, 1)),
///     next_milestone: Some(12),
/// };
/// assert_eq!(stats.status_vr, VrTier::Vr1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    /// The reference date the values were computed for.
    pub as_of: NaiveDate,
    /// Age in whole calendar years.
    pub age: u32,
    /// Whole days since the start date, never negative.
    pub total_days_worked: i64,
    /// Months since the start date, one decimal place.
    pub tenure_months: Decimal,
    /// Tenure plus prior experience, one decimal place.
    pub total_experience_months: Decimal,
    /// Current VR tier, derived or stored depending on policy.
    pub status_vr: VrTier,
    /// Whether the employee is due for a compensation review.
    pub in_raise_window: bool,
    /// Months until the next unmet milestone, `None` once all are passed.
    pub months_to_next_raise: Option<Decimal>,
    /// The next unmet milestone, `None` once all are passed.
    pub next_milestone: Option<u32>,
}

/// An employee merged with its derived statistics into one view model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEmployee {
    /// The stored record.
    #[serde(flatten)]
    pub employee: Employee,
    /// Values derived from it.
    #[serde(flatten)]
    pub stats: DerivedStats,
}

/// A single step in the audit trace recording a derivation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The ordered audit trace for one derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of derivation steps.
    pub steps: Vec<AuditStep>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the last one.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Finds the first step recorded for a rule.
    pub fn step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.steps.iter().find(|s| s.rule_id == rule_id)
    }
}
