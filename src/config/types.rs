//! Settings types for experience derivation.
//!
//! These structures are deserialized from a YAML settings file and passed
//! explicitly to every calculation. Missing fields fall back to the
//! dashboard defaults.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::VrTier;

/// Where an employee's VR tier comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VrPolicy {
    /// Classify from total experience and age against the threshold table.
    #[default]
    Derive,
    /// Pass through the tier stored on the employee record.
    Stored,
}

/// How the raise window is measured around a milestone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaiseWindowMode {
    /// Absolute distance in days between the reference date and the
    /// milestone's effective calendar date.
    #[default]
    Calendar,
    /// Total experience falls in the band of `raise_window_months` ending at
    /// the milestone's effective month.
    Months,
}

/// Which raise milestones adults skip.
///
/// # Example
///
/// ```
/// use experience_engine::config::MilestoneExclusion;
///
/// assert!(MilestoneExclusion::Exact { months: 6 }.excludes(6));
/// assert!(!MilestoneExclusion::Exact { months: 6 }.excludes(3));
/// assert!(MilestoneExclusion::Below { months: 12 }.excludes(3));
/// assert!(!MilestoneExclusion::Disabled.excludes(6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MilestoneExclusion {
    /// Adults see every milestone.
    #[serde(rename = "none")]
    Disabled,
    /// Adults skip exactly this milestone.
    Exact {
        /// The skipped milestone.
        months: u32,
    },
    /// Adults skip every milestone strictly below this value.
    Below {
        /// The first milestone adults keep.
        months: u32,
    },
}

impl MilestoneExclusion {
    /// Returns true if adults skip `milestone`.
    pub fn excludes(&self, milestone: u32) -> bool {
        match *self {
            MilestoneExclusion::Disabled => false,
            MilestoneExclusion::Exact { months } => milestone == months,
            MilestoneExclusion::Below { months } => milestone < months,
        }
    }
}

impl Default for MilestoneExclusion {
    fn default() -> Self {
        MilestoneExclusion::Exact { months: 6 }
    }
}

/// Settings driving age, tier and raise derivation.
///
/// # Example
///
/// ```
/// use experience_engine::config::Settings;
/// use experience_engine::models::VrTier;
/// use rust_decimal::Decimal;
///
/// let settings = Settings::default();
/// assert_eq!(settings.adult_age_threshold, 22);
/// assert_eq!(settings.vr_thresholds[&VrTier::Vr2], Decimal::from(13));
/// assert_eq!(settings.raise_milestones, vec![6, 12, 36, 60]);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Age from which the adult tier floor and milestone exclusion apply.
    pub adult_age_threshold: u32,
    /// Minimum total experience months required for each tier.
    pub vr_thresholds: BTreeMap<VrTier, Decimal>,
    /// Ascending experience-month values that open a raise window.
    pub raise_milestones: Vec<u32>,
    /// Half-width of the raise window in days.
    pub raise_window_days: u32,
    /// How the raise window is measured.
    pub raise_window_mode: RaiseWindowMode,
    /// Width of the band in [`RaiseWindowMode::Months`].
    pub raise_window_months: Decimal,
    /// Months between reaching a milestone and the raise taking effect.
    pub raise_effective_offset_months: u32,
    /// Where the VR tier comes from.
    pub vr_policy: VrPolicy,
    /// Milestones adults skip.
    pub adult_milestone_exclusion: MilestoneExclusion,
}

impl Default for Settings {
    fn default() -> Self {
        let vr_thresholds = [
            (VrTier::Vr0, 0),
            (VrTier::Vr1, 7),
            (VrTier::Vr2, 13),
            (VrTier::Vr3, 37),
            (VrTier::Vr4, 61),
        ]
        .into_iter()
        .map(|(tier, months)| (tier, Decimal::from(months)))
        .collect();

        Self {
            adult_age_threshold: 22,
            vr_thresholds,
            raise_milestones: vec![6, 12, 36, 60],
            raise_window_days: 15,
            raise_window_mode: RaiseWindowMode::default(),
            raise_window_months: Decimal::new(5, 1),
            raise_effective_offset_months: 0,
            vr_policy: VrPolicy::default(),
            adult_milestone_exclusion: MilestoneExclusion::default(),
        }
    }
}

impl Settings {
    /// Checks the invariants the calculator relies on.
    ///
    /// - the tier table is not empty
    /// - thresholds are non-negative and non-decreasing along the ladder
    /// - milestones are strictly ascending
    /// - the months-mode band width is non-negative
    pub fn validate(&self) -> EngineResult<()> {
        if self.vr_thresholds.is_empty() {
            return Err(invalid("vr_thresholds", "at least one tier is required"));
        }

        let mut previous: Option<(VrTier, Decimal)> = None;
        for (&tier, &months) in &self.vr_thresholds {
            if months.is_sign_negative() {
                return Err(invalid(
                    "vr_thresholds",
                    &format!("{} threshold {} is negative", tier, months),
                ));
            }
            if let Some((prev_tier, prev_months)) = previous {
                if months < prev_months {
                    return Err(invalid(
                        "vr_thresholds",
                        &format!(
                            "{} threshold {} is below {} threshold {}",
                            tier, months, prev_tier, prev_months
                        ),
                    ));
                }
            }
            previous = Some((tier, months));
        }

        if self.raise_milestones.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid(
                "raise_milestones",
                "milestones must be strictly ascending",
            ));
        }

        if self.raise_window_months < Decimal::ZERO {
            return Err(invalid(
                "raise_window_months",
                &format!("band width {} is negative", self.raise_window_months),
            ));
        }

        Ok(())
    }

    /// Returns true if an employee of `age` counts as an adult.
    pub fn is_adult(&self, age: u32) -> bool {
        age >= self.adult_age_threshold
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidSettings {
        field: field.to_string(),
        message: message.to_string(),
    }
}
