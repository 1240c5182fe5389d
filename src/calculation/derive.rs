//! Full derivation of an employee's statistics.
//!
//! This is the entry point callers use on every read: it runs age, tenure,
//! tier, raise window and next milestone for one employee against one
//! settings value and one reference date. Identical inputs always produce
//! identical output.

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::config::{Settings, VrPolicy};
use crate::models::{AuditTrace, DerivedStats, Employee, EnrichedEmployee};

use super::age::calculate_age;
use super::experience::{
    AVERAGE_DAYS_PER_MONTH, calculate_days_worked, calculate_experience_months,
    calculate_tenure_months,
};
use super::next_milestone::next_milestone;
use super::raise_window::{evaluate_raise_window, relevant_milestones};
use super::vr_classification::resolve_vr_tier;

/// Returns today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Derives every statistic for an employee.
///
/// `as_of` defaults to [`today`] when `None`. Pass an explicit date for
/// reproducible results.
///
/// # Examples
///
/// ```
/// use experience_engine::calculation::derive_employee_stats;
/// use experience_engine::config::Settings;
/// use experience_engine::models::{Employee, VrTier};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2004, 3, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// );
/// let as_of = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
///
/// let stats = derive_employee_stats(&employee, &Settings::default(), Some(as_of));
/// assert_eq!(stats.age, 20);
/// assert_eq!(stats.total_experience_months, Decimal::new(60, 1));
/// assert_eq!(stats.status_vr, VrTier::Vr0);
/// assert!(stats.in_raise_window);
/// assert_eq!(stats.next_milestone, Some(12));
/// ```
pub fn derive_employee_stats(
    employee: &Employee,
    settings: &Settings,
    as_of: Option<NaiveDate>,
) -> DerivedStats {
    let as_of = as_of.unwrap_or_else(today);

    let age = calculate_age(employee.date_of_birth, as_of);
    let total_days_worked = calculate_days_worked(employee.start_date, as_of);
    let tenure_months = calculate_tenure_months(employee.start_date, as_of);
    let total_experience_months = calculate_experience_months(
        employee.start_date,
        employee.previous_experience_months,
        as_of,
    );
    let status_vr = resolve_vr_tier(employee, total_experience_months, age, settings);
    let in_raise_window = evaluate_raise_window(
        total_experience_months,
        age,
        settings,
        employee.start_date,
        employee.previous_experience_months,
        as_of,
    );
    let next = next_milestone(total_experience_months, age, settings);

    debug!(
        employee_id = %employee.id,
        as_of = %as_of,
        age,
        total_experience_months = %total_experience_months,
        status_vr = %status_vr,
        in_raise_window,
        next_milestone = ?next.milestone,
        "Derived employee stats"
    );

    DerivedStats {
        as_of,
        age,
        total_days_worked,
        tenure_months,
        total_experience_months,
        status_vr,
        in_raise_window,
        months_to_next_raise: next.months,
        next_milestone: next.milestone,
    }
}

/// Derives statistics and an audit trace explaining each value.
pub fn derive_employee_stats_traced(
    employee: &Employee,
    settings: &Settings,
    as_of: Option<NaiveDate>,
) -> (DerivedStats, AuditTrace) {
    let stats = derive_employee_stats(employee, settings, as_of);
    let mut trace = AuditTrace::default();

    trace.record(
        "age",
        "Calendar Age",
        serde_json::json!({
            "date_of_birth": employee.date_of_birth.to_string(),
            "as_of": stats.as_of.to_string()
        }),
        serde_json::json!({ "age": stats.age }),
        format!(
            "Born {}, {} full years as of {}",
            employee.date_of_birth, stats.age, stats.as_of
        ),
    );

    trace.record(
        "experience_months",
        "Total Experience",
        serde_json::json!({
            "start_date": employee.start_date.to_string(),
            "previous_experience_months": employee.previous_experience_months.to_string(),
            "days_per_month": AVERAGE_DAYS_PER_MONTH.to_string()
        }),
        serde_json::json!({
            "total_days_worked": stats.total_days_worked,
            "tenure_months": stats.tenure_months.to_string(),
            "total_experience_months": stats.total_experience_months.to_string()
        }),
        format!(
            "{} days / {} + {} prior = {} months",
            stats.total_days_worked,
            AVERAGE_DAYS_PER_MONTH,
            employee.previous_experience_months,
            stats.total_experience_months
        ),
    );

    let adult = settings.is_adult(stats.age);
    let tier_reasoning = match settings.vr_policy {
        VrPolicy::Derive => format!(
            "{} months, age {} ({}): classified {}",
            stats.total_experience_months,
            stats.age,
            if adult { "adult floor applies" } else { "full ladder" },
            stats.status_vr
        ),
        VrPolicy::Stored => match employee.status_vr {
            Some(tier) => format!("Stored tier {} passed through", tier),
            None => format!("No stored tier, defaulted to {}", stats.status_vr),
        },
    };
    trace.record(
        "vr_tier",
        "VR Tier",
        serde_json::json!({
            "policy": settings.vr_policy,
            "total_experience_months": stats.total_experience_months.to_string(),
            "age": stats.age,
            "adult_age_threshold": settings.adult_age_threshold
        }),
        serde_json::json!({ "status_vr": stats.status_vr }),
        tier_reasoning,
    );

    let milestones = relevant_milestones(stats.age, settings);
    trace.record(
        "raise_window",
        "Raise Window",
        serde_json::json!({
            "mode": settings.raise_window_mode,
            "milestones": milestones,
            "raise_window_days": settings.raise_window_days,
            "effective_offset_months": settings.raise_effective_offset_months
        }),
        serde_json::json!({ "in_raise_window": stats.in_raise_window }),
        if stats.in_raise_window {
            format!(
                "Within {} days of a milestone in {:?}",
                settings.raise_window_days, milestones
            )
        } else {
            format!(
                "Not within {} days of any milestone in {:?}",
                settings.raise_window_days, milestones
            )
        },
    );

    trace.record(
        "next_milestone",
        "Next Milestone",
        serde_json::json!({
            "total_experience_months": stats.total_experience_months.to_string(),
            "milestones": milestones
        }),
        serde_json::json!({
            "next_milestone": stats.next_milestone,
            "months_to_next_raise": stats.months_to_next_raise.map(|m| m.to_string())
        }),
        match (stats.next_milestone, stats.months_to_next_raise) {
            (Some(milestone), Some(months)) => {
                format!("{} months until the {} month milestone", months, milestone)
            }
            _ => "All milestones passed".to_string(),
        },
    );

    (stats, trace)
}

/// Merges an employee with its derived statistics into one view model.
pub fn enrich_employee(
    employee: &Employee,
    settings: &Settings,
    as_of: Option<NaiveDate>,
) -> EnrichedEmployee {
    EnrichedEmployee {
        employee: employee.clone(),
        stats: derive_employee_stats(employee, settings, as_of),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VrTier;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(dob: NaiveDate, start: NaiveDate, previous: &str) -> Employee {
        let mut employee = Employee::new("emp_001", dob, start);
        employee.previous_experience_months = dec(previous);
        employee
    }

    #[test]
    fn test_minor_at_six_month_mark() {
        let employee = create_test_employee(date(2005, 1, 1), date(2024, 1, 1), "0");
        let stats = derive_employee_stats(&employee, &Settings::default(), Some(date(2024, 7, 1)));

        assert_eq!(stats.age, 19);
        assert_eq!(stats.total_days_worked, 182);
        assert_eq!(stats.tenure_months, dec("6.0"));
        assert_eq!(stats.total_experience_months, dec("6.0"));
        assert_eq!(stats.status_vr, VrTier::Vr0);
        assert!(stats.in_raise_window);
        assert_eq!(stats.next_milestone, Some(12));
        assert_eq!(stats.months_to_next_raise, Some(dec("6.0")));
    }

    #[test]
    fn test_adult_at_six_month_mark_has_no_window() {
        let employee = create_test_employee(date(1990, 1, 1), date(2024, 1, 1), "0");
        let stats = derive_employee_stats(&employee, &Settings::default(), Some(date(2024, 7, 1)));

        assert_eq!(stats.status_vr, VrTier::Vr1);
        assert!(!stats.in_raise_window);
        assert_eq!(stats.next_milestone, Some(12));
    }

    #[test]
    fn test_prior_experience_raises_tier_but_not_tenure() {
        let employee = create_test_employee(date(1990, 1, 1), date(2024, 1, 1), "36");
        let stats = derive_employee_stats(&employee, &Settings::default(), Some(date(2024, 7, 1)));

        assert_eq!(stats.tenure_months, dec("6.0"));
        assert_eq!(stats.total_experience_months, dec("42.0"));
        assert_eq!(stats.status_vr, VrTier::Vr3);
        assert_eq!(stats.next_milestone, Some(60));
        assert_eq!(stats.months_to_next_raise, Some(dec("18.0")));
    }

    #[test]
    fn test_veteran_has_no_next_milestone() {
        let employee = create_test_employee(date(1970, 5, 5), date(2010, 1, 1), "0");
        let stats = derive_employee_stats(&employee, &Settings::default(), Some(date(2024, 7, 1)));

        assert_eq!(stats.status_vr, VrTier::Vr4);
        assert_eq!(stats.next_milestone, None);
        assert_eq!(stats.months_to_next_raise, None);
        assert!(!stats.in_raise_window);
    }

    #[test]
    fn test_future_start_date_degrades_to_zero() {
        let employee = create_test_employee(date(2010, 1, 1), date(2030, 1, 1), "0");
        let stats = derive_employee_stats(&employee, &Settings::default(), Some(date(2024, 1, 1)));

        assert_eq!(stats.total_days_worked, 0);
        assert_eq!(stats.total_experience_months, Decimal::ZERO);
        assert_eq!(stats.status_vr, VrTier::Vr0);
        assert_eq!(stats.next_milestone, Some(6));
    }

    #[test]
    fn test_stored_policy_uses_record_tier() {
        let mut employee = create_test_employee(date(1990, 1, 1), date(2024, 1, 1), "0");
        employee.status_vr = Some(VrTier::Vr4);
        let settings = Settings {
            vr_policy: VrPolicy::Stored,
            ..Settings::default()
        };

        let stats = derive_employee_stats(&employee, &settings, Some(date(2024, 7, 1)));
        assert_eq!(stats.status_vr, VrTier::Vr4);
    }

    #[test]
    fn test_same_inputs_give_identical_output() {
        let employee = create_test_employee(date(1999, 2, 3), date(2021, 9, 14), "4.4");
        let settings = Settings::default();
        let as_of = Some(date(2024, 11, 30));

        let first = derive_employee_stats(&employee, &settings, as_of);
        let second = derive_employee_stats(&employee, &settings, as_of);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_missing_as_of_uses_today() {
        let employee = create_test_employee(date(1999, 2, 3), date(2021, 9, 14), "0");
        let stats = derive_employee_stats(&employee, &Settings::default(), None);
        let now = today();

        // Guard against the date rolling over between the two calls.
        assert!(stats.as_of == now || stats.as_of.succ_opt() == Some(now));
    }

    #[test]
    fn test_trace_records_every_rule_in_order() {
        let employee = create_test_employee(date(2005, 1, 1), date(2024, 1, 1), "0");
        let (stats, trace) =
            derive_employee_stats_traced(&employee, &Settings::default(), Some(date(2024, 7, 1)));

        let rule_ids: Vec<&str> = trace.steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec!["age", "experience_months", "vr_tier", "raise_window", "next_milestone"]
        );
        assert_eq!(trace.steps[4].step_number, 5);

        let tier_step = trace.step("vr_tier").unwrap();
        assert_eq!(tier_step.output["status_vr"], "VR0");
        assert_eq!(tier_step.input["policy"], "derive");
        assert!(tier_step.reasoning.contains("full ladder"));

        let raise_step = trace.step("raise_window").unwrap();
        assert_eq!(raise_step.output["in_raise_window"], stats.in_raise_window);

        let next_step = trace.step("next_milestone").unwrap();
        assert_eq!(next_step.output["next_milestone"], 12);
        assert!(next_step.reasoning.contains("12 month milestone"));
    }

    #[test]
    fn test_trace_matches_untraced_stats() {
        let employee = create_test_employee(date(1988, 8, 8), date(2019, 4, 1), "7.5");
        let settings = Settings::default();
        let as_of = Some(date(2024, 7, 1));

        let (traced, _) = derive_employee_stats_traced(&employee, &settings, as_of);
        assert_eq!(traced, derive_employee_stats(&employee, &settings, as_of));
    }

    #[test]
    fn test_trace_for_passed_milestones() {
        let employee = create_test_employee(date(1970, 5, 5), date(2010, 1, 1), "0");
        let (_, trace) =
            derive_employee_stats_traced(&employee, &Settings::default(), Some(date(2024, 7, 1)));

        assert_eq!(
            trace.step("next_milestone").unwrap().reasoning,
            "All milestones passed"
        );
    }

    #[test]
    fn test_enrich_employee_keeps_record_fields() {
        let mut employee = create_test_employee(date(2005, 1, 1), date(2024, 1, 1), "0");
        employee.country = "Norway".to_string();

        let enriched = enrich_employee(&employee, &Settings::default(), Some(date(2024, 7, 1)));
        assert_eq!(enriched.employee, employee);
        assert_eq!(enriched.stats.age, 19);
    }
}
