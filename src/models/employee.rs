//! Employee model.
//!
//! The calculator reads only the two dates, the prior experience credit and
//! (under the stored VR policy) `status_vr`. Everything else is carried
//! through untouched for the surrounding application.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::VrTier;

fn default_gender() -> String {
    "Other".to_string()
}

fn default_performance_rating() -> Decimal {
    Decimal::from(3)
}

/// Represents an employee record in the current schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Free-form gender label.
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Country of origin.
    #[serde(default)]
    pub country: String,
    /// Spoken languages.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Job role.
    #[serde(default)]
    pub role: String,
    /// The employee's date of birth.
    pub date_of_birth: NaiveDate,
    /// The date the employee started employment.
    pub start_date: NaiveDate,
    /// Months of experience credited from prior employment.
    #[serde(default)]
    pub previous_experience_months: Decimal,
    /// Explicitly stored VR tier, read only under the
    /// [`VrPolicy::Stored`](crate::config::VrPolicy::Stored) policy.
    #[serde(default)]
    pub status_vr: Option<VrTier>,
    /// Sick days taken in the current year.
    #[serde(default)]
    pub sick_days_ytd: Decimal,
    /// Performance rating on a 1-5 scale.
    #[serde(default = "default_performance_rating")]
    pub performance_rating: Decimal,
    /// User-defined columns.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

impl Employee {
    /// Creates an employee with only the fields the calculator needs.
    ///
    /// # Examples
    ///
    /// ```
    /// use experience_engine::models::Employee;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new(
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2000, 6, 15).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    /// );
    /// assert_eq!(employee.previous_experience_months, Decimal::ZERO);
    /// assert_eq!(employee.gender, "Other");
    /// ```
    pub fn new(id: impl Into<String>, date_of_birth: NaiveDate, start_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            gender: default_gender(),
            country: String::new(),
            languages: Vec::new(),
            role: String::new(),
            date_of_birth,
            start_date,
            previous_experience_months: Decimal::ZERO,
            status_vr: None,
            sick_days_ytd: Decimal::ZERO,
            performance_rating: default_performance_rating(),
            custom_fields: BTreeMap::new(),
        }
    }

    /// Returns the display name, `"First Last"` trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        let mut employee = Employee::new(
            "emp_001",
            NaiveDate::from_ymd_opt(1990, 1, 16).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        );
        employee.first_name = "Anthony".to_string();
        employee.last_name = "Cole".to_string();
        employee
    }

    #[test]
    fn test_deserialize_minimal_employee_fills_defaults() {
        let json = r#"{
            "id": "emp_001",
            "date_of_birth": "1990-01-16",
            "start_date": "2023-06-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(
            employee.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 16).unwrap()
        );
        assert_eq!(employee.previous_experience_months, Decimal::ZERO);
        assert_eq!(employee.gender, "Other");
        assert!(employee.status_vr.is_none());
        assert!(employee.languages.is_empty());
        assert_eq!(employee.sick_days_ytd, Decimal::ZERO);
        assert_eq!(employee.performance_rating, Decimal::from(3));
    }

    #[test]
    fn test_deserialize_full_employee() {
        let json = r#"{
            "id": "emp_002",
            "first_name": "Alina",
            "last_name": "Berg",
            "gender": "Female",
            "country": "Iceland",
            "languages": ["Icelandic", "English"],
            "role": "Support",
            "date_of_birth": "2002-06-20",
            "start_date": "2024-02-01",
            "previous_experience_months": "4.5",
            "status_vr": "VR2",
            "sick_days_ytd": 4,
            "performance_rating": 5,
            "custom_fields": {"shoe_size": 38}
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.previous_experience_months, Decimal::new(45, 1));
        assert_eq!(employee.status_vr, Some(VrTier::Vr2));
        assert_eq!(employee.languages, vec!["Icelandic", "English"]);
        assert_eq!(employee.sick_days_ytd, Decimal::from(4));
        assert_eq!(employee.performance_rating, Decimal::from(5));
        assert_eq!(employee.custom_fields["shoe_size"], serde_json::json!(38));
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let json = r#"{
            "id": "emp_003",
            "date_of_birth": "1990-13-40",
            "start_date": "2023-06-01"
        }"#;

        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn test_serialize_employee() {
        let employee = create_test_employee();
        let json = serde_json::to_string(&employee).unwrap();

        let deserialized: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(employee, deserialized);
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        let mut employee = create_test_employee();
        assert_eq!(employee.full_name(), "Anthony Cole");

        employee.last_name.clear();
        assert_eq!(employee.full_name(), "Anthony");
    }
}
