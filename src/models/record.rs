//! Versioned migration of stored employee records.
//!
//! Earlier versions of the dashboard persisted employees in camelCase with
//! field names that changed between releases (`dob` became `dateOfBirth`,
//! `vrRate` became `statusVR`, `name` was split in two). This module maps
//! every known shape onto [`Employee`] once, when records are read, so the
//! calculator never has to guess which field a value lives in.
//!
//! Derived values that old records persisted (`totalMonthsExperience`,
//! `monthsUntilNextRate`, ...) are dropped. They are recomputed on every
//! read.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{Employee, ParseVrTierError, VrTier};

/// The stored shapes an employee record may come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Single `name`, `dob`, `vrRate`, `customData`. Later V2 keys
    /// (`statusVR`, `customFields`) are still honoured when present.
    V1,
    /// Split names, `dateOfBirth`, `statusVR`, `customFields`.
    V2,
    /// The snake_case [`Employee`] shape.
    Current,
}

impl SchemaVersion {
    /// Maps an explicit `schemaVersion` number to a version.
    pub fn from_number(version: u64) -> EngineResult<Self> {
        match version {
            1 => Ok(SchemaVersion::V1),
            2 => Ok(SchemaVersion::V2),
            3 => Ok(SchemaVersion::Current),
            other => Err(EngineError::UnsupportedSchema { version: other }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Languages {
    List(Vec<String>),
    Text(String),
}

impl Languages {
    fn into_vec(self) -> Vec<String> {
        match self {
            Languages::List(list) => list,
            Languages::Text(text) => text
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordV1 {
    id: Option<Value>,
    #[serde(default)]
    name: String,
    dob: Option<String>,
    start_date: Option<String>,
    previous_experience_months: Option<Decimal>,
    gender: Option<String>,
    #[serde(default)]
    country: String,
    languages: Option<Languages>,
    #[serde(default)]
    role: String,
    vr_rate: Option<String>,
    #[serde(rename = "statusVR")]
    status_vr: Option<String>,
    custom_data: Option<BTreeMap<String, Value>>,
    custom_fields: Option<BTreeMap<String, Value>>,
    #[serde(rename = "sickDaysYTD")]
    sick_days_ytd: Option<Decimal>,
    performance_rating: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordV2 {
    id: Option<Value>,
    first_name: Option<String>,
    last_name: Option<String>,
    name: Option<String>,
    date_of_birth: Option<String>,
    dob: Option<String>,
    start_date: Option<String>,
    previous_experience_months: Option<Decimal>,
    gender: Option<String>,
    #[serde(default)]
    country: String,
    languages: Option<Languages>,
    #[serde(default)]
    role: String,
    #[serde(rename = "statusVR")]
    status_vr: Option<String>,
    vr_rate: Option<String>,
    custom_fields: Option<BTreeMap<String, Value>>,
    custom_data: Option<BTreeMap<String, Value>>,
    #[serde(rename = "sickDaysYTD")]
    sick_days_ytd: Option<Decimal>,
    performance_rating: Option<Decimal>,
}

/// Works out which schema a stored record uses.
///
/// An explicit `schemaVersion` wins. Otherwise the version is inferred from
/// the field names present.
///
/// # Example
///
/// ```
/// use experience_engine::models::{detect_schema_version, SchemaVersion};
/// use serde_json::json;
///
/// let record = json!({"name": "Emil Dahl", "dob": "1998-09-04", "startDate": "2022-01-10"});
/// assert_eq!(detect_schema_version(&record).unwrap(), SchemaVersion::V1);
/// ```
pub fn detect_schema_version(record: &Value) -> EngineResult<SchemaVersion> {
    let object = record.as_object().ok_or_else(|| EngineError::InvalidEmployee {
        field: "record".to_string(),
        message: "expected a JSON object".to_string(),
    })?;

    if let Some(version) = object.get("schemaVersion") {
        let number = version.as_u64().ok_or_else(|| EngineError::InvalidEmployee {
            field: "schemaVersion".to_string(),
            message: format!("expected a positive integer, got {}", version),
        })?;
        return SchemaVersion::from_number(number);
    }

    if object.contains_key("date_of_birth") {
        Ok(SchemaVersion::Current)
    } else if object.contains_key("firstName") || object.contains_key("dateOfBirth") {
        Ok(SchemaVersion::V2)
    } else {
        Ok(SchemaVersion::V1)
    }
}

/// Migrates one stored record of any known schema to the current [`Employee`].
///
/// # Errors
///
/// - `InvalidEmployee` when a date is missing or malformed, a tier label is
///   unknown, or the record does not deserialize at all
/// - `UnsupportedSchema` when the record declares an unknown version
///
/// # Example
///
/// ```
/// use experience_engine::models::{migrate_record, VrTier};
/// use serde_json::json;
///
/// let employee = migrate_record(json!({
///     "id": "e1",
///     "name": "Emil Dahl",
///     "dob": "1998-09-04",
///     "startDate": "2022-01-10",
///     "vrRate": "VR2",
///     "totalMonthsExperience": 31.2
/// })).unwrap();
///
/// assert_eq!(employee.first_name, "Emil");
/// assert_eq!(employee.last_name, "Dahl");
/// assert_eq!(employee.status_vr, Some(VrTier::Vr2));
/// ```
pub fn migrate_record(record: Value) -> EngineResult<Employee> {
    let version = detect_schema_version(&record)?;

    let employee = match version {
        SchemaVersion::Current => serde_json::from_value::<Employee>(record).map_err(|e| {
            EngineError::InvalidEmployee {
                field: "record".to_string(),
                message: e.to_string(),
            }
        })?,
        SchemaVersion::V1 => migrate_v1(deserialize_record(record)?)?,
        SchemaVersion::V2 => migrate_v2(deserialize_record(record)?)?,
    };

    if version != SchemaVersion::Current {
        warn!(
            schema = ?version,
            employee_id = %employee.id,
            "Migrated legacy employee record"
        );
    }

    Ok(employee)
}

/// Migrates a batch of stored records, stopping at the first bad one.
pub fn migrate_records(records: Vec<Value>) -> EngineResult<Vec<Employee>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            migrate_record(record).map_err(|err| match err {
                EngineError::InvalidEmployee { field, message } => EngineError::InvalidEmployee {
                    field,
                    message: format!("record {}: {}", index, message),
                },
                other => other,
            })
        })
        .collect()
}

fn deserialize_record<T: serde::de::DeserializeOwned>(record: Value) -> EngineResult<T> {
    serde_json::from_value(record).map_err(|e| EngineError::InvalidEmployee {
        field: "record".to_string(),
        message: e.to_string(),
    })
}

fn migrate_v1(record: RecordV1) -> EngineResult<Employee> {
    let (first_name, last_name) = split_name(&record.name);

    Ok(Employee {
        id: id_or_new(record.id),
        first_name,
        last_name,
        gender: record.gender.unwrap_or_else(|| "Other".to_string()),
        country: record.country,
        languages: record.languages.map(Languages::into_vec).unwrap_or_default(),
        role: record.role,
        date_of_birth: parse_date("date_of_birth", record.dob.as_deref())?,
        start_date: parse_date("start_date", record.start_date.as_deref())?,
        previous_experience_months: record.previous_experience_months.unwrap_or_default(),
        status_vr: parse_tier(record.status_vr.or(record.vr_rate).as_deref())?,
        sick_days_ytd: record.sick_days_ytd.unwrap_or_default(),
        performance_rating: record.performance_rating.unwrap_or(Decimal::from(3)),
        custom_fields: record
            .custom_fields
            .or(record.custom_data)
            .unwrap_or_default(),
    })
}

fn migrate_v2(record: RecordV2) -> EngineResult<Employee> {
    let (first_name, last_name) = match (record.first_name, record.last_name) {
        (Some(first), last) => (first, last.unwrap_or_default()),
        (None, last) => {
            let (first, rest) = split_name(record.name.as_deref().unwrap_or_default());
            (first, last.unwrap_or(rest))
        }
    };
    let date_of_birth = record.date_of_birth.or(record.dob);

    Ok(Employee {
        id: id_or_new(record.id),
        first_name,
        last_name,
        gender: record.gender.unwrap_or_else(|| "Other".to_string()),
        country: record.country,
        languages: record.languages.map(Languages::into_vec).unwrap_or_default(),
        role: record.role,
        date_of_birth: parse_date("date_of_birth", date_of_birth.as_deref())?,
        start_date: parse_date("start_date", record.start_date.as_deref())?,
        previous_experience_months: record.previous_experience_months.unwrap_or_default(),
        status_vr: parse_tier(record.status_vr.or(record.vr_rate).as_deref())?,
        sick_days_ytd: record.sick_days_ytd.unwrap_or_default(),
        performance_rating: record.performance_rating.unwrap_or(Decimal::from(3)),
        custom_fields: record
            .custom_fields
            .or(record.custom_data)
            .unwrap_or_default(),
    })
}

fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    (first, rest)
}

fn id_or_new(id: Option<Value>) -> String {
    match id {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

fn parse_date(field: &str, value: Option<&str>) -> EngineResult<NaiveDate> {
    let raw = value.ok_or_else(|| EngineError::InvalidEmployee {
        field: field.to_string(),
        message: "missing".to_string(),
    })?;

    // Some records stored full ISO timestamps.
    let date_part = raw.split('T').next().unwrap_or(raw).trim();

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| EngineError::InvalidEmployee {
        field: field.to_string(),
        message: format!("'{}' is not an ISO date: {}", raw, e),
    })
}

fn parse_tier(value: Option<&str>) -> EngineResult<Option<VrTier>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label
            .parse()
            .map(Some)
            .map_err(|e: ParseVrTierError| EngineError::InvalidEmployee {
                field: "status_vr".to_string(),
                message: e.to_string(),
            }),
    }
}
