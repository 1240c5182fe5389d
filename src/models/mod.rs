//! Core data models for the experience engine.
//!
//! This module contains the employee record, the VR tier ladder, the derived
//! statistics and the migration of stored records from earlier schemas.

mod derived_stats;
mod employee;
mod record;
mod vr_tier;

pub use derived_stats::{AuditStep, AuditTrace, DerivedStats, EnrichedEmployee};
pub use employee::Employee;
pub use record::{SchemaVersion, detect_schema_version, migrate_record, migrate_records};
pub use vr_tier::{ParseVrTierError, VrTier};
