//! Experience Engine for HR employee records
//!
//! This crate derives age, tenure, total experience, VR tier, raise window
//! status and the next raise milestone for employees, driven by an explicit
//! settings value. Derivations are pure functions of the employee, the
//! settings and a reference date.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
