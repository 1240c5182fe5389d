//! Error types for the experience engine.
//!
//! Errors only arise at the boundaries of the engine: loading settings and
//! migrating stored employee records. The calculation functions themselves
//! are total and never fail.

use thiserror::Error;

/// The main error type for the experience engine.
///
/// # Example
///
/// ```
/// use experience_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Settings parsed but break one of their invariants.
    #[error("Invalid settings field '{field}': {message}")]
    InvalidSettings {
        /// The offending settings field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A stored record declared a schema version this engine cannot read.
    #[error("Unsupported employee record schema version: {version}")]
    UnsupportedSchema {
        /// The declared version.
        version: u64,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
