//! Settings loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading derivation
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::Settings;

/// Loads and validates derivation settings.
///
/// The settings file is a single YAML document. Every field is optional and
/// falls back to [`Settings::default`]:
///
/// ```text
/// adult_age_threshold: 22
/// vr_thresholds: { VR0: 0, VR1: 7, VR2: 13, VR3: 37, VR4: 61 }
/// raise_milestones: [6, 12, 36, 60]
/// raise_window_days: 15
/// raise_window_mode: calendar
/// raise_window_months: 0.5
/// raise_effective_offset_months: 0
/// vr_policy: derive
/// adult_milestone_exclusion: { rule: exact, months: 6 }
/// ```
///
/// # Example
///
/// ```no_run
/// use experience_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/settings.yaml")?;
/// println!("Adult threshold: {}", loader.settings().adult_age_threshold);
/// # Ok::<(), experience_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
}

impl ConfigLoader {
    /// Loads settings from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML for [`Settings`] (`ConfigParseError`)
    /// - The parsed settings break an invariant (`InvalidSettings`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        info!(
            path = %path_str,
            adult_age_threshold = loader.settings.adult_age_threshold,
            tiers = loader.settings.vr_thresholds.len(),
            milestones = ?loader.settings.raise_milestones,
            policy = ?loader.settings.vr_policy,
            "Loaded derivation settings"
        );

        Ok(loader)
    }

    /// Parses and validates settings from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let settings: Settings =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Self::from_settings(settings)
    }

    /// Wraps already-built settings after validating them.
    pub fn from_settings(settings: Settings) -> EngineResult<Self> {
        if let Err(err) = settings.validate() {
            warn!(error = %err, "Rejected derivation settings");
            return Err(err);
        }
        Ok(Self { settings })
    }

    /// Returns the validated settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Consumes the loader, returning the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }
}
