//! Settings loading and management for the experience engine.
//!
//! Settings are plain values passed to every calculation. They are loaded
//! from a YAML file, or built in code from [`Settings::default`].
//!
//! # Example
//!
//! ```no_run
//! use experience_engine::config::ConfigLoader;
//!
//! let settings = ConfigLoader::load("./config/settings.yaml").unwrap().into_settings();
//! println!("Milestones: {:?}", settings.raise_milestones);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{MilestoneExclusion, RaiseWindowMode, Settings, VrPolicy};
