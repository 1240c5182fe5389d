//! VR tier classification labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A discrete experience band, `VR0` (entry) through `VR5`.
///
/// Tiers are ordered along the ladder, so `VrTier::Vr0 < VrTier::Vr1`.
///
/// # Example
///
/// ```
/// use experience_engine::models::VrTier;
///
/// let tier: VrTier = "vr2".parse().unwrap();
/// assert_eq!(tier, VrTier::Vr2);
/// assert_eq!(tier.to_string(), "VR2");
/// assert_eq!(tier.next(), Some(VrTier::Vr3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VrTier {
    /// Entry tier.
    #[serde(rename = "VR0", alias = "vr0")]
    Vr0,
    /// First tier.
    #[serde(rename = "VR1", alias = "vr1")]
    Vr1,
    /// Second tier.
    #[serde(rename = "VR2", alias = "vr2")]
    Vr2,
    /// Third tier.
    #[serde(rename = "VR3", alias = "vr3")]
    Vr3,
    /// Fourth tier.
    #[serde(rename = "VR4", alias = "vr4")]
    Vr4,
    /// Fifth tier.
    #[serde(rename = "VR5", alias = "vr5")]
    Vr5,
}

impl VrTier {
    /// Every tier in ladder order.
    pub const ALL: [VrTier; 6] = [
        VrTier::Vr0,
        VrTier::Vr1,
        VrTier::Vr2,
        VrTier::Vr3,
        VrTier::Vr4,
        VrTier::Vr5,
    ];

    /// Returns the canonical label, e.g. `"VR3"`.
    pub fn label(self) -> &'static str {
        match self {
            VrTier::Vr0 => "VR0",
            VrTier::Vr1 => "VR1",
            VrTier::Vr2 => "VR2",
            VrTier::Vr3 => "VR3",
            VrTier::Vr4 => "VR4",
            VrTier::Vr5 => "VR5",
        }
    }

    /// Returns the tier one step up the ladder, if any.
    pub fn next(self) -> Option<VrTier> {
        let index = Self::ALL.iter().position(|t| *t == self)?;
        Self::ALL.get(index + 1).copied()
    }
}

impl fmt::Display for VrTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string is not a tier label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVrTierError(pub String);

impl fmt::Display for ParseVrTierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown VR tier label '{}'", self.0)
    }
}

impl std::error::Error for ParseVrTierError {}

impl FromStr for VrTier {
    type Err = ParseVrTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseVrTierError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_are_ordered_along_ladder() {
        assert!(VrTier::Vr0 < VrTier::Vr1);
        assert!(VrTier::Vr4 < VrTier::Vr5);
        let mut sorted = VrTier::ALL;
        sorted.sort();
        assert_eq!(sorted, VrTier::ALL);
    }

    #[test]
    fn test_next_stops_at_top_tier() {
        assert_eq!(VrTier::Vr0.next(), Some(VrTier::Vr1));
        assert_eq!(VrTier::Vr5.next(), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("VR4".parse::<VrTier>().unwrap(), VrTier::Vr4);
        assert_eq!("vr0".parse::<VrTier>().unwrap(), VrTier::Vr0);
        assert_eq!(" Vr1 ".parse::<VrTier>().unwrap(), VrTier::Vr1);
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let err = "VR9".parse::<VrTier>().unwrap_err();
        assert_eq!(err.to_string(), "unknown VR tier label 'VR9'");
    }

    #[test]
    fn test_serializes_as_uppercase_label() {
        assert_eq!(serde_json::to_string(&VrTier::Vr3).unwrap(), "\"VR3\"");
        let tier: VrTier = serde_json::from_str("\"vr2\"").unwrap();
        assert_eq!(tier, VrTier::Vr2);
    }
}
