//! Quality Profiles
//!
//! Thresholds deciding when a simulation deserves a warning and when it
//! should be blocked outright.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ticket_core::constants::{BALANCE_TOLERANCE, MAX_ATTENDEES, MAX_PERCENT, MIN_ATTENDEES};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile: {0}")]
    Io(String),
    #[error("Failed to parse profile: {0}")]
    Parse(String),
}

/// Quality profile defining thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityProfile {
    /// Profile name (e.g., "advisory@1.0")
    pub name: String,

    /// Operating mode
    pub mode: String,

    // === Distribution ===

    /// Allowed distance of the distribution total from 100
    pub distribution_tolerance: f64,

    /// Treat an unbalanced distribution as blocking
    pub block_on_imbalance: bool,

    // === Input ranges ===

    pub min_attendees: u32,
    pub max_attendees: u32,

    /// Upper bound for the municipal share percentage
    pub max_municipal_pct: f64,

    // === Outcome ===

    /// Treat a negative final revenue as blocking
    pub block_on_negative_revenue: bool,
}

impl QualityProfile {
    /// Everything is a warning; nothing blocks
    pub fn advisory() -> Self {
        Self {
            name: "advisory@1.0".to_string(),
            mode: "advisory".to_string(),
            distribution_tolerance: BALANCE_TOLERANCE,
            block_on_imbalance: false,
            min_attendees: MIN_ATTENDEES,
            max_attendees: MAX_ATTENDEES,
            max_municipal_pct: MAX_PERCENT,
            block_on_negative_revenue: false,
        }
    }

    /// Unbalanced distributions and losses block
    pub fn strict() -> Self {
        Self {
            name: "strict@1.0".to_string(),
            mode: "strict".to_string(),
            block_on_imbalance: true,
            block_on_negative_revenue: true,
            ..Self::advisory()
        }
    }

    /// Load profile from YAML; missing keys take the advisory values
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        serde_yaml::from_str(yaml).map_err(|e| ProfileError::Parse(e.to_string()))
    }

    pub fn load(path: &str) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProfileError::Io(format!("{}: {}", path, e)))?;
        Self::from_yaml(&content)
    }

    /// Get profile by mode name
    pub fn for_mode(mode: &str) -> Self {
        match mode {
            "strict" => Self::strict(),
            "advisory" => Self::advisory(),
            _ => Self::advisory(),
        }
    }
}

impl Default for QualityProfile {
    fn default() -> Self {
        Self::advisory()
    }
}
