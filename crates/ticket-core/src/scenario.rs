//! Scenario: simulation inputs as a YAML or JSON document
//!
//! ```yaml
//! totalAttendees: 90000
//! residentPct: 25
//! municipalPct: 40
//! autoBalance: true
//! distribution:
//!   ticketOnline: 25
//!   openTicket: 5
//! prices:
//!   openTicket: { base: 24, fee: 2.2 }
//! ```
//!
//! Missing keys fall back to the defaults.
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::data_model::SimulationParams;
use crate::error::TicketError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(flatten)]
    pub params: SimulationParams,
    #[serde(default = "default_auto_balance")]
    pub auto_balance: bool,
}

fn default_auto_balance() -> bool {
    true
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            params: SimulationParams::default(),
            auto_balance: default_auto_balance(),
        }
    }
}

impl Scenario {
    pub fn from_yaml(yaml: &str) -> Result<Self, TicketError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| TicketError::Scenario(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, TicketError> {
        serde_json::from_str(json).map_err(|e| TicketError::Scenario(e.to_string()))
    }

    /// Load a scenario file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TicketError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TicketError::Scenario(format!("failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let scenario = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };

        info!(path = %path.display(), "scenario loaded");
        Ok(scenario)
    }

    pub fn to_json(&self) -> Result<String, TicketError> {
        serde_json::to_string_pretty(self).map_err(|e| TicketError::Serialize(e.to_string()))
    }

    /// Content hash of the inputs; equal scenarios share a fingerprint
    pub fn fingerprint(&self) -> Result<String, TicketError> {
        let bytes = serde_json::to_vec(self).map_err(|e| TicketError::Serialize(e.to_string()))?;
        Ok(format!("blake3:{}", blake3::hash(&bytes)))
    }
}
