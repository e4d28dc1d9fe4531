use std::collections::HashMap;
use std::env;

use ticket_out::DEFAULT_CHART_WIDTH;
use ticket_quality::{ProfileError, QualityProfile};

/// Defaults read from `TICKET_*` environment variables. Command-line flags
/// override every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub scenario: Option<String>,
    pub profile: String,
    pub templates: Option<String>,
    pub chart_width: usize,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_map(&env_map())
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        let chart_width = optional(vars, "TICKET_CHART_WIDTH")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_CHART_WIDTH);

        Self {
            scenario: optional(vars, "TICKET_SCENARIO"),
            profile: get(vars, "TICKET_PROFILE", "advisory"),
            templates: optional(vars, "TICKET_TEMPLATES"),
            chart_width,
        }
    }

    /// The configured profile: a `.yaml`/`.yml` path is loaded from disk,
    /// anything else names a built-in mode.
    pub fn resolve_profile(&self) -> Result<QualityProfile, ProfileError> {
        if self.profile.ends_with(".yaml") || self.profile.ends_with(".yml") {
            QualityProfile::load(&self.profile)
        } else {
            Ok(QualityProfile::for_mode(&self.profile))
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::from_map(&HashMap::new())
    }
}

fn env_map() -> HashMap<String, String> {
    env::vars().collect()
}

fn get(vars: &HashMap<String, String>, key: &str, default: &str) -> String {
    vars.get(key)
        .cloned()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn optional(vars: &HashMap<String, String>, key: &str) -> Option<String> {
    vars.get(key).cloned().filter(|v| !v.is_empty())
}
