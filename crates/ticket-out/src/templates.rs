//! Template loading for reports.
//!
//! A templates file is YAML with named Handlebars templates:
//!
//! ```yaml
//! version: "1.0"
//! templates:
//!   summary_line:
//!     description: One-line status
//!     template: "Finale {{euro revenue.finalNetRevenue}}"
//! ```

use serde::Deserialize;
use std::collections::HashMap;

/// Built-in templates shipped with the crate
pub const DEFAULT_TEMPLATES: &str = include_str!("../templates/report.yaml");

/// Top-level templates file structure
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: HashMap<String, Template>,
}

/// A single template definition
#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    /// Load templates from a YAML file
    pub fn load(path: &str) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read templates file {}: {}", path, e))?;
        Self::from_yaml(&content)
    }

    /// Parse templates from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Failed to parse templates YAML: {}", e))
    }

    /// The templates compiled into the crate
    pub fn builtin() -> Result<Self, String> {
        Self::from_yaml(DEFAULT_TEMPLATES)
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Template names, sorted
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates() {
        let file = TemplatesFile::builtin().unwrap();
        assert_eq!(
            file.list_templates(),
            ["charts_only", "report_text", "summary_line"]
        );
    }

    #[test]
    fn test_custom_file() {
        let yaml = r#"
version: "1.0"
templates:
  final_only:
    description: Final figure
    template: "{{euro revenue.finalNetRevenue}}"
"#;

        let file = TemplatesFile::from_yaml(yaml).unwrap();
        assert!(file.get("final_only").is_some());
        assert!(file.get("report_text").is_none());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(TemplatesFile::from_yaml("templates: [").is_err());
    }
}
