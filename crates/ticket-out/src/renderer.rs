//! Template rendering for reports.
//!
//! Uses Handlebars with formatting helpers:
//! - euro: `€1.234,5`
//! - kilo_euro: `€781k`
//! - percent: `20.0%`
//! - thousands: `80.000`
//! - plain: `30`
//!
//! Output is plain text, so HTML escaping is turned off.

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::Value;

use crate::format;
use crate::templates::TemplatesFile;

handlebars_helper!(euro_helper: |value: f64| format::euro(value));
handlebars_helper!(kilo_euro_helper: |value: f64| format::kilo_euro(value));
handlebars_helper!(percent_helper: |value: f64| format::percent(value));
handlebars_helper!(thousands_helper: |value: f64| format::thousands(value));
handlebars_helper!(plain_helper: |value: f64| format::plain(value));

/// Compiled renderer with registered helpers
pub struct TemplateRenderer<'a> {
    handlebars: Handlebars<'a>,
    templates: TemplatesFile,
}

impl<'a> TemplateRenderer<'a> {
    /// Create a new renderer from a templates file
    pub fn new(templates: TemplatesFile) -> Result<Self, String> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        handlebars.register_helper("euro", Box::new(euro_helper));
        handlebars.register_helper("kilo_euro", Box::new(kilo_euro_helper));
        handlebars.register_helper("percent", Box::new(percent_helper));
        handlebars.register_helper("thousands", Box::new(thousands_helper));
        handlebars.register_helper("plain", Box::new(plain_helper));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| format!("Template '{}' is invalid: {}", name, e))?;
        }

        Ok(TemplateRenderer { handlebars, templates })
    }

    /// Load from a file path
    pub fn load(path: &str) -> Result<Self, String> {
        Self::new(TemplatesFile::load(path)?)
    }

    /// Renderer over the built-in templates
    pub fn builtin() -> Result<Self, String> {
        Self::new(TemplatesFile::builtin()?)
    }

    /// Render a named template with data
    pub fn render(&self, template_name: &str, data: &Value) -> Result<String, String> {
        if self.templates.get(template_name).is_none() {
            return Err(format!(
                "Unknown template '{}' (available: {})",
                template_name,
                self.list_templates().join(", ")
            ));
        }
        self.handlebars
            .render(template_name, data)
            .map_err(|e| format!("Render error: {}", e))
    }

    /// Render a template string directly (not from file)
    pub fn render_string(&self, template: &str, data: &Value) -> Result<String, String> {
        self.handlebars
            .render_template(template, data)
            .map_err(|e| format!("Render error: {}", e))
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.list_templates()
    }
}
