//! Ticket Out: Simulation Reports
//!
//! Converts a session into a JSON view (parameters, revenue cascade,
//! per-category attendees, quality verdict, charts) and renders it to text
//! through Handlebars templates.
//!
//! # Example
//!
//! ```
//! use ticket_core::Session;
//! use ticket_out::{render_report, ReportRequest};
//!
//! let session = Session::new();
//! let report = render_report(ReportRequest::new(&session)).unwrap();
//! assert!(report.output.contains("€331.464"));
//! ```

pub mod chart;
pub mod format;
pub mod renderer;
pub mod templates;

use renderer::TemplateRenderer;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use ticket_core::{category_attendees, Session, ENGINE_VERSION};
use ticket_quality::{QualityGate, QualityProfile, QualityVerdict};
use tracing::debug;

/// Template used when none is named
pub const DEFAULT_TEMPLATE: &str = "report_text";

/// Chart width in cells when none is configured
pub const DEFAULT_CHART_WIDTH: usize = 40;

/// Request to render a session
#[derive(Debug, Clone)]
pub struct ReportRequest<'s> {
    pub session: &'s Session,
    /// Profile for the quality verdict embedded in the report
    pub profile: QualityProfile,
    /// Name of the template to use
    pub template_name: String,
    /// Path to a templates file (uses the built-in templates if not provided)
    pub templates_path: Option<String>,
    pub chart_width: usize,
}

impl<'s> ReportRequest<'s> {
    pub fn new(session: &'s Session) -> Self {
        Self {
            session,
            profile: QualityProfile::default(),
            template_name: DEFAULT_TEMPLATE.to_string(),
            templates_path: None,
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.template_name = name.into();
        self
    }

    pub fn with_profile(mut self, profile: QualityProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Result of a render operation
#[derive(Debug, Clone, Serialize)]
pub struct ReportResult {
    /// The rendered output
    pub output: String,
    /// Template that was used
    pub template_used: String,
    pub verdict: QualityVerdict,
    /// The data the template was rendered from
    pub view: Value,
}

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template load failed: {0}")]
    Template(String),
    #[error("Render failed: {0}")]
    Render(String),
    #[error("Serialization failed: {0}")]
    Serialize(String),
}

/// Evaluate and render a session
pub fn render_report(request: ReportRequest<'_>) -> Result<ReportResult, RenderError> {
    let renderer = match &request.templates_path {
        Some(path) => TemplateRenderer::load(path),
        None => TemplateRenderer::builtin(),
    }
    .map_err(RenderError::Template)?;

    let session = request.session;
    let verdict = QualityGate::new(request.profile.clone())
        .evaluate(session.params(), &session.revenue());

    let view = build_view(session, &verdict, request.chart_width)?;

    let output = renderer
        .render(&request.template_name, &view)
        .map_err(RenderError::Render)?;

    debug!(
        session = session.id(),
        template = %request.template_name,
        verdict = %verdict.verdict,
        "report rendered"
    );

    Ok(ReportResult {
        output,
        template_used: request.template_name,
        verdict,
        view,
    })
}

/// JSON view of a session, as seen by templates
pub fn build_view(
    session: &Session,
    verdict: &QualityVerdict,
    chart_width: usize,
) -> Result<Value, RenderError> {
    let params = session.params();
    let revenue = session.revenue();

    let distribution: Vec<Value> = params
        .distribution
        .iter()
        .map(|(category, percentage)| {
            json!({
                "key": category.key(),
                "name": category.display_name(),
                "percentage": percentage,
            })
        })
        .collect();

    let prices: Vec<Value> = category_attendees(params)
        .into_iter()
        .map(|(category, attendees)| {
            let price = params.prices.get(category);
            json!({
                "key": category.key(),
                "name": category.display_name(),
                "resident": category.is_resident(),
                "base": price.base,
                "fee": price.fee,
                "attendees": attendees,
            })
        })
        .collect();

    let fingerprint = session
        .to_scenario()
        .fingerprint()
        .map_err(|e| RenderError::Serialize(e.to_string()))?;

    let distribution_chart = chart::distribution_chart(&params.distribution, chart_width);
    let revenue_chart = chart::revenue_chart(&revenue, params.municipal_pct, chart_width);

    Ok(json!({
        "engine": ENGINE_VERSION,
        "session": session.id(),
        "fingerprint": fingerprint,
        "params": {
            "totalAttendees": params.total_attendees,
            "residentPct": params.resident_pct,
            "municipalPct": params.municipal_pct,
            "autoBalance": session.auto_balance(),
        },
        "distribution": distribution,
        "distributionTotal": session.distribution_total(),
        "balanced": session.is_balanced(),
        "prices": prices,
        "revenue": serde_json::to_value(revenue).map_err(|e| RenderError::Serialize(e.to_string()))?,
        "quality": serde_json::to_value(verdict).map_err(|e| RenderError::Serialize(e.to_string()))?,
        "charts": {
            "distribution": distribution_chart.render(),
            "revenue": revenue_chart.render(),
        },
    }))
}
