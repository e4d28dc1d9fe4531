//! Integration tests for ticket-out with the scenario files in the
//! workspace `scenarios/` directory.

use ticket_core::{Category, Scenario, Session};
use ticket_out::{render_report, ReportRequest, RenderError};
use ticket_quality::{QualityProfile, Verdict};

/// Get the absolute path to a scenario file
fn scenario_path(name: &str) -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join("scenarios").join(name).to_string_lossy().to_string()
}

fn session_for(name: &str) -> Session {
    Session::from_scenario(Scenario::load(scenario_path(name)).unwrap())
}

// =============================================================================
// Full reports
// =============================================================================

#[test]
fn test_default_scenario_report() {
    let session = session_for("default.yaml");
    let report = render_report(ReportRequest::new(&session)).unwrap();

    assert_eq!(report.template_used, "report_text");
    assert_eq!(report.verdict.verdict, Verdict::Ok);
    assert!(report.output.contains("Numero totale acquisti: 80.000"));
    assert!(report.output.contains("Percentuale residenti:  30%"));
    assert!(report.output.contains("Ricavo Lordo:        €780.800"));
    assert!(report.output.contains("Ricavo Netto:        €552.440"));
    assert!(report.output.contains("Quota Comune:        €220.976"));
    assert!(report.output.contains("Ricavo Finale Netto: €331.464"));
    assert!(report.output.contains("Diritti Prevendita: €72.200"));
    assert!(report.output.contains("Abbonamento Open Residenti: €19 + €1,9 commissione (7.200 acquisti)"));
    assert!(report.output.contains("Quota Comune (40%)"));
    assert!(!report.output.contains("NON BILANCIATA"));
}

#[test]
fn test_sold_out_scenario_figures() {
    let session = session_for("sold-out.yaml");
    let report = render_report(ReportRequest::new(&session).with_template("summary_line")).unwrap();

    assert_eq!(
        report.output,
        "Totale 100.0% | Lordo €1.195.800 | Netto €809.400 | Comune €283.290 | Finale €526.110 | OK"
    );
}

#[test]
fn test_unbalanced_scenario() {
    let session = session_for("unbalanced.json");
    assert!(!session.auto_balance());
    assert_eq!(session.distribution_total(), 130.0);

    let advisory = render_report(ReportRequest::new(&session)).unwrap();
    assert_eq!(advisory.verdict.verdict, Verdict::Warn);
    assert!(advisory.output.contains("Totale: 130.0% - NON BILANCIATA"));
    assert!(advisory.output.contains("[Warn] distribution_total"));

    let strict = render_report(ReportRequest::new(&session).with_profile(QualityProfile::strict())).unwrap();
    assert_eq!(strict.verdict.verdict, Verdict::Block);
    assert!(strict.output.contains("[Fail] distribution_total"));
}

#[test]
fn test_rebalanced_after_enabling_auto_balance() {
    let mut session = session_for("unbalanced.json");
    session.set_category(Category::TicketOnline, 40.0);
    assert_eq!(session.distribution_total(), 130.0);

    session.set_auto_balance(true);
    let report = render_report(ReportRequest::new(&session)).unwrap();
    assert_eq!(report.verdict.verdict, Verdict::Ok);
}

// =============================================================================
// Charts
// =============================================================================

#[test]
fn test_charts_template() {
    let session = session_for("default.yaml");
    let mut request = ReportRequest::new(&session).with_template("charts_only");
    request.chart_width = 10;
    let report = render_report(request).unwrap();

    assert!(report.output.contains("Distribuzione Biglietti"));
    assert!(report.output.contains("Dettaglio Ricavi"));
    assert!(report.output.contains("██████████ €781k"));
    assert!(report.output.contains("Abbonamento Open"));
}

// =============================================================================
// Custom templates
// =============================================================================

#[test]
fn test_custom_templates_file() {
    let path = std::env::temp_dir().join(format!("ticket-out-templates-{}.yaml", std::process::id()));
    std::fs::write(
        &path,
        r#"
version: "1.0"
templates:
  final_only:
    description: Final figure
    template: "{{euro revenue.finalNetRevenue}} ({{quality.verdict}})"
"#,
    )
    .unwrap();

    let session = Session::new();
    let mut request = ReportRequest::new(&session).with_template("final_only");
    request.templates_path = Some(path.to_string_lossy().to_string());
    let report = render_report(request).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(report.output, "€331.464 (OK)");
}

#[test]
fn test_missing_templates_file() {
    let session = Session::new();
    let mut request = ReportRequest::new(&session);
    request.templates_path = Some("/nonexistent/templates.yaml".to_string());

    assert!(matches!(render_report(request), Err(RenderError::Template(_))));
}
