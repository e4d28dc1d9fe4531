//! Integration tests driving the shell through in-memory input.

use std::io::Cursor;

use ticket_cli::{apply, parse_assignment, Shell};
use ticket_core::{Scenario, Session};
use ticket_quality::{QualityProfile, Verdict};

fn scenario_path(name: &str) -> String {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    workspace_root.join("scenarios").join(name).to_string_lossy().to_string()
}

fn run(shell: &mut Shell, script: &str) -> String {
    let mut out = Vec::new();
    shell.run(Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Shell sessions
// =============================================================================

#[test]
fn test_edit_then_quit() {
    let mut shell = Shell::new(Session::new(), QualityProfile::advisory());
    let out = run(&mut shell, "attendees 120000\nresidents 10\nmunicipal 35\nquit\nattendees 1\n");

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.starts_with("Totale 100.0%")));
    assert_eq!(shell.session().params().total_attendees, 120_000);
    assert_eq!(shell.session().params().municipal_pct, 35.0);
}

#[test]
fn test_bad_commands_keep_session() {
    let mut shell = Shell::new(Session::new(), QualityProfile::advisory());
    let before = shell.session().params().clone();
    let out = run(&mut shell, "fly away\ndist vip 10\n\nattendees lots\n");

    assert_eq!(out.lines().count(), 3);
    assert!(out.lines().all(|l| l.starts_with("errore: ")));
    assert!(out.contains("unknown command 'fly'"));
    assert_eq!(shell.session().params(), &before);
}

#[test]
fn test_manual_mode_then_rebalance() {
    let mut shell = Shell::new(Session::new(), QualityProfile::advisory());
    let out = run(&mut shell, "auto off\ndist ticketOnline 50\nauto on\n");

    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[1].starts_with("Totale 130.0%"));
    assert!(lines[1].ends_with("WARN"));
    assert!(lines[2].starts_with("Totale 100.0%"));
    assert!(shell.session().is_balanced());
}

#[test]
fn test_price_text_coerced_in_shell() {
    let mut shell = Shell::new(Session::new(), QualityProfile::advisory());
    run(&mut shell, "price openTicket base 2O\n");
    assert_eq!(shell.session().params().prices.open_ticket.base, 0.0);
}

#[test]
fn test_show_and_chart() {
    let mut shell = Shell::new(Session::new(), QualityProfile::advisory()).with_chart_width(10);
    let out = run(&mut shell, "show\nchart\n");

    assert!(out.contains("Ricavo Finale Netto: €331.464"));
    assert!(out.contains("Dettaglio Ricavi"));
}

// =============================================================================
// --set edits on scenario files
// =============================================================================

#[test]
fn test_assignments_on_sold_out() {
    let mut session = Session::from_scenario(Scenario::load(scenario_path("sold-out.yaml")).unwrap());
    for edit in ["municipal=40", "openTicket.fee=2.5"] {
        apply(&mut session, parse_assignment(edit).unwrap());
    }

    assert_eq!(session.params().municipal_pct, 40.0);
    assert_eq!(session.params().prices.open_ticket.fee, 2.5);
    assert!(session.is_balanced());
}

#[test]
fn test_strict_blocks_unbalanced_file() {
    let session = Session::from_scenario(Scenario::load(scenario_path("unbalanced.json")).unwrap());
    let verdict = ticket_quality::evaluate_session(&session, "strict");
    assert_eq!(verdict.verdict, Verdict::Block);
}
