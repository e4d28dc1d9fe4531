//! Ticket Quality Gate: Simulation Sanity Evaluation
//!
//! Turns the warnings a simulator UI shows (distribution not totalling
//! 100%, negative revenue, inputs outside the usual ranges) into a
//! structured verdict, checked against configurable profiles (advisory vs
//! strict mode).
//!
//! # Example
//!
//! ```
//! use ticket_core::Session;
//! use ticket_quality::{evaluate_session, Verdict};
//!
//! let session = Session::new();
//! let verdict = evaluate_session(&session, "advisory");
//! assert_eq!(verdict.verdict, Verdict::Ok);
//! ```

pub mod gate;
pub mod profile;

pub use gate::{Check, CheckStatus, QualityGate, QualityVerdict, Verdict};
pub use profile::{ProfileError, QualityProfile};

use ticket_core::Session;

/// Quick evaluation of a session's current state
pub fn evaluate_session(session: &Session, mode: &str) -> QualityVerdict {
    let gate = QualityGate::for_mode(mode);
    gate.evaluate(session.params(), &session.revenue())
}

/// Check if a session would pass the gate
pub fn would_pass(session: &Session, mode: &str) -> bool {
    !evaluate_session(session, mode).is_blocked()
}
