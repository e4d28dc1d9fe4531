//! Ticket Core: Balancer, Revenue Calculator and Session state
//!
//! Pure, deterministic core of the ticket revenue simulator. Nothing in
//! here fails: degenerate inputs produce degenerate numbers, and deciding
//! whether those numbers are "unrealistic" is left to `ticket-quality`.
//!
//! # Flow
//!
//! ```text
//! edit → Session → rebalance() → Distribution → compute_revenue() → RevenueBreakdown
//! ```
//!
//! # Example
//!
//! ```
//! use ticket_core::{Category, Session};
//!
//! let mut session = Session::new();
//! session.set_category(Category::OpenTicket, 20.0);
//!
//! let revenue = session.revenue();
//! assert!(revenue.gross_revenue > 0.0);
//! ```

pub mod balancer;
pub mod constants;
pub mod data_model;
pub mod error;
pub mod revenue;
pub mod scenario;
pub mod session;

pub use balancer::rebalance;
pub use data_model::{
    Category, Distribution, Price, PriceCategory, PriceField, PriceTable, RevenueBreakdown,
    SimulationParams,
};
pub use error::TicketError;
pub use revenue::{category_attendees, compute_revenue, compute_revenue_with, TaxModel};
pub use scenario::Scenario;
pub use session::Session;

/// Simulator engine version, reported alongside rendered output
pub const ENGINE_VERSION: &str = "1.0.0";
