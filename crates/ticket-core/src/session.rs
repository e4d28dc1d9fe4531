//! Session: simulation state held across user edits
//!
//! Owns the parameters plus the auto-balance bookkeeping a UI needs. Every
//! read of [`Session::revenue`] recomputes from the current parameters;
//! nothing derived is cached.
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::balancer::rebalance;
use crate::constants::{BALANCE_TOLERANCE, DISTRIBUTION_TOTAL};
use crate::data_model::{Category, Distribution, PriceCategory, PriceField, RevenueBreakdown, SimulationParams};
use crate::revenue::compute_revenue;
use crate::scenario::Scenario;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
    params: SimulationParams,
    auto_balance: bool,
    last_modified: Option<Category>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_params(SimulationParams::default())
    }

    pub fn with_params(params: SimulationParams) -> Self {
        let session = Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            params,
            auto_balance: true,
            last_modified: None,
        };
        info!(session = %session.id, attendees = session.params.total_attendees, "session started");
        session
    }

    pub fn from_scenario(scenario: Scenario) -> Self {
        let mut session = Self::with_params(scenario.params);
        session.auto_balance = scenario.auto_balance;
        session
    }

    /// Snapshot of the current inputs, suitable for saving as a scenario file
    pub fn to_scenario(&self) -> Scenario {
        Scenario {
            params: self.params.clone(),
            auto_balance: self.auto_balance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn distribution(&self) -> &Distribution {
        &self.params.distribution
    }

    pub fn auto_balance(&self) -> bool {
        self.auto_balance
    }

    pub fn last_modified(&self) -> Option<Category> {
        self.last_modified
    }

    /// Set one category's percentage, rebalancing the others when
    /// auto-balance is on
    pub fn set_category(&mut self, category: Category, value: f64) {
        self.last_modified = Some(category);
        self.params.distribution =
            rebalance(&self.params.distribution, category, value, self.auto_balance);
        debug!(
            session = %self.id,
            category = %category,
            value,
            total = self.distribution_total(),
            "distribution updated"
        );
    }

    /// Toggle auto-balance. Turning it on re-applies the last edit so the
    /// distribution is normalized again.
    pub fn set_auto_balance(&mut self, enabled: bool) {
        self.auto_balance = enabled;
        if !enabled {
            return;
        }
        if let Some(category) = self.last_modified {
            let value = self.params.distribution.get(category);
            self.set_category(category, value);
        }
    }

    pub fn set_attendees(&mut self, attendees: u32) {
        self.params.total_attendees = attendees;
    }

    pub fn set_resident_pct(&mut self, pct: f64) {
        self.params.resident_pct = pct;
    }

    pub fn set_municipal_pct(&mut self, pct: f64) {
        self.params.municipal_pct = pct;
    }

    pub fn set_price(&mut self, category: PriceCategory, field: PriceField, value: f64) {
        self.params.prices.set(category, field, value);
    }

    /// Set a price from user-typed text. Anything that does not parse to a
    /// finite number becomes 0.
    pub fn update_price(&mut self, category: PriceCategory, field: PriceField, text: &str) -> f64 {
        let value = coerce_number(text);
        if value == 0.0 && text.trim().parse::<f64>() != Ok(0.0) {
            warn!(session = %self.id, price = %category, field = %field, input = text, "price not a number, using 0");
        }
        self.set_price(category, field, value);
        value
    }

    pub fn distribution_total(&self) -> f64 {
        self.params.distribution.total()
    }

    pub fn is_balanced(&self) -> bool {
        (self.distribution_total() - DISTRIBUTION_TOTAL).abs() < BALANCE_TOLERANCE
    }

    pub fn revenue(&self) -> RevenueBreakdown {
        compute_revenue(&self.params)
    }

    /// Back to defaults, same session id
    pub fn reset(&mut self) {
        self.params = SimulationParams::default();
        self.auto_balance = true;
        self.last_modified = None;
        info!(session = %self.id, "session reset");
    }
}

/// Parse user-typed text as a number; anything that is not a finite
/// number becomes 0.
pub fn coerce_number(text: &str) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new();
        assert!(session.auto_balance());
        assert!(session.is_balanced());
        assert_eq!(session.last_modified(), None);
        assert_eq!(session.params(), &SimulationParams::default());
    }

    #[test]
    fn test_set_category_records_last_modified() {
        let mut session = Session::new();
        session.set_category(Category::OpenTicket, 20.0);

        assert_eq!(session.last_modified(), Some(Category::OpenTicket));
        assert_eq!(session.distribution().open_ticket, 20.0);
        assert_eq!(session.distribution_total(), 100.0);
    }

    #[test]
    fn test_manual_mode_shows_imbalance() {
        let mut session = Session::new();
        session.set_auto_balance(false);
        session.set_category(Category::TicketOnline, 50.0);

        assert_eq!(session.distribution_total(), 130.0);
        assert!(!session.is_balanced());
    }

    #[test]
    fn test_reenable_auto_balance_renormalizes() {
        let mut session = Session::new();
        session.set_auto_balance(false);
        session.set_category(Category::TicketOnline, 50.0);
        session.set_auto_balance(true);

        // others 20,20,15,15,10 = 80 rescaled to 50 → 12.5 rounds to 13
        let dist = session.distribution();
        assert_eq!(dist.ticket_online, 50.0);
        assert_eq!(dist.ticket_pre_event, 13.0);
        assert_eq!(dist.ticket_during_event, 13.0);
        assert_eq!(dist.two_day_offline, 9.0); // 9.375
        assert_eq!(dist.two_day_pre_event, 9.0);
        assert_eq!(dist.open_ticket, 6.0); // 6.25
        assert!(session.is_balanced());
    }

    #[test]
    fn test_reenable_without_edit_is_noop() {
        let mut session = Session::new();
        session.set_auto_balance(false);
        session.set_auto_balance(true);
        assert_eq!(session.distribution(), &Distribution::default());
    }

    #[test]
    fn test_update_price_coerces_garbage() {
        let mut session = Session::new();

        assert_eq!(session.update_price(PriceCategory::OpenTicket, PriceField::Base, "25.5"), 25.5);
        assert_eq!(session.params().prices.open_ticket.base, 25.5);

        assert_eq!(session.update_price(PriceCategory::OpenTicket, PriceField::Fee, "abc"), 0.0);
        assert_eq!(session.params().prices.open_ticket.fee, 0.0);

        assert_eq!(session.update_price(PriceCategory::OpenTicket, PriceField::Fee, ""), 0.0);
        assert_eq!(session.update_price(PriceCategory::OpenTicket, PriceField::Fee, "inf"), 0.0);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(" 12.5 "), 12.5);
        assert_eq!(coerce_number("-3"), -3.0);
        assert_eq!(coerce_number("12,5"), 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
    }

    #[test]
    fn test_reset_keeps_id() {
        let mut session = Session::new();
        let id = session.id().to_string();
        session.set_attendees(120_000);
        session.set_auto_balance(false);
        session.reset();

        assert_eq!(session.id(), id);
        assert!(session.auto_balance());
        assert_eq!(session.params().total_attendees, 80_000);
    }

    #[test]
    fn test_revenue_tracks_edits() {
        let mut session = Session::new();
        let before = session.revenue();
        session.set_attendees(100_000);
        assert!(session.revenue().gross_revenue > before.gross_revenue);
    }
}
