//! Data Model: Category, Distribution, Prices, SimulationParams, RevenueBreakdown
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{DEFAULT_ATTENDEES, DEFAULT_MUNICIPAL_PCT, DEFAULT_RESIDENT_PCT};
use crate::error::TicketError;

// =============================================================================
// Categories
// =============================================================================

/// Non-resident ticket category. Order of `ALL` is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    TicketOnline,
    TicketPreEvent,
    TicketDuringEvent,
    TwoDayOffline,
    TwoDayPreEvent,
    OpenTicket,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::TicketOnline,
        Category::TicketPreEvent,
        Category::TicketDuringEvent,
        Category::TwoDayOffline,
        Category::TwoDayPreEvent,
        Category::OpenTicket,
    ];

    /// Key used in scenario files and shell commands
    pub fn key(&self) -> &'static str {
        match self {
            Category::TicketOnline => "ticketOnline",
            Category::TicketPreEvent => "ticketPreEvent",
            Category::TicketDuringEvent => "ticketDuringEvent",
            Category::TwoDayOffline => "twoDayOffline",
            Category::TwoDayPreEvent => "twoDayPreEvent",
            Category::OpenTicket => "openTicket",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::TicketOnline => "Biglietto Singolo (Online)",
            Category::TicketPreEvent => "Biglietto Singolo (Pre-evento)",
            Category::TicketDuringEvent => "Biglietto Singolo (Durante Evento)",
            Category::TwoDayOffline => "Abbonamento 2 Giorni (Offline)",
            Category::TwoDayPreEvent => "Abbonamento 2 Giorni (Pre-evento)",
            Category::OpenTicket => "Abbonamento Open",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TicketError::UnknownCategory(s.to_string()))
    }
}

/// Every priced ticket type: the six non-resident categories plus the two
/// resident-only ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceCategory {
    TicketOnline,
    TicketPreEvent,
    TicketDuringEvent,
    TwoDayOffline,
    TwoDayPreEvent,
    OpenTicket,
    ResidentSingle,
    ResidentOpen,
}

impl PriceCategory {
    pub const ALL: [PriceCategory; 8] = [
        PriceCategory::TicketOnline,
        PriceCategory::TicketPreEvent,
        PriceCategory::TicketDuringEvent,
        PriceCategory::TwoDayOffline,
        PriceCategory::TwoDayPreEvent,
        PriceCategory::OpenTicket,
        PriceCategory::ResidentSingle,
        PriceCategory::ResidentOpen,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PriceCategory::ResidentSingle => "residentSingle",
            PriceCategory::ResidentOpen => "residentOpen",
            other => other.category().map(|c| c.key()).unwrap_or_default(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PriceCategory::ResidentSingle => "Biglietto Singolo Residenti",
            PriceCategory::ResidentOpen => "Abbonamento Open Residenti",
            other => other.category().map(|c| c.display_name()).unwrap_or_default(),
        }
    }

    /// The distribution category this price belongs to, `None` for resident tickets
    pub fn category(&self) -> Option<Category> {
        match self {
            PriceCategory::TicketOnline => Some(Category::TicketOnline),
            PriceCategory::TicketPreEvent => Some(Category::TicketPreEvent),
            PriceCategory::TicketDuringEvent => Some(Category::TicketDuringEvent),
            PriceCategory::TwoDayOffline => Some(Category::TwoDayOffline),
            PriceCategory::TwoDayPreEvent => Some(Category::TwoDayPreEvent),
            PriceCategory::OpenTicket => Some(Category::OpenTicket),
            PriceCategory::ResidentSingle | PriceCategory::ResidentOpen => None,
        }
    }

    pub fn is_resident(&self) -> bool {
        self.category().is_none()
    }
}

impl From<Category> for PriceCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::TicketOnline => PriceCategory::TicketOnline,
            Category::TicketPreEvent => PriceCategory::TicketPreEvent,
            Category::TicketDuringEvent => PriceCategory::TicketDuringEvent,
            Category::TwoDayOffline => PriceCategory::TwoDayOffline,
            Category::TwoDayPreEvent => PriceCategory::TwoDayPreEvent,
            Category::OpenTicket => PriceCategory::OpenTicket,
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PriceCategory {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceCategory::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TicketError::UnknownPriceCategory(s.to_string()))
    }
}

// =============================================================================
// Distribution
// =============================================================================

/// Percentage of non-resident attendees per category.
///
/// The six values are expected to total about 100 but nothing enforces it;
/// an imbalance is a state to report, not to reject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Distribution {
    pub ticket_online: f64,
    pub ticket_pre_event: f64,
    pub ticket_during_event: f64,
    pub two_day_offline: f64,
    pub two_day_pre_event: f64,
    pub open_ticket: f64,
}

impl Distribution {
    pub fn zero() -> Self {
        Self {
            ticket_online: 0.0,
            ticket_pre_event: 0.0,
            ticket_during_event: 0.0,
            two_day_offline: 0.0,
            two_day_pre_event: 0.0,
            open_ticket: 0.0,
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::TicketOnline => self.ticket_online,
            Category::TicketPreEvent => self.ticket_pre_event,
            Category::TicketDuringEvent => self.ticket_during_event,
            Category::TwoDayOffline => self.two_day_offline,
            Category::TwoDayPreEvent => self.two_day_pre_event,
            Category::OpenTicket => self.open_ticket,
        }
    }

    pub fn set(&mut self, category: Category, value: f64) {
        let slot = match category {
            Category::TicketOnline => &mut self.ticket_online,
            Category::TicketPreEvent => &mut self.ticket_pre_event,
            Category::TicketDuringEvent => &mut self.ticket_during_event,
            Category::TwoDayOffline => &mut self.two_day_offline,
            Category::TwoDayPreEvent => &mut self.two_day_pre_event,
            Category::OpenTicket => &mut self.open_ticket,
        };
        *slot = value;
    }

    /// Builder-style `set`
    pub fn with(mut self, category: Category, value: f64) -> Self {
        self.set(category, value);
        self
    }

    /// `(category, percentage)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            ticket_online: 20.0,
            ticket_pre_event: 20.0,
            ticket_during_event: 20.0,
            two_day_offline: 15.0,
            two_day_pre_event: 15.0,
            open_ticket: 10.0,
        }
    }
}

// =============================================================================
// Prices
// =============================================================================

/// Ticket face value and the booking fee charged on top of it
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Price {
    pub base: f64,
    pub fee: f64,
}

impl Price {
    pub const fn new(base: f64, fee: f64) -> Self {
        Self { base, fee }
    }

    pub fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Base => self.base,
            PriceField::Fee => self.fee,
        }
    }
}

/// Editable half of a [`Price`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Base,
    Fee,
}

impl FromStr for PriceField {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(PriceField::Base),
            "fee" => Ok(PriceField::Fee),
            other => Err(TicketError::UnknownPriceField(other.to_string())),
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PriceField::Base => f.write_str("base"),
            PriceField::Fee => f.write_str("fee"),
        }
    }
}

/// One [`Price`] per [`PriceCategory`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceTable {
    pub ticket_online: Price,
    pub ticket_pre_event: Price,
    pub ticket_during_event: Price,
    pub two_day_offline: Price,
    pub two_day_pre_event: Price,
    pub open_ticket: Price,
    pub resident_single: Price,
    pub resident_open: Price,
}

impl PriceTable {
    pub fn get(&self, category: PriceCategory) -> Price {
        match category {
            PriceCategory::TicketOnline => self.ticket_online,
            PriceCategory::TicketPreEvent => self.ticket_pre_event,
            PriceCategory::TicketDuringEvent => self.ticket_during_event,
            PriceCategory::TwoDayOffline => self.two_day_offline,
            PriceCategory::TwoDayPreEvent => self.two_day_pre_event,
            PriceCategory::OpenTicket => self.open_ticket,
            PriceCategory::ResidentSingle => self.resident_single,
            PriceCategory::ResidentOpen => self.resident_open,
        }
    }

    pub fn get_mut(&mut self, category: PriceCategory) -> &mut Price {
        match category {
            PriceCategory::TicketOnline => &mut self.ticket_online,
            PriceCategory::TicketPreEvent => &mut self.ticket_pre_event,
            PriceCategory::TicketDuringEvent => &mut self.ticket_during_event,
            PriceCategory::TwoDayOffline => &mut self.two_day_offline,
            PriceCategory::TwoDayPreEvent => &mut self.two_day_pre_event,
            PriceCategory::OpenTicket => &mut self.open_ticket,
            PriceCategory::ResidentSingle => &mut self.resident_single,
            PriceCategory::ResidentOpen => &mut self.resident_open,
        }
    }

    pub fn set(&mut self, category: PriceCategory, field: PriceField, value: f64) {
        let price = self.get_mut(category);
        match field {
            PriceField::Base => price.base = value,
            PriceField::Fee => price.fee = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PriceCategory, Price)> + '_ {
        PriceCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            ticket_online: Price::new(7.0, 1.5),
            ticket_pre_event: Price::new(7.0, 1.5),
            ticket_during_event: Price::new(7.0, 0.0),
            two_day_offline: Price::new(12.0, 0.0),
            two_day_pre_event: Price::new(12.0, 1.5),
            open_ticket: Price::new(22.0, 2.2),
            resident_single: Price::new(5.0, 0.0),
            resident_open: Price::new(19.0, 1.9),
        }
    }
}

// =============================================================================
// Simulation input / output
// =============================================================================

/// Everything the revenue calculator reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParams {
    /// Total tickets sold (residents and non-residents)
    pub total_attendees: u32,
    /// Residents as a percentage of `total_attendees`
    pub resident_pct: f64,
    /// Category split of the non-resident attendees
    pub distribution: Distribution,
    pub prices: PriceTable,
    /// Share of net revenue withheld by the municipality, in percent
    pub municipal_pct: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            total_attendees: DEFAULT_ATTENDEES,
            resident_pct: DEFAULT_RESIDENT_PCT,
            distribution: Distribution::default(),
            prices: PriceTable::default(),
            municipal_pct: DEFAULT_MUNICIPAL_PCT,
        }
    }
}

/// Itemized revenue cascade, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub gross_revenue: f64,
    pub total_fees: f64,
    pub iva: f64,
    pub siae: f64,
    pub net_revenue: f64,
    pub commune_share: f64,
    pub final_net_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_distribution_totals_100() {
        assert_eq!(Distribution::default().total(), 100.0);
    }

    #[test]
    fn test_category_keys_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
        assert!("residentSingle".parse::<Category>().is_err());
        assert_eq!("OPENTICKET".parse::<Category>().unwrap(), Category::OpenTicket);
    }

    #[test]
    fn test_price_category_keys() {
        assert_eq!(PriceCategory::from(Category::TwoDayOffline).key(), "twoDayOffline");
        assert_eq!(
            "residentOpen".parse::<PriceCategory>().unwrap(),
            PriceCategory::ResidentOpen
        );
        assert!(PriceCategory::ResidentSingle.is_resident());
        assert!(!PriceCategory::OpenTicket.is_resident());
        assert_eq!(PriceCategory::ResidentOpen.display_name(), "Abbonamento Open Residenti");
    }

    #[test]
    fn test_price_table_set() {
        let mut prices = PriceTable::default();
        prices.set(PriceCategory::OpenTicket, PriceField::Fee, 3.0);
        assert_eq!(prices.get(PriceCategory::OpenTicket), Price::new(22.0, 3.0));
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: SimulationParams = serde_json::from_str(
            r#"{ "totalAttendees": 50000, "distribution": { "openTicket": 30 } }"#,
        )
        .unwrap();

        assert_eq!(params.total_attendees, 50000);
        assert_eq!(params.resident_pct, 30.0);
        assert_eq!(params.distribution.open_ticket, 30.0);
        assert_eq!(params.distribution.ticket_online, 20.0);
        assert_eq!(params.prices, PriceTable::default());
    }

    #[test]
    fn test_price_field_parse() {
        assert_eq!("Base".parse::<PriceField>().unwrap(), PriceField::Base);
        assert!(matches!(
            "tax".parse::<PriceField>(),
            Err(TicketError::UnknownPriceField(_))
        ));
    }
}
