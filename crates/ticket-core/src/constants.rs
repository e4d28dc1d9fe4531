//! Named constants of the revenue model and the input ranges offered to users.

// =============================================================================
// Tax model
// =============================================================================

/// VAT (IVA) withheld from gross revenue.
pub const VAT_RATE: f64 = 0.10;

/// SIAE collecting-society levy withheld from gross revenue.
pub const SIAE_RATE: f64 = 0.10;

/// Share of residents buying a single-day ticket.
pub const RESIDENT_SINGLE_SHARE: f64 = 0.7;

/// Share of residents buying an open pass.
pub const RESIDENT_OPEN_SHARE: f64 = 0.3;

// =============================================================================
// Distribution
// =============================================================================

/// Target total of the category distribution, in percent.
pub const DISTRIBUTION_TOTAL: f64 = 100.0;

/// A distribution whose total is within this distance of 100 counts as balanced.
pub const BALANCE_TOLERANCE: f64 = 0.1;

// =============================================================================
// Input ranges (advisory, never enforced by the calculator)
// =============================================================================

pub const MIN_ATTENDEES: u32 = 40_000;
pub const MAX_ATTENDEES: u32 = 120_000;
pub const ATTENDEE_STEP: u32 = 1_000;

pub const MIN_PERCENT: f64 = 0.0;
pub const MAX_PERCENT: f64 = 100.0;

// =============================================================================
// Session defaults
// =============================================================================

pub const DEFAULT_ATTENDEES: u32 = 80_000;
pub const DEFAULT_RESIDENT_PCT: f64 = 30.0;
pub const DEFAULT_MUNICIPAL_PCT: f64 = 40.0;
