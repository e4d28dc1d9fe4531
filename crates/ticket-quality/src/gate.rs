//! Quality Gate evaluation for simulations
//!
//! Evaluates simulation inputs and their revenue breakdown against a
//! quality profile and produces a verdict (OK, WARN, BLOCK). The gate only
//! reports; it never alters the numbers.

use super::profile::QualityProfile;
use serde::{Deserialize, Serialize};
use std::fmt;
use ticket_core::constants::{DISTRIBUTION_TOTAL, MAX_PERCENT, MIN_PERCENT};
use ticket_core::{RevenueBreakdown, SimulationParams};
use tracing::warn;

/// Single check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub impact: i32, // Score impact (negative)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Ok,
    Warn,
    Block,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Ok => write!(f, "OK"),
            Verdict::Warn => write!(f, "WARN"),
            Verdict::Block => write!(f, "BLOCK"),
        }
    }
}

/// Overall quality verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub verdict: Verdict,

    /// Numeric score (0-100)
    pub score: u32,

    pub checks: Vec<Check>,

    /// Profile used for evaluation
    pub profile: String,

    pub summary: String,
}

impl QualityVerdict {
    pub fn is_blocked(&self) -> bool {
        self.verdict == Verdict::Block
    }

    /// Checks that did not pass
    pub fn findings(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.status != CheckStatus::Ok)
    }
}

/// Quality gate that evaluates simulations
pub struct QualityGate {
    profile: QualityProfile,
}

impl QualityGate {
    pub fn new(profile: QualityProfile) -> Self {
        Self { profile }
    }

    pub fn for_mode(mode: &str) -> Self {
        Self::new(QualityProfile::for_mode(mode))
    }

    pub fn profile(&self) -> &QualityProfile {
        &self.profile
    }

    pub fn evaluate(&self, params: &SimulationParams, revenue: &RevenueBreakdown) -> QualityVerdict {
        let mut checks = Vec::new();

        // === Distribution ===
        let total = params.distribution.total();
        if !total.is_finite() || (total - DISTRIBUTION_TOTAL).abs() >= self.profile.distribution_tolerance {
            let (status, impact) = if self.profile.block_on_imbalance {
                (CheckStatus::Fail, -40)
            } else {
                (CheckStatus::Warn, -20)
            };
            checks.push(Check {
                name: "distribution_total".to_string(),
                status,
                message: format!("Distribution totals {:.1}% (expected 100%)", total),
                impact,
            });
        } else {
            checks.push(ok("distribution_total", format!("Distribution totals {:.1}%", total)));
        }

        let out_of_range: Vec<&str> = params
            .distribution
            .iter()
            .filter(|(_, v)| !in_percent_range(*v))
            .map(|(c, _)| c.key())
            .collect();
        if out_of_range.is_empty() {
            checks.push(ok("category_range", "All categories within 0-100%".to_string()));
        } else {
            checks.push(warn_check(
                "category_range",
                format!("Categories outside 0-100%: {}", out_of_range.join(", ")),
                -10,
            ));
        }

        // === Input ranges ===
        let attendees = params.total_attendees;
        if attendees < self.profile.min_attendees || attendees > self.profile.max_attendees {
            checks.push(warn_check(
                "attendee_range",
                format!(
                    "{} attendees outside {}-{}",
                    attendees, self.profile.min_attendees, self.profile.max_attendees
                ),
                -5,
            ));
        } else {
            checks.push(ok("attendee_range", format!("{} attendees", attendees)));
        }

        if in_percent_range(params.resident_pct) {
            checks.push(ok("resident_range", format!("{}% residents", params.resident_pct)));
        } else {
            checks.push(warn_check(
                "resident_range",
                format!("Resident share {}% outside 0-100%", params.resident_pct),
                -10,
            ));
        }

        if !(MIN_PERCENT..=self.profile.max_municipal_pct).contains(&params.municipal_pct) {
            checks.push(warn_check(
                "municipal_range",
                format!(
                    "Municipal share {}% outside 0-{}%",
                    params.municipal_pct, self.profile.max_municipal_pct
                ),
                -10,
            ));
        } else {
            checks.push(ok("municipal_range", format!("Municipal share {}%", params.municipal_pct)));
        }

        let negative_prices: Vec<&str> = params
            .prices
            .iter()
            .filter(|(_, p)| p.base < 0.0 || p.fee < 0.0)
            .map(|(c, _)| c.key())
            .collect();
        if negative_prices.is_empty() {
            checks.push(ok("negative_prices", "All prices non-negative".to_string()));
        } else {
            checks.push(warn_check(
                "negative_prices",
                format!("Negative prices: {}", negative_prices.join(", ")),
                -10,
            ));
        }

        // === Outcome ===
        if revenue.total_fees > revenue.gross_revenue {
            checks.push(warn_check(
                "fees_exceed_gross",
                format!(
                    "Booking fees {:.2} exceed gross revenue {:.2}",
                    revenue.total_fees, revenue.gross_revenue
                ),
                -15,
            ));
        }

        // NaN never compares below zero; treat it as a loss
        if !revenue.final_net_revenue.is_finite() || revenue.final_net_revenue < 0.0 {
            let (status, impact) = if self.profile.block_on_negative_revenue {
                (CheckStatus::Fail, -40)
            } else {
                (CheckStatus::Warn, -20)
            };
            checks.push(Check {
                name: "net_revenue".to_string(),
                status,
                message: format!("Final net revenue is negative or undefined ({:.2})", revenue.final_net_revenue),
                impact,
            });
        } else {
            checks.push(ok("net_revenue", format!("Final net revenue {:.2}", revenue.final_net_revenue)));
        }

        let score = (100 + checks.iter().map(|c| c.impact).sum::<i32>()).max(0);

        let has_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
        let has_warn = checks.iter().any(|c| c.status == CheckStatus::Warn);

        let verdict = if has_fail {
            Verdict::Block
        } else if has_warn {
            Verdict::Warn
        } else {
            Verdict::Ok
        };

        let summary = if has_fail {
            format!("Blocked: {}", names_with(&checks, CheckStatus::Fail))
        } else if has_warn {
            format!("Passed with warnings: {}", names_with(&checks, CheckStatus::Warn))
        } else {
            "All checks passed".to_string()
        };

        if has_fail {
            warn!(profile = %self.profile.name, %summary, "simulation blocked");
        }

        QualityVerdict {
            verdict,
            score: score as u32,
            checks,
            profile: self.profile.name.clone(),
            summary,
        }
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(QualityProfile::default())
    }
}

fn in_percent_range(value: f64) -> bool {
    (MIN_PERCENT..=MAX_PERCENT).contains(&value)
}

fn ok(name: &str, message: String) -> Check {
    Check {
        name: name.to_string(),
        status: CheckStatus::Ok,
        message,
        impact: 0,
    }
}

fn warn_check(name: &str, message: String, impact: i32) -> Check {
    Check {
        name: name.to_string(),
        status: CheckStatus::Warn,
        message,
        impact,
    }
}

fn names_with(checks: &[Check], status: CheckStatus) -> String {
    checks
        .iter()
        .filter(|c| c.status == status)
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
