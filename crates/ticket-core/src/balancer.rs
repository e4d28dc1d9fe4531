//! Distribution Balancer
//!
//! Keeps the category distribution near 100% when one category is edited by
//! rescaling the others in proportion to their current values. Each rescaled
//! value is rounded to a whole percent on its own, so the total can drift
//! from 100 by a few tenths; that drift is left in place.

use tracing::debug;

use crate::constants::DISTRIBUTION_TOTAL;
use crate::data_model::{Category, Distribution};

/// Apply an edit of `changed` to `new_value`.
///
/// With `auto_balance` off only `changed` moves. With it on, the remaining
/// `100 - new_value` is spread over the other categories:
/// - nothing left: the others drop to 0
/// - the others are all 0: equal shares
/// - otherwise: proportional to their current values
pub fn rebalance(
    distribution: &Distribution,
    changed: Category,
    new_value: f64,
    auto_balance: bool,
) -> Distribution {
    let mut next = distribution.with(changed, new_value);

    if !auto_balance {
        debug!(category = %changed, value = new_value, "manual edit, no rebalance");
        return next;
    }

    let others: Vec<Category> = Category::ALL
        .iter()
        .copied()
        .filter(|c| *c != changed)
        .collect();

    let remaining = DISTRIBUTION_TOTAL - new_value;

    if remaining <= 0.0 {
        debug!(category = %changed, value = new_value, "no room left, zeroing other categories");
        for category in &others {
            next.set(*category, 0.0);
        }
        return next;
    }

    let current_sum: f64 = others.iter().map(|c| distribution.get(*c)).sum();

    if current_sum == 0.0 {
        let share = round_half_up(remaining / others.len() as f64);
        debug!(category = %changed, remaining, share, "spreading remainder equally");
        for category in &others {
            next.set(*category, share);
        }
        return next;
    }

    let scale = remaining / current_sum;
    debug!(category = %changed, remaining, scale, "rescaling other categories");
    for category in &others {
        next.set(*category, round_half_up(distribution.get(*category) * scale));
    }

    next
}

/// Nearest whole percent, halves towards +inf (-2.5 becomes -2)
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_edit_leaves_others() {
        let before = Distribution::default();
        let after = rebalance(&before, Category::OpenTicket, 50.0, false);

        assert_eq!(after.open_ticket, 50.0);
        assert_eq!(after.ticket_online, 20.0);
        assert_eq!(after.total(), 140.0);
    }

    #[test]
    fn test_proportional_rescale() {
        // others: 20,20,20,15,15 = 90; remaining 80 → scale 8/9
        let after = rebalance(&Distribution::default(), Category::OpenTicket, 20.0, true);

        assert_eq!(after.open_ticket, 20.0);
        assert_eq!(after.ticket_online, 18.0); // 17.78
        assert_eq!(after.ticket_pre_event, 18.0);
        assert_eq!(after.ticket_during_event, 18.0);
        assert_eq!(after.two_day_offline, 13.0); // 13.33
        assert_eq!(after.two_day_pre_event, 13.0);
        assert_eq!(after.total(), 100.0);
    }

    #[test]
    fn test_rounding_drift_is_kept() {
        // others: 20,20,15,15,10 = 80; remaining 67 → scale 0.8375
        let after = rebalance(&Distribution::default(), Category::TicketOnline, 33.0, true);

        assert_eq!(after.ticket_pre_event, 17.0); // 16.75
        assert_eq!(after.ticket_during_event, 17.0);
        assert_eq!(after.two_day_offline, 13.0); // 12.5625
        assert_eq!(after.two_day_pre_event, 13.0);
        assert_eq!(after.open_ticket, 8.0); // 8.375
        assert_eq!(after.total(), 101.0);
    }

    #[test]
    fn test_full_value_zeroes_others() {
        let after = rebalance(&Distribution::default(), Category::TwoDayOffline, 100.0, true);
        assert_eq!(after.two_day_offline, 100.0);
        for (category, value) in after.iter() {
            if category != Category::TwoDayOffline {
                assert_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn test_over_100_keeps_value() {
        let after = rebalance(&Distribution::default(), Category::TicketOnline, 130.0, true);
        assert_eq!(after.ticket_online, 130.0);
        assert_eq!(after.total(), 130.0);
    }

    #[test]
    fn test_equal_split_when_others_empty() {
        let before = Distribution::zero().with(Category::OpenTicket, 100.0);
        let after = rebalance(&before, Category::OpenTicket, 40.0, true);

        // 60 / 5 = 12 each
        for (category, value) in after.iter() {
            let expected = if category == Category::OpenTicket { 40.0 } else { 12.0 };
            assert_eq!(value, expected, "{}", category);
        }
    }

    #[test]
    fn test_equal_split_rounds_each_share() {
        let before = Distribution::zero();
        let after = rebalance(&before, Category::TicketOnline, 3.0, true);

        // 97 / 5 = 19.4 → 19
        assert_eq!(after.ticket_pre_event, 19.0);
        assert_eq!(after.total(), 98.0);
    }

    #[test]
    fn test_negative_halves_round_up() {
        // others: -5,20,20,15,15 = 65; remaining 32.5 → scale 0.5
        let before = Distribution::default().with(Category::TicketOnline, -5.0);
        let after = rebalance(&before, Category::OpenTicket, 67.5, true);

        assert_eq!(after.ticket_online, -2.0); // -2.5
        assert_eq!(after.ticket_pre_event, 10.0);
        assert_eq!(after.two_day_offline, 8.0); // 7.5
    }

    #[test]
    fn test_input_is_not_mutated() {
        let before = Distribution::default();
        let _ = rebalance(&before, Category::OpenTicket, 60.0, true);
        assert_eq!(before, Distribution::default());
    }
}
