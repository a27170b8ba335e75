//! Bulk ordering helpers: MOQ compliance and volume discounts.

use crate::domain::{DiscountTier, DiscountedOrder, MoqAdjustment};

/// Adjust a desired quantity to the supplier's MOQ and order increment.
///
/// Below the MOQ the quantity is raised to it; above, it is rounded up
/// to the nearest increment when the supplier only ships in multiples
/// (boxes of 10, pallets of 48, ...).
pub fn moq_compliance(order_quantity: u64, moq: u64, moq_increment: u64) -> MoqAdjustment {
    let adjusted_quantity = if order_quantity < moq {
        moq
    } else if moq_increment > 1 {
        order_quantity.div_ceil(moq_increment) * moq_increment
    } else {
        order_quantity
    };

    MoqAdjustment {
        requested_quantity: order_quantity,
        adjusted_quantity,
        moq,
        moq_increment,
        extra_units: adjusted_quantity - order_quantity,
    }
}

/// Apply the best applicable volume discount tier.
///
/// Tiers need not be pre-sorted; the highest tier whose `min_qty` is
/// met wins. With no applicable tier the base price stands.
pub fn volume_discount(
    order_quantity: u64,
    base_price: f64,
    discount_tiers: &[DiscountTier],
) -> DiscountedOrder {
    let mut tiers = discount_tiers.to_vec();
    tiers.sort_by(|a, b| b.min_qty.cmp(&a.min_qty));

    let tier = tiers
        .into_iter()
        .find(|t| order_quantity >= t.min_qty);
    let discount_percent = tier.map_or(0.0, |t| t.discount_percent);

    let discount_amount = base_price * (discount_percent / 100.0);
    let final_price = base_price - discount_amount;

    DiscountedOrder {
        order_quantity,
        base_price,
        discount_percent,
        discount_amount,
        final_price,
        total_cost: final_price * order_quantity as f64,
        total_savings: discount_amount * order_quantity as f64,
        tier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_moq_is_raised() {
        let adj = moq_compliance(30, 50, 1);
        assert_eq!(adj.adjusted_quantity, 50);
        assert_eq!(adj.extra_units, 20);
    }

    #[test]
    fn rounds_up_to_increment() {
        let adj = moq_compliance(101, 50, 10);
        assert_eq!(adj.adjusted_quantity, 110);
        assert_eq!(adj.extra_units, 9);
    }

    #[test]
    fn exact_multiple_is_unchanged() {
        let adj = moq_compliance(120, 50, 10);
        assert_eq!(adj.adjusted_quantity, 120);
        assert_eq!(adj.extra_units, 0);
    }

    #[test]
    fn no_increment_no_change() {
        let adj = moq_compliance(73, 50, 1);
        assert_eq!(adj.adjusted_quantity, 73);
    }

    #[test]
    fn single_tier_worked_example() {
        // 150 units at base 10 with 10% off above 100: final 9.0,
        // total 1350, savings 150.
        let tiers = [DiscountTier {
            min_qty: 100,
            discount_percent: 10.0,
        }];
        let order = volume_discount(150, 10.0, &tiers);
        assert_eq!(order.discount_percent, 10.0);
        assert!((order.final_price - 9.0).abs() < 1e-12);
        assert!((order.total_cost - 1350.0).abs() < 1e-9);
        assert!((order.total_savings - 150.0).abs() < 1e-9);
    }

    #[test]
    fn highest_met_tier_wins_regardless_of_order() {
        let tiers = [
            DiscountTier {
                min_qty: 500,
                discount_percent: 20.0,
            },
            DiscountTier {
                min_qty: 100,
                discount_percent: 10.0,
            },
            DiscountTier {
                min_qty: 250,
                discount_percent: 15.0,
            },
        ];
        let order = volume_discount(300, 10.0, &tiers);
        assert_eq!(order.discount_percent, 15.0);
        assert_eq!(order.tier.unwrap().min_qty, 250);
    }

    #[test]
    fn no_tier_met_keeps_base_price() {
        let tiers = [DiscountTier {
            min_qty: 100,
            discount_percent: 10.0,
        }];
        let order = volume_discount(50, 10.0, &tiers);
        assert_eq!(order.discount_percent, 0.0);
        assert_eq!(order.final_price, 10.0);
        assert!(order.tier.is_none());
    }
}
