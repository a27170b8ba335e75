//! Ranked supplier selection: cost, schedule, and stockout risk folded
//! into one score.

use chrono::NaiveDate;

use crate::domain::{RiskLevel, SupplierComparison, SupplierOption};
use crate::supply::catalog::SupplierCatalog;
use crate::supply::pricing::PricingTable;
use crate::supply::risk::assess_risk;

/// Weight of the risk score in the ranking. Risk dominates: a full
/// point of risk outweighs any realistic cost difference.
const RISK_WEIGHT: f64 = 1000.0;
/// Weight of (1 - reliability); a minor tiebreak.
const RELIABILITY_WEIGHT: f64 = 100.0;

const DEFAULT_RISK_SAFETY_FACTOR: f64 = 1.2;

/// Ranks candidate suppliers for one order.
///
/// Borrows the catalog and pricing table; both stay owned (and, if
/// shared, synchronized) by the caller.
#[derive(Debug, Clone, Copy)]
pub struct SupplierOptimizer<'a> {
    pub catalog: &'a SupplierCatalog,
    pub pricing: &'a PricingTable,
}

impl<'a> SupplierOptimizer<'a> {
    pub fn new(catalog: &'a SupplierCatalog, pricing: &'a PricingTable) -> Self {
        Self { catalog, pricing }
    }

    /// Rank suppliers for an order, best first.
    ///
    /// Suppliers without a price for the SKU are skipped entirely, not
    /// scored or reported as failed. `available` narrows the candidate
    /// set to specific supplier ids; unknown ids are ignored.
    pub fn rank(
        &self,
        sku: &str,
        current_stock: f64,
        daily_demand: f64,
        order_quantity: u64,
        from_date: NaiveDate,
        available: Option<&[&str]>,
    ) -> Vec<SupplierOption> {
        let suppliers: Vec<_> = match available {
            Some(ids) => ids.iter().filter_map(|id| self.catalog.get(id)).collect(),
            None => self.catalog.suppliers().collect(),
        };

        let mut options = Vec::with_capacity(suppliers.len());
        for supplier in suppliers {
            let Some(unit_price) = self.pricing.price(sku, &supplier.id) else {
                continue;
            };

            let order_date = supplier.next_order_date(from_date);
            let delivery_date = supplier.delivery_date(order_date);
            let days_until_order = (order_date - from_date).num_days().max(0) as u32;
            let days_until_delivery = (delivery_date - from_date).num_days().max(0) as u32;

            let total_cost = unit_price * order_quantity as f64;
            let risk = assess_risk(
                current_stock,
                daily_demand,
                days_until_delivery,
                DEFAULT_RISK_SAFETY_FACTOR,
            );

            let score = risk.score * RISK_WEIGHT
                + total_cost
                + (1.0 - supplier.reliability) * RELIABILITY_WEIGHT;

            options.push(SupplierOption {
                supplier_id: supplier.id.clone(),
                supplier_name: supplier.name.clone(),
                order_date,
                delivery_date,
                days_until_order,
                days_until_delivery,
                unit_price,
                quantity: order_quantity,
                total_cost,
                risk,
                reliability: supplier.reliability,
                score,
                can_order_today: supplier.can_order_on(from_date),
                notes: supplier.notes.clone(),
                recommended: false,
                reason: None,
                savings_vs_max: 0.0,
                savings_percent: 0.0,
            });
        }

        options.sort_by(|a, b| a.score.total_cmp(&b.score));

        if let Some(best) = options.first_mut() {
            best.recommended = true;
            best.reason = Some(recommendation_reason(best));
        }

        options
    }

    /// Rank plus a savings pass against the most expensive option.
    ///
    /// Returns `None` when no supplier has a price for the SKU.
    pub fn compare(
        &self,
        sku: &str,
        current_stock: f64,
        daily_demand: f64,
        order_quantity: u64,
        from_date: NaiveDate,
    ) -> Option<SupplierComparison> {
        let mut options = self.rank(
            sku,
            current_stock,
            daily_demand,
            order_quantity,
            from_date,
            None,
        );
        if options.is_empty() {
            return None;
        }

        let max_cost = options
            .iter()
            .map(|o| o.total_cost)
            .fold(f64::MIN, f64::max);
        for option in options.iter_mut() {
            option.savings_vs_max = max_cost - option.total_cost;
            option.savings_percent = if max_cost > 0.0 {
                option.savings_vs_max / max_cost * 100.0
            } else {
                0.0
            };
        }

        let recommended = options[0].clone();
        Some(SupplierComparison {
            max_savings: recommended.savings_vs_max,
            max_savings_percent: recommended.savings_percent,
            recommended,
            options,
            comparison_date: from_date,
        })
    }
}

/// Human-readable reason attached to the top-ranked option.
fn recommendation_reason(option: &SupplierOption) -> String {
    let mut reasons = Vec::new();

    match option.risk.level {
        RiskLevel::Critical | RiskLevel::High => {
            reasons.push(format!(
                "Stock level critical ({:.1} days left)",
                option.risk.days_remaining
            ));
            if option.can_order_today {
                reasons.push("Can order immediately".to_string());
            }
        }
        RiskLevel::Medium => {
            reasons.push("Stock getting low - order soon recommended".to_string());
        }
        RiskLevel::Low => {
            reasons.push("Stock adequate but approaching reorder point".to_string());
        }
        RiskLevel::None => {
            reasons.push("Stock levels good".to_string());
        }
    }

    if option.days_until_delivery <= 2 {
        reasons.push(format!(
            "Fast delivery ({} days)",
            option.days_until_delivery
        ));
    } else if option.days_until_delivery >= 5 {
        reasons.push(format!(
            "Longer wait time ({} days)",
            option.days_until_delivery
        ));
    }

    reasons.join("; ")
}
