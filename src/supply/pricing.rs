//! Per-SKU, per-supplier unit prices.

use std::collections::BTreeMap;

use crate::domain::PriceComparison;

/// Unit prices keyed by (sku, supplier). Last write wins.
///
/// Like the supplier catalog, this is a plain in-memory store owned by
/// the caller; no locking happens here.
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    prices: BTreeMap<String, BTreeMap<String, f64>>,
}

impl PricingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_price(&mut self, sku: &str, supplier_id: &str, price: f64) {
        self.prices
            .entry(sku.to_string())
            .or_default()
            .insert(supplier_id.to_string(), price);
    }

    pub fn price(&self, sku: &str, supplier_id: &str) -> Option<f64> {
        self.prices.get(sku)?.get(supplier_id).copied()
    }

    /// All supplier prices for a SKU (empty map when none are known).
    pub fn prices_for(&self, sku: &str) -> BTreeMap<String, f64> {
        self.prices.get(sku).cloned().unwrap_or_default()
    }

    /// Total cost of `quantity` units, when a price is known.
    pub fn cost(&self, sku: &str, supplier_id: &str, quantity: u64) -> Option<f64> {
        Some(self.price(sku, supplier_id)? * quantity as f64)
    }

    /// Supplier prices for a SKU sorted ascending, each annotated with
    /// its premium over the cheapest offer.
    pub fn compare(&self, sku: &str) -> Vec<PriceComparison> {
        let Some(prices) = self.prices.get(sku) else {
            return Vec::new();
        };
        let Some(min_price) = prices.values().copied().reduce(f64::min) else {
            return Vec::new();
        };

        let mut out: Vec<PriceComparison> = prices
            .iter()
            .map(|(supplier_id, &price)| {
                let extra = price - min_price;
                PriceComparison {
                    supplier_id: supplier_id.clone(),
                    price,
                    cheapest: price == min_price,
                    extra_cost: extra,
                    extra_cost_percent: if price > 0.0 { extra / price * 100.0 } else { 0.0 },
                }
            })
            .collect();

        out.sort_by(|a, b| a.price.total_cmp(&b.price));
        out
    }
}
