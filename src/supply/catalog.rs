//! Supplier scheduling rules and the in-memory supplier catalog.
//!
//! The catalog is an explicit object constructed by the caller and
//! passed into the optimizer; there is no process-wide supplier list.
//! It is a plain mutable store and callers provide any synchronization.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::Supplier;

impl Supplier {
    /// Whether orders can be placed on this date's weekday.
    pub fn can_order_on(&self, date: NaiveDate) -> bool {
        self.order_days.contains(&date.weekday())
    }

    /// Next date (today inclusive) on which an order can be placed.
    ///
    /// Scans at most a week ahead; a non-empty day set always hits
    /// within that window.
    pub fn next_order_date(&self, from_date: NaiveDate) -> NaiveDate {
        if self.can_order_on(from_date) {
            return from_date;
        }
        for i in 1..8 {
            let candidate = from_date + Duration::days(i);
            if self.can_order_on(candidate) {
                return candidate;
            }
        }
        from_date + Duration::days(7)
    }

    /// Delivery date for an order placed on `order_date`.
    pub fn delivery_date(&self, order_date: NaiveDate) -> NaiveDate {
        order_date + Duration::days(self.lead_time_days as i64)
    }
}

/// Suppliers keyed by id.
#[derive(Debug, Clone, Default)]
pub struct SupplierCatalog {
    suppliers: BTreeMap<String, Supplier>,
}

impl SupplierCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a supplier (keyed by id, last write wins).
    pub fn add_supplier(&mut self, supplier: Supplier) {
        self.suppliers.insert(supplier.id.clone(), supplier);
    }

    pub fn get(&self, supplier_id: &str) -> Option<&Supplier> {
        self.suppliers.get(supplier_id)
    }

    pub fn suppliers(&self) -> impl Iterator<Item = &Supplier> {
        self.suppliers.values()
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// Whether an order can be placed with `supplier_id` on `date`.
    pub fn can_order_from(&self, supplier_id: &str, date: NaiveDate) -> bool {
        self.get(supplier_id)
            .is_some_and(|s| s.can_order_on(date))
    }

    /// Earliest delivery from a supplier, ordering on or after `from_date`.
    pub fn next_delivery_date(&self, supplier_id: &str, from_date: NaiveDate) -> Option<NaiveDate> {
        let supplier = self.get(supplier_id)?;
        Some(supplier.delivery_date(supplier.next_order_date(from_date)))
    }
}
