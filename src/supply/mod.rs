//! Supplier scheduling, pricing, stockout risk, and ranked supplier
//! selection.

pub mod catalog;
pub mod optimizer;
pub mod pricing;
pub mod risk;

pub use catalog::SupplierCatalog;
pub use optimizer::SupplierOptimizer;
pub use pricing::PricingTable;
pub use risk::assess_risk;
