//! `replen`: replenishment decision engine.
//!
//! Turns a store's recent sales history into a replenishment decision: how
//! much of a SKU to order, when, from which supplier, and how urgently.
//!
//! The crate is a pure library so that:
//!
//! - every analytic step is testable without a running service
//! - the transport layer (HTTP, queues, whatever) stays a thin shell that
//!   only serializes the result types defined in [`domain`]
//! - degenerate inputs come back as explicit result values, never panics
//!
//! Pipeline shape: cleaning and classification feed the forecast
//! orchestrator ([`forecast::ForecastEngine`]); its output feeds the
//! coverage calculator ([`coverage`]); coverage output feeds the supplier
//! optimizer ([`supply`]).

pub mod analysis;
pub mod coverage;
pub mod data;
pub mod domain;
pub mod forecast;
pub mod math;
pub mod reorder;
pub mod report;
pub mod supply;
