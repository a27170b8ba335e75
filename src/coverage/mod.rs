//! Stock coverage: how long current stock lasts, and what to order for a
//! target coverage window.

pub mod bulk;
pub mod calculator;

pub use calculator::CoverageCalculator;
