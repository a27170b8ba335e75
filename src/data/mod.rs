//! Synthetic demand series generation for demos and tests.

pub mod sample;

pub use sample::{erratic_series, growing_series, seasonal_series, steady_series};
