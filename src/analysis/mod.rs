//! Leaf analytics over a demand series: cleaning, trend, seasonality,
//! classification, and confidence intervals.
//!
//! Everything here is a pure transform; the orchestration lives in
//! [`crate::forecast`].

pub mod classify;
pub mod confidence;
pub mod outliers;
pub mod seasonal;
pub mod trend;

pub use classify::classify;
pub use confidence::confidence_interval;
pub use outliers::{OutlierMethod, remove_outliers};
pub use seasonal::{
    HoltWintersForecaster, SeasonalForecaster, WeightedAverageForecaster, decompose,
};
pub use trend::{analyze_trend, day_of_week_pattern};
