//! Small statistical helpers shared by the analysis modules.

pub mod ols;
pub mod stats;

pub use ols::{LinearFit, linear_fit};
pub use stats::{coefficient_of_variation, mean, percentile, population_std, sample_std};
