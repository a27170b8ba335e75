//! Seeded synthetic demand histories.
//!
//! Each generator produces one canonical demand shape (steady, growing,
//! seasonal, erratic). Deterministic for a given seed, so demos and
//! tests get reproducible series without fixture files.

use chrono::{Duration, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

use crate::domain::DemandSeries;

/// Weekly seasonal swing applied by [`seasonal_series`], in units.
const SEASONAL_AMPLITUDE: f64 = 6.0;

fn noisy_series(
    days: usize,
    seed: u64,
    noise_std: f64,
    start: Option<NaiveDate>,
    base: impl Fn(usize) -> f64,
) -> DemandSeries {
    let mut rng = StdRng::seed_from_u64(seed);

    let values: Vec<f64> = (0..days)
        .map(|i| {
            let z: f64 = rng.sample(StandardNormal);
            (base(i) + z * noise_std).max(0.0)
        })
        .collect();

    match start {
        Some(first) => {
            let dates = (0..days)
                .map(|i| first + Duration::days(i as i64))
                .collect();
            DemandSeries::with_dates(values, dates)
        }
        None => DemandSeries::new(values),
    }
}

/// Flat demand around `level` with mild noise.
pub fn steady_series(days: usize, level: f64, seed: u64, start: Option<NaiveDate>) -> DemandSeries {
    noisy_series(days, seed, level * 0.05, start, |_| level)
}

/// Demand drifting linearly from `level` at `daily_growth` per day.
pub fn growing_series(
    days: usize,
    level: f64,
    daily_growth: f64,
    seed: u64,
    start: Option<NaiveDate>,
) -> DemandSeries {
    noisy_series(days, seed, level * 0.05, start, |i| {
        level + daily_growth * i as f64
    })
}

/// Weekly sinusoid around `level`.
pub fn seasonal_series(days: usize, level: f64, seed: u64, start: Option<NaiveDate>) -> DemandSeries {
    noisy_series(days, seed, level * 0.03, start, |i| {
        level + SEASONAL_AMPLITUDE * (i as f64 * std::f64::consts::TAU / 7.0).sin()
    })
}

/// High-variance demand with no structure.
pub fn erratic_series(days: usize, level: f64, seed: u64, start: Option<NaiveDate>) -> DemandSeries {
    noisy_series(days, seed, level * 0.8, start, |_| level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{coefficient_of_variation, mean};

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = steady_series(28, 10.0, 42, None);
        let b = steady_series(28, 10.0, 42, None);
        let c = steady_series(28, 10.0, 43, None);
        assert_eq!(a.values, b.values);
        assert_ne!(a.values, c.values);
    }

    #[test]
    fn values_are_never_negative() {
        let s = erratic_series(90, 5.0, 7, None);
        assert!(s.values.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn dates_are_consecutive_when_requested() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let s = steady_series(14, 10.0, 1, Some(start));
        let dates = s.dates.as_ref().unwrap();
        assert_eq!(dates.len(), 14);
        assert_eq!(dates[0], start);
        assert_eq!(dates[13], start + Duration::days(13));
    }

    #[test]
    fn shapes_have_the_intended_character() {
        let steady = steady_series(56, 10.0, 11, None);
        assert!(coefficient_of_variation(&steady.values) < 0.2);

        let growing = growing_series(56, 10.0, 0.5, 11, None);
        let first_half = mean(&growing.values[..28]);
        let second_half = mean(&growing.values[28..]);
        assert!(second_half > first_half + 5.0);

        let erratic = erratic_series(200, 10.0, 11, None);
        assert!(
            coefficient_of_variation(&erratic.values)
                > coefficient_of_variation(&steady.values)
        );
    }
}
