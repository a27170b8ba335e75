//! Outlier detection and removal for demand histories.
//!
//! Sales data picks up one-off distortions (bulk purchases, stock
//! corrections, promotions) that would poison every downstream statistic.
//! Two interchangeable detectors are provided; both only *flag* indices,
//! and removal is guarded so a short volatile series is never gutted.

use serde::{Deserialize, Serialize};

use crate::math::{mean, percentile, population_std};

/// Which detector to use when cleaning a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// |x - mean| / std > 3.0 (population std). No-op for n < 3 or std = 0.
    ZScore,
    /// Outside [Q1 - 1.5 IQR, Q3 + 1.5 IQR]. No-op for n < 4.
    Iqr,
}

const Z_THRESHOLD: f64 = 3.0;
const IQR_MULTIPLIER: f64 = 1.5;

/// Maximum share of the series a removal pass may discard.
const MAX_REMOVAL_SHARE: f64 = 0.5;

/// Indices whose z-score exceeds the threshold.
pub fn detect_zscore(values: &[f64]) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }
    let m = mean(values);
    let std = population_std(values);
    if std == 0.0 {
        return Vec::new();
    }
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| ((v - m) / std).abs() > Z_THRESHOLD)
        .map(|(i, _)| i)
        .collect()
}

/// Indices outside the Tukey fences.
pub fn detect_iqr(values: &[f64]) -> Vec<usize> {
    if values.len() < 4 {
        return Vec::new();
    }
    let q1 = percentile(values, 25.0);
    let q3 = percentile(values, 75.0);
    let iqr = q3 - q1;
    let lower = q1 - IQR_MULTIPLIER * iqr;
    let upper = q3 + IQR_MULTIPLIER * iqr;
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v < lower || v > upper)
        .map(|(i, _)| i)
        .collect()
}

/// Remove flagged observations from a series.
///
/// Returns the cleaned copy plus the removed indices. If removal would
/// discard more than half the points, the original series comes back
/// untouched with an empty index list; over-aggressive cleaning on a
/// short or volatile series is worse than keeping the noise.
pub fn remove_outliers(values: &[f64], method: OutlierMethod) -> (Vec<f64>, Vec<usize>) {
    if values.len() < 3 {
        return (values.to_vec(), Vec::new());
    }

    let flagged = match method {
        OutlierMethod::ZScore => detect_zscore(values),
        OutlierMethod::Iqr => detect_iqr(values),
    };

    let cleaned: Vec<f64> = values
        .iter()
        .enumerate()
        .filter(|(i, _)| !flagged.contains(i))
        .map(|(_, &v)| v)
        .collect();

    if (cleaned.len() as f64) < values.len() as f64 * MAX_REMOVAL_SHARE {
        return (values.to_vec(), Vec::new());
    }

    (cleaned, flagged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zscore_flags_single_spike() {
        // A lone spike among n points tops out near z = sqrt(n - 1) with
        // the population std, so n must be 11+ for the 3.0 threshold to
        // fire at all. Here n=14 puts the spike at z ~ 3.6.
        let data = [
            10.0, 11.0, 9.0, 10.0, 12.0, 10.0, 9.0, 11.0, 10.0, 10.0, 9.0, 11.0, 10.0, 500.0,
        ];
        let flagged = detect_zscore(&data);
        assert_eq!(flagged, vec![13]);

        let (cleaned, removed) = remove_outliers(&data, OutlierMethod::ZScore);
        assert_eq!(removed, vec![13]);
        assert_eq!(cleaned, &data[..13]);
    }

    #[test]
    fn zscore_noop_on_constant_series() {
        let data = [5.0; 8];
        assert!(detect_zscore(&data).is_empty());
    }

    #[test]
    fn zscore_noop_below_three_points() {
        assert!(detect_zscore(&[1.0, 100.0]).is_empty());
    }

    #[test]
    fn iqr_flags_extremes() {
        let data = [10.0, 11.0, 9.0, 10.0, 12.0, 10.0, 9.0, 11.0, 10.0, 60.0];
        let flagged = detect_iqr(&data);
        assert_eq!(flagged, vec![9]);
    }

    #[test]
    fn iqr_noop_below_four_points() {
        assert!(detect_iqr(&[1.0, 2.0, 50.0]).is_empty());
    }

    #[test]
    fn short_series_is_returned_unchanged() {
        let data = [1.0, 100.0];
        let (cleaned, removed) = remove_outliers(&data, OutlierMethod::ZScore);
        assert_eq!(cleaned, data);
        assert!(removed.is_empty());
    }

    #[test]
    fn cleaning_never_discards_more_than_half() {
        // The 50% guard: whatever the detectors flag, at least half of the
        // observations survive.
        let data = [0.0, 0.0, 0.0, 50.0, 60.0, 70.0, 80.0];
        for method in [OutlierMethod::ZScore, OutlierMethod::Iqr] {
            let (cleaned, _) = remove_outliers(&data, method);
            assert!(cleaned.len() * 2 >= data.len());
        }
    }
}
