//! Least-squares line fit for trend detection.
//!
//! Trend analysis regresses demand against the day index (0..n-1). The
//! design matrix is only two columns, but we still solve through SVD:
//! demand histories can be constant (zero-variance columns after centering)
//! and SVD degrades gracefully where a normal-equations solve would not.

use nalgebra::{DMatrix, DVector};

/// Result of an ordinary least squares fit of `y` against index.
#[derive(Debug, Clone, Copy)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// R-squared of the fit; 0 when the series has no variance.
    pub r_squared: f64,
}

/// Fit `y = intercept + slope * i` over `i = 0..n-1`.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly
/// (callers treat that the same as "no trend information").
pub fn linear_fit(values: &[f64]) -> Option<LinearFit> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let x = DMatrix::from_fn(n, 2, |r, c| if c == 0 { 1.0 } else { r as f64 });
    let y = DVector::from_row_slice(values);

    let svd = x.svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    let mut beta = None;
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(b) = svd.solve(&y, tol) {
            if b.iter().all(|v| v.is_finite()) {
                beta = Some(b);
                break;
            }
        }
    }
    let beta = beta?;

    let intercept = beta[0];
    let slope = beta[1];

    let mean = values.iter().sum::<f64>() / n as f64;
    let ss_res: f64 = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (v - (intercept + slope * i as f64)).powi(2))
        .sum();
    let ss_tot: f64 = values.iter().map(|&v| (v - mean).powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

    Some(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        // y = 2 + 3i
        let values: Vec<f64> = (0..10).map(|i| 2.0 + 3.0 * i as f64).collect();
        let fit = linear_fit(&values).unwrap();
        assert!((fit.slope - 3.0).abs() < 1e-9);
        assert!((fit.intercept - 2.0).abs() < 1e-9);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_series_has_zero_slope_and_r_squared() {
        let fit = linear_fit(&[5.0; 12]).unwrap();
        assert!(fit.slope.abs() < 1e-9);
        assert_eq!(fit.r_squared, 0.0);
    }

    #[test]
    fn too_short_returns_none() {
        assert!(linear_fit(&[1.0]).is_none());
        assert!(linear_fit(&[]).is_none());
    }
}
