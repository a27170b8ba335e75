//! Student-t confidence interval around mean daily demand.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::domain::ConfidenceInterval;
use crate::math::{mean, sample_std};

/// Interval around the sample mean at the requested confidence level.
///
/// Uses the t-distribution with n-1 degrees of freedom, so short
/// histories get appropriately wide intervals. The lower bound is
/// clamped at zero; demand cannot be negative. Below two observations
/// everything is zero (the level is still echoed back).
pub fn confidence_interval(values: &[f64], confidence_level: f64) -> ConfidenceInterval {
    let n = values.len();
    if n < 2 {
        return ConfidenceInterval {
            mean: 0.0,
            std: 0.0,
            lower: 0.0,
            upper: 0.0,
            margin: 0.0,
            confidence_level,
        };
    }

    let m = mean(values);
    let std = sample_std(values);

    let df = (n - 1) as f64;
    let t_value = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.inverse_cdf((1.0 + confidence_level) / 2.0),
        // df >= 1 here, so this arm is unreachable in practice.
        Err(_) => 0.0,
    };

    let margin = t_value * std / (n as f64).sqrt();

    ConfidenceInterval {
        mean: m,
        std,
        lower: (m - margin).max(0.0),
        upper: m + margin,
        margin,
        confidence_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_brackets_the_mean() {
        let data = [10.0, 12.0, 8.0, 15.0, 11.0, 9.0, 13.0];
        let ci = confidence_interval(&data, 0.95);
        assert!(ci.lower < ci.mean && ci.mean < ci.upper);
        assert!((ci.upper - ci.mean - ci.margin).abs() < 1e-9);
        assert_eq!(ci.confidence_level, 0.95);
    }

    #[test]
    fn wider_level_gives_wider_interval() {
        let data = [10.0, 12.0, 8.0, 15.0, 11.0, 9.0, 13.0];
        let ci95 = confidence_interval(&data, 0.95);
        let ci99 = confidence_interval(&data, 0.99);
        assert!(ci99.margin > ci95.margin);
    }

    #[test]
    fn t_critical_value_matches_table() {
        // n=7 -> df=6; two-sided 95% t critical value is 2.447.
        let dist = StudentsT::new(0.0, 1.0, 6.0).unwrap();
        let t = dist.inverse_cdf(0.975);
        assert!((t - 2.447).abs() < 0.01, "t={t}");
    }

    #[test]
    fn lower_bound_is_clamped_at_zero() {
        // Tiny mean, large spread: the raw lower bound would be negative.
        let data = [0.0, 0.0, 0.0, 10.0];
        let ci = confidence_interval(&data, 0.95);
        assert_eq!(ci.lower, 0.0);
        assert!(ci.upper > 0.0);
    }

    #[test]
    fn single_point_returns_zeros() {
        let ci = confidence_interval(&[5.0], 0.95);
        assert_eq!(ci.mean, 0.0);
        assert_eq!(ci.margin, 0.0);
        assert_eq!(ci.confidence_level, 0.95);
    }
}
