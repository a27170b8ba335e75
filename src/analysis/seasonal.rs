//! Seasonal decomposition and the pluggable seasonal forecast capability.
//!
//! Forecasting has two interchangeable implementations behind one trait:
//!
//! - [`HoltWintersForecaster`]: additive trend + seasonal exponential
//!   smoothing, the preferred path when at least two full periods of data
//!   exist
//! - [`WeightedAverageForecaster`]: an exponentially weighted average of
//!   the whole series, always available
//!
//! Both return `None` instead of failing when their preconditions are not
//! met; the orchestrator treats absence as "use the fallback", never as a
//! fatal condition.

use crate::domain::{Decomposition, ForecastMethod};
use crate::math::{linear_fit, mean, population_std};

/// A short-horizon daily demand forecaster.
pub trait SeasonalForecaster {
    fn method(&self) -> ForecastMethod;

    /// Forecast `horizon` steps ahead, or `None` when the series is too
    /// short for this method.
    fn forecast(&self, values: &[f64], horizon: usize) -> Option<Vec<f64>>;
}

/// Additive Holt-Winters smoothing with fixed smoothing constants.
#[derive(Debug, Clone, Copy)]
pub struct HoltWintersForecaster {
    pub period: usize,
    /// Level smoothing.
    pub alpha: f64,
    /// Trend smoothing.
    pub beta: f64,
    /// Seasonal smoothing.
    pub gamma: f64,
}

impl Default for HoltWintersForecaster {
    fn default() -> Self {
        Self {
            period: 7,
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.2,
        }
    }
}

impl SeasonalForecaster for HoltWintersForecaster {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::SeasonalSmoothing
    }

    fn forecast(&self, values: &[f64], horizon: usize) -> Option<Vec<f64>> {
        let p = self.period;
        let n = values.len();
        if p == 0 || n < 2 * p {
            return None;
        }

        // Initialization: level from the first period, trend from the
        // period-over-period change, seasonal indices from the first
        // period's deviations.
        let first_mean = mean(&values[..p]);
        let second_mean = mean(&values[p..2 * p]);
        let mut level = first_mean;
        let mut trend = (second_mean - first_mean) / p as f64;
        let mut seasonal: Vec<f64> = values[..p].iter().map(|v| v - first_mean).collect();

        for (t, &y) in values.iter().enumerate() {
            let s = seasonal[t % p];
            let last_level = level;
            level = self.alpha * (y - s) + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - last_level) + (1.0 - self.beta) * trend;
            seasonal[t % p] = self.gamma * (y - level) + (1.0 - self.gamma) * s;
        }

        let out: Vec<f64> = (0..horizon)
            .map(|h| level + (h as f64 + 1.0) * trend + seasonal[(n + h) % p])
            .collect();

        if out.iter().any(|v| !v.is_finite()) {
            return None;
        }
        Some(out)
    }
}

/// Exponentially weighted moving average of the whole series.
///
/// Weights rise from e⁻¹ to 1 across the series, so the most recent
/// observations dominate. The single smoothed value is multiplied by
/// `adjustment` (trend correction supplied by the orchestrator) and
/// repeated across the horizon.
#[derive(Debug, Clone, Copy)]
pub struct WeightedAverageForecaster {
    pub adjustment: f64,
}

impl Default for WeightedAverageForecaster {
    fn default() -> Self {
        Self { adjustment: 1.0 }
    }
}

impl SeasonalForecaster for WeightedAverageForecaster {
    fn method(&self) -> ForecastMethod {
        ForecastMethod::WeightedMovingAverage
    }

    fn forecast(&self, values: &[f64], horizon: usize) -> Option<Vec<f64>> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mut weight_sum = 0.0;
        let mut acc = 0.0;
        for (i, &v) in values.iter().enumerate() {
            // linspace(-1, 0, n) exponentiated.
            let exponent = if n == 1 {
                0.0
            } else {
                -1.0 + i as f64 / (n as f64 - 1.0)
            };
            let w = exponent.exp();
            weight_sum += w;
            acc += w * v;
        }

        let value = acc / weight_sum * self.adjustment;
        Some(vec![value; horizon])
    }
}

/// Classical additive decomposition into trend, seasonal, and residual.
///
/// Trend is a centered moving average with the edges filled by a linear
/// fit over the interior (the series is too short to waste a full period
/// at each end). Returns `None` when fewer than two full periods exist.
pub fn decompose(values: &[f64], period: usize) -> Option<Decomposition> {
    let n = values.len();
    if period < 2 || n < 2 * period {
        return None;
    }

    let trend = centered_trend(values, period)?;

    // Average the detrended values per position in the period, then
    // center the indices so the seasonal component sums to ~zero.
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, (&v, &t)) in values.iter().zip(&trend).enumerate() {
        sums[i % period] += v - t;
        counts[i % period] += 1;
    }
    let mut indices: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(&s, &c)| if c > 0 { s / c as f64 } else { 0.0 })
        .collect();
    let index_mean = mean(&indices);
    for idx in indices.iter_mut() {
        *idx -= index_mean;
    }

    let seasonal: Vec<f64> = (0..n).map(|i| indices[i % period]).collect();
    let residual: Vec<f64> = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((&v, &t), &s)| v - t - s)
        .collect();

    let series_std = population_std(values);
    let seasonal_strength = if series_std > 0.0 {
        population_std(&seasonal) / series_std
    } else {
        0.0
    };

    Some(Decomposition {
        trend,
        seasonal,
        residual,
        seasonal_strength,
    })
}

/// Centered moving average of width `period`, with linear extrapolation
/// over the half-window lost at each edge.
fn centered_trend(values: &[f64], period: usize) -> Option<Vec<f64>> {
    let n = values.len();
    let half = period / 2;

    let mut interior = Vec::with_capacity(n.saturating_sub(2 * half));
    for i in half..n - half {
        let window_mean = if period % 2 == 1 {
            mean(&values[i - half..=i + half])
        } else {
            // Even period: 2xP centered average (half weight at the ends).
            let mut acc = 0.5 * values[i - half] + 0.5 * values[i + half];
            for j in (i - half + 1)..(i + half) {
                acc += values[j];
            }
            acc / period as f64
        };
        interior.push(window_mean);
    }

    // Extend the interior trend linearly to cover the edges.
    let fit = linear_fit(&interior)?;
    let at = |i: usize| -> f64 {
        if (half..n - half).contains(&i) {
            interior[i - half]
        } else {
            fit.intercept + fit.slope * (i as f64 - half as f64)
        }
    };

    Some((0..n).map(at).collect())
}
