//! Forecast orchestration: one call that runs the whole analytic
//! pipeline over a demand series.
//!
//! Keeping the sequencing in one place mirrors the rest of the crate's
//! shape: the leaf analytics stay pure and individually testable, and
//! the engine only decides what runs when and which forecaster applies.

use crate::analysis::{
    HoltWintersForecaster, OutlierMethod, SeasonalForecaster, WeightedAverageForecaster,
    classify, confidence_interval, day_of_week_pattern, remove_outliers,
};
use crate::analysis::seasonal::decompose;
use crate::analysis::trend::analyze_trend;
use crate::domain::{
    DemandAnalysis, DemandClassification, DemandPattern, DemandSeries, ForecastResult,
    InsufficientHistory, MIN_HISTORY_POINTS, Recommendation, TrendResult,
};
use crate::math::mean;

/// Cleaned length at which the seasonal smoothing path is attempted.
const SEASONAL_MIN_POINTS: usize = 14;

/// Forecast horizon in days.
const HORIZON: usize = 7;

/// The replenishment forecast orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine {
    pub outlier_method: OutlierMethod,
    /// Seasonal period in days.
    pub period: usize,
    pub confidence_level: f64,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            outlier_method: OutlierMethod::ZScore,
            period: 7,
            confidence_level: 0.95,
        }
    }
}

impl ForecastEngine {
    /// Run the full analysis pipeline over a raw demand series.
    ///
    /// Fewer than three observations yields `InsufficientHistory`, a
    /// plain data value the transport layer returns as a normal
    /// response, not a fault.
    pub fn analyze(&self, series: &DemandSeries) -> Result<DemandAnalysis, InsufficientHistory> {
        if series.len() < MIN_HISTORY_POINTS {
            return Err(InsufficientHistory {
                min_required: MIN_HISTORY_POINTS,
                received: series.len(),
            });
        }

        // 1) Outlier removal on the raw values.
        let (cleaned, outlier_indices) = remove_outliers(&series.values, self.outlier_method);

        // 2) Classification, 3) trend, 4) day-of-week on the cleaned copy.
        let classification = classify(&cleaned);
        let trend = analyze_trend(&cleaned, self.period);
        let day_pattern = day_of_week_pattern(&cleaned, series.dates.as_deref());

        // 5) Decomposition only once two full periods of cleaned data
        // exist.
        let decomposition = if cleaned.len() >= SEASONAL_MIN_POINTS {
            decompose(&cleaned, self.period)
        } else {
            None
        };

        // 6) Confidence interval.
        let confidence = confidence_interval(&cleaned, self.confidence_level);

        // 7) Forecast.
        let forecast = self.forecast(&cleaned, &classification, &trend);

        // 8) Recommendation.
        let recommendation = recommend(&classification, confidence.mean);

        Ok(DemandAnalysis {
            original_points: series.len(),
            cleaned_points: cleaned.len(),
            outliers_removed: outlier_indices.len(),
            outlier_indices,
            classification,
            trend,
            day_pattern,
            decomposition,
            confidence,
            forecast,
            recommendation,
        })
    }

    /// Pick a forecaster and produce the 7-day horizon.
    ///
    /// The seasonal smoothing path is tried first when enough cleaned
    /// data exists; any refusal falls back silently to the weighted
    /// moving average. Fallback is a normal operating mode.
    fn forecast(
        &self,
        cleaned: &[f64],
        classification: &DemandClassification,
        trend: &TrendResult,
    ) -> ForecastResult {
        if cleaned.len() >= SEASONAL_MIN_POINTS {
            let hw = HoltWintersForecaster {
                period: self.period,
                ..HoltWintersForecaster::default()
            };
            if let Some(horizon) = hw.forecast(cleaned, HORIZON) {
                let daily_average = mean(&horizon);
                return ForecastResult {
                    method: hw.method(),
                    horizon,
                    daily_average,
                };
            }
        }

        let adjustment = match classification.pattern {
            DemandPattern::Growing | DemandPattern::Declining => {
                1.0 + trend.relative_slope * 0.5
            }
            _ => 1.0,
        };
        let fallback = WeightedAverageForecaster { adjustment };
        // The weighted average only refuses an empty series, which the
        // three-point minimum already rules out.
        let horizon = fallback
            .forecast(cleaned, HORIZON)
            .unwrap_or_else(|| vec![0.0; HORIZON]);
        let daily_average = mean(&horizon);

        ForecastResult {
            method: fallback.method(),
            horizon,
            daily_average,
        }
    }
}

/// Map the classified pattern to ordering guidance.
fn recommend(classification: &DemandClassification, expected_daily: f64) -> Recommendation {
    let (safety_factor, message) = match classification.pattern {
        DemandPattern::Steady => (1.2, "Demand is stable and predictable".to_string()),
        DemandPattern::Growing => (
            1.4,
            format!(
                "Demand is growing - consider ordering {}% more",
                ((1.4 - 1.0) * 100.0) as i64
            ),
        ),
        DemandPattern::Declining => {
            (1.0, "Demand is declining - reduce order quantities".to_string())
        }
        DemandPattern::Seasonal => (
            1.5,
            "Strong seasonal pattern detected - adjust for peaks".to_string(),
        ),
        DemandPattern::Erratic => (
            1.8,
            "High variability - maintain higher safety stock".to_string(),
        ),
        DemandPattern::InsufficientData => (
            1.3,
            "Insufficient data - using conservative estimates".to_string(),
        ),
    };

    Recommendation {
        message,
        pattern: classification.pattern,
        confidence: classification.confidence,
        suggested_safety_factor: safety_factor,
        expected_daily_demand: expected_daily,
        safe_daily_demand: expected_daily * safety_factor,
    }
}
