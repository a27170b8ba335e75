//! Trend detection: OLS slope over the day index, plus a day-of-week
//! sub-analysis when calendar dates are available.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::{DayOfWeekPattern, TrendDirection, TrendResult, WeekdayMean};
use crate::math::{coefficient_of_variation, linear_fit, mean};

/// Minimum observations for a trend fit (one full weekly period).
pub const DEFAULT_TREND_PERIOD: usize = 7;

/// Relative slope beyond which demand counts as growing/declining.
const DIRECTION_THRESHOLD: f64 = 0.05;

/// CV across weekday means beyond which a day-of-week pattern is flagged.
const WEEKDAY_CV_THRESHOLD: f64 = 0.2;

/// Fit a linear trend and classify its direction.
///
/// Direction comes from `relative_slope` (slope / series mean), so the
/// same absolute drift counts for more on a slow mover than on a fast
/// one. `r_squared` only feeds the reported confidence.
pub fn analyze_trend(values: &[f64], period: usize) -> TrendResult {
    if values.len() < period {
        return TrendResult::insufficient();
    }

    let Some(fit) = linear_fit(values) else {
        return TrendResult::insufficient();
    };

    let m = mean(values);
    let relative_slope = if m > 0.0 { fit.slope / m } else { 0.0 };

    let direction = if relative_slope > DIRECTION_THRESHOLD {
        TrendDirection::Growing
    } else if relative_slope < -DIRECTION_THRESHOLD {
        TrendDirection::Declining
    } else {
        TrendDirection::Steady
    };

    TrendResult {
        direction,
        slope: fit.slope,
        relative_slope,
        strength: relative_slope.abs(),
        r_squared: fit.r_squared,
        confidence: fit.r_squared * 100.0,
    }
}

/// Detect whether demand varies systematically by weekday.
///
/// Needs dates matching the values one-to-one and at least a week of
/// data; anything less reports no pattern rather than guessing.
pub fn day_of_week_pattern(values: &[f64], dates: Option<&[NaiveDate]>) -> DayOfWeekPattern {
    let Some(dates) = dates else {
        return DayOfWeekPattern::none();
    };
    if values.len() != dates.len() || values.len() < 7 {
        return DayOfWeekPattern::none();
    }

    // Bucket observations by weekday, Monday first.
    let mut buckets: [Vec<f64>; 7] = Default::default();
    for (&v, d) in values.iter().zip(dates) {
        buckets[d.weekday().num_days_from_monday() as usize].push(v);
    }

    let mut means = Vec::new();
    for (i, bucket) in buckets.iter().enumerate() {
        if bucket.is_empty() {
            continue;
        }
        let weekday = weekday_from_monday_index(i);
        means.push(WeekdayMean {
            weekday,
            mean: mean(bucket),
        });
    }

    let mean_values: Vec<f64> = means.iter().map(|w| w.mean).collect();
    let variation = coefficient_of_variation(&mean_values);

    let highest = means
        .iter()
        .max_by(|a, b| a.mean.total_cmp(&b.mean))
        .map(|w| w.weekday);
    let lowest = means
        .iter()
        .min_by(|a, b| a.mean.total_cmp(&b.mean))
        .map(|w| w.weekday);

    DayOfWeekPattern {
        has_pattern: variation > WEEKDAY_CV_THRESHOLD,
        means,
        variation,
        highest,
        lowest,
    }
}

fn weekday_from_monday_index(i: usize) -> Weekday {
    match i {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}
