//! Demand pattern classification.
//!
//! The classifier is an explicit, order-sensitive rule ladder: rules are
//! evaluated top to bottom and the first match wins. The thresholds
//! overlap on purpose (a borderline trend can coexist with seasonal
//! strength above 0.3), and the tie-break is the rule order itself, not a
//! confidence comparison. Reordering the ladder changes behavior.

use std::cell::OnceCell;

use crate::analysis::seasonal::decompose;
use crate::analysis::trend::{DEFAULT_TREND_PERIOD, analyze_trend};
use crate::domain::{
    DemandClassification, DemandPattern, SeriesProfile, TrendDirection, TrendResult,
};
use crate::math::{coefficient_of_variation, mean, population_std};

/// CV above which demand is erratic.
const ERRATIC_CV: f64 = 0.5;
/// CV below which demand is steady.
const STEADY_CV: f64 = 0.2;
/// Trend strength gate for the growing/declining rules.
const TREND_STRENGTH_GATE: f64 = 0.1;
/// Seasonal strength gate for the seasonal rule.
const SEASONAL_STRENGTH_GATE: f64 = 0.3;

/// Everything a classification rule may look at.
struct RuleContext<'a> {
    values: &'a [f64],
    cv: f64,
    trend: &'a TrendResult,
    // Decomposition is expensive and only the seasonal rule needs it, so
    // seasonal strength is computed lazily, once.
    seasonal_strength: OnceCell<f64>,
}

impl RuleContext<'_> {
    fn seasonal_strength(&self) -> f64 {
        *self.seasonal_strength.get_or_init(|| {
            decompose(self.values, DEFAULT_TREND_PERIOD)
                .map(|d| d.seasonal_strength)
                .unwrap_or(0.0)
        })
    }
}

type Rule = (
    fn(&RuleContext) -> bool,
    fn(&RuleContext) -> (DemandPattern, f64),
);

/// Evaluation order is load-bearing; do not reorder.
const RULES: &[Rule] = &[
    (
        |ctx| ctx.cv > ERRATIC_CV,
        |_| (DemandPattern::Erratic, 0.8),
    ),
    (
        |ctx| {
            ctx.trend.direction == TrendDirection::Growing
                && ctx.trend.strength > TREND_STRENGTH_GATE
        },
        |ctx| (DemandPattern::Growing, ctx.trend.confidence / 100.0),
    ),
    (
        |ctx| {
            ctx.trend.direction == TrendDirection::Declining
                && ctx.trend.strength > TREND_STRENGTH_GATE
        },
        |ctx| (DemandPattern::Declining, ctx.trend.confidence / 100.0),
    ),
    (
        |ctx| ctx.cv < STEADY_CV,
        |_| (DemandPattern::Steady, 0.9),
    ),
    (
        |ctx| ctx.seasonal_strength() > SEASONAL_STRENGTH_GATE,
        |_| (DemandPattern::Seasonal, 0.85),
    ),
    (|_| true, |_| (DemandPattern::Steady, 0.7)),
];

/// Classify a cleaned demand series.
///
/// Below 7 points nothing is classified; the result still carries a
/// defined pattern (`INSUFFICIENT_DATA`) and zero confidence.
pub fn classify(values: &[f64]) -> DemandClassification {
    if values.len() < 7 {
        return DemandClassification {
            pattern: DemandPattern::InsufficientData,
            confidence: 0.0,
            profile: SeriesProfile::empty(),
        };
    }

    let m = mean(values);
    let std = population_std(values);
    let cv = coefficient_of_variation(values);
    let trend = analyze_trend(values, DEFAULT_TREND_PERIOD);

    let ctx = RuleContext {
        values,
        cv,
        trend: &trend,
        seasonal_strength: OnceCell::new(),
    };

    let (pattern, confidence) = RULES
        .iter()
        .find(|(applies, _)| applies(&ctx))
        .map(|(_, outcome)| outcome(&ctx))
        .unwrap_or((DemandPattern::Steady, 0.7));

    DemandClassification {
        pattern,
        confidence,
        profile: SeriesProfile {
            mean: m,
            std,
            cv,
            trend_direction: trend.direction,
            trend_strength: trend.strength,
        },
    }
}
