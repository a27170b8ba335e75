//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory by the analytic pipeline
//! - handed to whatever transport layer wraps the engine (JSON, etc.)
//! - asserted against directly in tests
//!
//! Every degenerate condition has a defined enum value; none of the
//! caller-facing fields are ever "null because the math gave up".

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Days of history below which no analysis is attempted.
pub const MIN_HISTORY_POINTS: usize = 3;

/// Horizon cap for coverage and stockout arithmetic.
///
/// Days-remaining values are clamped here so date arithmetic can never
/// overflow, and "effectively infinite" coverage has one canonical value.
pub const MAX_COVERAGE_DAYS: f64 = 365.0;

/// Daily demand below this is treated as no demand at all.
pub const DEMAND_EPSILON: f64 = 0.001;

/// A daily demand history, optionally paired with calendar dates.
///
/// Owned by the caller; the engine only derives cleaned copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandSeries {
    /// One non-negative observation per day, oldest first.
    pub values: Vec<f64>,
    /// Calendar dates matching `values` (same length), when known.
    pub dates: Option<Vec<NaiveDate>>,
}

impl DemandSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            dates: None,
        }
    }

    pub fn with_dates(values: Vec<f64>, dates: Vec<NaiveDate>) -> Self {
        Self {
            values,
            dates: Some(dates),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Direction of the fitted demand trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    Growing,
    Declining,
    Steady,
    InsufficientData,
}

/// Linear trend fit over the demand history.
///
/// `direction` is derived from `relative_slope` thresholds, not from
/// `r_squared`; a weak but consistent drift still counts as a trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub slope: f64,
    /// Slope divided by the series mean (0 if mean <= 0).
    pub relative_slope: f64,
    /// |relative_slope|, used by the classifier.
    pub strength: f64,
    pub r_squared: f64,
    /// r_squared scaled to 0..100.
    pub confidence: f64,
}

impl TrendResult {
    /// The zeroed result reported when the series is shorter than one period.
    pub fn insufficient() -> Self {
        Self {
            direction: TrendDirection::InsufficientData,
            slope: 0.0,
            relative_slope: 0.0,
            strength: 0.0,
            r_squared: 0.0,
            confidence: 0.0,
        }
    }
}

/// Mean demand for one weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayMean {
    pub weekday: Weekday,
    pub mean: f64,
}

/// Day-of-week demand profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOfWeekPattern {
    /// True when the variation across weekday means exceeds 0.2 CV.
    pub has_pattern: bool,
    pub means: Vec<WeekdayMean>,
    /// Coefficient of variation across the weekday means.
    pub variation: f64,
    pub highest: Option<Weekday>,
    pub lowest: Option<Weekday>,
}

impl DayOfWeekPattern {
    pub fn none() -> Self {
        Self {
            has_pattern: false,
            means: Vec::new(),
            variation: 0.0,
            highest: None,
            lowest: None,
        }
    }
}

/// Demand pattern label assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandPattern {
    Steady,
    Growing,
    Declining,
    Seasonal,
    Erratic,
    InsufficientData,
}

/// Summary statistics attached to a classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesProfile {
    pub mean: f64,
    pub std: f64,
    /// Coefficient of variation (population std / mean, 0 if mean <= 0).
    pub cv: f64,
    pub trend_direction: TrendDirection,
    pub trend_strength: f64,
}

impl SeriesProfile {
    pub fn empty() -> Self {
        Self {
            mean: 0.0,
            std: 0.0,
            cv: 0.0,
            trend_direction: TrendDirection::InsufficientData,
            trend_strength: 0.0,
        }
    }
}

/// Output of the demand classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandClassification {
    pub pattern: DemandPattern,
    /// Confidence in [0, 1].
    pub confidence: f64,
    pub profile: SeriesProfile,
}

/// Student-t interval around mean daily demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub mean: f64,
    /// Sample (Bessel-corrected) standard deviation.
    pub std: f64,
    /// Lower bound, clamped at 0; demand cannot be negative.
    pub lower: f64,
    pub upper: f64,
    pub margin: f64,
    pub confidence_level: f64,
}

/// Which forecasting path produced the horizon values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastMethod {
    SeasonalSmoothing,
    WeightedMovingAverage,
}

/// 7-step-ahead daily demand forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    pub method: ForecastMethod,
    /// One value per day, 7 days ahead.
    pub horizon: Vec<f64>,
    pub daily_average: f64,
}

/// Additive decomposition of a demand series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decomposition {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    /// std(seasonal) / std(series); 0 when the series has no variance.
    pub seasonal_strength: f64,
}

/// Ordering guidance derived from the classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub message: String,
    pub pattern: DemandPattern,
    pub confidence: f64,
    pub suggested_safety_factor: f64,
    pub expected_daily_demand: f64,
    /// Expected demand with the safety factor applied.
    pub safe_daily_demand: f64,
}

/// Union of every artifact the forecast orchestrator computes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandAnalysis {
    pub original_points: usize,
    pub cleaned_points: usize,
    pub outliers_removed: usize,
    pub outlier_indices: Vec<usize>,
    pub classification: DemandClassification,
    pub trend: TrendResult,
    pub day_pattern: DayOfWeekPattern,
    /// Present only when the cleaned series is long enough to decompose.
    pub decomposition: Option<Decomposition>,
    pub confidence: ConfidenceInterval,
    pub forecast: ForecastResult,
    pub recommendation: Recommendation,
}

/// Returned instead of an analysis when the history is too short.
///
/// This is a value, not a failure: callers surface it as a normal response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientHistory {
    pub min_required: usize,
    pub received: usize,
}

impl std::fmt::Display for InsufficientHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "insufficient history: need at least {} observations, got {}",
            self.min_required, self.received
        )
    }
}

impl std::error::Error for InsufficientHistory {}

/// Urgency band for current stock coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoverageLevel {
    NoDemand,
    Critical,
    Urgent,
    Low,
    Good,
    Overstocked,
}

/// How long current stock lasts at the forecast demand rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageStatus {
    pub current_stock: f64,
    pub daily_demand: f64,
    /// Capped at [`MAX_COVERAGE_DAYS`].
    pub days_remaining: f64,
    /// Omitted when the stockout lies beyond the coverage cap.
    pub stockout_date: Option<NaiveDate>,
    pub status: CoverageLevel,
    pub message: String,
}

/// Order sizing for one target coverage window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlan {
    /// Units to order; never negative.
    pub order_quantity: u64,
    pub target_coverage_days: u32,
    pub current_stock: f64,
    pub final_stock: f64,
    pub actual_coverage_days: f64,
    pub includes_safety_stock: bool,
    /// 1.0 when safety stock is excluded.
    pub safety_factor: f64,
}

/// Cost attachment for a scenario, when a unit price is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPricing {
    pub unit_price: f64,
    pub total_cost: f64,
    pub cost_per_day: f64,
}

/// One labelled coverage scenario ("1 Week", "1 Month", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageScenario {
    pub label: String,
    pub coverage_days: u32,
    pub order_quantity: u64,
    pub final_stock: f64,
    pub actual_coverage_days: f64,
    pub safety_factor: f64,
    pub pricing: Option<ScenarioPricing>,
}

/// A bundle of scenarios plus the current coverage they start from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub current: CoverageStatus,
    pub scenarios: Vec<CoverageScenario>,
    pub daily_demand: f64,
    pub safety_factor: f64,
}

/// The coverage window recommended for a demand pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecommendation {
    pub recommended_coverage_days: u32,
    pub plan: OrderPlan,
    pub pattern: DemandPattern,
    pub reason: String,
    pub lead_time_days: u32,
}

/// Per-supplier cost of one shared order quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierQuote {
    pub supplier_id: String,
    pub unit_price: f64,
    pub order_quantity: u64,
    pub total_cost: f64,
    pub coverage_days: u32,
    pub final_stock: f64,
    /// Savings vs the most expensive quote in the same comparison.
    pub savings: f64,
    pub savings_percent: f64,
    pub cheapest: bool,
}

/// MOQ / order-increment adjustment of a desired quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoqAdjustment {
    pub requested_quantity: u64,
    pub adjusted_quantity: u64,
    pub moq: u64,
    pub moq_increment: u64,
    pub extra_units: u64,
}

/// A volume discount tier: `discount_percent` off at `min_qty` and above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub min_qty: u64,
    pub discount_percent: f64,
}

/// Order cost after applying the best applicable volume discount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountedOrder {
    pub order_quantity: u64,
    pub base_price: f64,
    pub discount_percent: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub total_cost: f64,
    pub total_savings: f64,
    pub tier: Option<DiscountTier>,
}

/// Supplier scheduling rules.
///
/// Immutable after construction except through an explicit catalog update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    /// Weekdays on which orders can be placed.
    pub order_days: Vec<Weekday>,
    pub lead_time_days: u32,
    /// Orders placed after this time count as next-day.
    pub cutoff_time: NaiveTime,
    /// Historical delivery reliability in [0, 1].
    pub reliability: f64,
    pub notes: String,
}

impl Supplier {
    /// New supplier with a 14:00 cutoff and 0.95 reliability.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        order_days: Vec<Weekday>,
        lead_time_days: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order_days,
            lead_time_days,
            cutoff_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap_or(NaiveTime::MIN),
            reliability: 0.95,
            notes: String::new(),
        }
    }

    pub fn with_cutoff(mut self, cutoff: NaiveTime) -> Self {
        self.cutoff_time = cutoff;
        self
    }

    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = reliability;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Stockout risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    None,
    Low,
    Medium,
    High,
    Critical,
}

/// Stockout risk given days of stock vs days until delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// 0 (no risk) to 1 (stockout before delivery).
    pub score: f64,
    pub days_remaining: f64,
    pub days_until_delivery: u32,
    pub safe_days_needed: f64,
    pub message: String,
}

/// One ranked supplier option. Lower `score` is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierOption {
    pub supplier_id: String,
    pub supplier_name: String,
    pub order_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub days_until_order: u32,
    pub days_until_delivery: u32,
    pub unit_price: f64,
    pub quantity: u64,
    pub total_cost: f64,
    pub risk: RiskAssessment,
    pub reliability: f64,
    /// risk * 1000 + total cost + (1 - reliability) * 100.
    pub score: f64,
    pub can_order_today: bool,
    pub notes: String,
    /// Set on the top-ranked option only.
    pub recommended: bool,
    pub reason: Option<String>,
    pub savings_vs_max: f64,
    pub savings_percent: f64,
}

/// Full supplier comparison for one order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierComparison {
    pub recommended: SupplierOption,
    pub options: Vec<SupplierOption>,
    pub max_savings: f64,
    pub max_savings_percent: f64,
    pub comparison_date: NaiveDate,
}

/// Supplier price for one SKU, relative to the cheapest offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceComparison {
    pub supplier_id: String,
    pub price: f64,
    pub cheapest: bool,
    pub extra_cost: f64,
    pub extra_cost_percent: f64,
}

/// Classic reorder-point suggestion (service-level z-band path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    pub mean_demand: f64,
    pub std_dev: f64,
    pub z_score: f64,
    pub safety_stock: u64,
    /// Reorder point: mean * lead_time + safety stock.
    pub rop: u64,
    pub order_quantity: u64,
    pub should_reorder: bool,
}

/// What-if projection for a hypothetical order quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSimulation {
    pub projected_coverage_days: u64,
    pub projected_service_level: f64,
    pub estimated_stockout: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_history_displays_counts() {
        let e = InsufficientHistory {
            min_required: 3,
            received: 1,
        };
        let text = e.to_string();
        assert!(text.contains('3'));
        assert!(text.contains('1'));
    }

    #[test]
    fn supplier_builder_defaults() {
        let s = Supplier::new("acme", "Acme", vec![Weekday::Mon, Weekday::Wed], 2);
        assert_eq!(s.reliability, 0.95);
        assert_eq!(s.cutoff_time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert!(s.notes.is_empty());
    }

    #[test]
    fn pattern_serializes_screaming() {
        let json = serde_json::to_string(&DemandPattern::InsufficientData).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_DATA\"");
    }
}
