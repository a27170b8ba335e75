//! Coverage scenarios: stockout timing and order quantities for target
//! coverage windows.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{
    CoverageLevel, CoverageScenario, CoverageStatus, DEMAND_EPSILON, DemandPattern,
    MAX_COVERAGE_DAYS, OrderPlan, ScenarioPricing, ScenarioRecommendation, ScenarioSet,
    SupplierQuote,
};

/// Default safety factor applied on top of forecast demand.
pub const DEFAULT_SAFETY_FACTOR: f64 = 1.2;

/// Converts stock level + daily demand into coverage answers.
///
/// The calculator is stateless apart from its configured scenario
/// periods; an explicit as-of date keeps stockout dates deterministic.
#[derive(Debug, Clone)]
pub struct CoverageCalculator {
    /// Coverage windows (days) used by [`Self::scenarios`].
    pub standard_periods: Vec<u32>,
}

impl Default for CoverageCalculator {
    fn default() -> Self {
        Self {
            standard_periods: vec![1, 7, 14, 30, 60, 90],
        }
    }
}

impl CoverageCalculator {
    /// How long current stock lasts at the given daily demand.
    pub fn current_coverage(
        &self,
        current_stock: f64,
        daily_demand: f64,
        asof: NaiveDate,
    ) -> CoverageStatus {
        if daily_demand < DEMAND_EPSILON {
            return CoverageStatus {
                current_stock,
                daily_demand,
                days_remaining: MAX_COVERAGE_DAYS,
                stockout_date: None,
                status: CoverageLevel::NoDemand,
                message: "No demand detected - stock will last indefinitely".to_string(),
            };
        }

        // Capped so the date arithmetic below can never overflow.
        let days_remaining = (current_stock / daily_demand).min(MAX_COVERAGE_DAYS);

        let stockout_date = if days_remaining < MAX_COVERAGE_DAYS {
            asof.checked_add_days(chrono::Days::new(days_remaining as u64))
        } else {
            None
        };

        let (status, message) = if days_remaining < 1.0 {
            (
                CoverageLevel::Critical,
                format!("CRITICAL: Stock will run out in {days_remaining:.1} days"),
            )
        } else if days_remaining < 3.0 {
            (
                CoverageLevel::Urgent,
                format!("URGENT: Only {days_remaining:.1} days of stock remaining"),
            )
        } else if days_remaining < 7.0 {
            (
                CoverageLevel::Low,
                format!("LOW: {days_remaining:.1} days of stock remaining"),
            )
        } else if days_remaining < 30.0 {
            (
                CoverageLevel::Good,
                format!("GOOD: {days_remaining:.1} days of stock remaining"),
            )
        } else {
            (
                CoverageLevel::Overstocked,
                format!("OVERSTOCKED: {days_remaining:.1} days of stock remaining"),
            )
        };

        CoverageStatus {
            current_stock,
            daily_demand,
            days_remaining,
            stockout_date,
            status,
            message,
        }
    }

    /// Units to order to reach `target_coverage_days` of stock.
    pub fn order_quantity(
        &self,
        current_stock: f64,
        daily_demand: f64,
        target_coverage_days: u32,
        include_safety_stock: bool,
        safety_factor: f64,
    ) -> OrderPlan {
        let effective_factor = if include_safety_stock {
            safety_factor
        } else {
            1.0
        };

        if daily_demand < DEMAND_EPSILON {
            return OrderPlan {
                order_quantity: 0,
                target_coverage_days,
                current_stock,
                final_stock: current_stock,
                actual_coverage_days: MAX_COVERAGE_DAYS,
                includes_safety_stock: include_safety_stock,
                safety_factor: effective_factor,
            };
        }

        let required = daily_demand * target_coverage_days as f64 * effective_factor;
        let order_quantity = (required - current_stock).ceil().max(0.0) as u64;
        let final_stock = current_stock + order_quantity as f64;

        OrderPlan {
            order_quantity,
            target_coverage_days,
            current_stock,
            final_stock,
            actual_coverage_days: final_stock / daily_demand,
            includes_safety_stock: include_safety_stock,
            safety_factor: effective_factor,
        }
    }

    /// Scenario per standard period, with safety stock included.
    pub fn scenarios(
        &self,
        current_stock: f64,
        daily_demand: f64,
        asof: NaiveDate,
    ) -> ScenarioSet {
        self.scenarios_custom(
            current_stock,
            daily_demand,
            asof,
            &self.standard_periods,
            true,
            DEFAULT_SAFETY_FACTOR,
        )
    }

    /// Scenario per custom period.
    pub fn scenarios_custom(
        &self,
        current_stock: f64,
        daily_demand: f64,
        asof: NaiveDate,
        periods: &[u32],
        include_safety_stock: bool,
        safety_factor: f64,
    ) -> ScenarioSet {
        let scenarios = periods
            .iter()
            .map(|&days| {
                let plan = self.order_quantity(
                    current_stock,
                    daily_demand,
                    days,
                    include_safety_stock,
                    safety_factor,
                );
                CoverageScenario {
                    label: period_label(days),
                    coverage_days: days,
                    order_quantity: plan.order_quantity,
                    final_stock: plan.final_stock,
                    actual_coverage_days: plan.actual_coverage_days,
                    safety_factor: plan.safety_factor,
                    pricing: None,
                }
            })
            .collect();

        ScenarioSet {
            current: self.current_coverage(current_stock, daily_demand, asof),
            scenarios,
            daily_demand,
            safety_factor: if include_safety_stock {
                safety_factor
            } else {
                1.0
            },
        }
    }

    /// Recommend a coverage window for the classified demand pattern.
    ///
    /// The window always covers at least one lead time; patterns that
    /// punish overstock (declining) get the shortest multiples, patterns
    /// that punish understock (growing, seasonal) the longest.
    pub fn recommend_scenario(
        &self,
        current_stock: f64,
        daily_demand: f64,
        pattern: DemandPattern,
        lead_time_days: u32,
    ) -> ScenarioRecommendation {
        let (recommended_days, reason) = match pattern {
            DemandPattern::Steady => (
                14.max(lead_time_days * 2),
                "Stable demand - order 2-4 weeks supply",
            ),
            DemandPattern::Growing => (
                30.max(lead_time_days * 3),
                "Growing demand - order more to cover increasing sales",
            ),
            DemandPattern::Declining => (
                7.max(lead_time_days),
                "Declining demand - order less to avoid excess inventory",
            ),
            DemandPattern::Seasonal => (
                30.max(lead_time_days * 4),
                "Seasonal pattern - build buffer for demand peaks",
            ),
            DemandPattern::Erratic => (
                14.max(lead_time_days * 2),
                "Unpredictable demand - moderate coverage with safety stock",
            ),
            DemandPattern::InsufficientData => (14, "Standard coverage recommendation"),
        };

        let plan = self.order_quantity(
            current_stock,
            daily_demand,
            recommended_days,
            true,
            DEFAULT_SAFETY_FACTOR,
        );

        ScenarioRecommendation {
            recommended_coverage_days: recommended_days,
            plan,
            pattern,
            reason: reason.to_string(),
            lead_time_days,
        }
    }

    /// Standard scenarios with unit-price cost columns attached.
    pub fn with_pricing(
        &self,
        current_stock: f64,
        daily_demand: f64,
        unit_price: f64,
        asof: NaiveDate,
    ) -> ScenarioSet {
        let mut set = self.scenarios(current_stock, daily_demand, asof);
        for scenario in set.scenarios.iter_mut() {
            let total_cost = scenario.order_quantity as f64 * unit_price;
            let cost_per_day = if scenario.coverage_days > 0 {
                total_cost / scenario.coverage_days as f64
            } else {
                0.0
            };
            scenario.pricing = Some(ScenarioPricing {
                unit_price,
                total_cost,
                cost_per_day,
            });
        }
        set
    }

    /// Price one shared order quantity across suppliers.
    ///
    /// The quantity is computed once for the coverage window, then each
    /// supplier's total is compared; quotes come back sorted cheapest
    /// first with savings vs the most expensive option.
    pub fn compare_suppliers(
        &self,
        current_stock: f64,
        daily_demand: f64,
        coverage_days: u32,
        supplier_prices: &BTreeMap<String, f64>,
    ) -> Vec<SupplierQuote> {
        let plan = self.order_quantity(
            current_stock,
            daily_demand,
            coverage_days,
            true,
            DEFAULT_SAFETY_FACTOR,
        );

        let mut quotes: Vec<SupplierQuote> = supplier_prices
            .iter()
            .map(|(supplier_id, &price)| SupplierQuote {
                supplier_id: supplier_id.clone(),
                unit_price: price,
                order_quantity: plan.order_quantity,
                total_cost: plan.order_quantity as f64 * price,
                coverage_days,
                final_stock: plan.final_stock,
                savings: 0.0,
                savings_percent: 0.0,
                cheapest: false,
            })
            .collect();

        quotes.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));

        if let Some(max_cost) = quotes.last().map(|q| q.total_cost) {
            let min_cost = quotes[0].total_cost;
            for quote in quotes.iter_mut() {
                quote.savings = max_cost - quote.total_cost;
                quote.savings_percent = if max_cost > 0.0 {
                    quote.savings / max_cost * 100.0
                } else {
                    0.0
                };
                quote.cheapest = quote.total_cost == min_cost;
            }
        }

        quotes
    }
}

/// Human label for a coverage window.
fn period_label(days: u32) -> String {
    match days {
        1 => "1 Day".to_string(),
        7 => "1 Week".to_string(),
        14 => "2 Weeks".to_string(),
        30 => "1 Month".to_string(),
        60 => "2 Months".to_string(),
        90 => "3 Months".to_string(),
        n => format!("{n} Days"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asof() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    #[test]
    fn no_demand_reports_sentinel_coverage() {
        let calc = CoverageCalculator::default();
        for demand in [0.0, 0.0005, -1.0] {
            let cov = calc.current_coverage(50.0, demand, asof());
            assert_eq!(cov.status, CoverageLevel::NoDemand);
            assert_eq!(cov.days_remaining, 365.0);
            assert!(cov.stockout_date.is_none());
        }
    }

    #[test]
    fn six_and_a_quarter_days_is_low() {
        let calc = CoverageCalculator::default();
        let cov = calc.current_coverage(50.0, 8.0, asof());
        assert!((cov.days_remaining - 6.25).abs() < 1e-12);
        assert_eq!(cov.status, CoverageLevel::Low);
        assert!(cov.stockout_date.is_some());
    }

    #[test]
    fn status_thresholds() {
        let calc = CoverageCalculator::default();
        let status = |stock: f64| calc.current_coverage(stock, 10.0, asof()).status;
        assert_eq!(status(5.0), CoverageLevel::Critical); // 0.5 days
        assert_eq!(status(20.0), CoverageLevel::Urgent); // 2 days
        assert_eq!(status(50.0), CoverageLevel::Low); // 5 days
        assert_eq!(status(100.0), CoverageLevel::Good); // 10 days
        assert_eq!(status(400.0), CoverageLevel::Overstocked); // 40 days
    }

    #[test]
    fn very_long_coverage_is_capped_without_a_date() {
        let calc = CoverageCalculator::default();
        let cov = calc.current_coverage(1_000_000.0, 0.01, asof());
        assert_eq!(cov.days_remaining, 365.0);
        assert!(cov.stockout_date.is_none());
    }

    #[test]
    fn order_quantity_worked_example() {
        // required = 8 * 7 * 1.2 = 67.2; order = ceil(67.2 - 50) = 18.
        let calc = CoverageCalculator::default();
        let plan = calc.order_quantity(50.0, 8.0, 7, true, 1.2);
        assert_eq!(plan.order_quantity, 18);
        assert_eq!(plan.final_stock, 68.0);
        assert!((plan.actual_coverage_days - 8.5).abs() < 1e-12);
        assert_eq!(plan.safety_factor, 1.2);
    }

    #[test]
    fn order_quantity_never_negative() {
        let calc = CoverageCalculator::default();
        let plan = calc.order_quantity(1000.0, 8.0, 7, true, 1.2);
        assert_eq!(plan.order_quantity, 0);
        assert_eq!(plan.final_stock, 1000.0);
    }

    #[test]
    fn order_quantity_monotone_in_target_days() {
        let calc = CoverageCalculator::default();
        let mut last = 0;
        for days in [1, 7, 14, 30, 60, 90] {
            let qty = calc.order_quantity(50.0, 8.0, days, true, 1.2).order_quantity;
            assert!(qty >= last, "qty({days})={qty} < {last}");
            last = qty;
        }
    }

    #[test]
    fn scenarios_carry_standard_labels() {
        let calc = CoverageCalculator::default();
        let set = calc.scenarios(50.0, 8.0, asof());
        let labels: Vec<&str> = set.scenarios.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            ["1 Day", "1 Week", "2 Weeks", "1 Month", "2 Months", "3 Months"]
        );
        assert_eq!(set.current.status, CoverageLevel::Low);
    }

    #[test]
    fn nonstandard_period_gets_generic_label() {
        assert_eq!(period_label(45), "45 Days");
    }

    #[test]
    fn recommendation_windows_scale_with_lead_time() {
        let calc = CoverageCalculator::default();
        let days = |p, lead| {
            calc.recommend_scenario(50.0, 8.0, p, lead)
                .recommended_coverage_days
        };
        assert_eq!(days(DemandPattern::Steady, 7), 14);
        assert_eq!(days(DemandPattern::Steady, 10), 20);
        assert_eq!(days(DemandPattern::Growing, 7), 30);
        assert_eq!(days(DemandPattern::Growing, 12), 36);
        assert_eq!(days(DemandPattern::Declining, 3), 7);
        assert_eq!(days(DemandPattern::Seasonal, 10), 40);
        assert_eq!(days(DemandPattern::Erratic, 7), 14);
        assert_eq!(days(DemandPattern::InsufficientData, 30), 14);
    }

    #[test]
    fn pricing_attaches_cost_columns() {
        let calc = CoverageCalculator::default();
        let set = calc.with_pricing(50.0, 8.0, 10.0, asof());
        let week = &set.scenarios[1];
        let pricing = week.pricing.as_ref().unwrap();
        assert_eq!(pricing.unit_price, 10.0);
        assert_eq!(pricing.total_cost, week.order_quantity as f64 * 10.0);
        assert!((pricing.cost_per_day - pricing.total_cost / 7.0).abs() < 1e-9);
    }

    #[test]
    fn supplier_comparison_sorts_and_flags_cheapest() {
        let calc = CoverageCalculator::default();
        let prices = BTreeMap::from([
            ("asgeto".to_string(), 10.0),
            ("santefarm".to_string(), 8.5),
        ]);
        let quotes = calc.compare_suppliers(50.0, 8.0, 7, &prices);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].supplier_id, "santefarm");
        assert!(quotes[0].cheapest);
        assert!(!quotes[1].cheapest);
        // Shared quantity (18) priced per supplier; savings vs the max.
        assert_eq!(quotes[0].order_quantity, quotes[1].order_quantity);
        assert!((quotes[0].savings - (quotes[1].total_cost - quotes[0].total_cost)).abs() < 1e-9);
        assert_eq!(quotes[1].savings, 0.0);
    }
}
