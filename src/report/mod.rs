//! Plain-text report formatting.
//!
//! Formatting lives in one place so the analysis and supply code stays
//! clean and testable, and output changes are localized.

use crate::domain::{
    CoverageStatus, DemandAnalysis, DemandPattern, SupplierComparison, TrendDirection,
};

fn pattern_label(pattern: DemandPattern) -> &'static str {
    match pattern {
        DemandPattern::Steady => "steady",
        DemandPattern::Growing => "growing",
        DemandPattern::Declining => "declining",
        DemandPattern::Seasonal => "seasonal",
        DemandPattern::Erratic => "erratic",
        DemandPattern::InsufficientData => "insufficient data",
    }
}

fn direction_label(direction: TrendDirection) -> &'static str {
    match direction {
        TrendDirection::Growing => "growing",
        TrendDirection::Declining => "declining",
        TrendDirection::Steady => "steady",
        TrendDirection::InsufficientData => "insufficient data",
    }
}

/// Format the full demand analysis summary.
pub fn format_analysis(analysis: &DemandAnalysis) -> String {
    let mut out = String::new();

    out.push_str("=== Demand Analysis ===\n");
    out.push_str(&format!(
        "History: n={} ({} after cleaning, {} outliers removed)\n",
        analysis.original_points, analysis.cleaned_points, analysis.outliers_removed,
    ));
    out.push_str(&format!(
        "Pattern: {} (confidence {:.0}%)\n",
        pattern_label(analysis.classification.pattern),
        analysis.classification.confidence * 100.0,
    ));
    out.push_str(&format!(
        "Trend: {} | relative slope {:+.3} | R2 {:.3}\n",
        direction_label(analysis.trend.direction),
        analysis.trend.relative_slope,
        analysis.trend.r_squared,
    ));
    if analysis.day_pattern.has_pattern {
        out.push_str(&format!(
            "Day-of-week pattern: yes (variation {:.2})\n",
            analysis.day_pattern.variation
        ));
    }
    out.push_str(&format!(
        "Demand: {:.2}/day | {:.0}% CI [{:.2}, {:.2}]\n",
        analysis.confidence.mean,
        analysis.confidence.confidence_level * 100.0,
        analysis.confidence.lower,
        analysis.confidence.upper,
    ));
    out.push_str(&format!(
        "Forecast ({:?}): avg {:.2}/day over {} days\n",
        analysis.forecast.method,
        analysis.forecast.daily_average,
        analysis.forecast.horizon.len(),
    ));

    out.push_str("\nRecommendation:\n");
    out.push_str(&format!("- {}\n", analysis.recommendation.message));
    out.push_str(&format!(
        "- safety factor {:.1} | plan for {:.2}/day\n",
        analysis.recommendation.suggested_safety_factor,
        analysis.recommendation.safe_daily_demand,
    ));

    out
}

/// Format a one-line coverage status.
pub fn format_coverage(status: &CoverageStatus) -> String {
    let mut line = format!(
        "Stock {:.0} @ {:.2}/day -> {:.1} days | {}",
        status.current_stock, status.daily_demand, status.days_remaining, status.message,
    );
    if let Some(date) = status.stockout_date {
        line.push_str(&format!(" (stockout ~{date})"));
    }
    line.push('\n');
    line
}

/// Format the ranked supplier comparison table.
pub fn format_comparison(comparison: &SupplierComparison) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Supplier Comparison ({}) ===\n",
        comparison.comparison_date
    ));
    for option in &comparison.options {
        let marker = if option.recommended { "*" } else { " " };
        out.push_str(&format!(
            "{marker} {:<12} order {} deliver {} | {:>8.2} total | risk {:<8} | score {:.1}\n",
            option.supplier_name,
            option.order_date,
            option.delivery_date,
            option.total_cost,
            format!("{:?}", option.risk.level),
            option.score,
        ));
    }

    out.push_str(&format!(
        "\nRecommended: {}\n",
        comparison.recommended.supplier_name
    ));
    if let Some(reason) = &comparison.recommended.reason {
        out.push_str(&format!("Reason: {reason}\n"));
    }
    if comparison.max_savings > 0.0 {
        out.push_str(&format!(
            "Savings vs most expensive: {:.2} ({:.1}%)\n",
            comparison.max_savings, comparison.max_savings_percent,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Supplier;
    use crate::forecast::ForecastEngine;
    use crate::supply::{PricingTable, SupplierCatalog, SupplierOptimizer};
    use chrono::{NaiveDate, Weekday};

    use crate::domain::DemandSeries;

    #[test]
    fn analysis_report_names_the_pattern_and_demand() {
        let series = DemandSeries::new(vec![10.0; 14]);
        let analysis = ForecastEngine::default().analyze(&series).unwrap();
        let text = format_analysis(&analysis);

        assert!(text.contains("Pattern: steady"));
        assert!(text.contains("Demand: 10.00/day"));
        assert!(text.contains("Recommendation:"));
        assert!(text.contains("safety factor 1.2"));
    }

    #[test]
    fn comparison_report_marks_the_recommendation() {
        let mut catalog = SupplierCatalog::new();
        catalog.add_supplier(Supplier::new(
            "asgeto",
            "Asgeto",
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed],
            2,
        ));
        let mut pricing = PricingTable::new();
        pricing.set_price("SKU-1", "asgeto", 4.0);

        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let comparison = SupplierOptimizer::new(&catalog, &pricing)
            .compare("SKU-1", 500.0, 8.0, 50, monday)
            .unwrap();
        let text = format_comparison(&comparison);

        assert!(text.contains("* Asgeto"));
        assert!(text.contains("Recommended: Asgeto"));
        assert!(text.contains("200.00 total"));
    }

    #[test]
    fn coverage_line_includes_the_stockout_date() {
        use crate::coverage::CoverageCalculator;

        let asof = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let status = CoverageCalculator::default().current_coverage(50.0, 8.0, asof);
        let line = format_coverage(&status);
        assert!(line.contains("6.2 days"));
        assert!(line.contains("stockout"));
    }
}
