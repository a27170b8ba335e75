//! Classic reorder-point calculations.
//!
//! A deliberately simple path next to the full forecasting pipeline:
//! service-level z-band, safety stock, reorder point, and a what-if
//! order simulation, all from raw demand history.

use crate::domain::{MAX_COVERAGE_DAYS, OrderSimulation, ReorderSuggestion};
use crate::math::{mean, population_std};

/// Service level clamp applied by [`simulate`].
const MAX_SERVICE_LEVEL: f64 = 0.99;

/// Map a target service level onto a z-score band.
///
/// Coarse on purpose: callers pick a tier, not a point on the normal
/// CDF.
pub fn z_score_band(service_level: f64) -> f64 {
    if service_level >= 0.99 {
        2.33
    } else if service_level >= 0.95 {
        1.65
    } else if service_level >= 0.90 {
        1.28
    } else {
        1.0
    }
}

/// Safety stock in whole units: z * sigma * sqrt(lead time), floored.
pub fn safety_stock(std_dev: f64, lead_time_days: u32, z_score: f64) -> u64 {
    let raw = z_score * std_dev * (lead_time_days as f64).sqrt();
    raw.max(0.0) as u64
}

/// Reorder point: expected lead-time demand plus safety stock.
pub fn reorder_point(mean_demand: f64, lead_time_days: u32, safety: u64) -> u64 {
    (mean_demand * lead_time_days as f64).max(0.0) as u64 + safety
}

/// Order quantity covering two lead times, at least the MOQ.
pub fn order_quantity(mean_demand: f64, lead_time_days: u32, moq: u64) -> u64 {
    let two_lead_times = (mean_demand * lead_time_days as f64 * 2.0).max(0.0) as u64;
    two_lead_times.max(moq)
}

/// Full reorder suggestion from raw history. `None` when the history is
/// empty.
pub fn suggest(
    history: &[f64],
    current_stock: f64,
    lead_time_days: u32,
    service_level: f64,
) -> Option<ReorderSuggestion> {
    if history.is_empty() {
        return None;
    }

    let mean_demand = mean(history);
    let std_dev = population_std(history);
    let z = z_score_band(service_level);
    let safety = safety_stock(std_dev, lead_time_days, z);
    let rop = reorder_point(mean_demand, lead_time_days, safety);

    Some(ReorderSuggestion {
        mean_demand,
        std_dev,
        z_score: z,
        safety_stock: safety,
        rop,
        order_quantity: order_quantity(mean_demand, lead_time_days, 1),
        should_reorder: current_stock <= rop as f64,
    })
}

/// Project coverage and service level for a hypothetical order.
pub fn simulate(history: &[f64], quantity: u64, lead_time_days: u32) -> OrderSimulation {
    let mean_demand = if history.is_empty() { 0.0 } else { mean(history) };
    if mean_demand <= 0.0 {
        return OrderSimulation {
            projected_coverage_days: MAX_COVERAGE_DAYS as u64,
            projected_service_level: MAX_SERVICE_LEVEL,
            estimated_stockout: false,
        };
    }

    let coverage = quantity as f64 / mean_demand;
    let service = (coverage / (2.0 * lead_time_days as f64)).min(MAX_SERVICE_LEVEL);

    OrderSimulation {
        projected_coverage_days: coverage as u64,
        projected_service_level: service,
        estimated_stockout: coverage < lead_time_days as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_bands_cover_the_service_tiers() {
        assert_eq!(z_score_band(0.999), 2.33);
        assert_eq!(z_score_band(0.99), 2.33);
        assert_eq!(z_score_band(0.95), 1.65);
        assert_eq!(z_score_band(0.90), 1.28);
        assert_eq!(z_score_band(0.85), 1.0);
    }

    #[test]
    fn constant_demand_needs_no_safety_stock() {
        let history = vec![10.0; 14];
        let s = suggest(&history, 25.0, 3, 0.95).unwrap();
        assert_eq!(s.mean_demand, 10.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.safety_stock, 0);
        assert_eq!(s.rop, 30);
        // Two lead times of demand, MOQ floor of 1 is irrelevant here.
        assert_eq!(s.order_quantity, 60);
        assert!(s.should_reorder); // 25 <= 30
    }

    #[test]
    fn variable_demand_raises_the_reorder_point() {
        // mean 10, population std 2, z 1.65, sqrt(4) = 2.
        let history = vec![8.0, 12.0, 8.0, 12.0];
        let s = suggest(&history, 100.0, 4, 0.95).unwrap();
        assert_eq!(s.safety_stock, 6); // floor(1.65 * 2 * 2) = floor(6.6)
        assert_eq!(s.rop, 46);
        assert!(!s.should_reorder);
    }

    #[test]
    fn empty_history_yields_nothing() {
        assert!(suggest(&[], 10.0, 3, 0.95).is_none());
    }

    #[test]
    fn simulation_projects_coverage_and_service() {
        let history = vec![10.0; 14];

        let ample = simulate(&history, 60, 3);
        assert_eq!(ample.projected_coverage_days, 6);
        assert_eq!(ample.projected_service_level, 0.99); // 6 / 6 clamped
        assert!(!ample.estimated_stockout);

        let tight = simulate(&history, 20, 3);
        assert_eq!(tight.projected_coverage_days, 2);
        assert!((tight.projected_service_level - 2.0 / 6.0).abs() < 1e-12);
        assert!(tight.estimated_stockout);
    }

    #[test]
    fn simulation_without_demand_never_stocks_out() {
        let sim = simulate(&[], 50, 3);
        assert_eq!(sim.projected_coverage_days, 365);
        assert!(!sim.estimated_stockout);
    }
}
