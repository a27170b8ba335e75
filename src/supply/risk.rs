//! Stockout risk scoring.
//!
//! Like the demand classifier, the risk ladder is an ordered rule list
//! evaluated top to bottom; the rungs overlap and the first match wins.

use crate::domain::{RiskAssessment, RiskLevel};

/// Sentinel days-remaining when there is no demand to consume stock.
const NO_DEMAND_DAYS: f64 = 999.0;

struct Rung {
    applies: fn(days_remaining: f64, days_until_delivery: f64, safe_days_needed: f64) -> bool,
    level: RiskLevel,
    score: f64,
}

/// First match wins; ordered from safest to most critical.
const LADDER: &[Rung] = &[
    Rung {
        applies: |remaining, _, safe_needed| remaining >= safe_needed,
        level: RiskLevel::None,
        score: 0.0,
    },
    Rung {
        applies: |remaining, until_delivery, _| remaining >= until_delivery,
        level: RiskLevel::Low,
        score: 0.3,
    },
    Rung {
        applies: |remaining, until_delivery, _| remaining >= until_delivery * 0.7,
        level: RiskLevel::Medium,
        score: 0.6,
    },
    Rung {
        applies: |remaining, until_delivery, _| remaining >= until_delivery * 0.4,
        level: RiskLevel::High,
        score: 0.8,
    },
    Rung {
        applies: |_, _, _| true,
        level: RiskLevel::Critical,
        score: 1.0,
    },
];

/// Score the risk of stocking out before a delivery arrives.
pub fn assess_risk(
    current_stock: f64,
    daily_demand: f64,
    days_until_delivery: u32,
    safety_factor: f64,
) -> RiskAssessment {
    if daily_demand <= 0.0 {
        return RiskAssessment {
            level: RiskLevel::None,
            score: 0.0,
            days_remaining: NO_DEMAND_DAYS,
            days_until_delivery,
            safe_days_needed: days_until_delivery as f64 * safety_factor,
            message: "No demand detected".to_string(),
        };
    }

    let days_remaining = current_stock / daily_demand;
    let until_delivery = days_until_delivery as f64;
    let safe_days_needed = until_delivery * safety_factor;

    let rung = LADDER
        .iter()
        .find(|r| (r.applies)(days_remaining, until_delivery, safe_days_needed))
        .unwrap_or(&LADDER[LADDER.len() - 1]);

    let message = match rung.level {
        RiskLevel::None => {
            format!("Safe stock level - {days_remaining:.1} days remaining")
        }
        RiskLevel::Low => {
            format!("Stock OK but below safety margin - {days_remaining:.1} days remaining")
        }
        RiskLevel::Medium => {
            format!("Stock getting low - order soon ({days_remaining:.1} days remaining)")
        }
        RiskLevel::High => {
            format!("Stock low - order immediately ({days_remaining:.1} days remaining)")
        }
        RiskLevel::Critical => {
            format!("CRITICAL - Will stockout before delivery ({days_remaining:.1} days remaining)")
        }
    };

    RiskAssessment {
        level: rung.level,
        score: rung.score,
        days_remaining,
        days_until_delivery,
        safe_days_needed,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_demand_is_riskless() {
        let risk = assess_risk(20.0, 0.0, 3, 1.2);
        assert_eq!(risk.level, RiskLevel::None);
        assert_eq!(risk.score, 0.0);
        assert_eq!(risk.days_remaining, 999.0);
    }

    #[test]
    fn ample_stock_is_riskless() {
        // 10 days of stock vs 3.6 safe days needed.
        let risk = assess_risk(80.0, 8.0, 3, 1.2);
        assert_eq!(risk.level, RiskLevel::None);
        assert_eq!(risk.score, 0.0);
    }

    #[test]
    fn worked_example_lands_on_high() {
        // days_remaining = 2.5; safe = 3.6; delivery = 3; 0.7x = 2.1;
        // 0.4x = 1.2. First matching rung: HIGH.
        let risk = assess_risk(20.0, 8.0, 3, 1.2);
        assert_eq!(risk.level, RiskLevel::High);
        assert_eq!(risk.score, 0.8);
        assert!((risk.days_remaining - 2.5).abs() < 1e-12);
        assert!((risk.safe_days_needed - 3.6).abs() < 1e-12);
    }

    #[test]
    fn each_rung_is_reachable() {
        // delivery=10, safety 1.2 -> safe=12.
        let level = |stock: f64| assess_risk(stock, 1.0, 10, 1.2).level;
        assert_eq!(level(12.0), RiskLevel::None); // >= 12
        assert_eq!(level(10.0), RiskLevel::Low); // >= 10
        assert_eq!(level(7.5), RiskLevel::Medium); // >= 7
        assert_eq!(level(5.0), RiskLevel::High); // >= 4
        assert_eq!(level(2.0), RiskLevel::Critical);
    }

    #[test]
    fn boundaries_are_inclusive_top_down() {
        // Exactly at the delivery horizon: LOW, not MEDIUM.
        let risk = assess_risk(3.0, 1.0, 3, 1.2);
        assert_eq!(risk.level, RiskLevel::Low);
    }
}
