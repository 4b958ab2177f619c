use crate::model::{RiskLabel, Verdict};
use serde::{Deserialize, Serialize};

/// Document-level counts derived from a set of verdicts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub total: usize,
    pub risky_count: usize,
    pub safe_count: usize,
    /// Percentage of risky clauses, rounded to one decimal place with ties
    /// going to the even digit (1 of 16 is 6.2, 3 of 16 is 18.8).
    pub risk_percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl SummaryStats {
    pub fn band(&self) -> RiskBand {
        if self.risk_percentage >= 50.0 {
            RiskBand::High
        } else if self.risk_percentage >= 25.0 {
            RiskBand::Elevated
        } else {
            RiskBand::Low
        }
    }
}

pub fn summarize(verdicts: &[Verdict]) -> SummaryStats {
    let total = verdicts.len();
    let risky_count = verdicts
        .iter()
        .filter(|v| v.label == RiskLabel::Risky)
        .count();
    let safe_count = total - risky_count;
    let risk_percentage = if total == 0 {
        0.0
    } else {
        round_to_tenth(100.0 * risky_count as f64 / total as f64)
    };
    SummaryStats {
        total,
        risky_count,
        safe_count,
        risk_percentage,
    }
}

fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}
