//! Headline figures over an annual risk table

use serde::{Deserialize, Serialize};

use super::annual::AnnualRiskRecord;

/// Assessment text when no annual records exist
pub const ASSESSMENT_NO_DATA: &str = "Simulation required";
pub const ASSESSMENT_NO_MATERIAL_RISK: &str =
    "No material risk detected: the portfolio remains funded in nearly all simulated scenarios.";
pub const ASSESSMENT_LOW_RISK: &str =
    "Low risk: a small share of scenarios deplete the portfolio within 30 years.";
pub const ASSESSMENT_MODERATE_RISK: &str =
    "Moderate risk: a meaningful share of scenarios deplete the portfolio within 30 years; review spending flexibility.";
pub const ASSESSMENT_HEIGHTENED_RISK: &str =
    "Heightened risk: depletion within 30 years is a realistic outcome; the plan needs changes to spending, savings or allocation.";

/// Aggregate of an annual risk table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskSummary {
    /// Year with the largest marginal risk; `None` without data
    pub peak_risk_year: Option<u32>,
    pub peak_risk_value: f64,
    pub risk10_year: f64,
    pub risk20_year: f64,
    pub risk30_year: f64,
    pub overall_assessment: String,
}

impl RiskSummary {
    /// Summary returned when there is nothing to summarize
    pub fn no_data() -> Self {
        Self {
            peak_risk_year: None,
            peak_risk_value: 0.0,
            risk10_year: 0.0,
            risk20_year: 0.0,
            risk30_year: 0.0,
            overall_assessment: ASSESSMENT_NO_DATA.to_string(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.peak_risk_year.is_some()
    }
}

/// Assessment bucket for a 30-year cumulative risk
pub fn assess(risk30_year: f64) -> &'static str {
    if risk30_year < 0.05 {
        ASSESSMENT_NO_MATERIAL_RISK
    } else if risk30_year < 0.15 {
        ASSESSMENT_LOW_RISK
    } else if risk30_year < 0.30 {
        ASSESSMENT_MODERATE_RISK
    } else {
        ASSESSMENT_HEIGHTENED_RISK
    }
}

/// Reduce an annual risk table to headline figures
///
/// The peak is the first record holding the maximum `annual_risk`. Risk at
/// 10/20/30 years reads positions 9/19/29 and falls back to zero when the
/// table is shorter.
pub fn summarize(records: &[AnnualRiskRecord]) -> RiskSummary {
    let Some(first) = records.first() else {
        return RiskSummary::no_data();
    };

    let mut peak = first;
    for record in &records[1..] {
        if record.annual_risk > peak.annual_risk {
            peak = record;
        }
    }

    let cumulative_at = |pos: usize| records.get(pos).map(|r| r.cumulative_risk).unwrap_or(0.0);
    let risk30_year = cumulative_at(29);

    RiskSummary {
        peak_risk_year: Some(peak.year),
        peak_risk_value: peak.annual_risk,
        risk10_year: cumulative_at(9),
        risk20_year: cumulative_at(19),
        risk30_year,
        overall_assessment: assess(risk30_year).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u32, cumulative_risk: f64, annual_risk: f64) -> AnnualRiskRecord {
        AnnualRiskRecord {
            year,
            age: 64 + year,
            success_probability: 1.0 - cumulative_risk,
            cumulative_risk,
            annual_risk,
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary, RiskSummary::no_data());
        assert_eq!(summary.overall_assessment, "Simulation required");
        assert_eq!(summary.peak_risk_year, None);
        assert_eq!(summary.risk30_year, 0.0);
        assert!(!summary.has_data());
    }

    #[test]
    fn test_peak_tie_breaks_to_first() {
        let records: Vec<_> = (1..=10)
            .map(|y| match y {
                3 | 7 => record(y, 0.1, 0.2),
                _ => record(y, 0.1, 0.05),
            })
            .collect();
        let summary = summarize(&records);
        assert_eq!(summary.peak_risk_year, Some(3));
        assert_eq!(summary.peak_risk_value, 0.2);
    }

    #[test]
    fn test_flat_table_peaks_at_first_year() {
        let records: Vec<_> = (1..=5).map(|y| record(y, 0.05, 0.0)).collect();
        let summary = summarize(&records);
        assert_eq!(summary.peak_risk_year, Some(1));
        assert_eq!(summary.peak_risk_value, 0.0);
    }

    #[test]
    fn test_horizon_positions() {
        let records: Vec<_> = (1..=31).map(|y| record(y, y as f64 / 100.0, 0.01)).collect();
        let summary = summarize(&records);
        assert_eq!(summary.risk10_year, 0.10);
        assert_eq!(summary.risk20_year, 0.20);
        assert_eq!(summary.risk30_year, 0.30);
        assert_eq!(summary.overall_assessment, ASSESSMENT_HEIGHTENED_RISK);
    }

    #[test]
    fn test_missing_positions_are_zero() {
        let records: Vec<_> = (1..=15).map(|y| record(y, 0.35, 0.0)).collect();
        let summary = summarize(&records);
        assert_eq!(summary.risk10_year, 0.35);
        assert_eq!(summary.risk20_year, 0.0);
        assert_eq!(summary.risk30_year, 0.0);
        assert_eq!(summary.overall_assessment, ASSESSMENT_NO_MATERIAL_RISK);
        // A 15-year table must not be described as covering 30 years
        assert!(!summary.overall_assessment.contains("30 years"));
    }

    #[test]
    fn test_assessment_buckets() {
        assert_eq!(assess(0.0), ASSESSMENT_NO_MATERIAL_RISK);
        assert_eq!(assess(0.049), ASSESSMENT_NO_MATERIAL_RISK);
        assert_eq!(assess(0.05), ASSESSMENT_LOW_RISK);
        assert_eq!(assess(0.149), ASSESSMENT_LOW_RISK);
        assert_eq!(assess(0.15), ASSESSMENT_MODERATE_RISK);
        assert_eq!(assess(0.299), ASSESSMENT_MODERATE_RISK);
        assert_eq!(assess(0.30), ASSESSMENT_HEIGHTENED_RISK);
        assert_eq!(assess(1.0), ASSESSMENT_HEIGHTENED_RISK);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let records: Vec<_> = (1..=31).map(|y| record(y, 0.15, 0.0)).collect();
        assert_eq!(summarize(&records), summarize(&records));
    }
}
