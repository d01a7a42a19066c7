//! Full analytics pipeline over one or many simulation runs

use std::path::Path;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::narrative::{
    generate_balance_narrative, generate_longevity_narrative, generate_milestone_sentence,
    generate_peak_risk_narrative, generate_success_narrative, generate_summary_narrative,
    generate_withdrawal_narrative, Narratives,
};
use crate::risk::{
    analyze_milestones, sample_annual, success_curve, summarize, AnnualRiskRecord, LevelStyle,
    LongevityMilestone, RiskSummary, SuccessProbabilityPoint, ThresholdProfile,
    DEFAULT_HORIZON_YEARS, DEFAULT_MILESTONE_AGES,
};
use crate::series::SimulationResults;

/// Configuration for a risk analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RiskConfig {
    /// Client ages reported in the milestone table
    pub milestone_ages: Vec<u32>,

    /// Number of years sampled for the annual risk table
    pub horizon_years: u32,

    /// Threshold profile for the headline rating
    #[serde(alias = "riskThresholdProfile")]
    pub threshold_profile: ThresholdProfile,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            milestone_ages: DEFAULT_MILESTONE_AGES.to_vec(),
            horizon_years: DEFAULT_HORIZON_YEARS,
            threshold_profile: ThresholdProfile::Conservative,
        }
    }
}

impl RiskConfig {
    /// Load a config from a JSON file; missing fields take defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: RiskConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config.normalized())
    }

    /// Sort and de-duplicate milestone ages
    pub fn normalized(mut self) -> Self {
        self.milestone_ages.sort_unstable();
        self.milestone_ages.dedup();
        self
    }
}

/// Everything the dashboard renders for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Backend success probability rated under the configured profile
    pub headline: &'static LevelStyle,
    pub threshold_profile: ThresholdProfile,
    pub success_curve: Vec<SuccessProbabilityPoint>,
    pub annual_risk: Vec<AnnualRiskRecord>,
    pub milestones: Vec<LongevityMilestone>,
    pub summary: RiskSummary,
    pub narratives: Narratives,
}

/// Runs the estimator, sampler, milestone analyzer, summary and narratives
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    /// Create a new engine with the given config
    pub fn new(config: RiskConfig) -> Self {
        Self { config: config.normalized() }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Analyze a single simulation run
    ///
    /// Never fails: malformed points are omitted and an empty series yields
    /// empty tables with the "Simulation required" summary.
    pub fn analyze(&self, results: &SimulationResults) -> RiskReport {
        let series = &results.stats;
        let current_age = results.inputs.current_age;

        let success_curve = success_curve(series);
        let annual_risk = sample_annual(series, current_age, self.config.horizon_years);
        let milestones = analyze_milestones(series, current_age, &self.config.milestone_ages);
        let summary = summarize(&annual_risk);

        info!(
            "analyzed {} points: {} annual records, {} milestones, 30-year risk {:.3}",
            series.len(),
            annual_risk.len(),
            milestones.len(),
            summary.risk30_year
        );

        let success_probability = results.metrics.success_probability;
        let narratives = Narratives {
            success: generate_success_narrative(success_probability),
            longevity: generate_longevity_narrative(&milestones),
            milestones: milestones.iter().map(generate_milestone_sentence).collect(),
            peak_risk: generate_peak_risk_narrative(&summary, &annual_risk),
            summary: generate_summary_narrative(&summary),
            balance: generate_balance_narrative(&results.metrics),
            withdrawal: generate_withdrawal_narrative(&results.inputs),
        };

        RiskReport {
            headline: self.config.threshold_profile.describe(success_probability),
            threshold_profile: self.config.threshold_profile,
            success_curve,
            annual_risk,
            milestones,
            summary,
            narratives,
        }
    }

    /// Analyze many runs in parallel; output order matches input order
    pub fn analyze_batch(&self, runs: &[SimulationResults]) -> Vec<RiskReport> {
        runs.par_iter().map(|results| self.analyze(results)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::{RiskLevel, ASSESSMENT_NO_DATA};
    use crate::series::{SimulationInputs, SimulationMetrics, TimeSeries, TimeSeriesPoint};
    use std::collections::BTreeMap;

    /// Monthly series whose band shifts down 40k per year
    fn results(current_age: u32, months: u32) -> SimulationResults {
        let points = (0..months)
            .map(|i| {
                let shift = (i / 12) as f64 * 40_000.0;
                TimeSeriesPoint::new(
                    i,
                    500_000.0 - shift,
                    700_000.0 - shift,
                    1_000_000.0 - shift,
                    1_300_000.0 - shift,
                    1_600_000.0 - shift,
                )
            })
            .collect();

        SimulationResults {
            stats: TimeSeries::new(points),
            metrics: SimulationMetrics {
                success_probability: 0.87,
                ending_median: -200_000.0,
                ending_p10: -700_000.0,
                ending_p90: 400_000.0,
                depletion_probability: 0.13,
                shortfall_risk: 0.2,
                n_scenarios: 1000,
            },
            inputs: SimulationInputs {
                current_age,
                years_to_model: months / 12,
                starting_portfolio: 1_000_000.0,
                monthly_spending: 4_000.0,
                other: BTreeMap::new(),
            },
        }
    }

    #[test]
    fn test_default_config() {
        let config = RiskConfig::default();
        assert_eq!(config.milestone_ages, vec![70, 75, 80, 85, 90, 95, 100]);
        assert_eq!(config.horizon_years, 30);
        assert_eq!(config.threshold_profile, ThresholdProfile::Conservative);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: RiskConfig =
            serde_json::from_str(r#"{"riskThresholdProfile": "strict", "milestoneAges": [90, 80, 80]}"#).unwrap();
        let config = config.normalized();
        assert_eq!(config.threshold_profile, ThresholdProfile::Strict);
        assert_eq!(config.milestone_ages, vec![80, 90]);
        assert_eq!(config.horizon_years, 30);
    }

    #[test]
    fn test_analyze_full_pipeline() {
        let engine = RiskEngine::default();
        let report = engine.analyze(&results(65, 421));

        assert_eq!(report.success_curve.len(), 421);
        assert_eq!(report.annual_risk.len(), 31);
        assert_eq!(report.milestones.len(), 7);
        assert_eq!(report.narratives.milestones.len(), 7);

        // p10 stays positive until year 13; by year 30 only p75 and p90 are funded
        assert_eq!(report.annual_risk[0].success_probability, 0.95);
        assert_eq!(report.annual_risk[13].success_probability, 0.85);
        assert_eq!(report.annual_risk[29].success_probability, 0.35);
        assert_eq!(report.summary.peak_risk_year, Some(26));
        assert!(report.summary.has_data());
        assert_eq!(report.summary.overall_assessment, crate::risk::ASSESSMENT_HEIGHTENED_RISK);

        // 0.87 is Moderate under the conservative profile
        assert_eq!(report.headline.label, RiskLevel::Moderate.label());
        assert!(report.narratives.success.contains("87.0%"));
    }

    #[test]
    fn test_strict_profile_headline() {
        let engine = RiskEngine::new(RiskConfig {
            threshold_profile: ThresholdProfile::Strict,
            ..Default::default()
        });
        let report = engine.analyze(&results(65, 421));
        assert_eq!(report.headline.label, "Strong");
        // Milestones stay on the conservative classifier
        assert_eq!(report.milestones[0].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_analyze_empty_series() {
        let engine = RiskEngine::default();
        let report = engine.analyze(&results(65, 0));

        assert!(report.success_curve.is_empty());
        assert!(report.annual_risk.is_empty());
        assert!(report.milestones.is_empty());
        assert_eq!(report.summary.overall_assessment, ASSESSMENT_NO_DATA);
    }

    #[test]
    fn test_analyze_batch_preserves_order() {
        let engine = RiskEngine::default();
        let runs = vec![results(65, 421), results(80, 121), results(60, 0)];
        let reports = engine.analyze_batch(&runs);

        assert_eq!(reports.len(), 3);
        for (run, report) in runs.iter().zip(&reports) {
            assert_eq!(report, &engine.analyze(run));
        }
        assert_eq!(reports[1].annual_risk[0].age, 80);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = RiskEngine::default().analyze(&results(65, 121));
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["thresholdProfile"], "conservative");
        assert_eq!(value["annualRisk"][0]["year"], 1);
        assert_eq!(value["milestones"][0]["riskLevel"], "Low");
        assert_eq!(value["summary"]["peakRiskYear"], 1);
        assert!(value["narratives"]["summary"].is_string());
    }
}
