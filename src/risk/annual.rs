//! Annual sampling and year-over-year probability of ruin

use std::io::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use super::estimator::estimate;
use crate::error::Result;
use crate::series::TimeSeries;

/// Default number of years sampled
pub const DEFAULT_HORIZON_YEARS: u32 = 30;

/// Months between sampled points
const MONTHS_PER_YEAR: usize = 12;

/// Risk figures for one sampled year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualRiskRecord {
    /// 1-based year number
    pub year: u32,
    /// Client age at the sampled point
    pub age: u32,
    pub success_probability: f64,
    /// Probability of ruin by this year
    pub cumulative_risk: f64,
    /// Increase in cumulative risk over the previous sampled year
    pub annual_risk: f64,
}

/// Sample the monthly series at yearly cadence and derive ruin probabilities
///
/// Points at indices 0, 12, 24, ... are taken, at most `horizon_years + 1` of
/// them. A short or empty series yields a short or empty table. Malformed
/// points are skipped, and the next record's marginal risk is measured against
/// the last emitted record.
///
/// The first emitted record always has `annual_risk == 0`: there is no prior
/// year to compare against.
pub fn sample_annual(series: &TimeSeries, start_age: u32, horizon_years: u32) -> Vec<AnnualRiskRecord> {
    let max_points = horizon_years as usize + 1;
    let mut records: Vec<AnnualRiskRecord> = Vec::with_capacity(max_points.min(series.len()));

    for (y, point) in series
        .iter()
        .step_by(MONTHS_PER_YEAR)
        .take(max_points)
        .enumerate()
    {
        let success_probability = match estimate(point) {
            Ok(p) => p,
            Err(e) => {
                debug!("skipping year {} in annual risk table: {}", y, e);
                continue;
            }
        };

        let cumulative_risk = 1.0 - success_probability;
        let previous = records.last().map(|r| r.cumulative_risk).unwrap_or(cumulative_risk);
        let annual_risk = (cumulative_risk - previous).max(0.0);

        records.push(AnnualRiskRecord {
            year: y as u32 + 1,
            age: start_age + y as u32,
            success_probability,
            cumulative_risk,
            annual_risk,
        });
    }

    records
}

/// Write an annual risk table as CSV
pub fn write_annual_csv<W: Write>(writer: W, records: &[AnnualRiskRecord]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Year", "Age", "SuccessProbability", "CumulativeRisk", "AnnualRisk"])?;

    for r in records {
        csv_writer.write_record([
            r.year.to_string(),
            r.age.to_string(),
            format!("{:.4}", r.success_probability),
            format!("{:.4}", r.cumulative_risk),
            format!("{:.4}", r.annual_risk),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
