//! Longevity milestone analysis at fixed client ages

use log::debug;
use serde::{Deserialize, Serialize};

use super::classifier::{classify, RiskLevel};
use super::estimator::SuccessBucket;
use crate::error::{Result, RiskError};
use crate::series::TimeSeries;

/// Default milestone ages
pub const DEFAULT_MILESTONE_AGES: [u32; 7] = [70, 75, 80, 85, 90, 95, 100];

/// Projected risk at one client age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongevityMilestone {
    pub age: u32,
    pub years_from_now: u32,
    pub success_probability: f64,
    pub median_balance: f64,
    pub percentile10_balance: f64,
    /// `1 - success_probability`
    pub depletion_risk: f64,
    /// Conservative-profile classification
    pub risk_level: RiskLevel,
}

/// Milestone for a single age
///
/// Returns `OutOfHorizon` when the age is in the past or beyond the series,
/// and `InvalidInputData` when the point at that age is malformed.
pub fn milestone_at(series: &TimeSeries, current_age: u32, age: u32) -> Result<LongevityMilestone> {
    let years_from_now = age as i64 - current_age as i64;
    let period_index = years_from_now * 12;

    if years_from_now < 0 || period_index >= series.len() as i64 {
        return Err(RiskError::OutOfHorizon {
            age,
            period_index,
            len: series.len(),
        });
    }

    let point = series
        .get(period_index as usize)
        .ok_or(RiskError::OutOfHorizon { age, period_index, len: series.len() })?;
    let band = point.percentiles()?;
    let success_probability = SuccessBucket::from_percentiles(&band).probability();

    Ok(LongevityMilestone {
        age,
        years_from_now: years_from_now as u32,
        success_probability,
        median_balance: band.median,
        percentile10_balance: band.p10,
        depletion_risk: 1.0 - success_probability,
        risk_level: classify(success_probability),
    })
}

/// Milestones for every age the series covers, in ascending age order
///
/// Ages in the past, beyond the horizon, or at a malformed point are omitted;
/// no placeholder rows are produced.
pub fn analyze_milestones(
    series: &TimeSeries,
    current_age: u32,
    milestone_ages: &[u32],
) -> Vec<LongevityMilestone> {
    let mut ages = milestone_ages.to_vec();
    ages.sort_unstable();
    ages.dedup();

    ages.into_iter()
        .filter_map(|age| match milestone_at(series, current_age, age) {
            Ok(m) => Some(m),
            Err(e) => {
                debug!("omitting milestone age {}: {}", age, e);
                None
            }
        })
        .collect()
}
