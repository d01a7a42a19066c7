//! Success-probability estimation from a single period's percentile band
//!
//! Only five percentile snapshots are available per period, not per-scenario
//! pass/fail counts, so the estimate locates the lowest percentile that still
//! has a positive balance and reports the bucket for that crossing. The result
//! is always one of six fixed values and is never interpolated.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::series::{Percentiles, TimeSeries, TimeSeriesPoint};

/// Which percentile boundary the zero balance crosses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuccessBucket {
    /// p10 is positive
    AboveP10,
    /// p10 <= 0 < p25
    AboveP25,
    /// p25 <= 0 < median
    AboveMedian,
    /// median <= 0 < p75
    AboveP75,
    /// p75 <= 0 < p90
    AboveP90,
    /// every percentile is at or below zero
    Depleted,
}

impl SuccessBucket {
    /// Locate the bucket; first matching rule wins
    pub fn from_percentiles(band: &Percentiles) -> Self {
        match band {
            b if b.p10 > 0.0 => SuccessBucket::AboveP10,
            b if b.p25 > 0.0 => SuccessBucket::AboveP25,
            b if b.median > 0.0 => SuccessBucket::AboveMedian,
            b if b.p75 > 0.0 => SuccessBucket::AboveP75,
            b if b.p90 > 0.0 => SuccessBucket::AboveP90,
            _ => SuccessBucket::Depleted,
        }
    }

    /// Estimated fraction of scenarios with a positive balance
    pub fn probability(self) -> f64 {
        match self {
            SuccessBucket::AboveP10 => 0.95,
            SuccessBucket::AboveP25 => 0.85,
            SuccessBucket::AboveMedian => 0.65,
            SuccessBucket::AboveP75 => 0.35,
            SuccessBucket::AboveP90 => 0.15,
            SuccessBucket::Depleted => 0.05,
        }
    }
}

/// All values `estimate` can return, highest first
pub const SUCCESS_BUCKETS: [f64; 6] = [0.95, 0.85, 0.65, 0.35, 0.15, 0.05];

/// Estimated success probability for one point
///
/// Fails with `InvalidInputData` if a percentile is missing or non-numeric.
pub fn estimate(point: &TimeSeriesPoint) -> Result<f64> {
    let band = point.percentiles()?;
    Ok(SuccessBucket::from_percentiles(&band).probability())
}

/// Per-period success estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessProbabilityPoint {
    pub period_index: u32,
    pub success_probability: f64,
}

/// Success estimate for every well-formed point in the series
pub fn success_curve(series: &TimeSeries) -> Vec<SuccessProbabilityPoint> {
    series
        .iter()
        .filter_map(|point| match estimate(point) {
            Ok(success_probability) => Some(SuccessProbabilityPoint {
                period_index: point.period_index,
                success_probability,
            }),
            Err(e) => {
                debug!("skipping point in success curve: {}", e);
                None
            }
        })
        .collect()
}
