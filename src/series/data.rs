//! Time-series data structures matching the simulation backend's results object

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, RiskError};

/// Read a percentile value, mapping anything that is not a JSON number to `None`
///
/// A string or boolean in one point must not fail the whole results object.
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// A single simulated period of percentile projections
///
/// Percentile fields are optional so that a malformed point survives loading
/// and keeps its position in the series. Use [`TimeSeriesPoint::percentiles`]
/// to obtain validated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Month offset from simulation start
    #[serde(alias = "periodIndex", alias = "month")]
    pub period_index: u32,

    /// Portfolio value at the 10th percentile
    #[serde(default, deserialize_with = "lenient_f64")]
    pub p10: Option<f64>,

    /// Portfolio value at the 25th percentile
    #[serde(default, deserialize_with = "lenient_f64")]
    pub p25: Option<f64>,

    /// Median portfolio value
    #[serde(default, deserialize_with = "lenient_f64")]
    pub median: Option<f64>,

    /// Portfolio value at the 75th percentile
    #[serde(default, deserialize_with = "lenient_f64")]
    pub p75: Option<f64>,

    /// Portfolio value at the 90th percentile
    #[serde(default, deserialize_with = "lenient_f64")]
    pub p90: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,
}

impl TimeSeriesPoint {
    /// Create a fully populated point
    pub fn new(period_index: u32, p10: f64, p25: f64, median: f64, p75: f64, p90: f64) -> Self {
        Self {
            period_index,
            p10: Some(p10),
            p25: Some(p25),
            median: Some(median),
            p75: Some(p75),
            p90: Some(p90),
            mean: None,
            stddev: None,
        }
    }

    /// Validated percentile band for this point
    ///
    /// Fails with `InvalidInputData` when any of the five percentiles is
    /// missing, non-numeric, NaN or infinite.
    pub fn percentiles(&self) -> Result<Percentiles> {
        let field = |name: &str, value: Option<f64>| -> Result<f64> {
            match value {
                Some(v) if v.is_finite() => Ok(v),
                Some(v) => Err(RiskError::InvalidInputData {
                    period_index: self.period_index,
                    reason: format!("{} is not a finite number ({})", name, v),
                }),
                None => Err(RiskError::InvalidInputData {
                    period_index: self.period_index,
                    reason: format!("{} is missing or not a number", name),
                }),
            }
        };

        Ok(Percentiles {
            p10: field("p10", self.p10)?,
            p25: field("p25", self.p25)?,
            median: field("median", self.median)?,
            p75: field("p75", self.p75)?,
            p90: field("p90", self.p90)?,
        })
    }
}

/// The validated P10-P90 band of a single period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentiles {
    pub p10: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub p90: f64,
}

impl Percentiles {
    /// Whether p10 <= p25 <= median <= p75 <= p90
    pub fn is_ordered(&self) -> bool {
        self.p10 <= self.p25 && self.p25 <= self.median && self.median <= self.p75 && self.p75 <= self.p90
    }
}

/// Ordered monthly series of percentile projections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn new(points: Vec<TimeSeriesPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at a positional index (one entry per month)
    pub fn get(&self, index: usize) -> Option<&TimeSeriesPoint> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSeriesPoint> {
        self.points.iter()
    }

    /// Last point with a complete percentile band
    pub fn last_valid(&self) -> Result<(&TimeSeriesPoint, Percentiles)> {
        if self.points.is_empty() {
            return Err(RiskError::EmptySeries);
        }
        self.points
            .iter()
            .rev()
            .find_map(|p| p.percentiles().ok().map(|band| (p, band)))
            .ok_or_else(|| RiskError::InvalidInputData {
                period_index: self.points[self.points.len() - 1].period_index,
                reason: "no point in the series has a complete percentile band".to_string(),
            })
    }

    /// Period indices of valid points whose percentiles are out of order
    pub fn unordered_periods(&self) -> Vec<u32> {
        self.points
            .iter()
            .filter_map(|p| match p.percentiles() {
                Ok(band) if !band.is_ordered() => Some(p.period_index),
                _ => None,
            })
            .collect()
    }
}

impl From<Vec<TimeSeriesPoint>> for TimeSeries {
    fn from(points: Vec<TimeSeriesPoint>) -> Self {
        Self::new(points)
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a TimeSeriesPoint;
    type IntoIter = std::slice::Iter<'a, TimeSeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Headline metrics computed by the simulation backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Fraction of scenarios that never deplete
    #[serde(default)]
    pub success_probability: f64,

    /// Median ending balance
    #[serde(default)]
    pub ending_median: f64,

    /// 10th percentile ending balance
    #[serde(default)]
    pub ending_p10: f64,

    /// 90th percentile ending balance
    #[serde(default)]
    pub ending_p90: f64,

    #[serde(default)]
    pub depletion_probability: f64,

    #[serde(default)]
    pub shortfall_risk: f64,

    /// Number of simulated scenarios
    #[serde(default)]
    pub n_scenarios: u32,
}

/// Client inputs echoed back by the simulation backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    pub current_age: u32,

    #[serde(default)]
    pub years_to_model: u32,

    #[serde(default)]
    pub starting_portfolio: f64,

    #[serde(default)]
    pub monthly_spending: f64,

    /// Any further inputs the backend passes through
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl SimulationInputs {
    /// Initial annual withdrawal as a fraction of the starting portfolio
    pub fn withdrawal_rate(&self) -> Option<f64> {
        if self.starting_portfolio > 0.0 {
            Some(self.monthly_spending * 12.0 / self.starting_portfolio)
        } else {
            None
        }
    }
}

/// Complete results object returned by a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub stats: TimeSeries,

    #[serde(default)]
    pub metrics: SimulationMetrics,

    pub inputs: SimulationInputs,
}

impl SimulationResults {
    /// Require at least one point with a complete percentile band
    ///
    /// Returns that band for the last such point (the ending band).
    pub fn validate(&self) -> Result<Percentiles> {
        self.stats.last_valid().map(|(_, band)| band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentiles_valid_point() {
        let point = TimeSeriesPoint::new(0, 100.0, 200.0, 300.0, 400.0, 500.0);
        let band = point.percentiles().unwrap();
        assert_eq!(band.median, 300.0);
        assert!(band.is_ordered());
    }

    #[test]
    fn test_percentiles_missing_field() {
        let mut point = TimeSeriesPoint::new(24, 100.0, 200.0, 300.0, 400.0, 500.0);
        point.p25 = None;
        match point.percentiles() {
            Err(RiskError::InvalidInputData { period_index, reason }) => {
                assert_eq!(period_index, 24);
                assert!(reason.contains("p25"));
            }
            other => panic!("expected InvalidInputData, got {:?}", other),
        }
    }

    #[test]
    fn test_percentiles_non_finite() {
        let point = TimeSeriesPoint::new(3, f64::NAN, 200.0, 300.0, 400.0, 500.0);
        assert!(matches!(point.percentiles(), Err(RiskError::InvalidInputData { .. })));
    }

    #[test]
    fn test_unordered_band_is_tolerated() {
        let point = TimeSeriesPoint::new(1, 500.0, 100.0, 300.0, 200.0, 50.0);
        let band = point.percentiles().unwrap();
        assert!(!band.is_ordered());

        let series = TimeSeries::new(vec![
            TimeSeriesPoint::new(0, 1.0, 2.0, 3.0, 4.0, 5.0),
            point,
        ]);
        assert_eq!(series.unordered_periods(), vec![1]);
    }

    #[test]
    fn test_last_valid_skips_malformed_tail() {
        let mut tail = TimeSeriesPoint::new(2, 0.0, 0.0, 0.0, 0.0, 0.0);
        tail.median = None;
        let series = TimeSeries::new(vec![
            TimeSeriesPoint::new(0, 10.0, 20.0, 30.0, 40.0, 50.0),
            TimeSeriesPoint::new(1, 5.0, 15.0, 25.0, 35.0, 45.0),
            tail,
        ]);
        let (point, band) = series.last_valid().unwrap();
        assert_eq!(point.period_index, 1);
        assert_eq!(band.p10, 5.0);

        assert!(matches!(TimeSeries::default().last_valid(), Err(RiskError::EmptySeries)));
    }

    #[test]
    fn test_validate_requires_a_usable_point() {
        let mut malformed = TimeSeriesPoint::new(0, 1.0, 2.0, 3.0, 4.0, 5.0);
        malformed.p90 = None;
        let mut results = SimulationResults {
            stats: TimeSeries::default(),
            metrics: SimulationMetrics::default(),
            inputs: SimulationInputs::default(),
        };
        assert!(matches!(results.validate(), Err(RiskError::EmptySeries)));

        results.stats = TimeSeries::new(vec![malformed.clone()]);
        assert!(matches!(
            results.validate(),
            Err(RiskError::InvalidInputData { period_index: 0, .. })
        ));

        results.stats = TimeSeries::new(vec![TimeSeriesPoint::new(0, 1.0, 2.0, 3.0, 4.0, 5.0), malformed]);
        assert_eq!(results.validate().unwrap().p90, 5.0);
    }

    #[test]
    fn test_withdrawal_rate() {
        let inputs = SimulationInputs {
            current_age: 65,
            years_to_model: 30,
            starting_portfolio: 1_000_000.0,
            monthly_spending: 4_000.0,
            other: BTreeMap::new(),
        };
        assert!((inputs.withdrawal_rate().unwrap() - 0.048).abs() < 1e-12);

        let empty = SimulationInputs::default();
        assert_eq!(empty.withdrawal_rate(), None);
    }
}
