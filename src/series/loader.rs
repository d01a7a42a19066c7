//! Load simulation results and percentile series from JSON or CSV

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::Reader;
use log::{debug, warn};

use super::{SimulationResults, TimeSeries, TimeSeriesPoint};
use crate::error::Result;

/// Raw CSV row for a percentile series
///
/// Empty or unparseable cells deserialize to `None` and leave the point
/// malformed rather than failing the whole file.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(alias = "periodIndex", alias = "month")]
    period_index: u32,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    p10: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    p25: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    median: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    p75: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    p90: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    mean: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    stddev: Option<f64>,
}

impl From<CsvRow> for TimeSeriesPoint {
    fn from(row: CsvRow) -> Self {
        TimeSeriesPoint {
            period_index: row.period_index,
            p10: row.p10,
            p25: row.p25,
            median: row.median,
            p75: row.p75,
            p90: row.p90,
            mean: row.mean,
            stddev: row.stddev,
        }
    }
}

/// Log percentile-order violations; the points are kept as-is
fn report_unordered(series: &TimeSeries) {
    let unordered = series.unordered_periods();
    if !unordered.is_empty() {
        warn!(
            "{} point(s) have out-of-order percentiles (first at period {})",
            unordered.len(),
            unordered[0]
        );
    }
}

/// Load a results object from a JSON file
pub fn load_results<P: AsRef<Path>>(path: P) -> Result<SimulationResults> {
    let file = File::open(path.as_ref())?;
    debug!("loading simulation results from {}", path.as_ref().display());
    load_results_from_reader(BufReader::new(file))
}

/// Load a results object from any reader (e.g., string buffer, network stream)
pub fn load_results_from_reader<R: Read>(reader: R) -> Result<SimulationResults> {
    let results: SimulationResults = serde_json::from_reader(reader)?;
    debug!("loaded {} time-series points", results.stats.len());
    report_unordered(&results.stats);
    Ok(results)
}

/// Load a percentile series from a CSV file
pub fn load_series_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
    let file = File::open(path.as_ref())?;
    debug!("loading percentile series from {}", path.as_ref().display());
    load_series_csv_from_reader(file)
}

/// Load a percentile series from any CSV reader
pub fn load_series_csv_from_reader<R: Read>(reader: R) -> Result<TimeSeries> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        points.push(TimeSeriesPoint::from(row));
    }

    let series = TimeSeries::new(points);
    report_unordered(&series);
    Ok(series)
}
