//! Percentile time series and the simulation results object

mod data;
pub mod loader;

pub use data::{
    Percentiles, SimulationInputs, SimulationMetrics, SimulationResults, TimeSeries,
    TimeSeriesPoint,
};
pub use loader::{
    load_results, load_results_from_reader, load_series_csv, load_series_csv_from_reader,
};
