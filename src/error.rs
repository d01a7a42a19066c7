//! Error taxonomy for the risk analytics engine

use thiserror::Error;

/// Errors raised by the analytics engine and its loaders
#[derive(Debug, Error)]
pub enum RiskError {
    /// A time-series point has a missing or non-numeric percentile field
    #[error("invalid input data at period {period_index}: {reason}")]
    InvalidInputData { period_index: u32, reason: String },

    /// A requested age or year falls outside the projected series
    #[error("age {age} maps to period {period_index}, outside a series of {len} points")]
    OutOfHorizon { age: u32, period_index: i64, len: usize },

    /// The series has no points where at least one was required
    #[error("time series is empty")]
    EmptySeries,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RiskError>;
