//! Retirement Risk - analytics engine for Monte Carlo retirement projections
//!
//! This library provides:
//! - Per-period success-probability estimates from percentile bands
//! - Risk-level classification under two explicit threshold profiles
//! - Annual cumulative and marginal probability-of-ruin tables
//! - Longevity milestone analysis at fixed client ages
//! - Aggregate risk summaries and rule-based advisory narratives
//!
//! Every stage is a pure function of its inputs; nothing is cached between calls.

pub mod error;
pub mod series;
pub mod risk;
pub mod narrative;
pub mod engine;

// Re-export commonly used types
pub use error::{Result, RiskError};
pub use series::{SimulationResults, TimeSeries, TimeSeriesPoint};
pub use risk::{AnnualRiskRecord, LongevityMilestone, RiskLevel, RiskSummary, ThresholdProfile};
pub use engine::{RiskConfig, RiskEngine, RiskReport};
