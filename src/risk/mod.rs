//! Retirement risk analytics over percentile projections
//!
//! Stages, each a pure function of its inputs:
//! 1. **Estimator**: per-period success probability from the percentile band
//! 2. **Classifier**: success probability to risk level (two threshold profiles)
//! 3. **Annual sampler**: yearly cumulative and marginal probability of ruin
//! 4. **Milestones**: risk and balances at fixed client ages
//! 5. **Summary**: peak risk year and 10/20/30-year risk with an assessment
//!
//! # Example
//!
//! ```rust,ignore
//! use retirement_risk::risk::{sample_annual, summarize, DEFAULT_HORIZON_YEARS};
//!
//! let records = sample_annual(&results.stats, 65, DEFAULT_HORIZON_YEARS);
//! let summary = summarize(&records);
//! println!("{}", summary.overall_assessment);
//! ```

mod estimator;
mod classifier;
mod annual;
mod milestones;
mod summary;

pub use estimator::{estimate, success_curve, SuccessBucket, SuccessProbabilityPoint, SUCCESS_BUCKETS};

pub use classifier::{
    classify,
    ConservativeClassifier,
    LevelStyle,
    RiskClassifier,
    RiskLevel,
    StrictClassifier,
    SuccessRating,
    ThresholdProfile,
};

pub use annual::{sample_annual, write_annual_csv, AnnualRiskRecord, DEFAULT_HORIZON_YEARS};

pub use milestones::{analyze_milestones, milestone_at, LongevityMilestone, DEFAULT_MILESTONE_AGES};

pub use summary::{
    assess,
    summarize,
    RiskSummary,
    ASSESSMENT_HEIGHTENED_RISK,
    ASSESSMENT_LOW_RISK,
    ASSESSMENT_MODERATE_RISK,
    ASSESSMENT_NO_DATA,
    ASSESSMENT_NO_MATERIAL_RISK,
};
