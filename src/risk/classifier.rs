//! Risk-level classification of success probabilities
//!
//! Two independent threshold profiles exist and are kept separate:
//! - **Conservative**: `>=0.90 Low / >=0.75 Moderate / >=0.60 High / else VeryHigh`,
//!   used by the longevity milestone table.
//! - **Strict**: `>=0.85 Strong / >=0.70 Moderate / else Low`, used by summary tables.
//!
//! Callers choose a profile explicitly. Presentation data (label, color,
//! description) lives in static lookup tables, not in the threshold logic.

use serde::{Deserialize, Serialize};

/// Display data attached to a classification level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelStyle {
    pub label: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

/// Conservative-profile risk category, ordered from least to most risky
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

static RISK_LEVEL_STYLES: [LevelStyle; 4] = [
    LevelStyle {
        label: "Low",
        color: "#16a34a",
        description: "The portfolio is expected to sustain planned withdrawals in nearly all simulated markets.",
    },
    LevelStyle {
        label: "Moderate",
        color: "#ca8a04",
        description: "The portfolio sustains withdrawals in typical markets but may need adjustments after prolonged downturns.",
    },
    LevelStyle {
        label: "High",
        color: "#ea580c",
        description: "There is a significant chance of depletion, so spending or allocation changes should be considered.",
    },
    LevelStyle {
        label: "Very High",
        color: "#dc2626",
        description: "Depletion is likely under the current plan, which needs material changes to remain sustainable.",
    },
];

impl RiskLevel {
    pub fn style(self) -> &'static LevelStyle {
        &RISK_LEVEL_STYLES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }

    pub fn color(self) -> &'static str {
        self.style().color
    }

    pub fn description(self) -> &'static str {
        self.style().description
    }
}

/// Strict-profile plan rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessRating {
    Strong,
    Moderate,
    Low,
}

static SUCCESS_RATING_STYLES: [LevelStyle; 3] = [
    LevelStyle {
        label: "Strong",
        color: "#16a34a",
        description: "The plan succeeds in the large majority of simulated scenarios.",
    },
    LevelStyle {
        label: "Moderate",
        color: "#ca8a04",
        description: "The plan succeeds in most scenarios but has limited margin for poor markets.",
    },
    LevelStyle {
        label: "Low",
        color: "#dc2626",
        description: "The plan fails in a meaningful share of scenarios and should be revisited.",
    },
];

impl SuccessRating {
    pub fn style(self) -> &'static LevelStyle {
        &SUCCESS_RATING_STYLES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.style().label
    }
}

/// Clamp to [0, 1]; NaN is treated as zero
fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Threshold strategy mapping a success probability to a level
///
/// Implementations are total over `f64`: out-of-range inputs are clamped,
/// never rejected.
pub trait RiskClassifier {
    type Level: Copy;

    /// Classify a success probability
    fn classify(&self, success_probability: f64) -> Self::Level;

    /// Display data for a level
    fn style(&self, level: Self::Level) -> &'static LevelStyle;

    /// Classify and return the display data in one step
    fn describe(&self, success_probability: f64) -> &'static LevelStyle {
        self.style(self.classify(success_probability))
    }
}

/// `>=0.90 Low / >=0.75 Moderate / >=0.60 High / else VeryHigh`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativeClassifier;

impl RiskClassifier for ConservativeClassifier {
    type Level = RiskLevel;

    fn classify(&self, success_probability: f64) -> RiskLevel {
        let p = clamp_probability(success_probability);
        if p >= 0.90 {
            RiskLevel::Low
        } else if p >= 0.75 {
            RiskLevel::Moderate
        } else if p >= 0.60 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }

    fn style(&self, level: RiskLevel) -> &'static LevelStyle {
        level.style()
    }
}

/// `>=0.85 Strong / >=0.70 Moderate / else Low`
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictClassifier;

impl RiskClassifier for StrictClassifier {
    type Level = SuccessRating;

    fn classify(&self, success_probability: f64) -> SuccessRating {
        let p = clamp_probability(success_probability);
        if p >= 0.85 {
            SuccessRating::Strong
        } else if p >= 0.70 {
            SuccessRating::Moderate
        } else {
            SuccessRating::Low
        }
    }

    fn style(&self, level: SuccessRating) -> &'static LevelStyle {
        level.style()
    }
}

/// Conservative classification; shorthand used by the milestone analyzer
pub fn classify(success_probability: f64) -> RiskLevel {
    ConservativeClassifier.classify(success_probability)
}

/// Runtime-selected threshold profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdProfile {
    #[default]
    Conservative,
    Strict,
}

impl ThresholdProfile {
    /// Display data for `success_probability` under this profile
    pub fn describe(self, success_probability: f64) -> &'static LevelStyle {
        match self {
            ThresholdProfile::Conservative => ConservativeClassifier.describe(success_probability),
            ThresholdProfile::Strict => StrictClassifier.describe(success_probability),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThresholdProfile::Conservative => "conservative",
            ThresholdProfile::Strict => "strict",
        }
    }
}

impl std::str::FromStr for ThresholdProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" => Ok(ThresholdProfile::Conservative),
            "strict" => Ok(ThresholdProfile::Strict),
            other => Err(format!("Unknown threshold profile: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conservative_thresholds() {
        assert_eq!(classify(1.0), RiskLevel::Low);
        assert_eq!(classify(0.90), RiskLevel::Low);
        assert_eq!(classify(0.8999), RiskLevel::Moderate);
        assert_eq!(classify(0.75), RiskLevel::Moderate);
        assert_eq!(classify(0.74), RiskLevel::High);
        assert_eq!(classify(0.65), RiskLevel::High);
        assert_eq!(classify(0.60), RiskLevel::High);
        assert_eq!(classify(0.59), RiskLevel::VeryHigh);
        assert_eq!(classify(0.0), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(classify(1.0000001), RiskLevel::Low);
        assert_eq!(classify(7.5), RiskLevel::Low);
        assert_eq!(classify(-0.2), RiskLevel::VeryHigh);
        assert_eq!(classify(f64::NAN), RiskLevel::VeryHigh);
        assert_eq!(StrictClassifier.classify(-3.0), SuccessRating::Low);
        assert_eq!(StrictClassifier.classify(1.2), SuccessRating::Strong);
    }

    #[test]
    fn test_strict_thresholds() {
        let c = StrictClassifier;
        assert_eq!(c.classify(0.85), SuccessRating::Strong);
        assert_eq!(c.classify(0.84), SuccessRating::Moderate);
        assert_eq!(c.classify(0.70), SuccessRating::Moderate);
        assert_eq!(c.classify(0.69), SuccessRating::Low);
    }

    #[test]
    fn test_profiles_disagree_where_expected() {
        // 0.87 is Moderate under conservative thresholds but Strong under strict
        assert_eq!(ThresholdProfile::Conservative.describe(0.87).label, "Moderate");
        assert_eq!(ThresholdProfile::Strict.describe(0.87).label, "Strong");
        // 0.65 is High vs Low
        assert_eq!(ThresholdProfile::Conservative.describe(0.65).label, "High");
        assert_eq!(ThresholdProfile::Strict.describe(0.65).label, "Low");
    }

    #[test]
    fn test_level_styles_lookup() {
        assert_eq!(RiskLevel::VeryHigh.label(), "Very High");
        assert_eq!(RiskLevel::Low.color(), "#16a34a");
        assert!(RiskLevel::High.description().contains("significant chance"));
        assert_eq!(SuccessRating::Moderate.label(), "Moderate");
        assert!(RiskLevel::Low < RiskLevel::VeryHigh);
    }

    #[test]
    fn test_classify_is_idempotent() {
        for p in [0.05, 0.15, 0.35, 0.65, 0.85, 0.95] {
            assert_eq!(classify(p), classify(p));
            assert_eq!(StrictClassifier.classify(p), StrictClassifier.classify(p));
        }
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("strict".parse::<ThresholdProfile>(), Ok(ThresholdProfile::Strict));
        assert_eq!("Conservative".parse::<ThresholdProfile>(), Ok(ThresholdProfile::Conservative));
        assert!("lenient".parse::<ThresholdProfile>().is_err());

        let parsed: ThresholdProfile = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(parsed, ThresholdProfile::Strict);
    }
}
