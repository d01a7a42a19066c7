//! Narrative generators for the advisory dashboard

use serde::{Deserialize, Serialize};

use super::format::{format_currency, format_percent, format_years};
use super::{render, Rule};
use crate::risk::{classify, AnnualRiskRecord, LongevityMilestone, RiskLevel, RiskSummary};
use crate::series::{SimulationInputs, SimulationMetrics};

/// Every narrative for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Narratives {
    pub success: String,
    pub longevity: String,
    pub milestones: Vec<String>,
    pub peak_risk: String,
    pub summary: String,
    pub balance: String,
    pub withdrawal: String,
}

// ---- Plan success ----

fn success_rules() -> [Rule<f64>; 4] {
    [
        Rule {
            name: "low",
            when: |p| classify(*p) == RiskLevel::Low,
            render: |p| {
                format!(
                    "The plan succeeds in an estimated {} of simulated scenarios, a low risk of running out of money. {}",
                    format_percent(*p),
                    RiskLevel::Low.description()
                )
            },
        },
        Rule {
            name: "moderate",
            when: |p| classify(*p) == RiskLevel::Moderate,
            render: |p| {
                format!(
                    "The plan succeeds in an estimated {} of simulated scenarios, a moderate risk of running out of money. {}",
                    format_percent(*p),
                    RiskLevel::Moderate.description()
                )
            },
        },
        Rule {
            name: "high",
            when: |p| classify(*p) == RiskLevel::High,
            render: |p| {
                format!(
                    "The plan succeeds in only {} of simulated scenarios, a high risk of running out of money. {}",
                    format_percent(*p),
                    RiskLevel::High.description()
                )
            },
        },
        Rule::otherwise("very_high", |p: &f64| {
            format!(
                "The plan succeeds in only {} of simulated scenarios, a very high risk of running out of money. {}",
                format_percent(*p),
                RiskLevel::VeryHigh.description()
            )
        }),
    ]
}

/// Headline verdict for the plan's overall success probability
pub fn generate_success_narrative(success_probability: f64) -> String {
    render(&success_rules(), &success_probability)
}

// ---- Longevity milestones ----

struct LongevityView<'a> {
    first: Option<&'a LongevityMilestone>,
    last: Option<&'a LongevityMilestone>,
    /// Earliest milestone rated High or worse
    first_elevated: Option<&'a LongevityMilestone>,
    max_depletion: f64,
    all_low: bool,
}

impl<'a> LongevityView<'a> {
    fn new(milestones: &'a [LongevityMilestone]) -> Self {
        Self {
            first: milestones.first(),
            last: milestones.last(),
            first_elevated: milestones.iter().find(|m| m.risk_level >= RiskLevel::High),
            max_depletion: milestones.iter().map(|m| m.depletion_risk).fold(0.0, f64::max),
            all_low: milestones.iter().all(|m| m.risk_level == RiskLevel::Low),
        }
    }
}

fn longevity_rules<'a>() -> [Rule<LongevityView<'a>>; 4] {
    [
        Rule {
            name: "no_milestones",
            when: |v| v.first.is_none(),
            render: |_| {
                "The projection does not reach any milestone age, so longevity risk cannot be assessed.".to_string()
            },
        },
        Rule {
            name: "all_low",
            when: |v| v.all_low,
            render: |v| {
                let last = v.last.map(|m| m.age).unwrap_or_default();
                format!(
                    "Through age {}, depletion risk stays at or below {}; the portfolio is projected to outlast every milestone shown.",
                    last,
                    format_percent(v.max_depletion)
                )
            },
        },
        Rule {
            name: "elevated",
            when: |v| v.first_elevated.is_some(),
            render: |v| match v.first_elevated {
                Some(m) => format!(
                    "Depletion risk reaches {} by age {} ({} from now), rated {}. {}",
                    format_percent(m.depletion_risk),
                    m.age,
                    format_years(m.years_from_now),
                    m.risk_level.label(),
                    m.risk_level.description()
                ),
                None => String::new(),
            },
        },
        Rule::otherwise("moderate", |v: &LongevityView<'a>| {
            let last = v.last.map(|m| m.age).unwrap_or_default();
            format!(
                "Depletion risk rises to {} by age {}; longevity risk is moderate across the milestones shown.",
                format_percent(v.max_depletion),
                last
            )
        }),
    ]
}

/// Overview of longevity risk across the milestone table
pub fn generate_longevity_narrative(milestones: &[LongevityMilestone]) -> String {
    render(&longevity_rules(), &LongevityView::new(milestones))
}

fn milestone_rules() -> [Rule<LongevityMilestone>; 4] {
    [
        Rule {
            name: "today",
            when: |m| m.years_from_now == 0,
            render: |m| {
                format!(
                    "Today, at age {}, the median balance is {} with a {} estimated chance of depletion.",
                    m.age,
                    format_currency(m.median_balance),
                    format_percent(m.depletion_risk)
                )
            },
        },
        Rule {
            name: "p10_funded",
            when: |m| m.percentile10_balance > 0.0,
            render: |m| {
                format!(
                    "At age {} ({} from now) the median balance is {}, and even poor markets (10th percentile) leave {}.",
                    m.age,
                    format_years(m.years_from_now),
                    format_currency(m.median_balance),
                    format_currency(m.percentile10_balance)
                )
            },
        },
        Rule {
            name: "median_funded",
            when: |m| m.median_balance > 0.0,
            render: |m| {
                format!(
                    "At age {} ({} from now) the median balance is {}, but poor markets leave a {} chance of depletion.",
                    m.age,
                    format_years(m.years_from_now),
                    format_currency(m.median_balance),
                    format_percent(m.depletion_risk)
                )
            },
        },
        Rule::otherwise("median_depleted", |m: &LongevityMilestone| {
            format!(
                "At age {} ({} from now) the median scenario is depleted, with an estimated {} chance of depletion overall.",
                m.age,
                format_years(m.years_from_now),
                format_percent(m.depletion_risk)
            )
        }),
    ]
}

/// One sentence for a single milestone row
pub fn generate_milestone_sentence(milestone: &LongevityMilestone) -> String {
    render(&milestone_rules(), milestone)
}

// ---- Peak annual risk ----

struct PeakView<'a> {
    summary: &'a RiskSummary,
    peak_age: Option<u32>,
}

fn peak_rules<'a>() -> [Rule<PeakView<'a>>; 4] {
    [
        Rule {
            name: "no_data",
            when: |v| !v.summary.has_data(),
            render: |_| "Run a simulation to see when depletion risk rises fastest.".to_string(),
        },
        Rule {
            name: "flat",
            when: |v| v.summary.peak_risk_value <= 0.0,
            render: |_| "Depletion risk does not increase from one year to the next over the projection.".to_string(),
        },
        Rule {
            name: "peak_with_age",
            when: |v| v.peak_age.is_some(),
            render: |v| {
                format!(
                    "Depletion risk rises fastest in year {} (age {}), adding {} in a single year.",
                    v.summary.peak_risk_year.unwrap_or_default(),
                    v.peak_age.unwrap_or_default(),
                    format_percent(v.summary.peak_risk_value)
                )
            },
        },
        Rule::otherwise("peak", |v: &PeakView<'a>| {
            format!(
                "Depletion risk rises fastest in year {}, adding {} in a single year.",
                v.summary.peak_risk_year.unwrap_or_default(),
                format_percent(v.summary.peak_risk_value)
            )
        }),
    ]
}

/// When marginal depletion risk peaks
///
/// `records` is the table the summary was built from; it supplies the age at
/// the peak year.
pub fn generate_peak_risk_narrative(summary: &RiskSummary, records: &[AnnualRiskRecord]) -> String {
    let peak_age = summary
        .peak_risk_year
        .and_then(|year| records.iter().find(|r| r.year == year))
        .map(|r| r.age);
    render(&peak_rules(), &PeakView { summary, peak_age })
}

// ---- 10/20/30-year summary ----

fn summary_rules() -> [Rule<RiskSummary>; 5] {
    [
        Rule {
            name: "no_data",
            when: |s| !s.has_data(),
            render: |_| "Run a simulation to see depletion risk at 10, 20 and 30 years.".to_string(),
        },
        Rule {
            name: "thirty_years",
            when: |s| s.risk30_year > 0.0,
            render: |s| {
                format!(
                    "Cumulative depletion risk is {} after 10 years, {} after 20 years and {} after 30 years. {}",
                    format_percent(s.risk10_year),
                    format_percent(s.risk20_year),
                    format_percent(s.risk30_year),
                    s.overall_assessment
                )
            },
        },
        Rule {
            name: "twenty_years",
            when: |s| s.risk20_year > 0.0,
            render: |s| {
                format!(
                    "Cumulative depletion risk is {} after 10 years and {} after 20 years; the projection ends before year 30.",
                    format_percent(s.risk10_year),
                    format_percent(s.risk20_year)
                )
            },
        },
        Rule {
            name: "ten_years",
            when: |s| s.risk10_year > 0.0,
            render: |s| {
                format!(
                    "Cumulative depletion risk is {} after 10 years; the projection ends before year 20.",
                    format_percent(s.risk10_year)
                )
            },
        },
        Rule::otherwise("too_short", |_: &RiskSummary| {
            "The projection is too short to report depletion risk at 10 years.".to_string()
        }),
    ]
}

/// Cumulative risk at 10/20/30 years with the overall assessment
pub fn generate_summary_narrative(summary: &RiskSummary) -> String {
    render(&summary_rules(), summary)
}

// ---- Ending balances ----

fn balance_rules() -> [Rule<SimulationMetrics>; 4] {
    [
        Rule {
            name: "p10_funded",
            when: |m| m.ending_p10 > 0.0,
            render: |m| {
                format!(
                    "Even in poor markets (10th percentile) the portfolio ends with {}; the median outcome is {} and strong markets (90th percentile) reach {}.",
                    format_currency(m.ending_p10),
                    format_currency(m.ending_median),
                    format_currency(m.ending_p90)
                )
            },
        },
        Rule {
            name: "median_funded",
            when: |m| m.ending_median > 0.0,
            render: |m| {
                format!(
                    "The median outcome ends with {}, but in poor markets (10th percentile) the portfolio is depleted before the end of the plan.",
                    format_currency(m.ending_median)
                )
            },
        },
        Rule {
            name: "p90_funded",
            when: |m| m.ending_p90 > 0.0,
            render: |m| {
                format!(
                    "The median outcome depletes the portfolio before the end of the plan; only strong markets (90th percentile) end with {}.",
                    format_currency(m.ending_p90)
                )
            },
        },
        Rule::otherwise("depleted", |_: &SimulationMetrics| {
            "The portfolio is depleted before the end of the plan in nearly every simulated scenario.".to_string()
        }),
    ]
}

/// Ending-balance outlook from the backend's headline metrics
pub fn generate_balance_narrative(metrics: &SimulationMetrics) -> String {
    render(&balance_rules(), metrics)
}

// ---- Withdrawal rate ----

fn withdrawal_rules() -> [Rule<SimulationInputs>; 5] {
    fn rate(inputs: &SimulationInputs) -> f64 {
        inputs.withdrawal_rate().unwrap_or_default()
    }

    fn lead(inputs: &SimulationInputs) -> String {
        format!(
            "Spending {} a month is a {} initial withdrawal rate",
            format_currency(inputs.monthly_spending),
            format_percent(rate(inputs))
        )
    }

    [
        Rule {
            name: "no_portfolio",
            when: |i| i.withdrawal_rate().is_none(),
            render: |_| "A starting portfolio is required to evaluate the withdrawal rate.".to_string(),
        },
        Rule {
            name: "within_guideline",
            when: |i| rate(i) <= 0.04,
            render: |i| format!("{}, within the commonly cited 4% guideline.", lead(i)),
        },
        Rule {
            name: "slightly_above",
            when: |i| rate(i) <= 0.05,
            render: |i| {
                format!(
                    "{}, slightly above the 4% guideline; flexibility in down markets helps sustain it.",
                    lead(i)
                )
            },
        },
        Rule {
            name: "well_above",
            when: |i| rate(i) <= 0.07,
            render: |i| format!("{}, well above the 4% guideline and reliant on strong returns.", lead(i)),
        },
        Rule::otherwise("unsustainable", |i: &SimulationInputs| {
            format!("{}, which is unlikely to be sustainable over a long retirement.", lead(i))
        }),
    ]
}

/// Initial withdrawal rate against common guideposts
pub fn generate_withdrawal_narrative(inputs: &SimulationInputs) -> String {
    render(&withdrawal_rules(), inputs)
}
