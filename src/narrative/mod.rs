//! Rule-based advisory narratives
//!
//! Each generator owns an ordered table of [`Rule`]s. Rules are evaluated top
//! to bottom and the first whose condition holds renders the sentence, so
//! every generator yields exactly one deterministic string per input. Every
//! table ends in an unconditional fallback.

mod format;
mod generators;

pub use format::{format_currency, format_percent, format_years};
pub use generators::{
    generate_balance_narrative,
    generate_longevity_narrative,
    generate_milestone_sentence,
    generate_peak_risk_narrative,
    generate_success_narrative,
    generate_summary_narrative,
    generate_withdrawal_narrative,
    Narratives,
};

/// One condition -> template entry of a narrative table
pub struct Rule<T: ?Sized> {
    /// Stable identifier, used in logs and tests
    pub name: &'static str,
    pub when: fn(&T) -> bool,
    pub render: fn(&T) -> String,
}

impl<T: ?Sized> Rule<T> {
    /// Unconditional fallback rule
    pub fn otherwise(name: &'static str, render: fn(&T) -> String) -> Self {
        Self { name, when: |_| true, render }
    }
}

/// First rule whose condition holds
pub fn first_match<'r, T: ?Sized>(rules: &'r [Rule<T>], input: &T) -> Option<&'r Rule<T>> {
    rules.iter().find(|rule| (rule.when)(input))
}

/// Render the first matching rule; empty if no rule matches
pub fn render<T: ?Sized>(rules: &[Rule<T>], input: &T) -> String {
    match first_match(rules, input) {
        Some(rule) => {
            log::trace!("narrative rule '{}' matched", rule.name);
            (rule.render)(input)
        }
        None => String::new(),
    }
}
