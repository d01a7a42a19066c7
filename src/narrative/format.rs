//! Fixed number formatting for advisory text
//!
//! Formatting is locale-independent so identical inputs always render the
//! same string.

/// Fraction as a percentage with one decimal place (`0.123` -> `"12.3%"`)
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Abbreviated currency amount
///
/// Below 1,000 the whole-dollar amount is shown, from 1,000 thousands with no
/// decimals (`$250K`), from 1,000,000 millions with one decimal (`$1.2M`).
/// The unit is picked on the rounded amount, so `999_950.0` is `$1.0M`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();

    if (abs / 1_000.0).round() >= 1_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs.round() >= 1_000.0 {
        format!("{}${:.0}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

/// `"1 year"`, `"5 years"`
pub fn format_years(years: u32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{} years", years)
    }
}
