//! Retirement Risk CLI
//!
//! Command-line interface for analyzing simulation results

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use retirement_risk::{
    risk::write_annual_csv,
    series::load_results,
    RiskConfig, RiskEngine, ThresholdProfile,
};

#[derive(Debug, Parser)]
#[command(name = "retirement_risk", version, about = "Risk analytics for retirement simulation results")]
struct Cli {
    /// Simulation results JSON (stats, metrics, inputs)
    results: PathBuf,

    /// JSON config file (milestoneAges, horizonYears, thresholdProfile)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Threshold profile for the headline rating
    #[arg(long)]
    profile: Option<ThresholdProfile>,

    /// Years sampled for the annual risk table
    #[arg(long)]
    horizon_years: Option<u32>,

    /// Milestone ages, comma separated
    #[arg(long, value_delimiter = ',')]
    milestones: Option<Vec<u32>>,

    /// Write the annual risk table to this CSV file
    #[arg(long)]
    annual_csv: Option<PathBuf>,

    /// Print the full report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn build_config(cli: &Cli) -> Result<RiskConfig> {
    let mut config = match &cli.config {
        Some(path) => RiskConfig::from_json_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RiskConfig::default(),
    };

    if let Some(profile) = cli.profile {
        config.threshold_profile = profile;
    }
    if let Some(years) = cli.horizon_years {
        config.horizon_years = years;
    }
    if let Some(ages) = &cli.milestones {
        config.milestone_ages = ages.clone();
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let results = load_results(&cli.results)
        .with_context(|| format!("failed to load results from {}", cli.results.display()))?;
    let ending_band = results
        .validate()
        .context("no data available: the simulation returned no usable points")?;

    let engine = RiskEngine::new(config);
    let report = engine.analyze(&results);

    if let Some(path) = &cli.annual_csv {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        write_annual_csv(file, &report.annual_risk)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Retirement Risk Analysis");
    println!("========================\n");

    println!("Client age: {}", results.inputs.current_age);
    println!("Scenarios:  {}", results.metrics.n_scenarios);
    println!(
        "Ending:     P10 {:.0} / Median {:.0} / P90 {:.0}",
        ending_band.p10, ending_band.median, ending_band.p90
    );
    println!(
        "Success:    {:.1}% ({} - {} profile)",
        results.metrics.success_probability * 100.0,
        report.headline.label,
        report.threshold_profile.as_str()
    );
    println!("\n{}\n", report.narratives.success);

    println!("Annual Probability of Ruin:");
    println!("{:>4} {:>4} {:>10} {:>12} {:>10}", "Year", "Age", "Success", "Cumulative", "Annual");
    println!("{}", "-".repeat(44));
    for r in &report.annual_risk {
        println!(
            "{:>4} {:>4} {:>9.1}% {:>11.1}% {:>9.1}%",
            r.year,
            r.age,
            r.success_probability * 100.0,
            r.cumulative_risk * 100.0,
            r.annual_risk * 100.0,
        );
    }

    println!("\nLongevity Milestones:");
    println!("{:>4} {:>6} {:>14} {:>14} {:>10}  {}", "Age", "Years", "Median", "P10", "Depletion", "Risk");
    println!("{}", "-".repeat(64));
    for m in &report.milestones {
        println!(
            "{:>4} {:>6} {:>14.0} {:>14.0} {:>9.1}%  {}",
            m.age,
            m.years_from_now,
            m.median_balance,
            m.percentile10_balance,
            m.depletion_risk * 100.0,
            m.risk_level.label(),
        );
    }

    let summary = &report.summary;
    println!("\nSummary:");
    match summary.peak_risk_year {
        Some(year) => println!("  Peak Risk Year: {} ({:.1}%)", year, summary.peak_risk_value * 100.0),
        None => println!("  Peak Risk Year: -"),
    }
    println!("  Risk at 10 Years: {:.1}%", summary.risk10_year * 100.0);
    println!("  Risk at 20 Years: {:.1}%", summary.risk20_year * 100.0);
    println!("  Risk at 30 Years: {:.1}%", summary.risk30_year * 100.0);
    println!("  {}", summary.overall_assessment);

    let narratives = &report.narratives;
    println!("\nNarrative:");
    for text in [
        &narratives.summary,
        &narratives.peak_risk,
        &narratives.longevity,
        &narratives.balance,
        &narratives.withdrawal,
    ] {
        println!("  {}", text);
    }
    for sentence in &narratives.milestones {
        println!("  - {}", sentence);
    }

    if let Some(path) = &cli.annual_csv {
        println!("\nAnnual risk table written to: {}", path.display());
    }

    Ok(())
}
