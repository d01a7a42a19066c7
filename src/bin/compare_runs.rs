//! Compare risk summaries across several simulation runs
//!
//! Usage: cargo run --bin compare_runs -- base.json lower_spending.json ...

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use retirement_risk::{series::load_results, RiskConfig, RiskEngine, ThresholdProfile};

#[derive(Debug, Parser)]
#[command(name = "compare_runs", about = "Side-by-side risk summary for several simulation runs")]
struct Args {
    /// Simulation results JSON files
    #[arg(required = true)]
    runs: Vec<PathBuf>,

    /// Threshold profile for the rating column
    #[arg(long, default_value = "strict")]
    profile: ThresholdProfile,

    /// Years sampled for the annual risk table
    #[arg(long, default_value_t = 30)]
    horizon_years: u32,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let runs = args
        .runs
        .iter()
        .map(|path| load_results(path).with_context(|| format!("failed to load {}", path.display())))
        .collect::<Result<Vec<_>>>()?;
    println!("Loaded {} runs in {:?}", runs.len(), start.elapsed());

    let engine = RiskEngine::new(RiskConfig {
        threshold_profile: args.profile,
        horizon_years: args.horizon_years,
        ..Default::default()
    });
    let reports = engine.analyze_batch(&runs);

    println!(
        "\n{:<28} {:>8} {:>9} {:>6} {:>8} {:>8} {:>8}",
        "Run", "Success", "Rating", "Peak", "10Y", "20Y", "30Y"
    );
    println!("{}", "-".repeat(82));

    for ((path, run), report) in args.runs.iter().zip(&runs).zip(&reports) {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let peak = report
            .summary
            .peak_risk_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<28} {:>7.1}% {:>9} {:>6} {:>7.1}% {:>7.1}% {:>7.1}%",
            name,
            run.metrics.success_probability * 100.0,
            report.headline.label,
            peak,
            report.summary.risk10_year * 100.0,
            report.summary.risk20_year * 100.0,
            report.summary.risk30_year * 100.0,
        );
    }

    println!("\nAssessments:");
    for (path, report) in args.runs.iter().zip(&reports) {
        println!("  {}: {}", path.display(), report.summary.overall_assessment);
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
