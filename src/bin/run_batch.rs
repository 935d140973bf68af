//! Run every plan in a CSV file and write one summary row per plan
//!
//! Usage: cargo run --bin run_batch -- plans.csv --output batch_summary.csv

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use goaltrackr::plan::load_plans;
use goaltrackr::projection::{ProjectionConfig, SeriesSampling};
use goaltrackr::{Assumptions, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Evaluate a CSV of savings and debt plans")]
struct Cli {
    /// Plans CSV (name,mode,current_amount,target_amount,...)
    plans: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_summary.csv")]
    output: PathBuf,

    /// Date month 0 corresponds to (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// JSON assumptions file
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

/// One output row per plan
#[derive(Debug, Serialize)]
struct SummaryRow {
    name: String,
    mode: String,
    status: String,
    months: Option<u32>,
    completion_date: Option<NaiveDate>,
    monthly_amount: Option<f64>,
    total_contributions: Option<f64>,
    total_growth_or_interest: Option<f64>,
    final_balance: Option<f64>,
    percent_complete: Option<u8>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let mut config = match cli.as_of {
        Some(date) => ProjectionConfig::as_of(date),
        None => ProjectionConfig::default(),
    };
    config.sampling = SeriesSampling::thinned();

    let assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };

    println!("Loading plans from {}...", cli.plans.display());
    let plans = load_plans(&cli.plans, config.as_of)
        .with_context(|| format!("loading plans from {}", cli.plans.display()))?;
    println!("Loaded {} plans in {:?}", plans.len(), start.elapsed());

    let runner = ScenarioRunner::with_assumptions(assumptions, config);

    let run_start = Instant::now();
    let runs = runner.run_batch(&plans);
    println!("Projections complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    let mut failures = 0;
    let mut unreachable = 0;

    for (plan, run) in plans.iter().zip(&runs) {
        let row = match &run.result {
            Ok(result) => {
                let summary = result.summary();
                if summary.months.is_none() {
                    unreachable += 1;
                }
                SummaryRow {
                    name: run.name.clone(),
                    mode: summary.mode.to_string(),
                    status: summary.status.to_string(),
                    months: summary.months,
                    completion_date: summary.completion_date,
                    monthly_amount: summary.monthly_amount,
                    total_contributions: Some(summary.total_contributions),
                    total_growth_or_interest: Some(summary.total_growth_or_interest),
                    final_balance: Some(summary.final_balance),
                    percent_complete: Some(summary.percent_complete),
                    error: None,
                }
            }
            Err(e) => {
                failures += 1;
                log::warn!("Plan {} failed: {}", run.name, e);
                SummaryRow {
                    name: run.name.clone(),
                    mode: plan.inputs.mode_name().to_string(),
                    status: "error".to_string(),
                    months: None,
                    completion_date: None,
                    monthly_amount: None,
                    total_contributions: None,
                    total_growth_or_interest: None,
                    final_balance: None,
                    percent_complete: None,
                    error: Some(e.to_string()),
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", cli.output.display());
    println!("\nBatch Summary:");
    println!("  Plans: {}", runs.len());
    println!("  Never complete: {}", unreachable);
    println!("  Errors: {}", failures);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
