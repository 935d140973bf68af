//! GoalTrackr CLI
//!
//! Command-line interface for running a single savings, reverse or debt projection

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use goaltrackr::{
    Assumptions, DebtParams, PlanInputs, PlanResult, ProjectionConfig, ProjectionEngine,
    ProjectionParams, ReverseParams,
};
use goaltrackr::projection::{GoalOutcome, PayoffOutcome, SeriesPoint, SeriesSampling};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "goaltrackr", version, about = "Plan your savings, pay off debt, and stay motivated")]
struct Cli {
    /// Date month 0 corresponds to (defaults to today)
    #[arg(long, global = true)]
    as_of: Option<NaiveDate>,

    /// JSON file overriding rate convention and iteration caps
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    /// Keep every period up to month 60, then every 6th
    #[arg(long, global = true)]
    thin: bool,

    /// Print the full result as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    /// Write the balance series to this CSV file
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// When will I reach my target?
    Forward(ForwardArgs),
    /// Set a date or horizon and find the required monthly contribution
    Reverse(ReverseArgs),
    /// See payoff date and interest
    Debt(DebtArgs),
}

#[derive(Debug, Args)]
struct ForwardArgs {
    #[arg(long, default_value_t = 1000.0)]
    current: f64,
    #[arg(long, default_value_t = 10000.0)]
    target: f64,
    /// Monthly contribution, added before growth
    #[arg(long, default_value_t = 200.0)]
    contribution: f64,
    /// Annual growth rate as a fraction (0.05 = 5%)
    #[arg(long, default_value_t = 0.05)]
    rate: f64,
    /// Ignore the growth rate
    #[arg(long)]
    no_growth: bool,
}

#[derive(Debug, Args)]
struct ReverseArgs {
    #[arg(long, default_value_t = 1000.0)]
    current: f64,
    #[arg(long, default_value_t = 10000.0)]
    target: f64,
    #[arg(long, default_value_t = 0.05)]
    rate: f64,
    #[arg(long)]
    no_growth: bool,
    /// Number of monthly contributions
    #[arg(long, conflicts_with = "target_date")]
    months: Option<u32>,
    /// Target completion date (YYYY-MM-DD)
    #[arg(long)]
    target_date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
struct DebtArgs {
    #[arg(long, default_value_t = 5000.0)]
    principal: f64,
    /// APR as a fraction (0.18 = 18%)
    #[arg(long, default_value_t = 0.18)]
    apr: f64,
    /// Monthly minimum payment
    #[arg(long, default_value_t = 150.0)]
    payment: f64,
    /// Extra monthly payment
    #[arg(long, default_value_t = 0.0)]
    extra: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = match &cli.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::default(),
    };
    let mut config = match cli.as_of {
        Some(date) => ProjectionConfig::as_of(date),
        None => ProjectionConfig::default(),
    };
    if cli.thin {
        config.sampling = SeriesSampling::thinned();
    }

    let inputs = build_inputs(&cli.mode, config.as_of)?;
    log::info!("Running {} projection as of {}", inputs.mode_name(), config.as_of);

    let engine = ProjectionEngine::new(assumptions, config);
    let result = engine.run(&inputs).context("projection failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    if let Some(path) = &cli.csv {
        write_series(path, result.series())
            .with_context(|| format!("writing series to {}", path.display()))?;
        println!("\nSeries written to: {}", path.display());
    }

    Ok(())
}

fn build_inputs(mode: &Mode, as_of: NaiveDate) -> Result<PlanInputs> {
    let inputs = match mode {
        Mode::Forward(args) => PlanInputs::Forward(ProjectionParams {
            current_amount: args.current,
            target_amount: args.target,
            periodic_contribution: args.contribution,
            annual_growth_rate: args.rate,
            growth_enabled: !args.no_growth,
        }),
        Mode::Reverse(args) => {
            let params = match (args.months, args.target_date) {
                (_, Some(date)) => ReverseParams::with_target_date(
                    args.current,
                    args.target,
                    args.rate,
                    !args.no_growth,
                    as_of,
                    date,
                )?,
                (months, None) => ReverseParams {
                    current_amount: args.current,
                    target_amount: args.target,
                    annual_growth_rate: args.rate,
                    growth_enabled: !args.no_growth,
                    horizon_months: months.unwrap_or(12),
                },
            };
            PlanInputs::Reverse(params)
        }
        Mode::Debt(args) => PlanInputs::Debt(DebtParams {
            principal: args.principal,
            annual_rate: args.apr,
            base_payment: args.payment,
            extra_payment: args.extra,
        }),
    };
    Ok(inputs)
}

fn print_report(result: &PlanResult) {
    let summary = result.summary();

    println!("GoalTrackr v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");

    match result {
        PlanResult::Forward(p) => match p.outcome {
            GoalOutcome::AlreadyMet => println!("Goal already met. Nothing left to save."),
            GoalOutcome::Unreachable => println!("This plan never reaches the goal. Add a contribution or growth."),
            GoalOutcome::Reached if p.periods_elapsed <= 3 => {
                println!("You're so close! A small boost can get you there faster.")
            }
            GoalOutcome::Reached => println!("Keep it up: consistent contributions make this predictable."),
        },
        PlanResult::Reverse(r) => {
            println!("Required monthly contribution: ${:.0}", r.required_contribution);
        }
        PlanResult::Debt(d) => match d.outcome {
            PayoffOutcome::PaymentTooLow { monthly_interest, monthly_payment } => println!(
                "Payment too low: ${:.2} does not cover ${:.2} of monthly interest.",
                monthly_payment, monthly_interest
            ),
            PayoffOutcome::CapReached => println!("Not paid off within {} months.", d.periods_elapsed),
            PayoffOutcome::PaidOff if d.periods_elapsed <= 1 => {
                println!("You're almost done: one final payment left. Great work!")
            }
            PayoffOutcome::PaidOff => println!(
                "At your current payments, you'll be debt-free in {} months.",
                d.periods_elapsed
            ),
        },
    }

    println!("\nSummary:");
    match summary.months {
        Some(months) => println!("  Months: {}", months),
        None => println!("  Months: never"),
    }
    if let Some(date) = summary.completion_date {
        println!("  Completion: {}", date.format("%b %Y"));
    }
    println!("  Total Contributions: ${:.2}", summary.total_contributions);
    println!("  Growth / Interest: ${:.2}", summary.total_growth_or_interest);
    println!("  Final Balance: ${:.2}", summary.final_balance);
    println!("  Progress: {}%", summary.percent_complete);

    if let PlanResult::Debt(d) = result {
        if let (Some(months), Some(interest)) = (d.months_saved(), d.interest_saved()) {
            println!("  Extra payment saves {} months and ${:.2} of interest", months, interest);
        }
    }

    let series = result.series();
    println!("\n{:>6} {:>14}", "Month", "Balance");
    println!("{}", "-".repeat(21));
    for point in series.iter().take(24) {
        println!("{:>6} {:>14.2}", point.period, point.balance);
    }
    if series.len() > 24 {
        println!("... ({} more points)", series.len() - 24);
    }
}

fn write_series(path: &Path, series: &[SeriesPoint]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for point in series {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}
