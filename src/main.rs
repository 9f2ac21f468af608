use analytics::{revenue_pace, AggregationOptions, TimeSeriesAggregator};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use configuration::error::ConfigError;
use configuration::ConfigArgs;
use core_types::{DatedAmount, EmptyPeriodPolicy, MonthLabelStyle};
use planner::{PlannerEngine, PlannerError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;

/// The main entry point for the quota planning tool.
fn main() -> Result<ExitCode> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Plan(args) => handle_plan(args),
        Commands::Aggregate(args) => handle_aggregate(args),
        Commands::Pace(args) => handle_pace(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Turns an annual revenue goal into daily activity targets and charts logged sales.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate annual, monthly, weekly and daily targets from the configured funnel.
    Plan(PlanArgs),
    /// Bucket dated amounts over a date range for charting.
    Aggregate(AggregateArgs),
    /// Compare bucketed revenue with the pro-rated annual goal.
    Pace(PaceArgs),
}

#[derive(Parser)]
struct PlanArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Override the configured annual revenue goal.
    #[arg(long)]
    goal: Option<Decimal>,

    /// Print the targets as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct RangeArgs {
    /// JSON file holding an array of {"date": "YYYY-MM-DD", "amount": "123.45"} records.
    #[arg(long)]
    records: PathBuf,

    /// First day of the range (format: YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// Last day of the range, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Parser)]
struct AggregateArgs {
    #[command(flatten)]
    range: RangeArgs,

    /// Month label style: "month_only" or "with_year_across_years".
    #[arg(long, default_value = "month_only")]
    month_labels: MonthLabelStyle,

    /// Emit zero buckets for months/years without data on long ranges.
    #[arg(long)]
    fill_gaps: bool,

    /// Print the buckets as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct PaceArgs {
    #[command(flatten)]
    range: RangeArgs,

    #[command(flatten)]
    config: ConfigArgs,

    /// Override the configured annual revenue goal.
    #[arg(long)]
    goal: Option<Decimal>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_plan(args: PlanArgs) -> Result<ExitCode> {
    let config = match args.config.load() {
        Ok(config) => config,
        Err(ConfigError::InvalidFunnel(errors)) => return Ok(report_invalid(&errors)),
        Err(e) => return Err(e).context("Failed to load settings"),
    };

    let mut inputs = config.funnel;
    if let Some(goal) = args.goal {
        inputs.annual_revenue_goal = goal;
    }

    tracing::info!(goal = %inputs.annual_revenue_goal, "Calculating targets");
    let targets = match PlannerEngine::new().plan(&inputs) {
        Ok(targets) => targets,
        Err(PlannerError::InvalidInput(errors)) => return Ok(report_invalid(&errors)),
        Err(e) => return Err(e).context("Failed to calculate targets"),
    };

    if args.json {
        print_json(&targets)?;
    } else {
        println!("{}", render::targets_table(&targets));
        println!("{}", render::activity_table(&targets));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_aggregate(args: AggregateArgs) -> Result<ExitCode> {
    let records = read_records(&args.range.records)?;
    let options = AggregationOptions {
        month_labels: args.month_labels,
        long_range_gaps: if args.fill_gaps {
            EmptyPeriodPolicy::Fill
        } else {
            EmptyPeriodPolicy::Skip
        },
    };

    let buckets = TimeSeriesAggregator::with_options(options)
        .aggregate(&records, args.range.from, args.range.to)
        .context("Failed to aggregate records")?;
    tracing::info!(buckets = buckets.len(), "Aggregation complete");

    if args.json {
        print_json(&buckets)?;
    } else {
        println!("{}", render::buckets_table(&buckets));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_pace(args: PaceArgs) -> Result<ExitCode> {
    let config = match args.config.load() {
        Ok(config) => config,
        Err(ConfigError::InvalidFunnel(errors)) => return Ok(report_invalid(&errors)),
        Err(e) => return Err(e).context("Failed to load settings"),
    };
    let goal = args.goal.unwrap_or(config.funnel.annual_revenue_goal);
    let records = read_records(&args.range.records)?;

    let buckets = TimeSeriesAggregator::with_options(config.aggregation)
        .aggregate(&records, args.range.from, args.range.to)
        .context("Failed to aggregate records")?;
    let report = revenue_pace(&buckets, goal).context("Failed to compute goal pace")?;
    tracing::info!(%goal, buckets = report.buckets.len(), "Pace report complete");

    if args.json {
        print_json(&report)?;
    } else {
        println!("{}", render::pace_table(&report));
    }
    Ok(ExitCode::SUCCESS)
}

fn report_invalid(errors: &[String]) -> ExitCode {
    for error in errors {
        eprintln!("invalid input: {error}");
    }
    ExitCode::FAILURE
}

fn read_records(path: &Path) -> Result<Vec<DatedAmount>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from {}", path.display()))?;
    let records: Vec<DatedAmount> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse records in {}", path.display()))?;
    tracing::info!(count = records.len(), path = %path.display(), "Loaded records");
    Ok(records)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
