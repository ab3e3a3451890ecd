use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use e1rm_cli::config::Config;
use e1rm_cli::{csv_loader, logging, report};
use e1rm_core::{CalculatorState, WeightUnit, estimate_all};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// One-rep max calculator.
///
/// Projects a multi-rep set onto an estimated single using published
/// regression formulas, and converts between pounds and kilograms.
#[derive(Debug, Parser)]
#[command(name = "e1rm", version, about)]
struct Cli {
    /// TOML file with default formula, unit, reps and weight.
    #[arg(long, global = true, env = "E1RM_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug` or `e1rm_core=trace`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate the one-rep max for a single set.
    Estimate {
        /// Repetitions performed.
        #[arg(short, long)]
        reps: Option<u32>,

        /// Weight lifted.
        #[arg(short, long)]
        weight: Option<f64>,

        /// Unit of the weight (`kg` or `lb`).
        #[arg(short, long)]
        unit: Option<WeightUnit>,

        /// Formula name. Unknown names fall back to Brzycki.
        #[arg(short, long, conflicts_with = "all")]
        formula: Option<String>,

        /// Show every formula side by side.
        #[arg(short, long)]
        all: bool,
    },

    /// Convert a weight to the other unit, rounded to a whole number.
    Convert {
        /// Weight to convert.
        #[arg(short, long)]
        weight: f64,

        /// Target unit (`kg` or `lb`).
        #[arg(short, long)]
        to: WeightUnit,
    },

    /// Estimate every lift in a CSV file (columns: reps, weight, [unit], [formula]).
    Batch {
        /// Path to the CSV file.
        #[arg(short, long)]
        file: PathBuf,

        /// Formula for rows without one.
        #[arg(long)]
        formula: Option<String>,

        /// Unit for rows without one.
        #[arg(long)]
        unit: Option<WeightUnit>,
    },

    /// Decode a saved calculator state and show its estimate.
    State {
        /// Query string, e.g. `reps=5&weight=225&isMetric=false`.
        #[arg(short, long)]
        query: String,

        /// Formula name. Unknown names fall back to Brzycki.
        #[arg(short, long)]
        formula: Option<String>,
    },
}

// ─── commands ────────────────────────────────────────────────────────────────

fn run_estimate(
    config: &Config,
    reps: Option<u32>,
    weight: Option<f64>,
    unit: Option<WeightUnit>,
    formula: Option<&str>,
    all: bool,
) -> Result<()> {
    let lift = config.resolve_lift(reps, weight);
    let unit = config.resolve_unit(unit);

    if all {
        let rows = estimate_all(lift.reps, lift.weight)
            .with_context(|| format!("cannot compare formulas for {} x {}", lift.reps, lift.weight))?;
        print!("{}", report::render_comparison(&lift, unit, &rows));
        return Ok(());
    }

    let formula = config.resolve_formula(formula);
    let estimate = lift
        .estimate(formula)
        .with_context(|| format!("cannot estimate {} x {}", lift.reps, lift.weight))?;
    println!("{}", report::render_estimate(&lift, unit, formula, estimate));
    Ok(())
}

fn run_convert(
    weight: f64,
    to: WeightUnit,
) -> Result<()> {
    let line = report::render_conversion(weight, to).context("cannot convert weight")?;
    debug!(weight, %to, "converted weight");
    println!("{line}");
    Ok(())
}

fn run_batch(
    config: &Config,
    file: &Path,
    formula: Option<&str>,
    unit: Option<WeightUnit>,
) -> Result<()> {
    let records = csv_loader::load_from_file(file)
        .with_context(|| format!("Failed to load lifts from: {}", file.display()))?;
    info!("Parsed {} lifts from {}", records.len(), file.display());

    let rows = report::estimate_batch(
        &records,
        config.resolve_formula(formula),
        config.resolve_unit(unit),
    );
    print!("{}", report::render_batch(&rows));

    let failed = rows.iter().filter(|row| row.outcome.is_err()).count();
    if failed > 0 {
        anyhow::bail!("{failed} of {} rows could not be estimated", rows.len());
    }
    Ok(())
}

fn run_state(
    config: &Config,
    query: &str,
    formula: Option<&str>,
) -> Result<()> {
    let state = CalculatorState::from_query_string(query)
        .with_context(|| format!("invalid calculator state: {query}"))?;
    let formula = config.resolve_formula(formula);

    let estimate = state
        .estimate(formula)
        .context("cannot estimate saved state")?;
    println!(
        "{}",
        report::render_estimate(&state.lift(), state.unit, formula, estimate)
    );
    println!("{}", state.to_query_string());
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let config = Config::load_optional(cli.config.as_deref())?;
    if cli.log_level.is_none() {
        if let Some(level) = config.log_level.as_deref() {
            logging::set_log_level(level).context("invalid log_level in config")?;
        }
    }

    match cli.command {
        Command::Estimate {
            reps,
            weight,
            unit,
            formula,
            all,
        } => run_estimate(&config, reps, weight, unit, formula.as_deref(), all),
        Command::Convert { weight, to } => run_convert(weight, to),
        Command::Batch {
            file,
            formula,
            unit,
        } => run_batch(&config, &file, formula.as_deref(), unit),
        Command::State { query, formula } => run_state(&config, &query, formula.as_deref()),
    }
}
