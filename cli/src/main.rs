use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Once;

static TRACE_INIT: Once = Once::new();
const DEFAULT_TRACE_FILTER: &str = "parsweep_core=info,parsweep=info";

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use parsweep_core::{
    DryRunHarness, HarnessLocator, Matrix, ProcessHarness, SweepDriver, SweepPlan, SweepReport, report::reports_to_json,
};
use tracing::{info, warn};

#[cfg(test)]
mod main_test;

#[derive(Debug, Parser)]
#[command(
    name = "parsweep",
    author,
    version,
    about = "Run the parharness memory-reclamation benchmark sweeps",
    long_about = None,
    after_help = "With no arguments every built-in matrix runs in full (general, then crturn)."
)]
struct CliArgs {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Built-in matrix to run; repeat to run several. Defaults to all of them.
    #[arg(long = "matrix", value_name = "NAME", value_parser = parse_matrix, conflicts_with = "config")]
    matrices: Vec<Matrix>,

    /// Run the plan described by a TOML file instead of the built-in matrices.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the repetition count of every selected plan.
    #[arg(long, value_name = "N")]
    repetitions: Option<u32>,

    /// Print each harness command instead of running it.
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON report of every invocation to FILE.
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Harness `scripts/` directory the search path is built from (default: this executable's directory).
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a plan as TOML, suitable as a starting point for `--config`.
    Show {
        /// Built-in matrix to print.
        #[arg(long, value_name = "NAME", value_parser = parse_matrix, default_value = "general")]
        matrix: Matrix,
    },
}

fn parse_matrix(raw: &str) -> Result<Matrix, String> {
    raw.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn filter_expr_from(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("1")
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("on")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn init_tracing() {
    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = std::env::var("PARSWEEP_LOG")
            .ok()
            .and_then(|raw| filter_expr_from(&raw))
            .or_else(|| std::env::var("RUST_LOG").ok());

        let builder = fmt().with_writer(io::stderr).with_target(false);

        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
        };

        let _ = builder.try_init();
    });
}

fn select_plans(args: &RunArgs) -> anyhow::Result<Vec<SweepPlan>> {
    let mut plans = match &args.config {
        Some(path) => vec![SweepPlan::read(path)?],
        None => {
            let matrices: &[Matrix] = if args.matrices.is_empty() {
                &Matrix::ALL
            } else {
                &args.matrices
            };
            matrices.iter().map(|m| m.plan()).collect::<anyhow::Result<Vec<_>>>()?
        }
    };

    if let Some(repetitions) = args.repetitions {
        plans = plans.into_iter().map(|plan| plan.with_repetitions(repetitions)).collect();
    }
    // Every plan is checked, after overrides, before the first launch.
    for plan in &plans {
        plan.validate()?;
    }
    Ok(plans)
}

fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn run_sweeps(args: &RunArgs) -> anyhow::Result<()> {
    let plans = select_plans(args)?;
    let mut reports: Vec<SweepReport> = Vec::with_capacity(plans.len());

    if args.dry_run {
        let mut driver = SweepDriver::new(DryRunHarness::new(io::stdout().lock())).without_output_dirs();
        for plan in &plans {
            reports.push(driver.run(plan)?);
        }
    } else {
        let base_dir = args.base_dir.clone().unwrap_or_else(default_base_dir);
        info!("harness search root: {}", base_dir.display());
        let mut driver = SweepDriver::new(ProcessHarness::new(HarnessLocator::from_scripts_dir(&base_dir)));
        for plan in &plans {
            reports.push(driver.run(plan)?);
        }
    }

    for report in &reports {
        let failed = report.failure_count();
        if failed > 0 {
            warn!(
                "{}: {} of {} invocations failed; their output files will be sparser",
                report.plan,
                failed,
                report.total()
            );
        }
    }

    if let Some(path) = &args.summary {
        let json = reports_to_json(&reports)?;
        fs::write(path, json).with_context(|| format!("write summary {}", path.display()))?;
    }
    Ok(())
}

fn show(matrix: Matrix) -> anyhow::Result<()> {
    let plan = matrix.plan()?;
    print!("{}", plan.to_toml_string()?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let CliArgs { command, run } = CliArgs::parse();

    match command {
        Some(Commands::Show { matrix }) => show(matrix),
        None => run_sweeps(&run),
    }
}
