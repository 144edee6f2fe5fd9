//! lutfit CLI

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use lutfit_rs::runner::{run, RunConfig};
use lutfit_rs::{EvalStrategy, UnmatchedPolicy};

#[derive(Parser)]
#[command(name = "lutfit")]
#[command(about = "Brute-force LUT parameter estimation with weighted RMSE")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    /// Run configuration (JSON). Missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the pseudo-measurement.
    #[arg(long)]
    seed: Option<u64>,

    /// True p0 used to generate the pseudo-measurement.
    #[arg(long)]
    true_p0: Option<f64>,

    /// True p1 used to generate the pseudo-measurement.
    #[arg(long)]
    true_p1: Option<f64>,

    /// Surface evaluation strategy.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Handling of measurement times missing from the timeline.
    #[arg(long, value_enum)]
    unmatched: Option<UnmatchedArg>,

    /// Print the run summary as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Vectorized,
    Parallel,
}

impl From<StrategyArg> for EvalStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Vectorized => EvalStrategy::Vectorized,
            StrategyArg::Parallel => EvalStrategy::Parallel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum UnmatchedArg {
    AliasFirst,
    Reject,
    Drop,
}

impl From<UnmatchedArg> for UnmatchedPolicy {
    fn from(arg: UnmatchedArg) -> Self {
        match arg {
            UnmatchedArg::AliasFirst => UnmatchedPolicy::AliasFirst,
            UnmatchedArg::Reject => UnmatchedPolicy::Reject,
            UnmatchedArg::Drop => UnmatchedPolicy::Drop,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> lutfit_rs::Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading run configuration");
            RunConfig::load_json(path)?
        }
        None => RunConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(p0) = cli.true_p0 {
        config.measurement.true_params[0] = p0;
    }
    if let Some(p1) = cli.true_p1 {
        config.measurement.true_params[1] = p1;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy.into();
    }
    if let Some(unmatched) = cli.unmatched {
        config.unmatched = unmatched.into();
    }

    let report = run(&config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        println!("{report}");
    }

    Ok(())
}
