// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line solver: reads a JSON instance, prints a JSON outcome.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tied_marriage::{
    blocking_pairs, Criterion, InstanceDocument, Outcome, OutcomeDocument, RoundLimit, Solver,
    SolverConfig, Stability,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tied-marriage")]
#[command(author = "Jeremy J. Carroll")]
#[command(version)]
#[command(about = "Super-stable and strongly stable matchings with ties", long_about = None)]
struct Args {
    /// JSON instance file; reads stdin when omitted or "-"
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Stability criterion: super or strong
    #[arg(short, long, default_value = "strong")]
    stability: Stability,

    /// Maximum number of rounds (default: n² for strong, none for super)
    #[arg(long, value_name = "ROUNDS")]
    round_limit: Option<usize>,

    /// Re-check the returned matching for blocking pairs
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Print run statistics to stderr
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Log progress (-v: debug, -vv: trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let text = read_input(&args)?;
    let document: InstanceDocument =
        serde_json::from_str(&text).context("failed to parse instance JSON")?;
    let instance = document.into_instance().context("invalid instance")?;
    info!(
        men = instance.men_count(),
        women = instance.women_count(),
        "instance loaded"
    );

    let round_limit = args.round_limit.map_or(RoundLimit::Auto, RoundLimit::Fixed);
    let config = SolverConfig::new(args.stability).with_round_limit(round_limit);
    let report = Solver::new(config).solve(&instance)?;

    if args.verify {
        if let Outcome::Stable(matching) = &report.outcome {
            let blocking = blocking_pairs(&instance, matching, Criterion::from(args.stability));
            if !blocking.is_empty() {
                bail!("matching is not {}-stable: blocking pairs {:?}", args.stability, blocking);
            }
        }
    }
    if args.stats {
        eprintln!("rounds={} {}", report.rounds, report.statistics);
    }

    let output = OutcomeDocument::from_report(&report);
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("failed to serialize outcome")?
    );
    Ok(())
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}
