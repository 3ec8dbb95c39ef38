//! Option positioning CLI
//!
//! Fetches a chain (or reads a snapshot file) and prints the per-expiration
//! positioning ratios and their averages.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use option_positioning::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "positioning", about = "Options-market positioning ratios for one underlying")]
struct Args {
    /// Underlying ticker symbol
    #[arg(default_value = "RKLB")]
    ticker: String,

    /// Read the chain from a JSON snapshot file instead of Yahoo Finance
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Annualized risk-free rate for delta/gamma estimation
    #[arg(short, long, default_value_t = DEFAULT_RISK_FREE_RATE)]
    rate: f64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> PositioningResult<()> {
    let config = AnalysisConfig::default().with_risk_free_rate(args.rate);
    let aggregator = ReportAggregator::with_config(&config)?;

    let snapshot = match &args.input {
        Some(path) => SnapshotFile::new(path).fetch_snapshot(&args.ticker)?,
        None => YahooClient::new()?.fetch_snapshot(&args.ticker)?,
    };

    let report = aggregator.run(&snapshot);

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
