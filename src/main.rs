//! branchstat - branch trace statistics
//!
//! A CLI tool that reads a trace of branch outcomes and reports
//! descriptive statistics, branch frequency distributions, outcome
//! streaks, and optionally the accuracy of classic branch predictors.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid arguments, unreadable or malformed trace, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod predictor;
mod report;
mod trace;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::Config;
use models::{Report, ReportMetadata};
use predictor::PredictorSpec;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("branchstat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Analysis failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .branchstat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", config::CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the report on stdout stays clean.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the complete analysis workflow.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    // Parse predictors before doing any work so typos fail fast
    let specs = if config.simulation.enabled {
        if config.simulation.predictors.is_empty() {
            PredictorSpec::default_suite()
        } else {
            predictor::parse_specs(&config.simulation.predictors)?
        }
    } else {
        Vec::new()
    };

    let trace_path = args
        .trace
        .as_deref()
        .context("No trace file given")?;

    // Step 1: Load and parse
    let parse_options = trace::ParseOptions {
        strict_outcomes: config.analysis.strict_outcomes,
    };
    let trace = trace::load_trace(trace_path, parse_options)?;

    // Step 2: Aggregate
    let options = analysis::AnalysisOptions::from(&config.analysis);
    let results = analysis::analyze_trace(&trace, &options)?;

    // Step 3: Simulate
    let predictors = if specs.is_empty() {
        Vec::new()
    } else {
        predictor::run_suite(&trace, &specs, !args.quiet)?
    };

    // Step 4: Report
    let metadata = ReportMetadata {
        trace_path: trace.source.display().to_string(),
        records: trace.len(),
        generated_at: Utc::now(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let report = Report {
        metadata,
        descriptive: results.descriptive,
        outcomes: results.outcomes,
        frequency: results.frequency,
        streaks: results.streaks,
        predictors,
    };

    let output = report::render(&report, config.general.format)?;
    report::write_output(&output, args.output.as_deref())?;

    if let Some(ref path) = args.output {
        info!("Report saved to: {}", path.display());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
