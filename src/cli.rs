//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// branchstat - statistics for branch outcome traces
///
/// Reads a trace of `<branch-id> <taken>` records and reports descriptive
/// statistics, branch frequency distributions, taken/not-taken streaks,
/// and optionally how well classic branch predictors would have done.
///
/// Examples:
///   branchstat fft-O0-sample.txt
///   branchstat fft-O0-sample.txt --window 5000 --top 10
///   branchstat fft-O0-sample.txt --simulate --format markdown -o report.md
///   branchstat fft-O0-sample.txt --predictors "gshare;bimodal:1024;correlating:4,2"
///   branchstat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Trace file to analyze
    ///
    /// One record per line: a branch identifier and 1 (taken) or 0 (not taken).
    #[arg(value_name = "TRACE", required_unless_present = "init_config")]
    pub trace: Option<PathBuf>,

    /// Report format (text, markdown, json)
    #[arg(short, long, value_name = "FORMAT", env = "BRANCHSTAT_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Records in the leading and trailing windows [default: 10000]
    #[arg(short, long, value_name = "COUNT")]
    pub window: Option<usize>,

    /// Occurrences needed for a branch to count as hot [default: 100]
    #[arg(long, value_name = "COUNT")]
    pub threshold: Option<usize>,

    /// Number of most common branches to list [default: 31]
    #[arg(short, long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Top-k sizes to report coverage for (comma-separated)
    ///
    /// Example: --coverage 31,100,256
    #[arg(long, value_name = "K", value_delimiter = ',')]
    pub coverage: Option<Vec<usize>>,

    /// Minimum streak length to count [default: 2]
    #[arg(long, value_name = "LEN")]
    pub min_run: Option<usize>,

    /// Replay branch predictors over the trace
    #[arg(short, long)]
    pub simulate: bool,

    /// Predictors to replay (semicolon-separated); implies --simulate
    ///
    /// Values: always-taken, never-taken, bimodal:<entries>,
    /// correlating:<m>,<n>, gshare, gshare:<bits>,<entries>, local.
    /// Example: --predictors "gshare;bimodal:1024;correlating:4,2"
    #[arg(long, value_name = "SPECS", value_delimiter = ';')]
    pub predictors: Option<Vec<String>>,

    /// Reject outcome tokens other than 0 and 1
    #[arg(long)]
    pub strict: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .branchstat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only, no progress bar)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .branchstat.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain console text (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref trace) = self.trace {
            if !trace.exists() {
                return Err(format!("Trace file does not exist: {}", trace.display()));
            }
            if !trace.is_file() {
                return Err(format!("Trace path is not a file: {}", trace.display()));
            }
        }

        if self.window == Some(0) {
            return Err("Window must be at least 1".to_string());
        }

        if self.top == Some(0) {
            return Err("Top must be at least 1".to_string());
        }

        if self.min_run == Some(0) {
            return Err("Minimum run length must be at least 1".to_string());
        }

        if let Some(ref coverage) = self.coverage {
            if coverage.iter().any(|&k| k == 0) {
                return Err("Coverage sizes must be at least 1".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn make_args(trace: PathBuf) -> Args {
        Args {
            trace: Some(trace),
            format: None,
            output: None,
            window: None,
            threshold: None,
            top: None,
            coverage: None,
            min_run: None,
            simulate: false,
            predictors: None,
            strict: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "branchstat",
            "trace.txt",
            "--format",
            "json",
            "--coverage",
            "8,16,32",
            "--predictors",
            "gshare;correlating:4,2",
        ]);
        assert_eq!(args.trace, Some(PathBuf::from("trace.txt")));
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.coverage, Some(vec![8, 16, 32]));
        assert_eq!(
            args.predictors,
            Some(vec!["gshare".to_string(), "correlating:4,2".to_string()])
        );
    }

    #[test]
    fn test_trace_required_unless_init_config() {
        assert!(Args::try_parse_from(["branchstat"]).is_err());
        assert!(Args::try_parse_from(["branchstat", "--init-config"]).is_ok());
    }

    #[test]
    fn test_validation_missing_trace() {
        let args = make_args(PathBuf::from("/nonexistent/trace.txt"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_zero_values() {
        let file = NamedTempFile::new().unwrap();

        let mut args = make_args(file.path().to_path_buf());
        assert!(args.validate().is_ok());

        args.window = Some(0);
        assert!(args.validate().is_err());

        let mut args = make_args(file.path().to_path_buf());
        args.coverage = Some(vec![4, 0]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let file = NamedTempFile::new().unwrap();
        let mut args = make_args(file.path().to_path_buf());
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(PathBuf::from("trace.txt"));
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
