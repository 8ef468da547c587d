//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.branchstat.toml` files.

use crate::cli::{Args, OutputFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".branchstat.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Statistics settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Predictor replay settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
        }
    }
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Records in the leading and trailing windows.
    #[serde(default = "default_window")]
    pub window: usize,

    /// Occurrences needed for a branch to count as hot.
    #[serde(default = "default_hot_threshold")]
    pub hot_threshold: usize,

    /// Number of most common branches to list.
    #[serde(default = "default_top")]
    pub top: usize,

    /// Top-k sizes to report coverage for.
    #[serde(default = "default_coverage")]
    pub coverage: Vec<usize>,

    /// Minimum run length counted in streak statistics.
    #[serde(default = "default_min_run")]
    pub min_run: usize,

    /// Reject outcome tokens other than 0 and 1.
    #[serde(default)]
    pub strict_outcomes: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            hot_threshold: default_hot_threshold(),
            top: default_top(),
            coverage: default_coverage(),
            min_run: default_min_run(),
            strict_outcomes: false,
        }
    }
}

fn default_window() -> usize {
    10_000
}

fn default_hot_threshold() -> usize {
    100
}

fn default_top() -> usize {
    31
}

fn default_coverage() -> Vec<usize> {
    vec![31, 100, 256, 512, 1024]
}

fn default_min_run() -> usize {
    2
}

/// Predictor replay settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Replay predictors over the trace.
    #[serde(default)]
    pub enabled: bool,

    /// Predictors to replay. Empty means the built-in suite.
    #[serde(default)]
    pub predictors: Vec<String>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// Only values the user actually passed override the file.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(format) = args.format {
            self.general.format = format;
        }
        if let Some(window) = args.window {
            self.analysis.window = window;
        }
        if let Some(threshold) = args.threshold {
            self.analysis.hot_threshold = threshold;
        }
        if let Some(top) = args.top {
            self.analysis.top = top;
        }
        if let Some(ref coverage) = args.coverage {
            self.analysis.coverage = coverage.clone();
        }
        if let Some(min_run) = args.min_run {
            self.analysis.min_run = min_run;
        }
        if args.strict {
            self.analysis.strict_outcomes = true;
        }

        // Naming predictors implies replaying them
        if let Some(ref predictors) = args.predictors {
            self.simulation.predictors = predictors.clone();
            self.simulation.enabled = true;
        }
        if args.simulate {
            self.simulation.enabled = true;
        }
    }

    /// Check values that serde can't constrain.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.window == 0 {
            anyhow::bail!("analysis.window must be at least 1");
        }
        if self.analysis.top == 0 {
            anyhow::bail!("analysis.top must be at least 1");
        }
        if self.analysis.min_run == 0 {
            anyhow::bail!("analysis.min_run must be at least 1");
        }
        if self.analysis.coverage.iter().any(|&k| k == 0) {
            anyhow::bail!("analysis.coverage entries must be at least 1");
        }
        Ok(())
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
