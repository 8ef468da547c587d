//! Data models for branch traces and analysis reports.
//!
//! This module contains the core data structures shared by the trace
//! reader, the analysis passes, and the report renderers.

use crate::analysis::{OutcomeCounts, StreakSummary, Summary};
use crate::predictor::Simulation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Human-readable label for a branch outcome.
pub fn outcome_label(taken: bool) -> &'static str {
    if taken {
        "taken"
    } else {
        "not taken"
    }
}

/// A single branch event from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRecord {
    /// Branch identifier, usually the address of the branch instruction.
    pub address: u64,
    /// Whether the branch was taken.
    pub taken: bool,
}

impl BranchRecord {
    pub fn new(address: u64, taken: bool) -> Self {
        Self { address, taken }
    }
}

/// An in-memory branch trace loaded from a file.
#[derive(Debug, Clone)]
pub struct Trace {
    /// File the trace was read from.
    pub source: PathBuf,
    /// Records in file order.
    pub records: Vec<BranchRecord>,
}

impl Trace {
    pub fn new(source: PathBuf, records: Vec<BranchRecord>) -> Self {
        Self { source, records }
    }

    /// Number of records in the trace.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the trace has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Branch identifiers in trace order.
    pub fn addresses(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.address).collect()
    }

    /// Outcomes in trace order.
    pub fn outcomes(&self) -> Vec<bool> {
        self.records.iter().map(|r| r.taken).collect()
    }
}

/// Descriptive statistics over branch identifiers.
///
/// A window with fewer than two records has no sample variance, so its
/// summary is `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptiveReport {
    /// Records in the leading and trailing slices, at most the trace length.
    pub window: usize,
    pub whole: Option<Summary>,
    pub leading: Option<Summary>,
    pub trailing: Option<Summary>,
}

/// Taken/not-taken counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub window: usize,
    pub whole: OutcomeCounts,
    pub leading: OutcomeCounts,
}

/// Occurrences of a single branch identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCount {
    pub address: u64,
    pub count: usize,
}

/// How many records the `top` most common branches account for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub top: usize,
    pub records: usize,
    pub total: usize,
}

impl Coverage {
    /// Share of the trace covered, as a percentage.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.records as f64 / self.total as f64) * 100.0
        }
    }
}

/// Branch identifier frequency distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyReport {
    /// Total number of records.
    pub total: usize,
    /// Number of distinct branch identifiers.
    pub unique: usize,
    /// Minimum occurrences for a branch to count as hot.
    pub hot_threshold: usize,
    /// Number of branches occurring at least `hot_threshold` times.
    pub hot_branches: usize,
    /// Most common branches, most frequent first.
    pub top: Vec<BranchCount>,
    /// Records accounted for by the top-k branches for each configured k.
    pub coverage: Vec<Coverage>,
}

/// Metadata about the analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the analyzed trace.
    pub trace_path: String,
    /// Number of records read.
    pub records: usize,
    /// Date and time of the analysis.
    pub generated_at: DateTime<Utc>,
    /// Wall-clock duration of the run in seconds.
    pub duration_seconds: f64,
    /// Version of the tool that produced the report.
    pub tool_version: String,
}

/// The complete trace analysis report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub descriptive: DescriptiveReport,
    pub outcomes: OutcomeReport,
    pub frequency: FrequencyReport,
    /// Run-length statistics, taken first.
    pub streaks: Vec<StreakSummary>,
    /// Predictor replay results; empty unless simulation was requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predictors: Vec<Simulation>,
}
