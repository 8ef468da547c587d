//! Trace aggregation.
//!
//! Runs every statistics pass over a loaded trace and collects the
//! results into the report sections.

use super::descriptive::{describe, Summary};
use super::frequency::BranchFrequency;
use super::outcomes::OutcomeCounts;
use super::streaks::{both_streaks, StreakSummary};
use crate::error::{Result, TraceError};
use crate::models::{Coverage, DescriptiveReport, FrequencyReport, OutcomeReport, Trace};
use tracing::{debug, info};

/// Parameters for the statistics passes.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Records in the leading and trailing windows.
    pub window: usize,
    /// Occurrences needed for a branch to count as hot.
    pub hot_threshold: usize,
    /// Number of most common branches to list.
    pub top: usize,
    /// Top-k sizes for coverage figures.
    pub coverage: Vec<usize>,
    /// Minimum run length counted by the streak pass.
    pub min_run: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            window: 10_000,
            hot_threshold: 100,
            top: 31,
            coverage: vec![31, 100, 256, 512, 1024],
            min_run: 2,
        }
    }
}

impl From<&crate::config::AnalysisConfig> for AnalysisOptions {
    fn from(config: &crate::config::AnalysisConfig) -> Self {
        Self {
            window: config.window,
            hot_threshold: config.hot_threshold,
            top: config.top,
            coverage: config.coverage.clone(),
            min_run: config.min_run,
        }
    }
}

/// Results of all statistics passes over one trace.
#[derive(Debug, Clone)]
pub struct AnalysisResults {
    pub descriptive: DescriptiveReport,
    pub outcomes: OutcomeReport,
    pub frequency: FrequencyReport,
    pub streaks: Vec<StreakSummary>,
}

/// First `window` items of `items`.
pub fn leading<T>(items: &[T], window: usize) -> &[T] {
    &items[..window.min(items.len())]
}

/// Last `window` items of `items`.
pub fn trailing<T>(items: &[T], window: usize) -> &[T] {
    &items[items.len().saturating_sub(window)..]
}

/// Describe a slice, treating too-short slices as unavailable.
fn describe_window(values: &[u64], label: &str) -> Option<Summary> {
    match describe(values) {
        Ok(summary) => Some(summary),
        Err(e) => {
            debug!("Skipping {} statistics: {}", label, e);
            None
        }
    }
}

/// Run every statistics pass over `trace`.
pub fn analyze_trace(trace: &Trace, options: &AnalysisOptions) -> Result<AnalysisResults> {
    if trace.is_empty() {
        return Err(TraceError::EmptyTrace);
    }

    let addresses = trace.addresses();
    let outcomes = trace.outcomes();
    // Clamped so short traces report their real window size
    let window = options.window.min(trace.len());
    info!(
        "Analyzing {} records (window {})",
        addresses.len(),
        window
    );

    let descriptive = DescriptiveReport {
        window,
        whole: describe_window(&addresses, "whole-trace"),
        leading: describe_window(leading(&addresses, window), "leading window"),
        trailing: describe_window(trailing(&addresses, window), "trailing window"),
    };

    let outcome_report = OutcomeReport {
        window,
        whole: OutcomeCounts::from_outcomes(&outcomes),
        leading: OutcomeCounts::from_outcomes(leading(&outcomes, window)),
    };

    let frequency = frequency_report(&addresses, options);
    debug!(
        "{} unique branches, {} hot",
        frequency.unique, frequency.hot_branches
    );

    let streaks = both_streaks(&outcomes, options.min_run);

    Ok(AnalysisResults {
        descriptive,
        outcomes: outcome_report,
        frequency,
        streaks,
    })
}

/// Build the frequency section from the address sequence.
pub fn frequency_report(addresses: &[u64], options: &AnalysisOptions) -> FrequencyReport {
    let freq = BranchFrequency::from_addresses(addresses);

    let coverage = options
        .coverage
        .iter()
        .map(|&k| Coverage {
            top: k,
            records: freq.coverage(k),
            total: freq.total(),
        })
        .collect();

    FrequencyReport {
        total: freq.total(),
        unique: freq.unique(),
        hot_threshold: options.hot_threshold,
        hot_branches: freq.at_least(options.hot_threshold),
        top: freq.most_common(options.top),
        coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BranchRecord;
    use std::path::PathBuf;

    fn create_test_trace(records: &[(u64, bool)]) -> Trace {
        Trace::new(
            PathBuf::from("test.trace"),
            records
                .iter()
                .map(|&(a, t)| BranchRecord::new(a, t))
                .collect(),
        )
    }

    #[test]
    fn test_windows() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(leading(&items, 2), &[1, 2]);
        assert_eq!(trailing(&items, 2), &[4, 5]);
        assert_eq!(leading(&items, 10), &items);
        assert_eq!(trailing(&items, 10), &items);
    }

    #[test]
    fn test_analyze_empty_trace() {
        let trace = create_test_trace(&[]);
        assert!(matches!(
            analyze_trace(&trace, &AnalysisOptions::default()),
            Err(TraceError::EmptyTrace)
        ));
    }

    #[test]
    fn test_analyze_trace_sections() {
        let trace = create_test_trace(&[
            (100, true),
            (200, true),
            (100, false),
            (300, true),
            (100, true),
            (200, false),
        ]);
        let options = AnalysisOptions {
            window: 3,
            hot_threshold: 2,
            top: 2,
            coverage: vec![1, 10],
            min_run: 2,
        };

        let results = analyze_trace(&trace, &options).unwrap();

        let whole = results.descriptive.whole.unwrap();
        assert_eq!(whole.count, 6);
        assert!((whole.mean - 1000.0 / 6.0).abs() < 1e-9);
        assert_eq!(results.descriptive.leading.unwrap().count, 3);
        assert_eq!(results.descriptive.trailing.unwrap().count, 3);

        assert_eq!(results.outcomes.whole.taken, 4);
        assert_eq!(results.outcomes.leading.taken, 2);
        assert_eq!(results.outcomes.leading.not_taken, 1);

        assert_eq!(results.frequency.unique, 3);
        assert_eq!(results.frequency.hot_branches, 2);
        assert_eq!(results.frequency.top[0].address, 100);
        assert_eq!(results.frequency.top[0].count, 3);
        assert_eq!(results.frequency.coverage[0].records, 3);
        assert_eq!(results.frequency.coverage[1].records, 6);

        assert_eq!(results.streaks[0].longest, 2);
        assert_eq!(results.streaks[0].runs, 2);
        assert_eq!(results.streaks[1].longest, 1);
    }

    #[test]
    fn test_window_clamped_to_trace_length() {
        let trace = create_test_trace(&[(1, true), (2, false), (3, true)]);
        let results = analyze_trace(&trace, &AnalysisOptions::default()).unwrap();
        assert_eq!(results.descriptive.window, 3);
        assert_eq!(results.outcomes.window, 3);
        assert_eq!(results.descriptive.leading.unwrap().count, 3);
    }

    #[test]
    fn test_single_record_has_no_descriptive_stats() {
        let trace = create_test_trace(&[(7, true)]);
        let results = analyze_trace(&trace, &AnalysisOptions::default()).unwrap();
        assert!(results.descriptive.whole.is_none());
        assert_eq!(results.frequency.unique, 1);
    }
}
