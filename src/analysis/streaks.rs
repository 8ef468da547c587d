//! Run-length statistics for consecutive outcomes.

use serde::{Deserialize, Serialize};

/// Runs of consecutive records sharing one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    /// Outcome the runs consist of.
    pub taken: bool,
    /// Longest run seen, including one that reaches the end of the trace.
    pub longest: usize,
    /// Minimum length for a run to be counted in `runs`.
    pub min_run: usize,
    /// Number of runs at least `min_run` long.
    pub runs: usize,
    /// Records covered by those runs.
    pub covered: usize,
}

/// Summarize runs of `taken` outcomes in `outcomes`.
pub fn streaks(outcomes: &[bool], taken: bool, min_run: usize) -> StreakSummary {
    let mut summary = StreakSummary {
        taken,
        longest: 0,
        min_run,
        runs: 0,
        covered: 0,
    };

    let mut running = 0;
    for &outcome in outcomes {
        if outcome == taken {
            running += 1;
        } else {
            summary.close_run(running);
            running = 0;
        }
    }
    summary.close_run(running);

    summary
}

impl StreakSummary {
    fn close_run(&mut self, length: usize) {
        self.longest = self.longest.max(length);
        if length > 0 && length >= self.min_run {
            self.runs += 1;
            self.covered += length;
        }
    }
}

/// Summaries for taken runs followed by not-taken runs.
pub fn both_streaks(outcomes: &[bool], min_run: usize) -> Vec<StreakSummary> {
    vec![
        streaks(outcomes, true, min_run),
        streaks(outcomes, false, min_run),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: bool = true;
    const F: bool = false;

    #[test]
    fn test_taken_streaks() {
        let outcomes = [T, T, T, F, T, F, F, T, T];
        let summary = streaks(&outcomes, true, 2);
        assert_eq!(summary.longest, 3);
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.covered, 5);
    }

    #[test]
    fn test_not_taken_streaks() {
        let outcomes = [T, F, F, F, F, T, F, T];
        let summary = streaks(&outcomes, false, 2);
        assert_eq!(summary.longest, 4);
        assert_eq!(summary.runs, 1);
        assert_eq!(summary.covered, 4);
    }

    #[test]
    fn test_trailing_run_is_counted() {
        let outcomes = [F, T, T, T, T];
        let summary = streaks(&outcomes, true, 2);
        assert_eq!(summary.longest, 4);
        assert_eq!(summary.runs, 1);
    }

    #[test]
    fn test_min_run_of_one_counts_every_run() {
        let outcomes = [T, F, T, F, T];
        let summary = streaks(&outcomes, true, 1);
        assert_eq!(summary.runs, 3);
        assert_eq!(summary.covered, 3);
    }

    #[test]
    fn test_absent_outcome() {
        let summary = streaks(&[T, T], false, 2);
        assert_eq!(summary.longest, 0);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.covered, 0);
    }

    #[test]
    fn test_both_streaks_order() {
        let both = both_streaks(&[T, F], 1);
        assert!(both[0].taken);
        assert!(!both[1].taken);
    }
}
