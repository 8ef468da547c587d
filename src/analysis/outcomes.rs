//! Taken/not-taken outcome counts.

use serde::{Deserialize, Serialize};

/// Number of taken and not-taken records in a slice of a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub taken: usize,
    pub not_taken: usize,
    /// Outcome of the first record, used to break ties.
    #[serde(skip)]
    pub first: Option<bool>,
}

impl OutcomeCounts {
    /// Count the outcomes in `outcomes`.
    pub fn from_outcomes(outcomes: &[bool]) -> Self {
        let taken = outcomes.iter().filter(|&&t| t).count();
        Self {
            taken,
            not_taken: outcomes.len() - taken,
            first: outcomes.first().copied(),
        }
    }

    pub fn total(&self) -> usize {
        self.taken + self.not_taken
    }

    /// Outcomes with their counts, most common first.
    ///
    /// Ties keep the outcome that appeared first in the trace ahead.
    /// Outcomes that never occur are left out.
    pub fn most_common(&self) -> Vec<(bool, usize)> {
        let first = self.first.unwrap_or(true);
        let mut entries = vec![
            (first, self.count(first)),
            (!first, self.count(!first)),
        ];
        entries.retain(|(_, count)| *count > 0);
        entries.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        entries
    }

    fn count(&self, taken: bool) -> usize {
        if taken {
            self.taken
        } else {
            self.not_taken
        }
    }

    /// Percentage of records that were taken.
    pub fn taken_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (self.taken as f64 / self.total() as f64) * 100.0
        }
    }
}
