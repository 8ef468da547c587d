//! Branch identifier frequency distribution.

use crate::models::BranchCount;
use std::collections::HashMap;

/// Occurrence counts per branch identifier, in first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct BranchFrequency {
    counts: Vec<BranchCount>,
    total: usize,
}

impl BranchFrequency {
    /// Count how often each identifier occurs in `addresses`.
    pub fn from_addresses(addresses: &[u64]) -> Self {
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut counts: Vec<BranchCount> = Vec::new();

        for &address in addresses {
            match index.get(&address) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(address, counts.len());
                    counts.push(BranchCount { address, count: 1 });
                }
            }
        }

        Self {
            counts,
            total: addresses.len(),
        }
    }

    /// Number of records counted.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct identifiers.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Number of identifiers occurring at least `threshold` times.
    pub fn at_least(&self, threshold: usize) -> usize {
        self.counts.iter().filter(|c| c.count >= threshold).count()
    }

    /// The `n` most common identifiers, most frequent first.
    ///
    /// Equal counts keep first-appearance order (stable sort).
    pub fn most_common(&self, n: usize) -> Vec<BranchCount> {
        let mut sorted = self.counts.clone();
        sorted.sort_by_key(|c| std::cmp::Reverse(c.count));
        sorted.truncate(n);
        sorted
    }

    /// Records accounted for by the `k` most common identifiers.
    pub fn coverage(&self, k: usize) -> usize {
        self.most_common(k).iter().map(|c| c.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BranchFrequency {
        BranchFrequency::from_addresses(&[5, 7, 5, 9, 7, 5, 11])
    }

    #[test]
    fn test_unique_and_counts() {
        let freq = sample();
        assert_eq!(freq.total(), 7);
        assert_eq!(freq.unique(), 4);
        assert_eq!(freq.at_least(3), 1);
    }

    #[test]
    fn test_at_least() {
        let freq = sample();
        assert_eq!(freq.at_least(1), 4);
        assert_eq!(freq.at_least(2), 2);
        assert_eq!(freq.at_least(3), 1);
        assert_eq!(freq.at_least(4), 0);
    }

    #[test]
    fn test_most_common_ties_keep_first_appearance() {
        let freq = sample();
        let top = freq.most_common(3);
        assert_eq!(
            top,
            vec![
                BranchCount { address: 5, count: 3 },
                BranchCount { address: 7, count: 2 },
                BranchCount { address: 9, count: 1 },
            ]
        );
    }

    #[test]
    fn test_coverage_saturates_at_total() {
        let freq = sample();
        assert_eq!(freq.coverage(1), 3);
        assert_eq!(freq.coverage(2), 5);
        assert_eq!(freq.coverage(1024), 7);
    }
}
