//! Saturating up/down counters.

/// An n-bit saturating counter.
///
/// Counts up on taken, down on not taken, and predicts taken while in
/// the upper half of its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturatingCounter {
    value: u8,
    max: u8,
    threshold: u8,
}

impl SaturatingCounter {
    /// Widest counter supported.
    pub const MAX_BITS: u8 = 8;

    /// Create a counter of `bits` width starting at weakly not taken.
    ///
    /// `bits` must be in `1..=8`; callers validate it first.
    pub fn new(bits: u8) -> Self {
        debug_assert!((1..=Self::MAX_BITS).contains(&bits));
        let max = ((1u16 << bits) - 1) as u8;
        let threshold = 1u8 << (bits - 1);
        Self {
            value: threshold - 1,
            max,
            threshold,
        }
    }

    #[cfg(test)]
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn predict(&self) -> bool {
        self.value >= self.threshold
    }

    pub fn update(&mut self, taken: bool) {
        if taken {
            if self.value < self.max {
                self.value += 1;
            }
        } else if self.value > 0 {
            self.value -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_bit_needs_two_misses_to_flip() {
        let mut counter = SaturatingCounter::new(2);
        assert!(!counter.predict());

        counter.update(true);
        assert!(counter.predict());
        counter.update(true);
        assert_eq!(counter.value(), 3);

        counter.update(false);
        assert!(counter.predict());
        counter.update(false);
        assert!(!counter.predict());
    }

    #[test]
    fn test_saturates_at_both_ends() {
        let mut counter = SaturatingCounter::new(2);
        for _ in 0..10 {
            counter.update(true);
        }
        assert_eq!(counter.value(), 3);
        for _ in 0..10 {
            counter.update(false);
        }
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_one_bit_and_eight_bit() {
        let mut one = SaturatingCounter::new(1);
        assert!(!one.predict());
        one.update(true);
        assert!(one.predict());
        assert_eq!(one.value(), 1);

        let mut wide = SaturatingCounter::new(8);
        assert_eq!(wide.value(), 127);
        wide.update(true);
        assert!(wide.predict());
    }
}
