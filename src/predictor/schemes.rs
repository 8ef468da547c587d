//! Branch prediction schemes.

use super::counter::SaturatingCounter;
use super::Predictor;

/// Low-order address bits used to select a row in per-branch tables.
const ROW_BITS: u32 = 10;

fn mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Global outcome history as a shift register.
#[derive(Debug, Clone, Copy, Default)]
struct History {
    bits: u64,
}

impl History {
    fn push(&mut self, taken: bool) {
        self.bits = (self.bits << 1) | u64::from(taken);
    }

    fn recent(&self, n: u32) -> u64 {
        self.bits & mask(n)
    }
}

/// Predicts every branch taken.
#[derive(Debug, Default)]
pub struct AlwaysTaken;

impl Predictor for AlwaysTaken {
    fn name(&self) -> String {
        "Always Taken".to_string()
    }

    fn predict(&self, _address: u64) -> bool {
        true
    }

    fn update(&mut self, _address: u64, _taken: bool) {}
}

/// Predicts every branch not taken.
#[derive(Debug, Default)]
pub struct NeverTaken;

impl Predictor for NeverTaken {
    fn name(&self) -> String {
        "Never Taken".to_string()
    }

    fn predict(&self, _address: u64) -> bool {
        false
    }

    fn update(&mut self, _address: u64, _taken: bool) {}
}

/// Table of 2-bit counters indexed by the low address bits.
#[derive(Debug)]
pub struct Bimodal {
    table: Vec<SaturatingCounter>,
}

impl Bimodal {
    /// `entries` must be a power of two.
    pub fn new(entries: usize) -> Self {
        Self {
            table: vec![SaturatingCounter::new(2); entries],
        }
    }

    fn index(&self, address: u64) -> usize {
        (address & (self.table.len() as u64 - 1)) as usize
    }
}

impl Predictor for Bimodal {
    fn name(&self) -> String {
        format!("Bimodal ({} entries)", self.table.len())
    }

    fn predict(&self, address: u64) -> bool {
        self.table[self.index(address)].predict()
    }

    fn update(&mut self, address: u64, taken: bool) {
        let i = self.index(address);
        self.table[i].update(taken);
    }
}

/// (m, n) correlating predictor.
///
/// The last `m` global outcomes pick one of `2^m` n-bit counters in the
/// row selected by the low address bits.
#[derive(Debug)]
pub struct Correlating {
    history_bits: u32,
    counter_bits: u8,
    history: History,
    table: Vec<SaturatingCounter>,
}

impl Correlating {
    pub fn new(history_bits: u32, counter_bits: u8) -> Self {
        let size = 1usize << (ROW_BITS + history_bits);
        Self {
            history_bits,
            counter_bits,
            history: History::default(),
            table: vec![SaturatingCounter::new(counter_bits); size],
        }
    }

    fn index(&self, address: u64) -> usize {
        let row = address & mask(ROW_BITS);
        ((row << self.history_bits) | self.history.recent(self.history_bits)) as usize
    }
}

impl Predictor for Correlating {
    fn name(&self) -> String {
        format!("Correlating ({}, {})", self.history_bits, self.counter_bits)
    }

    fn predict(&self, address: u64) -> bool {
        self.table[self.index(address)].predict()
    }

    fn update(&mut self, address: u64, taken: bool) {
        let i = self.index(address);
        self.table[i].update(taken);
        self.history.push(taken);
    }
}

/// gshare: global history XORed with the address indexes 2-bit counters.
#[derive(Debug)]
pub struct GShare {
    history_bits: u32,
    history: History,
    table: Vec<SaturatingCounter>,
}

impl GShare {
    /// `entries` must be a power of two.
    pub fn new(history_bits: u32, entries: usize) -> Self {
        Self {
            history_bits,
            history: History::default(),
            table: vec![SaturatingCounter::new(2); entries],
        }
    }

    fn index(&self, address: u64) -> usize {
        let hashed = address ^ self.history.recent(self.history_bits);
        (hashed & (self.table.len() as u64 - 1)) as usize
    }
}

impl Predictor for GShare {
    fn name(&self) -> String {
        format!(
            "gshare ({} history bits, {} entries)",
            self.history_bits,
            self.table.len()
        )
    }

    fn predict(&self, address: u64) -> bool {
        self.table[self.index(address)].predict()
    }

    fn update(&mut self, address: u64, taken: bool) {
        let i = self.index(address);
        self.table[i].update(taken);
        self.history.push(taken);
    }
}

/// Two-level local predictor.
///
/// Each branch row keeps its own 4-bit outcome history, which selects a
/// 2-bit counter from a shared pattern table.
#[derive(Debug)]
pub struct LocalHistory {
    histories: Vec<u8>,
    patterns: Vec<SaturatingCounter>,
}

impl LocalHistory {
    const LOCAL_BITS: u32 = 4;

    pub fn new() -> Self {
        Self {
            histories: vec![0; 1 << ROW_BITS],
            patterns: vec![SaturatingCounter::new(2); 1 << Self::LOCAL_BITS],
        }
    }

    fn row(address: u64) -> usize {
        (address & mask(ROW_BITS)) as usize
    }
}

impl Default for LocalHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for LocalHistory {
    fn name(&self) -> String {
        "Local history (4-bit)".to_string()
    }

    fn predict(&self, address: u64) -> bool {
        let pattern = self.histories[Self::row(address)] as usize;
        self.patterns[pattern].predict()
    }

    fn update(&mut self, address: u64, taken: bool) {
        let row = Self::row(address);
        let pattern = self.histories[row] as usize;
        self.patterns[pattern].update(taken);
        let next = (self.histories[row] << 1) | u8::from(taken);
        self.histories[row] = next & mask(Self::LOCAL_BITS) as u8;
    }
}
