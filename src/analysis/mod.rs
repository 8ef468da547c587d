//! Statistics passes over a branch trace.

pub mod aggregator;
pub mod descriptive;
pub mod frequency;
pub mod outcomes;
pub mod streaks;

pub use aggregator::*;
pub use descriptive::Summary;
pub use outcomes::OutcomeCounts;
pub use streaks::StreakSummary;
