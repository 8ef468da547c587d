//! Replay a trace through a predictor and score it.

use super::{Predictor, PredictorSpec};
use crate::error::{Result, TraceError};
use crate::models::Trace;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of replaying one predictor over a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Predictor display name.
    pub predictor: String,
    pub correct: usize,
    pub incorrect: usize,
}

impl Simulation {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Percentage of correct predictions.
    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            (100.0 / self.total() as f64) * self.correct as f64
        }
    }
}

/// Replay `trace` through `predictor`, training it after every record.
pub fn simulate(trace: &Trace, predictor: &mut dyn Predictor) -> Result<Simulation> {
    if trace.is_empty() {
        return Err(TraceError::EmptyTrace);
    }

    let mut correct = 0;
    let mut incorrect = 0;

    for record in &trace.records {
        if predictor.predict(record.address) == record.taken {
            correct += 1;
        } else {
            incorrect += 1;
        }
        predictor.update(record.address, record.taken);
    }

    let simulation = Simulation {
        predictor: predictor.name(),
        correct,
        incorrect,
    };
    debug!(
        "{}: {:.2}% correct",
        simulation.predictor,
        simulation.accuracy()
    );

    Ok(simulation)
}

/// Replay `trace` through each predictor in `specs`, each starting cold.
///
/// Draws a progress bar on stderr when `show_progress` is set.
pub fn run_suite(
    trace: &Trace,
    specs: &[PredictorSpec],
    show_progress: bool,
) -> Result<Vec<Simulation>> {
    info!("Replaying {} predictors", specs.len());

    let progress_bar = if show_progress {
        let pb = ProgressBar::new(specs.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(specs.len());
    for spec in specs {
        if let Some(ref pb) = progress_bar {
            pb.set_message(spec.to_string());
        }

        let mut predictor = spec.build();
        results.push(simulate(trace, predictor.as_mut())?);

        if let Some(ref pb) = progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BranchRecord;
    use crate::predictor::{AlwaysTaken, Bimodal, NeverTaken};
    use std::path::PathBuf;

    fn trace_of(outcomes: &[bool]) -> Trace {
        Trace::new(
            PathBuf::from("sim.trace"),
            outcomes
                .iter()
                .enumerate()
                .map(|(i, &t)| BranchRecord::new(i as u64 % 4, t))
                .collect(),
        )
    }

    #[test]
    fn test_static_accuracy() {
        let trace = trace_of(&[true, true, true, false]);

        let taken = simulate(&trace, &mut AlwaysTaken).unwrap();
        assert_eq!(taken.correct, 3);
        assert_eq!(taken.incorrect, 1);
        assert!((taken.accuracy() - 75.0).abs() < 1e-9);

        let never = simulate(&trace, &mut NeverTaken).unwrap();
        assert_eq!(never.correct, 1);
        assert_eq!(never.predictor, "Never Taken");
    }

    #[test]
    fn test_simulate_counts_every_record() {
        let outcomes: Vec<bool> = (0..100).map(|i| i % 3 != 0).collect();
        let trace = trace_of(&outcomes);
        let result = simulate(&trace, &mut Bimodal::new(8)).unwrap();
        assert_eq!(result.total(), 100);
    }

    #[test]
    fn test_run_suite_resets_state_per_predictor() {
        let trace = trace_of(&[true, false, true, true, false, true]);
        let specs = [
            PredictorSpec::Bimodal { entries: 4 },
            PredictorSpec::Bimodal { entries: 4 },
        ];
        let results = run_suite(&trace, &specs, false).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn test_simulate_empty_trace() {
        let trace = trace_of(&[]);
        assert!(matches!(
            simulate(&trace, &mut AlwaysTaken),
            Err(TraceError::EmptyTrace)
        ));
    }
}
