//! Branch predictor replay.
//!
//! Predictors are replayed over a trace one record at a time: predict,
//! compare with the recorded outcome, then train on it.

pub mod counter;
pub mod schemes;
pub mod simulate;

pub use schemes::{AlwaysTaken, Bimodal, Correlating, GShare, LocalHistory, NeverTaken};
pub use simulate::{run_suite, simulate, Simulation};

use crate::error::TraceError;
use std::fmt;
use std::str::FromStr;

/// A dynamic branch predictor.
pub trait Predictor {
    /// Display name used in reports.
    fn name(&self) -> String;

    /// Guess whether the branch at `address` will be taken.
    fn predict(&self, address: u64) -> bool;

    /// Train on the actual outcome of the branch at `address`.
    fn update(&mut self, address: u64, taken: bool);
}

/// A predictor configuration, as written on the command line or in the
/// config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorSpec {
    AlwaysTaken,
    NeverTaken,
    Bimodal { entries: usize },
    Correlating { history_bits: u32, counter_bits: u8 },
    GShare { history_bits: u32, entries: usize },
    Local,
}

const MAX_CORRELATING_HISTORY: u32 = 12;
const MAX_GSHARE_HISTORY: u32 = 32;
const MAX_TABLE_ENTRIES: usize = 1 << 24;

impl PredictorSpec {
    /// The suite run when no predictors are named explicitly.
    pub fn default_suite() -> Vec<PredictorSpec> {
        let mut suite = vec![PredictorSpec::AlwaysTaken, PredictorSpec::NeverTaken];
        suite.extend(
            [512, 1024, 2048, 4096]
                .into_iter()
                .map(|entries| PredictorSpec::Bimodal { entries }),
        );
        suite.extend([(1, 1), (2, 2), (4, 2), (2, 4), (4, 6), (6, 4)].into_iter().map(
            |(history_bits, counter_bits)| PredictorSpec::Correlating {
                history_bits,
                counter_bits,
            },
        ));
        suite.push(PredictorSpec::GShare {
            history_bits: 10,
            entries: 4096,
        });
        suite.push(PredictorSpec::Local);
        suite
    }

    /// Instantiate the predictor with fresh state.
    pub fn build(&self) -> Box<dyn Predictor> {
        match *self {
            PredictorSpec::AlwaysTaken => Box::new(AlwaysTaken),
            PredictorSpec::NeverTaken => Box::new(NeverTaken),
            PredictorSpec::Bimodal { entries } => Box::new(Bimodal::new(entries)),
            PredictorSpec::Correlating {
                history_bits,
                counter_bits,
            } => Box::new(Correlating::new(history_bits, counter_bits)),
            PredictorSpec::GShare {
                history_bits,
                entries,
            } => Box::new(GShare::new(history_bits, entries)),
            PredictorSpec::Local => Box::new(LocalHistory::new()),
        }
    }
}

impl fmt::Display for PredictorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictorSpec::AlwaysTaken => write!(f, "always-taken"),
            PredictorSpec::NeverTaken => write!(f, "never-taken"),
            PredictorSpec::Bimodal { entries } => write!(f, "bimodal:{}", entries),
            PredictorSpec::Correlating {
                history_bits,
                counter_bits,
            } => write!(f, "correlating:{},{}", history_bits, counter_bits),
            PredictorSpec::GShare {
                history_bits,
                entries,
            } => write!(f, "gshare:{},{}", history_bits, entries),
            PredictorSpec::Local => write!(f, "local"),
        }
    }
}

fn invalid(spec: &str, reason: impl Into<String>) -> TraceError {
    TraceError::InvalidPredictor {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

fn parse_number<T: FromStr>(spec: &str, value: &str, what: &str) -> Result<T, TraceError> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(spec, format!("{} '{}' is not a number", what, value)))
}

fn check_entries(spec: &str, entries: usize) -> Result<usize, TraceError> {
    if entries == 0 || !entries.is_power_of_two() {
        return Err(invalid(spec, "table entries must be a power of two"));
    }
    if entries > MAX_TABLE_ENTRIES {
        return Err(invalid(
            spec,
            format!("table entries must be at most {}", MAX_TABLE_ENTRIES),
        ));
    }
    Ok(entries)
}

fn split_pair<'a>(spec: &str, args: &'a str) -> Result<(&'a str, &'a str), TraceError> {
    args.split_once(',')
        .ok_or_else(|| invalid(spec, "expected two comma-separated values"))
}

impl FromStr for PredictorSpec {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let (kind, args) = match spec.split_once(':') {
            Some((kind, args)) => (kind, Some(args)),
            None => (spec, None),
        };

        match (kind.to_lowercase().as_str(), args) {
            ("always-taken" | "always", None) => Ok(PredictorSpec::AlwaysTaken),
            ("never-taken" | "never", None) => Ok(PredictorSpec::NeverTaken),
            ("bimodal" | "two-bit", Some(args)) => {
                let entries = parse_number(spec, args, "entries")?;
                Ok(PredictorSpec::Bimodal {
                    entries: check_entries(spec, entries)?,
                })
            }
            ("correlating", Some(args)) => {
                let (m, n) = split_pair(spec, args)?;
                let history_bits: u32 = parse_number(spec, m, "history bits")?;
                let counter_bits: u8 = parse_number(spec, n, "counter bits")?;
                if history_bits > MAX_CORRELATING_HISTORY {
                    return Err(invalid(
                        spec,
                        format!("history bits must be at most {}", MAX_CORRELATING_HISTORY),
                    ));
                }
                if counter_bits == 0 || counter_bits > counter::SaturatingCounter::MAX_BITS {
                    return Err(invalid(spec, "counter bits must be between 1 and 8"));
                }
                Ok(PredictorSpec::Correlating {
                    history_bits,
                    counter_bits,
                })
            }
            ("gshare", None) => Ok(PredictorSpec::GShare {
                history_bits: 10,
                entries: 4096,
            }),
            ("gshare", Some(args)) => {
                let (bits, entries) = split_pair(spec, args)?;
                let history_bits: u32 = parse_number(spec, bits, "history bits")?;
                if history_bits > MAX_GSHARE_HISTORY {
                    return Err(invalid(
                        spec,
                        format!("history bits must be at most {}", MAX_GSHARE_HISTORY),
                    ));
                }
                let entries = parse_number(spec, entries, "entries")?;
                Ok(PredictorSpec::GShare {
                    history_bits,
                    entries: check_entries(spec, entries)?,
                })
            }
            ("local", None) => Ok(PredictorSpec::Local),
            ("bimodal" | "two-bit" | "correlating", None) => {
                Err(invalid(spec, "missing parameters"))
            }
            _ => Err(invalid(spec, "unknown predictor")),
        }
    }
}

/// Parse a list of predictor descriptions.
pub fn parse_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<PredictorSpec>, TraceError> {
    specs.iter().map(|s| s.as_ref().parse()).collect()
}
