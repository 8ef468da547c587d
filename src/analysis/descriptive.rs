//! Descriptive statistics over branch identifiers.

use crate::error::{Result, TraceError};
use serde::{Deserialize, Serialize};

/// Sample statistics for a sequence of values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample variance (n - 1 denominator).
    pub variance: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
}

/// Arithmetic mean of `values`.
pub fn mean(values: &[u64]) -> Result<f64> {
    if values.is_empty() {
        return Err(TraceError::InsufficientData {
            needed: 1,
            found: 0,
        });
    }
    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    Ok(sum / values.len() as f64)
}

/// Sample variance of `values`.
///
/// Uses two passes (mean, then squared deviations) so large identifiers
/// such as 64-bit addresses don't lose precision to cancellation.
pub fn variance(values: &[u64]) -> Result<f64> {
    if values.len() < 2 {
        return Err(TraceError::InsufficientData {
            needed: 2,
            found: values.len(),
        });
    }
    let m = mean(values)?;
    let ss: f64 = values
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum();
    Ok(ss / (values.len() - 1) as f64)
}

/// Compute mean, sample variance and standard deviation in one go.
pub fn describe(values: &[u64]) -> Result<Summary> {
    let variance = variance(values)?;
    Ok(Summary {
        count: values.len(),
        mean: mean(values)?,
        variance,
        std_dev: variance.sqrt(),
    })
}
