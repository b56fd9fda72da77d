use crate::config::Thresholds;
use crate::error::{ResilienceError, Result};
use crate::time::TimeAxis;

/// Per-sample view of a performance column against a threshold pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    test_var: Vec<f64>,
    exceeding: Vec<bool>,
    clipped: Vec<f64>,
}

impl Classification {
    /// `(Pa - P) / (Pa - Pmax)` per sample.
    #[inline]
    #[must_use]
    pub fn test_var(&self) -> &[f64] {
        &self.test_var
    }

    /// Whether each sample is failing (`test_var >= 0`).
    #[inline]
    #[must_use]
    pub fn exceeding(&self) -> &[bool] {
        &self.exceeding
    }

    /// Raw performance where failing, `Pa` elsewhere.
    #[inline]
    #[must_use]
    pub fn clipped(&self) -> &[f64] {
        &self.clipped
    }

    /// True if at least one sample fails.
    #[must_use]
    pub fn any_exceeding(&self) -> bool {
        self.exceeding.iter().any(|&e| e)
    }

    /// Indices of the failing samples, ascending.
    #[must_use]
    pub fn exceeding_indices(&self) -> Vec<usize> {
        self.exceeding
            .iter()
            .enumerate()
            .filter_map(|(i, &e)| e.then_some(i))
            .collect()
    }

    /// Index of the largest test variable; ties resolve to the first occurrence.
    #[must_use]
    pub fn worst_index(&self) -> usize {
        first_max(&self.test_var)
    }
}

/// Classifies every sample of `performance` against `thresholds`.
///
/// # Errors
///
/// [`ResilienceError::LengthMismatch`] when `performance` and `axis` differ in length.
pub fn classify(axis: &TimeAxis, performance: &[f64], thresholds: &Thresholds) -> Result<Classification> {
    if performance.len() != axis.len() {
        return Err(ResilienceError::LengthMismatch {
            expected: axis.len(),
            actual: performance.len(),
        });
    }
    let test_var: Vec<f64> = performance
        .iter()
        .map(|&p| thresholds.test_variable(p))
        .collect();
    let exceeding: Vec<bool> = test_var.iter().map(|&tv| tv >= 0.0).collect();
    let clipped = performance
        .iter()
        .zip(&exceeding)
        .map(|(&p, &e)| if e { p } else { thresholds.acceptable() })
        .collect();
    Ok(Classification {
        test_var,
        exceeding,
        clipped,
    })
}

/// First index holding the maximum; NaN never wins.
pub(crate) fn first_max(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}

/// Last index holding the maximum; NaN never wins.
pub(crate) fn last_max(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v >= values[best] || values[best].is_nan() {
            best = i;
        }
    }
    best
}
