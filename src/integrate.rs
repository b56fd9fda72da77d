use std::fmt::Display;
use std::iter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ResilienceError, Result};

/// Formulation of the trapezoidal integral.
///
/// Both variants evaluate `(f[i-1] + f[i]) / 2 * (t[i] - t[i-1])` with the
/// same operation order, so they agree bit for bit. `Shifted` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum IntegralMethod {
    /// Index loop over consecutive sample pairs (identifier `1`).
    Pairwise,
    /// Zip of the series against itself shifted by one (identifier `2`).
    #[default]
    Shifted,
}

impl IntegralMethod {
    /// Numeric identifier: Pairwise=1, Shifted=2
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Pairwise => 1,
            Self::Shifted => 2,
        }
    }
}

impl From<IntegralMethod> for u8 {
    #[inline]
    fn from(method: IntegralMethod) -> Self {
        method.id()
    }
}

impl TryFrom<u8> for IntegralMethod {
    type Error = ResilienceError;

    #[inline]
    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::Pairwise),
            2 => Ok(Self::Shifted),
            n => Err(ResilienceError::InvalidMethod(n)),
        }
    }
}

impl Display for IntegralMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pairwise => write!(f, "pairwise (1)"),
            Self::Shifted => write!(f, "shifted (2)"),
        }
    }
}

/// Per-sample trapezoid areas.
///
/// Slot 0 is always `0.0`; slot `i` holds the area between samples `i - 1`
/// and `i`. Summing the result gives the integral over `[t[0], t[n-1]]`.
///
/// # Errors
///
/// [`ResilienceError::LengthMismatch`] when the slices differ in length and
/// [`ResilienceError::EmptyInput`] when they are empty.
pub fn increments(times: &[f64], values: &[f64], method: IntegralMethod) -> Result<Vec<f64>> {
    if times.len() != values.len() {
        return Err(ResilienceError::LengthMismatch {
            expected: times.len(),
            actual: values.len(),
        });
    }
    if times.is_empty() {
        return Err(ResilienceError::EmptyInput);
    }
    Ok(match method {
        IntegralMethod::Pairwise => pairwise(times, values),
        IntegralMethod::Shifted => shifted(times, values),
    })
}

/// Trapezoidal integral of `values` over `times`; a single sample integrates to `0.0`.
///
/// # Errors
///
/// Same conditions as [`increments`].
pub fn integrate(times: &[f64], values: &[f64], method: IntegralMethod) -> Result<f64> {
    Ok(increments(times, values, method)?.iter().sum())
}

#[allow(clippy::needless_range_loop)]
fn pairwise(times: &[f64], values: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; times.len()];
    for i in 1..times.len() {
        out[i] = (values[i - 1] + values[i]) / 2.0 * (times[i] - times[i - 1]);
    }
    out
}

fn shifted(times: &[f64], values: &[f64]) -> Vec<f64> {
    let means = values.iter().zip(&values[1..]).map(|(a, b)| (a + b) / 2.0);
    let steps = times.iter().zip(&times[1..]).map(|(a, b)| b - a);
    iter::once(0.0)
        .chain(means.zip(steps).map(|(mean, dt)| mean * dt))
        .collect()
}
