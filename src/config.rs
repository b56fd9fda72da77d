//! Threshold pair and event parameters.
//!
//! [`Thresholds`] holds the acceptable and worst-case performance levels.
//! [`ResilienceConfig`] adds the event separation time, the signal width and
//! the integration method used by the higher level entry points.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ResilienceError, Result};
use crate::integrate::IntegralMethod;
use crate::time::TimeAxis;

/// Which side of the acceptable level counts as failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Failing means dropping below `Pa` (`Pa > Pmax`), e.g. throughput.
    Below,
    /// Failing means rising above `Pa` (`Pa < Pmax`), e.g. latency.
    Above,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Below => write!(f, "below"),
            Self::Above => write!(f, "above"),
        }
    }
}

/// Acceptable performance `Pa` and maximal failure `Pmax`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Thresholds {
    acceptable: f64,
    max_failure: f64,
}

impl Thresholds {
    /// Creates a validated threshold pair.
    ///
    /// # Errors
    ///
    /// [`ResilienceError::InvalidThreshold`] when `acceptable == max_failure`,
    /// [`ResilienceError::NonFiniteParameter`] when either value is NaN or infinite.
    pub fn new(acceptable: f64, max_failure: f64) -> Result<Self> {
        let thresholds = Self {
            acceptable,
            max_failure,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Re-checks the invariants, e.g. after deserialization.
    ///
    /// # Errors
    ///
    /// See [`Thresholds::new`].
    #[allow(clippy::float_cmp)]
    pub fn validate(&self) -> Result<()> {
        finite("acceptable", self.acceptable)?;
        finite("max_failure", self.max_failure)?;
        if self.acceptable == self.max_failure {
            return Err(ResilienceError::InvalidThreshold(self.acceptable));
        }
        Ok(())
    }

    /// Acceptable performance `Pa`.
    #[inline]
    #[must_use]
    pub const fn acceptable(&self) -> f64 {
        self.acceptable
    }

    /// Maximal failure performance `Pmax`.
    #[inline]
    #[must_use]
    pub const fn max_failure(&self) -> f64 {
        self.max_failure
    }

    /// `Pa - Pmax`, the normalizing range. Its sign encodes the direction.
    #[inline]
    #[must_use]
    pub fn range(&self) -> f64 {
        self.acceptable - self.max_failure
    }

    /// Failure direction derived from the sign of [`Thresholds::range`].
    #[must_use]
    pub fn direction(&self) -> Direction {
        if self.range() > 0.0 {
            Direction::Below
        } else {
            Direction::Above
        }
    }

    /// `(Pa - P) / (Pa - Pmax)`; non-negative means the sample is failing.
    #[inline]
    #[must_use]
    pub fn test_variable(&self, performance: f64) -> f64 {
        (self.acceptable - performance) / self.range()
    }
}

/// Full parameter set for event and summary computations.
///
/// | Field              | Meaning                                          | Default |
/// |--------------------|--------------------------------------------------|---------|
/// | `thresholds`       | `Pa` / `Pmax`                                    | none    |
/// | `event_separation` | largest gap between samples of one event         | `0.0`   |
/// | `signal_width`     | time span each sample represents                 | `0.0`   |
/// | `integral_method`  | integration formulation                          | `2`     |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResilienceConfig {
    /// Acceptable and worst-case performance.
    pub thresholds: Thresholds,
    /// Maximal time gap between two exceeding samples of the same event.
    #[cfg_attr(feature = "serde", serde(default))]
    pub event_separation: f64,
    /// Time span represented by one sample; extends every event's end.
    #[cfg_attr(feature = "serde", serde(default))]
    pub signal_width: f64,
    /// Integration formulation; both produce the same numbers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub integral_method: IntegralMethod,
}

impl ResilienceConfig {
    /// Configuration with zero separation time and zero signal width.
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            event_separation: 0.0,
            signal_width: 0.0,
            integral_method: IntegralMethod::default(),
        }
    }

    /// Sets the event separation time.
    #[must_use]
    pub fn with_event_separation(mut self, seconds: f64) -> Self {
        self.event_separation = seconds;
        self
    }

    /// Sets the signal width.
    #[must_use]
    pub fn with_signal_width(mut self, seconds: f64) -> Self {
        self.signal_width = seconds;
        self
    }

    /// Sets the signal width to the median sampling interval of `axis`.
    #[must_use]
    pub fn with_inferred_signal_width(self, axis: &TimeAxis) -> Self {
        self.with_signal_width(infer_signal_width(axis))
    }

    /// Sets the integration method.
    #[must_use]
    pub fn with_integral_method(mut self, method: IntegralMethod) -> Self {
        self.integral_method = method;
        self
    }

    /// Checks thresholds, separation time and signal width.
    ///
    /// # Errors
    ///
    /// [`ResilienceError::InvalidThreshold`] or
    /// [`ResilienceError::NonFiniteParameter`].
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        non_negative("event_separation", self.event_separation)?;
        non_negative("signal_width", self.signal_width)
    }
}

/// Median of the positive gaps between consecutive samples, or `0.0` when
/// the axis has no positive gap.
#[must_use]
pub fn infer_signal_width(axis: &TimeAxis) -> f64 {
    let mut gaps: Vec<f64> = axis
        .as_slice()
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .collect();
    if gaps.is_empty() {
        return 0.0;
    }
    gaps.sort_by(f64::total_cmp);
    let mid = gaps.len() / 2;
    if gaps.len() % 2 == 0 {
        (gaps[mid - 1] + gaps[mid]) / 2.0
    } else {
        gaps[mid]
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ResilienceError::NonFiniteParameter { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ResilienceError::NonFiniteParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_thresholds_rejected() {
        assert_eq!(
            Thresholds::new(2.0, 2.0),
            Err(ResilienceError::InvalidThreshold(2.0))
        );
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Thresholds::new(2.0, 0.0).unwrap().direction(), Direction::Below);
        assert_eq!(Thresholds::new(2.0, 5.0).unwrap().direction(), Direction::Above);
    }

    #[test]
    fn test_test_variable_is_symmetric() {
        let below = Thresholds::new(2.0, 0.0).unwrap();
        let above = Thresholds::new(2.0, 4.0).unwrap();
        assert!((below.test_variable(1.0) - 0.5).abs() < f64::EPSILON);
        assert!((above.test_variable(3.0) - 0.5).abs() < f64::EPSILON);
        assert!(below.test_variable(3.0) < 0.0);
        assert!(above.test_variable(1.0) < 0.0);
    }

    #[test]
    fn test_negative_signal_width_rejected() {
        let config = ResilienceConfig::new(Thresholds::new(2.0, 0.0).unwrap())
            .with_signal_width(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ResilienceError::NonFiniteParameter {
                name: "signal_width",
                ..
            })
        ));
    }

    #[test]
    fn test_inferred_signal_width_is_median_gap() {
        let axis = TimeAxis::new(&[0.0, 1.0, 2.0, 2.0, 5.0]).unwrap();
        assert!((infer_signal_width(&axis) - 1.0).abs() < f64::EPSILON);

        let flat = TimeAxis::new(&[3.0, 3.0]).unwrap();
        assert!(infer_signal_width(&flat).abs() < f64::EPSILON);
    }
}
