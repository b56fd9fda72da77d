use std::time::Duration;

use crate::error::{ResilienceError, Result};

/// A point in time that maps onto a numeric seconds scale.
///
/// Only differences between timestamps matter to the computations, so the
/// origin of the scale is up to the implementation (UNIX epoch, start of a
/// test run, ...). Separation time and signal width are expressed on the
/// same scale.
pub trait Timestamp {
    /// Position of this timestamp on the seconds scale.
    fn as_seconds(&self) -> f64;
}

impl Timestamp for f64 {
    #[inline]
    fn as_seconds(&self) -> f64 {
        *self
    }
}

impl Timestamp for f32 {
    #[inline]
    fn as_seconds(&self) -> f64 {
        f64::from(*self)
    }
}

impl Timestamp for i32 {
    #[inline]
    fn as_seconds(&self) -> f64 {
        f64::from(*self)
    }
}

impl Timestamp for u32 {
    #[inline]
    fn as_seconds(&self) -> f64 {
        f64::from(*self)
    }
}

#[allow(clippy::cast_precision_loss)]
impl Timestamp for i64 {
    #[inline]
    fn as_seconds(&self) -> f64 {
        *self as f64
    }
}

#[allow(clippy::cast_precision_loss)]
impl Timestamp for u64 {
    #[inline]
    fn as_seconds(&self) -> f64 {
        *self as f64
    }
}

/// Elapsed time since an arbitrary origin.
impl Timestamp for Duration {
    #[inline]
    fn as_seconds(&self) -> f64 {
        self.as_secs_f64()
    }
}

#[cfg(feature = "chrono")]
#[allow(clippy::cast_precision_loss)]
impl<Tz: chrono::TimeZone> Timestamp for chrono::DateTime<Tz> {
    fn as_seconds(&self) -> f64 {
        self.timestamp() as f64 + f64::from(self.timestamp_subsec_nanos()) * 1e-9
    }
}

/// Naive date-times are read as UTC.
#[cfg(feature = "chrono")]
impl Timestamp for chrono::NaiveDateTime {
    fn as_seconds(&self) -> f64 {
        self.and_utc().as_seconds()
    }
}

impl<T: Timestamp + ?Sized> Timestamp for &T {
    #[inline]
    fn as_seconds(&self) -> f64 {
        (**self).as_seconds()
    }
}

/// Validated, non-decreasing time axis in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    seconds: Vec<f64>,
}

impl TimeAxis {
    /// Converts timestamps to seconds and validates the ordering.
    ///
    /// # Errors
    ///
    /// [`ResilienceError::EmptyInput`] for an empty slice,
    /// [`ResilienceError::NonFiniteParameter`] for a NaN or infinite timestamp and
    /// [`ResilienceError::NonMonotonicTime`] when a timestamp precedes its predecessor.
    pub fn new<T: Timestamp>(stamps: &[T]) -> Result<Self> {
        Self::from_seconds(stamps.iter().map(Timestamp::as_seconds).collect())
    }

    /// Wraps an already numeric axis.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TimeAxis::new`].
    pub fn from_seconds(seconds: Vec<f64>) -> Result<Self> {
        if seconds.is_empty() {
            return Err(ResilienceError::EmptyInput);
        }
        if let Some(&value) = seconds.iter().find(|t| !t.is_finite()) {
            return Err(ResilienceError::NonFiniteParameter {
                name: "timestamp",
                value,
            });
        }
        if let Some(index) = seconds.windows(2).position(|w| w[1] < w[0]) {
            return Err(ResilienceError::NonMonotonicTime { index: index + 1 });
        }
        Ok(Self { seconds })
    }

    /// Timestamps in seconds.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.seconds
    }

    /// Number of samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    /// Always false for a constructed axis; provided for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    /// Time between the first and the last sample.
    #[must_use]
    pub fn span(&self) -> f64 {
        match (self.seconds.first(), self.seconds.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}
