/// Errors raised by the resilience computations.
///
/// Every variant is a violated mathematical precondition, never a transient
/// failure, so nothing here is retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResilienceError {
    /// Acceptable and worst-case performance coincide, so the threshold range is zero.
    #[error("invalid threshold: acceptable performance equals maximal failure ({0})")]
    InvalidThreshold(f64),

    /// No sample ever crosses the acceptable performance level.
    #[error("no exceedance: performance never crosses the acceptable level")]
    NoExceedance,

    /// An integration span holds too few samples.
    #[error("insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples {
        /// Minimum number of samples.
        required: usize,
        /// Number of samples supplied.
        actual: usize,
    },

    /// Segmentation was asked to partition an empty exceeding set.
    #[error("empty input: nothing to segment")]
    EmptyInput,

    /// Unknown integration mode identifier.
    #[error("invalid integration method: {0} (expected 1 or 2)")]
    InvalidMethod(u8),

    /// Timestamps and performance values differ in length.
    #[error("length mismatch: {expected} timestamps but {actual} performance values")]
    LengthMismatch {
        /// Number of timestamps.
        expected: usize,
        /// Number of performance values.
        actual: usize,
    },

    /// The time axis decreases at the given index.
    #[error("time axis is not monotonic at index {index}")]
    NonMonotonicTime {
        /// First index whose timestamp is smaller than its predecessor.
        index: usize,
    },

    /// First and last timestamp of an integration span coincide.
    #[error("integration span has zero duration")]
    ZeroTimeSpan,

    /// A parameter is NaN, infinite, or negative where it must not be.
    #[error("parameter `{name}` is out of range: {value}")]
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ResilienceError>;
