use crate::classify::classify;
use crate::config::Thresholds;
use crate::error::{ResilienceError, Result};
use crate::integrate::{IntegralMethod, integrate};
use crate::time::{TimeAxis, Timestamp};

/// Normalized, time-integrated deficit of a span of clipped performance.
///
/// `sev = 1 / (Pa - Pmax) * 1 / (t[last] - t[first]) * ∫ (Pa - clipped) dt`
///
/// The result is `0.0` exactly when every clipped value equals `Pa` and
/// positive otherwise, for both threshold directions.
///
/// # Errors
///
/// [`ResilienceError::LengthMismatch`] when the slices differ in length,
/// [`ResilienceError::InsufficientSamples`] for fewer than two samples and
/// [`ResilienceError::ZeroTimeSpan`] when first and last timestamp coincide.
pub fn span_severity(
    times: &[f64],
    clipped: &[f64],
    thresholds: &Thresholds,
    method: IntegralMethod,
) -> Result<f64> {
    if times.len() != clipped.len() {
        return Err(ResilienceError::LengthMismatch {
            expected: times.len(),
            actual: clipped.len(),
        });
    }
    let (first, last) = match times {
        [first, .., last] => (*first, *last),
        _ => {
            return Err(ResilienceError::InsufficientSamples {
                required: 2,
                actual: times.len(),
            });
        }
    };
    let span = last - first;
    if span <= 0.0 {
        return Err(ResilienceError::ZeroTimeSpan);
    }

    let pa = thresholds.acceptable();
    let integrant: Vec<f64> = clipped.iter().map(|c| pa - c).collect();
    let area = integrate(times, &integrant, method)?;
    Ok(1.0 / thresholds.range() * (1.0 / span) * area)
}

/// Whole-series severity of a raw performance column.
///
/// ```
/// use resilience::{IntegralMethod, severity};
///
/// let t = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let p = [3.0, 3.0, 1.0, 1.0, 3.0, 3.0];
/// let sev = severity(&t, &p, 2.0, 0.0, IntegralMethod::Shifted).unwrap();
/// assert!((sev - 0.2).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// Threshold, time axis and span errors from [`Thresholds::new`],
/// [`TimeAxis::new`] and [`span_severity`].
pub fn severity<T: Timestamp>(
    time_stamp: &[T],
    pt: &[f64],
    pa: f64,
    pmax: f64,
    method: IntegralMethod,
) -> Result<f64> {
    let thresholds = Thresholds::new(pa, pmax)?;
    let axis = TimeAxis::new(time_stamp)?;
    series_severity(&axis, pt, &thresholds, method)
}

/// `1 - severity(...)`.
///
/// # Errors
///
/// Same conditions as [`severity`].
pub fn resilience<T: Timestamp>(
    time_stamp: &[T],
    pt: &[f64],
    pa: f64,
    pmax: f64,
    method: IntegralMethod,
) -> Result<f64> {
    Ok(1.0 - severity(time_stamp, pt, pa, pmax, method)?)
}

pub(crate) fn series_severity(
    axis: &TimeAxis,
    pt: &[f64],
    thresholds: &Thresholds,
    method: IntegralMethod,
) -> Result<f64> {
    let classification = classify(axis, pt, thresholds)?;
    span_severity(axis.as_slice(), classification.clipped(), thresholds, method)
}
