//! Per-event severity, worst performance and recovery time.

use std::iter;
use std::ops::{Deref, Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::classify::{Classification, classify, last_max};
use crate::config::{ResilienceConfig, Thresholds};
use crate::error::{ResilienceError, Result};
use crate::segment::{Event, segment};
use crate::severity::span_severity;
use crate::time::{TimeAxis, Timestamp};

/// An [`Event`] together with its resilience figures.
///
/// Dereferences to the underlying [`Event`], whose index range and
/// timestamps are exactly those produced by segmentation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventResilience {
    /// Segmentation record.
    pub event: Event,
    /// Severity over the event's own samples.
    pub sev: f64,
    /// `1 - sev`.
    pub res0: f64,
    /// Seconds from the last worst sample to the end of the event.
    pub trec: f64,
    /// `trec` as a percentage of the event duration.
    pub trec_percent: f64,
    /// Raw performance at the last worst sample.
    pub worst_p: f64,
}

impl Deref for EventResilience {
    type Target = Event;

    fn deref(&self) -> &Self::Target {
        &self.event
    }
}

/// Segments the failing samples of `pt` and scores every event.
///
/// An event's span runs from its first failing sample to its last one, plus
/// the following samples up to `end_time` that the signal width bridges. It
/// never reaches the next event's first failing sample. The worst sample is
/// the last one in the span with the maximal test variable.
///
/// A span without positive duration (a lone failing sample the signal width
/// does not bridge, e.g. at the end of the recording) is scored as its
/// normalized deficit held constant: `sev = mean(Pa - clipped) / (Pa - Pmax)`.
/// An event of zero duration reports `trec_percent = 0`.
///
/// # Errors
///
/// [`ResilienceError::NoExceedance`] when no sample fails, plus the
/// configuration, length and segmentation errors of the underlying steps.
pub fn analyze_events(axis: &TimeAxis, pt: &[f64], config: &ResilienceConfig) -> Result<Vec<EventResilience>> {
    config.validate()?;
    let classification = classify(axis, pt, &config.thresholds)?;
    score_events(axis, pt, &classification, config)
}

/// Event table of a raw performance column.
///
/// ```
/// use resilience::events;
///
/// let t = [0, 1, 2, 3, 4, 5];
/// let p = [3.0, 3.0, 1.0, 1.0, 3.0, 3.0];
/// let table = events(&t, &p, 2.0, 0.0, 1.0, 1.0).unwrap();
/// assert_eq!(table.len(), 1);
/// assert!((table[0].trec_percent - 50.0).abs() < 1e-12);
/// ```
///
/// # Errors
///
/// See [`analyze_events`].
pub fn events<T: Timestamp>(
    time_stamp: &[T],
    pt: &[f64],
    pa: f64,
    pmax: f64,
    evt_sep_time: f64,
    signal_width: f64,
) -> Result<Vec<EventResilience>> {
    let axis = TimeAxis::new(time_stamp)?;
    let config = ResilienceConfig::new(Thresholds::new(pa, pmax)?)
        .with_event_separation(evt_sep_time)
        .with_signal_width(signal_width);
    analyze_events(&axis, pt, &config)
}

pub(crate) fn score_events(
    axis: &TimeAxis,
    pt: &[f64],
    classification: &Classification,
    config: &ResilienceConfig,
) -> Result<Vec<EventResilience>> {
    let times = axis.as_slice();
    let exceeding = classification.exceeding_indices();
    if exceeding.is_empty() {
        return Err(ResilienceError::NoExceedance);
    }
    let exceeding_times: Vec<f64> = exceeding.iter().map(|&i| times[i]).collect();

    let events = segment(&exceeding_times, config.event_separation, config.signal_width)?;
    let limits: Vec<usize> = events
        .iter()
        .skip(1)
        .map(|next| exceeding[next.start_index])
        .chain(iter::once(times.len()))
        .collect();

    events
        .into_iter()
        .zip(limits)
        .map(|(event, limit)| {
            let first = exceeding[event.start_index];
            let last = exceeding[event.end_index];
            let bridged = times[last + 1..limit].partition_point(|&t| t <= event.end_time);
            score_event(event, first..last + 1 + bridged, pt, times, classification, config)
        })
        .collect()
}

fn score_event(
    event: Event,
    span: Range<usize>,
    pt: &[f64],
    times: &[f64],
    classification: &Classification,
    config: &ResilienceConfig,
) -> Result<EventResilience> {
    let span_times = &times[span.clone()];
    let clipped = &classification.clipped()[span.clone()];

    let sev = match span_times {
        [first, .., last] if last > first => {
            span_severity(span_times, clipped, &config.thresholds, config.integral_method)?
        }
        _ => held_severity(clipped, &config.thresholds),
    };

    let worst = last_max(&classification.test_var()[span.clone()]);
    let trec = event.end_time - span_times[worst];
    let trec_percent = if event.duration > 0.0 {
        trec / event.duration * 100.0
    } else {
        0.0
    };

    Ok(EventResilience {
        event,
        sev,
        res0: 1.0 - sev,
        trec,
        trec_percent,
        worst_p: pt[span.start + worst],
    })
}

/// Normalized deficit of samples held constant over their signal width.
#[allow(clippy::cast_precision_loss)]
fn held_severity(clipped: &[f64], thresholds: &Thresholds) -> f64 {
    let deficit: f64 = clipped.iter().map(|c| thresholds.acceptable() - c).sum();
    deficit / clipped.len() as f64 / thresholds.range()
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

    #[test]
    fn test_single_event_scenario() {
        let table = events(&T, &[3.0, 3.0, 1.0, 1.0, 3.0, 3.0], 2.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(table.len(), 1);
        let e = &table[0];
        assert_eq!((e.start_index, e.end_index), (0, 1));
        assert!((e.begin_time - 2.0).abs() < f64::EPSILON);
        assert!((e.end_time - 4.0).abs() < f64::EPSILON);
        assert!((e.duration - 2.0).abs() < f64::EPSILON);
        assert!((e.worst_p - 1.0).abs() < f64::EPSILON);
        assert!((e.trec - 1.0).abs() < f64::EPSILON);
        assert!((e.trec_percent - 50.0).abs() < 1e-12);
        // samples 2..=4: area 1.5 over 2 s, range 2
        assert!((e.sev - 0.375).abs() < 1e-12);
        assert!((e.res0 - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_worst_is_last_occurrence() {
        let p = [3.0, 0.5, 1.0, 0.5, 1.5, 3.0];
        let table = events(&T, &p, 2.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(table.len(), 1);
        assert!((table[0].worst_p - 0.5).abs() < f64::EPSILON);
        // worst at t=3, end at 4 + 1
        assert!((table[0].trec - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_two_separate_events() {
        let p = [3.0, 1.0, 3.0, 3.0, 1.0, 3.0];
        let table = events(&T, &p, 2.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!((table[0].start_index, table[0].end_index), (0, 0));
        assert_eq!((table[1].start_index, table[1].end_index), (1, 1));
        assert!((table[1].begin_time - 4.0).abs() < f64::EPSILON);
        for e in &table {
            assert!((e.trec_percent - 100.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_exceedance() {
        assert_eq!(
            events(&T, &[3.0; 6], 2.0, 0.0, 1.0, 1.0),
            Err(ResilienceError::NoExceedance)
        );
    }

    #[test]
    fn test_lone_sample_without_width_is_held() {
        let p = [3.0, 1.0, 3.0, 3.0, 3.0, 3.0];
        let table = events(&T, &p, 2.0, 0.0, 1.0, 0.0).unwrap();
        assert_eq!(table.len(), 1);
        let e = &table[0];
        assert!(e.duration.abs() < f64::EPSILON);
        assert!((e.sev - 0.5).abs() < 1e-12);
        assert!(e.trec.abs() < f64::EPSILON);
        assert!(e.trec_percent.abs() < f64::EPSILON);
    }

    #[test]
    fn test_failing_tail_is_scored() {
        let p = [3.0, 3.0, 3.0, 3.0, 3.0, 1.0];
        let table = events(&T, &p, 2.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(table.len(), 1);
        let e = &table[0];
        assert!((e.end_time - 6.0).abs() < f64::EPSILON);
        assert!((e.sev - 0.5).abs() < 1e-12);
        assert!((e.worst_p - 1.0).abs() < f64::EPSILON);
        assert!((e.trec - 1.0).abs() < f64::EPSILON);
        assert!((e.trec_percent - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_wide_signal_stops_at_next_event() {
        // signal width 3 s reaches t = 3, which starts the next event
        let p = [3.0, 1.0, 3.0, 0.5, 3.0, 3.0];
        let table = events(&T, &p, 2.0, 0.0, 1.5, 3.0).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table[0];
        assert!((first.worst_p - 1.0).abs() < f64::EPSILON);
        assert!((first.trec - 3.0).abs() < f64::EPSILON);
        // samples t = 1, 2: area 0.5 over 1 s, range 2
        assert!((first.sev - 0.25).abs() < 1e-12);

        let second = &table[1];
        assert!((second.worst_p - 0.5).abs() < f64::EPSILON);
        assert!((second.trec - 3.0).abs() < f64::EPSILON);
    }
}
