//! Splits the failing samples of a series into discrete events.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::non_negative;
use crate::error::{ResilienceError, Result};

/// A maximal run of failing samples.
///
/// `start_index` and `end_index` are inclusive positions in the
/// failing-only subsequence the event was segmented from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    /// First failing sample of the event.
    pub start_index: usize,
    /// Last failing sample of the event (inclusive).
    pub end_index: usize,
    /// Timestamp of the first failing sample.
    pub begin_time: f64,
    /// Timestamp of the last failing sample plus the signal width.
    pub end_time: f64,
    /// `end_time - begin_time`.
    pub duration: f64,
}

impl Event {
    fn new(times: &[f64], start_index: usize, end_index: usize, signal_width: f64) -> Self {
        let begin_time = times[start_index];
        let end_time = times[end_index] + signal_width;
        Self {
            start_index,
            end_index,
            begin_time,
            end_time,
            duration: end_time - begin_time,
        }
    }

    /// Number of failing samples in the event.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Partitions ascending failing-sample timestamps into events.
///
/// A new event starts at the first sample and whenever the gap to the
/// previous failing sample is larger than `separation`.
///
/// # Errors
///
/// [`ResilienceError::EmptyInput`] for an empty slice and
/// [`ResilienceError::NonFiniteParameter`] for a negative or non-finite
/// `separation` or `signal_width`.
pub fn segment(exceeding_times: &[f64], separation: f64, signal_width: f64) -> Result<Vec<Event>> {
    non_negative("event_separation", separation)?;
    non_negative("signal_width", signal_width)?;
    if exceeding_times.is_empty() {
        return Err(ResilienceError::EmptyInput);
    }

    let mut events = Vec::new();
    let mut start = 0;
    for i in 1..exceeding_times.len() {
        if exceeding_times[i] - exceeding_times[i - 1] > separation {
            events.push(Event::new(exceeding_times, start, i - 1, signal_width));
            start = i;
        }
    }
    events.push(Event::new(
        exceeding_times,
        start,
        exceeding_times.len() - 1,
        signal_width,
    ));

    for event in &events {
        tracing::trace!(
            start = event.start_index,
            end = event.end_index,
            begin = event.begin_time,
            duration = event.duration,
            "segmented event"
        );
    }
    Ok(events)
}
