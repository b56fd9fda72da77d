//! One summary row per performance column.

use std::fmt::Display;
use std::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::config::{ResilienceConfig, Thresholds};
use crate::error::Result;
use crate::event::{EventResilience, score_events};
use crate::severity::span_severity;
use crate::time::{TimeAxis, Timestamp};

/// A named performance column sharing the caller's time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column<'a> {
    /// Column name, copied into the summary row.
    pub name: &'a str,
    /// Performance values, one per timestamp.
    pub values: &'a [f64],
}

impl<'a> Column<'a> {
    /// Creates a named column.
    #[must_use]
    pub const fn new(name: &'a str, values: &'a [f64]) -> Self {
        Self { name, values }
    }
}

/// One column or an ordered table of columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Performance<'a> {
    /// A single column.
    Single(Column<'a>),
    /// Several columns; summary rows follow this order.
    Table(Vec<Column<'a>>),
}

impl<'a> Performance<'a> {
    /// The columns in input order.
    #[must_use]
    pub fn columns(&self) -> &[Column<'a>] {
        match self {
            Self::Single(column) => slice::from_ref(column),
            Self::Table(columns) => columns,
        }
    }
}

impl<'a> From<Column<'a>> for Performance<'a> {
    fn from(column: Column<'a>) -> Self {
        Self::Single(column)
    }
}

impl<'a> From<Vec<Column<'a>>> for Performance<'a> {
    fn from(columns: Vec<Column<'a>>) -> Self {
        Self::Table(columns)
    }
}

/// Aggregated figures of one performance column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SummaryRow {
    /// Name of the column.
    pub column: String,
    /// Number of failure events.
    pub num_events: usize,
    /// Raw performance at the first sample with the largest test variable.
    pub worst_p: f64,
    /// Sum of event durations.
    pub total_dur: f64,
    /// Sum of event recovery times.
    pub total_trec: f64,
    /// Mean recovery-time percentage over the events.
    pub mean_trec_percent: f64,
    /// Whole-series severity.
    pub sev: f64,
    /// `1 - sev`.
    pub res0: f64,
}

impl Display for SummaryRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: events={} worst_P={} total_dur={} total_trec={} mean_trec%={:.2} Sev={:.6} Res0={:.6}",
            self.column,
            self.num_events,
            self.worst_p,
            self.total_dur,
            self.total_trec,
            self.mean_trec_percent,
            self.sev,
            self.res0
        )
    }
}

/// Summary row plus the event table it was aggregated from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnReport {
    /// Aggregated row.
    pub summary: SummaryRow,
    /// Per-event figures, empty when the column never fails.
    pub events: Vec<EventResilience>,
}

/// Classifies, segments and scores one column.
///
/// A column that never fails yields a zero-event row with `sev = 0` and
/// `res0 = 1` instead of an error.
///
/// # Errors
///
/// Configuration, length, segmentation and span errors of the underlying steps.
#[allow(clippy::cast_precision_loss)]
pub fn analyze_column(axis: &TimeAxis, column: &Column<'_>, config: &ResilienceConfig) -> Result<ColumnReport> {
    config.validate()?;
    let classification = classify(axis, column.values, &config.thresholds)?;
    let worst_p = column.values[classification.worst_index()];

    if !classification.any_exceeding() {
        tracing::debug!(column = column.name, "no exceedance");
        return Ok(ColumnReport {
            summary: SummaryRow {
                column: column.name.to_owned(),
                num_events: 0,
                worst_p,
                total_dur: 0.0,
                total_trec: 0.0,
                mean_trec_percent: 0.0,
                sev: 0.0,
                res0: 1.0,
            },
            events: Vec::new(),
        });
    }

    let sev = span_severity(
        axis.as_slice(),
        classification.clipped(),
        &config.thresholds,
        config.integral_method,
    )?;
    let events = score_events(axis, column.values, &classification, config)?;

    let total_dur = events.iter().map(|e| e.duration).sum();
    let total_trec = events.iter().map(|e| e.trec).sum();
    let mean_trec_percent =
        events.iter().map(|e| e.trec_percent).sum::<f64>() / events.len() as f64;

    tracing::debug!(
        column = column.name,
        events = events.len(),
        sev,
        "summarized column"
    );
    Ok(ColumnReport {
        summary: SummaryRow {
            column: column.name.to_owned(),
            num_events: events.len(),
            worst_p,
            total_dur,
            total_trec,
            mean_trec_percent,
            sev,
            res0: 1.0 - sev,
        },
        events,
    })
}

/// Summary rows for every column, in input order.
///
/// # Errors
///
/// The first error raised by [`analyze_column`].
pub fn summarize(axis: &TimeAxis, performance: &Performance<'_>, config: &ResilienceConfig) -> Result<Vec<SummaryRow>> {
    performance
        .columns()
        .iter()
        .map(|column| analyze_column(axis, column, config).map(|report| report.summary))
        .collect()
}

/// Summary table of one or more columns sharing `time_stamp`.
///
/// ```
/// use resilience::{Column, summary};
///
/// let t = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
/// let ok = [3.0; 6];
/// let dip = [3.0, 3.0, 1.0, 1.0, 3.0, 3.0];
/// let rows = summary(
///     &t,
///     vec![Column::new("ok", &ok), Column::new("dip", &dip)],
///     2.0,
///     0.0,
///     1.0,
///     1.0,
/// )
/// .unwrap();
/// assert_eq!(rows[0].num_events, 0);
/// assert_eq!(rows[1].num_events, 1);
/// ```
///
/// # Errors
///
/// See [`summarize`].
pub fn summary<'a, T: Timestamp>(
    time_stamp: &[T],
    pt: impl Into<Performance<'a>>,
    pa: f64,
    pmax: f64,
    evt_sep_time: f64,
    signal_width: f64,
) -> Result<Vec<SummaryRow>> {
    let axis = TimeAxis::new(time_stamp)?;
    let config = ResilienceConfig::new(Thresholds::new(pa, pmax)?)
        .with_event_separation(evt_sep_time)
        .with_signal_width(signal_width);
    summarize(&axis, &pt.into(), &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResilienceError;

    const T: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];

    fn config() -> ResilienceConfig {
        ResilienceConfig::new(Thresholds::new(2.0, 0.0).unwrap())
            .with_event_separation(1.0)
            .with_signal_width(1.0)
    }

    #[test]
    fn test_scenario_row() {
        let axis = TimeAxis::new(&T).unwrap();
        let p = [3.0, 3.0, 1.0, 1.0, 3.0, 3.0];
        let report = analyze_column(&axis, &Column::new("s1", &p), &config()).unwrap();
        let row = &report.summary;
        assert_eq!(row.column, "s1");
        assert_eq!(row.num_events, 1);
        assert!((row.worst_p - 1.0).abs() < f64::EPSILON);
        assert!((row.total_dur - 2.0).abs() < f64::EPSILON);
        assert!((row.total_trec - 1.0).abs() < f64::EPSILON);
        assert!((row.mean_trec_percent - 50.0).abs() < 1e-12);
        assert!((row.sev - 0.2).abs() < 1e-12);
        assert!((row.res0 - 0.8).abs() < 1e-12);
        assert_eq!(report.events.len(), 1);
    }

    #[test]
    fn test_quiet_column_degrades_gracefully() {
        let axis = TimeAxis::new(&T).unwrap();
        let p = [3.0, 4.0, 2.5, 5.0, 3.0, 2.5];
        let row = analyze_column(&axis, &Column::new("quiet", &p), &config())
            .unwrap()
            .summary;
        assert_eq!(row.num_events, 0);
        assert!(row.sev.abs() < f64::EPSILON);
        assert!((row.res0 - 1.0).abs() < f64::EPSILON);
        assert!(row.total_dur.abs() < f64::EPSILON);
        // closest approach to the threshold, first occurrence
        assert!((row.worst_p - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_column_order_preserved() {
        let a = [3.0; 6];
        let b = [3.0, 1.0, 3.0, 3.0, 1.0, 3.0];
        let c = [1.0; 6];
        let rows = summary(
            &T,
            vec![Column::new("a", &a), Column::new("b", &b), Column::new("c", &c)],
            2.0,
            0.0,
            1.0,
            1.0,
        )
        .unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.column.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(rows[1].num_events, 2);
        assert_eq!(rows[2].num_events, 1);
    }

    #[test]
    fn test_single_column_matches_table_entry() {
        let b = [3.0, 1.0, 3.0, 3.0, 1.0, 3.0];
        let single = summary(&T, Column::new("b", &b), 2.0, 0.0, 1.0, 1.0).unwrap();
        let table = summary(&T, vec![Column::new("b", &b)], 2.0, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(single, table);
    }

    #[test]
    fn test_failing_tail_keeps_every_row() {
        let ok = [3.0; 6];
        let tail = [3.0, 3.0, 3.0, 3.0, 3.0, 1.0];
        let rows = summary(
            &T,
            vec![Column::new("ok", &ok), Column::new("tail", &tail)],
            2.0,
            0.0,
            1.0,
            1.0,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].num_events, 0);
        assert_eq!(rows[1].num_events, 1);
        assert!((rows[1].worst_p - 1.0).abs() < f64::EPSILON);
        assert!((rows[1].total_dur - 1.0).abs() < f64::EPSILON);
        assert!((rows[1].mean_trec_percent - 100.0).abs() < 1e-12);
        // half a second of deficit 1 over 5 s, range 2
        assert!((rows[1].sev - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch_propagates() {
        let short = [1.0, 2.0];
        assert!(matches!(
            summary(&T, Column::new("short", &short), 2.0, 0.0, 1.0, 1.0),
            Err(ResilienceError::LengthMismatch { .. })
        ));
    }
}
