//! # Resilience - quantifying how technical systems fail and recover.
//!
//! Given a recorded performance time series, an acceptable performance level
//! `Pa` and a worst-case level `Pmax`, this library measures how often, how
//! badly and for how long the system fell short, and how fast it recovered.
//!
//! ## Overview
//!
//! - **Severity**: time-integrated deficit below (or above) `Pa`, normalized
//!   by `Pa - Pmax` and the observation span. `0` means never failing.
//! - **Resilience**: `1 - severity`.
//! - **Events**: maximal runs of failing samples, merged across gaps no
//!   larger than the event separation time, each with its own severity,
//!   worst performance and recovery time.
//! - **Summary**: one row per performance column.
//!
//! The sign of `Pa - Pmax` decides the failure direction: `Pa > Pmax`
//! treats dropping below `Pa` as failure, `Pa < Pmax` rising above it.
//!
//! ## Quick Start
//!
//! ```rust
//! use resilience::{Column, events, summary};
//!
//! let t = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
//! let throughput = [3.0, 3.0, 1.0, 1.0, 3.0, 3.0];
//!
//! // acceptable 2.0, total failure 0.0, merge gaps up to 1 s, 1 s per sample
//! let table = events(&t, &throughput, 2.0, 0.0, 1.0, 1.0).unwrap();
//! assert_eq!(table.len(), 1);
//! assert!((table[0].trec - 1.0).abs() < 1e-12);
//!
//! let rows = summary(&t, Column::new("throughput", &throughput), 2.0, 0.0, 1.0, 1.0).unwrap();
//! assert!((rows[0].res0 - 0.8).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization for configuration and result records
//! - `chrono`: [`Timestamp`] for `chrono` date-times (enabled by default)
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Per-sample classification against the thresholds.
pub mod classify;
pub mod config;
/// Error type.
pub mod error;
pub mod event;
/// Trapezoidal time integration.
pub mod integrate;
pub mod segment;
/// Severity and resilience of a span or a whole series.
pub mod severity;
pub mod summary;
/// Timestamps and the validated time axis.
pub mod time;

pub use classify::{Classification, classify};
pub use config::{Direction, ResilienceConfig, Thresholds, infer_signal_width};
pub use error::{ResilienceError, Result};
pub use event::{EventResilience, analyze_events, events};
pub use integrate::{IntegralMethod, increments, integrate};
pub use segment::{Event, segment};
pub use severity::{resilience, severity, span_severity};
pub use summary::{Column, ColumnReport, Performance, SummaryRow, analyze_column, summarize, summary};
pub use time::{TimeAxis, Timestamp};
