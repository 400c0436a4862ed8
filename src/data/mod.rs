//! Data models and processing for telemetry samples.
//!
//! This module turns raw samples from a source into alarm-annotated
//! history records.
//!
//! ## Data flow
//!
//! ```text
//! TelemetrySample (from source)
//!        │
//!        ▼
//! Tracker::on_sample()
//!        │
//!        ├──▶ HistoryRecord (alarm derived from the current threshold)
//!        │         │
//!        │         └──▶ History (bounded FIFO, for the chart and export)
//!        │
//!        └──▶ alarm_edge flag (fires once per transition into alarm)
//! ```

pub mod history;
pub mod tracker;

pub use history::{History, HistoryRecord, DEFAULT_CAPACITY};
pub use tracker::{SampleOutcome, Tracker, DEFAULT_THRESHOLD};
