// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # thermwatch
//!
//! A headless monitor for live temperature telemetry from hardware sensor
//! nodes.
//!
//! This crate ingests telemetry over a WebSocket connection (or from a
//! synthetic generator), derives alarm state against a user-configurable
//! threshold, keeps a bounded rolling history of recent samples, and
//! exports that history to CSV. Rendering is left to whatever presentation
//! surface consumes the emitted events; the bundled binary prints log
//! lines.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐               │
//! │  │  app    │───▶│   data   │───▶│ export  │──▶ CSV        │
//! │  │ (state) │    │(tracking)│    │         │               │
//! │  └────┬────┘    └──────────┘    └─────────┘               │
//! │       │                                                    │
//! │       ▼                                                    │
//! │  ┌─────────┐                                               │
//! │  │ source  │◀── WsSource | MockSource                      │
//! │  │ (input) │                                               │
//! │  └─────────┘                                               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state - feeds source events into the tracker,
//!   manages source restarts, and keeps the user-visible event log
//! - **[`source`]**: Telemetry source abstraction ([`TelemetrySource`] trait)
//!   with a live WebSocket implementation and a synthetic generator
//! - **[`data`]**: Threshold-alarm tracking and the bounded rolling history
//! - **[`config`]**: Settings validation (endpoint, sensor count, threshold)
//! - **[`export`]**: Lossless, ordered CSV export/import of the history
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Monitor a sensor node
//! thermwatch --endpoint 192.168.1.100
//!
//! # Bench mode without hardware
//! thermwatch --mock --threshold 90
//! ```
//!
//! ### As a library with the mock source
//!
//! ```
//! use thermwatch::{App, MockSource, Settings};
//!
//! # tokio_test::block_on(async {
//! let source = Box::new(MockSource::spawn());
//! let mut app = App::new(source, Settings::default());
//! while let Some(event) = app.poll_source() {
//!     app.handle_event(event);
//! }
//! app.stop();
//! # });
//! ```
//!
//! ### Driving the tracker directly
//!
//! ```
//! use thermwatch::data::Tracker;
//! use thermwatch::source::TelemetrySample;
//!
//! let mut tracker = Tracker::new();
//! tracker.set_threshold(90.0);
//! let sample = TelemetrySample { channels: [95.0, 30.0, 25.0], hardware_alarm: None };
//! let outcome = tracker.on_sample(&sample);
//! assert!(outcome.record.alarm && outcome.alarm_edge);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod export;
pub mod source;

// Re-export main types for convenience
pub use app::App;
pub use config::{ConfigError, Settings};
pub use data::{History, HistoryRecord, SampleOutcome, Tracker};
pub use export::{export_csv, read_history_file, ExportOutcome};
pub use source::{MockSource, SourceEvent, TelemetrySample, TelemetrySource, WsSource};
