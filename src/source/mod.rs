//! Telemetry source abstraction for receiving sensor events.
//!
//! This module provides a trait-based abstraction for receiving telemetry
//! from various feeds (live WebSocket connections, synthetic generators).
//! Every source emits the same two event shapes, so consumers cannot
//! distinguish a mock feed from real hardware.

mod frame;
mod mock;
mod ws;

pub use frame::{decode_frame, SensorFrame, TelemetrySample, CHANNEL_COUNT};
pub use mock::MockSource;
pub use ws::WsSource;

use std::fmt::Debug;

/// An event emitted by a telemetry source.
///
/// Events from a single source are delivered in strict arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceEvent {
    /// Connectivity changed: `true` when a session is established,
    /// `false` when connecting, retrying, or disconnected.
    ConnectionChanged(bool),
    /// A decoded telemetry sample arrived.
    Sample(TelemetrySample),
}

/// Trait for receiving telemetry events from various feeds.
///
/// Implementations run their receive loop on a background task and make
/// events available through a non-blocking `poll()`, so a presentation
/// loop is never stalled by network I/O.
///
/// # Example
///
/// ```
/// use thermwatch::source::{MockSource, TelemetrySource};
///
/// # tokio_test::block_on(async {
/// let mut source = MockSource::spawn();
/// if let Some(event) = source.poll() {
///     println!("got {:?}", event);
/// }
/// source.stop();
/// # });
/// ```
pub trait TelemetrySource: Send + Debug {
    /// Poll for the next event.
    ///
    /// Returns `Some(event)` if one is queued, `None` otherwise.
    /// This method never blocks.
    fn poll(&mut self) -> Option<SourceEvent>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;

    /// Request a cooperative shutdown.
    ///
    /// The background task observes the request at the top of its loops;
    /// an in-flight network operation unwinds naturally rather than being
    /// forcibly cancelled. No further events are emitted once the task has
    /// unwound.
    fn stop(&self);
}
