//! Wire frame decoding for the sensor node protocol.
//!
//! The hardware pushes UTF-8 text frames containing a JSON object with one
//! numeric field per channel (`t1`..`t3`) and an optional `alarm` flag.
//! The flag is advisory only: alarm state shown to the user is recomputed
//! from the configured threshold, not taken from the hardware.

use serde::Deserialize;
use tracing::warn;

/// Number of temperature channels in a sensor frame.
pub const CHANNEL_COUNT: usize = 3;

/// Raw frame as serialized by the sensor node firmware.
///
/// Missing channel fields default to 0.0, matching the node's behavior of
/// omitting channels that have no probe attached.
#[derive(Debug, Clone, Deserialize)]
pub struct SensorFrame {
    #[serde(default)]
    pub t1: f64,
    #[serde(default)]
    pub t2: f64,
    #[serde(default)]
    pub t3: f64,
    /// Hardware-side alarm flag (advisory only).
    #[serde(default)]
    pub alarm: Option<bool>,
}

/// A decoded telemetry sample, immutable once emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// Channel readings in degrees Celsius, in wire order.
    pub channels: [f64; CHANNEL_COUNT],
    /// Alarm flag as reported by the hardware, if present.
    pub hardware_alarm: Option<bool>,
}

impl From<SensorFrame> for TelemetrySample {
    fn from(frame: SensorFrame) -> Self {
        Self {
            channels: [frame.t1, frame.t2, frame.t3],
            hardware_alarm: frame.alarm,
        }
    }
}

/// Decode a single inbound text frame.
///
/// Returns `None` on malformed payloads. Decode failures are logged and
/// never propagate to the caller; the connection stays up and the frame is
/// discarded.
pub fn decode_frame(text: &str) -> Option<TelemetrySample> {
    match serde_json::from_str::<SensorFrame>(text) {
        Ok(frame) => Some(frame.into()),
        Err(e) => {
            warn!("Discarding malformed frame: {}", e);
            None
        }
    }
}
