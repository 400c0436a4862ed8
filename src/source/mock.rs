//! Synthetic telemetry source.
//!
//! Emits plausible randomized samples on a fixed interval without touching
//! the network. Useful for exercising the tracker and presentation surface
//! on a bench with no hardware attached.

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::{SourceEvent, TelemetrySample, TelemetrySource};

/// Interval between synthesized samples.
pub const TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Ceiling used for the synthesized hardware alarm flag.
///
/// This is intentionally independent of the user-configured threshold:
/// real hardware reports its own alarm bit, and the generator mimics that.
const ALARM_CEILING: f64 = 100.0;

const EVENT_QUEUE_DEPTH: usize = 16;

/// A telemetry source that synthesizes samples instead of connecting.
///
/// Emits `ConnectionChanged(true)` immediately, then one `Sample` per tick.
/// Never emits `ConnectionChanged(false)`. The event contract is identical
/// to [`super::WsSource`], so consumers cannot tell them apart.
#[derive(Debug)]
pub struct MockSource {
    receiver: mpsc::Receiver<SourceEvent>,
    description: String,
    token: CancellationToken,
}

impl MockSource {
    /// Spawn a generator with the standard 2-second tick.
    pub fn spawn() -> Self {
        Self::spawn_with_interval(TICK_INTERVAL)
    }

    /// Spawn with a custom tick interval. Used by tests.
    pub fn spawn_with_interval(tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            if tx.send(SourceEvent::ConnectionChanged(true)).await.is_err() {
                return;
            }
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = tokio::time::sleep(tick) => {}
                }
                if tx.send(SourceEvent::Sample(synthesize())).await.is_err() {
                    break;
                }
            }
        });

        Self {
            receiver: rx,
            description: "mock generator".to_string(),
            token,
        }
    }

    /// Receive the next event, waiting until one arrives.
    pub async fn recv(&mut self) -> Option<SourceEvent> {
        self.receiver.recv().await
    }
}

impl TelemetrySource for MockSource {
    fn poll(&mut self) -> Option<SourceEvent> {
        self.receiver.try_recv().ok()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn stop(&self) {
        self.token.cancel();
    }
}

impl Drop for MockSource {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Build one plausible sample.
///
/// Channel 1 sits near ambient with an occasional large excursion to
/// exercise alarm paths, channel 2 is stable, channel 3 hovers just under
/// the alarm ceiling.
fn synthesize() -> TelemetrySample {
    let mut rng = rand::thread_rng();

    let mut t1 = 25.0 + rng.gen_range(-5.0..5.0);
    if rng.gen::<f64>() > 0.95 {
        t1 += rng.gen::<f64>() * 80.0;
    }
    let t2 = 30.0 + rng.gen_range(-2.0..2.0);
    let t3 = 95.0 + rng.gen_range(0.0..10.0);

    let alarm = t1 > ALARM_CEILING || t2 > ALARM_CEILING || t3 > ALARM_CEILING;

    TelemetrySample {
        channels: [t1, t2, t3],
        hardware_alarm: Some(alarm),
    }
}
