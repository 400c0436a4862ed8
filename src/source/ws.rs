//! Live WebSocket telemetry source.
//!
//! Maintains a connection to the sensor node at `ws://<endpoint>/ws` and
//! emits connectivity and sample events. The connect/receive loop runs on
//! a background task and retries forever with a fixed backoff; it stops
//! only when the consumer requests a cooperative shutdown or drops the
//! receiving end.

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{decode_frame, SourceEvent, TelemetrySource};

/// Fixed delay between reconnect attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Bound on queued events between the receive task and the consumer.
const EVENT_QUEUE_DEPTH: usize = 16;

/// A telemetry source connected to real hardware over WebSocket.
///
/// The background task owns the connection lifecycle exclusively:
/// it emits `ConnectionChanged(false)` before each attempt,
/// `ConnectionChanged(true)` on session establishment, and one `Sample`
/// per decoded frame. Malformed frames are logged and discarded without
/// terminating the session.
#[derive(Debug)]
pub struct WsSource {
    receiver: mpsc::Receiver<SourceEvent>,
    description: String,
    token: CancellationToken,
}

impl WsSource {
    /// Spawn a source for the given endpoint (host or host:port).
    pub fn spawn(endpoint: &str) -> Self {
        Self::spawn_with_backoff(endpoint, RETRY_BACKOFF)
    }

    /// Spawn with a custom retry backoff. Used by tests to keep the
    /// reconnect cycle short.
    pub fn spawn_with_backoff(endpoint: &str, backoff: Duration) -> Self {
        let url = format!("ws://{}/ws", endpoint);
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let token = CancellationToken::new();
        let task_token = token.clone();
        let task_url = url.clone();

        tokio::spawn(async move {
            run_feed(task_url, tx, task_token, backoff).await;
        });

        Self {
            receiver: rx,
            description: url,
            token,
        }
    }

    /// Receive the next event, waiting until one arrives.
    ///
    /// Returns `None` once the background task has unwound and all queued
    /// events have been drained.
    pub async fn recv(&mut self) -> Option<SourceEvent> {
        self.receiver.recv().await
    }
}

impl TelemetrySource for WsSource {
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

impl Drop for WsSource {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// The connect/receive loop.
///
/// Runs until cancelled or until the consumer drops its receiver. A clean
/// close from the peer triggers an immediate reconnect; connect failures
/// and transport errors wait out the backoff first.
async fn run_feed(
    url: String,
    tx: mpsc::Sender<SourceEvent>,
    token: CancellationToken,
    backoff: Duration,
) {
    'retry: loop {
        if token.is_cancelled() {
            break;
        }

        if tx.send(SourceEvent::ConnectionChanged(false)).await.is_err() {
            break;
        }

        debug!("Attempting to connect to {}", url);
        let attempt = tokio::select! {
            _ = token.cancelled() => break 'retry,
            attempt = connect_async(url.as_str()) => attempt,
        };

        match attempt {
            Ok((mut ws, _)) => {
                info!("Connected to {}", url);
                if tx.send(SourceEvent::ConnectionChanged(true)).await.is_err() {
                    break 'retry;
                }

                let mut session_error = false;
                loop {
                    if token.is_cancelled() {
                        break 'retry;
                    }
                    let inbound = tokio::select! {
                        _ = token.cancelled() => break 'retry,
                        inbound = ws.next() => inbound,
                    };
                    match inbound {
                        Some(Ok(Message::Text(text))) => {
                            if let Some(sample) = decode_frame(&text) {
                                if tx.send(SourceEvent::Sample(sample)).await.is_err() {
                                    break 'retry;
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            info!("Connection closed by peer");
                            // Clean close: reconnect without waiting
                            break;
                        }
                        Some(Ok(_)) => {
                            // Ping/pong/binary frames carry no telemetry
                        }
                        Some(Err(e)) => {
                            warn!("Transport error: {}", e);
                            session_error = true;
                            break;
                        }
                    }
                }

                if !session_error {
                    continue 'retry;
                }
            }
            Err(e) => {
                debug!("Connection to {} failed: {}", url, e);
            }
        }

        // Fixed backoff, no retry ceiling
        tokio::select! {
            _ = token.cancelled() => break 'retry,
            _ = tokio::time::sleep(backoff) => {}
        }
    }
}
