//! Application state: wires a telemetry source into the tracker and keeps
//! the event log the presentation surface displays.

use std::collections::VecDeque;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use tracing::info;

use crate::config::{validate_endpoint, validate_threshold, ConfigError, Settings};
use crate::data::{SampleOutcome, Tracker};
use crate::export::{export_csv, ExportOutcome};
use crate::source::{SourceEvent, TelemetrySource, WsSource};

/// Number of event log lines kept in memory.
const MAX_LOG_LINES: usize = 200;

/// Main application state.
///
/// Owns the active source and the tracker. Events are processed one at a
/// time through [`App::handle_event`], which keeps tracker mutation
/// serial as required.
pub struct App {
    source: Box<dyn TelemetrySource>,
    tracker: Tracker,
    pub connected: bool,
    pub settings: Settings,
    log: VecDeque<String>,
}

impl App {
    /// Create a new App with the given source and settings.
    ///
    /// The settings are assumed validated; the threshold is applied to the
    /// tracker immediately.
    pub fn new(source: Box<dyn TelemetrySource>, settings: Settings) -> Self {
        let mut tracker = Tracker::new();
        tracker.set_threshold(f64::from(settings.threshold));
        let mut app = Self {
            source,
            tracker,
            connected: false,
            settings,
            log: VecDeque::new(),
        };
        app.log_line(format!("Using source: {}", app.source.description()));
        app
    }

    /// Returns a description of the active source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Drain the next queued source event, if any.
    pub fn poll_source(&mut self) -> Option<SourceEvent> {
        self.source.poll()
    }

    /// Process one event from the source.
    ///
    /// Returns the per-sample outcome so the presentation surface can
    /// update gauges and the chart; connectivity events return `None`.
    pub fn handle_event(&mut self, event: SourceEvent) -> Option<SampleOutcome> {
        match event {
            SourceEvent::ConnectionChanged(connected) => {
                if connected != self.connected {
                    self.connected = connected;
                    if connected {
                        self.log_line("System connected.".to_string());
                    } else {
                        self.log_line("System disconnected.".to_string());
                    }
                }
                None
            }
            SourceEvent::Sample(sample) => {
                let outcome = self.tracker.on_sample(&sample);
                if outcome.alarm_edge {
                    self.log_line("!!! ALARM TRIGGERED !!!".to_string());
                }
                Some(outcome)
            }
        }
    }

    /// Update the alarm threshold applied to subsequent samples.
    pub fn set_threshold(&mut self, threshold: u32) -> Result<(), ConfigError> {
        validate_threshold(threshold)?;
        self.settings.threshold = threshold;
        self.tracker.set_threshold(f64::from(threshold));
        Ok(())
    }

    /// Replace the active source with a fresh connection to `endpoint`.
    ///
    /// The endpoint is validated first; a blank endpoint leaves the
    /// running source untouched. The old source is stopped before the new
    /// one starts, and each source owns a private event channel, so a
    /// stopped source can never interleave events into the new stream.
    pub fn restart(&mut self, endpoint: &str) -> Result<(), ConfigError> {
        let endpoint = validate_endpoint(endpoint)?;
        self.source.stop();
        self.log_line(format!("Reconnecting to {}...", endpoint));
        self.settings.endpoint = endpoint.to_string();
        self.source = Box::new(WsSource::spawn(endpoint));
        self.connected = false;
        Ok(())
    }

    /// Export the rolling history to a CSV file.
    pub fn export(&mut self, path: &Path) -> Result<ExportOutcome> {
        let outcome = export_csv(self.tracker.history(), path)?;
        match outcome {
            ExportOutcome::Empty => self.log_line("No data to export.".to_string()),
            ExportOutcome::Written { rows } => {
                self.log_line(format!("Exported {} rows to {}", rows, path.display()));
            }
        }
        Ok(outcome)
    }

    /// Request cooperative shutdown of the active source.
    pub fn stop(&self) {
        self.source.stop();
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Event log lines, oldest first.
    pub fn log_lines(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    fn log_line(&mut self, message: String) {
        info!("{}", message);
        let stamped = format!("[{}] {}", Local::now().format("%H:%M:%S"), message);
        self.log.push_back(stamped);
        while self.log.len() > MAX_LOG_LINES {
            self.log.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MockSource, TelemetrySample};

    fn sample(t1: f64) -> SourceEvent {
        SourceEvent::Sample(TelemetrySample {
            channels: [t1, 0.0, 0.0],
            hardware_alarm: None,
        })
    }

    fn test_app() -> App {
        App::new(Box::new(MockSource::spawn()), Settings::default())
    }

    fn has_line(app: &App, needle: &str) -> bool {
        app.log_lines().any(|line| line.contains(needle))
    }

    #[tokio::test]
    async fn test_connection_transitions_are_logged_once() {
        let mut app = test_app();

        app.handle_event(SourceEvent::ConnectionChanged(true));
        app.handle_event(SourceEvent::ConnectionChanged(true));
        app.handle_event(SourceEvent::ConnectionChanged(false));

        let connects =
            app.log_lines().filter(|line| line.contains("System connected.")).count();
        assert_eq!(connects, 1);
        assert!(has_line(&app, "System disconnected."));
        assert!(!app.connected);
    }

    #[tokio::test]
    async fn test_sample_feeds_tracker_and_logs_alarm_edge() {
        let mut app = test_app();

        let calm = app.handle_event(sample(50.0)).unwrap();
        assert!(!calm.alarm_edge);
        assert!(!has_line(&app, "ALARM"));

        let hot = app.handle_event(sample(120.0)).unwrap();
        assert!(hot.alarm_edge);
        assert!(has_line(&app, "!!! ALARM TRIGGERED !!!"));

        // Sustained alarm does not log again
        app.handle_event(sample(121.0));
        let alarms = app.log_lines().filter(|line| line.contains("ALARM")).count();
        assert_eq!(alarms, 1);

        assert_eq!(app.tracker().history().len(), 3);
    }

    #[tokio::test]
    async fn test_restart_rejects_empty_endpoint() {
        let mut app = test_app();
        let before = app.source_description().to_string();

        assert_eq!(app.restart("  "), Err(ConfigError::EmptyEndpoint));
        assert_eq!(app.source_description(), before);
        assert_eq!(app.settings.endpoint, Settings::default().endpoint);
    }

    #[tokio::test]
    async fn test_restart_swaps_source() {
        let mut app = test_app();
        app.handle_event(SourceEvent::ConnectionChanged(true));

        app.restart("10.0.0.42").unwrap();
        assert_eq!(app.source_description(), "ws://10.0.0.42/ws");
        assert_eq!(app.settings.endpoint, "10.0.0.42");
        assert!(!app.connected);
        app.stop();
    }

    #[tokio::test]
    async fn test_set_threshold_applies_to_next_sample() {
        let mut app = test_app();

        assert!(app.handle_event(sample(105.0)).unwrap().record.alarm);
        app.set_threshold(110).unwrap();
        assert!(!app.handle_event(sample(105.0)).unwrap().record.alarm);

        assert_eq!(app.set_threshold(151), Err(ConfigError::Threshold(151)));
        assert_eq!(app.settings.threshold, 110);
    }

    #[tokio::test]
    async fn test_export_empty_history_is_notice_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut app = test_app();

        let outcome = app.export(&path).unwrap();
        assert_eq!(outcome, ExportOutcome::Empty);
        assert!(has_line(&app, "No data to export."));

        app.handle_event(sample(42.0));
        let outcome = app.export(&path).unwrap();
        assert_eq!(outcome, ExportOutcome::Written { rows: 1 });
    }
}
