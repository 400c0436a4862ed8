//! Threshold-alarm tracking over incoming samples.

use chrono::Utc;

use super::history::{History, HistoryRecord};
use crate::source::TelemetrySample;

/// Threshold applied until the user configures one.
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// Result of processing one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOutcome {
    /// The record appended to the history.
    pub record: HistoryRecord,
    /// True only on the transition from non-alarm to alarm. Sustained
    /// alarm does not re-fire; the edge arms again after at least one
    /// non-alarm sample.
    pub alarm_edge: bool,
}

/// Derives alarm state and maintains the rolling history.
///
/// Purely reactive: has no concurrency of its own and must be fed one
/// sample at a time. The threshold comparison is strict greater-than, so
/// a reading exactly at the threshold is not an alarm. The tracker ignores
/// the hardware-reported alarm flag entirely and recomputes from the
/// configured threshold.
#[derive(Debug)]
pub struct Tracker {
    threshold: f64,
    history: History,
    in_alarm: bool,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            history: History::new(),
            in_alarm: false,
        }
    }

    /// Create a tracker with a custom history capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            history: History::with_capacity(capacity),
            in_alarm: false,
        }
    }

    /// Set the threshold applied to subsequent samples.
    ///
    /// Existing records are not revisited.
    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Process one sample: derive alarm state, append to history, and
    /// detect the alarm edge.
    pub fn on_sample(&mut self, sample: &TelemetrySample) -> SampleOutcome {
        let alarm = sample.channels.iter().any(|&value| value > self.threshold);

        let record = HistoryRecord {
            time: Utc::now(),
            channels: sample.channels,
            alarm,
        };
        self.history.push(record);

        let alarm_edge = alarm && !self.in_alarm;
        self.in_alarm = alarm;

        SampleOutcome { record, alarm_edge }
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t1: f64) -> TelemetrySample {
        TelemetrySample {
            channels: [t1, 0.0, 0.0],
            hardware_alarm: None,
        }
    }

    #[test]
    fn test_default_threshold_is_100() {
        let mut tracker = Tracker::new();
        assert_eq!(tracker.threshold(), 100.0);
        assert!(tracker.on_sample(&sample(105.0)).record.alarm);
        assert!(!tracker.on_sample(&sample(95.0)).record.alarm);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut tracker = Tracker::new();
        tracker.set_threshold(100.0);
        // Exactly at the threshold is not an alarm
        assert!(!tracker.on_sample(&sample(100.0)).record.alarm);
        assert!(tracker.on_sample(&sample(100.1)).record.alarm);
    }

    #[test]
    fn test_any_channel_can_trip_alarm() {
        let mut tracker = Tracker::new();
        let hot_t3 = TelemetrySample {
            channels: [20.0, 20.0, 120.0],
            hardware_alarm: None,
        };
        assert!(tracker.on_sample(&hot_t3).record.alarm);
    }

    #[test]
    fn test_hardware_flag_is_ignored() {
        let mut tracker = Tracker::new();
        let cool_but_flagged = TelemetrySample {
            channels: [20.0, 20.0, 20.0],
            hardware_alarm: Some(true),
        };
        assert!(!tracker.on_sample(&cool_but_flagged).record.alarm);
    }

    #[test]
    fn test_edge_fires_only_on_transition() {
        let mut tracker = Tracker::new();

        // Alarm pattern F,F,T,T,T,F,T: edges expected at indices 2 and 6
        let values = [50.0, 60.0, 110.0, 120.0, 115.0, 70.0, 130.0];
        let edges: Vec<bool> =
            values.iter().map(|&v| tracker.on_sample(&sample(v)).alarm_edge).collect();

        assert_eq!(edges, vec![false, false, true, false, false, false, true]);
    }

    #[test]
    fn test_threshold_change_is_not_retroactive() {
        let mut tracker = Tracker::new();
        tracker.set_threshold(100.0);

        let first = tracker.on_sample(&sample(105.0));
        assert!(first.record.alarm);

        tracker.set_threshold(110.0);
        let second = tracker.on_sample(&sample(105.0));
        assert!(!second.record.alarm);

        // The earlier record keeps the alarm state it was created with
        let recorded: Vec<bool> = tracker.history().iter().map(|r| r.alarm).collect();
        assert_eq!(recorded, vec![true, false]);
    }

    #[test]
    fn test_history_grows_with_samples() {
        let mut tracker = Tracker::with_capacity(5);
        for i in 0..8 {
            tracker.on_sample(&sample(i as f64));
        }
        assert_eq!(tracker.history().len(), 5);
    }
}
