// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod data;
mod export;
mod source;

use app::App;
use config::Settings;
use data::HistoryRecord;
use export::ExportOutcome;
use source::{MockSource, TelemetrySource, WsSource};

#[derive(Parser, Debug)]
#[command(name = "thermwatch")]
#[command(about = "Headless monitor for live temperature telemetry from sensor nodes")]
struct Args {
    /// Sensor node endpoint (host or host:port)
    #[arg(short, long, default_value = "192.168.1.100")]
    endpoint: String,

    /// Use a synthetic data source instead of real hardware
    #[arg(short, long)]
    mock: bool,

    /// Alarm threshold in degrees Celsius (0-150)
    #[arg(short, long, default_value = "100")]
    threshold: u32,

    /// Number of sensor channels to display (1-3)
    #[arg(short, long, default_value = "3")]
    sensors: u8,

    /// Write the rolling history to this CSV file on exit
    #[arg(long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings {
        endpoint: args.endpoint,
        sensors: args.sensors,
        threshold: args.threshold,
        mock: args.mock,
    };
    settings.validate()?;

    let source: Box<dyn TelemetrySource> = if settings.mock {
        Box::new(MockSource::spawn())
    } else {
        Box::new(WsSource::spawn(&settings.endpoint))
    };

    let sensors = settings.sensors;
    let mut app = App::new(source, settings);
    let mut poll = tokio::time::interval(Duration::from_millis(100));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            _ = poll.tick() => {
                while let Some(event) = app.poll_source() {
                    if let Some(outcome) = app.handle_event(event) {
                        info!("{}", format_sample(&outcome.record, sensors));
                    }
                }
            }
        }
    }

    app.stop();

    if let Some(path) = args.export {
        if let ExportOutcome::Empty = app.export(&path)? {
            warn!("History is empty; nothing was exported");
        }
    }

    Ok(())
}

/// One log line per sample, limited to the visible channels.
fn format_sample(record: &HistoryRecord, sensors: u8) -> String {
    let mut parts: Vec<String> = record
        .channels
        .iter()
        .take(usize::from(sensors))
        .enumerate()
        .map(|(i, value)| format!("t{}={:.1}°C", i + 1, value))
        .collect();
    parts.push(format!("alarm={}", record.alarm));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_sample_respects_visibility() {
        let record = HistoryRecord {
            time: Utc::now(),
            channels: [25.54, 30.0, 99.9],
            alarm: false,
        };
        assert_eq!(format_sample(&record, 3), "t1=25.5°C t2=30.0°C t3=99.9°C alarm=false");
        assert_eq!(format_sample(&record, 1), "t1=25.5°C alarm=false");
    }
}
