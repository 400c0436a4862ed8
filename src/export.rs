//! CSV export and import of the rolling history.
//!
//! One row per record: `time,t1,t2,t3,alarm`, in arrival order. Timestamps
//! are RFC 3339 and channel values use the shortest lossless float form,
//! so a written file reads back to the same records.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::{History, HistoryRecord};

/// Result of an export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to export; no file was written. Surfaced to the user as a
    /// notice, not an error.
    Empty,
    /// File written with this many data rows.
    Written { rows: usize },
}

/// Row shape used for CSV (de)serialization.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    time: DateTime<Utc>,
    t1: f64,
    t2: f64,
    t3: f64,
    alarm: bool,
}

impl From<&HistoryRecord> for CsvRow {
    fn from(record: &HistoryRecord) -> Self {
        let [t1, t2, t3] = record.channels;
        Self {
            time: record.time,
            t1,
            t2,
            t3,
            alarm: record.alarm,
        }
    }
}

impl From<CsvRow> for HistoryRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            time: row.time,
            channels: [row.t1, row.t2, row.t3],
            alarm: row.alarm,
        }
    }
}

/// Export the history to a CSV file.
///
/// An empty history is a no-op: no file is created.
pub fn export_csv(history: &History, path: &Path) -> Result<ExportOutcome> {
    if history.is_empty() {
        return Ok(ExportOutcome::Empty);
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let rows = write_history(history, file)?;
    Ok(ExportOutcome::Written { rows })
}

/// Write the history as CSV to any writer. Returns the row count.
pub fn write_history<W: Write>(history: &History, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for record in history.iter() {
        csv_writer.serialize(CsvRow::from(record))?;
        rows += 1;
    }
    csv_writer.flush()?;
    Ok(rows)
}

/// Read records back from a CSV stream, in file order.
pub fn read_history<R: Read>(reader: R) -> Result<Vec<HistoryRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        records.push(row?.into());
    }
    Ok(records)
}

/// Read records from a CSV file (the history log viewer path).
pub fn read_history_file(path: &Path) -> Result<Vec<HistoryRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_history(file)
}
