//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `elevator_events.csv`
//! - `worker_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EventRow, OutputResult, WorkerSummaryRow};
use crate::writer::OutputWriter;

/// Writes the event log to two CSV files.
pub struct CsvWriter {
    events:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(dir.join("elevator_events.csv"))?;
        events.write_record(["elevator_id", "request_id", "kind", "floor", "elapsed_ms", "at_ms"])?;

        let mut summaries = Writer::from_path(dir.join("worker_summaries.csv"))?;
        summaries.write_record(["elevator_id", "served", "floors_travelled", "final_floor"])?;

        Ok(Self {
            events,
            summaries,
            finished: false,
        })
    }
}

/// Empty cell for absent optional columns.
fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.elevator_id.to_string(),
            row.request_id.to_string(),
            row.kind.to_string(),
            opt(row.floor),
            opt(row.elapsed_ms),
            row.at_ms.to_string(),
        ])?;
        Ok(())
    }

    fn write_worker_summary(&mut self, row: &WorkerSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.elevator_id.to_string(),
            row.served.to_string(),
            row.floors_travelled.to_string(),
            row.final_floor.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
