//! `lift-output` — event-log writers for the lift_sim elevator simulation.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created                                        |
//! |-----------|-------------|------------------------------------------------------|
//! | *(none)*  | CSV         | `elevator_events.csv`, `worker_summaries.csv`        |
//! | `sqlite`  | SQLite      | `events.db`                                          |
//!
//! Both implement [`OutputWriter`] and are driven by [`RecordingSink`],
//! which implements `lift_sim::EventSink`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lift_output::{CsvWriter, RecordingSink};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let sink = Arc::new(RecordingSink::new(writer));
//! let outcome = lift_sim::run(&config, source, sink.clone())?;
//! sink.finish()?;
//! sink.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod recorder;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use recorder::RecordingSink;
pub use row::{EventRow, WorkerSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
