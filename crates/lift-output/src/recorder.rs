//! `RecordingSink<W>` — bridges `EventSink` to an `OutputWriter`.

use std::time::Instant;

use lift_core::{ElevatorEvent, ElevatorId};
use lift_sim::{EventSink, WorkerReport};
use parking_lot::Mutex;

use crate::row::{EventRow, WorkerSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

struct Inner<W> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> Inner<W> {
    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

/// An [`EventSink`] that writes every elevator event, plus one summary row
/// per stopped elevator, to any [`OutputWriter`] backend.
///
/// Elevator threads share the sink, so the writer sits behind a mutex.
/// Errors from the writer are stored internally because `EventSink` methods
/// have no return value. After the run, call [`finish`][Self::finish] and
/// check [`take_error`][Self::take_error].
pub struct RecordingSink<W: OutputWriter + Send> {
    inner:   Mutex<Inner<W>>,
    started: Instant,
}

impl<W: OutputWriter + Send> RecordingSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner:   Mutex::new(Inner { writer, last_error: None }),
            started: Instant::now(),
        }
    }

    /// Flush the writer. Idempotent.
    pub fn finish(&self) -> OutputResult<()> {
        self.inner.lock().writer.finish()
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&self) -> Option<OutputError> {
        self.inner.lock().last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.inner.into_inner().writer
    }

    fn at_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl<W: OutputWriter + Send> EventSink for RecordingSink<W> {
    fn on_event(&self, event: &ElevatorEvent) {
        let row = EventRow::from_event(event, self.at_ms());
        let mut inner = self.inner.lock();
        let result = inner.writer.write_event(&row);
        inner.store_err(result);
    }

    fn on_worker_started(&self, _elevator: ElevatorId) {}

    fn on_worker_stopped(&self, report: &WorkerReport) {
        let row = WorkerSummaryRow::from(report);
        let mut inner = self.inner.lock();
        let result = inner.writer.write_worker_summary(&row);
        inner.store_err(result);
    }
}
