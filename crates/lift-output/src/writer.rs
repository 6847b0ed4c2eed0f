//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult, WorkerSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned to the caller; [`RecordingSink`][crate::RecordingSink]
/// stores the first one for retrieval with `take_error`.
pub trait OutputWriter {
    /// Append one event row.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Append one per-elevator summary row.
    fn write_worker_summary(&mut self, row: &WorkerSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
