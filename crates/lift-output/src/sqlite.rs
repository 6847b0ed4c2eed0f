//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `events.db` file in the configured output directory with
//! two tables: `elevator_events` and `worker_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{EventRow, OutputResult, WorkerSummaryRow};
use crate::writer::OutputWriter;

/// SQLite integers are signed; clamp instead of wrapping.
fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Writes the event log to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `events.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("events.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS elevator_events (
                 elevator_id INTEGER NOT NULL,
                 request_id  INTEGER NOT NULL,
                 kind        TEXT    NOT NULL,
                 floor       INTEGER,
                 elapsed_ms  INTEGER,
                 at_ms       INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS worker_summaries (
                 elevator_id      INTEGER PRIMARY KEY,
                 served           INTEGER NOT NULL,
                 floors_travelled INTEGER NOT NULL,
                 final_floor      INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO elevator_events \
             (elevator_id, request_id, kind, floor, elapsed_ms, at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        stmt.execute(rusqlite::params![
            row.elevator_id,
            row.request_id,
            row.kind,
            row.floor,
            row.elapsed_ms.map(saturating_i64),
            saturating_i64(row.at_ms),
        ])?;
        Ok(())
    }

    fn write_worker_summary(&mut self, row: &WorkerSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO worker_summaries \
             (elevator_id, served, floors_travelled, final_floor) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                row.elevator_id,
                saturating_i64(row.served),
                saturating_i64(row.floors_travelled),
                row.final_floor,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
