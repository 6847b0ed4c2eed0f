//! Plain data row types written by output backends.

use lift_core::ElevatorEvent;
use lift_sim::WorkerReport;

/// One elevator event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRow {
    pub elevator_id: u32,
    pub request_id:  u32,
    /// `passing_floor`, `pickup`, `dropoff` or `completed`.
    pub kind:        &'static str,
    /// Set for every kind except `completed`.
    pub floor:       Option<i32>,
    /// Set for `completed` only.
    pub elapsed_ms:  Option<u64>,
    /// Milliseconds since the recorder was created.
    pub at_ms:       u64,
}

impl EventRow {
    pub fn from_event(event: &ElevatorEvent, at_ms: u64) -> Self {
        Self {
            elevator_id: event.elevator.0,
            request_id:  event.request.0,
            kind:        event.kind.name(),
            floor:       event.floor().map(|f| f.0),
            elapsed_ms:  event.elapsed_ms(),
            at_ms,
        }
    }
}

/// Totals for one elevator at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummaryRow {
    pub elevator_id:      u32,
    pub served:           u64,
    pub floors_travelled: u64,
    pub final_floor:      i32,
}

impl From<&WorkerReport> for WorkerSummaryRow {
    fn from(report: &WorkerReport) -> Self {
        Self {
            elevator_id:      report.elevator.0,
            served:           u64::try_from(report.served).unwrap_or(u64::MAX),
            floors_travelled: report.floors_travelled,
            final_floor:      report.final_floor.0,
        }
    }
}
