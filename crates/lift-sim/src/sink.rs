//! Event sink trait for logging and data collection.

use std::sync::Arc;

use lift_core::{ElevatorEvent, ElevatorId, EventKind, RequestId};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::WorkerReport;

/// Callbacks invoked by elevator workers as they serve requests.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Thread safety
///
/// One sink is shared by every worker in a building (as an
/// `Arc<dyn EventSink>`), and each worker calls it from its own thread.
/// Events from one elevator arrive in the order that elevator emitted them;
/// there is no ordering across elevators.
///
/// # Example — completion counter
///
/// ```rust,ignore
/// struct Completions(AtomicUsize);
///
/// impl EventSink for Completions {
///     fn on_event(&self, event: &ElevatorEvent) {
///         if event.is_completion() {
///             self.0.fetch_add(1, Ordering::Relaxed);
///         }
///     }
/// }
/// ```
pub trait EventSink: Send + Sync {
    /// Called for every passing-floor, pickup, drop-off and completion.
    fn on_event(&self, _event: &ElevatorEvent) {}

    /// Called on the worker thread right after it starts.
    fn on_worker_started(&self, _elevator: ElevatorId) {}

    /// Called on the worker thread just before it exits.
    fn on_worker_stopped(&self, _report: &WorkerReport) {}
}

/// An [`EventSink`] that does nothing.
pub struct NoopSink;

impl EventSink for NoopSink {}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn on_event(&self, event: &ElevatorEvent) {
        (**self).on_event(event);
    }

    fn on_worker_started(&self, elevator: ElevatorId) {
        (**self).on_worker_started(elevator);
    }

    fn on_worker_stopped(&self, report: &WorkerReport) {
        (**self).on_worker_stopped(report);
    }
}

/// Fan out to two sinks, `self.0` first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn on_event(&self, event: &ElevatorEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_worker_started(&self, elevator: ElevatorId) {
        self.0.on_worker_started(elevator);
        self.1.on_worker_started(elevator);
    }

    fn on_worker_stopped(&self, report: &WorkerReport) {
        self.0.on_worker_stopped(report);
        self.1.on_worker_stopped(report);
    }
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Emits every event as a structured `tracing` event.
///
/// Floor movement is logged at `debug`, pickups, drop-offs and completions
/// at `info`.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&self, event: &ElevatorEvent) {
        let elevator = event.elevator;
        let request = event.request;
        match event.kind {
            EventKind::PassingFloor(floor) => {
                debug!(%elevator, %request, floor = floor.0, "passing floor");
            }
            EventKind::Pickup(floor) => {
                info!(%elevator, %request, floor = floor.0, "pick up");
            }
            EventKind::Dropoff(floor) => {
                info!(%elevator, %request, floor = floor.0, "drop off");
            }
            EventKind::Completed { .. } => {
                let elapsed_ms = event.elapsed_ms().unwrap_or_default();
                info!(%elevator, %request, elapsed_ms, "request completed");
            }
        }
    }

    fn on_worker_started(&self, elevator: ElevatorId) {
        debug!(%elevator, "elevator online");
    }

    fn on_worker_stopped(&self, report: &WorkerReport) {
        info!(
            elevator = %report.elevator,
            served = report.served,
            floors_travelled = report.floors_travelled,
            final_floor = report.final_floor.0,
            "elevator offline"
        );
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// Collects every event and worker report in memory.
///
/// Intended for tests and small runs; the buffer grows without bound.
#[derive(Default)]
pub struct MemorySink {
    events:  Mutex<Vec<ElevatorEvent>>,
    reports: Mutex<Vec<WorkerReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far, in arrival order.
    pub fn events(&self) -> Vec<ElevatorEvent> {
        self.events.lock().clone()
    }

    /// Events emitted by one elevator, in the order it emitted them.
    pub fn events_for(&self, elevator: ElevatorId) -> Vec<ElevatorEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.elevator == elevator)
            .copied()
            .collect()
    }

    /// Ids of completed requests, in completion order.
    pub fn completed(&self) -> Vec<RequestId> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.is_completion())
            .map(|e| e.request)
            .collect()
    }

    /// Reports of workers that have exited, in exit order.
    pub fn reports(&self) -> Vec<WorkerReport> {
        self.reports.lock().clone()
    }
}

impl EventSink for MemorySink {
    fn on_event(&self, event: &ElevatorEvent) {
        self.events.lock().push(*event);
    }

    fn on_worker_stopped(&self, report: &WorkerReport) {
        self.reports.lock().push(report.clone());
    }
}
