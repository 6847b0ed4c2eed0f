//! Elevator workers: the per-request cab state machine and the thread that
//! drives it.
//!
//! # Per-request state machine
//!
//! ```text
//! Idle ─▶ MovingToPickup(src) ─▶ AtPickup ─▶ MovingToDropoff(dst) ─▶ AtDropoff ─▶ Idle
//!              │ PassingFloor*        │ Pickup       │ PassingFloor*       │ Dropoff, Completed
//! ```
//!
//! A [`Cab`] owns the elevator's position and is moved onto the worker thread
//! at start, so `current_floor` has exactly one writer and needs no lock.
//! [`ElevatorWorker`] is the handle the building keeps: it spawns the thread
//! once and joins it once.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use lift_core::{ElevatorEvent, ElevatorId, EventKind, Floor, Request, RequestId};
use tracing::{debug, info, warn};

use crate::queue::{Next, RequestQueue};
use crate::{EventSink, SimError, SimResult};

// ── CabPhase ──────────────────────────────────────────────────────────────────

/// Where a cab is in serving its current request.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum CabPhase {
    #[default]
    Idle,
    MovingToPickup(Floor),
    AtPickup,
    MovingToDropoff(Floor),
    AtDropoff,
}

// ── WorkerReport ──────────────────────────────────────────────────────────────

/// Totals for one elevator, produced when its worker thread exits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerReport {
    pub elevator:         ElevatorId,
    /// Requests carried to completion.
    pub served:           usize,
    /// Floors stepped across all requests.
    pub floors_travelled: u64,
    pub final_floor:      Floor,
}

// ── Cab ───────────────────────────────────────────────────────────────────────

/// One simulated elevator car.
pub struct Cab {
    id:               ElevatorId,
    floor:            Floor,
    phase:            CabPhase,
    transit_delay:    Duration,
    sink:             Arc<dyn EventSink>,
    served:           usize,
    floors_travelled: u64,
}

impl Cab {
    /// A cab parked at [`Floor::GROUND`].
    pub fn new(id: ElevatorId, transit_delay: Duration, sink: Arc<dyn EventSink>) -> Self {
        Self {
            id,
            floor: Floor::GROUND,
            phase: CabPhase::Idle,
            transit_delay,
            sink,
            served: 0,
            floors_travelled: 0,
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn phase(&self) -> CabPhase {
        self.phase
    }

    /// Step one floor at a time toward `target`, waiting `transit_delay`
    /// before each step and emitting `PassingFloor` for each floor reached.
    ///
    /// No-op when already at `target`.  The target is not clamped to the
    /// building's floor range.
    pub fn move_to(&mut self, request: RequestId, target: Floor) {
        let floors = self.floor.distance_to(target);
        for _ in 0..floors {
            if !self.transit_delay.is_zero() {
                thread::sleep(self.transit_delay);
            }
            self.floor = self.floor.step_toward(target);
            self.floors_travelled += 1;
            self.emit(request, EventKind::PassingFloor(self.floor));
        }
    }

    /// Serve `request` from pickup to drop-off.
    pub fn process(&mut self, request: &Request) {
        self.phase = CabPhase::MovingToPickup(request.source);
        self.move_to(request.id, request.source);
        self.phase = CabPhase::AtPickup;
        self.emit(request.id, EventKind::Pickup(request.source));

        self.phase = CabPhase::MovingToDropoff(request.destination);
        self.move_to(request.id, request.destination);
        self.phase = CabPhase::AtDropoff;
        self.emit(request.id, EventKind::Dropoff(request.destination));

        self.emit(request.id, EventKind::Completed { elapsed: request.elapsed() });
        self.served += 1;
        self.phase = CabPhase::Idle;
    }

    /// Serve requests from `queue` until it reports [`Next::Shutdown`].
    ///
    /// This is the only way the loop ends: a cab never stops on a count or a
    /// timeout, and a request already dequeued always runs to completion.
    pub fn run(mut self, queue: &RequestQueue) -> WorkerReport {
        while let Next::Request(request) = queue.wait_for_next() {
            self.process(&request);
        }
        self.report()
    }

    pub fn report(&self) -> WorkerReport {
        WorkerReport {
            elevator:         self.id,
            served:           self.served,
            floors_travelled: self.floors_travelled,
            final_floor:      self.floor,
        }
    }

    fn emit(&self, request: RequestId, kind: EventKind) {
        self.sink.on_event(&ElevatorEvent::new(self.id, request, kind));
    }
}

// ── ElevatorWorker ────────────────────────────────────────────────────────────

/// Owner-side handle for one elevator's worker thread.
///
/// # Shutdown
///
/// [`stop`][Self::stop] closes the *shared* queue before joining, so stopping
/// any one worker begins shutdown for the whole pool.  Each worker still has
/// to be stopped (joined) individually to know it has exited.
pub struct ElevatorWorker {
    id:            ElevatorId,
    queue:         Arc<RequestQueue>,
    sink:          Arc<dyn EventSink>,
    transit_delay: Duration,
    handle:        Option<JoinHandle<WorkerReport>>,
    started:       bool,
    panicked:      bool,
    report:        Option<WorkerReport>,
}

impl ElevatorWorker {
    pub fn new(
        id:            ElevatorId,
        queue:         Arc<RequestQueue>,
        sink:          Arc<dyn EventSink>,
        transit_delay: Duration,
    ) -> Self {
        Self {
            id,
            queue,
            sink,
            transit_delay,
            handle:   None,
            started:  false,
            panicked: false,
            report:   None,
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    /// Spawn the worker thread.  Fails with [`SimError::AlreadyStarted`] if
    /// this worker has been started before.
    pub fn start(&mut self) -> SimResult<()> {
        if self.started {
            return Err(SimError::AlreadyStarted(self.id));
        }

        let id = self.id;
        let cab = Cab::new(id, self.transit_delay, Arc::clone(&self.sink));
        let queue = Arc::clone(&self.queue);
        let sink = Arc::clone(&self.sink);

        let handle = thread::Builder::new()
            .name(format!("elevator-{}", id.0))
            .spawn(move || {
                sink.on_worker_started(id);
                let report = cab.run(&queue);
                sink.on_worker_stopped(&report);
                report
            })
            .map_err(|e| SimError::Spawn(id, e))?;

        debug!(elevator = %id, "worker started");
        self.started = true;
        self.handle = Some(handle);
        Ok(())
    }

    /// Close the shared queue and wait for this worker's thread to exit.
    ///
    /// Requests still queued are drained by the pool before any worker exits.
    /// Calling `stop` again, or on a worker that never started, only closes
    /// the queue.  A worker whose thread panicked keeps reporting
    /// [`SimError::WorkerPanicked`] on every later call.
    pub fn stop(&mut self) -> SimResult<()> {
        if self.queue.close_for_new_requests() {
            info!(elevator = %self.id, "building closed for new requests");
        }
        self.join()
    }

    /// `true` while the worker thread is alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// The exit report, available once [`stop`][Self::stop] has joined the
    /// thread.
    pub fn report(&self) -> Option<&WorkerReport> {
        self.report.as_ref()
    }

    fn join(&mut self) -> SimResult<()> {
        let Some(handle) = self.handle.take() else {
            return if self.panicked {
                Err(SimError::WorkerPanicked(self.id))
            } else {
                Ok(())
            };
        };
        match handle.join() {
            Ok(report) => {
                debug!(elevator = %self.id, served = report.served, "worker joined");
                self.report = Some(report);
                Ok(())
            }
            Err(_) => {
                self.panicked = true;
                Err(SimError::WorkerPanicked(self.id))
            }
        }
    }
}

impl Drop for ElevatorWorker {
    /// A running worker is never detached: dropping it shuts the queue and
    /// joins the thread.
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.stop() {
                warn!(elevator = %self.id, error = %e, "worker did not stop cleanly on drop");
            }
        }
    }
}
