//! The `Building`: owner of the request queue and the elevator pool.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use lift_core::{ElevatorId, Floor, Request, RequestId};
use tracing::{info, warn};

use crate::queue::RequestQueue;
use crate::worker::{ElevatorWorker, WorkerReport};
use crate::{SimError, SimResult};

// ── Submitter ─────────────────────────────────────────────────────────────────

/// Cloneable submission handle for producer threads.
///
/// Request ids come from one counter shared by every clone, so they are
/// unique per building and increase in submission order for any single
/// producer.  An id consumed by a rejected submission is not reused.
#[derive(Clone)]
pub struct Submitter {
    queue:   Arc<RequestQueue>,
    next_id: Arc<AtomicU32>,
}

impl Submitter {
    /// Stamp a new request and append it to the queue.
    ///
    /// # Errors
    /// - [`SimError::Core`] (`SameFloor`) when `source == destination`.
    /// - [`SimError::Closed`] after the building stopped accepting requests.
    pub fn submit(&self, source: Floor, destination: Floor) -> SimResult<RequestId> {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let request = Request::new(id, source, destination)?;
        self.queue.submit(request)?;
        Ok(id)
    }

    /// Signal that no further requests will arrive.  Idempotent; returns
    /// `true` only for the call that closed the queue.
    pub fn close_for_new_requests(&self) -> bool {
        self.queue.close_for_new_requests()
    }

    pub fn is_accepting(&self) -> bool {
        self.queue.is_accepting()
    }
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Per-elevator totals collected by [`Building::stop_all`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// One report per elevator, in pool order.
    pub reports: Vec<WorkerReport>,
}

impl RunSummary {
    /// Requests completed across the pool.
    pub fn served(&self) -> usize {
        self.reports.iter().map(|r| r.served).sum()
    }

    pub fn floors_travelled(&self) -> u64 {
        self.reports.iter().map(|r| r.floors_travelled).sum()
    }
}

// ── Building ──────────────────────────────────────────────────────────────────

/// Lifecycle authority for one simulation: owns the shared queue and every
/// elevator worker for their full lifetimes.
///
/// Create via [`BuildingBuilder`][crate::BuildingBuilder].
///
/// ```text
/// start_all ─▶ submit* ─▶ close_for_new_requests ─▶ stop_all
/// ```
pub struct Building {
    floor_count: u32,
    queue:       Arc<RequestQueue>,
    submitter:   Submitter,
    workers:     Vec<ElevatorWorker>,
    started:     bool,
}

impl Building {
    pub(crate) fn new(floor_count: u32, queue: Arc<RequestQueue>, workers: Vec<ElevatorWorker>) -> Self {
        let submitter = Submitter {
            queue:   Arc::clone(&queue),
            next_id: Arc::new(AtomicU32::new(0)),
        };
        Self {
            floor_count,
            queue,
            submitter,
            workers,
            started: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start every elevator.  A second call does nothing.
    ///
    /// If any worker fails to start, the building is shut down: the queue is
    /// closed, every worker already running is joined, and the error is
    /// returned.  The building stays unstarted, so a later `start_all`
    /// reports the failure again instead of being ignored.
    pub fn start_all(&mut self) -> SimResult<()> {
        if self.started {
            warn!("start_all called on a running building; ignoring");
            return Ok(());
        }
        if let Some(e) = self.workers.iter_mut().find_map(|w| w.start().err()) {
            warn!(error = %e, "elevator failed to start; shutting the building down");
            for worker in &mut self.workers {
                if let Err(stop_err) = worker.stop() {
                    warn!(elevator = %worker.id(), error = %stop_err, "worker did not stop cleanly");
                }
            }
            return Err(e);
        }
        self.started = true;
        info!(elevators = self.workers.len(), floors = self.floor_count, "building started");
        Ok(())
    }

    /// Stop every elevator and wait for all of them to exit.
    ///
    /// The first `stop` closes the shared queue for the whole pool, so the
    /// order in which workers are stopped does not matter.  Every worker is
    /// joined even if an earlier one panicked; the first failure is returned
    /// afterwards.  Calling this again returns the same result: the same
    /// summary after a clean stop, or `WorkerPanicked` again when a worker
    /// panicked.
    pub fn stop_all(&mut self) -> SimResult<RunSummary> {
        let mut first_err: Option<SimError> = None;
        for worker in &mut self.workers {
            if let Err(e) = worker.stop() {
                warn!(elevator = %worker.id(), error = %e, "worker did not stop cleanly");
                first_err.get_or_insert(e);
            }
        }
        if let Some(e) = first_err {
            return Err(e);
        }

        let summary = RunSummary {
            reports: self.workers.iter().filter_map(|w| w.report().cloned()).collect(),
        };
        info!(
            served = summary.served(),
            floors_travelled = summary.floors_travelled(),
            "building stopped"
        );
        Ok(summary)
    }

    // ── Submission ────────────────────────────────────────────────────────

    /// Submit a request from `source` to `destination`.
    ///
    /// Floors must lie in `[1, floor_count]`; this is the caller's contract
    /// and is not checked here.  See [`Submitter::submit`] for errors.
    pub fn submit(&self, source: Floor, destination: Floor) -> SimResult<RequestId> {
        self.submitter.submit(source, destination)
    }

    /// Signal that no further requests will arrive.
    pub fn close_for_new_requests(&self) -> bool {
        self.queue.close_for_new_requests()
    }

    /// A submission handle that can be moved to a producer thread.
    pub fn submitter(&self) -> Submitter {
        self.submitter.clone()
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn floor_count(&self) -> u32 {
        self.floor_count
    }

    pub fn pool_size(&self) -> usize {
        self.workers.len()
    }

    pub fn elevator_ids(&self) -> impl Iterator<Item = ElevatorId> + '_ {
        self.workers.iter().map(ElevatorWorker::id)
    }

    pub fn is_accepting(&self) -> bool {
        self.queue.is_accepting()
    }

    /// Requests waiting for an elevator.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Number of worker threads still alive.
    pub fn running_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.is_running()).count()
    }

    pub fn workers(&self) -> &[ElevatorWorker] {
        &self.workers
    }

    /// Mutable access to one worker, e.g. to stop it individually.
    pub fn worker_mut(&mut self, id: ElevatorId) -> Option<&mut ElevatorWorker> {
        self.workers.get_mut(id.index())
    }
}
