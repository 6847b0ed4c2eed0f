//! `lift-sim` — the concurrency core of the lift_sim elevator dispatch
//! simulation.
//!
//! # Shared-queue protocol
//!
//! ```text
//! RequestSource ─▶ feed ─▶ Submitter::submit ─▶ RequestQueue ─┬─▶ elevator-0 ─┐
//!                                                             ├─▶ elevator-1 ─┼─▶ EventSink
//!                                                             └─▶ elevator-N ─┘
//! ```
//!
//! - One producer appends to a single FIFO; N worker threads block on it.
//!   Whichever idle worker wakes first claims the head request.  There is no
//!   dispatch optimisation: first come, first served.
//! - Each worker runs the cab state machine for one request at a time:
//!   move to pickup, pick up, move to drop-off, drop off, complete.
//! - Shutdown is two-phase: `close_for_new_requests` flips a one-way flag
//!   and wakes every waiter; workers keep draining until the queue is empty
//!   and only then observe `Shutdown`.  `stop_all` joins every thread.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_core::Floor;
//! use lift_sim::{BuildingBuilder, TracingSink};
//!
//! let mut building = BuildingBuilder::new(2, 10)
//!     .sink(Arc::new(TracingSink))
//!     .build()?;
//! building.start_all()?;
//! building.submit(Floor(3), Floor(7))?;
//! building.close_for_new_requests();
//! let summary = building.stop_all()?;
//! ```

pub mod builder;
pub mod building;
pub mod error;
pub mod queue;
pub mod runner;
pub mod sink;
pub mod source;
pub mod worker;

#[cfg(test)]
mod tests;

pub use builder::{BuildingBuilder, DEFAULT_TRANSIT_DELAY};
pub use building::{Building, RunSummary, Submitter};
pub use error::{SimError, SimResult};
pub use queue::{Next, RequestQueue};
pub use runner::{RunOutcome, run};
pub use sink::{EventSink, MemorySink, NoopSink, TracingSink};
pub use source::{FeedReport, RandomSource, RequestSource, ScriptedSource, feed};
pub use worker::{Cab, CabPhase, ElevatorWorker, WorkerReport};
