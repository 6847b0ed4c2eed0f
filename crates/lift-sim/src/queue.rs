//! `RequestQueue` — the FIFO shared between the producer and every elevator.
//!
//! # Protocol
//!
//! ```text
//! submit(r)               push_back, notify_one      (rejected once closed)
//! wait_for_next()         block until non-empty → pop_front
//!                                 or closed && empty → Shutdown
//! close_for_new_requests  accepting = false, notify_all   (one-way, idempotent)
//! ```
//!
//! Pending requests win over the shutdown flag, so the pool drains whatever
//! was submitted before close before any worker observes `Shutdown`.
//!
//! One mutex guards both the sequence and the flag; a single condition
//! variable carries both "work arrived" and "closed" wake-ups.  Waiters
//! re-check the predicate in a loop, which also covers spurious wake-ups.

use std::collections::VecDeque;

use lift_core::Request;
use parking_lot::{Condvar, Mutex};

use crate::{SimError, SimResult};

/// Result of [`RequestQueue::wait_for_next`].
#[derive(Debug)]
pub enum Next {
    /// The head request, now owned exclusively by the caller.
    Request(Request),
    /// The queue is closed and empty: no more work will ever arrive.
    Shutdown,
}

struct QueueState {
    pending:   VecDeque<Request>,
    accepting: bool,
}

/// Thread-safe FIFO with blocking dequeue and a one-way shutdown flag.
pub struct RequestQueue {
    state: Mutex<QueueState>,
    ready: Condvar,
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending:   VecDeque::new(),
                accepting: true,
            }),
            ready: Condvar::new(),
        }
    }

    /// Append `request` to the tail and wake one blocked consumer.
    ///
    /// Returns [`SimError::Closed`] once [`close_for_new_requests`] has been
    /// called; the request is dropped by the caller, never queued.
    ///
    /// [`close_for_new_requests`]: Self::close_for_new_requests
    pub fn submit(&self, request: Request) -> SimResult<()> {
        {
            let mut state = self.state.lock();
            if !state.accepting {
                return Err(SimError::Closed);
            }
            state.pending.push_back(request);
        }
        self.ready.notify_one();
        Ok(())
    }

    /// Block until a request is available or the queue is closed and empty.
    pub fn wait_for_next(&self) -> Next {
        let mut state = self.state.lock();
        loop {
            if let Some(request) = state.pending.pop_front() {
                return Next::Request(request);
            }
            if !state.accepting {
                return Next::Shutdown;
            }
            self.ready.wait(&mut state);
        }
    }

    /// Stop accepting requests and wake every blocked consumer.
    ///
    /// Returns `true` only for the call that performed the transition;
    /// later calls change nothing.
    pub fn close_for_new_requests(&self) -> bool {
        {
            let mut state = self.state.lock();
            if !state.accepting {
                return false;
            }
            state.accepting = false;
        }
        self.ready.notify_all();
        true
    }

    pub fn is_accepting(&self) -> bool {
        self.state.lock().accepting
    }

    /// Requests submitted but not yet claimed by a worker.
    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().pending.is_empty()
    }
}
