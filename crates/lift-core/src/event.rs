//! Events emitted by elevator workers while serving requests.

use std::time::Duration;

use crate::{ElevatorId, Floor, RequestId};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// The cab reached `floor` while travelling (one per floor stepped).
    PassingFloor(Floor),
    /// The passenger boarded at `floor`.
    Pickup(Floor),
    /// The passenger left at `floor`.
    Dropoff(Floor),
    /// The request finished; `elapsed` is measured from submission.
    Completed { elapsed: Duration },
}

impl EventKind {
    /// Stable lower-case name used as the `kind` column by output writers.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PassingFloor(_) => "passing_floor",
            EventKind::Pickup(_)       => "pickup",
            EventKind::Dropoff(_)      => "dropoff",
            EventKind::Completed { .. } => "completed",
        }
    }
}

/// A structured event from one elevator about one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElevatorEvent {
    pub elevator: ElevatorId,
    pub request:  RequestId,
    pub kind:     EventKind,
}

impl ElevatorEvent {
    pub fn new(elevator: ElevatorId, request: RequestId, kind: EventKind) -> Self {
        Self { elevator, request, kind }
    }

    /// The floor this event refers to, if any.
    pub fn floor(&self) -> Option<Floor> {
        match self.kind {
            EventKind::PassingFloor(f) | EventKind::Pickup(f) | EventKind::Dropoff(f) => Some(f),
            EventKind::Completed { .. } => None,
        }
    }

    /// Milliseconds from submission to completion (`Completed` only).
    pub fn elapsed_ms(&self) -> Option<u64> {
        match self.kind {
            EventKind::Completed { elapsed } => {
                Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            }
            _ => None,
        }
    }

    #[inline]
    pub fn is_completion(&self) -> bool {
        matches!(self.kind, EventKind::Completed { .. })
    }
}
