//! A single pickup/drop-off request.

use std::time::{Duration, Instant};

use crate::{CoreError, CoreResult, Floor, RequestId};

/// One unit of work: carry a passenger from `source` to `destination`.
///
/// Immutable once created.  Owned by the request queue until a worker
/// dequeues it, then exclusively by that worker until it completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub id:           RequestId,
    pub source:       Floor,
    pub destination:  Floor,
    /// When the request entered the system; `Completed` events report the
    /// time elapsed since this instant.
    pub submitted_at: Instant,
}

impl Request {
    /// Create a request stamped with the current time.
    ///
    /// Rejects `source == destination` with [`CoreError::SameFloor`].
    pub fn new(id: RequestId, source: Floor, destination: Floor) -> CoreResult<Self> {
        Self::submitted_at(id, source, destination, Instant::now())
    }

    /// Create a request with an explicit submission instant.
    pub fn submitted_at(
        id:           RequestId,
        source:       Floor,
        destination:  Floor,
        submitted_at: Instant,
    ) -> CoreResult<Self> {
        if source == destination {
            return Err(CoreError::SameFloor(source));
        }
        Ok(Self { id, source, destination, submitted_at })
    }

    /// Wall time since the request was submitted.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.submitted_at.elapsed()
    }
}
