//! Request sources and the producer loop that feeds them to a building.

use std::collections::VecDeque;
use std::thread;
use std::time::Duration;

use lift_core::{DispatchConfig, Floor, RequestId, SimRng};
use tracing::{debug, warn};

use crate::Submitter;

/// A pluggable supplier of `(source, destination)` floor pairs.
///
/// Returning `None` means the source is exhausted; [`feed`] then closes the
/// building for new requests.  Sources are expected to produce pairs with
/// distinct floors inside the building's range; pairs that violate the
/// distinct-floor rule are rejected at submission.
pub trait RequestSource: Send {
    fn next_pair(&mut self) -> Option<(Floor, Floor)>;
}

// ── RandomSource ──────────────────────────────────────────────────────────────

/// `count` uniformly random pairs in `[1, floor_count]` with distinct floors.
pub struct RandomSource {
    rng:         SimRng,
    floor_count: i32,
    remaining:   usize,
}

impl RandomSource {
    /// A source of `count` pairs.  With `floor_count < 2` no distinct pair
    /// exists and the source is empty.
    pub fn new(floor_count: u32, count: usize, rng: SimRng) -> Self {
        let floor_count = i32::try_from(floor_count).unwrap_or(i32::MAX);
        let remaining = if floor_count < 2 { 0 } else { count };
        Self { rng, floor_count, remaining }
    }

    /// `request_count` pairs over `floor_count` floors, seeded from
    /// `config.seed` (entropy when `None`).
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(
            config.floor_count,
            config.request_count,
            SimRng::from_seed_option(config.seed),
        )
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl RequestSource for RandomSource {
    fn next_pair(&mut self) -> Option<(Floor, Floor)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let source = self.rng.gen_range(1..=self.floor_count);
        let mut destination = self.rng.gen_range(1..=self.floor_count);
        while destination == source {
            destination = self.rng.gen_range(1..=self.floor_count);
        }
        Some((Floor(source), Floor(destination)))
    }
}

// ── ScriptedSource ────────────────────────────────────────────────────────────

/// Replays a fixed list of pairs in order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    pairs: VecDeque<(Floor, Floor)>,
}

impl ScriptedSource {
    pub fn new(pairs: impl IntoIterator<Item = (Floor, Floor)>) -> Self {
        Self { pairs: pairs.into_iter().collect() }
    }

    /// Convenience for raw floor numbers: `ScriptedSource::floors([(3, 7), (9, 1)])`.
    pub fn floors(pairs: impl IntoIterator<Item = (i32, i32)>) -> Self {
        Self::new(pairs.into_iter().map(|(s, d)| (Floor(s), Floor(d))))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl RequestSource for ScriptedSource {
    fn next_pair(&mut self) -> Option<(Floor, Floor)> {
        self.pairs.pop_front()
    }
}

// ── feed ──────────────────────────────────────────────────────────────────────

/// What the producer loop did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedReport {
    /// Ids of accepted requests, in submission order.
    pub submitted: Vec<RequestId>,
    /// Pairs refused at the submission boundary.
    pub rejected:  usize,
}

/// Drain `source` into the building, sleeping `pacing` after each
/// submission, then close the building for new requests.
///
/// Rejected pairs are logged and counted, never queued.  The close at the
/// end happens exactly once from here regardless of how many pairs were
/// rejected.
pub fn feed<S: RequestSource + ?Sized>(
    source:    &mut S,
    submitter: &Submitter,
    pacing:    Duration,
) -> FeedReport {
    let mut report = FeedReport::default();

    while let Some((from, to)) = source.next_pair() {
        match submitter.submit(from, to) {
            Ok(id) => {
                debug!(request = %id, source = from.0, destination = to.0, "request submitted");
                report.submitted.push(id);
            }
            Err(e) => {
                warn!(source = from.0, destination = to.0, error = %e, "request rejected");
                report.rejected += 1;
            }
        }
        if !pacing.is_zero() {
            thread::sleep(pacing);
        }
    }

    submitter.close_for_new_requests();
    report
}
