//! Simulation configuration.
//!
//! All parameters are plain numbers accepted at construction time.  The
//! defaults reproduce the reference scenario: two elevators in a ten-floor
//! building serving ten requests, 200 ms per floor, one request per second.

use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Top-level configuration for one simulation run.
///
/// Typically built in code or loaded from a JSON file by the application
/// crate (with the `serde` feature) and passed to the run driver.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Number of elevator workers in the pool.  Must be at least 1.
    pub pool_size: usize,

    /// Highest floor; requests are generated in `[1, floor_count]`.
    /// Must be at least 2 so a request can have distinct endpoints.
    pub floor_count: u32,

    /// How many requests the generator submits before closing the queue.
    pub request_count: usize,

    /// Simulated travel time per floor, in milliseconds.
    pub transit_delay_ms: u64,

    /// Producer pacing between submissions, in milliseconds.
    pub submit_interval_ms: u64,

    /// RNG seed for request generation.  `None` seeds from OS entropy, so
    /// every run differs.
    pub seed: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            pool_size:          2,
            floor_count:        10,
            request_count:      10,
            transit_delay_ms:   200,
            submit_interval_ms: 1_000,
            seed:               None,
        }
    }
}

impl DispatchConfig {
    /// Check the invariants the pool and the request generator rely on.
    pub fn validate(&self) -> CoreResult<()> {
        if self.pool_size == 0 {
            return Err(CoreError::Config("pool_size must be at least 1".into()));
        }
        if self.floor_count < 2 {
            return Err(CoreError::Config(format!(
                "floor_count must be at least 2, got {}",
                self.floor_count
            )));
        }
        if i32::try_from(self.floor_count).is_err() {
            return Err(CoreError::Config(format!(
                "floor_count {} does not fit a floor number",
                self.floor_count
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn transit_delay(&self) -> Duration {
        Duration::from_millis(self.transit_delay_ms)
    }

    #[inline]
    pub fn submit_interval(&self) -> Duration {
        Duration::from_millis(self.submit_interval_ms)
    }
}
