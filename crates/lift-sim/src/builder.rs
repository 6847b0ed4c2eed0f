//! Fluent builder for constructing a [`Building`].

use std::sync::Arc;
use std::time::Duration;

use lift_core::{DispatchConfig, ElevatorId};

use crate::queue::RequestQueue;
use crate::worker::ElevatorWorker;
use crate::{Building, EventSink, NoopSink, SimError, SimResult};

/// Default simulated travel time per floor.
pub const DEFAULT_TRANSIT_DELAY: Duration = Duration::from_millis(200);

/// Fluent builder for [`Building`].
///
/// # Required inputs
///
/// - `pool_size` — number of elevators (at least 1)
/// - `floor_count` — highest floor (at least 2)
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                     |
/// |-----------------------|-----------------------------|
/// | `.transit_delay(d)`   | 200 ms per floor            |
/// | `.sink(s)`            | [`NoopSink`]                |
///
/// # Example
///
/// ```rust,ignore
/// let mut building = BuildingBuilder::new(2, 10)
///     .transit_delay(Duration::from_millis(50))
///     .sink(Arc::new(TracingSink))
///     .build()?;
/// building.start_all()?;
/// ```
pub struct BuildingBuilder {
    pool_size:     usize,
    floor_count:   u32,
    transit_delay: Duration,
    sink:          Option<Arc<dyn EventSink>>,
}

impl BuildingBuilder {
    pub fn new(pool_size: usize, floor_count: u32) -> Self {
        Self {
            pool_size,
            floor_count,
            transit_delay: DEFAULT_TRANSIT_DELAY,
            sink:          None,
        }
    }

    /// Take pool size, floor count and transit delay from `config`.
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.pool_size, config.floor_count).transit_delay(config.transit_delay())
    }

    /// Simulated travel time per floor.  `Duration::ZERO` moves instantly.
    pub fn transit_delay(mut self, delay: Duration) -> Self {
        self.transit_delay = delay;
        self
    }

    /// The sink every elevator reports its events to.
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Validate inputs, create the shared queue and one idle worker per
    /// elevator, and return a building ready for
    /// [`start_all`][Building::start_all].
    pub fn build(self) -> SimResult<Building> {
        if self.pool_size == 0 {
            return Err(SimError::Config("pool_size must be at least 1".into()));
        }
        if self.floor_count < 2 {
            return Err(SimError::Config(format!(
                "floor_count must be at least 2, got {}",
                self.floor_count
            )));
        }

        let sink = self.sink.unwrap_or_else(|| Arc::new(NoopSink));
        let queue = Arc::new(RequestQueue::new());

        let workers = (0..self.pool_size)
            .map(|i| {
                let id = ElevatorId::try_from(i)
                    .map_err(|_| SimError::Config(format!("pool_size {} is too large", self.pool_size)))?;
                Ok(ElevatorWorker::new(id, Arc::clone(&queue), Arc::clone(&sink), self.transit_delay))
            })
            .collect::<SimResult<Vec<_>>>()?;

        Ok(Building::new(self.floor_count, queue, workers))
    }
}
