//! One-call driver for the reference topology: a producer thread feeding a
//! started pool, then a full drain and shutdown.

use std::sync::Arc;
use std::thread;

use lift_core::DispatchConfig;
use tracing::info;

use crate::source::{FeedReport, RequestSource, feed};
use crate::{BuildingBuilder, EventSink, RunSummary, SimError, SimResult};

/// Everything a finished run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub feed:    FeedReport,
    pub summary: RunSummary,
}

/// Run a complete simulation.
///
/// 1. Build the pool from `config` and start every elevator.
/// 2. Feed `source` on a dedicated producer thread, pacing submissions by
///    `config.submit_interval()`; the producer closes the building when
///    the source is exhausted.
/// 3. Wait for the producer, then [`stop_all`][crate::Building::stop_all],
///    which returns once every queued request has been served.
pub fn run<S: RequestSource>(
    config: &DispatchConfig,
    mut source: S,
    sink: Arc<dyn EventSink>,
) -> SimResult<RunOutcome> {
    config.validate()?;

    let mut building = BuildingBuilder::from_config(config).sink(sink).build()?;
    building.start_all()?;

    let submitter = building.submitter();
    let pacing = config.submit_interval();
    let feed_result = thread::scope(|s| {
        s.spawn(|| feed(&mut source, &submitter, pacing)).join()
    });

    let feed = match feed_result {
        Ok(report) => report,
        Err(_) => {
            // Workers must still exit; the panic is reported after they do.
            building.close_for_new_requests();
            building.stop_all()?;
            return Err(SimError::ProducerPanicked);
        }
    };
    info!(
        submitted = feed.submitted.len(),
        rejected = feed.rejected,
        "request source exhausted"
    );

    let summary = building.stop_all()?;
    info!(served = summary.served(), "simulation completed");
    Ok(RunOutcome { feed, summary })
}
