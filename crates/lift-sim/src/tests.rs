//! Integration tests for lift-sim.

use std::sync::Arc;
use std::time::{Duration, Instant};

use lift_core::{ElevatorEvent, ElevatorId, EventKind, Floor, Request, RequestId};

use crate::{BuildingBuilder, Building, MemorySink};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn request(id: u32, source: i32, destination: i32) -> Request {
    Request::new(RequestId(id), Floor(source), Floor(destination)).unwrap()
}

/// A 10-floor building whose elevators move one floor per `delay_ms`.
fn building(pool_size: usize, delay_ms: u64, sink: &Arc<MemorySink>) -> Building {
    BuildingBuilder::new(pool_size, 10)
        .transit_delay(Duration::from_millis(delay_ms))
        .sink(sink.clone())
        .build()
        .unwrap()
}

fn kinds(events: &[ElevatorEvent]) -> Vec<EventKind> {
    events.iter().map(|e| e.kind).collect()
}

// ── RequestQueue ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod queue_tests {
    use std::thread;

    use super::*;
    use crate::{Next, RequestQueue, SimError};

    fn next_id(queue: &RequestQueue) -> Option<RequestId> {
        match queue.wait_for_next() {
            Next::Request(r) => Some(r.id),
            Next::Shutdown   => None,
        }
    }

    #[test]
    fn fifo_order() {
        let q = RequestQueue::new();
        q.submit(request(0, 1, 2)).unwrap();
        q.submit(request(1, 3, 4)).unwrap();
        q.submit(request(2, 5, 6)).unwrap();
        assert_eq!(q.len(), 3);
        assert_eq!(next_id(&q), Some(RequestId(0)));
        assert_eq!(next_id(&q), Some(RequestId(1)));
        assert_eq!(next_id(&q), Some(RequestId(2)));
        assert!(q.is_empty());
    }

    #[test]
    fn submit_after_close_is_rejected_and_not_queued() {
        let q = RequestQueue::new();
        q.close_for_new_requests();
        let err = q.submit(request(0, 1, 2)).unwrap_err();
        assert!(matches!(err, SimError::Closed));
        assert!(q.is_empty());
        assert_eq!(next_id(&q), None);
    }

    #[test]
    fn close_is_idempotent() {
        let q = RequestQueue::new();
        assert!(q.is_accepting());
        assert!(q.close_for_new_requests());
        assert!(!q.close_for_new_requests());
        assert!(!q.is_accepting());
        assert_eq!(next_id(&q), None);
        assert_eq!(next_id(&q), None, "shutdown is terminal");
    }

    #[test]
    fn pending_work_drains_before_shutdown() {
        let q = RequestQueue::new();
        q.submit(request(0, 1, 2)).unwrap();
        q.submit(request(1, 2, 3)).unwrap();
        q.close_for_new_requests();
        assert_eq!(next_id(&q), Some(RequestId(0)));
        assert_eq!(next_id(&q), Some(RequestId(1)));
        assert_eq!(next_id(&q), None);
    }

    #[test]
    fn submit_wakes_a_blocked_waiter() {
        let q = Arc::new(RequestQueue::new());
        let waiter = {
            let q = Arc::clone(&q);
            thread::spawn(move || next_id(&q))
        };
        thread::sleep(Duration::from_millis(20));
        q.submit(request(9, 4, 1)).unwrap();
        assert_eq!(waiter.join().unwrap(), Some(RequestId(9)));
    }

    #[test]
    fn close_wakes_every_blocked_waiter() {
        let q = Arc::new(RequestQueue::new());
        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || next_id(&q))
            })
            .collect();
        thread::sleep(Duration::from_millis(20));
        q.close_for_new_requests();
        for w in waiters {
            assert_eq!(w.join().unwrap(), None);
        }
    }

    #[test]
    fn concurrent_consumers_never_lose_or_duplicate() {
        const N: u32 = 500;
        let q = Arc::new(RequestQueue::new());
        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    let mut seen = vec![];
                    while let Some(id) = next_id(&q) {
                        seen.push(id.0);
                    }
                    seen
                })
            })
            .collect();

        for i in 0..N {
            q.submit(request(i, 1, 2)).unwrap();
        }
        q.close_for_new_requests();

        let mut all: Vec<u32> = consumers
            .into_iter()
            .flat_map(|c| c.join().unwrap())
            .collect();
        assert_eq!(all.len(), N as usize, "every request delivered exactly once");
        all.sort_unstable();
        assert_eq!(all, (0..N).collect::<Vec<_>>());
    }

    #[test]
    fn each_consumer_sees_fifo_subsequence() {
        let q = Arc::new(RequestQueue::new());
        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let q = Arc::clone(&q);
                thread::spawn(move || {
                    let mut seen = vec![];
                    while let Some(id) = next_id(&q) {
                        seen.push(id.0);
                    }
                    seen
                })
            })
            .collect();
        for i in 0..300 {
            q.submit(request(i, 2, 1)).unwrap();
        }
        q.close_for_new_requests();
        for c in consumers {
            let seen = c.join().unwrap();
            assert!(seen.windows(2).all(|w| w[0] < w[1]), "claims out of order: {seen:?}");
        }
    }
}

// ── Cab state machine ─────────────────────────────────────────────────────────

#[cfg(test)]
mod cab_tests {
    use super::*;
    use crate::{Cab, CabPhase};

    fn cab(sink: &Arc<MemorySink>, delay: Duration) -> Cab {
        Cab::new(ElevatorId(0), delay, sink.clone())
    }

    #[test]
    fn starts_idle_at_ground() {
        let sink = Arc::new(MemorySink::new());
        let c = cab(&sink, Duration::ZERO);
        assert_eq!(c.floor(), Floor::GROUND);
        assert_eq!(c.phase(), CabPhase::Idle);
    }

    #[test]
    fn three_to_seven_from_ground() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::ZERO);
        c.process(&request(0, 3, 7));

        let ks = kinds(&sink.events());
        assert_eq!(ks.len(), 9);
        assert_eq!(
            &ks[..8],
            &[
                EventKind::PassingFloor(Floor(2)),
                EventKind::PassingFloor(Floor(3)),
                EventKind::Pickup(Floor(3)),
                EventKind::PassingFloor(Floor(4)),
                EventKind::PassingFloor(Floor(5)),
                EventKind::PassingFloor(Floor(6)),
                EventKind::PassingFloor(Floor(7)),
                EventKind::Dropoff(Floor(7)),
            ]
        );
        assert!(matches!(ks[8], EventKind::Completed { .. }));
        assert_eq!(c.floor(), Floor(7));
        assert_eq!(c.phase(), CabPhase::Idle);
    }

    #[test]
    fn moves_down() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::ZERO);
        c.move_to(RequestId(0), Floor(4));
        c.move_to(RequestId(0), Floor(2));
        let floors: Vec<i32> = sink.events().iter().filter_map(|e| e.floor()).map(|f| f.0).collect();
        assert_eq!(floors, [2, 3, 4, 3, 2]);
    }

    #[test]
    fn move_to_current_floor_is_noop() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::from_millis(50));
        let t0 = Instant::now();
        c.move_to(RequestId(0), Floor::GROUND);
        assert!(sink.events().is_empty());
        assert!(t0.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn pickup_at_current_floor_emits_no_travel_first() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::ZERO);
        c.process(&request(0, 1, 2));
        let ks = kinds(&sink.events());
        assert_eq!(ks[0], EventKind::Pickup(Floor(1)));
        assert_eq!(ks[1], EventKind::PassingFloor(Floor(2)));
        assert_eq!(ks[2], EventKind::Dropoff(Floor(2)));
    }

    #[test]
    fn transit_delay_applies_per_floor() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::from_millis(5));
        let t0 = Instant::now();
        c.move_to(RequestId(0), Floor(5));
        assert!(t0.elapsed() >= Duration::from_millis(20), "4 floors × 5 ms");
    }

    #[test]
    fn report_counts_requests_and_floors() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::ZERO);
        c.process(&request(0, 3, 7)); // 2 + 4 floors
        c.process(&request(1, 5, 1)); // 2 + 4 floors
        let report = c.report();
        assert_eq!(report.elevator, ElevatorId(0));
        assert_eq!(report.served, 2);
        assert_eq!(report.floors_travelled, 12);
        assert_eq!(report.final_floor, Floor(1));
    }

    #[test]
    fn move_to_steps_exactly_the_floor_distance() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::ZERO);
        c.move_to(RequestId(0), Floor(9));
        assert_eq!(c.floor(), Floor(9));
        assert_eq!(c.report().floors_travelled, u64::from(Floor::GROUND.distance_to(Floor(9))));

        let floors: Vec<i32> = sink.events().iter().filter_map(|e| e.floor()).map(|f| f.0).collect();
        assert_eq!(floors, (2..=9).collect::<Vec<_>>());
    }

    #[test]
    fn completion_elapsed_is_measured_from_submission() {
        let sink = Arc::new(MemorySink::new());
        let mut c = cab(&sink, Duration::ZERO);
        let submitted = Instant::now() - Duration::from_millis(40);
        let r = Request::submitted_at(RequestId(3), Floor(1), Floor(2), submitted).unwrap();
        c.process(&r);
        let done = sink.events().into_iter().find(|e| e.is_completion()).unwrap();
        assert!(done.elapsed_ms().unwrap() >= 40);
    }
}

// ── Building lifecycle ────────────────────────────────────────────────────────

#[cfg(test)]
mod building_tests {
    use std::collections::HashSet;

    use lift_core::CoreError;

    use super::*;
    use crate::{EventSink, SimError};

    #[test]
    fn builder_rejects_empty_pool() {
        let result = BuildingBuilder::new(0, 10).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn builder_rejects_single_floor() {
        let result = BuildingBuilder::new(2, 1).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn builds_requested_pool() {
        let sink = Arc::new(MemorySink::new());
        let b = building(3, 1, &sink);
        assert_eq!(b.pool_size(), 3);
        assert_eq!(b.floor_count(), 10);
        assert_eq!(
            b.elevator_ids().collect::<Vec<_>>(),
            [ElevatorId(0), ElevatorId(1), ElevatorId(2)]
        );
        assert_eq!(b.running_workers(), 0);
    }

    #[test]
    fn ten_requests_two_elevators_terminates() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(2, 1, &sink);
        b.start_all().unwrap();
        assert_eq!(b.running_workers(), 2);

        let pairs = [(1, 5), (3, 7), (9, 2), (4, 10), (6, 1), (2, 8), (10, 3), (5, 4), (7, 9), (8, 6)];
        let t0 = Instant::now();
        let submitted: Vec<RequestId> = pairs
            .iter()
            .map(|&(s, d)| b.submit(Floor(s), Floor(d)).unwrap())
            .collect();
        b.close_for_new_requests();
        let summary = b.stop_all().unwrap();

        assert!(t0.elapsed() < Duration::from_secs(10));
        assert_eq!(b.running_workers(), 0);
        assert_eq!(summary.served(), 10);
        assert_eq!(summary.reports.len(), 2);

        let completed = sink.completed();
        assert_eq!(completed.len(), 10);
        let unique: HashSet<RequestId> = completed.iter().copied().collect();
        assert_eq!(unique, submitted.into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn shutdown_drains_queued_requests() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(1, 2, &sink);
        b.start_all().unwrap();
        for (s, d) in [(2, 6), (6, 3), (3, 9), (9, 1), (1, 4)] {
            b.submit(Floor(s), Floor(d)).unwrap();
        }
        // Most of these are still queued when the close lands.
        b.close_for_new_requests();
        assert!(!b.is_accepting());
        let summary = b.stop_all().unwrap();
        assert_eq!(summary.served(), 5);
        assert_eq!(sink.completed().len(), 5);
        assert_eq!(b.pending(), 0);
    }

    #[test]
    fn single_elevator_serves_in_submission_order() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(1, 0, &sink);
        b.start_all().unwrap();
        let ids: Vec<RequestId> = [(4, 2), (2, 9), (9, 1), (1, 3)]
            .iter()
            .map(|&(s, d)| b.submit(Floor(s), Floor(d)).unwrap())
            .collect();
        b.close_for_new_requests();
        b.stop_all().unwrap();
        assert_eq!(sink.completed(), ids);
    }

    #[test]
    fn submit_after_close_is_rejected() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(2, 1, &sink);
        b.start_all().unwrap();
        b.close_for_new_requests();
        let err = b.submit(Floor(1), Floor(2)).unwrap_err();
        assert!(matches!(err, SimError::Closed));
        let summary = b.stop_all().unwrap();
        assert_eq!(summary.served(), 0);
        assert!(sink.completed().is_empty());
    }

    #[test]
    fn same_floor_request_is_rejected() {
        let sink = Arc::new(MemorySink::new());
        let b = building(1, 1, &sink);
        let err = b.submit(Floor(5), Floor(5)).unwrap_err();
        assert!(matches!(err, SimError::Core(CoreError::SameFloor(Floor(5)))));
        assert_eq!(b.pending(), 0);
    }

    #[test]
    fn closing_twice_matches_closing_once() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(2, 1, &sink);
        b.start_all().unwrap();
        b.submit(Floor(2), Floor(4)).unwrap();
        assert!(b.close_for_new_requests());
        assert!(!b.close_for_new_requests());
        let summary = b.stop_all().unwrap();
        assert_eq!(summary.served(), 1);
        assert!(!b.is_accepting());
    }

    #[test]
    fn stopping_one_worker_shuts_down_the_pool() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(3, 1, &sink);
        b.start_all().unwrap();
        b.submit(Floor(1), Floor(3)).unwrap();

        b.worker_mut(ElevatorId(1)).unwrap().stop().unwrap();
        assert!(!b.is_accepting());
        assert!(b.workers()[1].report().is_some());

        let summary = b.stop_all().unwrap();
        assert_eq!(summary.served(), 1);
        assert_eq!(b.running_workers(), 0);
    }

    #[test]
    fn start_all_twice_is_noop() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(2, 1, &sink);
        b.start_all().unwrap();
        b.start_all().unwrap();
        b.close_for_new_requests();
        let summary = b.stop_all().unwrap();
        assert_eq!(summary.reports.len(), 2);
    }

    #[test]
    fn worker_start_twice_errors() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(1, 1, &sink);
        let w = b.worker_mut(ElevatorId(0)).unwrap();
        w.start().unwrap();
        assert!(matches!(w.start(), Err(SimError::AlreadyStarted(ElevatorId(0)))));
        w.stop().unwrap();
    }

    #[test]
    fn stop_all_twice_returns_same_summary() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(2, 1, &sink);
        b.start_all().unwrap();
        b.submit(Floor(3), Floor(1)).unwrap();
        let first = b.stop_all().unwrap();
        let second = b.stop_all().unwrap();
        assert_eq!(first, second);
        assert_eq!(sink.reports().len(), 2, "each worker exits exactly once");
    }

    #[test]
    fn per_elevator_events_are_ordered() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(3, 1, &sink);
        b.start_all().unwrap();
        for (s, d) in [(2, 8), (7, 1), (4, 5), (10, 2), (3, 9), (6, 4)] {
            b.submit(Floor(s), Floor(d)).unwrap();
        }
        b.close_for_new_requests();
        b.stop_all().unwrap();

        for id in b.elevator_ids() {
            let events = sink.events_for(id);
            // Each request's events form one contiguous run ending in Completed.
            let mut current: Option<RequestId> = None;
            let mut picked = false;
            let mut dropped = false;
            for e in &events {
                if current != Some(e.request) {
                    assert!(current.is_none(), "request {:?} interleaved before completion", e.request);
                    current = Some(e.request);
                    picked = false;
                    dropped = false;
                }
                match e.kind {
                    EventKind::Pickup(_)         => picked = true,
                    EventKind::Dropoff(_)        => { assert!(picked); dropped = true; }
                    EventKind::Completed { .. }  => { assert!(dropped); current = None; }
                    EventKind::PassingFloor(_)   => {}
                }
            }
            assert!(current.is_none(), "{id} left a request unfinished");
        }
    }

    #[test]
    fn dropping_a_running_building_joins_workers() {
        let sink = Arc::new(MemorySink::new());
        {
            let mut b = building(2, 1, &sink);
            b.start_all().unwrap();
            b.submit(Floor(1), Floor(4)).unwrap();
        }
        assert_eq!(sink.reports().len(), 2);
        assert_eq!(sink.completed().len(), 1);
    }

    /// Panics inside the worker thread on the first pickup.
    struct PanicOnPickup;

    impl EventSink for PanicOnPickup {
        fn on_event(&self, event: &ElevatorEvent) {
            if matches!(event.kind, EventKind::Pickup(_)) {
                panic!("sink failure at {}", event.elevator);
            }
        }
    }

    fn panicking_building() -> Building {
        BuildingBuilder::new(1, 10)
            .transit_delay(Duration::ZERO)
            .sink(Arc::new(PanicOnPickup))
            .build()
            .unwrap()
    }

    #[test]
    fn failed_start_all_shuts_the_building_down() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(3, 1, &sink);
        b.worker_mut(ElevatorId(1)).unwrap().start().unwrap();

        let err = b.start_all().unwrap_err();
        assert!(matches!(err, SimError::AlreadyStarted(ElevatorId(1))));
        assert_eq!(b.running_workers(), 0, "started workers are joined");
        assert!(!b.is_accepting());
        assert!(matches!(b.submit(Floor(2), Floor(5)), Err(SimError::Closed)));

        // A retry surfaces the failure instead of being ignored.
        assert!(b.start_all().is_err());
    }

    #[test]
    fn panicked_worker_is_reported_on_every_stop_all() {
        let mut b = panicking_building();
        b.start_all().unwrap();
        b.submit(Floor(2), Floor(5)).unwrap();
        b.close_for_new_requests();

        assert!(matches!(b.stop_all(), Err(SimError::WorkerPanicked(ElevatorId(0)))));
        assert!(matches!(b.stop_all(), Err(SimError::WorkerPanicked(ElevatorId(0)))));
    }

    #[test]
    fn dropping_a_panicked_worker_does_not_propagate() {
        let mut b = panicking_building();
        b.start_all().unwrap();
        b.submit(Floor(2), Floor(5)).unwrap();
        drop(b);
    }
}

// ── Sources and feeding ───────────────────────────────────────────────────────

#[cfg(test)]
mod source_tests {
    use lift_core::SimRng;

    use super::*;
    use crate::{RandomSource, RequestSource, ScriptedSource, feed};

    fn drain<S: RequestSource>(mut s: S) -> Vec<(Floor, Floor)> {
        std::iter::from_fn(|| s.next_pair()).collect()
    }

    #[test]
    fn random_pairs_are_distinct_and_in_range() {
        let pairs = drain(RandomSource::new(10, 500, SimRng::new(3)));
        assert_eq!(pairs.len(), 500);
        for (s, d) in pairs {
            assert_ne!(s, d);
            assert!((1..=10).contains(&s.0) && (1..=10).contains(&d.0));
        }
    }

    #[test]
    fn random_source_is_deterministic_per_seed() {
        let a = drain(RandomSource::new(10, 20, SimRng::new(42)));
        let b = drain(RandomSource::new(10, 20, SimRng::new(42)));
        assert_eq!(a, b);
    }

    #[test]
    fn two_floors_always_swap() {
        for (s, d) in drain(RandomSource::new(2, 50, SimRng::new(1))) {
            assert_eq!(s.0 + d.0, 3);
        }
    }

    #[test]
    fn single_floor_source_is_empty() {
        assert!(drain(RandomSource::new(1, 10, SimRng::new(1))).is_empty());
    }

    #[test]
    fn scripted_source_replays_in_order() {
        let s = ScriptedSource::floors([(3, 7), (9, 1)]);
        assert_eq!(s.len(), 2);
        assert_eq!(drain(s), [(Floor(3), Floor(7)), (Floor(9), Floor(1))]);
    }

    #[test]
    fn feed_counts_rejections_and_closes() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(1, 0, &sink);
        b.start_all().unwrap();

        let mut source = ScriptedSource::floors([(1, 2), (3, 3), (4, 1)]);
        let report = feed(&mut source, &b.submitter(), Duration::ZERO);
        assert_eq!(report.submitted.len(), 2);
        assert_eq!(report.rejected, 1);
        assert!(!b.is_accepting());

        let summary = b.stop_all().unwrap();
        assert_eq!(summary.served(), 2);
    }

    #[test]
    fn feed_from_producer_thread() {
        let sink = Arc::new(MemorySink::new());
        let mut b = building(2, 1, &sink);
        b.start_all().unwrap();

        let submitter = b.submitter();
        let producer = std::thread::spawn(move || {
            let mut source = RandomSource::new(10, 10, SimRng::new(9));
            feed(&mut source, &submitter, Duration::from_millis(1))
        });
        let report = producer.join().unwrap();
        let summary = b.stop_all().unwrap();

        assert_eq!(report.submitted.len(), 10);
        assert_eq!(summary.served(), 10);
        assert_eq!(sink.completed().len(), 10);
    }
}

// ── Run driver ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runner_tests {
    use lift_core::{CoreError, DispatchConfig};

    use super::*;
    use crate::{RandomSource, ScriptedSource, SimError, run};

    fn fast_config() -> DispatchConfig {
        DispatchConfig {
            pool_size:          2,
            floor_count:        10,
            request_count:      10,
            transit_delay_ms:   1,
            submit_interval_ms: 0,
            seed:               Some(42),
        }
    }

    #[test]
    fn reference_scenario_completes() {
        let config = fast_config();
        let sink = Arc::new(MemorySink::new());
        let outcome = run(&config, RandomSource::from_config(&config), sink.clone()).unwrap();

        assert_eq!(outcome.feed.submitted.len(), 10);
        assert_eq!(outcome.feed.rejected, 0);
        assert_eq!(outcome.summary.served(), 10);
        assert_eq!(sink.completed().len(), 10);
        assert_eq!(sink.reports().len(), 2);
    }

    #[test]
    fn invalid_config_is_rejected_before_start() {
        let config = DispatchConfig { pool_size: 0, ..fast_config() };
        let sink = Arc::new(MemorySink::new());
        let result = run(&config, ScriptedSource::default(), sink.clone());
        assert!(matches!(result, Err(SimError::Core(CoreError::Config(_)))));
        assert!(sink.reports().is_empty());
    }

    #[test]
    fn empty_source_still_shuts_down() {
        let sink = Arc::new(MemorySink::new());
        let outcome = run(&fast_config(), ScriptedSource::default(), sink.clone()).unwrap();
        assert_eq!(outcome.summary.served(), 0);
        assert_eq!(outcome.summary.reports.len(), 2);
    }
}
