//! Integration tests for fcfs-sim.

use std::collections::HashSet;

use fcfs_core::{PassengerId, SimConfig, StopIndex, Tick};
use fcfs_transit::{BusState, Passenger, PassengerState};

use crate::{NoopObserver, SimBuilder, SimObserver, SimSnapshot, Simulation, TickOutcome, TickReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// No automatic generation; the bus starts parked on stop 0.
fn quiet_config() -> SimConfig {
    SimConfig {
        auto_generate:      false,
        bus_start_position: 150.0,
        ..SimConfig::default()
    }
}

fn quiet_sim() -> Simulation {
    SimBuilder::new(quiet_config()).build().unwrap()
}

fn busy_sim(seed: u64) -> Simulation {
    let cfg = SimConfig {
        generation_rate: 0.08,
        bus_capacity:    3,
        ..SimConfig::default()
    };
    SimBuilder::new(cfg).seed(seed).build().unwrap()
}

fn waiting_passenger(id: u32, arrival: u64, origin: u16, destination: u16, ride_secs: f64) -> Passenger {
    Passenger::new(PassengerId(id), Tick(arrival), ride_secs, StopIndex(origin), StopIndex(destination)).unwrap()
}

/// Observer that keeps everything it is told.
#[derive(Default)]
struct Recorder {
    spawned:   Vec<Passenger>,
    completed: Vec<Passenger>,
    reports:   Vec<TickReport>,
    starts:    usize,
    snapshots: Vec<Tick>,
    limit:     Option<Tick>,
    ended:     Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.starts += 1;
    }
    fn on_tick_end(&mut self, _tick: Tick, report: &TickReport) {
        self.reports.push(report.clone());
    }
    fn on_snapshot(&mut self, tick: Tick, _snapshot: &SimSnapshot<'_>) {
        self.snapshots.push(tick);
    }
    fn on_passenger_spawned(&mut self, passenger: &Passenger) {
        self.spawned.push(passenger.clone());
    }
    fn on_passenger_completed(&mut self, passenger: &Passenger) {
        self.completed.push(passenger.clone());
    }
    fn on_time_limit(&mut self, tick: Tick) {
        self.limit = Some(tick);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

/// Every passenger currently known to the simulation.
fn all_passengers(sim: &Simulation) -> Vec<&Passenger> {
    sim.waiting()
        .iter()
        .chain(sim.bus().onboard())
        .chain(sim.completed())
        .collect()
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn builds_at_tick_zero() {
        let sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        assert_eq!(sim.now(), Tick::ZERO);
        assert!(!sim.is_paused());
        assert!(sim.generation_enabled());
        assert!(sim.generation_open());
        assert_eq!(sim.total_generated(), 0);
        assert_eq!(sim.bus().state(), BusState::Moving);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = SimConfig { stop_positions: vec![10.0], ..SimConfig::default() };
        let result = SimBuilder::new(cfg).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn overrides_applied() {
        let sim = SimBuilder::new(SimConfig::default())
            .seed(1234)
            .auto_generate(false)
            .build()
            .unwrap();
        assert_eq!(sim.config().seed, 1234);
        assert!(!sim.generation_enabled());
    }
}

// ── Clock, limit, pause ───────────────────────────────────────────────────────

#[cfg(test)]
mod clock_tests {
    use super::*;

    #[test]
    fn run_stops_exactly_at_time_limit() {
        let mut sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert_eq!(sim.now(), Tick(1800));
        assert_eq!(sim.clock().elapsed_secs(), 30.0);
        assert!(sim.is_paused());
        assert!(sim.time_limit_reached());
        assert_eq!(rec.limit, Some(Tick(1800)));
        assert_eq!(rec.ended, Some(Tick(1800)));
        assert_eq!(rec.starts, 1799, "the limit tick does no work");
    }

    #[test]
    fn no_arrivals_at_or_after_cutoff() {
        let mut sim = busy_sim(11);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        assert!(!rec.spawned.is_empty());
        let cutoff = sim.config().generation_cutoff_tick();
        for p in &rec.spawned {
            assert!(p.arrival < cutoff, "{} arrived at {}", p.id, p.arrival);
            assert!(sim.clock().secs_at(p.arrival) < 25.0);
        }
        assert!(!sim.generation_open());
    }

    #[test]
    fn fractional_limit_pauses_on_first_tick_past_it() {
        let cfg = SimConfig { time_limit_secs: 30.005, ..quiet_config() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert!(sim.is_paused());
        assert_eq!(sim.now(), Tick(1801));
        assert!(sim.clock().elapsed_secs() >= 30.005);
        assert!(sim.clock().secs_at(Tick(1800)) < 30.005);
    }

    #[test]
    fn clock_never_passes_limit_even_when_unpaused() {
        let mut sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();

        for _ in 0..5 {
            assert!(!sim.toggle_pause());
            assert_eq!(sim.tick(&mut NoopObserver).unwrap(), TickOutcome::LimitReached);
            assert!(sim.is_paused());
        }
        assert_eq!(sim.now(), Tick(1800));
    }

    #[test]
    fn paused_ticks_change_nothing() {
        let mut sim = busy_sim(3);
        sim.run_ticks(100, &mut NoopObserver).unwrap();
        let before = sim.now();
        let position = sim.bus().position();

        assert!(sim.toggle_pause());
        for _ in 0..50 {
            assert_eq!(sim.tick(&mut NoopObserver).unwrap(), TickOutcome::Paused);
            assert_eq!(sim.on_frame(&mut NoopObserver).unwrap(), TickOutcome::Paused);
        }
        assert_eq!(sim.now(), before);
        assert_eq!(sim.bus().position(), position);

        assert!(!sim.toggle_pause());
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.now(), before + 1);
    }

    #[test]
    fn frames_throttle_ticks() {
        let cfg = SimConfig { frames_per_tick: 3, ..quiet_config() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();

        assert_eq!(sim.on_frame(&mut NoopObserver).unwrap(), TickOutcome::Throttled);
        assert_eq!(sim.on_frame(&mut NoopObserver).unwrap(), TickOutcome::Throttled);
        assert!(matches!(sim.on_frame(&mut NoopObserver).unwrap(), TickOutcome::Advanced(_)));
        assert_eq!(sim.now(), Tick(1));

        for _ in 0..30 {
            sim.on_frame(&mut NoopObserver).unwrap();
        }
        assert_eq!(sim.now(), Tick(11));
    }

    #[test]
    fn snapshots_follow_output_interval() {
        let mut sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.snapshots.len(), 29);
        assert!(rec.snapshots.iter().all(|t| t.0 % 60 == 0));
    }
}

// ── Generation and injection ──────────────────────────────────────────────────

#[cfg(test)]
mod generation_tests {
    use super::*;
    use crate::{Generator, SimError};
    use fcfs_core::SimRng;

    #[test]
    fn probability_decays_to_base_rate() {
        let cfg = SimConfig::default();
        let generator = Generator::new(&cfg);
        assert!((generator.probability(Tick(0)) - 0.02).abs() < 1e-12);
        assert!((generator.probability(Tick(750)) - 0.015).abs() < 1e-12);
        assert!(generator.probability(Tick(1499)) > 0.01);
        assert_eq!(generator.probability(Tick(1500)), 0.0);
    }

    #[test]
    fn probability_uses_cutoff_seconds() {
        let cfg = SimConfig { generation_cutoff_secs: 25.005, ..SimConfig::default() };
        let generator = Generator::new(&cfg);
        let expected = 0.01 * (1.0 + (1.0 - 25.0 / 25.005));
        assert!((generator.probability(Tick(1500)) - expected).abs() < 1e-12);
        assert_eq!(generator.probability(Tick(1501)), 0.0);
    }

    #[test]
    fn disabled_trial_consumes_no_randomness() {
        let cfg = SimConfig { auto_generate: false, ..SimConfig::default() };
        let mut generator = Generator::new(&cfg);
        let mut a = SimRng::new(5);
        let mut b = SimRng::new(5);
        for t in 0..100 {
            assert!(!generator.trial(Tick(t), &mut a));
        }
        assert_eq!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
    }

    #[test]
    fn ids_count_up_and_trips_are_valid() {
        let mut sim = busy_sim(21);
        sim.run(&mut NoopObserver).unwrap();

        let all = all_passengers(&sim);
        assert_eq!(all.len() as u64, sim.total_generated());
        let ids: HashSet<PassengerId> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), all.len(), "each passenger in exactly one collection");
        for p in &all {
            assert_ne!(p.origin, p.destination);
            assert!(p.id.0 >= 1 && p.id.0 as u64 <= sim.total_generated());
            assert!((5.0..=15.0).contains(&p.ride_secs));
        }
    }

    #[test]
    fn auto_generation_toggle() {
        let mut sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        assert!(!sim.toggle_auto_generation());
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.total_generated(), 0);
    }

    #[test]
    fn injection_before_cutoff_even_when_paused() {
        let mut sim = quiet_sim();
        sim.set_paused(true);
        let mut rec = Recorder::default();

        let first = sim.inject_passenger(&mut rec).unwrap();
        let second = sim.inject_passenger(&mut rec).unwrap();
        assert_eq!(first, PassengerId(1));
        assert_eq!(second, PassengerId(2));
        assert_eq!(sim.waiting().len(), 2);
        assert_eq!(sim.total_generated(), 2);
        assert_eq!(rec.spawned.len(), 2);
        assert!(sim.waiting().iter().all(|p| p.arrival == Tick(0)));
    }

    #[test]
    fn injection_after_cutoff_declined() {
        let mut sim = quiet_sim();
        sim.run(&mut NoopObserver).unwrap();

        let err = sim.inject_passenger(&mut NoopObserver).unwrap_err();
        assert!(matches!(err, SimError::GenerationClosed { .. }));
        assert_eq!(sim.total_generated(), 0);
        assert!(sim.waiting().is_empty());
    }

    #[test]
    fn fractional_cutoff_still_open_just_before_it() {
        let cfg = SimConfig { generation_cutoff_secs: 25.005, ..quiet_config() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.run_ticks(1500, &mut NoopObserver).unwrap();

        assert_eq!(sim.clock().elapsed_secs(), 25.0);
        assert!(sim.generation_open());
        assert!(sim.inject_passenger(&mut NoopObserver).is_ok());

        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert!(sim.inject_passenger(&mut NoopObserver).is_err());
    }

    #[test]
    fn injection_exactly_at_cutoff_declined() {
        let mut sim = quiet_sim();
        sim.run_ticks(1499, &mut NoopObserver).unwrap();
        assert!(sim.inject_passenger(&mut NoopObserver).is_ok());
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.now(), Tick(1500));
        assert!(sim.inject_passenger(&mut NoopObserver).is_err());
    }
}

// ── Boarding and completion ───────────────────────────────────────────────────

#[cfg(test)]
mod boarding_tests {
    use super::*;

    #[test]
    fn lone_passenger_boards_at_boarding_clock_value() {
        let mut sim = quiet_sim();
        // Ride shorter than one dwell period.
        sim.push_waiting(waiting_passenger(1, 0, 0, 2, 1.0));

        let dwell = sim.config().dwell_ticks();
        sim.run_ticks(dwell + 1, &mut NoopObserver).unwrap();

        let onboard = sim.bus().onboard();
        assert_eq!(onboard.len(), 1);
        let p = &onboard[0];
        assert_eq!(p.state(), PassengerState::Onboard);
        // Tick 1 pulls into the stop, tick 2 is the first loading tick.
        assert_eq!(p.start(), Some(Tick(2)));
        assert_ne!(p.start(), Some(p.arrival));
        assert_eq!(p.wait_ticks(), 2);
    }

    #[test]
    fn earlier_of_two_takes_the_last_seat() {
        let cfg = SimConfig { bus_capacity: 1, ..quiet_config() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.push_waiting(waiting_passenger(2, 0, 0, 1, 6.0));
        sim.run_ticks(1, &mut NoopObserver).unwrap(); // bus pulls in
        sim.push_waiting(waiting_passenger(1, 1, 0, 1, 6.0));

        let mut rec = Recorder::default();
        sim.run_ticks(50, &mut rec).unwrap();

        assert_eq!(rec.reports[0].boarded, vec![PassengerId(2)]);
        assert_eq!(sim.bus().onboard()[0].id, PassengerId(2));
        assert_eq!(sim.waiting().len(), 1);
        assert_eq!(sim.waiting()[0].id, PassengerId(1));
        assert_eq!(sim.waiting()[0].state(), PassengerState::Waiting);
    }

    #[test]
    fn capacity_holds_every_tick() {
        let mut sim = busy_sim(8);
        loop {
            match sim.tick(&mut NoopObserver).unwrap() {
                TickOutcome::LimitReached => break,
                _ => assert!(sim.bus().onboard().len() <= sim.config().bus_capacity),
            }
        }
    }

    #[test]
    fn boarding_respects_arrival_order_per_stop() {
        for seed in [1, 2, 3, 4] {
            let mut sim = busy_sim(seed);
            sim.run(&mut NoopObserver).unwrap();
            let all = all_passengers(&sim);

            for a in &all {
                for b in &all {
                    if a.origin != b.origin || a.fcfs_key() >= b.fcfs_key() {
                        continue;
                    }
                    // `a` arrived first at the same stop.
                    if let Some(b_start) = b.start() {
                        let a_start = a.start().unwrap_or_else(|| {
                            panic!("seed {seed}: {} boarded while earlier {} kept waiting", b.id, a.id)
                        });
                        assert!(a_start <= b_start, "seed {seed}: {} boarded after {}", a.id, b.id);
                    }
                }
            }
        }
    }

    #[test]
    fn completion_only_at_destination() {
        let mut sim = busy_sim(5);
        let mut completed = 0;
        loop {
            let report = match sim.tick(&mut NoopObserver).unwrap() {
                TickOutcome::Advanced(r) => r,
                _ => break,
            };
            let stop = report.departed_from.unwrap_or(sim.bus().current_stop());
            for id in &report.dropped_off {
                let p = sim.completed().iter().find(|p| p.id == *id).unwrap();
                assert_eq!(p.destination, stop);
                assert_eq!(p.completion(), Some(report.tick));
                completed += 1;
            }
        }
        assert!(completed > 0);

        for p in sim.completed() {
            assert_eq!(p.state(), PassengerState::Completed);
            let start = p.start().unwrap();
            let done = p.completion().unwrap();
            assert!(done > start);
            assert!(p.turnaround_ticks().unwrap() >= done - start);
        }
    }

    #[test]
    fn observer_sees_every_completion() {
        let mut sim = busy_sim(9);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.completed.len(), sim.completed().len());
        assert_eq!(rec.spawned.len() as u64, sim.total_generated());
    }
}

// ── Reset and determinism ─────────────────────────────────────────────────────

#[cfg(test)]
mod reset_tests {
    use super::*;

    #[test]
    fn reset_returns_to_initial_state() {
        let mut sim = busy_sim(4);
        sim.run(&mut NoopObserver).unwrap();
        sim.toggle_auto_generation();

        sim.reset().unwrap();
        assert_eq!(sim.now(), Tick::ZERO);
        assert!(!sim.is_paused());
        assert!(!sim.time_limit_reached());
        assert!(sim.generation_enabled());
        assert_eq!(sim.total_generated(), 0);
        assert!(sim.waiting().is_empty());
        assert!(sim.completed().is_empty());
        assert!(sim.bus().onboard().is_empty());
        assert_eq!(sim.bus().position(), 0.0);
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = busy_sim(77);
        let mut b = busy_sim(77);
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(a.completed(), b.completed());
        assert_eq!(a.metrics(), b.metrics());

        a.reset().unwrap();
        a.run(&mut NoopObserver).unwrap();
        assert_eq!(a.completed(), b.completed());
    }
}

// ── Metrics and snapshot ──────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use super::*;
    use crate::Metrics;
    use fcfs_core::SimClock;

    fn finished(id: u32, arrival: u64, board: u64, done: u64, ride_secs: f64) -> Passenger {
        let mut p = waiting_passenger(id, arrival, 0, 1, ride_secs);
        p.board(Tick(board));
        p.complete(Tick(done));
        p
    }

    #[test]
    fn empty_history_reports_zero() {
        let sim = SimBuilder::new(SimConfig::default()).build().unwrap();
        assert_eq!(sim.metrics(), Metrics::default());
    }

    #[test]
    fn empty_history_zero_averages_after_time_passes() {
        let mut sim = quiet_sim();
        sim.run_ticks(300, &mut NoopObserver).unwrap();
        let m = sim.metrics();
        assert_eq!(m.completed, 0);
        assert_eq!(m.avg_wait_secs, 0.0);
        assert_eq!(m.avg_turnaround_secs, 0.0);
        assert_eq!(m.avg_response_secs, 0.0);
        assert_eq!(m.avg_ride_secs, 0.0);
        assert_eq!(m.throughput_per_sec, 0.0);
    }

    #[test]
    fn averages_over_history() {
        let history = vec![
            finished(1, 0, 60, 300, 4.0),   // wait 1 s, turnaround 5 s
            finished(2, 60, 180, 420, 6.0), // wait 2 s, turnaround 6 s
        ];
        let clock = SimClock { ticks_per_sec: 60, current_tick: Tick(600) };
        let m = Metrics::compute(&history, &clock, 300);

        assert_eq!(m.completed, 2);
        assert!((m.avg_wait_secs - 1.5).abs() < 1e-9);
        assert!((m.avg_response_secs - 1.5).abs() < 1e-9);
        assert!((m.avg_turnaround_secs - 5.5).abs() < 1e-9);
        assert!((m.avg_ride_secs - 5.0).abs() < 1e-9);
        assert!((m.throughput_per_sec - 0.2).abs() < 1e-9);
        assert!((m.utilization_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn denominators_floored_at_one_second() {
        let history = vec![finished(1, 0, 6, 24, 5.0)];
        let clock = SimClock { ticks_per_sec: 60, current_tick: Tick(30) };
        let m = Metrics::compute(&history, &clock, 30);
        assert!((m.throughput_per_sec - 1.0).abs() < 1e-9);
        assert!((m.utilization_pct - 50.0).abs() < 1e-9);
    }

    #[test]
    fn utilization_tracks_moving_time() {
        let cfg = SimConfig { auto_generate: false, ..SimConfig::default() };
        let mut sim = SimBuilder::new(cfg).build().unwrap();
        sim.run_ticks(60, &mut NoopObserver).unwrap();
        // Still driving to the first stop after 1 s.
        assert!((sim.metrics().utilization_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut sim = quiet_sim();
        sim.push_waiting(waiting_passenger(3, 0, 1, 2, 5.0));
        sim.push_waiting(waiting_passenger(1, 0, 1, 3, 5.0));
        sim.push_waiting(waiting_passenger(2, 0, 4, 0, 5.0));
        sim.run_ticks(10, &mut NoopObserver).unwrap();

        let snap = sim.snapshot();
        assert_eq!(snap.tick, Tick(10));
        assert_eq!(snap.waiting_count(), 3);
        assert_eq!(snap.onboard_count(), 0);
        assert_eq!(snap.completed_count(), 0);
        assert!(!snap.paused);
        assert!(!snap.generation_enabled);
        assert!(snap.generation_open);

        let queue: Vec<u32> = snap.queue_at(StopIndex(1)).iter().map(|p| p.id.0).collect();
        assert_eq!(queue, vec![1, 3]);
        let queues = snap.queues();
        assert_eq!(queues.len(), 5);
        assert!(queues[0].is_empty());
        assert_eq!(queues[4].len(), 1);
    }
}
