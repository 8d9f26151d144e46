//! Probabilistic passenger generation with a time-decaying rate.

use fcfs_core::{PassengerId, SimClock, SimConfig, SimRng, Tick};
use fcfs_transit::{Passenger, StopRegistry};

use crate::SimResult;

/// Spawns passengers and hands out their ids.
///
/// While enabled and before the cutoff, each tick is one Bernoulli trial with
///
///   p = rate × (1 + (1 − now / cutoff))
///
/// so generation is twice as likely at the start as just before the cutoff.
#[derive(Clone, Debug)]
pub struct Generator {
    enabled:         bool,
    rate:            f64,
    clock:           SimClock,
    cutoff_secs:     f64,
    /// First tick at or past `cutoff_secs`.
    cutoff:          Tick,
    min_ride_secs:   f64,
    max_ride_secs:   f64,
    next_id:         PassengerId,
    total_generated: u64,
}

impl Generator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            enabled:         config.auto_generate,
            rate:            config.generation_rate,
            clock:           config.make_clock(),
            cutoff_secs:     config.generation_cutoff_secs,
            cutoff:          config.generation_cutoff_tick(),
            min_ride_secs:   config.min_ride_secs,
            max_ride_secs:   config.max_ride_secs,
            next_id:         PassengerId::FIRST,
            total_generated: 0,
        }
    }

    /// Whether automatic generation is switched on.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// `true` strictly before the cutoff.
    #[inline]
    pub fn is_open(&self, now: Tick) -> bool {
        now < self.cutoff
    }

    /// Passengers created so far, automatic and manual.
    pub fn total_generated(&self) -> u64 {
        self.total_generated
    }

    /// Per-tick spawn probability at `now`; zero once closed.
    pub fn probability(&self, now: Tick) -> f64 {
        if !self.is_open(now) || self.cutoff_secs <= 0.0 {
            return 0.0;
        }
        let remaining = 1.0 - self.clock.secs_at(now) / self.cutoff_secs;
        self.rate * (1.0 + remaining)
    }

    /// One automatic-generation trial.  Draws from `rng` only when enabled
    /// and open, so toggling generation off does not consume randomness.
    pub fn trial(&mut self, now: Tick, rng: &mut SimRng) -> bool {
        if !self.enabled || !self.is_open(now) {
            return false;
        }
        rng.gen_bool(self.probability(now))
    }

    /// Create one passenger arriving at `now`.  The caller is responsible
    /// for checking [`is_open`][Self::is_open].
    pub fn spawn(&mut self, now: Tick, stops: &StopRegistry, rng: &mut SimRng) -> SimResult<Passenger> {
        let ride_secs = rng.gen_range(self.min_ride_secs..=self.max_ride_secs);
        let origin = stops.random_stop(rng);
        let destination = stops.random_destination(rng, origin);

        let passenger = Passenger::new(self.next_id, now, ride_secs, origin, destination)?;
        self.next_id = self.next_id.next();
        self.total_generated += 1;
        Ok(passenger)
    }
}
