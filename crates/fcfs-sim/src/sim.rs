//! The `Simulation` aggregate and its tick loop.

use fcfs_core::{PassengerId, SimClock, SimConfig, SimRng, StopIndex, Tick};
use fcfs_transit::{Bus, Passenger, StopRegistry};
use tracing::{debug, info, warn};

use crate::{Generator, Metrics, SimError, SimObserver, SimResult, SimSnapshot};

// ── Tick results ──────────────────────────────────────────────────────────────

/// What one tick did, for observers and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick:          Tick,
    pub arrived_at:    Option<StopIndex>,
    pub departed_from: Option<StopIndex>,
    /// In boarding order.
    pub boarded:       Vec<PassengerId>,
    pub dropped_off:   Vec<PassengerId>,
    pub spawned:       Option<PassengerId>,
}

/// Result of asking the simulation to advance.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Paused: nothing changed.
    Paused,
    /// Frame counted but not a simulation frame (see `frames_per_tick`).
    Throttled,
    /// The clock is at the hard limit; the simulation is (now) paused.
    LimitReached,
    Advanced(TickReport),
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// All simulation state, owned in one place.
///
/// The tick has exclusive write access to the waiting, onboard, and
/// completed collections; callers only ever see state between ticks.
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    config:    SimConfig,
    clock:     SimClock,
    rng:       SimRng,
    stops:     StopRegistry,
    bus:       Bus,
    /// Unordered; FCFS order is derived by sorting at boarding time.
    waiting:   Vec<Passenger>,
    /// Append-only history of dropped-off passengers.
    completed: Vec<Passenger>,
    generator: Generator,
    limit:     Tick,

    paused:        bool,
    limit_reached: bool,
    frames:        u64,
}

impl Simulation {
    pub(crate) fn from_config(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let stops = StopRegistry::new(config.stop_positions.clone())?;
        let bus = Bus::new(&config, &stops)?;

        Ok(Self {
            clock:         config.make_clock(),
            rng:           SimRng::new(config.seed),
            generator:     Generator::new(&config),
            limit:         config.time_limit_tick(),
            stops,
            bus,
            waiting:       Vec::new(),
            completed:     Vec::new(),
            paused:        false,
            limit_reached: false,
            frames:        0,
            config,
        })
    }

    // ── External triggers ─────────────────────────────────────────────────

    /// Flip the pause flag; returns the new value.
    ///
    /// Un-pausing at the time limit is allowed but the next tick pauses
    /// again without advancing the clock.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip automatic generation; returns the new value.
    pub fn toggle_auto_generation(&mut self) -> bool {
        let enabled = !self.generator.enabled();
        self.generator.set_enabled(enabled);
        info!(enabled, "automatic passenger generation toggled");
        enabled
    }

    /// Return to tick 0 with the same configuration.  The RNG is re-seeded,
    /// so a reset run replays the first one exactly.
    pub fn reset(&mut self) -> SimResult<()> {
        *self = Simulation::from_config(self.config.clone())?;
        info!(seed = self.config.seed, "simulation reset");
        Ok(())
    }

    /// Add one random passenger at the current clock value.
    ///
    /// Works while paused or with automatic generation off, but only
    /// strictly before the cutoff; afterwards the request is declined with
    /// [`SimError::GenerationClosed`].
    pub fn inject_passenger<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<PassengerId> {
        let now = self.clock.current_tick;
        if !self.generator.is_open(now) {
            let err = SimError::GenerationClosed {
                now_secs:    self.clock.elapsed_secs(),
                cutoff_secs: self.config.generation_cutoff_secs,
            };
            warn!(%err, "manual passenger injection declined");
            return Err(err);
        }

        let passenger = self.generator.spawn(now, &self.stops, &mut self.rng)?;
        let id = passenger.id;
        debug!(%now, passenger = %id, origin = %passenger.origin, destination = %passenger.destination, "passenger injected");
        observer.on_passenger_spawned(&passenger);
        self.waiting.push(passenger);
        Ok(id)
    }

    // ── Loop ──────────────────────────────────────────────────────────────

    /// One rendered frame.  Advances the simulation on every
    /// `frames_per_tick`-th frame; paused frames are not counted.
    pub fn on_frame<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickOutcome> {
        if self.paused {
            return Ok(TickOutcome::Paused);
        }
        self.frames += 1;
        if self.frames % self.config.frames_per_tick as u64 != 0 {
            return Ok(TickOutcome::Throttled);
        }
        self.tick(observer)
    }

    /// Advance exactly one tick, unless paused or at the time limit.
    pub fn tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickOutcome> {
        if self.paused {
            return Ok(TickOutcome::Paused);
        }
        if self.limit_reached {
            self.paused = true;
            return Ok(TickOutcome::LimitReached);
        }

        self.clock.advance();
        let now = self.clock.current_tick;

        if now >= self.limit {
            self.limit_reached = true;
            self.paused = true;
            info!(
                %now,
                secs = self.clock.elapsed_secs(),
                completed = self.completed.len(),
                generated = self.generator.total_generated(),
                "time limit reached; simulation paused"
            );
            observer.on_time_limit(now);
            return Ok(TickOutcome::LimitReached);
        }

        observer.on_tick_start(now);
        let tick_secs = self.clock.tick_secs();

        // ── Bus: move or dwell (drop off, then board FCFS) ────────────────
        let step = self.bus.update(now, tick_secs, &self.stops, &mut self.waiting)?;

        // ── Riders ────────────────────────────────────────────────────────
        for p in &mut self.waiting {
            p.update(now, tick_secs);
        }
        for p in self.bus.onboard_mut() {
            p.update(now, tick_secs);
        }

        let mut report = TickReport {
            tick:          now,
            arrived_at:    step.arrived_at,
            departed_from: step.departed_from,
            boarded:       step.boarded,
            ..TickReport::default()
        };

        // ── History ───────────────────────────────────────────────────────
        for passenger in step.dropped_off {
            observer.on_passenger_completed(&passenger);
            report.dropped_off.push(passenger.id);
            self.completed.push(passenger);
        }

        // ── Generator ─────────────────────────────────────────────────────
        if self.generator.trial(now, &mut self.rng) {
            let passenger = self.generator.spawn(now, &self.stops, &mut self.rng)?;
            debug!(%now, passenger = %passenger.id, origin = %passenger.origin, destination = %passenger.destination, "passenger spawned");
            observer.on_passenger_spawned(&passenger);
            report.spawned = Some(passenger.id);
            self.waiting.push(passenger);
        }

        observer.on_tick_end(now, &report);
        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0 % interval == 0 {
            observer.on_snapshot(now, &self.snapshot());
        }

        Ok(TickOutcome::Advanced(report))
    }

    /// Run from the current tick until the time limit (or until something
    /// pauses the simulation), then call `on_sim_end`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            match self.tick(observer)? {
                TickOutcome::Advanced(_) | TickOutcome::Throttled => {}
                TickOutcome::Paused | TickOutcome::LimitReached => break,
            }
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Attempt exactly `n` ticks; stops early at the time limit.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            if let TickOutcome::Paused | TickOutcome::LimitReached = self.tick(observer)? {
                break;
            }
        }
        Ok(())
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> SimSnapshot<'_> {
        SimSnapshot {
            tick:               self.clock.current_tick,
            clock_secs:         self.clock.elapsed_secs(),
            time_limit_secs:    self.config.time_limit_secs,
            cutoff_secs:        self.config.generation_cutoff_secs,
            paused:             self.paused,
            time_limit_reached: self.limit_reached,
            generation_enabled: self.generator.enabled(),
            generation_open:    self.generator.is_open(self.clock.current_tick),
            total_generated:    self.generator.total_generated(),
            bus:                &self.bus,
            stops:              &self.stops,
            waiting:            &self.waiting,
            completed:          &self.completed,
            metrics:            self.metrics(),
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::compute(&self.completed, &self.clock, self.bus.busy_ticks())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn stops(&self) -> &StopRegistry {
        &self.stops
    }

    pub fn waiting(&self) -> &[Passenger] {
        &self.waiting
    }

    pub fn completed(&self) -> &[Passenger] {
        &self.completed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_limit_reached(&self) -> bool {
        self.limit_reached
    }

    pub fn generation_enabled(&self) -> bool {
        self.generator.enabled()
    }

    pub fn generation_open(&self) -> bool {
        self.generator.is_open(self.clock.current_tick)
    }

    pub fn total_generated(&self) -> u64 {
        self.generator.total_generated()
    }

    /// Test hook: put a hand-built passenger into the waiting set.
    #[cfg(test)]
    pub(crate) fn push_waiting(&mut self, passenger: Passenger) {
        self.waiting.push(passenger);
    }
}
