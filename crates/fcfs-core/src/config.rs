//! Top-level simulation configuration.
//!
//! Defaults reproduce the stock scenario: five stops 200 units apart, a
//! 10-seat bus, passengers generated for the first 25 s of a 30 s run.
//! Applications typically load a JSON file (with the `serde` feature) and
//! override individual fields from the command line before calling
//! [`SimConfig::validate`].

use crate::{CoreError, CoreResult, SimClock, Tick};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulation ticks per simulated second.  Also the target frame rate.
    pub ticks_per_sec: u32,

    /// Rendered frames per simulation tick.  1 = advance every frame.
    pub frames_per_tick: u32,

    /// Base per-tick probability of spawning a passenger.  Early in the run
    /// the effective probability is up to twice this.
    pub generation_rate: f64,

    /// Inclusive ride-duration range in seconds.
    pub min_ride_secs: f64,
    pub max_ride_secs: f64,

    /// Maximum passengers onboard at once.
    pub bus_capacity: usize,

    /// Bus speed in position units per second.
    pub bus_speed: f64,

    /// Seconds the bus dwells at each stop.
    pub dwell_secs: f64,

    /// Hard limit: the simulation pauses when the clock reaches this.
    pub time_limit_secs: f64,

    /// No passengers (automatic or manual) are created at or after this.
    pub generation_cutoff_secs: f64,

    /// Stop positions along the route axis, in visiting order.
    pub stop_positions: Vec<f64>,

    /// Where the bus starts; it first heads to stop 0.
    pub bus_start_position: f64,

    /// The bus is "at" a stop once within this distance of it.
    pub arrival_tolerance: f64,

    /// Whether automatic generation starts enabled.
    pub auto_generate: bool,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit an observer snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks_per_sec:          60,
            frames_per_tick:        1,
            generation_rate:        0.01,
            min_ride_secs:          5.0,
            max_ride_secs:          15.0,
            bus_capacity:           10,
            bus_speed:              100.0,
            dwell_secs:             2.0,
            time_limit_secs:        30.0,
            generation_cutoff_secs: 25.0,
            stop_positions:         vec![150.0, 350.0, 550.0, 750.0, 950.0],
            bus_start_position:     0.0,
            arrival_tolerance:      5.0,
            auto_generate:          true,
            seed:                   42,
            output_interval_ticks:  60,
        }
    }
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_sec)
    }

    /// The tick at which the clock stops: the first one at or past the limit.
    pub fn time_limit_tick(&self) -> Tick {
        self.make_clock().first_tick_at(self.time_limit_secs)
    }

    /// First tick at which generation is closed (time ≥ cutoff).
    pub fn generation_cutoff_tick(&self) -> Tick {
        self.make_clock().first_tick_at(self.generation_cutoff_secs)
    }

    /// Dwell length in ticks (at least one, so every visit has a loading tick).
    pub fn dwell_ticks(&self) -> u64 {
        self.make_clock().ticks_for_secs(self.dwell_secs).max(1)
    }

    /// Check every field for values the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        fn bad(msg: impl Into<String>) -> CoreResult<()> {
            Err(CoreError::Config(msg.into()))
        }

        if self.ticks_per_sec == 0 {
            return bad("ticks_per_sec must be positive");
        }
        if self.frames_per_tick == 0 {
            return bad("frames_per_tick must be positive");
        }
        if !(self.generation_rate.is_finite() && self.generation_rate >= 0.0) {
            return bad(format!("generation_rate {} must be a non-negative number", self.generation_rate));
        }
        if !(self.min_ride_secs.is_finite() && self.min_ride_secs > 0.0) {
            return bad(format!("min_ride_secs {} must be positive", self.min_ride_secs));
        }
        if !(self.max_ride_secs.is_finite() && self.max_ride_secs >= self.min_ride_secs) {
            return bad(format!(
                "max_ride_secs {} must be at least min_ride_secs {}",
                self.max_ride_secs, self.min_ride_secs
            ));
        }
        if self.bus_capacity == 0 {
            return bad("bus_capacity must be positive");
        }
        if !(self.bus_speed.is_finite() && self.bus_speed > 0.0) {
            return bad(format!("bus_speed {} must be positive", self.bus_speed));
        }
        if !(self.dwell_secs.is_finite() && self.dwell_secs > 0.0) {
            return bad(format!("dwell_secs {} must be positive", self.dwell_secs));
        }
        if !(self.generation_cutoff_secs.is_finite() && self.generation_cutoff_secs > 0.0) {
            return bad(format!("generation_cutoff_secs {} must be positive", self.generation_cutoff_secs));
        }
        if !(self.time_limit_secs.is_finite() && self.time_limit_secs > self.generation_cutoff_secs) {
            return bad(format!(
                "time_limit_secs {} must be greater than generation_cutoff_secs {}",
                self.time_limit_secs, self.generation_cutoff_secs
            ));
        }
        if self.stop_positions.len() < 2 {
            return bad(format!(
                "route needs at least 2 stops, got {}",
                self.stop_positions.len()
            ));
        }
        if self.stop_positions.len() > u16::MAX as usize {
            return bad("too many stops");
        }
        if self.stop_positions.iter().any(|p| !p.is_finite()) || !self.bus_start_position.is_finite() {
            return bad("stop and bus positions must be finite");
        }
        if !(self.arrival_tolerance.is_finite() && self.arrival_tolerance >= 0.0) {
            return bad(format!("arrival_tolerance {} must be non-negative", self.arrival_tolerance));
        }
        Ok(())
    }
}
