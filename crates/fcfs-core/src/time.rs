//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  `SimClock` maps it to
//! simulated seconds:
//!
//!   elapsed_secs = tick / ticks_per_sec
//!
//! Keeping the integer tick canonical means dwell timers, cutoffs, and the
//! hard time limit compare exactly (no accumulated `+= 1/60` drift), and a
//! run that should stop at 30 s stops at exactly 30.0 s.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Ticks per simulated second.  Default: 60 (one tick per rendered frame).
    pub ticks_per_sec: u32,
    /// Advanced by `SimClock::advance()` each step.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ticks_per_sec,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Length of one tick in seconds.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        1.0 / self.ticks_per_sec as f64
    }

    /// Simulated seconds at `tick`.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 / self.ticks_per_sec as f64
    }

    /// Simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    /// Convert a tick count (a duration) to seconds.
    #[inline]
    pub fn ticks_to_secs(&self, ticks: u64) -> f64 {
        ticks as f64 / self.ticks_per_sec as f64
    }

    /// How many ticks span `secs` seconds, rounded to the nearest tick.
    /// Negative or NaN input yields zero.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        let ticks = (secs * self.ticks_per_sec as f64).round();
        if ticks.is_nan() || ticks <= 0.0 { 0 } else { ticks as u64 }
    }

    /// First tick whose time is at or after `secs`.  Negative or NaN input
    /// yields tick 0.
    #[inline]
    pub fn first_tick_at(&self, secs: f64) -> Tick {
        // Absorb representation error such as 0.1 × 60 = 6.000000000000001.
        let ticks = (secs * self.ticks_per_sec as f64 - 1e-9).ceil();
        if ticks.is_nan() || ticks <= 0.0 { Tick::ZERO } else { Tick(ticks as u64) }
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs())
    }
}
