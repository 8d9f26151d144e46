//! A single rider and its lifecycle.

use fcfs_core::{PassengerId, StopIndex, Tick};

use crate::{TransitError, TransitResult};

/// Lifecycle state.  Transitions only move forward:
/// `Waiting → Onboard → Completed`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassengerState {
    #[default]
    Waiting,
    Onboard,
    Completed,
}

impl PassengerState {
    pub fn as_str(self) -> &'static str {
        match self {
            PassengerState::Waiting   => "waiting",
            PassengerState::Onboard   => "onboard",
            PassengerState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for PassengerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rider.
///
/// All timestamps are ticks; durations derived from them (`wait_ticks`,
/// `turnaround_ticks`, `response_ticks`) are tick counts.  Convert with
/// `SimClock::ticks_to_secs` for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Passenger {
    pub id:          PassengerId,
    pub arrival:     Tick,
    /// Advisory ride length drawn at spawn, in seconds.
    pub ride_secs:   f64,
    pub origin:      StopIndex,
    pub destination: StopIndex,

    state:          PassengerState,
    remaining_secs: f64,
    start:          Option<Tick>,
    completion:     Option<Tick>,
    wait_ticks:     u64,
}

impl Passenger {
    /// Create a waiting passenger.  Fails if `origin == destination`.
    pub fn new(
        id:          PassengerId,
        arrival:     Tick,
        ride_secs:   f64,
        origin:      StopIndex,
        destination: StopIndex,
    ) -> TransitResult<Self> {
        if origin == destination {
            return Err(TransitError::SameOriginAndDestination { id, stop: origin });
        }
        Ok(Self {
            id,
            arrival,
            ride_secs,
            origin,
            destination,
            state:          PassengerState::Waiting,
            remaining_secs: ride_secs,
            start:          None,
            completion:     None,
            wait_ticks:     0,
        })
    }

    #[inline]
    pub fn state(&self) -> PassengerState {
        self.state
    }

    /// FCFS sort key: arrival first, id breaks ties.
    #[inline]
    pub fn fcfs_key(&self) -> (Tick, PassengerId) {
        (self.arrival, self.id)
    }

    /// Per-tick update.  Waiting passengers refresh their wait time;
    /// onboard passengers count down the advisory ride time.
    pub fn update(&mut self, now: Tick, tick_secs: f64) {
        match self.state {
            PassengerState::Waiting => {
                self.wait_ticks = now.since(self.arrival);
            }
            PassengerState::Onboard => {
                self.remaining_secs = (self.remaining_secs - tick_secs).max(0.0);
            }
            PassengerState::Completed => {}
        }
    }

    /// `Waiting → Onboard`.  Latches the service start and freezes the wait.
    /// Returns `false` (and changes nothing) from any other state.
    pub fn board(&mut self, now: Tick) -> bool {
        if self.state != PassengerState::Waiting {
            return false;
        }
        self.state = PassengerState::Onboard;
        self.wait_ticks = now.since(self.arrival);
        self.start = Some(now);
        true
    }

    /// `Onboard → Completed`.  Latches the completion time exactly once;
    /// calling again on a completed passenger is a no-op returning `false`.
    pub fn complete(&mut self, now: Tick) -> bool {
        if self.state != PassengerState::Onboard {
            return false;
        }
        self.state = PassengerState::Completed;
        self.completion = Some(now);
        true
    }

    pub fn start(&self) -> Option<Tick> {
        self.start
    }

    pub fn completion(&self) -> Option<Tick> {
        self.completion
    }

    pub fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    /// Ticks spent waiting: live while waiting, frozen once boarded.
    pub fn wait_ticks(&self) -> u64 {
        self.wait_ticks
    }

    /// Arrival → completion, once completed.
    pub fn turnaround_ticks(&self) -> Option<u64> {
        self.completion.map(|c| c.since(self.arrival))
    }

    /// Arrival → start of service, once boarded.
    pub fn response_ticks(&self) -> Option<u64> {
        self.start.map(|s| s.since(self.arrival))
    }

    /// Fraction of the advisory ride elapsed, in `[0.0, 1.0]`.  Display only.
    pub fn progress(&self) -> f64 {
        if self.ride_secs <= 0.0 {
            return 1.0;
        }
        (1.0 - self.remaining_secs / self.ride_secs).clamp(0.0, 1.0)
    }
}
