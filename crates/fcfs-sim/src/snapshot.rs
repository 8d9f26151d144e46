//! Read-only view handed to renderers and observers.

use fcfs_core::{StopIndex, Tick};
use fcfs_transit::{Bus, Passenger, PassengerState, StopRegistry};

use crate::Metrics;

/// Everything a renderer needs to draw one frame.
///
/// Borrowed from the [`Simulation`][crate::Simulation]; cheap to build apart
/// from [`Metrics`], which is an O(completed) scan.  The snapshot is only
/// ever taken between ticks, so it always reflects a fully updated (or fully
/// paused) state.
pub struct SimSnapshot<'a> {
    pub tick:               Tick,
    pub clock_secs:         f64,
    pub time_limit_secs:    f64,
    pub cutoff_secs:        f64,
    pub paused:             bool,
    pub time_limit_reached: bool,
    /// Automatic generation switched on.
    pub generation_enabled: bool,
    /// Clock still before the generation cutoff.
    pub generation_open:    bool,
    pub total_generated:    u64,
    pub bus:                &'a Bus,
    pub stops:              &'a StopRegistry,
    /// Unordered; use [`queue_at`][Self::queue_at] for FCFS order.
    pub waiting:            &'a [Passenger],
    pub completed:          &'a [Passenger],
    pub metrics:            Metrics,
}

impl<'a> SimSnapshot<'a> {
    /// Passengers waiting at `stop`, front of the queue first.
    pub fn queue_at(&self, stop: StopIndex) -> Vec<&'a Passenger> {
        let waiting: &'a [Passenger] = self.waiting;
        let mut queue: Vec<&'a Passenger> = waiting
            .iter()
            .filter(|p| p.origin == stop && p.state() == PassengerState::Waiting)
            .collect();
        queue.sort_unstable_by_key(|p| p.fcfs_key());
        queue
    }

    /// One FCFS queue per stop, indexed by `StopIndex`.
    pub fn queues(&self) -> Vec<Vec<&'a Passenger>> {
        self.stops.indices().map(|s| self.queue_at(s)).collect()
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting
            .iter()
            .filter(|p| p.state() == PassengerState::Waiting)
            .count()
    }

    pub fn onboard_count(&self) -> usize {
        self.bus.onboard().len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}
