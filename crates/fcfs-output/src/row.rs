//! Plain data row types written by output backends.

use fcfs_core::SimClock;
use fcfs_transit::Passenger;

/// Statistics for one completed passenger.  Stops are 0-based indices;
/// times are simulated seconds.  `run` counts from 1 and increases on every
/// reset, since passenger ids and ticks start over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerRow {
    pub run:             u32,
    pub passenger_id:    u32,
    pub origin:          u16,
    pub destination:     u16,
    pub arrival_secs:    f64,
    pub ride_secs:       f64,
    pub start_secs:      f64,
    pub completion_secs: f64,
    pub wait_secs:       f64,
    pub turnaround_secs: f64,
}

impl PassengerRow {
    /// `None` unless the passenger has both boarded and completed.
    pub fn from_completed(passenger: &Passenger, clock: &SimClock, run: u32) -> Option<Self> {
        let start = passenger.start()?;
        let completion = passenger.completion()?;
        Some(Self {
            run,
            passenger_id:    passenger.id.0,
            origin:          passenger.origin.0,
            destination:     passenger.destination.0,
            arrival_secs:    clock.secs_at(passenger.arrival),
            ride_secs:       passenger.ride_secs,
            start_secs:      clock.secs_at(start),
            completion_secs: clock.secs_at(completion),
            wait_secs:       clock.ticks_to_secs(passenger.wait_ticks()),
            turnaround_secs: clock.ticks_to_secs(completion.since(passenger.arrival)),
        })
    }
}

/// Periodic whole-system summary, written every `output_interval_ticks`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub run:                 u32,
    pub tick:                u64,
    pub clock_secs:          f64,
    pub waiting:             u64,
    pub onboard:             u64,
    pub completed:           u64,
    pub avg_wait_secs:       f64,
    pub avg_turnaround_secs: f64,
    pub throughput_per_sec:  f64,
    pub utilization_pct:     f64,
}

/// One bar of the Gantt occupancy chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineRow {
    pub run:          u32,
    pub passenger_id: u32,
    /// Display row; rows past the first 50 all share row 0.
    pub row:          u32,
    pub start_secs:   f64,
    pub end_secs:     f64,
}
