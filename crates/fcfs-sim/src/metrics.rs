//! Scheduling metrics over the completed-passenger history.

use fcfs_core::SimClock;
use fcfs_transit::Passenger;

/// Fleet-wide averages, recomputed on demand.
///
/// Every average is `0.0` while the history is empty.  Throughput and
/// utilization divide by elapsed seconds floored at 1.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub completed:           usize,
    pub avg_wait_secs:       f64,
    pub avg_turnaround_secs: f64,
    pub avg_response_secs:   f64,
    pub avg_ride_secs:       f64,
    /// Completed passengers per simulated second.
    pub throughput_per_sec:  f64,
    /// Share of elapsed time the bus spent moving, in percent.
    pub utilization_pct:     f64,
}

impl Metrics {
    pub fn compute(completed: &[Passenger], clock: &SimClock, busy_ticks: u64) -> Self {
        let elapsed = clock.elapsed_secs().max(1.0);
        let utilization_pct = clock.ticks_to_secs(busy_ticks) / elapsed * 100.0;

        if completed.is_empty() {
            return Self { utilization_pct, ..Self::default() };
        }

        Self {
            completed:           completed.len(),
            avg_wait_secs:       mean(completed, |p| clock.ticks_to_secs(p.wait_ticks())),
            avg_turnaround_secs: mean(completed, |p| clock.ticks_to_secs(p.turnaround_ticks().unwrap_or(0))),
            avg_response_secs:   mean(completed, |p| clock.ticks_to_secs(p.response_ticks().unwrap_or(0))),
            avg_ride_secs:       mean(completed, |p| p.ride_secs),
            throughput_per_sec:  completed.len() as f64 / elapsed,
            utilization_pct,
        }
    }
}

/// Mean of `f` over a non-empty slice.
fn mean<F: Fn(&Passenger) -> f64>(passengers: &[Passenger], f: F) -> f64 {
    passengers.iter().map(f).sum::<f64>() / passengers.len() as f64
}
