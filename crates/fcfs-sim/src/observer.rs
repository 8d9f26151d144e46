//! Observer hooks for progress reporting and data collection.

use fcfs_core::Tick;
use fcfs_transit::Passenger;

use crate::{SimSnapshot, TickReport};

/// Callbacks invoked by [`Simulation`][crate::Simulation] while it runs.
///
/// All methods default to no-ops so implementors only override what they
/// care about.
///
/// # Example: drop-off logger
///
/// ```rust,ignore
/// struct DropOffs;
///
/// impl SimObserver for DropOffs {
///     fn on_passenger_completed(&mut self, p: &Passenger) {
///         println!("{} reached {}", p.id, p.destination);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the clock advances, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of every advanced tick.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called every `config.output_interval_ticks` ticks with a read-only
    /// view of the whole simulation.
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &SimSnapshot<'_>) {}

    /// A passenger was created, automatically or by manual injection.
    fn on_passenger_spawned(&mut self, _passenger: &Passenger) {}

    /// A passenger was dropped off and moved to the history.
    fn on_passenger_completed(&mut self, _passenger: &Passenger) {}

    /// The clock reached the hard time limit; the simulation is now paused.
    fn on_time_limit(&mut self, _tick: Tick) {}

    /// Called once when [`Simulation::run`][crate::Simulation::run] returns.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
