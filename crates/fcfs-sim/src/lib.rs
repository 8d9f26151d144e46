//! `fcfs-sim` — the simulation loop for a single bus serving fixed stops
//! first-come-first-served.
//!
//! # Tick order
//!
//! ```text
//! each tick (unless paused):
//!   ① Clock    : advance one tick; at the time limit pause and stop.
//!   ② Bus      : move, or dwell: drop off riders for this stop, then
//!                 board waiting passengers in (arrival, id) order.
//!   ③ Riders   : refresh wait times / advisory ride countdowns.
//!   ④ History  : dropped-off riders are appended to the completed list.
//!   ⑤ Generator: before the cutoff, maybe spawn one passenger.
//!   ⑥ Observers: tick report, periodic snapshot.
//! ```
//!
//! A renderer drives the loop one frame at a time with
//! [`Simulation::on_frame`] and reads [`Simulation::snapshot`] to draw.
//! Headless callers use [`Simulation::run`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fcfs_core::SimConfig;
//! use fcfs_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).seed(7).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{:?}", sim.metrics());
//! ```

pub mod builder;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use generator::Generator;
pub use metrics::Metrics;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Simulation, TickOutcome, TickReport};
pub use snapshot::SimSnapshot;
