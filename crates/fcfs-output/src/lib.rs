//! `fcfs-output` — output writers for the fcfs-bus simulation.
//!
//! | Backend | Files created                                                |
//! |---------|--------------------------------------------------------------|
//! | CSV     | `passenger_stats.csv`, `tick_summaries.csv`, `gantt.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `fcfs_sim::SimObserver`.
//! [`GanttTimeline`] is usable on its own by renderers that draw the
//! occupancy chart live.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fcfs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, &config);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod timeline;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{PassengerRow, TickSummaryRow, TimelineRow};
pub use timeline::{GanttTimeline, TimelineEntry};
pub use writer::OutputWriter;
