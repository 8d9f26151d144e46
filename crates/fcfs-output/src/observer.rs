//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use fcfs_core::{PassengerId, SimClock, SimConfig, Tick};
use fcfs_sim::{SimObserver, SimSnapshot, TickReport};
use fcfs_transit::Passenger;

use crate::row::{PassengerRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{GanttTimeline, OutputError, OutputResult};

/// A [`SimObserver`] that writes completed-passenger statistics, periodic
/// summaries, and the Gantt timeline to any [`OutputWriter`].
///
/// The observer owns the live timeline: bars of passengers still riding are
/// extended every tick, so a frontend can draw [`timeline`][Self::timeline]
/// directly.  Every row is stamped with the current run number.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    run:        u32,
    timeline:   GanttTimeline,
    /// Passengers boarded but not yet dropped off.
    riding:     Vec<PassengerId>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for tick to
    /// second conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            run:        1,
            timeline:   GanttTimeline::new(),
            riding:     Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn timeline(&self) -> &GanttTimeline {
        &self.timeline
    }

    /// 1-based run number stamped on every row.
    pub fn run(&self) -> u32 {
        self.run
    }

    /// Close the current run before a simulation reset.  Its timeline is
    /// written with riders cut off at `at`, then numbering moves to the next
    /// run.
    pub fn restart(&mut self, at: Tick) {
        self.flush_timeline(at);
        self.timeline = GanttTimeline::new();
        self.riding.clear();
        self.run += 1;
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_timeline(&mut self, end: Tick) {
        for &id in &self.riding {
            self.timeline.touch(id, end);
        }
        let rows = self.timeline.rows(&self.clock, self.run);
        let result = self.writer.write_timeline(&rows);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        for &id in &report.boarded {
            self.timeline.touch(id, tick);
            self.riding.push(id);
        }
        for &id in &report.dropped_off {
            self.timeline.touch(id, tick);
            self.riding.retain(|&r| r != id);
        }
        for &id in &self.riding {
            self.timeline.touch(id, tick);
        }
    }

    fn on_snapshot(&mut self, tick: Tick, snapshot: &SimSnapshot<'_>) {
        let metrics = &snapshot.metrics;
        let row = TickSummaryRow {
            run:                 self.run,
            tick:                tick.0,
            clock_secs:          snapshot.clock_secs,
            waiting:             snapshot.waiting_count() as u64,
            onboard:             snapshot.onboard_count() as u64,
            completed:           snapshot.completed_count() as u64,
            avg_wait_secs:       metrics.avg_wait_secs,
            avg_turnaround_secs: metrics.avg_turnaround_secs,
            throughput_per_sec:  metrics.throughput_per_sec,
            utilization_pct:     metrics.utilization_pct,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_passenger_completed(&mut self, passenger: &Passenger) {
        if let Some(row) = PassengerRow::from_completed(passenger, &self.clock, self.run) {
            let result = self.writer.write_passenger(&row);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.flush_timeline(final_tick);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
