//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, PassengerRow, TickSummaryRow, TimelineRow};

/// Sink for simulation output.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores the first one for [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one completed passenger's statistics.
    fn write_passenger(&mut self, row: &PassengerRow) -> OutputResult<()>;

    /// Write one periodic summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the occupancy timeline, normally once at the end of a run.
    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// `None` discards everything, for runs without an output directory.
impl<W: OutputWriter> OutputWriter for Option<W> {
    fn write_passenger(&mut self, row: &PassengerRow) -> OutputResult<()> {
        match self {
            Some(w) => w.write_passenger(row),
            None => Ok(()),
        }
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        match self {
            Some(w) => w.write_tick_summary(row),
            None => Ok(()),
        }
    }

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()> {
        match self {
            Some(w) => w.write_timeline(rows),
            None => Ok(()),
        }
    }

    fn finish(&mut self) -> OutputResult<()> {
        match self {
            Some(w) => w.finish(),
            None => Ok(()),
        }
    }
}
