//! Gantt occupancy timeline: when each passenger was on the bus.

use std::collections::HashMap;

use fcfs_core::{PassengerId, SimClock, Tick};

use crate::TimelineRow;

/// Number of distinct display rows handed out before everyone shares row 0.
pub const MAX_ROWS: u32 = 50;

/// One passenger's bar: first and last tick seen onboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub passenger: PassengerId,
    pub start:     Tick,
    pub end:       Tick,
    pub row:       u32,
}

/// Append-only record of onboard intervals, in boarding order.
///
/// Rows are assigned on first sight and never reused: the first
/// [`MAX_ROWS`] passengers get rows `0..MAX_ROWS`, later ones row 0.
#[derive(Debug, Default, Clone)]
pub struct GanttTimeline {
    entries: Vec<TimelineEntry>,
    index:   HashMap<PassengerId, usize>,
}

impl GanttTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a bar for `passenger` at `tick`, or extend its existing bar.
    pub fn touch(&mut self, passenger: PassengerId, tick: Tick) {
        if let Some(&i) = self.index.get(&passenger) {
            let entry = &mut self.entries[i];
            entry.end = entry.end.max(tick);
            return;
        }

        let assigned = self.entries.len() as u32;
        let row = if assigned < MAX_ROWS { assigned } else { 0 };
        self.index.insert(passenger, self.entries.len());
        self.entries.push(TimelineEntry { passenger, start: tick, end: tick, row });
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bars overlapping the window `[from_secs, from_secs + span_secs]`.
    pub fn visible<'a>(
        &'a self,
        clock:     &'a SimClock,
        from_secs: f64,
        span_secs: f64,
    ) -> impl Iterator<Item = &'a TimelineEntry> + 'a {
        let to_secs = from_secs + span_secs;
        self.entries.iter().filter(move |e| {
            clock.secs_at(e.end) >= from_secs && clock.secs_at(e.start) <= to_secs
        })
    }

    /// Rows in seconds for an [`OutputWriter`][crate::OutputWriter].
    pub fn rows(&self, clock: &SimClock, run: u32) -> Vec<TimelineRow> {
        self.entries
            .iter()
            .map(|e| TimelineRow {
                run,
                passenger_id: e.passenger.0,
                row:          e.row,
                start_secs:   clock.secs_at(e.start),
                end_secs:     clock.secs_at(e.end),
            })
            .collect()
    }
}
