//! Text panels drawn from a `SimSnapshot`.

use std::fmt::Write as _;

use fcfs_core::{SimClock, SimConfig};
use fcfs_output::GanttTimeline;
use fcfs_sim::SimSnapshot;
use fcfs_transit::Passenger;

use crate::view::ViewState;

pub struct TextRenderer {
    clock:           SimClock,
    /// Visible rows of the statistics table.
    pub table_rows:  usize,
    /// Visible Gantt bars.
    pub gantt_rows:  usize,
    /// Gantt bar width in characters.
    pub gantt_width: usize,
    /// Seconds covered by the Gantt window.
    pub gantt_span:  f64,
}

impl TextRenderer {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            clock:       config.make_clock(),
            table_rows:  8,
            gantt_rows:  10,
            gantt_width: 60,
            gantt_span:  config.time_limit_secs,
        }
    }

    /// Every panel, top to bottom.
    pub fn frame(&self, snapshot: &SimSnapshot<'_>, timeline: &GanttTimeline, view: &ViewState) -> String {
        let sections = [
            self.status_lines(snapshot),
            self.stats_lines(snapshot),
            self.route_lines(snapshot),
            self.table_lines(snapshot, view),
            self.gantt_lines(timeline, view),
        ];
        sections.map(|lines| lines.join("\n")).join("\n\n")
    }

    /// Clock, generation status, pause banner.
    pub fn status_lines(&self, s: &SimSnapshot<'_>) -> Vec<String> {
        let mut lines = vec![format!(
            "Simulation Time: {:.1}s / {}s",
            s.clock_secs, s.time_limit_secs
        )];
        lines.push(if !s.generation_open {
            format!("Passenger Generation: STOPPED ({}s cutoff reached)", s.cutoff_secs)
        } else if s.generation_enabled {
            "Passenger Generation: ON (press A to toggle)".to_owned()
        } else {
            "Passenger Generation: OFF (press A to toggle)".to_owned()
        });
        if s.paused {
            lines.push("PAUSED".to_owned());
            if s.time_limit_reached {
                lines.push(format!(
                    "{}s time limit reached. Press SPACE to continue.",
                    s.time_limit_secs
                ));
            }
        }
        lines
    }

    /// The "Average Statistics" panel.
    pub fn stats_lines(&self, s: &SimSnapshot<'_>) -> Vec<String> {
        let m = &s.metrics;
        vec![
            "Average Statistics".to_owned(),
            format!("Total Passengers: {}", s.total_generated),
            format!("Waiting: {}", s.waiting_count()),
            format!("On Bus: {}", s.onboard_count()),
            format!("Completed: {}", s.completed_count()),
            format!("Average Wait Time: {:.2}s", m.avg_wait_secs),
            format!("Average Response Time: {:.2}s", m.avg_response_secs),
            format!("Average Ride Time: {:.2}s", m.avg_ride_secs),
            format!("Average Turnaround Time: {:.2}s", m.avg_turnaround_secs),
            format!("Throughput: {:.2} pass/s", m.throughput_per_sec),
            format!("Bus Utilization: {:.1}%", m.utilization_pct),
        ]
    }

    /// Bus line plus one FCFS queue per stop.
    pub fn route_lines(&self, s: &SimSnapshot<'_>) -> Vec<String> {
        let bus = s.bus;
        let mut lines = vec![format!(
            "Bus: {} at {:.1}, {}, {}/{} onboard",
            bus.state().as_str().to_uppercase(),
            bus.position(),
            bus.current_stop(),
            bus.onboard().len(),
            bus.capacity(),
        )];
        for (stop, queue) in s.stops.indices().zip(s.queues()) {
            let mut line = format!("  {:<7}|", stop.to_string());
            for p in queue {
                let _ = write!(line, " {}→{}", p.id, p.destination.0 + 1);
            }
            lines.push(line);
        }
        lines
    }

    /// Completed-passenger table, newest rows at the bottom.
    pub fn table_lines(&self, s: &SimSnapshot<'_>, view: &ViewState) -> Vec<String> {
        let mut lines = vec![format!(
            "{:<6}{:>9}{:>8}{:>9}{:>12}{:>8}{:>12}",
            "ID", "Arrival", "Ride", "Start", "Completion", "Wait", "Turnaround"
        )];
        let window = view.table_window(s.completed.len(), self.table_rows);
        for p in &s.completed[window] {
            lines.push(self.table_row(p));
        }
        lines
    }

    fn table_row(&self, p: &Passenger) -> String {
        let secs = |t: Option<fcfs_core::Tick>| match t {
            Some(t) => format!("{:.1}s", self.clock.secs_at(t)),
            None => "N/A".to_owned(),
        };
        format!(
            "{:<6}{:>9}{:>8}{:>9}{:>12}{:>8}{:>12}",
            p.id.to_string(),
            format!("{:.1}s", self.clock.secs_at(p.arrival)),
            format!("{:.1}s", p.ride_secs),
            secs(p.start()),
            secs(p.completion()),
            format!("{:.1}s", self.clock.ticks_to_secs(p.wait_ticks())),
            match p.turnaround_ticks() {
                Some(t) => format!("{:.1}s", self.clock.ticks_to_secs(t)),
                None => "N/A".to_owned(),
            },
        )
    }

    /// Bars overlapping the current Gantt window, before vertical scrolling.
    pub fn gantt_bar_count(&self, timeline: &GanttTimeline, view: &ViewState) -> usize {
        timeline.visible(&self.clock, view.gantt_offset_secs, self.gantt_span).count()
    }

    /// Occupancy bars over the window starting at the view's offset.  Bars
    /// entirely outside the window are skipped.
    pub fn gantt_lines(&self, timeline: &GanttTimeline, view: &ViewState) -> Vec<String> {
        let from = view.gantt_offset_secs;
        let to = from + self.gantt_span;
        let mut lines = vec![format!("Gantt Chart {from:.0}s to {to:.0}s")];

        let width = self.gantt_width.max(1);
        let bars = timeline.visible(&self.clock, from, self.gantt_span);
        for e in bars.skip(view.gantt_row).take(self.gantt_rows) {
            let start = self.clock.secs_at(e.start);
            let end = self.clock.secs_at(e.end);
            let bar: String = (0..width)
                .map(|col| {
                    let lo = from + self.gantt_span * col as f64 / width as f64;
                    let hi = from + self.gantt_span * (col + 1) as f64 / width as f64;
                    if start < hi && end >= lo { '#' } else { '.' }
                })
                .collect();
            lines.push(format!("{:<6}|{bar}|", e.passenger.to_string()));
        }
        lines
    }
}
