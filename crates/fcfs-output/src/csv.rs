//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `passenger_stats.csv`
//! - `tick_summaries.csv`
//! - `gantt.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, PassengerRow, TickSummaryRow, TimelineRow};

pub const PASSENGER_HEADER: [&str; 10] = [
    "run",
    "passenger_id",
    "origin",
    "destination",
    "arrival_secs",
    "ride_secs",
    "start_secs",
    "completion_secs",
    "wait_secs",
    "turnaround_secs",
];

pub const SUMMARY_HEADER: [&str; 10] = [
    "run",
    "tick",
    "clock_secs",
    "waiting",
    "onboard",
    "completed",
    "avg_wait_secs",
    "avg_turnaround_secs",
    "throughput_per_sec",
    "utilization_pct",
];

pub const GANTT_HEADER: [&str; 5] = ["run", "passenger_id", "row", "start_secs", "end_secs"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    passengers: Writer<File>,
    summaries:  Writer<File>,
    gantt:      Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut passengers = Writer::from_path(dir.join("passenger_stats.csv"))?;
        passengers.write_record(PASSENGER_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut gantt = Writer::from_path(dir.join("gantt.csv"))?;
        gantt.write_record(GANTT_HEADER)?;

        Ok(Self {
            passengers,
            summaries,
            gantt,
            finished: false,
        })
    }
}

fn secs(value: f64) -> String {
    format!("{value:.3}")
}

impl OutputWriter for CsvWriter {
    fn write_passenger(&mut self, row: &PassengerRow) -> OutputResult<()> {
        self.passengers.write_record(&[
            row.run.to_string(),
            row.passenger_id.to_string(),
            row.origin.to_string(),
            row.destination.to_string(),
            secs(row.arrival_secs),
            secs(row.ride_secs),
            secs(row.start_secs),
            secs(row.completion_secs),
            secs(row.wait_secs),
            secs(row.turnaround_secs),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.run.to_string(),
            row.tick.to_string(),
            secs(row.clock_secs),
            row.waiting.to_string(),
            row.onboard.to_string(),
            row.completed.to_string(),
            secs(row.avg_wait_secs),
            secs(row.avg_turnaround_secs),
            format!("{:.4}", row.throughput_per_sec),
            format!("{:.2}", row.utilization_pct),
        ])?;
        Ok(())
    }

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()> {
        for row in rows {
            self.gantt.write_record(&[
                row.run.to_string(),
                row.passenger_id.to_string(),
                row.row.to_string(),
                secs(row.start_secs),
                secs(row.end_secs),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.passengers.flush()?;
        self.summaries.flush()?;
        self.gantt.flush()?;
        Ok(())
    }
}
