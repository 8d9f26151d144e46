//! CLI argument parsing for the fcfs-bus binary.

use std::path::PathBuf;

use clap::Parser;

use crate::control::{ScriptedControl, parse_scripted};

#[derive(Parser, Debug)]
#[command(name = "fcfs-bus", about = "Single bus serving fixed stops first-come-first-served")]
pub struct Cli {
    /// JSON file with configuration fields; missing fields keep their defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for passenger_stats.csv, tick_summaries.csv and gantt.csv
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Pace frames to ticks_per_sec per wall-clock second
    #[arg(long)]
    pub realtime: bool,

    /// Start with automatic passenger generation switched off
    #[arg(long)]
    pub no_auto_generate: bool,

    /// Print the panels every N simulated seconds (0 = only at the end)
    #[arg(long, default_value_t = 5.0)]
    pub report_every: f64,

    /// Scripted key press at a frontend time, e.g. `--at 3.5:n` or `--at 31:space`
    #[arg(long = "at", value_name = "SECS:KEY", value_parser = parse_scripted)]
    pub script: Vec<ScriptedControl>,
}
