//! fcfs-bus — headless frontend for the single-bus FCFS simulation.
//!
//! Drives the simulation one frame at a time, applies scripted key presses
//! (`--at SECS:KEY`), prints the text panels periodically, and optionally
//! writes CSV output.  Logs go to stderr; panels go to stdout.

mod cli;
mod control;
mod render;
mod view;

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fcfs_core::SimConfig;
use fcfs_output::{CsvWriter, SimOutputObserver};
use fcfs_sim::{SimBuilder, SimError, SimObserver, Simulation, TickOutcome, TickReport};

use cli::Cli;
use control::{Control, Script};
use render::TextRenderer;
use view::ViewState;

// ── Output ────────────────────────────────────────────────────────────────────

/// The observer also owns the Gantt timeline, so it is built even without
/// `--output`; the writer is then `None`.
fn open_output(dir: Option<&Path>, config: &SimConfig) -> Result<SimOutputObserver<Option<CsvWriter>>> {
    let writer = match dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating output directory {}", dir.display()))?;
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("opening CSV files in {}", dir.display()))?;
            Some(writer)
        }
        None => None,
    };
    Ok(SimOutputObserver::new(writer, config))
}

// ── Frontend ──────────────────────────────────────────────────────────────────

struct Frontend {
    sim:          Simulation,
    output:       SimOutputObserver<Option<CsvWriter>>,
    view:         ViewState,
    renderer:     TextRenderer,
    script:       Script,
    report_ticks: u64,
}

impl Frontend {
    /// Apply one key press.  Returns `false` on quit.
    fn apply(&mut self, control: Control) -> Result<bool> {
        match control {
            Control::Quit => {
                info!(clock = %self.sim.clock(), "quit requested");
                return Ok(false);
            }
            Control::TogglePause => {
                let paused = self.sim.toggle_pause();
                info!(paused, clock = %self.sim.clock(), "pause toggled");
            }
            Control::Reset => {
                self.output.restart(self.sim.now());
                self.sim.reset()?;
                self.view = ViewState::default();
            }
            Control::ToggleAutoGenerate => {
                self.sim.toggle_auto_generation();
            }
            Control::InjectPassenger => match self.sim.inject_passenger(&mut self.output) {
                Ok(id) => info!(passenger = %id, clock = %self.sim.clock(), "passenger added"),
                Err(SimError::GenerationClosed { cutoff_secs, .. }) => {
                    println!("Passenger generation stopped after {cutoff_secs} seconds");
                }
                Err(e) => return Err(e.into()),
            },
            view => {
                debug_assert!(view.is_view());
                let completed = self.sim.completed().len();
                self.view.apply(view, completed, self.renderer.table_rows);
            }
        }
        Ok(true)
    }

    fn after_tick(&mut self, report: &TickReport) {
        if self.report_ticks > 0 && report.tick.0 % self.report_ticks == 0 {
            self.print_frame();
        }
    }

    fn print_frame(&mut self) {
        let timeline = self.output.timeline();
        self.view.clamp(
            self.renderer.gantt_bar_count(timeline, &self.view),
            self.renderer.gantt_rows,
            self.sim.completed().len(),
            self.renderer.table_rows,
        );
        let frame = self.renderer.frame(&self.sim.snapshot(), timeline, &self.view);
        println!("{frame}\n{}", "=".repeat(72));
    }

    /// Close the last run's timeline and flush the CSV files.
    fn finish(&mut self) -> Result<()> {
        self.output.on_sim_end(self.sim.now());
        match self.output.take_error() {
            Some(e) => Err(e).context("writing CSV output"),
            None => Ok(()),
        }
    }

    /// Frame loop.  Ends on quit, or once the simulation is paused with no
    /// scripted presses left to resume it.
    fn run(&mut self, realtime: bool) -> Result<()> {
        let fps = f64::from(self.sim.config().ticks_per_sec);
        let frame_time = Duration::from_secs_f64(1.0 / fps);
        let mut next_frame = Instant::now();
        let mut frame: u64 = 0;

        loop {
            let frontend_secs = frame as f64 / fps;
            while let Some(control) = self.script.pop_due(frontend_secs) {
                if !self.apply(control)? {
                    return Ok(());
                }
            }
            if self.sim.is_paused() && self.script.is_empty() {
                return Ok(());
            }

            if let TickOutcome::Advanced(report) = self.sim.on_frame(&mut self.output)? {
                self.after_tick(&report);
            }
            frame += 1;

            if realtime {
                next_frame += frame_time;
                let now = Instant::now();
                if next_frame > now {
                    std::thread::sleep(next_frame - now);
                }
            }
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.no_auto_generate {
        config.auto_generate = false;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(
        seed = config.seed,
        stops = config.stop_positions.len(),
        capacity = config.bus_capacity,
        limit_secs = config.time_limit_secs,
        "starting fcfs-bus"
    );

    let script = Script::new(cli.script.clone());
    if !script.is_empty() {
        info!(presses = script.len(), "scripted controls loaded");
    }

    let clock = config.make_clock();
    let report_ticks = if cli.report_every > 0.0 { clock.ticks_for_secs(cli.report_every) } else { 0 };

    let mut app = Frontend {
        sim: SimBuilder::new(config.clone()).build()?,
        output: open_output(cli.output.as_deref(), &config)?,
        view: ViewState::default(),
        renderer: TextRenderer::new(&config),
        script,
        report_ticks,
    };

    let t0 = Instant::now();
    app.run(cli.realtime)?;
    let elapsed = t0.elapsed();

    app.print_frame();
    app.finish()?;

    let m = app.sim.metrics();
    println!(
        "Finished at {} in {:.3} s wall time: {} generated, {} completed, {:.1}% utilization",
        app.sim.clock(),
        elapsed.as_secs_f64(),
        app.sim.total_generated(),
        m.completed,
        m.utilization_pct,
    );
    if let Some(dir) = &cli.output {
        println!("CSV output written to {}", dir.display());
    }
    Ok(())
}
