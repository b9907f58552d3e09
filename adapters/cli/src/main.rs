#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the LifeTime Savage traffic simulation.

mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use lifetime_traffic_core::{FrameIndex, FACILITY_NAME};
use lifetime_traffic_rendering::{Presentation, RenderingBackend};
use lifetime_traffic_rendering_macroquad::MacroquadBackend;
use lifetime_traffic_simulation::{Config, FrameClock, Simulation, TickReport};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use self::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "lifetime-traffic",
    version,
    about = "Simulate occupant traffic around the LifeTime Savage facility"
)]
struct Cli {
    /// TOML file with run parameters; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Run a fixed number of frames without opening a window.
    #[arg(long)]
    headless: bool,
    #[command(flatten)]
    overrides: Overrides,
}

/// Entry point for the LifeTime traffic command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = config::resolve(cli.config.as_deref(), &cli.overrides)?;
    info!(
        seed = config.rng_seed,
        spawn_period = config.spawn_period,
        population_cap = config.population_cap,
        steps_per_segment = config.steps_per_segment,
        "starting {FACILITY_NAME} traffic simulation"
    );

    if cli.headless {
        let summary = run_headless(&config)?;
        info!(
            frames = summary.frames,
            admitted = summary.admitted,
            active = summary.final_active,
            "headless run finished"
        );
        println!("{summary}");
    } else {
        run_windowed(&config)?;
        info!("window closed");
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Totals gathered over a headless run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RunSummary {
    frames: u64,
    admitted: u32,
    retired: usize,
    peak_active: usize,
    final_active: usize,
}

impl RunSummary {
    fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        self.admitted = report.population.admitted;
        self.retired += report.retired.len();
        self.peak_active = self.peak_active.max(report.population.active);
        self.final_active = report.population.active;
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{FACILITY_NAME}: {} frames, {} admitted, {} retired, {} active (peak {})",
            self.frames, self.admitted, self.retired, self.final_active, self.peak_active
        )
    }
}

fn run_headless(config: &Config) -> Result<RunSummary> {
    let mut simulation = Simulation::new(config)?;
    let mut scene = Presentation::lifetime_savage()?.scene;
    let mut label = scene.population_label().to_owned();
    let mut summary = RunSummary::default();

    for index in 0..config.frame_limit {
        let report = simulation.tick(FrameIndex::new(index), &mut scene)?;
        summary.record(&report);

        if scene.population_label() != label {
            scene.population_label().clone_into(&mut label);
            info!(frame = index, %label, "population label changed");
        }
    }

    Ok(summary)
}

fn run_windowed(config: &Config) -> Result<()> {
    let mut simulation = Simulation::new(config)?;
    let mut clock = FrameClock::new(config.frame_interval());
    let mut due = Vec::new();
    let presentation = Presentation::lifetime_savage()?;

    MacroquadBackend::new()
        .with_vsync(true)
        .run(presentation, move |dt, scene| {
            clock.advance(dt, &mut due);
            for frame in due.drain(..) {
                if let Err(error) = simulation.tick(frame, scene) {
                    error!(frame = frame.get(), %error, "failed to advance frame");
                }
            }
        })
}
