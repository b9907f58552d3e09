#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-frame driver for the LifeTime traffic engine.
//!
//! Each frame the driver asks the admission controller whether a new occupant
//! may enter, plans and interpolates its itinerary when admitted, advances the
//! registry, and forwards the resulting events to a [`SceneAdapter`]. Admission
//! for a frame always happens before that frame's advancement, so a newly
//! admitted occupant is shown at its spawn position on the same frame.

mod clock;
mod config;

pub use clock::FrameClock;
pub use config::{
    Config, ConfigError, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_FRAME_LIMIT, DEFAULT_RNG_SEED,
    DEFAULT_STEPS_PER_SEGMENT,
};

use lifetime_traffic_core::{
    population_label, Command, Event, FrameIndex, OccupantId, PopulationSnapshot, SceneAdapter,
    TrafficError,
};
use lifetime_traffic_system_admission::{self as admission, Admission};
use lifetime_traffic_system_interpolation::interpolate;
use lifetime_traffic_system_planner::{plan, random_color, RandomSource, SeededRandom};
use lifetime_traffic_world::{self as world, query, World};
use tracing::debug;

/// Summary of the work performed during a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Frame that was processed.
    pub frame: FrameIndex,
    /// Occupant admitted during the frame, if any.
    pub admitted: Option<OccupantId>,
    /// Number of footprints pushed to the scene.
    pub advanced: usize,
    /// Occupants that exhausted their path during the frame.
    pub retired: Vec<OccupantId>,
    /// Population after the frame finished processing.
    pub population: PopulationSnapshot,
}

/// Owns the registry, admission controller and random source for one run.
#[derive(Debug)]
pub struct Simulation<R = SeededRandom> {
    world: World,
    admission: Admission,
    steps_per_segment: u32,
    rng: R,
    events: Vec<Event>,
}

impl Simulation<SeededRandom> {
    /// Creates a simulation seeded from the configuration.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_random(config, SeededRandom::seeded(config.rng_seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Creates a simulation drawing randomness from the provided source.
    pub fn with_random(config: &Config, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            admission: Admission::new(admission::Config::new(
                config.spawn_period,
                config.population_cap,
            )),
            steps_per_segment: config.steps_per_segment,
            rng,
            events: Vec::new(),
        })
    }

    /// Runs the full per-frame algorithm and pushes the outcome into `scene`.
    pub fn tick<S>(&mut self, frame: FrameIndex, scene: &mut S) -> Result<TickReport, TrafficError>
    where
        S: SceneAdapter + ?Sized,
    {
        self.events.clear();

        let decision = self.admission.decide(frame, query::population(&self.world));
        if decision.is_admit() {
            self.admit()?;
        }

        world::apply(&mut self.world, Command::Tick { frame }, &mut self.events);

        Ok(present(&self.events, scene))
    }

    fn admit(&mut self) -> Result<(), TrafficError> {
        let itinerary = plan(&mut self.rng);
        let path = interpolate(&itinerary, self.steps_per_segment)?;
        let color = random_color(&mut self.rng);
        world::apply(
            &mut self.world,
            Command::AdmitOccupant {
                itinerary,
                path,
                color,
            },
            &mut self.events,
        );
        Ok(())
    }

    /// Read-only access to the registry.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current population counters.
    #[must_use]
    pub fn population(&self) -> PopulationSnapshot {
        query::population(&self.world)
    }

    /// Reports whether no occupant is active and none will be admitted again.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        let population = self.population();
        population.active == 0 && population.admitted >= self.admission.config().population_cap()
    }
}

/// Translates registry events into scene adapter calls.
pub fn present<S>(events: &[Event], scene: &mut S) -> TickReport
where
    S: SceneAdapter + ?Sized,
{
    let mut report = TickReport::default();

    for event in events {
        match event {
            Event::OccupantAdmitted { occupant, origin, .. } => {
                debug!(
                    occupant = occupant.get(),
                    x = origin.x(),
                    y = origin.y(),
                    "occupant admitted"
                );
                report.admitted = Some(*occupant);
            }
            Event::TimeAdvanced { frame } => {
                report.frame = *frame;
            }
            Event::OccupantAdvanced {
                occupant,
                position,
                color,
            } => {
                scene.set_footprint(*occupant, *position, *color);
                report.advanced += 1;
            }
            Event::OccupantRetired { occupant } => {
                debug!(occupant = occupant.get(), "occupant retired");
                scene.remove_footprint(*occupant);
                report.retired.push(*occupant);
            }
            Event::PopulationChanged { active, admitted } => {
                scene.set_population_label(&population_label(*active));
                report.population = PopulationSnapshot {
                    active: *active,
                    admitted: *admitted,
                };
            }
        }
    }

    report
}
