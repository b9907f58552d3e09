#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Population admission controller deciding when a new occupant may enter.

use lifetime_traffic_core::{FrameIndex, PopulationSnapshot};

/// Default number of frames between admission opportunities.
pub const DEFAULT_SPAWN_PERIOD: u64 = 50;

/// Default maximum number of occupants admitted over a simulation.
pub const DEFAULT_POPULATION_CAP: u32 = 50;

/// Outcome of a single admission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdmitDecision {
    /// A new occupant may be created this frame.
    Admit,
    /// No occupant may be created this frame.
    Hold(HoldReason),
}

impl AdmitDecision {
    /// Reports whether the decision permits an admission.
    #[must_use]
    pub const fn is_admit(self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Explains why an admission was withheld.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoldReason {
    /// The frame does not fall on the spawn cadence.
    OffCadence,
    /// The population cap has already been reached.
    CapReached,
}

/// Decides whether a new occupant may be admitted on the provided frame.
///
/// Admission happens iff `frame mod spawn_period == 0` and fewer than `cap`
/// occupants were admitted so far. The active count does not influence the
/// decision: the cap bounds lifetime admissions, not concurrent occupancy. A
/// zero `spawn_period` never admits.
#[must_use]
pub fn maybe_admit(
    frame: FrameIndex,
    _active_count: usize,
    total_admitted: u32,
    cap: u32,
    spawn_period: u64,
) -> AdmitDecision {
    if spawn_period == 0 || frame.get() % spawn_period != 0 {
        return AdmitDecision::Hold(HoldReason::OffCadence);
    }

    if total_admitted >= cap {
        return AdmitDecision::Hold(HoldReason::CapReached);
    }

    AdmitDecision::Admit
}

/// Configuration parameters required to construct the admission controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    spawn_period: u64,
    population_cap: u32,
}

impl Config {
    /// Creates a new configuration using the provided cadence and cap.
    #[must_use]
    pub const fn new(spawn_period: u64, population_cap: u32) -> Self {
        Self {
            spawn_period,
            population_cap,
        }
    }

    /// Frames between admission opportunities.
    #[must_use]
    pub const fn spawn_period(&self) -> u64 {
        self.spawn_period
    }

    /// Maximum number of occupants admitted over a simulation.
    #[must_use]
    pub const fn population_cap(&self) -> u32 {
        self.population_cap
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SPAWN_PERIOD, DEFAULT_POPULATION_CAP)
    }
}

/// Pure system applying a fixed admission configuration to registry counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Admission {
    config: Config,
}

impl Admission {
    /// Creates a new admission controller using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the controller was built with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Decides whether the frame admits a new occupant given the population.
    #[must_use]
    pub fn decide(&self, frame: FrameIndex, population: PopulationSnapshot) -> AdmitDecision {
        maybe_admit(
            frame,
            population.active,
            population.admitted,
            self.config.population_cap,
            self.config.spawn_period,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spawn_period_never_admits() {
        for frame in 0..10 {
            assert_eq!(
                maybe_admit(FrameIndex::new(frame), 0, 0, 10, 0),
                AdmitDecision::Hold(HoldReason::OffCadence)
            );
        }
    }

    #[test]
    fn cadence_is_checked_before_cap() {
        assert_eq!(
            maybe_admit(FrameIndex::new(3), 0, 50, 50, 50),
            AdmitDecision::Hold(HoldReason::OffCadence)
        );
        assert_eq!(
            maybe_admit(FrameIndex::new(50), 0, 50, 50, 50),
            AdmitDecision::Hold(HoldReason::CapReached)
        );
    }

    #[test]
    fn active_count_does_not_affect_the_decision() {
        for active in [0, 1, 49, 500] {
            assert_eq!(
                maybe_admit(FrameIndex::new(100), active, 2, 50, 50),
                AdmitDecision::Admit
            );
            assert_eq!(
                maybe_admit(FrameIndex::new(100), active, 50, 50, 50),
                AdmitDecision::Hold(HoldReason::CapReached)
            );
        }
    }
}
