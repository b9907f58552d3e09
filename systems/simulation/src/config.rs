//! Tunable parameters for a traffic simulation run.

use std::time::Duration;

use lifetime_traffic_system_admission::{DEFAULT_POPULATION_CAP, DEFAULT_SPAWN_PERIOD};
use serde::{Deserialize, Serialize};

/// Default number of interpolation steps between consecutive key-frames.
pub const DEFAULT_STEPS_PER_SEGMENT: u32 = 50;

/// Default seed used when no seed is supplied.
pub const DEFAULT_RNG_SEED: u64 = 0x5a7a_6e11_fe71_0001;

/// Default wall-clock time between frames when driven by a window.
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 100;

/// Default number of frames a headless run executes.
pub const DEFAULT_FRAME_LIMIT: u64 = 1_000;

/// Aggregated knobs controlling admission cadence, path density and pacing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Frames between admission opportunities.
    pub spawn_period: u64,
    /// Maximum number of occupants admitted over the whole run.
    pub population_cap: u32,
    /// Interpolated positions per key-frame pair; one position is shown per frame.
    pub steps_per_segment: u32,
    /// Seed for the random source driving itineraries and colours.
    pub rng_seed: u64,
    /// Wall-clock milliseconds between frames when driven by a window.
    pub frame_interval_ms: u64,
    /// Number of frames a headless run executes.
    pub frame_limit: u64,
}

impl Config {
    /// Rejects parameter combinations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_segment == 0 {
            return Err(ConfigError::ZeroStepsPerSegment);
        }
        if self.spawn_period == 0 {
            return Err(ConfigError::ZeroSpawnPeriod);
        }
        Ok(())
    }

    /// Wall-clock time between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spawn_period: DEFAULT_SPAWN_PERIOD,
            population_cap: DEFAULT_POPULATION_CAP,
            steps_per_segment: DEFAULT_STEPS_PER_SEGMENT,
            rng_seed: DEFAULT_RNG_SEED,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            frame_limit: DEFAULT_FRAME_LIMIT,
        }
    }
}

/// Reasons a configuration is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Paths need at least one position per segment.
    #[error("steps_per_segment must be positive")]
    ZeroStepsPerSegment,
    /// Admission needs a positive cadence.
    #[error("spawn_period must be positive")]
    ZeroSpawnPeriod,
}
