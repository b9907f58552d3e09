//! Loading of run parameters from TOML files and command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lifetime_traffic_simulation::Config;
use tracing::warn;

/// Command-line flags that take precedence over the configuration file.
#[derive(clap::Args, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    /// Seed for the random source driving itineraries and colours.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Frames between admission opportunities.
    #[arg(long)]
    pub(crate) spawn_period: Option<u64>,
    /// Maximum number of occupants admitted over the whole run.
    #[arg(long)]
    pub(crate) population_cap: Option<u32>,
    /// Interpolated positions between consecutive key-frames.
    #[arg(long)]
    pub(crate) steps_per_segment: Option<u32>,
    /// Number of frames a headless run executes.
    #[arg(long = "frames")]
    pub(crate) frame_limit: Option<u64>,
    /// Wall-clock milliseconds between frames in windowed mode.
    #[arg(long)]
    pub(crate) frame_interval_ms: Option<u64>,
}

impl Overrides {
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.rng_seed = seed;
        }
        if let Some(spawn_period) = self.spawn_period {
            config.spawn_period = spawn_period;
        }
        if let Some(population_cap) = self.population_cap {
            config.population_cap = population_cap;
        }
        if let Some(steps_per_segment) = self.steps_per_segment {
            config.steps_per_segment = steps_per_segment;
        }
        if let Some(frame_limit) = self.frame_limit {
            config.frame_limit = frame_limit;
        }
        if let Some(frame_interval_ms) = self.frame_interval_ms {
            config.frame_interval_ms = frame_interval_ms;
        }
    }
}

/// Reads the optional configuration file, falling back to defaults.
pub(crate) fn load(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse config file {}", path.display()))
}

fn parse(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Loads the file, applies overrides and validates the result.
pub(crate) fn resolve(path: Option<&Path>, overrides: &Overrides) -> Result<Config> {
    let mut config = load(path)?;
    overrides.apply(&mut config);
    if let Err(error) = config.validate() {
        warn!(%error, "rejected configuration");
        return Err(error).context("invalid configuration");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = parse("spawn_period = 10\nrng_seed = 7\n").expect("valid toml");
        assert_eq!(config.spawn_period, 10);
        assert_eq!(config.rng_seed, 7);
        assert_eq!(config.population_cap, Config::default().population_cap);
        assert_eq!(config.steps_per_segment, 50);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("spawn_rate = 3\n").is_err());
    }

    #[test]
    fn overrides_take_precedence_over_file_values() {
        let mut config = parse("population_cap = 5\nframe_limit = 20\n").expect("valid toml");
        let overrides = Overrides {
            population_cap: Some(9),
            seed: Some(42),
            ..Overrides::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.population_cap, 9);
        assert_eq!(config.rng_seed, 42);
        assert_eq!(config.frame_limit, 20);
    }

    #[test]
    fn resolve_rejects_zero_steps() {
        let overrides = Overrides {
            steps_per_segment: Some(0),
            ..Overrides::default()
        };
        let error = resolve(None, &overrides).expect_err("zero steps rejected");
        assert!(format!("{error:#}").contains("steps_per_segment must be positive"));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let error = load(Some(Path::new("/nonexistent/lifetime-traffic.toml")))
            .expect_err("missing file");
        assert!(error.to_string().contains("lifetime-traffic.toml"));
    }
}
