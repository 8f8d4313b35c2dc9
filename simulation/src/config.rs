//! Layered simulation configuration loaded from TOML.

use std::{fs, path::Path, path::PathBuf, time::Duration};

use nightfall_system_spawning::Config as SpawningConfig;
use nightfall_world::WorldConfig;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// The world has no area.
    #[error("world must have a positive size, got {width}x{height}")]
    WorldSize {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// A cadence that must advance time is zero.
    #[error("{name} must be greater than zero")]
    ZeroInterval {
        /// Name of the offending setting.
        name: &'static str,
    },
}

/// Complete set of tunables for a simulation run.
///
/// Every table and field has a default, so a file only needs the values it
/// changes:
///
/// ```toml
/// step_ms = 16
///
/// [world]
/// seed = 7
/// nests = 3
///
/// [spawning]
/// night_spawn_chance = 0.2
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// World layout and starting values.
    pub world: WorldConfig,
    /// Day/night cadence and spawn probabilities.
    pub spawning: SpawningConfig,
    /// Length of a single simulation step in milliseconds.
    pub step_ms: u64,
    /// Cadence of the tower and trap pass in milliseconds.
    pub structure_interval_ms: u64,
    /// Upper bound on steps executed by a single `advance` call.
    pub max_steps_per_advance: u32,
    /// Longest wall-clock delta accepted by a single `advance` call.
    pub max_frame_delta_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            spawning: SpawningConfig::default(),
            step_ms: 16,
            structure_interval_ms: 100,
            max_steps_per_advance: 8,
            max_frame_delta_ms: 250,
        }
    }
}

impl SimulationConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Rejects settings under which the simulation cannot make progress.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.world.width, self.world.height);
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::WorldSize { width, height });
        }

        let intervals = [
            ("step_ms", self.step_ms),
            ("structure_interval_ms", self.structure_interval_ms),
            ("max_frame_delta_ms", self.max_frame_delta_ms),
            ("spawning.cycle_interval_ms", self.spawning.cycle_interval_ms),
            ("max_steps_per_advance", u64::from(self.max_steps_per_advance)),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(ConfigError::ZeroInterval { name });
            }
        }
        Ok(())
    }

    /// Seeds both the world and the spawning streams from one value.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.world.seed = seed;
        self.spawning.rng_seed = seed.rotate_left(32);
        self
    }

    /// Length of a simulation step.
    #[must_use]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    /// Cadence of the tower and trap pass.
    #[must_use]
    pub fn structure_interval(&self) -> Duration {
        Duration::from_millis(self.structure_interval_ms)
    }

    /// Longest wall-clock delta accepted by a single `advance` call.
    #[must_use]
    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms)
    }
}
