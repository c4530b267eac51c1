//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Top-level simulator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// System generation settings.
    pub generation: GenerationConfig,
    /// Simulation pacing settings.
    pub simulation: SimulationConfig,
    /// Asteroid belt settings.
    pub belts: BeltConfig,
    /// Planetary ring settings.
    pub rings: RingConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// System generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed the whole system is derived from.
    pub seed: u64,
    /// Number of planets to attempt to place.
    pub planet_count: u32,
}

/// Simulation pacing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Global simulation speed multiplier.
    pub time_scale: f32,
    /// Render-space scale applied to exported positions.
    pub system_scale: f32,
}

/// Asteroid belt configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BeltConfig {
    /// Whether belts are updated and exported.
    pub visible: bool,
    /// Particle density multiplier (clamped to [0.1, 2.0] on apply).
    pub density: f32,
}

/// Planetary ring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RingConfig {
    /// Whether rings are updated and exported.
    pub visible: bool,
    /// Particle density multiplier (clamped to [0.1, 3.0] on apply).
    pub density: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            planet_count: 8,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            system_scale: 1.0,
        }
    }
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            visible: true,
            density: 1.0,
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            visible: true,
            density: 1.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            info!("loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            info!("created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            info!("config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
