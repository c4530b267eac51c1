//! Configuration with RON persistence and CLI overrides.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BeltConfig, Config, DebugConfig, GenerationConfig, RingConfig, SimulationConfig,
};
pub use error::ConfigError;
