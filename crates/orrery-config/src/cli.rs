//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Procedural solar-system simulator")]
pub struct CliArgs {
    /// Seed the system is generated from.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of planets to attempt to place.
    #[arg(long)]
    pub planets: Option<u32>,

    /// Simulation speed multiplier.
    #[arg(long)]
    pub time_scale: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.generation.seed = seed;
        }
        if let Some(planets) = args.planets {
            self.generation.planet_count = planets;
        }
        if let Some(scale) = args.time_scale {
            self.simulation.time_scale = scale;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(1337),
            planets: Some(5),
            time_scale: None,
            log_level: Some("debug".to_string()),
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.generation.seed, 1337);
        assert_eq!(config.generation.planet_count, 5);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults.
        assert_eq!(config.simulation.time_scale, 1.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            seed: None,
            planets: None,
            time_scale: None,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
