//! Headless demo binary: generate a seeded solar system, tick it at a fixed
//! rate, and exercise the LOD controller with a receding observer.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p orrery-app -- --seed 1337 --planets 8` to
//! override the configured system.

use std::path::{Path, PathBuf};

use clap::Parser;
use glam::Vec3;
use tracing::info;

use orrery_config::{CliArgs, Config};
use orrery_log::init_logging;
use orrery_noise::NoiseField;
use orrery_system::SolarSystem;

/// Fixed simulation step, seconds.
const TICK: f32 = 1.0 / 60.0;
/// Simulated wall time for one demo run, seconds.
const RUN_SECONDS: u32 = 30;
/// Observer retreat speed, units per second. Fast enough to cross both LOD
/// thresholds within one run.
const OBSERVER_SPEED: f32 = 120.0;

fn main() {
    let args = CliArgs::parse();
    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config"));
    let mut config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}; continuing with defaults");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);
    init_logging(Some(Path::new("logs")), cfg!(debug_assertions), Some(&config));

    let noise = NoiseField::new(config.generation.seed as u32);
    let mut system = SolarSystem::generate(
        config.generation.seed,
        config.generation.planet_count,
        Some(&noise),
    );
    system.set_time_scale(config.simulation.time_scale);
    system.set_system_scale(config.simulation.system_scale);
    system.set_belts_visible(config.belts.visible);
    system.set_belt_density(config.belts.density);
    system.set_rings_visible(config.rings.visible);
    system.set_ring_density(config.rings.density);

    let moon_count: usize = system.planets.iter().map(|p| p.moons.len()).sum();
    info!(
        seed = system.seed(),
        planets = system.planets.len(),
        moons = moon_count,
        structures = system.structures.len(),
        particles = system.particle_count(),
        "system ready"
    );

    // Start close to the star and pull away so planets step down through the
    // detail tiers as their effective distance grows.
    let mut observer = Vec3::new(0.0, 20.0, 60.0);
    let mut regenerations = 0usize;

    for tick in 0..RUN_SECONDS * 60 {
        system.update(TICK);
        observer.z += OBSERVER_SPEED * TICK;
        regenerations += system.apply_lod(observer, &noise);

        if (tick + 1) % 60 == 0 {
            let vertex_total: usize = system
                .planets
                .iter()
                .filter_map(|p| p.mesh.as_ref())
                .map(|m| m.vertex_count())
                .sum();
            info!(
                second = (tick + 1) / 60,
                observer_distance = observer.length(),
                regenerations,
                vertices = vertex_total,
                particles = system.particle_count(),
                star_intensity = system.star.current_intensity(),
                "tick stats"
            );
            regenerations = 0;
        }
    }

    info!("simulation complete");
}
