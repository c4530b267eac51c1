//! The system facade: one star, its planets (each owning its moons and
//! mesh), and the particle structures, ticked in a fixed order.

use glam::Vec3;
use tracing::{debug, info};

use orrery_noise::NoiseField;

use crate::body::Planet;
use crate::generator::generate_system;
use crate::lod::LodController;
use crate::rings::{RingStructure, StructureKind};
use crate::star::Star;

/// A generated solar system and its simulation/persistence knobs.
///
/// Update order each tick is star → planets (each updating its own moons) →
/// belts → rings. Rings read their planet's position as updated this tick,
/// so they track it with no lag.
#[derive(Clone, Debug)]
pub struct SolarSystem {
    seed: u64,
    requested_planets: u32,
    time_scale: f32,
    system_scale: f32,
    belts_visible: bool,
    rings_visible: bool,
    belt_density: f32,
    ring_density: f32,
    lod: LodController,
    /// The central star.
    pub star: Star,
    /// Planets in generation order.
    pub planets: Vec<Planet>,
    /// Asteroid belts and planetary rings.
    pub structures: Vec<RingStructure>,
}

impl SolarSystem {
    /// Generate a system from a seed, fully replacing any prior state the
    /// caller held. Without a noise field, bodies are laid out but left
    /// without meshes.
    #[must_use]
    pub fn generate(seed: u64, planet_count: u32, noise: Option<&NoiseField>) -> Self {
        generate_system(seed, planet_count, noise)
    }

    pub(crate) fn from_parts(
        seed: u64,
        requested_planets: u32,
        star: Star,
        planets: Vec<Planet>,
        structures: Vec<RingStructure>,
    ) -> Self {
        Self {
            seed,
            requested_planets,
            time_scale: 1.0,
            system_scale: 1.0,
            belts_visible: true,
            rings_visible: true,
            belt_density: 1.0,
            ring_density: 1.0,
            lod: LodController::default(),
            star,
            planets,
            structures,
        }
    }

    /// Advance the whole system by `dt` seconds of wall time. The time-scale
    /// multiplier is applied once here; every child sees pre-scaled time.
    pub fn update(&mut self, dt: f32) {
        let dt = dt * self.time_scale;

        self.star.update(dt);
        for planet in &mut self.planets {
            planet.update(dt);
        }

        for structure in &mut self.structures {
            match structure.kind() {
                StructureKind::Belt => {
                    if self.belts_visible {
                        structure.update(dt, Vec3::ZERO);
                    }
                }
                StructureKind::Ring { planet } => {
                    if self.rings_visible {
                        // Planets updated above, so this is this tick's position.
                        let center = self
                            .planets
                            .get(planet)
                            .map_or(Vec3::ZERO, |p| p.position);
                        structure.update(dt, center);
                    }
                }
            }
        }
    }

    /// Walk every planet and regenerate its mesh if the LOD tier for the
    /// given observer position differs from the mesh it carries. Returns the
    /// number of meshes rebuilt; calling again with the same observer
    /// rebuilds nothing. Moons keep their fixed low resolution.
    pub fn apply_lod(&mut self, observer: Vec3, noise: &NoiseField) -> usize {
        let mut regenerated = 0;
        for planet in &mut self.planets {
            let desired = self
                .lod
                .desired_resolution(observer, planet.position, planet.radius);
            let current = planet.mesh.as_ref().map(|mesh| mesh.resolution());
            if current != Some(desired) {
                planet.regenerate_mesh(desired, noise);
                regenerated += 1;
                debug!(
                    seed = planet.seed,
                    resolution = desired,
                    "regenerated planet mesh for LOD change"
                );
            }
        }
        regenerated
    }

    /// Drop every body and structure. The star descriptor is kept; the next
    /// `generate` replaces it wholesale.
    pub fn clear(&mut self) {
        self.planets.clear();
        self.structures.clear();
        info!("cleared solar system");
    }

    // --- persistence collaborator surface ---

    /// The seed this system was generated from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The planet count that was requested (placement may have produced
    /// fewer).
    #[must_use]
    pub fn requested_planets(&self) -> u32 {
        self.requested_planets
    }

    /// Global simulation speed multiplier.
    #[must_use]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Set the simulation speed multiplier. Negative values are clamped to
    /// zero; the simulation never runs backwards.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Render-space scale applied to exported positions.
    #[must_use]
    pub fn system_scale(&self) -> f32 {
        self.system_scale
    }

    /// Set the render-space scale. Simulation state is unscaled; only the
    /// position accessors multiply by this.
    pub fn set_system_scale(&mut self, scale: f32) {
        self.system_scale = scale.max(f32::EPSILON);
    }

    /// Whether asteroid belts are updated and exported.
    #[must_use]
    pub fn belts_visible(&self) -> bool {
        self.belts_visible
    }

    pub fn set_belts_visible(&mut self, visible: bool) {
        self.belts_visible = visible;
    }

    /// Whether planetary rings are updated and exported.
    #[must_use]
    pub fn rings_visible(&self) -> bool {
        self.rings_visible
    }

    pub fn set_rings_visible(&mut self, visible: bool) {
        self.rings_visible = visible;
    }

    /// Current belt density multiplier.
    #[must_use]
    pub fn belt_density(&self) -> f32 {
        self.belt_density
    }

    /// Set the density of every asteroid belt. Each belt rebuilds its full
    /// particle list from its own seed.
    pub fn set_belt_density(&mut self, factor: f32) {
        self.belt_density = StructureKind::Belt.clamp_density(factor);
        for structure in &mut self.structures {
            if structure.kind() == StructureKind::Belt {
                structure.set_density(factor);
            }
        }
    }

    /// Current ring density multiplier.
    #[must_use]
    pub fn ring_density(&self) -> f32 {
        self.ring_density
    }

    /// Set the density of every planetary ring.
    pub fn set_ring_density(&mut self, factor: f32) {
        self.ring_density = StructureKind::Ring { planet: 0 }.clamp_density(factor);
        for structure in &mut self.structures {
            if matches!(structure.kind(), StructureKind::Ring { .. }) {
                structure.set_density(factor);
            }
        }
    }

    // --- camera/lighting collaborator surface ---

    /// Star position in render space.
    #[must_use]
    pub fn star_position(&self) -> Vec3 {
        self.star.position() * self.system_scale
    }

    /// Render-space positions of every planet, in generation order.
    #[must_use]
    pub fn planet_positions(&self) -> Vec<Vec3> {
        self.planets
            .iter()
            .map(|p| p.position * self.system_scale)
            .collect()
    }

    /// Render-space positions of every body: planets followed by their
    /// moons, in update order.
    #[must_use]
    pub fn body_positions(&self) -> Vec<Vec3> {
        let mut positions = Vec::new();
        for planet in &self.planets {
            positions.push(planet.position * self.system_scale);
            for moon in &planet.moons {
                positions.push(moon.position * self.system_scale);
            }
        }
        positions
    }

    /// Total particle count across belts and rings, for diagnostics.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.structures.iter().map(|s| s.particles.len()).sum()
    }
}
