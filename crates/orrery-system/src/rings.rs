//! Particle ensembles for asteroid belts and planetary rings.
//!
//! A structure owns a flat list of lightweight particles; nothing here is
//! individually meshed. The renderer collaborator draws one shared unit quad
//! per particle. Density edits discard and rebuild the whole list from the
//! structure's seed, so every particle's attributes re-roll on an edit.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::body::wrap_angle;

/// What a structure orbits and which palette its particles draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructureKind {
    /// Star-centered asteroid belt: thick disk of tumbling rocks.
    Belt,
    /// Planet-centered ring: very thin disk of small translucent grains.
    /// The index refers into the owning system's planet list.
    Ring { planet: usize },
}

impl StructureKind {
    /// Palette used for this kind of structure.
    #[must_use]
    pub fn palette(self) -> ParticlePalette {
        match self {
            StructureKind::Belt => ParticlePalette::Rocky,
            StructureKind::Ring { .. } => ParticlePalette::IceToRock,
        }
    }

    /// Clamp a density factor to the documented range for this kind.
    #[must_use]
    pub fn clamp_density(self, factor: f32) -> f32 {
        match self {
            StructureKind::Belt => factor.clamp(0.1, 2.0),
            StructureKind::Ring { .. } => factor.clamp(0.1, 3.0),
        }
    }
}

/// How particle colors are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticlePalette {
    /// Uniform gray-brown rock shades.
    Rocky,
    /// Icy tones toward the inner edge grading to rocky toward the outer.
    IceToRock,
}

/// One belt asteroid or ring grain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingParticle {
    /// Distance from the structure's orbit center.
    pub orbit_radius: f32,
    /// Current orbital angle in [0, 2π).
    pub orbit_angle: f32,
    /// Angular rate, radians per second. Inner particles sweep faster.
    pub orbit_speed: f32,
    /// Fixed offset off the orbital plane; thin disk for rings, thicker for
    /// belts.
    pub vertical_offset: f32,
    /// Render scale of the shared quad.
    pub size: f32,
    /// Albedo color.
    pub color: Vec3,
    /// Opacity; belts are opaque rocks, ring grains are translucent.
    pub alpha: f32,
    /// 3-axis tumble rotation angles, each in [0, 2π).
    pub tumble_angles: Vec3,
    /// Tumble rates, radians per second.
    pub tumble_rates: Vec3,
    /// World position as of the last tick.
    pub position: Vec3,
}

/// A seeded particle ensemble: an asteroid belt or a planetary ring.
#[derive(Clone, Debug)]
pub struct RingStructure {
    kind: StructureKind,
    seed: u64,
    inner_radius: f32,
    outer_radius: f32,
    base_count: u32,
    density: f32,
    center: Vec3,
    /// Current particle list; replaced wholesale on density edits.
    pub particles: Vec<RingParticle>,
}

impl RingStructure {
    /// Build a structure and its full particle list.
    pub fn generate(
        kind: StructureKind,
        inner_radius: f32,
        outer_radius: f32,
        count: u32,
        seed: u64,
    ) -> Self {
        let mut structure = Self {
            kind,
            seed,
            inner_radius,
            // A zero-width annulus would leave nothing to draw radii from.
            outer_radius: outer_radius.max(inner_radius + 1e-3),
            base_count: count,
            density: 1.0,
            center: Vec3::ZERO,
            particles: Vec::new(),
        };
        structure.rebuild(count);
        info!(
            ?kind,
            inner = inner_radius,
            outer = outer_radius,
            count,
            seed,
            "generated particle structure"
        );
        structure
    }

    /// Structure kind.
    #[must_use]
    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    /// Inner orbit radius.
    #[must_use]
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    /// Outer orbit radius.
    #[must_use]
    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    /// Particle count the structure was created with, before density edits.
    #[must_use]
    pub fn base_count(&self) -> u32 {
        self.base_count
    }

    /// Current density factor.
    #[must_use]
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Orbit center as of the last tick.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Change particle density. The factor is clamped to the documented range
    /// for this kind and the whole particle list is regenerated from the
    /// structure's seed at `round(base_count · factor)` particles.
    pub fn set_density(&mut self, factor: f32) {
        self.density = self.kind.clamp_density(factor);
        let count = (self.base_count as f32 * self.density).round() as u32;
        self.rebuild(count);
        debug!(density = self.density, count, "rebuilt particle structure");
    }

    /// Advance every particle one tick around `center`.
    pub fn update(&mut self, dt: f32, center: Vec3) {
        self.center = center;
        for particle in &mut self.particles {
            particle.orbit_angle = wrap_angle(particle.orbit_angle + particle.orbit_speed * dt);
            particle.tumble_angles = Vec3::new(
                wrap_angle(particle.tumble_angles.x + particle.tumble_rates.x * dt),
                wrap_angle(particle.tumble_angles.y + particle.tumble_rates.y * dt),
                wrap_angle(particle.tumble_angles.z + particle.tumble_rates.z * dt),
            );
            particle.position = center
                + Vec3::new(
                    particle.orbit_radius * particle.orbit_angle.cos(),
                    particle.vertical_offset,
                    particle.orbit_radius * particle.orbit_angle.sin(),
                );
        }
    }

    fn rebuild(&mut self, count: u32) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.particles.clear();
        self.particles.reserve(count as usize);
        for _ in 0..count {
            let particle = match self.kind {
                StructureKind::Belt => {
                    belt_particle(&mut rng, self.inner_radius, self.outer_radius)
                }
                StructureKind::Ring { .. } => {
                    ring_particle(&mut rng, self.inner_radius, self.outer_radius)
                }
            };
            self.particles.push(particle);
        }
    }
}

/// Draw one belt asteroid. Draw order is fixed; changing it changes every
/// seeded system.
fn belt_particle(rng: &mut ChaCha8Rng, inner: f32, outer: f32) -> RingParticle {
    let orbit_radius = rng.random_range(inner..outer);
    let orbit_angle = rng.random_range(0.0..TAU);
    let orbit_speed = rng.random_range(0.1..0.5) / orbit_radius;
    let vertical_offset = rng.random_range(-2.0..2.0);
    let tumble_angles = Vec3::new(
        rng.random_range(0.0..TAU),
        rng.random_range(0.0..TAU),
        rng.random_range(0.0..TAU),
    );
    let tumble_rates = Vec3::new(
        rng.random_range(-2.0..2.0),
        rng.random_range(-2.0..2.0),
        rng.random_range(-2.0..2.0),
    );
    let size = rng.random_range(0.1..0.8);
    let gray = rng.random_range(0.3..0.8);
    let color = Vec3::new(gray * 0.8, gray * 0.7, gray * 0.6);

    RingParticle {
        orbit_radius,
        orbit_angle,
        orbit_speed,
        vertical_offset,
        size,
        color,
        alpha: 1.0,
        tumble_angles,
        tumble_rates,
        position: Vec3::new(
            orbit_radius * orbit_angle.cos(),
            vertical_offset,
            orbit_radius * orbit_angle.sin(),
        ),
    }
}

/// Draw one ring grain. Inner grains orbit faster and bias icy; outer grains
/// bias rocky.
fn ring_particle(rng: &mut ChaCha8Rng, inner: f32, outer: f32) -> RingParticle {
    let orbit_radius = rng.random_range(inner..outer);
    let orbit_angle = rng.random_range(0.0..TAU);
    let normalized = (orbit_radius - inner) / (outer - inner);
    let orbit_speed = rng.random_range(0.5..2.0) / (1.0 + normalized * 2.0);
    let vertical_offset = rng.random_range(-0.2..0.2);
    let size = rng.random_range(0.02..0.1);

    let shade = rng.random_range(0.6..1.0);
    let ice_ratio = 1.0 - normalized;
    let color = if ice_ratio > 0.5 {
        Vec3::new(shade * 0.9, shade * 0.95, shade)
    } else {
        Vec3::new(shade * 0.8, shade * 0.6, shade * 0.4)
    };
    let alpha = rng.random_range(0.3..0.8);

    RingParticle {
        orbit_radius,
        orbit_angle,
        orbit_speed,
        vertical_offset,
        size,
        color,
        alpha,
        tumble_angles: Vec3::ZERO,
        tumble_rates: Vec3::ZERO,
        position: Vec3::new(
            orbit_radius * orbit_angle.cos(),
            vertical_offset,
            orbit_radius * orbit_angle.sin(),
        ),
    }
}
