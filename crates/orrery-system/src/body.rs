//! Orbital bodies: planets and their moons.
//!
//! Orbits are kinematic, not force-integrated. Each tick advances the orbital
//! angle by `speed · Δt`, computes the position on a (possibly eccentric,
//! inclined) ellipse around the orbit center, and advances self-rotation
//! independently. Moons read their parent planet's position as updated this
//! tick, so the whole hierarchy stays coherent without back-references.

use std::f32::consts::TAU;

use glam::Vec3;

use orrery_mesh::{CelestialMesh, MeshParams, generate_body_mesh};
use orrery_noise::NoiseField;

/// Closed classification of planet surfaces. Every palette, size bias, and
/// moon-count decision matches on this exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyType {
    /// Cratered silicate world.
    Rocky,
    /// Gas giant. Largest bodies, slow rotation, most moons.
    Gas,
    /// Frozen world.
    Ice,
    /// Dry, sand-toned world.
    Desert,
}

impl BodyType {
    /// Base albedo color before per-planet jitter.
    #[must_use]
    pub fn base_color(self) -> Vec3 {
        match self {
            BodyType::Rocky => Vec3::new(0.6, 0.5, 0.4),
            BodyType::Gas => Vec3::new(0.8, 0.6, 0.3),
            BodyType::Ice => Vec3::new(0.7, 0.8, 0.9),
            BodyType::Desert => Vec3::new(0.8, 0.7, 0.4),
        }
    }

    /// Size multiplier applied after the distance-band radius draw.
    #[must_use]
    pub fn radius_multiplier(self) -> f32 {
        match self {
            BodyType::Gas => 2.2,
            BodyType::Ice => 1.4,
            BodyType::Rocky | BodyType::Desert => 1.0,
        }
    }
}

/// Wrap an angle into [0, 2π).
#[inline]
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative angle computes TAU - ε, which rounds to
    // TAU itself at f32 precision; that would escape the half-open range.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Position on an orbit relative to its center.
///
/// The ellipse approximation pulls the radius in by
/// `1 − eccentricity·cos(angle)`, then the inclination rotates the (y, z)
/// pair around the orbit-plane x-axis.
#[must_use]
pub fn orbital_position(
    orbit_radius: f32,
    angle: f32,
    eccentricity: f32,
    inclination: f32,
) -> Vec3 {
    let adjusted_radius = orbit_radius * (1.0 - eccentricity * angle.cos());
    let x = adjusted_radius * angle.cos();
    let z = adjusted_radius * angle.sin();
    let y = 0.0;

    let (sin_i, cos_i) = inclination.sin_cos();
    Vec3::new(x, y * cos_i - z * sin_i, y * sin_i + z * cos_i)
}

/// Terrain inputs for a body, fixed at generation time and reused for every
/// LOD regeneration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainParams {
    /// Multiplier on the normalized fractal height.
    pub height_scale: f32,
    /// Base frequency of the first noise octave.
    pub noise_frequency: f32,
    /// Fractal octave count.
    pub noise_octaves: u32,
}

/// A moon, exclusively owned by its parent planet.
#[derive(Clone, Debug)]
pub struct Moon {
    /// Render-scale radius.
    pub radius: f32,
    /// Distance from the parent planet's center.
    pub orbit_radius: f32,
    /// Angular rate around the parent, radians per second.
    pub orbit_speed: f32,
    /// Current orbital angle in [0, 2π).
    pub orbit_angle: f32,
    /// Small orbital-plane tilt.
    pub orbit_inclination: f32,
    /// Self-rotation rate, radians per second.
    pub rotation_speed: f32,
    /// Current self-rotation angle in [0, 2π).
    pub rotation_angle: f32,
    /// Albedo color.
    pub color: Vec3,
    /// World position as of the last tick.
    pub position: Vec3,
    /// Generated mesh; `None` when no noise source was available.
    pub mesh: Option<CelestialMesh>,
}

impl Moon {
    /// Advance the moon one tick. `parent_position` must be the planet's
    /// position as updated this tick.
    pub fn update(&mut self, dt: f32, parent_position: Vec3) {
        self.orbit_angle = wrap_angle(self.orbit_angle + self.orbit_speed * dt);
        self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_speed * dt);
        self.position = parent_position
            + orbital_position(self.orbit_radius, self.orbit_angle, 0.0, self.orbit_inclination);
    }
}

/// A planet: seeded physical properties, orbital state, a generated mesh,
/// and an ordered list of exclusively-owned moons.
#[derive(Clone, Debug)]
pub struct Planet {
    /// The per-planet seed all of its properties were derived from.
    pub seed: u64,
    /// Surface classification.
    pub body_type: BodyType,
    /// Render-scale radius.
    pub radius: f32,
    /// Albedo color (type base + seeded jitter).
    pub color: Vec3,
    /// Self-rotation rate, radians per second.
    pub rotation_speed: f32,
    /// Current self-rotation angle in [0, 2π).
    pub rotation_angle: f32,
    /// Distance from the orbit center.
    pub orbit_radius: f32,
    /// Angular rate around the star, radians per second.
    pub orbit_speed: f32,
    /// Current orbital angle in [0, 2π).
    pub orbit_angle: f32,
    /// 0 = circle, < 1 = ellipse.
    pub orbit_eccentricity: f32,
    /// Orbital-plane tilt in radians.
    pub orbit_inclination: f32,
    /// Orbit center (the star, at the origin).
    pub orbit_center: Vec3,
    /// World position as of the last tick.
    pub position: Vec3,
    /// Terrain parameters reused on every LOD regeneration.
    pub terrain: TerrainParams,
    /// Generated mesh; `None` when no noise source was available.
    pub mesh: Option<CelestialMesh>,
    /// Moons orbiting this planet.
    pub moons: Vec<Moon>,
}

impl Planet {
    /// Mesh-generation inputs for this planet at the given grid resolution.
    #[must_use]
    pub fn mesh_params(&self, resolution: u32) -> MeshParams {
        MeshParams {
            radius: self.radius,
            resolution,
            height_scale: self.terrain.height_scale,
            noise_frequency: self.terrain.noise_frequency,
            noise_octaves: self.terrain.noise_octaves,
        }
    }

    /// Regenerate the mesh at a new resolution. Synchronous; the previous
    /// mesh is replaced wholesale.
    pub fn regenerate_mesh(&mut self, resolution: u32, noise: &NoiseField) {
        self.mesh = Some(generate_body_mesh(&self.mesh_params(resolution), noise));
    }

    /// Advance the planet and its moons one tick.
    pub fn update(&mut self, dt: f32) {
        self.orbit_angle = wrap_angle(self.orbit_angle + self.orbit_speed * dt);
        self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_speed * dt);
        self.position = self.orbit_center
            + orbital_position(
                self.orbit_radius,
                self.orbit_angle,
                self.orbit_eccentricity,
                self.orbit_inclination,
            );

        // Moons read the position set above, not last tick's.
        for moon in &mut self.moons {
            moon.update(dt, self.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_planet() -> Planet {
        Planet {
            seed: 1,
            body_type: BodyType::Rocky,
            radius: 2.0,
            color: BodyType::Rocky.base_color(),
            rotation_speed: 0.7,
            rotation_angle: 0.0,
            orbit_radius: 50.0,
            orbit_speed: 0.3,
            orbit_angle: 0.0,
            orbit_eccentricity: 0.1,
            orbit_inclination: 0.05,
            orbit_center: Vec3::ZERO,
            position: Vec3::ZERO,
            terrain: TerrainParams {
                height_scale: 0.4,
                noise_frequency: 0.02,
                noise_octaves: 4,
            },
            mesh: None,
            moons: Vec::new(),
        }
    }

    #[test]
    fn test_angle_stays_wrapped_over_long_runs() {
        let mut planet = test_planet();
        // Sum of Δt far exceeds a full revolution at this speed.
        for _ in 0..10_000 {
            planet.update(0.016);
            assert!(
                (0.0..TAU).contains(&planet.orbit_angle),
                "Orbit angle escaped [0, 2π): {}",
                planet.orbit_angle
            );
            assert!(
                (0.0..TAU).contains(&planet.rotation_angle),
                "Rotation angle escaped [0, 2π): {}",
                planet.rotation_angle
            );
        }
    }

    #[test]
    fn test_circular_orbit_keeps_constant_radius() {
        let mut planet = test_planet();
        planet.orbit_eccentricity = 0.0;
        planet.orbit_inclination = 0.0;
        for _ in 0..500 {
            planet.update(0.016);
            let r = planet.position.length();
            assert!(
                (r - planet.orbit_radius).abs() < 1e-3,
                "Circular orbit radius drifted: {r}"
            );
        }
    }

    #[test]
    fn test_eccentric_orbit_radius_range() {
        let e = 0.2;
        for step in 0..64 {
            let angle = step as f32 * TAU / 64.0;
            let p = orbital_position(100.0, angle, e, 0.0);
            let r = p.length();
            assert!(
                r >= 100.0 * (1.0 - e) - 1e-3 && r <= 100.0 * (1.0 + e) + 1e-3,
                "Eccentric radius {r} outside [{}, {}]",
                100.0 * (1.0 - e),
                100.0 * (1.0 + e)
            );
        }
    }

    #[test]
    fn test_inclination_tilts_out_of_plane() {
        let flat = orbital_position(50.0, 1.0, 0.0, 0.0);
        assert_eq!(flat.y, 0.0);
        let tilted = orbital_position(50.0, 1.0, 0.0, 0.1);
        assert!(tilted.y.abs() > 0.0, "Inclined orbit should leave the plane");
        assert!(
            (tilted.length() - flat.length()).abs() < 1e-4,
            "Inclination is a rotation; it must not change the radius"
        );
    }

    #[test]
    fn test_moon_tracks_parent_this_tick() {
        let mut planet = test_planet();
        planet.moons.push(Moon {
            radius: 0.3,
            orbit_radius: 5.0,
            orbit_speed: 1.0,
            orbit_angle: 0.0,
            orbit_inclination: 0.0,
            rotation_speed: 2.0,
            rotation_angle: 0.0,
            color: Vec3::splat(0.7),
            position: Vec3::ZERO,
            mesh: None,
        });

        planet.update(0.1);
        let moon = &planet.moons[0];
        let separation = (moon.position - planet.position).length();
        assert!(
            (separation - 5.0).abs() < 1e-3,
            "Moon should sit at its orbit radius from this tick's parent position, got {separation}"
        );
    }

    #[test]
    fn test_wrap_angle_handles_negative_input() {
        let wrapped = wrap_angle(-0.5);
        assert!((0.0..TAU).contains(&wrapped));
        assert!((wrapped - (TAU - 0.5)).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_angle_tiny_negative_stays_below_tau() {
        // TAU - 1e-9 rounds to TAU in f32, so a naive rem_euclid would
        // return a value outside the half-open range.
        for angle in [-1e-9f32, -f32::EPSILON, -1e-12] {
            let wrapped = wrap_angle(angle);
            assert!(
                (0.0..TAU).contains(&wrapped),
                "wrap_angle({angle}) escaped [0, 2π): {wrapped}"
            );
        }
    }

    #[test]
    fn test_body_type_multipliers() {
        assert_eq!(BodyType::Gas.radius_multiplier(), 2.2);
        assert_eq!(BodyType::Ice.radius_multiplier(), 1.4);
        assert_eq!(BodyType::Rocky.radius_multiplier(), 1.0);
        assert_eq!(BodyType::Desert.radius_multiplier(), 1.0);
    }
}
