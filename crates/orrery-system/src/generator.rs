//! Seeded solar-system layout.
//!
//! Every draw comes from an explicit `ChaCha8Rng` constructed from a seed
//! derived off the system seed, in a fixed documented order. Regenerating
//! with the same seed reproduces the system bit for bit, and independent
//! concerns (placement, orbit shape, moons, belts, rings) draw from disjoint
//! seed offsets so none can perturb another.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use orrery_mesh::{MeshParams, generate_body_mesh};
use orrery_noise::NoiseField;

use crate::body::{BodyType, Moon, Planet, TerrainParams, wrap_angle};
use crate::rings::{RingStructure, StructureKind};
use crate::star::Star;
use crate::system::SolarSystem;

/// Seed stride between consecutive planet indices.
const PLANET_SEED_STRIDE: u64 = 1000;
/// Rejection-sampling budget per planet.
const MAX_PLACEMENT_ATTEMPTS: u64 = 50;
/// Required clearance between planet surfaces.
const PLACEMENT_BUFFER: f32 = 5.0;
/// Seed offset for eccentricity and inclination draws.
const ORBIT_SHAPE_SEED_OFFSET: u64 = 12345;
/// Seed offset for moon draws; disjoint from placement so moon generation
/// never perturbs planet placement order.
const MOON_SEED_OFFSET: u64 = 54321;
/// Seed offset for asteroid-belt layout.
const BELT_SEED_OFFSET: u64 = 1000;
/// Seed offset for planetary-ring layout.
const RING_SEED_OFFSET: u64 = 2000;

/// Planets start at the medium tier; the LOD controller moves them from
/// there.
const INITIAL_PLANET_RESOLUTION: u32 = 32;
/// Moons keep this fixed resolution for their lifetime.
const MOON_RESOLUTION: u32 = 16;

/// Generate a complete system from a seed.
///
/// Without a noise field, bodies are laid out normally but left without
/// meshes; the system still simulates.
pub fn generate_system(seed: u64, planet_count: u32, noise: Option<&NoiseField>) -> SolarSystem {
    info!(seed, planet_count, "generating solar system");
    if noise.is_none() {
        warn!("no noise field configured; bodies will be generated without meshes");
    }

    let star = setup_star(seed, noise);
    let planets = place_planets(seed, planet_count, noise);
    let mut structures = generate_belts(seed);
    structures.extend(generate_rings(seed, &planets));

    info!(
        planets = planets.len(),
        structures = structures.len(),
        "solar system generation complete"
    );
    SolarSystem::from_parts(seed, planet_count, star, planets, structures)
}

fn setup_star(seed: u64, noise: Option<&NoiseField>) -> Star {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let radius = rng.random_range(12.0..16.0);
    let temperature = rng.random_range(5500.0..6000.0);
    let variation = rng.random_range(0.9..1.1);

    let mut star = Star {
        radius,
        temperature,
        color: Star::color_from_temperature(temperature, variation),
        base_intensity: 1.0,
        rotation_speed: 10.0_f32.to_radians(),
        rotation_angle: 0.0,
        pulse_phase: 0.0,
        mesh: None,
    };
    if let Some(noise) = noise {
        star.generate_mesh(noise);
    }
    debug!(radius, temperature, "star ready");
    star
}

/// Drawn physical properties of one planet candidate.
struct PlanetProps {
    body_type: BodyType,
    radius: f32,
    color: Vec3,
    rotation_speed: f32,
}

fn place_planets(seed: u64, planet_count: u32, noise: Option<&NoiseField>) -> Vec<Planet> {
    // One shared RNG feeds all placement draws, in planet order.
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut planets: Vec<Planet> = Vec::with_capacity(planet_count as usize);

    for index in 0..planet_count as u64 {
        let mut accepted = None;
        for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
            // Fixed draw order: orbit angle, orbit distance, vertical offset.
            let angle = rng.random_range(0.0..TAU);
            let distance = rng.random_range(25.0..120.0);
            let height = rng.random_range(-10.0..10.0);
            let position = Vec3::new(distance * angle.cos(), height, distance * angle.sin());

            // The per-planet seed carries the retry offset, so a rejected
            // candidate's properties are never reused.
            let planet_seed = seed + index * PLANET_SEED_STRIDE + attempt;
            let props = derive_properties(planet_seed, distance);

            let clear = planets.iter().all(|other| {
                other.position.distance(position)
                    >= other.radius + props.radius + PLACEMENT_BUFFER
            });
            if clear {
                accepted = Some((planet_seed, position, distance, props));
                break;
            }
        }

        match accepted {
            Some((planet_seed, position, distance, props)) => {
                let planet = build_planet(planet_seed, position, distance, props, noise);
                debug!(
                    planet = index,
                    seed = planet_seed,
                    x = position.x,
                    y = position.y,
                    z = position.z,
                    radius = planet.radius,
                    body_type = ?planet.body_type,
                    moons = planet.moons.len(),
                    "placed planet"
                );
                planets.push(planet);
            }
            None => warn!(
                planet = index,
                attempts = MAX_PLACEMENT_ATTEMPTS,
                "no collision-free position found; skipping planet"
            ),
        }
    }

    planets
}

/// Derive type, radius, color, and rotation rate from a planet seed and its
/// distance band. Draw order is fixed.
fn derive_properties(planet_seed: u64, distance: f32) -> PlanetProps {
    let mut rng = ChaCha8Rng::seed_from_u64(planet_seed);

    let body_type = if distance < 50.0 {
        // Inner system: rocky or desert, evenly split.
        if rng.random_range(0..=3) <= 1 {
            BodyType::Rocky
        } else {
            BodyType::Desert
        }
    } else if distance < 150.0 {
        match rng.random_range(0..=2) {
            0 => BodyType::Rocky,
            1 => BodyType::Gas,
            _ => BodyType::Ice,
        }
    } else if rng.random_range(0..=1) == 0 {
        BodyType::Gas
    } else {
        BodyType::Ice
    };

    let base_radius = if distance < 50.0 {
        rng.random_range(0.8..2.5)
    } else if distance < 100.0 {
        rng.random_range(1.5..4.0)
    } else {
        rng.random_range(2.0..8.0)
    };
    let radius = base_radius * body_type.radius_multiplier();

    let base = body_type.base_color();
    let color = Vec3::new(
        (base.x + rng.random_range(-0.1..0.1)).clamp(0.2, 1.0),
        (base.y + rng.random_range(-0.1..0.1)).clamp(0.2, 1.0),
        (base.z + rng.random_range(-0.1..0.1)).clamp(0.2, 1.0),
    );

    // Smaller planets spin faster; gas giants slower still.
    let mut rotation_speed = rng.random_range(0.1..2.0) / radius;
    if body_type == BodyType::Gas {
        rotation_speed *= 0.5;
    }

    PlanetProps {
        body_type,
        radius,
        color,
        rotation_speed,
    }
}

fn build_planet(
    planet_seed: u64,
    position: Vec3,
    orbit_radius: f32,
    props: PlanetProps,
    noise: Option<&NoiseField>,
) -> Planet {
    // Terrain draws reuse the planet seed on a fresh RNG so LOD regeneration
    // inputs are stable however placement went.
    let mut terrain_rng = ChaCha8Rng::seed_from_u64(planet_seed);
    let terrain = TerrainParams {
        height_scale: terrain_rng.random_range(0.1..0.8),
        noise_frequency: terrain_rng.random_range(0.01..0.05),
        noise_octaves: terrain_rng.random_range(3..=6),
    };

    let mut shape_rng = ChaCha8Rng::seed_from_u64(planet_seed + ORBIT_SHAPE_SEED_OFFSET);
    let orbit_inclination = shape_rng.random_range(-0.1..0.1);
    let orbit_eccentricity = shape_rng.random_range(0.0..0.2);

    let mut planet = Planet {
        seed: planet_seed,
        body_type: props.body_type,
        radius: props.radius,
        color: props.color,
        rotation_speed: props.rotation_speed,
        rotation_angle: 0.0,
        orbit_radius,
        // Kepler-like: inner planets sweep faster.
        orbit_speed: 0.5 / (orbit_radius * 0.1 + 1.0).sqrt(),
        orbit_angle: wrap_angle(position.z.atan2(position.x)),
        orbit_eccentricity,
        orbit_inclination,
        orbit_center: Vec3::ZERO,
        position,
        terrain,
        mesh: None,
        moons: generate_moons(planet_seed, props.body_type, props.radius, noise),
    };
    if let Some(noise) = noise {
        planet.regenerate_mesh(INITIAL_PLANET_RESOLUTION, noise);
    }
    planet
}

/// Attach moons to a planet. Count is capped by type and size; all draws come
/// from the moon seed offset.
fn generate_moons(
    planet_seed: u64,
    body_type: BodyType,
    planet_radius: f32,
    noise: Option<&NoiseField>,
) -> Vec<Moon> {
    let mut rng = ChaCha8Rng::seed_from_u64(planet_seed + MOON_SEED_OFFSET);

    let max_moons = if body_type == BodyType::Gas {
        4
    } else if planet_radius > 8.0 {
        3
    } else if planet_radius > 5.0 {
        2
    } else {
        1
    };
    let moon_count = rng.random_range(0..=max_moons);

    let mut moons = Vec::with_capacity(moon_count);
    for _ in 0..moon_count {
        let radius = rng.random_range(0.1..0.3) * planet_radius;
        let orbit_radius = rng.random_range(2.0..6.0) * planet_radius;
        let orbit_speed = rng.random_range(0.5..2.0);
        let color = Vec3::new(
            rng.random_range(0.6..1.0) * 0.8,
            rng.random_range(0.6..1.0) * 0.8,
            rng.random_range(0.6..1.0) * 0.8,
        );
        let orbit_inclination = rng.random_range(-0.1..0.1);

        // Moons are smooth spheres at a fixed low resolution.
        let mesh = noise.map(|noise| {
            generate_body_mesh(
                &MeshParams {
                    radius,
                    resolution: MOON_RESOLUTION,
                    height_scale: 0.0,
                    noise_frequency: 0.01,
                    noise_octaves: 1,
                },
                noise,
            )
        });

        moons.push(Moon {
            radius,
            orbit_radius,
            orbit_speed,
            orbit_angle: 0.0,
            orbit_inclination,
            rotation_speed: 2.0,
            rotation_angle: 0.0,
            color,
            position: Vec3::ZERO,
            mesh,
        });
    }
    moons
}

fn generate_belts(seed: u64) -> Vec<RingStructure> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed + BELT_SEED_OFFSET);
    let belt_count = rng.random_range(1..=3);

    let mut belts = Vec::with_capacity(belt_count);
    for index in 0..belt_count {
        // Successive belts are pushed outward so they never overlap.
        let inner = rng.random_range(40.0..80.0) + index as f32 * 50.0;
        let outer = inner + rng.random_range(15.0..30.0);
        let count = rng.random_range(200..=800);
        belts.push(RingStructure::generate(
            StructureKind::Belt,
            inner,
            outer,
            count,
            seed + index as u64,
        ));
    }
    debug!(belts = belts.len(), "asteroid belts ready");
    belts
}

/// Give some gas giants particle rings. The ring orbits its actual planet and
/// tracks it every tick.
fn generate_rings(seed: u64, planets: &[Planet]) -> Vec<RingStructure> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed + RING_SEED_OFFSET);

    let mut rings = Vec::new();
    for (index, planet) in planets.iter().enumerate() {
        if planet.body_type != BodyType::Gas {
            continue;
        }
        if rng.random::<f32>() > 0.4 {
            let inner = planet.radius * 1.5;
            let outer = inner + rng.random_range(2.0..8.0);
            let count = rng.random_range(500..=2000);
            rings.push(RingStructure::generate(
                StructureKind::Ring { planet: index },
                inner,
                outer,
                count,
                seed + RING_SEED_OFFSET + index as u64,
            ));
        }
    }
    debug!(rings = rings.len(), "planetary rings ready");
    rings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_system(1337, 8, None);
        let b = generate_system(1337, 8, None);

        assert_eq!(a.planets.len(), b.planets.len());
        for (pa, pb) in a.planets.iter().zip(&b.planets) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.radius, pb.radius);
            assert_eq!(pa.body_type, pb.body_type);
            assert_eq!(pa.color, pb.color);
            assert_eq!(pa.moons.len(), pb.moons.len());
        }
        assert_eq!(a.structures.len(), b.structures.len());
        for (sa, sb) in a.structures.iter().zip(&b.structures) {
            assert_eq!(sa.particles, sb.particles);
        }
        assert_eq!(a.star.radius, b.star.radius);
        assert_eq!(a.star.color, b.star.color);
    }

    #[test]
    fn test_meshes_are_deterministic_too() {
        let noise = NoiseField::new(1337);
        let a = generate_system(1337, 3, Some(&noise));
        let b = generate_system(1337, 3, Some(&noise));
        for (pa, pb) in a.planets.iter().zip(&b.planets) {
            assert_eq!(pa.mesh, pb.mesh, "Planet meshes must be bit-identical");
        }
    }

    #[test]
    fn test_planet_count_never_exceeds_request() {
        for seed in [0u64, 1, 42, 1337, 99999] {
            let system = generate_system(seed, 8, None);
            assert!(system.planets.len() <= 8);
            assert!(
                !system.planets.is_empty(),
                "The first planet has nothing to collide with; it always places"
            );
        }
    }

    #[test]
    fn test_collision_avoidance_invariant() {
        let system = generate_system(1337, 8, None);
        for (i, a) in system.planets.iter().enumerate() {
            for b in system.planets.iter().skip(i + 1) {
                let separation = a.position.distance(b.position);
                assert!(
                    separation >= a.radius + b.radius + PLACEMENT_BUFFER - 1e-3,
                    "Planets too close: {separation} < {} + {} + {PLACEMENT_BUFFER}",
                    a.radius,
                    b.radius
                );
            }
        }
    }

    #[test]
    fn test_orbit_radii_within_band() {
        let system = generate_system(1337, 8, None);
        for planet in &system.planets {
            assert!(
                (25.0..120.0).contains(&planet.orbit_radius),
                "Orbit radius {} outside the draw range",
                planet.orbit_radius
            );
            assert!((0.0..0.2).contains(&planet.orbit_eccentricity));
            assert!((-0.1..0.1).contains(&planet.orbit_inclination));
        }
    }

    #[test]
    fn test_inner_planets_orbit_faster() {
        let system = generate_system(7, 8, None);
        for a in &system.planets {
            for b in &system.planets {
                if a.orbit_radius < b.orbit_radius {
                    assert!(
                        a.orbit_speed > b.orbit_speed,
                        "Kepler bias violated: r={} s={} vs r={} s={}",
                        a.orbit_radius,
                        a.orbit_speed,
                        b.orbit_radius,
                        b.orbit_speed
                    );
                }
            }
        }
    }

    #[test]
    fn test_gas_giant_moon_cap() {
        // Moon counts draw from the dedicated seed offset, so they can be
        // checked without placing the planet at all.
        for planet_seed in [0u64, 54321, 1337, 424242] {
            let moons = generate_moons(planet_seed, BodyType::Gas, 10.0, None);
            assert!(moons.len() <= 4, "Gas giant moon cap exceeded: {}", moons.len());
            let again = generate_moons(planet_seed, BodyType::Gas, 10.0, None);
            assert_eq!(moons.len(), again.len());
        }
    }

    #[test]
    fn test_small_planet_moon_cap() {
        for planet_seed in [1u64, 2, 3, 4, 5] {
            let moons = generate_moons(planet_seed, BodyType::Rocky, 2.0, None);
            assert!(moons.len() <= 1);
            for moon in &moons {
                assert!(moon.radius >= 0.2 && moon.radius < 0.6);
                assert!(moon.orbit_radius >= 4.0 && moon.orbit_radius < 12.0);
            }
        }
    }

    #[test]
    fn test_type_bands_by_distance() {
        for seed in 0..40u64 {
            let inner = derive_properties(seed, 30.0);
            assert!(
                matches!(inner.body_type, BodyType::Rocky | BodyType::Desert),
                "Inner band produced {:?}",
                inner.body_type
            );
            let outer = derive_properties(seed, 200.0);
            assert!(
                matches!(outer.body_type, BodyType::Gas | BodyType::Ice),
                "Outer band produced {:?}",
                outer.body_type
            );
        }
    }

    #[test]
    fn test_belts_present_and_ordered() {
        let system = generate_system(1337, 8, None);
        let belts: Vec<_> = system
            .structures
            .iter()
            .filter(|s| s.kind() == StructureKind::Belt)
            .collect();
        assert!((1..=3).contains(&belts.len()));
        for belt in &belts {
            assert!(belt.outer_radius() > belt.inner_radius());
            assert!((200..=800).contains(&belt.base_count()));
        }
    }

    #[test]
    fn test_rings_attach_to_gas_giants() {
        let mut any_ring = false;
        for seed in 0..20u64 {
            let system = generate_system(seed, 10, None);
            for structure in &system.structures {
                if let StructureKind::Ring { planet } = structure.kind() {
                    any_ring = true;
                    let parent = &system.planets[planet];
                    assert_eq!(parent.body_type, BodyType::Gas);
                    assert!(
                        (structure.inner_radius() - parent.radius * 1.5).abs() < 1e-4,
                        "Ring inner edge should hug its planet"
                    );
                }
            }
        }
        assert!(any_ring, "20 ten-planet systems should produce at least one ring");
    }

    #[test]
    fn test_missing_noise_leaves_bodies_meshless() {
        let system = generate_system(1337, 4, None);
        assert!(system.star.mesh.is_none());
        for planet in &system.planets {
            assert!(planet.mesh.is_none());
            for moon in &planet.moons {
                assert!(moon.mesh.is_none());
            }
        }
    }

    #[test]
    fn test_star_within_seeded_bands() {
        for seed in [0u64, 1, 1337] {
            let system = generate_system(seed, 0, None);
            assert!((12.0..16.0).contains(&system.star.radius));
            assert!((5500.0..6000.0).contains(&system.star.temperature));
        }
    }
}
