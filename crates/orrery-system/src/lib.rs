//! Solar-system generation and kinematic orbital simulation: seeded layout
//! with collision avoidance, per-tick orbital integration, distance-based LOD
//! mesh regeneration, and particle belts/rings.

mod body;
mod generator;
mod lod;
mod rings;
mod star;
mod system;

pub use body::{BodyType, Moon, Planet, TerrainParams, orbital_position, wrap_angle};
pub use generator::generate_system;
pub use lod::{DetailTier, LodController};
pub use rings::{ParticlePalette, RingParticle, RingStructure, StructureKind};
pub use star::Star;
pub use system::SolarSystem;
