//! Celestial-body mesh synthesis: cube-to-sphere projection with
//! noise-driven radial displacement.

mod cube_face;
mod projection;
mod sphere;

pub use cube_face::CubeFace;
pub use projection::{cube_to_sphere, face_point_on_cube, face_point_on_sphere};
pub use sphere::{CelestialMesh, MeshParams, Vertex, generate_body_mesh};
