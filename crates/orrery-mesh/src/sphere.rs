//! Displaced sphere mesh generation for planets, moons, and low-poly
//! asteroids.
//!
//! Each of the six cube faces is sampled on a `resolution × resolution`
//! vertex grid, projected onto the unit sphere, and displaced radially by a
//! fractal noise sum evaluated at the 3D sphere position. Sampling in 3D
//! (rather than per-face UV space) keeps the displacement continuous across
//! face seams: neighboring faces ask the noise field about the same point.

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3};

use orrery_noise::NoiseField;

use crate::{CubeFace, face_point_on_sphere};

/// One mesh vertex, laid out for direct GPU upload by a renderer
/// collaborator.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// World-scale position after height displacement.
    pub position: [f32; 3],
    /// Un-displaced sphere normal. The exact displaced-surface normal is a
    /// known simplification gap.
    pub normal: [f32; 3],
    /// Face-local (u, v).
    pub uv: [f32; 2],
}

/// An indexed triangle mesh for one celestial body.
///
/// Replaced wholesale on regeneration; there is no incremental patching.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CelestialMesh {
    /// Vertex list, faces in [`CubeFace::ALL`] order, rows then columns.
    pub vertices: Vec<Vertex>,
    /// Triangle index list. Always a multiple of 3, indices in bounds.
    pub indices: Vec<u32>,
    resolution: u32,
}

impl CelestialMesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices.
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// The per-face grid resolution this mesh was generated at. The LOD
    /// controller compares against this to decide whether to regenerate.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Whether the mesh holds renderable geometry.
    pub fn is_valid(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty()
    }
}

/// Inputs for one body-mesh generation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshParams {
    /// Body radius in world units.
    pub radius: f32,
    /// Vertices per face edge. Values below 2 are clamped up.
    pub resolution: u32,
    /// Multiplier applied to the normalized fractal height.
    pub height_scale: f32,
    /// Base frequency of the first noise octave.
    pub noise_frequency: f32,
    /// Number of fractal octaves. Clamped to at least 1.
    pub noise_octaves: u32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            resolution: 64,
            height_scale: 1.0,
            noise_frequency: 0.01,
            noise_octaves: 4,
        }
    }
}

impl MeshParams {
    /// Clamp every field to its valid range. Generation always produces some
    /// mesh rather than rejecting inputs.
    fn sanitized(self) -> Self {
        Self {
            radius: self.radius.max(f32::EPSILON),
            resolution: self.resolution.max(2),
            height_scale: self.height_scale,
            noise_frequency: self.noise_frequency.max(f32::EPSILON),
            noise_octaves: self.noise_octaves.max(1),
        }
    }
}

/// Generate the mesh for one body. Deterministic and idempotent: identical
/// inputs produce a bit-identical mesh, including vertex ordering.
pub fn generate_body_mesh(params: &MeshParams, noise: &NoiseField) -> CelestialMesh {
    let params = params.sanitized();
    let resolution = params.resolution;
    let verts_per_face = (resolution * resolution) as usize;
    let quads_per_edge = (resolution - 1) as usize;

    let mut vertices = Vec::with_capacity(verts_per_face * 6);
    let mut indices = Vec::with_capacity(quads_per_edge * quads_per_edge * 6 * 6);

    for face in CubeFace::ALL {
        let vertex_offset = (face.index() * verts_per_face) as u32;
        generate_face(face, &params, noise, &mut vertices, &mut indices, vertex_offset);
    }

    CelestialMesh {
        vertices,
        indices,
        resolution,
    }
}

fn generate_face(
    face: CubeFace,
    params: &MeshParams,
    noise: &NoiseField,
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    vertex_offset: u32,
) {
    let resolution = params.resolution;
    let step = 1.0 / (resolution - 1) as f32;

    for row in 0..resolution {
        for col in 0..resolution {
            let u = col as f32 * step;
            let v = row as f32 * step;

            let sphere_pos = face_point_on_sphere(face, u, v);
            let height = sample_height(sphere_pos, params, noise);
            let position = sphere_pos * (params.radius + height);

            vertices.push(Vertex {
                position: position.to_array(),
                normal: sphere_pos.to_array(),
                uv: [u, v],
            });
        }
    }

    for row in 0..resolution - 1 {
        for col in 0..resolution - 1 {
            let top_left = vertex_offset + row * resolution + col;
            let top_right = top_left + 1;
            let bottom_left = top_left + resolution;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }
}

/// Normalized fractal height at a unit-sphere position, scaled by the body's
/// height scale.
fn sample_height(sphere_pos: Vec3, params: &MeshParams, noise: &NoiseField) -> f32 {
    let point = DVec3::new(
        sphere_pos.x as f64,
        sphere_pos.y as f64,
        sphere_pos.z as f64,
    );
    let height = noise.fbm_3d(
        point,
        params.noise_octaves,
        params.noise_frequency,
        1.0,
        2.0,
        0.5,
    );
    height * params.height_scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> MeshParams {
        MeshParams {
            radius: 10.0,
            resolution: 8,
            height_scale: 0.5,
            noise_frequency: 0.8,
            noise_octaves: 4,
        }
    }

    #[test]
    fn test_vertex_and_index_counts() {
        let noise = NoiseField::new(1);
        let mesh = generate_body_mesh(&small_params(), &noise);
        let res = 8usize;
        assert_eq!(mesh.vertex_count(), res * res * 6);
        assert_eq!(mesh.index_count(), (res - 1) * (res - 1) * 6 * 6);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_index_invariants() {
        let noise = NoiseField::new(9);
        let mesh = generate_body_mesh(&small_params(), &noise);
        assert_eq!(mesh.index_count() % 3, 0, "Index count must be a multiple of 3");
        let n = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < n, "Index {idx} out of bounds (vertex count {n})");
        }
    }

    #[test]
    fn test_generation_is_idempotent() {
        let noise = NoiseField::new(1337);
        let params = small_params();
        let a = generate_body_mesh(&params, &noise);
        let b = generate_body_mesh(&params, &noise);
        assert_eq!(a, b, "Same inputs must produce a bit-identical mesh");
    }

    #[test]
    fn test_resolution_clamped_to_minimum() {
        let noise = NoiseField::new(3);
        let mesh = generate_body_mesh(
            &MeshParams {
                resolution: 0,
                ..small_params()
            },
            &noise,
        );
        assert_eq!(mesh.resolution(), 2);
        assert_eq!(mesh.vertex_count(), 2 * 2 * 6);
    }

    #[test]
    fn test_normals_are_unit_sphere_positions() {
        let noise = NoiseField::new(4);
        let mesh = generate_body_mesh(&small_params(), &noise);
        for vertex in &mesh.vertices {
            let n = Vec3::from_array(vertex.normal);
            assert!(
                (n.length() - 1.0).abs() < 1e-5,
                "Normal not unit length: {n:?}"
            );
        }
    }

    #[test]
    fn test_displacement_bounded_by_height_scale() {
        let noise = NoiseField::new(7);
        let params = small_params();
        let mesh = generate_body_mesh(&params, &noise);
        for vertex in &mesh.vertices {
            let r = Vec3::from_array(vertex.position).length();
            assert!(
                (r - params.radius).abs() <= params.height_scale + 1e-4,
                "Vertex radius {r} escaped radius ± height_scale"
            );
        }
    }

    #[test]
    fn test_seam_vertices_receive_same_height() {
        // Vertices on a shared cube edge sample noise at the same 3D point,
        // so their displaced radii must match across the two faces.
        let noise = NoiseField::new(42);
        let params = small_params();
        let mesh = generate_body_mesh(&params, &noise);
        let res = params.resolution as usize;

        // +X face, u=0 column vs +Z face, u=res-1 column, same row.
        for row in 0..res {
            let a = mesh.vertices[CubeFace::PosX.index() * res * res + row * res];
            let b = mesh.vertices[CubeFace::PosZ.index() * res * res + row * res + (res - 1)];
            let pa = Vec3::from_array(a.position);
            let pb = Vec3::from_array(b.position);
            assert!(
                (pa - pb).length() < 1e-4,
                "Seam vertices diverged at row {row}: {pa:?} vs {pb:?}"
            );
        }
    }
}
