//! Cube-to-sphere projection.
//!
//! Naive normalization of cube-surface points pinches cell areas toward the
//! face corners and leaves visible seams once terrain is displaced. The
//! component-wise square-root correction used here keeps cell areas close to
//! uniform across face boundaries.

use glam::Vec3;

use crate::CubeFace;

/// Map face-local `(u, v)` in [0, 1]² to a point on the surface of the
/// `[-1, 1]` cube. The face center `(0.5, 0.5)` lands on the face normal.
#[inline]
#[must_use]
pub fn face_point_on_cube(face: CubeFace, u: f32, v: f32) -> Vec3 {
    let s = 2.0 * u - 1.0;
    let t = 2.0 * v - 1.0;
    face.normal() + s * face.tangent() + t * face.bitangent()
}

/// Project a cube-surface point (one coordinate `±1`) onto the unit sphere
/// with the analytic area-preserving correction:
///
/// ```text
/// sx = x * sqrt(1 - y²/2 - z²/2 + y²z²/3)
/// sy = y * sqrt(1 - z²/2 - x²/2 + z²x²/3)
/// sz = z * sqrt(1 - x²/2 - y²/2 + x²y²/3)
/// ```
///
/// The result is renormalized so callers can rely on unit length before any
/// height displacement is applied.
#[inline]
#[must_use]
pub fn cube_to_sphere(cube_point: Vec3) -> Vec3 {
    let x2 = cube_point.x * cube_point.x;
    let y2 = cube_point.y * cube_point.y;
    let z2 = cube_point.z * cube_point.z;

    Vec3::new(
        cube_point.x * (1.0 - y2 * 0.5 - z2 * 0.5 + y2 * z2 / 3.0).sqrt(),
        cube_point.y * (1.0 - z2 * 0.5 - x2 * 0.5 + z2 * x2 / 3.0).sqrt(),
        cube_point.z * (1.0 - x2 * 0.5 - y2 * 0.5 + x2 * y2 / 3.0).sqrt(),
    )
    .normalize()
}

/// Convenience: face-local `(u, v)` straight to the unit sphere.
#[inline]
#[must_use]
pub fn face_point_on_sphere(face: CubeFace, u: f32, v: f32) -> Vec3 {
    cube_to_sphere(face_point_on_cube(face, u, v))
}
