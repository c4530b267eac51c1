//! The six logical faces of the cube that bodies are projected from.

use glam::Vec3;

/// One face of the generation cube. The outward normal points along the
/// named axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CubeFace {
    /// +X face
    PosX = 0,
    /// −X face
    NegX = 1,
    /// +Y face
    PosY = 2,
    /// −Y face
    NegY = 3,
    /// +Z face
    PosZ = 4,
    /// −Z face
    NegZ = 5,
}

impl CubeFace {
    /// All six faces in the canonical generation order. Vertex ordering of a
    /// generated mesh depends on this order staying fixed.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Index of this face within [`CubeFace::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward-pointing unit normal.
    #[must_use]
    pub fn normal(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::X,
            CubeFace::NegX => Vec3::NEG_X,
            CubeFace::PosY => Vec3::Y,
            CubeFace::NegY => Vec3::NEG_Y,
            CubeFace::PosZ => Vec3::Z,
            CubeFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Direction of increasing `u` on this face.
    #[must_use]
    pub fn tangent(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::NEG_Z,
            CubeFace::NegX => Vec3::Z,
            CubeFace::PosY => Vec3::X,
            CubeFace::NegY => Vec3::X,
            CubeFace::PosZ => Vec3::X,
            CubeFace::NegZ => Vec3::NEG_X,
        }
    }

    /// Direction of increasing `v` on this face.
    #[must_use]
    pub fn bitangent(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::Y,
            CubeFace::NegX => Vec3::Y,
            CubeFace::PosY => Vec3::NEG_Z,
            CubeFace::NegY => Vec3::Z,
            CubeFace::PosZ => Vec3::Y,
            CubeFace::NegZ => Vec3::Y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_faces_in_canonical_order() {
        assert_eq!(CubeFace::ALL.len(), 6);
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i, "Face {face:?} out of canonical order");
        }
    }

    #[test]
    fn test_basis_is_orthonormal() {
        for face in CubeFace::ALL {
            let n = face.normal();
            let t = face.tangent();
            let b = face.bitangent();
            assert!((n.length() - 1.0).abs() < 1e-6);
            assert!((t.length() - 1.0).abs() < 1e-6);
            assert!((b.length() - 1.0).abs() < 1e-6);
            assert!(n.dot(t).abs() < 1e-6, "tangent not ⊥ normal for {face:?}");
            assert!(n.dot(b).abs() < 1e-6, "bitangent not ⊥ normal for {face:?}");
        }
    }

    #[test]
    fn test_tangent_cross_bitangent_is_normal() {
        for face in CubeFace::ALL {
            let cross = face.tangent().cross(face.bitangent());
            assert!(
                (cross - face.normal()).length() < 1e-6,
                "t × b != n for {face:?}: got {cross:?}"
            );
        }
    }
}
