//! Distance-based level-of-detail selection for body meshes.
//!
//! Tier selection normalizes the observer distance by body size so that a
//! large planet holds detail further out than a small moonlet at the same
//! raw distance.

use glam::Vec3;

/// Mesh detail tier, carrying its grid resolution per cube face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetailTier {
    High,
    Medium,
    Low,
}

impl DetailTier {
    /// Vertices per cube-face edge for this tier.
    #[must_use]
    pub fn resolution(self) -> u32 {
        match self {
            Self::High => 64,
            Self::Medium => 32,
            Self::Low => 16,
        }
    }
}

/// Picks detail tiers from observer distance, normalized by body radius.
#[derive(Clone, Copy, Debug)]
pub struct LodController {
    /// Effective distance below which the high tier applies.
    pub high_threshold: f32,
    /// Effective distance below which the medium tier applies.
    pub low_threshold: f32,
}

impl Default for LodController {
    fn default() -> Self {
        Self {
            high_threshold: 100.0,
            low_threshold: 500.0,
        }
    }
}

impl LodController {
    /// Tier for a body of `radius` whose center sits `distance` from the
    /// observer. Distance is scaled down by body size so tier boundaries
    /// track apparent size rather than raw range.
    #[must_use]
    pub fn desired_tier(&self, distance: f32, radius: f32) -> DetailTier {
        let effective = distance / (radius + 1.0);
        if effective < self.high_threshold {
            DetailTier::High
        } else if effective < self.low_threshold {
            DetailTier::Medium
        } else {
            DetailTier::Low
        }
    }

    /// Convenience: resolution for a body as seen from `observer`.
    #[must_use]
    pub fn desired_resolution(&self, observer: Vec3, body_position: Vec3, radius: f32) -> u32 {
        self.desired_tier(observer.distance(body_position), radius)
            .resolution()
    }
}
