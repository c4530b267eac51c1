//! Seeded scalar noise: configurable base noise plus normalized fractal sums.

mod field;

pub use field::{FractalParams, NoiseField, NoiseKind};
