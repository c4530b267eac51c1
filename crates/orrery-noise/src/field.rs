//! The noise field shared by every procedural generator in the system.
//!
//! A `NoiseField` is a pure function of (seed, configuration, coordinate):
//! sampling never mutates it, and reconfiguring it rebuilds the backing
//! source immediately so there is no stale state to invalidate.

use glam::DVec3;
use noise::{NoiseFn, Perlin, Simplex, Value, Worley};

/// Which base noise function backs a [`NoiseField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NoiseKind {
    /// OpenSimplex-style gradient noise. Smooth, low directional artifacts.
    #[default]
    Simplex,
    /// Cellular (Worley) noise. Crater- and plate-like features.
    Cellular,
    /// Value noise. Cheap, blockier gradients.
    Value,
    /// Classic Perlin gradient noise.
    Perlin,
}

/// Fractal accumulation parameters for multi-octave sums.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalParams {
    /// Number of octaves to composite. Clamped to at least 1.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f32,
    /// Amplitude multiplier between successive octaves.
    pub gain: f32,
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

enum NoiseSource {
    Simplex(Simplex),
    Cellular(Worley),
    Value(Value),
    Perlin(Perlin),
}

impl NoiseSource {
    fn build(kind: NoiseKind, seed: u32) -> Self {
        match kind {
            NoiseKind::Simplex => NoiseSource::Simplex(Simplex::new(seed)),
            NoiseKind::Cellular => NoiseSource::Cellular(Worley::new(seed)),
            NoiseKind::Value => NoiseSource::Value(Value::new(seed)),
            NoiseKind::Perlin => NoiseSource::Perlin(Perlin::new(seed)),
        }
    }

    fn get_2d(&self, p: [f64; 2]) -> f64 {
        match self {
            NoiseSource::Simplex(n) => n.get(p),
            NoiseSource::Cellular(n) => n.get(p),
            NoiseSource::Value(n) => n.get(p),
            NoiseSource::Perlin(n) => n.get(p),
        }
    }

    fn get_3d(&self, p: [f64; 3]) -> f64 {
        match self {
            NoiseSource::Simplex(n) => n.get(p),
            NoiseSource::Cellular(n) => n.get(p),
            NoiseSource::Value(n) => n.get(p),
            NoiseSource::Perlin(n) => n.get(p),
        }
    }
}

/// Seeded, reconfigurable scalar noise generator.
///
/// Sampling is read-only and safe to share by reference across many
/// generation calls in the same tick. The setters rebuild the source and must
/// not race in-flight samples (single-writer discipline).
pub struct NoiseField {
    seed: u32,
    kind: NoiseKind,
    frequency: f32,
    fractal: FractalParams,
    source: NoiseSource,
}

impl NoiseField {
    /// Create a field with the default configuration: simplex noise at
    /// frequency 0.01 with 4 octaves, lacunarity 2.0, gain 0.5.
    pub fn new(seed: u32) -> Self {
        let kind = NoiseKind::default();
        Self {
            seed,
            kind,
            frequency: 0.01,
            fractal: FractalParams::default(),
            source: NoiseSource::build(kind, seed),
        }
    }

    /// Current seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current base noise kind.
    pub fn kind(&self) -> NoiseKind {
        self.kind
    }

    /// Current base frequency applied by [`sample_2d`](Self::sample_2d) and
    /// [`sample_3d`](Self::sample_3d).
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current fractal parameters.
    pub fn fractal(&self) -> FractalParams {
        self.fractal
    }

    /// Reseed the field. Takes effect for all subsequent samples.
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
        self.source = NoiseSource::build(self.kind, seed);
    }

    /// Switch the base noise function.
    pub fn set_kind(&mut self, kind: NoiseKind) {
        self.kind = kind;
        self.source = NoiseSource::build(kind, self.seed);
    }

    /// Set the base sampling frequency. Clamped to be positive.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.max(f32::EPSILON);
    }

    /// Replace the fractal parameters. Octave count is clamped to at least 1.
    pub fn set_fractal(&mut self, mut fractal: FractalParams) {
        fractal.octaves = fractal.octaves.max(1);
        self.fractal = fractal;
    }

    /// Sample 2D noise at the configured frequency. Result is roughly [-1, 1].
    pub fn sample_2d(&self, x: f32, y: f32) -> f32 {
        let f = self.frequency as f64;
        self.source.get_2d([x as f64 * f, y as f64 * f]) as f32
    }

    /// Sample 3D noise at the configured frequency. Result is roughly [-1, 1].
    pub fn sample_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        let f = self.frequency as f64;
        self.source
            .get_3d([x as f64 * f, y as f64 * f, z as f64 * f]) as f32
    }

    /// 2D sample remapped from [-1, 1] to [0, 1].
    pub fn normalized_2d(&self, x: f32, y: f32) -> f32 {
        (self.sample_2d(x, y) + 1.0) * 0.5
    }

    /// 3D sample remapped from [-1, 1] to [0, 1].
    pub fn normalized_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        (self.sample_3d(x, y, z) + 1.0) * 0.5
    }

    /// Fractal Brownian motion over 2D noise.
    ///
    /// Sums `octaves` samples, multiplying frequency by `lacunarity` and
    /// amplitude by `gain` after each term, then divides by the amplitude sum
    /// so the result stays in [-1, 1] regardless of octave count.
    pub fn fbm_2d(
        &self,
        x: f32,
        y: f32,
        octaves: u32,
        base_frequency: f32,
        base_amplitude: f32,
        lacunarity: f32,
        gain: f32,
    ) -> f32 {
        let mut total = 0.0f32;
        let mut amplitude = base_amplitude;
        let mut frequency = base_frequency;
        let mut max_value = 0.0f32;

        for _ in 0..octaves.max(1) {
            let sample = self
                .source
                .get_2d([(x * frequency) as f64, (y * frequency) as f64])
                as f32;
            total += sample * amplitude;
            max_value += amplitude;

            amplitude *= gain;
            frequency *= lacunarity;
        }

        // A zero amplitude sum (base amplitude 0.0) has nothing to normalize.
        if max_value <= f32::EPSILON {
            return 0.0;
        }
        total / max_value
    }

    /// Fractal Brownian motion over 3D noise. Same accumulation and
    /// normalization as [`fbm_2d`](Self::fbm_2d).
    pub fn fbm_3d(
        &self,
        point: DVec3,
        octaves: u32,
        base_frequency: f32,
        base_amplitude: f32,
        lacunarity: f32,
        gain: f32,
    ) -> f32 {
        let mut total = 0.0f32;
        let mut amplitude = base_amplitude;
        let mut frequency = base_frequency;
        let mut max_value = 0.0f32;

        for _ in 0..octaves.max(1) {
            let f = frequency as f64;
            let sample = self
                .source
                .get_3d([point.x * f, point.y * f, point.z * f]) as f32;
            total += sample * amplitude;
            max_value += amplitude;

            amplitude *= gain;
            frequency *= lacunarity;
        }

        if max_value <= f32::EPSILON {
            return 0.0;
        }
        total / max_value
    }
}
