//! The central star: seeded physical properties and a small animation state
//! (rotation plus a brightness pulse) consumed by the lighting collaborator.

use std::f32::consts::TAU;

use glam::Vec3;

use orrery_mesh::{CelestialMesh, MeshParams, generate_body_mesh};
use orrery_noise::NoiseField;

use crate::body::wrap_angle;

/// Rate the pulse phase advances at, radians per second.
const PULSE_RATE: f32 = 2.0;
/// Fractional intensity swing of the pulse.
const PULSE_AMPLITUDE: f32 = 0.1;

/// The system's star. Fixed at the origin; everything orbits it.
#[derive(Clone, Debug)]
pub struct Star {
    /// Render-scale radius.
    pub radius: f32,
    /// Surface temperature in Kelvin. Determines the color band.
    pub temperature: f32,
    /// Light color derived from the temperature.
    pub color: Vec3,
    /// Base light intensity before the pulse modulation.
    pub base_intensity: f32,
    /// Self-rotation rate, radians per second.
    pub rotation_speed: f32,
    /// Current rotation angle in [0, 2π).
    pub rotation_angle: f32,
    /// Pulse animation phase in [0, 2π).
    pub pulse_phase: f32,
    /// Star mesh; `None` when no noise source was available.
    pub mesh: Option<CelestialMesh>,
}

impl Star {
    /// Map a surface temperature to a warm light color, scaled by a seeded
    /// variation factor.
    #[must_use]
    pub fn color_from_temperature(temperature: f32, variation: f32) -> Vec3 {
        let base = if temperature < 5700.0 {
            Vec3::new(1.0, 0.8, 0.4)
        } else if temperature < 5900.0 {
            Vec3::new(1.0, 0.9, 0.6)
        } else {
            Vec3::new(1.0, 0.95, 0.8)
        };
        base * variation
    }

    /// Generate the star's sphere mesh. Stars are smooth: no height
    /// displacement, fixed high resolution.
    pub fn generate_mesh(&mut self, noise: &NoiseField) {
        let params = MeshParams {
            radius: self.radius,
            resolution: 64,
            height_scale: 0.0,
            noise_frequency: 0.01,
            noise_octaves: 1,
        };
        self.mesh = Some(generate_body_mesh(&params, noise));
    }

    /// World position. The star anchors the system at the origin.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// Light intensity for this frame: base intensity modulated by the pulse.
    #[must_use]
    pub fn current_intensity(&self) -> f32 {
        self.base_intensity * (1.0 + PULSE_AMPLITUDE * self.pulse_phase.sin())
    }

    /// Light color scaled by the current intensity, for the lighting
    /// collaborator.
    #[must_use]
    pub fn light_color(&self) -> Vec3 {
        self.color * self.current_intensity()
    }

    /// Advance rotation and pulse animation one tick.
    pub fn update(&mut self, dt: f32) {
        self.rotation_angle = wrap_angle(self.rotation_angle + self.rotation_speed * dt);
        self.pulse_phase = wrap_angle(self.pulse_phase + PULSE_RATE * dt);
    }
}
