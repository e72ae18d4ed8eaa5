//! Scene lighting

use super::config::FireLightConfig;
use crate::core_types::{Rgb, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

impl AmbientLight {
    #[must_use]
    pub fn white(intensity: f32) -> Self {
        Self {
            color: Rgb::WHITE,
            intensity,
        }
    }
}

/// Point light state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLightState {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
    pub distance: f32,
}

/// Flickering light below the flames.
#[derive(Debug, Clone, PartialEq)]
pub struct FireLight {
    config: FireLightConfig,
}

impl FireLight {
    #[must_use]
    pub fn new(config: FireLightConfig) -> Self {
        Self { config }
    }

    /// Evaluate at elapsed time `t`; must use the same `t` as the fields.
    #[must_use]
    pub fn at(&self, t: f32) -> PointLightState {
        let intensity = self
            .config
            .pulses
            .iter()
            .fold(self.config.base_intensity, |acc, &(amplitude, frequency)| {
                acc + (t * frequency).sin() * amplitude
            });

        PointLightState {
            position: Vec3::new(
                (t * 3.0).sin() * 0.2,
                -0.8 + (t * 5.0).sin() * 0.1,
                1.0,
            ),
            color: self.config.color,
            intensity,
            distance: self.config.distance,
        }
    }
}
