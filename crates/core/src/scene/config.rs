//! Scene configuration
//!
//! Every tunable of the burn effect lives here with its tuned default, so a
//! host can load a config from any serde format or just use
//! `SceneConfig::default()`.

use super::viewport::DensityTier;
use crate::core_types::{ColorError, ColorRamp, Rgb, FIRE_COLORS};
use crate::particles::{EmberFieldConfig, FireFieldConfig, SmokeFieldConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Reasons a [`SceneConfig`] or mount request is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Palette could not be built
    Palette(ColorError),
    /// A spawn range is reversed or not finite
    InvalidRange { field: &'static str },
    /// A lifetime range reaches zero or below
    NonPositiveLifetime { field: &'static str },
    /// A value that must be in `[0, 1]` is not
    OutOfUnitRange { field: &'static str, value: f32 },
    /// A value that must be strictly positive is not
    NonPositive { field: &'static str, value: f32 },
    /// Mounting on a surface with no area
    EmptyViewport { width: u32, height: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Palette(e) => write!(f, "invalid palette: {e}"),
            ConfigError::InvalidRange { field } => {
                write!(f, "range `{field}` must be finite with start <= end")
            }
            ConfigError::NonPositiveLifetime { field } => {
                write!(f, "lifetime range `{field}` must be strictly positive")
            }
            ConfigError::OutOfUnitRange { field, value } => {
                write!(f, "`{field}` must be within [0, 1], got {value}")
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "`{field}` must be positive, got {value}")
            }
            ConfigError::EmptyViewport { width, height } => {
                write!(f, "viewport {width}x{height} has no area")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Palette(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorError> for ConfigError {
    fn from(e: ColorError) -> Self {
        ConfigError::Palette(e)
    }
}

/// Fire and smoke counts for one density tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub fire: usize,
    pub smoke: usize,
}

/// Particle counts per density tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityTable {
    pub small_mobile: TierCounts,
    pub mobile: TierCounts,
    pub desktop: TierCounts,
}

impl Default for DensityTable {
    fn default() -> Self {
        Self {
            small_mobile: TierCounts { fire: 80, smoke: 15 },
            mobile: TierCounts {
                fire: 120,
                smoke: 25,
            },
            desktop: TierCounts {
                fire: 220,
                smoke: 50,
            },
        }
    }
}

impl DensityTable {
    #[must_use]
    pub fn counts(&self, tier: DensityTier) -> TierCounts {
        match tier {
            DensityTier::SmallMobile => self.small_mobile,
            DensityTier::Mobile => self.mobile,
            DensityTier::Desktop => self.desktop,
        }
    }
}

/// Flickering point light under the flames.
///
/// Intensity is `base + Σ amplitude · sin(frequency · t)` over `pulses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireLightConfig {
    pub color: Rgb,
    /// Falloff distance; zero would mean infinite range
    pub distance: f32,
    pub base_intensity: f32,
    /// `(amplitude, frequency)` pairs
    pub pulses: Vec<(f32, f32)>,
}

impl Default for FireLightConfig {
    fn default() -> Self {
        Self {
            color: FIRE_COLORS[3],
            distance: 5.0,
            base_intensity: 1.5,
            pulses: vec![(0.5, 10.0), (0.3, 17.0)],
        }
    }
}

/// Complete configuration of a [`FireEffectScene`](super::FireEffectScene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub fire: FireFieldConfig,
    pub smoke: SmokeFieldConfig,
    pub embers: EmberFieldConfig,
    pub density: DensityTable,
    /// Palette sampled by flames and ember tints
    pub ramp: ColorRamp,
    pub light: FireLightConfig,
    pub ambient_intensity: f32,
    /// Camera distance along +z
    pub camera_z: f32,
    /// Margin before a zoom or tier band is left; 0 switches exactly at breakpoints
    pub hysteresis_px: u32,
    /// Pin the particle seed; `None` reseeds from the OS on every mount
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fire: FireFieldConfig::default(),
            smoke: SmokeFieldConfig::default(),
            embers: EmberFieldConfig::default(),
            density: DensityTable::default(),
            ramp: ColorRamp::fire(),
            light: FireLightConfig::default(),
            ambient_intensity: 0.3,
            camera_z: 10.0,
            hysteresis_px: 0,
            seed: None,
        }
    }
}

fn check_range(range: &Range<f32>, field: &'static str) -> Result<(), ConfigError> {
    if range.start.is_finite() && range.end.is_finite() && range.start <= range.end {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field })
    }
}

fn check_lifetime(range: &Range<f32>, field: &'static str) -> Result<(), ConfigError> {
    check_range(range, field)?;
    if range.start > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveLifetime { field })
    }
}

fn check_unit(value: f32, field: &'static str) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn check_positive(value: f32, field: &'static str) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

impl SceneConfig {
    /// Default config with a custom palette given as hex strings.
    pub fn with_palette<S: AsRef<str>>(stops: &[S]) -> Result<Self, ConfigError> {
        let stops = stops
            .iter()
            .map(|s| s.as_ref().parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            ramp: ColorRamp::new(stops)?,
            ..Self::default()
        })
    }

    /// Check every range and scalar for values the motion laws cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fire = &self.fire;
        for (range, field) in [
            (&fire.x, "fire.x"),
            (&fire.y, "fire.y"),
            (&fire.z, "fire.z"),
            (&fire.speed, "fire.speed"),
            (&fire.base_size, "fire.base_size"),
            (&fire.rotation_speed, "fire.rotation_speed"),
            (&fire.twist_factor, "fire.twist_factor"),
            (&fire.flicker_frequency, "fire.flicker_frequency"),
            (&fire.color_bias, "fire.color_bias"),
        ] {
            check_range(range, field)?;
        }
        check_lifetime(&fire.lifetime, "fire.lifetime")?;

        let smoke = &self.smoke;
        for (range, field) in [
            (&smoke.x, "smoke.x"),
            (&smoke.y, "smoke.y"),
            (&smoke.z, "smoke.z"),
            (&smoke.speed, "smoke.speed"),
            (&smoke.base_size, "smoke.base_size"),
        ] {
            check_range(range, field)?;
        }
        check_lifetime(&smoke.lifetime, "smoke.lifetime")?;

        let embers = &self.embers;
        for (range, field) in [
            (&embers.x, "embers.x"),
            (&embers.y, "embers.y"),
            (&embers.z, "embers.z"),
            (&embers.base_size, "embers.base_size"),
        ] {
            check_range(range, field)?;
        }
        check_unit(embers.opacity, "embers.opacity")?;
        if embers.hot_stops == 0 {
            return Err(ConfigError::NonPositive {
                field: "embers.hot_stops",
                value: 0.0,
            });
        }

        if self.ramp.len() < 2 {
            return Err(ColorError::TooFewStops(self.ramp.len()).into());
        }

        check_positive(self.camera_z, "camera_z")?;
        check_positive(self.light.distance, "light.distance")?;
        check_unit(self.ambient_intensity, "ambient_intensity")?;

        Ok(())
    }
}
