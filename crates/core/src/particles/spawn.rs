//! Seed distributions for each particle kind
//!
//! Each config holds the ranges seed values are drawn from. Defaults carry
//! the tuned look of the absolution burn; every range is sampled as
//! `start + u · (end - start)` with `u` uniform in `[0, 1)`, so a collapsed
//! range (`start == end`) pins the value instead of panicking.

use super::particle::{FlameTraits, Particle};
use crate::core_types::{ColorRamp, Rgb, Vec3, FIRE_COLORS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::Range;

#[inline]
fn sample<R: Rng + ?Sized>(rng: &mut R, range: &Range<f32>) -> f32 {
    range.start + rng.random::<f32>() * (range.end - range.start)
}

/// Spawn ranges for flame particles.
///
/// Each range is sampled as `start + u * (end - start)` with `u` uniform in
/// `[0, 1)`, so values cover `[start, end)` and `end` is reached only through
/// float rounding. The default `y` of `-1.5..-1.2` is the band
/// `-1.5 + u * 0.3` at the base of the fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireFieldConfig {
    pub x: Range<f32>,
    pub y: Range<f32>,
    pub z: Range<f32>,
    pub speed: Range<f32>,
    pub base_size: Range<f32>,
    pub lifetime: Range<f32>,
    pub rotation_speed: Range<f32>,
    pub twist_factor: Range<f32>,
    pub flicker_frequency: Range<f32>,
    pub color_bias: Range<f32>,
}

impl Default for FireFieldConfig {
    fn default() -> Self {
        Self {
            x: -1.0..1.0,
            y: -1.5..-1.2,
            z: -0.2..0.2,
            speed: 0.6..1.4,
            base_size: 0.1..0.35,
            lifetime: 1.0..1.9,
            rotation_speed: -0.15..0.15,
            twist_factor: 0.2..0.6,
            flicker_frequency: 6.0..14.0,
            color_bias: 0.0..0.3,
        }
    }
}

/// Spawn ranges and colors for smoke puffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeFieldConfig {
    pub x: Range<f32>,
    /// Starts where the flames end
    pub y: Range<f32>,
    pub z: Range<f32>,
    pub speed: Range<f32>,
    pub base_size: Range<f32>,
    pub lifetime: Range<f32>,
    pub base_color: Rgb,
    pub tip_color: Rgb,
}

impl Default for SmokeFieldConfig {
    fn default() -> Self {
        Self {
            x: -1.0..1.0,
            y: 0.8..1.3,
            z: -0.25..0.25,
            speed: 0.2..0.5,
            base_size: 0.15..0.35,
            lifetime: 1.5..2.5,
            base_color: FIRE_COLORS[7],
            tip_color: FIRE_COLORS[8],
        }
    }
}

/// Placement of the static base embers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmberFieldConfig {
    pub count: usize,
    pub x: Range<f32>,
    pub y: Range<f32>,
    pub z: Range<f32>,
    pub base_size: Range<f32>,
    /// Tints are drawn from this many of the hottest ramp stops
    pub hot_stops: usize,
    pub opacity: f32,
}

impl Default for EmberFieldConfig {
    fn default() -> Self {
        Self {
            count: 12,
            x: -1.2..1.2,
            y: -1.2..-1.0,
            z: -0.15..0.15,
            base_size: 0.1..0.35,
            hot_stops: 3,
            opacity: 0.9,
        }
    }
}

/// Draw `count` flame particles.
pub fn spawn_fire<R: Rng + ?Sized>(rng: &mut R, config: &FireFieldConfig, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let origin = Vec3::new(
                sample(rng, &config.x),
                sample(rng, &config.y),
                sample(rng, &config.z),
            );
            Particle::new(origin)
                .with_speed(sample(rng, &config.speed))
                .with_base_size(sample(rng, &config.base_size))
                .with_phases(rng.random::<f32>() * TAU, rng.random::<f32>() * TAU)
                .with_lifetime(sample(rng, &config.lifetime))
                .with_seed(rng.random::<f32>())
                .with_flame(FlameTraits {
                    rotation_speed: sample(rng, &config.rotation_speed),
                    color_bias: sample(rng, &config.color_bias),
                    twist_factor: sample(rng, &config.twist_factor),
                    flicker_frequency: sample(rng, &config.flicker_frequency),
                })
        })
        .collect()
}

/// Draw `count` smoke particles.
pub fn spawn_smoke<R: Rng + ?Sized>(rng: &mut R, config: &SmokeFieldConfig, count: usize) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let origin = Vec3::new(
                sample(rng, &config.x),
                sample(rng, &config.y),
                sample(rng, &config.z),
            );
            Particle::new(origin)
                .with_speed(sample(rng, &config.speed))
                .with_base_size(sample(rng, &config.base_size))
                .with_phases(rng.random::<f32>() * TAU, rng.random::<f32>() * TAU)
                .with_lifetime(sample(rng, &config.lifetime))
                .with_seed(rng.random::<f32>())
        })
        .collect()
}

/// Draw the base embers, tinting each from the hottest stops of `ramp`.
pub fn spawn_embers<R: Rng + ?Sized>(rng: &mut R, config: &EmberFieldConfig, ramp: &ColorRamp) -> Vec<Particle> {
    let hot = &ramp.stops()[..config.hot_stops.clamp(1, ramp.len())];

    (0..config.count)
        .map(|_| {
            let origin = Vec3::new(
                sample(rng, &config.x),
                sample(rng, &config.y),
                sample(rng, &config.z),
            );
            let tint = hot[rng.random_range(0..hot.len())];
            Particle::new(origin)
                .with_base_size(sample(rng, &config.base_size))
                .with_phases(rng.random::<f32>() * TAU, 0.0)
                .with_seed(rng.random::<f32>())
                .with_tint(tint)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn within(value: f32, range: &Range<f32>) -> bool {
        value >= range.start && value <= range.end
    }

    #[test]
    fn test_fire_seeds_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = FireFieldConfig::default();
        let particles = spawn_fire(&mut rng, &config, 300);

        assert_eq!(particles.len(), 300);
        for p in &particles {
            assert!(within(p.origin.x, &config.x));
            assert!(within(p.origin.y, &config.y));
            assert!(within(p.speed, &config.speed));
            assert!(within(p.lifetime, &config.lifetime));
            assert!((0.0..TAU).contains(&p.flicker_phase));
            assert!((0.0..1.0).contains(&p.seed));

            let flame = p.flame.expect("fire particles carry flame traits");
            assert!(within(flame.color_bias, &config.color_bias));
            assert!(within(flame.flicker_frequency, &config.flicker_frequency));
            assert!(p.tint.is_none());
        }
    }

    #[test]
    fn test_fire_base_band_is_covered() {
        let config = FireFieldConfig::default();
        let particles = spawn_fire(&mut StdRng::seed_from_u64(19), &config, 300);
        let (low, high) = particles
            .iter()
            .map(|p| p.origin.y)
            .fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));

        assert!(low >= -1.5 && low < -1.45, "lowest {low}");
        assert!(high <= -1.2 && high > -1.25, "highest {high}");
    }

    #[test]
    fn test_smoke_has_no_flame_traits() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = SmokeFieldConfig::default();
        let particles = spawn_smoke(&mut rng, &config, 50);

        assert_eq!(particles.len(), 50);
        assert!(particles.iter().all(|p| p.flame.is_none()));
        assert!(particles.iter().all(|p| within(p.origin.y, &config.y)));
    }

    #[test]
    fn test_ember_tints_come_from_hot_stops() {
        let mut rng = StdRng::seed_from_u64(3);
        let ramp = ColorRamp::fire();
        let particles = spawn_embers(&mut rng, &EmberFieldConfig::default(), &ramp);

        assert_eq!(particles.len(), 12);
        for p in &particles {
            let tint = p.tint.expect("embers are tinted");
            assert!(FIRE_COLORS[..3].contains(&tint));
        }
    }

    #[test]
    fn test_same_seed_same_particles() {
        let config = FireFieldConfig::default();
        let a = spawn_fire(&mut StdRng::seed_from_u64(42), &config, 20);
        let b = spawn_fire(&mut StdRng::seed_from_u64(42), &config, 20);
        let c = spawn_fire(&mut StdRng::seed_from_u64(43), &config, 20);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_collapsed_range_pins_value() {
        let config = FireFieldConfig {
            speed: 1.0..1.0,
            ..Default::default()
        };
        let particles = spawn_fire(&mut StdRng::seed_from_u64(1), &config, 10);
        assert!(particles.iter().all(|p| p.speed == 1.0));
    }
}
