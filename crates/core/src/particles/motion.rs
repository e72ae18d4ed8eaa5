//! Per-kind motion laws
//!
//! A motion law maps `(index, particle, t)` to the instance's transform,
//! color and opacity. Laws read nothing but their arguments, so evaluating
//! the same instance twice at the same `t` always gives the same sample.

use super::particle::{FlameTraits, Particle, ParticleKind};
use crate::core_types::{ColorRamp, Mat4, Rgb, Vec3};
use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};

/// Smoke switches to its tip color past this progress.
pub const SMOKE_TIP_THRESHOLD: f32 = 0.7;

/// Everything the renderer needs for one instance at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceSample {
    pub transform: Mat4,
    pub color: Rgb,
    /// Unclamped; buffers clamp when they store it
    pub opacity: f32,
}

/// The motion law a field animates with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MotionLaw {
    /// Rising twisting flames colored along `ramp`
    Fire { ramp: ColorRamp },
    /// Expanding puffs fading from `base` to `tip`
    Smoke { base: Rgb, tip: Rgb },
    /// Static jittering glints at a fixed opacity
    Ember { opacity: f32 },
}

impl MotionLaw {
    pub fn kind(&self) -> ParticleKind {
        match self {
            MotionLaw::Fire { .. } => ParticleKind::Fire,
            MotionLaw::Smoke { .. } => ParticleKind::Smoke,
            MotionLaw::Ember { .. } => ParticleKind::Ember,
        }
    }

    /// Evaluate instance `index` at elapsed time `t` (seconds).
    pub fn evaluate(&self, index: usize, particle: &Particle, t: f32) -> InstanceSample {
        match self {
            MotionLaw::Fire { ramp } => fire(index, particle, t, ramp),
            MotionLaw::Smoke { base, tip } => smoke(particle, t, *base, *tip),
            MotionLaw::Ember { opacity } => ember(index, particle, t, *opacity),
        }
    }
}

fn fire(index: usize, particle: &Particle, t: f32, ramp: &ColorRamp) -> InstanceSample {
    let i = index as f32;
    let p = particle.progress(t);
    let flame = particle.flame.unwrap_or_default();
    let FlameTraits {
        rotation_speed,
        color_bias,
        twist_factor,
        flicker_frequency: ff,
    } = flame;
    let seed = particle.seed;
    let wave = particle.wave_phase;
    let phase = particle.flicker_phase;
    let o = particle.origin;

    let y = o.y
        + p * 2.7
        + (t * 1.5 + wave + i * 0.1).sin() * 0.3
        + (t * ff + seed * 10.0).sin() * 0.1;

    let sway = (t * 4.0 + wave + i * 0.2).sin() * 0.2 * (1.0 - p * 0.7);
    let jitter = (t * 10.0 + seed * 10.0).sin() * 0.1 * (1.0 - p * 0.6);
    let spiral = twist_factor * p * (p * 8.0 + t * 2.0).sin();
    let x = o.x + sway + jitter + spiral;

    let z = o.z + (t * 3.0 + seed * 15.0).sin() * 0.05 * p;

    let pulse = 0.75 + (t * ff * 0.5 + phase).sin().abs() * 0.45;
    let size = particle.base_size * (1.2 - p * 0.9) * pulse;

    let scale = Vec3::new(
        size * (0.9 + (t * 2.0 + seed).sin() * 0.3 - p * 0.3),
        size * (1.9 + (t + phase).sin() * 0.2),
        size * (0.7 - p * 0.2),
    );

    let yaw = Rotation3::from_axis_angle(&Vec3::y_axis(), rotation_speed * t * 0.5 + phase);
    let roll = Rotation3::from_axis_angle(&Vec3::z_axis(), rotation_speed * t + phase + p * 0.5);

    let transform = Mat4::new_translation(&Vec3::new(x, y, z))
        * (yaw * roll).to_homogeneous()
        * Mat4::new_nonuniform_scaling(&scale);

    let color = ramp.sample(p * (1.0 - color_bias));
    let opacity = 0.8 * (1.0 - p * 0.65) + (t * ff * 0.7 + seed * 20.0).sin() * 0.2;

    InstanceSample {
        transform,
        color,
        opacity,
    }
}

fn smoke(particle: &Particle, t: f32, base: Rgb, tip: Rgb) -> InstanceSample {
    let p = particle.progress(t);
    let o = particle.origin;

    let position = Vec3::new(
        o.x + (t * 0.8 + particle.wave_phase).sin() * 0.3 * p,
        o.y + p * 1.2,
        o.z,
    );
    let size = particle.base_size * (0.8 + p * 0.7);

    let color = if p > SMOKE_TIP_THRESHOLD {
        tip
    } else {
        base.lerp(tip, p)
    };

    InstanceSample {
        transform: Mat4::new_translation(&position) * Mat4::new_scaling(size),
        color,
        opacity: 0.3 * (1.0 - p * 0.8),
    }
}

fn ember(index: usize, particle: &Particle, t: f32, opacity: f32) -> InstanceSample {
    let i = index as f32;
    let o = particle.origin;
    let flicker = 0.85 + (t * 8.0 + particle.flicker_phase).sin() * 0.3;

    let position = Vec3::new(
        o.x + (t * 5.0 + i * 2.0).sin() * 0.03,
        o.y + (t * 3.0 + i).sin() * 0.05,
        o.z,
    );

    InstanceSample {
        transform: Mat4::new_translation(&position) * Mat4::new_scaling(particle.base_size * flicker),
        color: particle.tint.unwrap_or(Rgb::WHITE),
        opacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::FIRE_COLORS;
    use approx::assert_relative_eq;

    fn translation(m: &Mat4) -> Vec3 {
        Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
    }

    /// Length of the transformed basis vector for `axis`
    fn axis_scale(m: &Mat4, axis: usize) -> f32 {
        Vec3::new(m[(0, axis)], m[(1, axis)], m[(2, axis)]).norm()
    }

    fn fire_particle() -> Particle {
        Particle::new(Vec3::new(0.3, -1.3, 0.1))
            .with_speed(1.0)
            .with_base_size(0.2)
            .with_phases(0.0, 0.0)
            .with_lifetime(1.0)
            .with_seed(0.0)
            .with_flame(FlameTraits {
                rotation_speed: 0.0,
                color_bias: 0.0,
                twist_factor: 0.0,
                flicker_frequency: 10.0,
            })
    }

    #[test]
    fn test_fire_at_time_zero() {
        let law = MotionLaw::Fire {
            ramp: ColorRamp::fire(),
        };
        let sample = law.evaluate(0, &fire_particle(), 0.0);

        // p = 0 and every sine term vanishes
        let pos = translation(&sample.transform);
        assert_relative_eq!(pos.x, 0.3, epsilon = 1e-6);
        assert_relative_eq!(pos.y, -1.3, epsilon = 1e-6);
        assert_relative_eq!(pos.z, 0.1, epsilon = 1e-6);

        // size = 0.2 · 1.2 · 0.75
        let size = 0.18;
        assert_relative_eq!(axis_scale(&sample.transform, 0), size * 0.9, epsilon = 1e-5);
        assert_relative_eq!(axis_scale(&sample.transform, 1), size * 1.9, epsilon = 1e-5);
        assert_relative_eq!(axis_scale(&sample.transform, 2), size * 0.7, epsilon = 1e-5);

        assert_eq!(sample.color, FIRE_COLORS[0]);
        assert_relative_eq!(sample.opacity, 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_fire_shrinks_and_fades_with_progress() {
        let law = MotionLaw::Fire {
            ramp: ColorRamp::fire(),
        };
        let particle = fire_particle().with_speed(0.0);

        let young = law.evaluate(0, &particle.with_phases(0.05, 0.0), 0.0);
        let old = law.evaluate(0, &particle.with_phases(0.9, 0.0), 0.0);

        assert!(axis_scale(&old.transform, 2) < axis_scale(&young.transform, 2));
        assert!(translation(&old.transform).y > translation(&young.transform).y);
        assert!(old.opacity < young.opacity);
    }

    #[test]
    fn test_fire_color_bias_delays_ramp() {
        let ramp = ColorRamp::fire();
        let law = MotionLaw::Fire { ramp: ramp.clone() };
        let mut biased = fire_particle().with_speed(0.0).with_phases(0.5, 0.0);
        biased.flame = biased.flame.map(|f| FlameTraits {
            color_bias: 0.3,
            ..f
        });

        let sample = law.evaluate(0, &biased, 0.0);
        assert_eq!(sample.color, ramp.sample(0.5 * 0.7));
    }

    #[test]
    fn test_fire_without_traits_uses_defaults() {
        let law = MotionLaw::Fire {
            ramp: ColorRamp::fire(),
        };
        let mut bare = fire_particle();
        bare.flame = None;
        assert_eq!(law.evaluate(2, &bare, 0.7), law.evaluate(2, &fire_particle(), 0.7));
    }

    #[test]
    fn test_smoke_grows_and_darkens() {
        let law = MotionLaw::Smoke {
            base: FIRE_COLORS[7],
            tip: FIRE_COLORS[8],
        };
        let particle = Particle::new(Vec3::new(0.0, 1.0, 0.0))
            .with_speed(1.0)
            .with_base_size(0.2)
            .with_lifetime(2.0);

        let start = law.evaluate(0, &particle, 0.0);
        assert_relative_eq!(axis_scale(&start.transform, 0), 0.16, epsilon = 1e-6);
        assert_relative_eq!(start.opacity, 0.3, epsilon = 1e-6);
        assert_eq!(start.color, FIRE_COLORS[7]);

        // t = 1.5 → p = 0.75, past the tip threshold
        let late = law.evaluate(0, &particle, 1.5);
        assert_relative_eq!(axis_scale(&late.transform, 0), 0.2 * (0.8 + 0.75 * 0.7), epsilon = 1e-5);
        assert_relative_eq!(translation(&late.transform).y, 1.0 + 0.9, epsilon = 1e-5);
        assert_relative_eq!(late.opacity, 0.3 * (1.0 - 0.6), epsilon = 1e-6);
        assert_eq!(late.color, FIRE_COLORS[8]);

        // Uniform scale on all axes
        assert_relative_eq!(
            axis_scale(&late.transform, 0),
            axis_scale(&late.transform, 2),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_smoke_blends_below_threshold() {
        let base = FIRE_COLORS[7];
        let tip = FIRE_COLORS[8];
        let law = MotionLaw::Smoke { base, tip };
        let particle = Particle::new(Vec3::zeros()).with_speed(1.0).with_lifetime(1.0);
        assert_eq!(law.evaluate(0, &particle, 0.5).color, base.lerp(tip, 0.5));
    }

    #[test]
    fn test_embers_stay_within_jitter() {
        let law = MotionLaw::Ember { opacity: 0.9 };
        let origin = Vec3::new(0.5, -1.1, 0.05);
        let particle = Particle::new(origin)
            .with_base_size(0.2)
            .with_phases(1.0, 0.0)
            .with_tint(FIRE_COLORS[1]);

        for step in 0..400 {
            let t = step as f32 * 0.05;
            let sample = law.evaluate(5, &particle, t);
            let offset = translation(&sample.transform) - origin;
            assert!(offset.x.abs() <= 0.03 + 1e-6);
            assert!(offset.y.abs() <= 0.05 + 1e-6);
            assert_eq!(offset.z, 0.0);

            let scale = axis_scale(&sample.transform, 1);
            assert!(scale >= 0.2 * 0.55 - 1e-6 && scale <= 0.2 * 1.15 + 1e-6);
            assert_eq!(sample.color, FIRE_COLORS[1]);
            assert_eq!(sample.opacity, 0.9);
        }
    }

    #[test]
    fn test_evaluation_is_pure() {
        let law = MotionLaw::Fire {
            ramp: ColorRamp::fire(),
        };
        let particle = fire_particle().with_phases(1.2, 3.4).with_seed(0.42);
        for t in [0.0_f32, 0.016, 1.7, 123.4] {
            assert_eq!(law.evaluate(9, &particle, t), law.evaluate(9, &particle, t));
        }
    }
}
