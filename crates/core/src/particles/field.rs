//! Particle fields and their instance buffers
//!
//! A [`ParticleField`] owns its particles, the mesh every instance is drawn
//! with, and one [`InstanceBuffer`] that is rewritten in full on every tick.
//! The buffer always holds exactly one entry per particle.

use super::motion::MotionLaw;
use super::particle::{Particle, ParticleKind};
use super::spawn::{
    spawn_embers, spawn_fire, spawn_smoke, EmberFieldConfig, FireFieldConfig, SmokeFieldConfig,
};
use crate::core_types::{ColorRamp, Mat4, Rgb};
use crate::geometry::{shared_flame_mesh, shared_particle_sphere, Mesh};
use bytemuck::{Pod, Zeroable};
use rand::Rng;
use std::sync::Arc;

/// GPU-ready instance record (must match the instanced vertex layout)
///
/// `model` is column-major; `color` is linear RGB in `[0, 1]` with the
/// instance opacity in the fourth lane.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Per-instance output of one field at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceBuffer {
    pub transforms: Vec<Mat4>,
    pub colors: Vec<Rgb>,
    /// Clamped to `[0, 1]`
    pub opacities: Vec<f32>,
    /// Mean of `opacities`, applied to the whole field's material
    pub opacity: f32,
    /// Elapsed time the buffer was computed for
    pub time: f32,
}

impl InstanceBuffer {
    fn with_len(len: usize) -> Self {
        Self {
            transforms: vec![Mat4::identity(); len],
            colors: vec![Rgb::WHITE; len],
            opacities: vec![0.0; len],
            opacity: 0.0,
            time: 0.0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Pack into upload records, reusing `out`'s allocation.
    pub fn write_raw(&self, out: &mut Vec<InstanceRaw>) {
        out.clear();
        out.extend(
            self.transforms
                .iter()
                .zip(&self.colors)
                .zip(&self.opacities)
                .map(|((transform, color), &opacity)| {
                    let [r, g, b] = color.to_unit();
                    InstanceRaw {
                        model: (*transform).into(),
                        color: [r, g, b, opacity],
                    }
                }),
        );
    }

    #[must_use]
    pub fn to_raw(&self) -> Vec<InstanceRaw> {
        let mut out = Vec::with_capacity(self.len());
        self.write_raw(&mut out);
        out
    }
}

/// A set of particles sharing one motion law and one mesh.
#[derive(Debug, Clone)]
pub struct ParticleField {
    law: MotionLaw,
    particles: Vec<Particle>,
    mesh: Arc<Mesh>,
    buffer: InstanceBuffer,
}

impl ParticleField {
    /// Build a field and evaluate it at `t = 0`.
    pub fn new(law: MotionLaw, particles: Vec<Particle>, mesh: Arc<Mesh>) -> Self {
        let mut field = Self {
            buffer: InstanceBuffer::with_len(particles.len()),
            law,
            particles,
            mesh,
        };
        field.tick(0.0);
        field
    }

    /// `count` flames on the shared flame mesh.
    pub fn fire<R: Rng + ?Sized>(
        rng: &mut R,
        config: &FireFieldConfig,
        count: usize,
        ramp: &ColorRamp,
    ) -> Self {
        Self::new(
            MotionLaw::Fire { ramp: ramp.clone() },
            spawn_fire(rng, config, count),
            shared_flame_mesh(),
        )
    }

    /// `count` smoke puffs on the shared particle sphere.
    pub fn smoke<R: Rng + ?Sized>(rng: &mut R, config: &SmokeFieldConfig, count: usize) -> Self {
        Self::new(
            MotionLaw::Smoke {
                base: config.base_color,
                tip: config.tip_color,
            },
            spawn_smoke(rng, config, count),
            shared_particle_sphere(),
        )
    }

    /// Base embers on the shared particle sphere.
    pub fn embers<R: Rng + ?Sized>(rng: &mut R, config: &EmberFieldConfig, ramp: &ColorRamp) -> Self {
        Self::new(
            MotionLaw::Ember {
                opacity: config.opacity,
            },
            spawn_embers(rng, config, ramp),
            shared_particle_sphere(),
        )
    }

    /// Recompute every instance for elapsed time `t`, in place.
    pub fn tick(&mut self, t: f32) {
        Self::evaluate_into(&self.law, &self.particles, t, &mut self.buffer);
    }

    /// Evaluate at `t` into a fresh buffer, leaving the live one untouched.
    #[must_use]
    pub fn snapshot(&self, t: f32) -> InstanceBuffer {
        let mut buffer = InstanceBuffer::with_len(self.particles.len());
        Self::evaluate_into(&self.law, &self.particles, t, &mut buffer);
        buffer
    }

    fn evaluate_into(law: &MotionLaw, particles: &[Particle], t: f32, buffer: &mut InstanceBuffer) {
        debug_assert_eq!(buffer.len(), particles.len());

        let mut total = 0.0;
        for (i, particle) in particles.iter().enumerate() {
            let sample = law.evaluate(i, particle, t);
            let opacity = sample.opacity.clamp(0.0, 1.0);
            buffer.transforms[i] = sample.transform;
            buffer.colors[i] = sample.color;
            buffer.opacities[i] = opacity;
            total += opacity;
        }

        buffer.opacity = if particles.is_empty() {
            0.0
        } else {
            total / particles.len() as f32
        };
        buffer.time = t;
    }

    pub fn kind(&self) -> ParticleKind {
        self.law.kind()
    }

    pub fn law(&self) -> &MotionLaw {
        &self.law
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn buffer(&self) -> &InstanceBuffer {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
