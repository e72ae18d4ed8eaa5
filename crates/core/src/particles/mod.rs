//! Time-parametrized particle fields
//!
//! Particles are seeded once and never mutated. Each tick maps elapsed time
//! through a per-kind motion law into the field's instance buffer.

pub mod field;
pub mod motion;
pub mod particle;
pub mod spawn;

pub use field::{InstanceBuffer, InstanceRaw, ParticleField};
pub use motion::{InstanceSample, MotionLaw};
pub use particle::{FlameTraits, Particle, ParticleKind};
pub use spawn::{
    spawn_embers, spawn_fire, spawn_smoke, EmberFieldConfig, FireFieldConfig, SmokeFieldConfig,
};
