//! Absolution FX Core Library
//!
//! Procedural fire, smoke and ember animation for the confessional's
//! "absolve" effect, plus the chat collaborators around it.
//!
//! ## Animation model
//!
//! Every particle is seeded once and then animated by a pure function of
//! elapsed time: a frame can be recomputed for any `t` without history, so
//! ticking twice at the same time gives the same buffers and frames can be
//! baked in parallel.
//!
//! - [`core_types`]: colors, ramps and math aliases
//! - [`geometry`]: the procedural flame mesh, spheres and textures
//! - [`particles`]: particle seeds, motion laws and instance buffers
//! - [`scene`]: the composed burn scene, viewport adaptation and lifecycle
//! - [`chat`]: message store, completion provider and identity seams

// Core types and utilities
pub mod core_types;

// Animation
pub mod geometry;
pub mod particles;
pub mod scene;

// Chat collaborators
pub mod chat;

// Re-export core types
pub use core_types::{lerp_hex, ColorError, ColorRamp, Mat4, Rgb, Vec3, FIRE_COLORS};

// Re-export animation types
pub use geometry::{shared_flame_mesh, FlameShape, Mesh};
pub use particles::{InstanceBuffer, InstanceRaw, MotionLaw, Particle, ParticleField, ParticleKind};
pub use scene::{
    ConfigError, DensityTier, DisplaySurface, FireEffectScene, FireOverlay, SceneConfig, SceneFrame,
    ViewportProfile,
};
