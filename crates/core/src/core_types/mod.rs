//! Core types and utilities

pub mod color;
pub mod vec3;

pub use color::{lerp_hex, ColorError, ColorRamp, Rgb, FIRE_COLORS};
pub use vec3::{Mat4, Vec3};
