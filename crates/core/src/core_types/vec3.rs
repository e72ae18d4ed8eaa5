//! Vector and matrix aliases for particle transforms.

use nalgebra::{Matrix4, Vector3};

/// 3D vector type for origins, offsets, and mesh positions.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the effect for particle offsets, light positions, and vertex data.
pub type Vec3 = Vector3<f32>;

/// Column-major 4x4 transform written into instance buffers.
pub type Mat4 = Matrix4<f32>;
