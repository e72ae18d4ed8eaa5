//! Procedural flame silhouette
//!
//! A tall, slightly off-center tip over rings of vertices at decreasing
//! heights. Ring radii are perturbed by sinusoids of the angular position so
//! the outline never reads as a perfect circle. The shape is fully
//! deterministic: every call with the same [`FlameShape`] yields the same mesh,
//! and only the per-instance transform varies between flames.

use super::mesh::Mesh;
use crate::core_types::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::sync::{Arc, OnceLock};

/// Parameters of the flame surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlameShape {
    /// Angular steps around the flame (the walk visits `segments + 1` angles)
    pub segments: u32,
    /// Tip height above the base plane
    pub height: f32,
    /// Sideways tip offset along x, for asymmetry
    pub tip_offset: f32,
    /// Unperturbed base radius
    pub base_radius: f32,
}

impl Default for FlameShape {
    fn default() -> Self {
        Self {
            segments: 12,
            height: 1.8,
            tip_offset: 0.05,
            base_radius: 0.5,
        }
    }
}

impl FlameShape {
    /// Generate the triangulated surface.
    ///
    /// Walking the angle `θ = i / segments · 2π` for `i = 0..=segments`:
    /// - every third step emits a mid-height ring vertex,
    /// - every second step emits a quarter-height vertex,
    /// - every step emits a base vertex.
    ///
    /// Faces are a fan from the tip (vertex 0) over all following vertices,
    /// closed back to vertex 1, plus strips stitching each odd vertex to its
    /// two successors.
    #[must_use]
    pub fn build(&self) -> Mesh {
        let segments = self.segments.max(1);
        let height = self.height;
        let mid_height = height * 0.6;
        let quarter_height = height * 0.3;

        let mut positions = vec![Vec3::new(self.tip_offset, height, 0.0)];

        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            let (sin, cos) = angle.sin_cos();
            let base_radius = self.base_radius * (1.0 - (angle * 3.0).sin() * 0.15);

            if i % 3 == 0 {
                let mid_radius = base_radius * 0.7 * (1.0 + (angle * 5.0).sin() * 0.2);
                positions.push(Vec3::new(
                    cos * mid_radius,
                    mid_height + (angle * 4.0).sin() * 0.1,
                    sin * mid_radius * 0.8,
                ));
            }

            if i % 2 == 0 {
                let quarter_radius = base_radius * 0.85;
                positions.push(Vec3::new(
                    cos * quarter_radius,
                    quarter_height + (angle * 2.0).sin() * 0.05,
                    sin * quarter_radius * 0.9,
                ));
            }

            positions.push(Vec3::new(
                cos * base_radius * (1.0 + (angle * 7.0).sin() * 0.05),
                0.0,
                sin * base_radius * 0.9,
            ));
        }

        let vertex_count = positions.len() as u32;
        let mut indices = Vec::with_capacity(vertex_count as usize * 6);

        for i in 1..vertex_count - 1 {
            indices.extend_from_slice(&[0, i, i + 1]);
        }
        indices.extend_from_slice(&[0, vertex_count - 1, 1]);

        for i in (1..vertex_count.saturating_sub(2)).filter(|i| i % 2 == 1) {
            indices.extend_from_slice(&[i, i + 1, i + 2]);
        }

        Mesh::from_triangles(positions, indices)
    }
}

static FLAME_MESH: OnceLock<Arc<Mesh>> = OnceLock::new();

/// The default flame, generated on first use and shared process-wide.
pub fn shared_flame_mesh() -> Arc<Mesh> {
    Arc::clone(FLAME_MESH.get_or_init(|| Arc::new(FlameShape::default().build())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_flame_counts() {
        let mesh = FlameShape::default().build();
        // tip + 5 mid + 7 quarter + 13 base
        assert_eq!(mesh.vertex_count(), 26);
        // 24 fan + 1 closing + 12 stitching
        assert_eq!(mesh.triangle_count(), 37);
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
    }

    #[test]
    fn test_flame_is_deterministic() {
        let a = FlameShape::default().build();
        let b = FlameShape::default().build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_flame_tip_and_base() {
        let mesh = FlameShape::default().build();
        assert_eq!(mesh.positions[0], Vec3::new(0.05, 1.8, 0.0));

        let (lo, hi) = mesh.bounds().unwrap();
        assert_relative_eq!(hi.y, 1.8);
        assert_relative_eq!(lo.y, 0.0);
        // Base is pinched well inside a unit radius
        assert!(hi.x < 0.7 && lo.x > -0.7);
    }

    #[test]
    fn test_flame_indices_in_range() {
        let mesh = FlameShape::default().build();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n));
        // Every vertex belongs to the tip fan
        for v in 1..n {
            assert!(mesh.triangles().any(|t| t[0] == 0 && (t[1] == v || t[2] == v)));
        }
    }

    #[test]
    fn test_flame_normals_are_unit_or_degenerate() {
        let mesh = FlameShape::default().build();
        let mut unit = 0;
        for n in &mesh.normals {
            assert!(n.iter().all(|c| c.is_finite()));
            let len = n.norm();
            assert!(len == 0.0 || (len - 1.0).abs() < 1e-4, "normal length {len}");
            if len > 0.0 {
                unit += 1;
            }
        }
        assert!(unit > mesh.vertex_count() / 2);
    }

    #[test]
    fn test_shared_mesh_is_one_allocation() {
        let a = shared_flame_mesh();
        let b = shared_flame_mesh();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, FlameShape::default().build());
    }
}
