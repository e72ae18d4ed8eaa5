//! Indexed triangle mesh shared by particle instances

use crate::core_types::Vec3;
use serde::{Deserialize, Serialize};

/// Indexed triangle mesh.
///
/// Meshes are built once and handed out as `Arc<Mesh>`; particle fields only
/// ever hold references, never copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions in model space
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, same length as `positions`
    pub normals: Vec<Vec3>,
    /// Per-vertex texture coordinates (empty when the mesh is untextured)
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list, three indices per face
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh from positions and indices, deriving normals from the faces.
    #[must_use]
    pub fn from_triangles(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut mesh = Self {
            normals: vec![Vec3::zeros(); positions.len()],
            positions,
            uvs: Vec::new(),
            indices,
        };
        mesh.compute_vertex_normals();
        mesh
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate faces as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Recompute per-vertex normals from the triangle list.
    ///
    /// Face normals are accumulated unnormalized, so larger faces weigh more,
    /// then each vertex sum is normalized. Vertices touched by no face (or
    /// whose contributions cancel) keep a zero normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::zeros(); self.positions.len()];

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let pa = self.positions[a];
            let pb = self.positions[b];
            let pc = self.positions[c];

            let face = (pc - pb).cross(&(pa - pb));
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for n in &mut normals {
            if let Some(unit) = n.try_normalize(f32::EPSILON) {
                *n = unit;
            } else {
                *n = Vec3::zeros();
            }
        }

        self.normals = normals;
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_triangle_normal() {
        let mesh = Mesh::from_triangles(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );

        for n in &mesh.normals {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let mesh = Mesh::from_triangles(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(5.0, 5.0, 5.0),
            ],
            vec![0, 1, 2],
        );
        assert_eq!(mesh.normals[3], Vec3::zeros());
    }

    #[test]
    fn test_bounds() {
        let mesh = Mesh::from_triangles(
            vec![
                Vec3::new(-1.0, 0.0, 2.0),
                Vec3::new(1.0, 3.0, 0.0),
                Vec3::new(0.0, -2.0, 1.0),
            ],
            vec![0, 1, 2],
        );
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(hi, Vec3::new(1.0, 3.0, 2.0));
        assert!(Mesh::default().bounds().is_none());
    }
}
