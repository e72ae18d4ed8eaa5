//! UV sphere and checkerboard texture
//!
//! Low-poly spheres back the smoke puffs and base embers; a finer textured
//! sphere is the stand-in head when the real model cannot be loaded.

use super::mesh::Mesh;
use crate::core_types::{Rgb, Vec3};
use std::f32::consts::{PI, TAU};
use std::sync::{Arc, OnceLock};

/// Build a UV sphere centered on the origin.
///
/// Vertices form a `(width_segments + 1) × (height_segments + 1)` grid over
/// longitude and latitude; the pole rows emit a single triangle per quad so
/// no degenerate faces are produced.
#[must_use]
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let row_len = width_segments as usize + 1;
    let capacity = row_len * (height_segments as usize + 1);
    let mut positions = Vec::with_capacity(capacity);
    let mut normals = Vec::with_capacity(capacity);
    let mut uvs = Vec::with_capacity(capacity);

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;

        // Pole rows shift u by half a segment so texture seams stay centered
        let u_offset = if iy == 0 {
            0.5 / width_segments as f32
        } else if iy == height_segments {
            -0.5 / width_segments as f32
        } else {
            0.0
        };

        let (sin_theta, cos_theta) = (v * PI).sin_cos();

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let (sin_phi, cos_phi) = (u * TAU).sin_cos();

            let p = Vec3::new(
                -radius * cos_phi * sin_theta,
                radius * cos_theta,
                radius * sin_phi * sin_theta,
            );
            positions.push(p);
            normals.push(p.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::y));
            uvs.push([u + u_offset, 1.0 - v]);
        }
    }

    let grid = |ix: u32, iy: u32| iy * (width_segments + 1) + ix;
    let mut indices = Vec::with_capacity(width_segments as usize * height_segments as usize * 6);

    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = grid(ix + 1, iy);
            let b = grid(ix, iy);
            let c = grid(ix, iy + 1);
            let d = grid(ix + 1, iy + 1);

            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Mesh {
        positions,
        normals,
        uvs,
        indices,
    }
}

static PARTICLE_SPHERE: OnceLock<Arc<Mesh>> = OnceLock::new();

/// Unit 8×8 sphere shared by smoke and ember fields.
pub fn shared_particle_sphere() -> Arc<Mesh> {
    Arc::clone(PARTICLE_SPHERE.get_or_init(|| Arc::new(uv_sphere(1.0, 8, 8))))
}

/// Light checker square color.
pub const CHECKER_LIGHT: Rgb = Rgb::from_u32(0xf3e9c7);
/// Dark checker square color.
pub const CHECKER_DARK: Rgb = Rgb::from_u32(0x3b3b3b);

/// RGBA8 texture, row-major from the top-left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Color of pixel `(x, y)`, ignoring alpha.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }
}

/// Square checkerboard of `squares × squares` cells, starting light in the corner.
#[must_use]
pub fn checkerboard_texture(size: u32, squares: u32) -> Texture {
    let size = size.max(1);
    let square_size = (size / squares.max(1)).max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let color = if (x / square_size + y / square_size) % 2 == 0 {
                CHECKER_LIGHT
            } else {
                CHECKER_DARK
            };
            pixels.extend_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }

    Texture {
        width: size,
        height: size,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_counts() {
        let mesh = uv_sphere(1.0, 8, 8);
        assert_eq!(mesh.vertex_count(), 81);
        // Pole rows contribute one triangle per quad
        assert_eq!(mesh.triangle_count(), 2 * 8 * 7);
        assert_eq!(mesh.uvs.len(), 81);
    }

    #[test]
    fn test_sphere_points_on_radius() {
        let mesh = uv_sphere(2.5, 16, 12);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert_relative_eq!(p.norm(), 2.5, epsilon = 1e-5);
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_checkerboard_layout() {
        let tex = checkerboard_texture(256, 8);
        assert_eq!(tex.pixels.len(), 256 * 256 * 4);
        assert_eq!(tex.pixel(0, 0), Some(CHECKER_LIGHT));
        assert_eq!(tex.pixel(31, 31), Some(CHECKER_LIGHT));
        assert_eq!(tex.pixel(32, 0), Some(CHECKER_DARK));
        assert_eq!(tex.pixel(32, 32), Some(CHECKER_LIGHT));
        assert_eq!(tex.pixel(256, 0), None);
    }

    #[test]
    fn test_shared_particle_sphere() {
        assert!(Arc::ptr_eq(
            &shared_particle_sphere(),
            &shared_particle_sphere()
        ));
    }
}
