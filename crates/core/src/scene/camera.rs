//! Orthographic camera in pixel-zoom units
//!
//! The frustum spans the surface size in pixels divided by `zoom`, so one
//! world unit covers `zoom` pixels regardless of the surface size.

use crate::core_types::{Mat4, Vec3};
use nalgebra::{Orthographic3, Point3};
use serde::{Deserialize, Serialize};

const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthographicCamera {
    pub position: Vec3,
    pub zoom: f32,
    pub width: u32,
    pub height: u32,
}

impl OrthographicCamera {
    /// Camera at `(0, 0, distance)` looking at the origin.
    #[must_use]
    pub fn new(distance: f32, zoom: f32, width: u32, height: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, distance),
            zoom,
            width,
            height,
        }
    }

    /// Visible world-space `(width, height)`.
    #[must_use]
    pub fn visible_extent(&self) -> (f32, f32) {
        let zoom = self.zoom.max(f32::EPSILON);
        (self.width.max(1) as f32 / zoom, self.height.max(1) as f32 / zoom)
    }

    #[must_use]
    pub fn projection(&self) -> Mat4 {
        let (w, h) = self.visible_extent();
        Orthographic3::new(-w / 2.0, w / 2.0, -h / 2.0, h / 2.0, NEAR, FAR).to_homogeneous()
    }

    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::origin(),
            &Vec3::y(),
        )
    }

    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn test_visible_extent_scales_with_zoom() {
        let camera = OrthographicCamera::new(10.0, 120.0, 1200, 600);
        assert_eq!(camera.visible_extent(), (10.0, 5.0));
    }

    #[test]
    fn test_origin_projects_to_center() {
        let camera = OrthographicCamera::new(10.0, 100.0, 800, 600);
        let clip = camera.view_projection() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_frustum_edge_maps_to_ndc_edge() {
        let camera = OrthographicCamera::new(10.0, 100.0, 800, 600);
        // Right edge sits 4 world units from center
        let clip = camera.view_projection() * Vector4::new(4.0, 3.0, 0.0, 1.0);
        assert_relative_eq!(clip.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y, 1.0, epsilon = 1e-5);
    }
}
