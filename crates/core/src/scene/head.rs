//! Floating head model with a placeholder fallback
//!
//! Loading the head can fail (missing asset, corrupt file). Instead of
//! letting the failure reach the caller, [`render_head`] degrades to a
//! checkerboard sphere and logs why.

use crate::geometry::{checkerboard_texture, uv_sphere, Mesh, Texture};
use std::fmt;
use tracing::warn;

/// Asset path of the head model.
pub const MODEL_PATH: &str = "/pope_francis.glb";
/// Uniform scale applied to the loaded model.
pub const MODEL_SCALE: f32 = 2.5;
/// Angular frequency (rad/s) of the idle head sway.
pub const SWAY_SPEED: f32 = 0.5;
/// Peak idle sway (radians).
pub const SWAY_AMPLITUDE: f32 = 0.5;

/// Why the head model could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLoadError {
    /// No asset at the path
    NotFound(String),
    /// The asset exists but is not a usable mesh
    Invalid { path: String, reason: String },
}

impl fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelLoadError::NotFound(path) => write!(f, "model not found: {path}"),
            ModelLoadError::Invalid { path, reason } => {
                write!(f, "invalid model {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for ModelLoadError {}

/// Source of head meshes.
pub trait ModelLoader {
    fn load(&self, path: &str) -> Result<Mesh, ModelLoadError>;
}

/// What to draw for the head.
#[derive(Debug, Clone, PartialEq)]
pub enum HeadRender {
    /// The loaded model, drawn at [`MODEL_SCALE`]
    Model(Mesh),
    /// Textured sphere shown when loading failed
    Placeholder { mesh: Mesh, texture: Texture },
}

impl HeadRender {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, HeadRender::Placeholder { .. })
    }

    pub fn mesh(&self) -> &Mesh {
        match self {
            HeadRender::Model(mesh) | HeadRender::Placeholder { mesh, .. } => mesh,
        }
    }
}

/// The placeholder head: unit sphere with an 8×8 checkerboard.
#[must_use]
pub fn placeholder_head() -> HeadRender {
    HeadRender::Placeholder {
        mesh: uv_sphere(1.0, 32, 32),
        texture: checkerboard_texture(256, 8),
    }
}

/// Load the head from [`MODEL_PATH`], falling back to the placeholder.
pub fn render_head<L: ModelLoader + ?Sized>(loader: &L) -> HeadRender {
    match loader.load(MODEL_PATH) {
        Ok(mesh) if mesh.triangle_count() > 0 => HeadRender::Model(mesh),
        Ok(_) => {
            warn!("Head model {} has no triangles, using placeholder", MODEL_PATH);
            placeholder_head()
        }
        Err(e) => {
            warn!("Failed to load head model, using placeholder: {}", e);
            placeholder_head()
        }
    }
}

/// Idle yaw of the head at elapsed time `t`.
#[must_use]
pub fn head_yaw(t: f32) -> f32 {
    (t * SWAY_SPEED).sin() * SWAY_AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::sphere::{CHECKER_DARK, CHECKER_LIGHT};

    struct FixedLoader(Result<Mesh, ModelLoadError>);

    impl ModelLoader for FixedLoader {
        fn load(&self, _path: &str) -> Result<Mesh, ModelLoadError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_loaded_model_is_used() {
        let mesh = uv_sphere(0.5, 6, 4);
        let render = render_head(&FixedLoader(Ok(mesh.clone())));
        assert_eq!(render, HeadRender::Model(mesh));
    }

    #[test]
    fn test_load_failure_falls_back() {
        let render = render_head(&FixedLoader(Err(ModelLoadError::NotFound(
            MODEL_PATH.to_string(),
        ))));
        assert!(render.is_placeholder());

        let HeadRender::Placeholder { mesh, texture } = render else {
            unreachable!();
        };
        assert_eq!(mesh.vertex_count(), 33 * 33);
        assert_eq!((texture.width, texture.height), (256, 256));
        assert_eq!(texture.pixel(0, 0), Some(CHECKER_LIGHT));
        assert_eq!(texture.pixel(32, 0), Some(CHECKER_DARK));
    }

    #[test]
    fn test_empty_model_falls_back() {
        let render = render_head(&FixedLoader(Ok(Mesh::default())));
        assert!(render.is_placeholder());
    }

    #[test]
    fn test_head_yaw_is_bounded() {
        assert_eq!(head_yaw(0.0), 0.0);
        for step in 0..100 {
            assert!(head_yaw(step as f32 * 0.37).abs() <= SWAY_AMPLITUDE);
        }
    }
}
