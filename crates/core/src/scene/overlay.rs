//! Mount lifecycle of the burn overlay
//!
//! [`FireOverlay`] owns at most one [`FireEffectScene`]. Mounting builds a
//! fresh scene, unmounting drops it with all of its buffers, and frame
//! callbacks that arrive while nothing is mounted are ignored.

use super::config::{ConfigError, SceneConfig};
use super::fire_scene::FireEffectScene;
use super::viewport::ViewportChange;
use std::time::Instant;
use tracing::{debug, info};

/// Host surface the scene is drawn onto.
pub trait DisplaySurface {
    /// Current drawable size in pixels.
    fn size(&self) -> (u32, u32);

    /// Draw the scene's current state.
    fn present(&mut self, scene: &FireEffectScene);
}

/// Monotonic elapsed-time source for frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct SceneClock {
    start: Instant,
}

impl SceneClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since [`start`](Self::start)
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Owner of the mounted scene.
#[derive(Debug, Default)]
pub struct FireOverlay {
    config: SceneConfig,
    scene: Option<FireEffectScene>,
    clock: SceneClock,
}

impl FireOverlay {
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            scene: None,
            clock: SceneClock::start(),
        }
    }

    /// Build a fresh scene sized to `surface`, replacing any mounted one.
    pub fn mount<S: DisplaySurface + ?Sized>(&mut self, surface: &S) -> Result<(), ConfigError> {
        let (width, height) = surface.size();
        let scene = FireEffectScene::mount(self.config.clone(), width, height)?;
        self.scene = Some(scene);
        self.clock = SceneClock::start();
        Ok(())
    }

    /// Drop the scene. Later frame callbacks become no-ops.
    pub fn unmount(&mut self) {
        if self.scene.take().is_some() {
            info!("Unmounted fire scene");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.scene.is_some()
    }

    pub fn scene(&self) -> Option<&FireEffectScene> {
        self.scene.as_ref()
    }

    /// Seconds since the last mount
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Forward a surface resize to the mounted scene.
    pub fn on_resize(&mut self, width: u32, height: u32) -> Result<Option<ViewportChange>, ConfigError> {
        match self.scene.as_mut() {
            Some(scene) => scene.resize(width, height).map(Some),
            None => Ok(None),
        }
    }

    /// Tick the scene to `t` and present it.
    ///
    /// Returns `false` when nothing is mounted. A surface whose size changed
    /// since the last frame is treated as a resize first; a surface with no
    /// area skips presenting.
    pub fn on_frame<S: DisplaySurface + ?Sized>(&mut self, t: f32, surface: &mut S) -> bool {
        let Some(scene) = self.scene.as_mut() else {
            return false;
        };

        let (width, height) = surface.size();
        let camera = scene.camera();
        if (camera.width, camera.height) != (width, height) {
            if let Err(e) = scene.resize(width, height) {
                debug!("Skipping frame: {}", e);
                return true;
            }
        }

        scene.tick(t);
        surface.present(scene);
        true
    }

    /// [`on_frame`](Self::on_frame) at the seconds elapsed since mount.
    pub fn on_animation_frame<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let t = self.clock.elapsed();
        self.on_frame(t, surface)
    }
}
