//! The absolution burn scene
//!
//! Composes the camera, lights, and the fire, smoke and ember fields. One
//! [`tick`](FireEffectScene::tick) evaluates everything for a single elapsed
//! time, and since nothing carries state between ticks any set of frames can
//! also be [baked](FireEffectScene::bake) in parallel.

use super::camera::OrthographicCamera;
use super::config::{ConfigError, SceneConfig};
use super::light::{AmbientLight, FireLight, PointLightState};
use super::viewport::{ViewportAdapter, ViewportChange, ViewportProfile};
use crate::particles::{InstanceBuffer, ParticleField, ParticleKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{info, trace};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub time: f32,
    pub fire: InstanceBuffer,
    pub smoke: InstanceBuffer,
    pub embers: InstanceBuffer,
    pub light: PointLightState,
}

impl SceneFrame {
    #[must_use]
    pub fn buffer(&self, kind: ParticleKind) -> &InstanceBuffer {
        match kind {
            ParticleKind::Fire => &self.fire,
            ParticleKind::Smoke => &self.smoke,
            ParticleKind::Ember => &self.embers,
        }
    }
}

/// Mounted burn effect.
#[derive(Debug)]
pub struct FireEffectScene {
    config: SceneConfig,
    rng: StdRng,
    viewport: ViewportAdapter,
    camera: OrthographicCamera,
    ambient: AmbientLight,
    light: FireLight,
    light_state: PointLightState,
    fire: ParticleField,
    smoke: ParticleField,
    embers: ParticleField,
    time: f32,
}

fn check_viewport(width: u32, height: u32) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        Err(ConfigError::EmptyViewport { width, height })
    } else {
        Ok(())
    }
}

impl FireEffectScene {
    /// Validate `config` and seed every field for a `width × height` surface.
    ///
    /// Without a pinned [`SceneConfig::seed`] each mount draws fresh particles.
    pub fn mount(config: SceneConfig, width: u32, height: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        check_viewport(width, height)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let viewport = ViewportAdapter::new(width, height, config.hysteresis_px);
        let profile = viewport.profile();
        let counts = config.density.counts(profile.tier);

        let fire = ParticleField::fire(&mut rng, &config.fire, counts.fire, &config.ramp);
        let smoke = ParticleField::smoke(&mut rng, &config.smoke, counts.smoke);
        let embers = ParticleField::embers(&mut rng, &config.embers, &config.ramp);

        let light = FireLight::new(config.light.clone());

        info!(
            "Mounted fire scene: {}x{}, tier {:?}, zoom {}, {} flames, {} smoke, {} embers",
            width,
            height,
            profile.tier,
            profile.zoom,
            fire.len(),
            smoke.len(),
            embers.len()
        );

        Ok(Self {
            camera: OrthographicCamera::new(config.camera_z, profile.zoom, width, height),
            ambient: AmbientLight::white(config.ambient_intensity),
            light_state: light.at(0.0),
            light,
            rng,
            viewport,
            fire,
            smoke,
            embers,
            time: 0.0,
            config,
        })
    }

    /// Evaluate all fields and the point light at elapsed time `t` (seconds).
    pub fn tick(&mut self, t: f32) {
        self.fire.tick(t);
        self.smoke.tick(t);
        self.embers.tick(t);
        self.light_state = self.light.at(t);
        self.time = t;
        trace!("Scene tick t={:.3}s", t);
    }

    /// Adapt to a new surface size.
    ///
    /// A tier change reseeds the fire and smoke fields at the new density;
    /// a zoom change only moves the camera. Zero-area sizes are rejected and
    /// leave the scene untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<ViewportChange, ConfigError> {
        check_viewport(width, height)?;

        let change = self.viewport.update(width, height);
        self.camera.width = width;
        self.camera.height = height;
        self.camera.zoom = change.profile.zoom;

        if change.tier_changed {
            let counts = self.config.density.counts(change.profile.tier);
            self.fire = ParticleField::fire(&mut self.rng, &self.config.fire, counts.fire, &self.config.ramp);
            self.smoke = ParticleField::smoke(&mut self.rng, &self.config.smoke, counts.smoke);
            self.fire.tick(self.time);
            self.smoke.tick(self.time);

            info!(
                "Rebuilt fire scene for tier {:?}: {} flames, {} smoke",
                change.profile.tier, counts.fire, counts.smoke
            );
        }

        Ok(change)
    }

    /// Copy of the live buffers.
    #[must_use]
    pub fn frame(&self) -> SceneFrame {
        SceneFrame {
            time: self.time,
            fire: self.fire.buffer().clone(),
            smoke: self.smoke.buffer().clone(),
            embers: self.embers.buffer().clone(),
            light: self.light_state,
        }
    }

    /// Evaluate one frame per entry of `times` on the rayon pool.
    ///
    /// Frames land in fresh buffers; the live buffers are not touched.
    #[must_use]
    pub fn bake(&self, times: &[f32]) -> Vec<SceneFrame> {
        times
            .par_iter()
            .map(|&t| SceneFrame {
                time: t,
                fire: self.fire.snapshot(t),
                smoke: self.smoke.snapshot(t),
                embers: self.embers.snapshot(t),
                light: self.light.at(t),
            })
            .collect()
    }

    #[must_use]
    pub fn field(&self, kind: ParticleKind) -> &ParticleField {
        match kind {
            ParticleKind::Fire => &self.fire,
            ParticleKind::Smoke => &self.smoke,
            ParticleKind::Ember => &self.embers,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn profile(&self) -> ViewportProfile {
        self.viewport.profile()
    }

    pub fn camera(&self) -> &OrthographicCamera {
        &self.camera
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    pub fn light(&self) -> PointLightState {
        self.light_state
    }

    /// Elapsed time of the last tick
    pub fn time(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pinned(seed: u64) -> SceneConfig {
        SceneConfig {
            seed: Some(seed),
            ..SceneConfig::default()
        }
    }

    #[test]
    fn test_mount_counts_per_tier() {
        for (width, fire, smoke) in [(375, 80, 15), (600, 120, 25), (1280, 220, 50)] {
            let scene = FireEffectScene::mount(pinned(1), width, 800).unwrap();
            assert_eq!(scene.field(ParticleKind::Fire).len(), fire);
            assert_eq!(scene.field(ParticleKind::Smoke).len(), smoke);
            assert_eq!(scene.field(ParticleKind::Ember).len(), 12);
        }
    }

    #[test]
    fn test_mount_rejects_empty_viewport() {
        assert_eq!(
            FireEffectScene::mount(pinned(1), 0, 800).unwrap_err(),
            ConfigError::EmptyViewport { width: 0, height: 800 }
        );
    }

    #[test]
    fn test_pinned_seed_is_reproducible() {
        let mut a = FireEffectScene::mount(pinned(5), 1024, 768).unwrap();
        let mut b = FireEffectScene::mount(pinned(5), 1024, 768).unwrap();
        a.tick(1.5);
        b.tick(1.5);
        assert_eq!(a.frame(), b.frame());
    }

    #[test]
    fn test_unpinned_mounts_differ() {
        let a = FireEffectScene::mount(SceneConfig::default(), 1024, 768).unwrap();
        let b = FireEffectScene::mount(SceneConfig::default(), 1024, 768).unwrap();
        assert_ne!(
            a.field(ParticleKind::Fire).particles(),
            b.field(ParticleKind::Fire).particles()
        );
    }

    #[test]
    fn test_zoom_only_resize_keeps_particles() {
        let mut scene = FireEffectScene::mount(pinned(2), 1024, 768).unwrap();
        let before = scene.field(ParticleKind::Fire).particles().to_vec();

        // 1024 → 700 changes tier; 700 → 620 only changes zoom
        scene.resize(700, 768).unwrap();
        let after_tier = scene.field(ParticleKind::Fire).particles().to_vec();
        assert_ne!(before.len(), after_tier.len());

        let change = scene.resize(620, 768).unwrap();
        assert!(change.zoom_changed && !change.tier_changed);
        assert_eq!(scene.camera().zoom, 90.0);
        assert_eq!(scene.field(ParticleKind::Fire).particles(), after_tier.as_slice());
    }

    #[test]
    fn test_rebuild_keeps_time() {
        let mut scene = FireEffectScene::mount(pinned(3), 1024, 768).unwrap();
        scene.tick(2.0);
        scene.resize(400, 768).unwrap();
        assert_eq!(scene.frame().fire.time, 2.0);
        assert_eq!(scene.frame().fire.len(), 80);
    }

    #[test]
    fn test_bake_matches_ticks() {
        let mut scene = FireEffectScene::mount(pinned(9), 800, 600).unwrap();
        let times = [0.0, 0.25, 1.0, 3.75];
        let baked = scene.bake(&times);

        for (frame, &t) in baked.iter().zip(&times) {
            scene.tick(t);
            assert_eq!(frame, &scene.frame());
        }
    }
}
