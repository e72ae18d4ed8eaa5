use absolution_fx_core::{FireEffectScene, InstanceRaw, ParticleKind, SceneConfig};
use std::ptr;
use std::sync::{Mutex, RwLock};

use crate::error::{DefaultFxError, FxErrorCode};
use crate::helpers::{track_error, track_result};

/// Options for creating a scene.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FxSceneOptions {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Seed for particle placement; only used when `use_seed` is true.
    pub seed: u64,
    /// Pin the seed for reproducible particles. Otherwise each scene is random.
    pub use_seed: bool,
    /// Band margin in pixels around the breakpoints (0 = switch exactly at them).
    pub hysteresis_px: u32,
}

/// A mounted burn scene owned by the host.
///
/// # Thread Safety
/// The scene is behind an `RwLock`: queries take `.read()`, ticks and
/// resizes take `.write()`. Instance snapshots are cached per particle kind
/// behind a `Mutex` so the host can upload them without per-frame
/// allocations.
///
/// ## Usage (C++)
/// ```cpp
/// FxSceneOptions options = { 1280, 720, 0, false, 0 };
/// FxSceneInstance* scene = nullptr;
/// if (fx_scene_new(options, &scene) != Ok) {
///     return;
/// }
///
/// void Tick(float elapsed) {
///     fx_scene_tick(scene, elapsed);
///     uintptr_t len = 0;
///     const InstanceRaw* fire = nullptr;
///     fx_scene_get_instances(scene, 0, &len, &fire);
///     UploadInstances(fire, len);
/// }
///
/// fx_scene_destroy(scene);
/// ```
pub struct FxSceneInstance {
    pub(crate) scene: RwLock<FireEffectScene>,
    /// Reused instance snapshots, indexed by `ParticleKind::as_u8`.
    pub(crate) raw_cache: Mutex<[Vec<InstanceRaw>; 3]>,
}

impl FxSceneInstance {
    /// Mount a scene with the default configuration for the given surface.
    ///
    /// # Errors
    ///
    /// Returns `FxErrorCode::InvalidViewport` for a zero-sized surface.
    pub(crate) fn new(options: &FxSceneOptions) -> Result<Box<Self>, DefaultFxError> {
        let config = SceneConfig {
            seed: options.use_seed.then_some(options.seed),
            hysteresis_px: options.hysteresis_px,
            ..SceneConfig::default()
        };
        let scene = FireEffectScene::mount(config, options.width, options.height)?;

        let raw_cache = ParticleKind::ALL.map(|kind| Vec::with_capacity(scene.field(kind).len()));

        Ok(Box::new(Self {
            scene: RwLock::new(scene),
            raw_cache: Mutex::new(raw_cache),
        }))
    }
}

/// Create a scene and return it via out-parameter.
///
/// Returns
/// - `FxErrorCode::Ok` (0) with a valid instance in `out_instance`
/// - `FxErrorCode::NullPointer` if `out_instance` is null
/// - `FxErrorCode::InvalidViewport` if width or height is zero (`out_instance` set to null)
///
/// Call `fx_get_last_error()` for a human-readable description.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `fx_scene_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn fx_scene_new(
    options: FxSceneOptions,
    out_instance: *mut *mut FxSceneInstance,
) -> FxErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFxError::null_pointer("out_instance"));
    }

    match track_result(FxSceneInstance::new(&options)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            FxErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy a scene created by `fx_scene_new`. Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `fx_scene_new` and not freed already.
/// - The caller must not use the pointer afterwards.
#[no_mangle]
pub unsafe extern "C" fn fx_scene_destroy(ptr: *mut FxSceneInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: created by `Box::into_raw` in `fx_scene_new` and not yet freed
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
