use crate::error::{DefaultFxError, FxErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, with_scene_mut};
use crate::instance::FxSceneInstance;

/// Evaluate the scene at elapsed time `t` (seconds since mount).
///
/// Ticks are absolute: calling twice with the same `t` gives the same
/// buffers, and `t` may go backwards.
///
/// Returns
/// - `FxErrorCode::Ok` (0) on success
/// - `FxErrorCode::NullPointer` if `ptr` is null
/// - `FxErrorCode::InvalidParameter` if `t` is not finite
///
/// Thread-safe: acquires the scene write lock.
#[no_mangle]
pub extern "C" fn fx_scene_tick(ptr: *const FxSceneInstance, t: f32) -> FxErrorCode {
    handle_ffi_result_error(|| {
        if !t.is_finite() {
            return Err(DefaultFxError::invalid_parameter(format!(
                "tick time must be finite, got {t}"
            )));
        }
        let instance = instance_from_ptr(ptr)?;
        with_scene_mut(instance, |scene| scene.tick(t))
    })
}

/// Adapt the scene to a new surface size.
///
/// Crossing a density tier reseeds fire and smoke at the new counts.
/// `out_tier_changed` (optional) receives whether that happened.
///
/// Returns
/// - `FxErrorCode::Ok` (0) on success
/// - `FxErrorCode::NullPointer` if `ptr` is null
/// - `FxErrorCode::InvalidViewport` if width or height is zero; the scene is unchanged
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `fx_scene_new` or null.
/// - `out_tier_changed` if non-null, must be a valid pointer to a `bool`.
#[no_mangle]
pub unsafe extern "C" fn fx_scene_resize(
    ptr: *const FxSceneInstance,
    width: u32,
    height: u32,
    out_tier_changed: *mut bool,
) -> FxErrorCode {
    handle_ffi_result_error(|| {
        let instance = instance_from_ptr(ptr)?;
        let change = with_scene_mut(instance, |scene| scene.resize(width, height))??;
        if !out_tier_changed.is_null() {
            unsafe {
                *out_tier_changed = change.tier_changed;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{fx_scene_destroy, fx_scene_new, FxSceneOptions};
    use std::ptr;

    fn new_scene(width: u32) -> *mut FxSceneInstance {
        let options = FxSceneOptions {
            width,
            height: 720,
            seed: 4,
            use_seed: true,
            hysteresis_px: 0,
        };
        let mut scene = ptr::null_mut();
        assert_eq!(unsafe { fx_scene_new(options, &mut scene) }, FxErrorCode::Ok);
        scene
    }

    #[test]
    fn test_tick_rejects_nan() {
        let scene = new_scene(1280);
        assert_eq!(fx_scene_tick(scene, 0.5), FxErrorCode::Ok);
        assert_eq!(fx_scene_tick(scene, f32::NAN), FxErrorCode::InvalidParameter);
        assert_eq!(fx_scene_tick(ptr::null(), 0.5), FxErrorCode::NullPointer);
        unsafe { fx_scene_destroy(scene) };
    }

    #[test]
    fn test_resize_reports_tier_change() {
        let scene = new_scene(1280);
        let mut changed = false;
        assert_eq!(
            unsafe { fx_scene_resize(scene, 400, 720, &mut changed) },
            FxErrorCode::Ok
        );
        assert!(changed);

        assert_eq!(
            unsafe { fx_scene_resize(scene, 0, 720, ptr::null_mut()) },
            FxErrorCode::InvalidViewport
        );
        unsafe { fx_scene_destroy(scene) };
    }
}
